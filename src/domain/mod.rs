pub mod article;
pub mod outcome;

pub use article::{Article, RawArticle, RawSource};
pub use outcome::{Direction, FetchOutcome, RenderOutcome, RotationOutcome};
