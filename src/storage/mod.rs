pub mod traits;
pub mod sqlite;

pub use traits::TitleCache;
pub use sqlite::{SqliteStorage, SqliteTitleCache};
