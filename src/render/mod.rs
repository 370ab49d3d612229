pub mod markup;
pub mod animation;
pub mod opener;
pub mod renderer;

pub use animation::{Animator, TerminalAnimator, TransitionDone, TransitionWait};
pub use opener::{Opener, SystemOpener};
pub use renderer::{FeedRenderer, FeedView, Key, RenderedItem, ViewEvent};
