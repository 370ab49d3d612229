pub mod commands;
pub mod prompt;

pub use commands::{CacheAction, Cli, Commands};
pub use prompt::PromptAction;
