mod connection;
mod title_cache_repository;

pub use connection::SqliteStorage;
pub use title_cache_repository::{SqliteTitleCache, TITLES_KEY};
