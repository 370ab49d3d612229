use std::collections::BTreeSet;

/// Titles already shown to the user, kept to build the exclusion list for
/// the next refresh.
///
/// Neither operation may fail: an unreadable store loads as empty and a
/// failed write is dropped, so a broken cache never blocks rendering.
#[cfg_attr(test, mockall::automock)]
pub trait TitleCache: Send + Sync {
    fn load(&self) -> BTreeSet<String>;
    fn save(&self, titles: &[String]);
}
