use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::domain::{Direction, FetchOutcome, RenderOutcome, RotationOutcome};
use crate::render::renderer::{activate, FeedRenderer, FeedView, ViewEvent};
use crate::services::feed_fetcher::NewsFetcher;
use crate::storage::traits::TitleCache;

/// Clears the in-progress flag however the rotation ends.
struct RotationGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RotationGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RotationGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Owns what is on screen and swaps it for a fresh, non-repeating set on
/// request. Idle until a rotation claims the flag; a request that finds the
/// flag taken is dropped.
pub struct RotationController<F: NewsFetcher, C: TitleCache> {
    fetcher: F,
    cache: C,
    renderer: Mutex<FeedRenderer>,
    rotating: AtomicBool,
}

impl<F: NewsFetcher, C: TitleCache> RotationController<F, C> {
    pub fn new(fetcher: F, cache: C, renderer: FeedRenderer) -> Self {
        Self {
            fetcher,
            cache,
            renderer: Mutex::new(renderer),
            rotating: AtomicBool::new(false),
        }
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating.load(Ordering::Acquire)
    }

    /// Page entry: fetch without exclusions and render, no exit transition.
    pub fn load_initial(&self) -> RotationOutcome {
        let Some(_guard) = RotationGuard::acquire(&self.rotating) else {
            debug!("initial load skipped, rotation in progress");
            return RotationOutcome::Busy;
        };

        self.renderer().page_entrance();
        let outcome = self.cycle(&[], None);
        info!(?outcome, "initial load finished");
        outcome
    }

    /// Replace the display with articles not in the title cache. `direction`
    /// only shapes the exit transition.
    pub fn rotate(&self, direction: Direction) -> RotationOutcome {
        let Some(_guard) = RotationGuard::acquire(&self.rotating) else {
            debug!(%direction, "rotation already in progress, request dropped");
            return RotationOutcome::Busy;
        };

        let exclude: Vec<String> = self.cache.load().into_iter().collect();
        debug!(%direction, excluded = exclude.len(), "rotation started");

        let outcome = self.cycle(&exclude, Some(direction));
        info!(%direction, ?outcome, "rotation finished");
        outcome
    }

    /// Read the current display
    pub fn with_view<R>(&self, f: impl FnOnce(&FeedView) -> R) -> R {
        f(self.renderer().view())
    }

    /// Deliver an input event to the displayed items. Returns whether an
    /// article was opened.
    pub fn activate(&self, event: &ViewEvent) -> bool {
        activate(&self.renderer(), event)
    }

    fn renderer(&self) -> MutexGuard<'_, FeedRenderer> {
        self.renderer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cycle(&self, exclude: &[String], transition: Option<Direction>) -> RotationOutcome {
        let articles = match self.fetcher.fetch_outcome(exclude) {
            FetchOutcome::Articles(articles) => articles,
            FetchOutcome::Empty => return RotationOutcome::Exhausted,
            FetchOutcome::Failed(e) => return RotationOutcome::Failed(e.to_string()),
        };

        if let Some(direction) = transition {
            // Wait outside the renderer lock.
            let pending = self.renderer().play_exit(direction);
            if let Some(wait) = pending {
                if !wait.wait() {
                    debug!("exit transition ended without signalling");
                }
            }
        }

        let mut renderer = self.renderer();
        match renderer.render(&articles) {
            RenderOutcome::Rendered(count) => {
                let titles: Vec<String> = renderer
                    .view()
                    .titles()
                    .into_iter()
                    .filter(|t| !t.is_empty())
                    .collect();
                if !titles.is_empty() {
                    self.cache.save(&titles);
                }
                RotationOutcome::Rendered(count)
            }
            RenderOutcome::Skipped => RotationOutcome::Exhausted,
        }
    }
}
