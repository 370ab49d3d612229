use std::io::Write;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::domain::Direction;
use crate::render::renderer::RenderedItem;

/// Completion signal handed to an exit transition. Finishing it, or simply
/// dropping it, lets the waiting rotation continue.
pub struct TransitionDone {
    tx: Sender<()>,
}

pub struct TransitionWait {
    rx: Receiver<()>,
}

impl TransitionDone {
    pub fn channel() -> (TransitionDone, TransitionWait) {
        let (tx, rx) = mpsc::channel();
        (TransitionDone { tx }, TransitionWait { rx })
    }

    pub fn finish(self) {
        // The waiter may already be gone; nothing to report then.
        let _ = self.tx.send(());
    }
}

impl TransitionWait {
    /// Block until the transition finishes. Returns false when the signal
    /// was dropped without being finished.
    pub fn wait(self) -> bool {
        self.rx.recv().is_ok()
    }
}

/// Optional visual collaborator. Every hook defaults to doing nothing, and
/// the default exit finishes immediately.
pub trait Animator: Send + Sync {
    fn page_entrance(&self) {}

    fn items_entrance(&self, _items: &[RenderedItem]) {}

    fn attach_affordances(&self, _items: &[RenderedItem]) {}

    /// Animate `items` out. Must eventually finish or drop `done`; the
    /// rotation waits on it.
    fn exit(&self, _items: &[RenderedItem], _direction: Direction, done: TransitionDone) {
        done.finish();
    }
}

/// Terminal stand-in: draws a divider when a set leaves the screen.
pub struct TerminalAnimator {
    width: usize,
}

impl TerminalAnimator {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn divider(&self, direction: Direction) -> String {
        let label = match direction {
            Direction::Next => " next >> ",
            Direction::Previous => " << previous ",
        };
        let fill = self.width.saturating_sub(label.chars().count());
        let left = fill / 2;
        format!("{}{}{}", "-".repeat(left), label, "-".repeat(fill - left))
    }
}

impl Default for TerminalAnimator {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Animator for TerminalAnimator {
    fn exit(&self, items: &[RenderedItem], direction: Direction, done: TransitionDone) {
        if !items.is_empty() {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "\n{}\n", self.divider(direction));
            let _ = stdout.flush();
        }
        done.finish();
    }
}
