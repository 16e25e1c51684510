//! Transient user-facing notice with a cancellable auto-clear timer.
//!
//! Each post bumps a generation counter and aborts the previous timer, so a
//! timer scheduled for an older notice can never wipe a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    notice: Option<Notice>,
    generation: u64,
}

#[derive(Debug)]
pub struct NoticeBoard {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
    pending: Option<JoinHandle<()>>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
            pending: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Option<Notice> {
        self.lock().notice.clone()
    }

    pub fn has_pending_clear(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Show `notice` until something replaces or clears it
    pub fn post(&mut self, notice: Notice) {
        self.cancel();
        let mut slot = self.lock();
        slot.generation += 1;
        slot.notice = Some(notice);
    }

    /// Show `notice` and clear it after the configured ttl
    pub fn post_transient(&mut self, notice: Notice) {
        self.post(notice);
        self.schedule_clear();
    }

    /// Start the auto-clear timer for whatever is showing now.
    ///
    /// Outside a tokio runtime there is nothing to drive the timer and the
    /// notice stays until replaced.
    pub fn schedule_clear(&mut self) {
        self.cancel();
        let Ok(handle) = Handle::try_current() else {
            debug!("no runtime, notice will not auto-clear");
            return;
        };

        let generation = self.lock().generation;
        let slot = Arc::clone(&self.slot);
        let ttl = self.ttl;
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.generation == generation {
                slot.notice = None;
                debug!(generation, "notice auto-cleared");
            }
        }));
        debug!(generation, ttl_ms = ttl.as_millis() as u64, "notice clear scheduled");
    }

    pub fn clear(&mut self) {
        self.cancel();
        let mut slot = self.lock();
        slot.generation += 1;
        slot.notice = None;
    }

    fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
            debug!("pending notice clear cancelled");
        }
    }
}

impl Drop for NoticeBoard {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticky_post_without_runtime() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        board.post_transient(Notice::success("saved"));
        assert_eq!(board.current(), Some(Notice::success("saved")));
        assert!(!board.has_pending_clear());

        board.clear();
        assert_eq!(board.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_notice_clears_after_ttl() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        board.post_transient(Notice::success("saved"));

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert!(board.current().is_some());

        tokio::time::sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(board.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_notice_survives_older_timer() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        board.post_transient(Notice::success("first"));

        tokio::time::sleep(Duration::from_secs(2)).await;
        board.post_transient(Notice::success("second"));

        // The first timer would have fired here.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert_eq!(board.current(), Some(Notice::success("second")));

        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(board.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sticky_post_cancels_pending_clear() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        board.post_transient(Notice::success("saved"));
        board.post(Notice::error("Please fill out all required fields."));
        assert!(!board.has_pending_clear());

        tokio::time::sleep(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(
            board.current(),
            Some(Notice::error("Please fill out all required fields."))
        );
    }
}
