//! Scroll notification hook
//!
//! After a successful page change, controllers notify the registered view so
//! the host can bring the list back into sight. The notification is deferred
//! one scheduling turn so the host has re-rendered before the position is
//! measured, and it only ever scrolls upward unless forced.

use std::sync::Arc;

/// Pixel margin left above the target element
pub const DEFAULT_SCROLL_MARGIN: i64 = 20;

/// A scrollable viewport with one element of interest inside it.
///
/// Registered on a controller via `mounted`; the controller only ever calls
/// it fire-and-forget after committing a page change.
pub trait ScrollView: Send + Sync {
    /// Position of the element's top edge, in pixels from document origin
    fn top_offset(&self) -> i64;

    /// Current scroll position of the viewport
    fn viewport_offset(&self) -> i64;

    /// Scroll the viewport so the given position is at the top
    fn scroll_to(&self, target: i64);
}

/// Schedule a scroll that brings `view`'s element into sight.
///
/// Runs on the next scheduling turn. The target is
/// `max(top_offset - margin, 0)`; the scroll is skipped when the viewport is
/// already at or above the target, unless `force` is set.
pub fn scroll_to_view(view: Option<Arc<dyn ScrollView>>, margin: i64, force: bool) {
    let Some(view) = view else {
        return;
    };

    tokio::spawn(async move {
        tokio::task::yield_now().await;

        let target = (view.top_offset() - margin).max(0);
        if view.viewport_offset() > target || force {
            view.scroll_to(target);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use tokio::sync::mpsc;

    struct RecordingView {
        top: i64,
        viewport: AtomicI64,
        scrolled: mpsc::UnboundedSender<i64>,
    }

    impl ScrollView for RecordingView {
        fn top_offset(&self) -> i64 {
            self.top
        }

        fn viewport_offset(&self) -> i64 {
            self.viewport.load(Ordering::SeqCst)
        }

        fn scroll_to(&self, target: i64) {
            self.scrolled.send(target).unwrap();
        }
    }

    fn view(top: i64, viewport: i64) -> (Arc<RecordingView>, mpsc::UnboundedReceiver<i64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let view = Arc::new(RecordingView {
            top,
            viewport: AtomicI64::new(viewport),
            scrolled: tx,
        });
        (view, rx)
    }

    #[tokio::test]
    async fn test_scrolls_up_to_target() {
        let (view, mut rx) = view(100, 500);
        scroll_to_view(Some(view), DEFAULT_SCROLL_MARGIN, false);
        assert_eq!(rx.recv().await, Some(80));
    }

    #[tokio::test]
    async fn test_target_clamped_at_zero() {
        let (view, mut rx) = view(10, 500);
        scroll_to_view(Some(view), DEFAULT_SCROLL_MARGIN, false);
        assert_eq!(rx.recv().await, Some(0));
    }

    #[tokio::test]
    async fn test_never_scrolls_down_unforced() {
        let (view, mut rx) = view(400, 100);
        scroll_to_view(Some(view), DEFAULT_SCROLL_MARGIN, false);

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_force_scrolls_down() {
        let (view, mut rx) = view(400, 100);
        scroll_to_view(Some(view), DEFAULT_SCROLL_MARGIN, true);
        assert_eq!(rx.recv().await, Some(380));
    }

    #[tokio::test]
    async fn test_no_view_is_a_no_op() {
        scroll_to_view(None, DEFAULT_SCROLL_MARGIN, true);
    }
}
