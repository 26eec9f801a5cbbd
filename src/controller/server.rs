//! Server cursor pagination controller
//!
//! Pages are discovered incrementally: each fetch hands over the stored
//! continuation token and appends the returned items, so the set of known
//! items and the reported total only ever grow. Jumping to the last page is
//! impossible by construction and fails fast.

use crate::bounds::{PageBounds, PagerSnapshot};
use crate::error::{Error, Result};
use crate::fetch::CursorFetcher;
use crate::scroll::{self, ScrollView, DEFAULT_SCROLL_MARGIN};
use crate::types::{CursorRequest, DEFAULT_PAGE_SIZE};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Pagination controller over a cursor-driven source that reveals its pages
/// one continuation token at a time.
pub struct CursorPager<T> {
    fetch: Arc<dyn CursorFetcher<T>>,
    page_size: usize,
    state: Arc<RwLock<CursorState<T>>>,
}

struct CursorState<T> {
    /// All items discovered so far, in page order
    items: Vec<T>,
    /// Running total reported by the source
    total_size: usize,
    /// Token for the next undiscovered page; `None` before the first fetch
    /// and after the source reports the end
    next_page_token: Option<String>,
    page: i64,
    loading: bool,
    first_load_done: bool,
    view: Option<Arc<dyn ScrollView>>,
}

impl<T> Clone for CursorPager<T> {
    fn clone(&self) -> Self {
        Self {
            fetch: Arc::clone(&self.fetch),
            page_size: self.page_size,
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> CursorPager<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a controller with the default page size.
    ///
    /// Discovery starts on the first navigation; use
    /// [`with_eager_start`](Self::with_eager_start) to begin immediately.
    pub fn new(fetch: impl CursorFetcher<T> + 'static) -> Self {
        Self {
            fetch: Arc::new(fetch),
            page_size: DEFAULT_PAGE_SIZE,
            state: Arc::new(RwLock::new(CursorState {
                items: Vec::new(),
                total_size: 0,
                next_page_token: None,
                page: 0,
                loading: true,
                first_load_done: false,
                view: None,
            })),
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Kick off page-0 discovery in the background instead of waiting for
    /// the first explicit navigation.
    ///
    /// There is no navigation caller to receive a failure here, so one is
    /// logged and the controller stays in loading state; an explicit
    /// [`init`](Self::init) retries with normal error propagation.
    #[must_use]
    pub fn with_eager_start(self) -> Self {
        let pager = self.clone();
        tokio::spawn(async move {
            if let Err(error) = pager.init().await {
                warn!("eager page discovery failed: {error}");
            }
        });
        self
    }

    /// Register the scroll target (last write wins)
    pub async fn mounted(&self, view: Arc<dyn ScrollView>) {
        self.state.write().await.view = Some(view);
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    /// Discover page 0
    pub async fn init(&self) -> Result<()> {
        self.go_to(0).await
    }

    /// Navigate to the given page, scrolling the view once committed.
    ///
    /// A page whose start offset falls inside the already-discovered items
    /// is a pure index change; otherwise the next undiscovered page is
    /// fetched with the stored continuation token and appended first. The
    /// caller must not request pages beyond what `total_size` admits.
    pub async fn go_to(&self, page: i64) -> Result<()> {
        self.go_to_inner(page, false).await
    }

    /// Navigate to the given page without triggering the scroll hook
    pub async fn go_to_without_scroll(&self, page: i64) -> Result<()> {
        self.go_to_inner(page, true).await
    }

    /// Navigate to the page after the current one
    pub async fn next_page(&self) -> Result<()> {
        let page = self.page().await;
        self.go_to(page + 1).await
    }

    /// Navigate to the page before the current one
    pub async fn prev_page(&self) -> Result<()> {
        let page = self.page().await;
        self.go_to(page - 1).await
    }

    /// Navigate to page 0
    pub async fn first_page(&self) -> Result<()> {
        self.go_to(0).await
    }

    /// Always fails: the total page count cannot be known without having
    /// discovered every page.
    pub async fn last_page(&self) -> Result<()> {
        Err(Error::unsupported(
            "last_page",
            "total page count is unknown until every page has been discovered",
        ))
    }

    /// Whether first/last jumps are meaningful for this profile.
    ///
    /// Always false; callers should check this before offering a
    /// jump-to-last control.
    pub fn supports_first_last(&self) -> bool {
        false
    }

    async fn go_to_inner(&self, target: i64, suppress_scroll: bool) -> Result<()> {
        let request = {
            let mut st = self.state.write().await;
            let start = target * self.page_size as i64;
            if start < st.items.len() as i64 {
                // Already discovered: pure index change, no fetch.
                st.page = target;
                st.loading = false;
                let view = if suppress_scroll { None } else { st.view.clone() };
                drop(st);
                scroll::scroll_to_view(view, DEFAULT_SCROLL_MARGIN, false);
                return Ok(());
            }
            st.loading = true;
            CursorRequest {
                page_token: st.next_page_token.clone(),
                page_size: self.page_size,
            }
        };

        debug!(
            "discovering page {} (token: {:?})",
            target, request.page_token
        );
        let batch = self.fetch.fetch_page(request).await?;

        let view = {
            let mut st = self.state.write().await;
            st.items.extend(batch.items);
            st.total_size = batch.total_size;
            st.next_page_token = batch.next_page_token;
            st.first_load_done = true;
            st.loading = false;
            st.page = target;
            if suppress_scroll {
                None
            } else {
                st.view.clone()
            }
        };
        scroll::scroll_to_view(view, DEFAULT_SCROLL_MARGIN, false);
        Ok(())
    }

    // ============================================================================
    // Read surface
    // ============================================================================

    /// The discovered items visible on the current page
    pub async fn items(&self) -> Vec<T> {
        let st = self.state.read().await;
        let range = PageBounds::new(st.page, self.page_size, st.items.len()).key_range();
        st.items[range].to_vec()
    }

    /// Consistent view of the whole derived surface.
    ///
    /// Derived ranges use the source-reported total, so `has_next_page` can
    /// be true for pages not yet discovered.
    pub async fn snapshot(&self) -> PagerSnapshot {
        let st = self.state.read().await;
        let bounds = PageBounds::new(st.page, self.page_size, st.total_size);
        PagerSnapshot::new(bounds, st.loading, st.first_load_done)
    }

    /// The currently committed page
    pub async fn page(&self) -> i64 {
        self.state.read().await.page
    }

    /// Items per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether a page transition is waiting on an in-flight fetch
    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// The running total reported by the source
    pub async fn total_size(&self) -> usize {
        self.state.read().await.total_size
    }

    /// Offset of the first item on the current page
    pub async fn start(&self) -> i64 {
        self.snapshot().await.start
    }

    /// Offset one past the last item on the current page
    pub async fn end(&self) -> i64 {
        self.snapshot().await.end
    }

    /// Index of the last page implied by the running total
    pub async fn total_pages(&self) -> i64 {
        self.snapshot().await.total_pages
    }

    /// Whether a page exists after the current one
    pub async fn has_next_page(&self) -> bool {
        self.snapshot().await.has_next_page
    }

    /// Whether a page exists before the current one
    pub async fn has_prev_page(&self) -> bool {
        self.snapshot().await.has_prev_page
    }

    /// Whether the current page is page 0
    pub async fn is_first_page(&self) -> bool {
        self.snapshot().await.is_first_page
    }

    /// Whether the current page is at or beyond the last implied page
    pub async fn is_last_page(&self) -> bool {
        self.snapshot().await.is_last_page
    }

    /// True only once discovery has happened and the source is empty
    pub async fn is_empty(&self) -> bool {
        self.snapshot().await.is_empty
    }
}
