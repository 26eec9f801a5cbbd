//! Externally-controlled pagination controller
//!
//! The caller owns everything: page size, total size, and the visible items
//! are all pushed in from outside. Navigation only asks the fetch capability
//! to make the requested window visible and then commits the page index;
//! there is no cache and no result merging.

use crate::bounds::{PageBounds, PagerSnapshot};
use crate::error::Result;
use crate::fetch::RangeFetcher;
use crate::scroll::{self, ScrollView, DEFAULT_SCROLL_MARGIN};
use crate::types::PageRequest;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Pagination controller whose data is produced entirely by the caller.
///
/// The fetch capability receives the requested window and is responsible for
/// routing exactly that page's items back via [`set_items`](Self::set_items);
/// the controller cannot detect a capability that fails to honor this.
pub struct ControlledPager<V> {
    fetch: Arc<dyn RangeFetcher>,
    state: Arc<RwLock<ControlledState<V>>>,
}

struct ControlledState<V> {
    items: Vec<V>,
    page: i64,
    page_size: usize,
    total_size: usize,
    loading: bool,
    first_load_done: bool,
    view: Option<Arc<dyn ScrollView>>,
}

impl<V> Clone for ControlledPager<V> {
    fn clone(&self) -> Self {
        Self {
            fetch: Arc::clone(&self.fetch),
            state: Arc::clone(&self.state),
        }
    }
}

impl<V> ControlledPager<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a controller; page size and total size start at 0 and must be
    /// supplied by the caller before navigation is meaningful
    pub fn new(fetch: impl RangeFetcher + 'static) -> Self {
        Self {
            fetch: Arc::new(fetch),
            state: Arc::new(RwLock::new(ControlledState {
                items: Vec::new(),
                page: 0,
                page_size: 0,
                total_size: 0,
                loading: true,
                first_load_done: false,
                view: None,
            })),
        }
    }

    /// Register the scroll target (last write wins)
    pub async fn mounted(&self, view: Arc<dyn ScrollView>) {
        self.state.write().await.view = Some(view);
    }

    // ============================================================================
    // Caller-owned state
    // ============================================================================

    /// Supply the items for the current page and leave loading state
    pub async fn set_items(&self, items: Vec<V>) {
        let mut st = self.state.write().await;
        st.first_load_done = true;
        st.loading = false;
        st.items = items;
    }

    /// Set the page size
    pub async fn set_page_size(&self, page_size: usize) {
        self.state.write().await.page_size = page_size;
    }

    /// Set the total size of the addressable domain
    pub async fn set_total_size(&self, total_size: usize) {
        self.state.write().await.total_size = total_size;
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    /// Navigate to the given page, scrolling the view once committed
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

    /// Navigate to the last page
    pub async fn last_page(&self) -> Result<()> {
        let target = self.total_pages().await;
        self.go_to(target).await
    }

    /// Whether first/last jumps are meaningful for this profile
    pub fn supports_first_last(&self) -> bool {
        true
    }

    async fn go_to_inner(&self, target: i64, suppress_scroll: bool) -> Result<()> {
        let request = {
            let mut st = self.state.write().await;
            st.loading = true;
            let min = target * st.page_size as i64;
            PageRequest {
                min,
                max: min + st.page_size as i64,
                page: target,
            }
        };

        self.fetch.fetch_range(request).await?;

        let view = {
            let mut st = self.state.write().await;
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

    /// The items last supplied via [`set_items`](Self::set_items)
    pub async fn items(&self) -> Vec<V> {
        self.state.read().await.items.clone()
    }

    /// Consistent view of the whole derived surface
    pub async fn snapshot(&self) -> PagerSnapshot {
        let st = self.state.read().await;
        let bounds = PageBounds::new(st.page, st.page_size, st.total_size);
        PagerSnapshot::new(bounds, st.loading, st.first_load_done)
    }

    /// The currently committed page
    pub async fn page(&self) -> i64 {
        self.state.read().await.page
    }

    /// Items per page
    pub async fn page_size(&self) -> usize {
        self.state.read().await.page_size
    }

    /// Whether a page transition is waiting on an in-flight fetch
    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// The caller-supplied total size
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

    /// Index of the last page (`-1` when the domain is empty, 0 while the
    /// page size is unset)
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

    /// Whether the current page is at or beyond the last page
    pub async fn is_last_page(&self) -> bool {
        self.snapshot().await.is_last_page
    }

    /// True only once items have been supplied and the domain is empty
    pub async fn is_empty(&self) -> bool {
        self.snapshot().await.is_empty
    }
}
