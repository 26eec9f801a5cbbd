//! Client-async pagination controller
//!
//! The caller supplies the full ordered key set up front; items are fetched
//! lazily, one page's worth of missing keys at a time, into a cache keyed by
//! item identity rather than page number. Overlapping navigations are
//! serialized by an epoch counter: a fetch whose epoch no longer matches at
//! completion has no observable effect.

use crate::bounds::{PageBounds, PagerSnapshot};
use crate::error::Result;
use crate::fetch::KeyFetcher;
use crate::scroll::{self, ScrollView, DEFAULT_SCROLL_MARGIN};
use crate::types::DEFAULT_PAGE_SIZE;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Pagination controller over a fully-known key set with a lazily-populated
/// item cache.
///
/// Cheaply cloneable; clones share the same state.
pub struct ClientPager<K, V> {
    /// Fetch capability for uncached keys
    fetch: Arc<dyn KeyFetcher<K, V>>,
    /// Items per page, fixed for the controller's lifetime
    page_size: usize,
    /// Shared mutable state
    state: Arc<RwLock<ClientState<K, V>>>,
}

struct ClientState<K, V> {
    /// The full addressable domain, in display order
    keys: Vec<K>,
    /// Fetched items by identity; cleared only by `set_keys`
    cache: HashMap<K, V>,
    /// Bumped on every navigation; stale fetch results are discarded
    epoch: u64,
    /// The currently committed page
    page: i64,
    loading: bool,
    first_load_done: bool,
    view: Option<Arc<dyn ScrollView>>,
}

impl<K, V> Clone for ClientPager<K, V> {
    fn clone(&self) -> Self {
        Self {
            fetch: Arc::clone(&self.fetch),
            page_size: self.page_size,
            state: Arc::clone(&self.state),
        }
    }
}

impl<K, V> ClientPager<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a controller with the default page size
    pub fn new(fetch: impl KeyFetcher<K, V> + 'static) -> Self {
        Self {
            fetch: Arc::new(fetch),
            page_size: DEFAULT_PAGE_SIZE,
            state: Arc::new(RwLock::new(ClientState {
                keys: Vec::new(),
                cache: HashMap::new(),
                epoch: 0,
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

    /// Register the scroll target. Safe to call any number of times; the
    /// last registered view wins.
    pub async fn mounted(&self, view: Arc<dyn ScrollView>) {
        self.state.write().await.view = Some(view);
    }

    // ============================================================================
    // Key set management
    // ============================================================================

    /// Replace the key set wholesale.
    ///
    /// Clears the cache, enters loading state and navigates to page 0,
    /// re-fetching that page from scratch.
    pub async fn set_keys(&self, keys: Vec<K>) -> Result<()> {
        {
            let mut st = self.state.write().await;
            st.first_load_done = true;
            st.keys = keys;
            st.loading = true;
            st.cache.clear();
        }
        self.go_to(0).await
    }

    /// Replace the key set without clearing the cache or changing the page.
    ///
    /// The first call ever behaves as [`set_keys`](Self::set_keys). Afterwards
    /// the new keys take effect in place: cache entries for removed keys
    /// simply become unreachable, the current page is re-resolved against the
    /// new order, and no scroll is triggered. When the key set shrank below
    /// the current page, navigation falls back to the new last page.
    pub async fn update_keys(&self, keys: Vec<K>) -> Result<()> {
        let first_load_done = self.state.read().await.first_load_done;
        if !first_load_done {
            return self.set_keys(keys).await;
        }

        let target = {
            let mut st = self.state.write().await;
            st.keys = keys;
            let total_pages = PageBounds::new(st.page, self.page_size, st.keys.len()).total_pages();
            if st.page > 0 && st.page > total_pages {
                total_pages
            } else {
                st.page
            }
        };
        self.go_to_without_scroll(target).await
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    /// Navigate to the given page, scrolling the view once committed.
    ///
    /// A fetch failure is not caught here: the error propagates, the page
    /// is not committed and the controller keeps reporting loading.
    /// Recovery (surfacing, retrying) is owned by the caller.
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
        // The epoch must be bumped before the first await so any navigation
        // already in flight sees itself superseded.
        let (missing, epoch) = {
            let mut st = self.state.write().await;
            st.epoch += 1;
            let range = PageBounds::new(target, self.page_size, st.keys.len()).key_range();
            let missing: Vec<K> = st.keys[range]
                .iter()
                .filter(|key| !st.cache.contains_key(*key))
                .cloned()
                .collect();
            if !missing.is_empty() {
                st.loading = true;
            }
            (missing, st.epoch)
        };

        let fetched = if missing.is_empty() {
            Vec::new()
        } else {
            debug!(
                "fetching {} uncached items for page {}",
                missing.len(),
                target
            );
            self.fetch.fetch_items(missing.clone()).await?
        };

        let view = {
            let mut st = self.state.write().await;
            if st.epoch != epoch {
                debug!("navigation to page {} superseded, discarding result", target);
                return Ok(());
            }
            if fetched.len() != missing.len() {
                warn!(
                    "fetch returned {} items for {} keys, extra results dropped",
                    fetched.len(),
                    missing.len()
                );
            }
            for (key, item) in missing.into_iter().zip(fetched) {
                st.cache.insert(key, item);
            }
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

    /// The items visible on the current page.
    ///
    /// Keys not yet present in the cache are omitted, never padded with
    /// placeholders, so the list is shorter than the page size while a fetch
    /// for the page is still outstanding. Empty before any data exists.
    pub async fn items(&self) -> Vec<V> {
        let st = self.state.read().await;
        if st.loading && st.cache.is_empty() {
            return Vec::new();
        }
        let range = PageBounds::new(st.page, self.page_size, st.keys.len()).key_range();
        st.keys[range]
            .iter()
            .filter_map(|key| st.cache.get(key).cloned())
            .collect()
    }

    /// The full key set, in display order
    pub async fn keys(&self) -> Vec<K> {
        self.state.read().await.keys.clone()
    }

    /// Consistent view of the whole derived surface
    pub async fn snapshot(&self) -> PagerSnapshot {
        let st = self.state.read().await;
        let bounds = PageBounds::new(st.page, self.page_size, st.keys.len());
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

    /// Number of addressable keys
    pub async fn total_size(&self) -> usize {
        self.state.read().await.keys.len()
    }

    /// Offset of the first item on the current page
    pub async fn start(&self) -> i64 {
        self.snapshot().await.start
    }

    /// Offset one past the last item on the current page
    pub async fn end(&self) -> i64 {
        self.snapshot().await.end
    }

    /// Index of the last page (`-1` when the key set is empty)
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

    /// True only once keys have been supplied and the key set is empty
    pub async fn is_empty(&self) -> bool {
        self.snapshot().await.is_empty
    }
}
