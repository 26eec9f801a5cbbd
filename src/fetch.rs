//! Fetch capabilities
//!
//! Each controller profile is driven by one asynchronous fetch capability,
//! supplied at construction and treated as a black box. The traits here are
//! object-safe so controllers can hold them as `Arc<dyn ...>`; the
//! [`FetchFn`] adapter lets a plain closure returning a boxed future serve
//! as a fetcher without a named type.

use crate::error::Result;
use crate::types::{CursorBatch, CursorRequest, PageRequest};
use async_trait::async_trait;
use futures::future::BoxFuture;

/// Fetch capability for the client-async profile.
///
/// Receives the keys missing from the controller's cache, in key-set order,
/// and must return one item per key, positionally aligned with the input.
#[async_trait]
pub trait KeyFetcher<K, V>: Send + Sync {
    /// Fetch the items for the given keys
    async fn fetch_items(&self, keys: Vec<K>) -> Result<Vec<V>>;
}

/// Fetch capability for the controlled profile.
///
/// Side-effecting: the implementation is responsible for making exactly the
/// requested window's items visible through caller-owned state (typically by
/// calling [`ControlledPager::set_items`] when the data arrives).
///
/// [`ControlledPager::set_items`]: crate::controller::ControlledPager::set_items
#[async_trait]
pub trait RangeFetcher: Send + Sync {
    /// Fetch the rows covering the given window
    async fn fetch_range(&self, request: PageRequest) -> Result<()>;
}

/// Fetch capability for the server cursor profile.
///
/// Receives the stored continuation token (absent for the first page) and
/// returns the next page of items together with the running total and the
/// token for the page after it.
#[async_trait]
pub trait CursorFetcher<T>: Send + Sync {
    /// Fetch the next undiscovered page
    async fn fetch_page(&self, request: CursorRequest) -> Result<CursorBatch<T>>;
}

// ============================================================================
// Closure adapter
// ============================================================================

/// Adapter turning a closure into a fetch capability.
///
/// Wraps any `Fn(Input) -> BoxFuture<'static, Result<Output>>` and implements
/// the matching fetcher trait for it:
///
/// ```rust,ignore
/// let pager = ClientPager::new(FetchFn(|keys: Vec<u64>| {
///     async move { load_rows(keys).await }.boxed()
/// }));
/// ```
pub struct FetchFn<F>(pub F);

#[async_trait]
impl<K, V, F> KeyFetcher<K, V> for FetchFn<F>
where
    K: Send + 'static,
    V: Send,
    F: Fn(Vec<K>) -> BoxFuture<'static, Result<Vec<V>>> + Send + Sync,
{
    async fn fetch_items(&self, keys: Vec<K>) -> Result<Vec<V>> {
        (self.0)(keys).await
    }
}

#[async_trait]
impl<F> RangeFetcher for FetchFn<F>
where
    F: Fn(PageRequest) -> BoxFuture<'static, Result<()>> + Send + Sync,
{
    async fn fetch_range(&self, request: PageRequest) -> Result<()> {
        (self.0)(request).await
    }
}

#[async_trait]
impl<T, F> CursorFetcher<T> for FetchFn<F>
where
    T: Send,
    F: Fn(CursorRequest) -> BoxFuture<'static, Result<CursorBatch<T>>> + Send + Sync,
{
    async fn fetch_page(&self, request: CursorRequest) -> Result<CursorBatch<T>> {
        (self.0)(request).await
    }
}
