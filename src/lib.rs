//! # pagekit
//!
//! Reusable pagination state controllers for async data sources.
//! Controllers decouple *which page is shown* from *how that page's data is
//! obtained*: the caller drives navigation, a pluggable fetch capability
//! produces the data.
//!
//! ## Profiles
//!
//! - [`ClientPager`]: the full ordered key set is known up front; items are
//!   fetched lazily in page-sized batches into an identity-keyed cache, and
//!   overlapping navigations are serialized by an epoch guard
//! - [`ControlledPager`]: the caller owns page size, total size and the
//!   visible items; the controller only sequences fetch-then-commit
//! - [`CursorPager`]: pages are discovered incrementally through an opaque
//!   continuation token and a running total
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::FutureExt;
//! use pagekit::{ClientPager, FetchFn, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let pager = ClientPager::new(FetchFn(|keys: Vec<u64>| {
//!         async move { load_rows(keys).await }.boxed()
//!     }))
//!     .with_page_size(20);
//!
//!     pager.set_keys(all_row_ids().await?).await?;
//!     pager.next_page().await?;
//!     for row in pager.items().await {
//!         // render
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Controller Surface                     │
//! │  go_to / next / prev / first / last      mounted(view)     │
//! │  page · start · end · total_pages · items · loading        │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴────────────┬─────────────────┐
//! │   Bounds     │         Fetch            │     Scroll      │
//! ├──────────────┼──────────────────────────┼─────────────────┤
//! │ pure window  │ KeyFetcher   (client)    │ deferred,       │
//! │ arithmetic   │ RangeFetcher (controlled)│ upward-only     │
//! │ (signed)     │ CursorFetcher (server)   │ notification    │
//! └──────────────┴──────────────────────────┴─────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for pagekit
pub mod error;

/// Common types and type aliases
pub mod types;

/// Fetch capability traits
pub mod fetch;

/// Derived-range calculation
pub mod bounds;

/// Scroll notification hook
pub mod scroll;

/// The pagination controllers
pub mod controller;

// ============================================================================
// Re-exports
// ============================================================================

pub use bounds::{PageBounds, PagerSnapshot};
pub use controller::{ClientPager, ControlledPager, CursorPager};
pub use error::{Error, Result};
pub use fetch::{CursorFetcher, FetchFn, KeyFetcher, RangeFetcher};
pub use scroll::{ScrollView, DEFAULT_SCROLL_MARGIN};
pub use types::{CursorBatch, CursorRequest, PageRequest, DEFAULT_PAGE_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
