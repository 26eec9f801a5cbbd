//! Pagination controllers
//!
//! Three profiles over one shared field vocabulary:
//! - [`ClientPager`] - the full key set is known up front, items are fetched
//!   lazily into an identity-keyed cache (the interesting one: it carries
//!   the epoch guard against out-of-order fetch completions)
//! - [`ControlledPager`] - the caller owns the data and the controller only
//!   sequences fetch-then-commit
//! - [`CursorPager`] - pages are discovered incrementally through an opaque
//!   continuation token

mod client;
mod controlled;
mod server;

pub use client::ClientPager;
pub use controlled::ControlledPager;
pub use server::CursorPager;
