//! Derived-range calculator
//!
//! Pure arithmetic over `(page, page_size, total_size)`, shared by every
//! controller profile. Arithmetic is signed: the last-page index is `-1`
//! for an empty domain, and navigation below page 0 stays representable
//! instead of being clamped.

use serde::Serialize;
use std::ops::Range;

/// Pure window arithmetic for one `(page, page_size, total_size)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// Zero-based page index (may be out of range)
    pub page: i64,
    /// Items per page
    pub page_size: usize,
    /// Size of the addressable domain
    pub total_size: usize,
}

impl PageBounds {
    /// Create bounds for one page over a domain
    pub fn new(page: i64, page_size: usize, total_size: usize) -> Self {
        Self {
            page,
            page_size,
            total_size,
        }
    }

    /// Offset of the first item on this page
    pub fn start(&self) -> i64 {
        self.page * self.page_size as i64
    }

    /// Offset one past the last item on this page, capped at the domain size
    pub fn end(&self) -> i64 {
        ((self.page + 1) * self.page_size as i64).min(self.total_size as i64)
    }

    /// Index of the last page.
    ///
    /// `-1` for an empty domain; downstream navigation relies on the sign,
    /// so the empty case must not be collapsed to 0. Defined as 0 when the
    /// page size is not yet known, to avoid dividing by zero.
    pub fn total_pages(&self) -> i64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_size.div_ceil(self.page_size) as i64 - 1
    }

    /// Whether a page exists after this one
    pub fn has_next_page(&self) -> bool {
        self.end() < self.total_size as i64
    }

    /// Whether a page exists before this one
    pub fn has_prev_page(&self) -> bool {
        self.start() > 0
    }

    /// Whether this is page 0
    pub fn is_first_page(&self) -> bool {
        self.page == 0
    }

    /// Whether this page is at or beyond the last page
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages()
    }

    /// The clamped index range for slicing a backing sequence.
    ///
    /// Empty for pages outside the addressable domain.
    pub fn key_range(&self) -> Range<usize> {
        let start = self.start().clamp(0, self.total_size as i64) as usize;
        let end = self.end().clamp(0, self.total_size as i64) as usize;
        start..end.max(start)
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// The full derived surface of a controller, captured at one instant.
///
/// Reading individual getters takes one lock acquisition each; a snapshot
/// reads everything under a single acquisition and is therefore internally
/// consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerSnapshot {
    /// True while a page transition is waiting on an in-flight fetch
    pub loading: bool,
    /// The currently committed page
    pub page: i64,
    /// Items per page
    pub page_size: usize,
    /// Offset of the first item on the committed page
    pub start: i64,
    /// Offset one past the last item on the committed page
    pub end: i64,
    /// Size of the addressable domain
    pub total_size: usize,
    /// Index of the last page (`-1` when the domain is empty)
    pub total_pages: i64,
    /// Whether a page exists after the committed one
    pub has_next_page: bool,
    /// Whether a page exists before the committed one
    pub has_prev_page: bool,
    /// Whether the committed page is page 0
    pub is_first_page: bool,
    /// Whether the committed page is at or beyond the last page
    pub is_last_page: bool,
    /// True only once data has been supplied and the domain is empty
    pub is_empty: bool,
}

impl PagerSnapshot {
    /// Build a snapshot from bounds plus the two non-derived flags
    pub fn new(bounds: PageBounds, loading: bool, first_load_done: bool) -> Self {
        Self {
            loading,
            page: bounds.page,
            page_size: bounds.page_size,
            start: bounds.start(),
            end: bounds.end(),
            total_size: bounds.total_size,
            total_pages: bounds.total_pages(),
            has_next_page: bounds.has_next_page(),
            has_prev_page: bounds.has_prev_page(),
            is_first_page: bounds.is_first_page(),
            is_last_page: bounds.is_last_page(),
            is_empty: first_load_done && bounds.total_size == 0,
        }
    }
}
