//! Common types used throughout pagekit
//!
//! This module contains the request/response shapes exchanged with fetch
//! capabilities, plus shared type aliases.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Default number of items per page when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 30;

// ============================================================================
// Fetch Request Types
// ============================================================================

/// Window of rows requested from a controlled-profile fetch.
///
/// The fetch capability is expected to make exactly the rows in
/// `min..max` visible through caller-owned state; the controller has no
/// cache of its own to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Inclusive start offset of the requested window
    pub min: i64,
    /// Exclusive end offset of the requested window
    pub max: i64,
    /// Zero-based index of the requested page
    pub page: i64,
}

/// Request for the next undiscovered page of a cursor-paginated source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorRequest {
    /// Continuation token from the previous response, absent for the first page
    pub page_token: Option<String>,
    /// Number of items the source should return
    pub page_size: usize,
}

// ============================================================================
// Cursor Response
// ============================================================================

/// One discovered page of a cursor-paginated result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorBatch<T> {
    /// Items discovered by this fetch, in source order
    pub items: Vec<T>,
    /// Running total reported by the source
    pub total_size: usize,
    /// Token for the next undiscovered page; `None` when no further pages exist
    pub next_page_token: Option<String>,
}

impl CursorBatch<JsonValue> {
    /// Extract a batch from a raw JSON response body.
    ///
    /// Sources name their item field freely (`items`, `results`, `users`,
    /// ...), so the item sequence is located as the first object field whose
    /// value is an array. `totalSize` is required; `nextPageToken` is
    /// optional, with an empty string treated the same as absent.
    pub fn from_response(body: &JsonValue) -> Result<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| Error::decode("response body is not a JSON object"))?;

        let items = object
            .values()
            .find_map(JsonValue::as_array)
            .cloned()
            .ok_or_else(|| Error::decode("response body has no array-valued field"))?;

        let total_size = object
            .get("totalSize")
            .and_then(JsonValue::as_u64)
            .ok_or_else(|| Error::missing_field("totalSize"))? as usize;

        let next_page_token = object
            .get("nextPageToken")
            .and_then(JsonValue::as_str)
            .filter(|token| !token.is_empty())
            .map(String::from);

        Ok(Self {
            items,
            total_size,
            next_page_token,
        })
    }
}
