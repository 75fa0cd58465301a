//! Search command input
//!
//! Raw, untrusted input for a document search. Filter keys the handler does
//! not recognize are dropped during deserialization; pagination clamping here
//! is the outer boundary policy, while `DocumentQuery` stays fail-fast.

use serde::Deserialize;

use dms_query::query::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};

/// Recognized filter keys. Unknown keys in the source mapping are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Author id as a string; resolved against the user store before the
    /// query executes
    pub author_id: Option<String>,
    /// Status string, parsed against the fixed status enum
    pub status: Option<String>,
    /// Tags, match-any
    pub tags: Option<Vec<String>>,
    /// ISO-8601 date/time, inclusive lower bound on creation date
    pub created_after: Option<String>,
    /// ISO-8601 date/time, inclusive upper bound on creation date
    pub created_before: Option<String>,
    /// Exact file type
    pub file_type: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.author_id.is_none()
            && self.status.is_none()
            && self.tags.is_none()
            && self.created_after.is_none()
            && self.created_before.is_none()
            && self.file_type.is_none()
    }
}

/// Input to the search use case
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocumentsCommand {
    #[serde(default)]
    pub filters: SearchFilters,
    pub order_by: Option<String>,
    /// Raw direction string, case-insensitive, normalized by the handler
    pub order_direction: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for SearchDocumentsCommand {
    fn default() -> Self {
        Self {
            filters: SearchFilters::default(),
            order_by: None,
            order_direction: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl SearchDocumentsCommand {
    pub fn new(filters: SearchFilters) -> Self {
        Self {
            filters,
            ..Default::default()
        }
    }

    /// Apply the boundary policy: page floors at 1, limit clamps to its
    /// allowed range. Deliberate clamping, not an error path.
    pub fn clamp_pagination(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(MIN_LIMIT, MAX_LIMIT);
        self
    }
}
