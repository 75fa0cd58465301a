//! Sort direction and sortable attributes

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending order (A-Z, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, newest first)
    Desc,
}

impl SortDirection {
    /// Parse from string, case-insensitive
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }

    /// SQL keyword
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sortable attribute names accepted by `orderBy`
pub mod attributes {
    pub const TITLE: &str = "title";
    pub const STATUS: &str = "status";
    pub const FILE_TYPE: &str = "file_type";
    pub const FILE_SIZE: &str = "file_size";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
}

/// Map a sortable attribute to its column reference.
///
/// Raw identifiers end up interpolated into ORDER BY, so anything outside
/// this whitelist is rejected at query construction.
pub fn sortable_column(attribute: &str) -> Option<&'static str> {
    match attribute {
        attributes::TITLE => Some("d.title"),
        attributes::STATUS => Some("d.status"),
        attributes::FILE_TYPE => Some("d.file_type"),
        attributes::FILE_SIZE => Some("d.file_size"),
        attributes::CREATED_AT => Some("d.created_at"),
        attributes::UPDATED_AT => Some("d.updated_at"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing_is_case_insensitive() {
        assert_eq!(SortDirection::from_str("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::from_str("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::from_str("Desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::from_str("sideways"), None);
    }

    #[test]
    fn test_sortable_column_whitelist() {
        assert_eq!(sortable_column("created_at"), Some("d.created_at"));
        assert_eq!(sortable_column("title"), Some("d.title"));
        assert_eq!(sortable_column("author_id"), None);
        assert_eq!(sortable_column("d.title; DROP TABLE documents"), None);
    }
}
