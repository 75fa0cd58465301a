//! The document query object
//!
//! Bundles an optional specification with sorting and pagination. The
//! constructor is the only validation point; a constructed query is always
//! executable.

use dms_core::error::DmsError;
use dms_core::result::DmsResult;

use crate::sorts::{sortable_column, SortDirection};
use crate::spec::Specification;

/// Page size bounds
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_LIMIT: i64 = 20;

/// A validated query over documents
#[derive(Debug, Clone)]
pub struct DocumentQuery {
    pub specification: Option<Specification>,
    pub order_by: Option<String>,
    pub order_direction: SortDirection,
    pub page: i64,
    pub limit: i64,
}

impl DocumentQuery {
    /// Construct a query, failing fast on invalid pagination or sorting.
    pub fn new(
        specification: Option<Specification>,
        order_by: Option<String>,
        order_direction: SortDirection,
        page: i64,
        limit: i64,
    ) -> DmsResult<Self> {
        if page < 1 {
            return Err(DmsError::validation("page", "must be >= 1"));
        }
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(DmsError::validation(
                "limit",
                format!("must be between {MIN_LIMIT} and {MAX_LIMIT}"),
            ));
        }
        if let Some(attribute) = order_by.as_deref() {
            if sortable_column(attribute).is_none() {
                return Err(DmsError::validation(
                    "orderBy",
                    format!("not a sortable attribute: {attribute}"),
                ));
            }
        }

        Ok(Self {
            specification,
            order_by,
            order_direction,
            page,
            limit,
        })
    }

    /// Query matching everything, first page, default limit
    pub fn unfiltered() -> Self {
        Self {
            specification: None,
            order_by: None,
            order_direction: SortDirection::Asc,
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Row offset derived from page and limit; saturates instead of
    /// overflowing for absurdly large pages
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Fluent builder for [`DocumentQuery`]
#[derive(Debug, Default)]
pub struct DocumentQueryBuilder {
    specification: Option<Specification>,
    order_by: Option<String>,
    order_direction: SortDirection,
    page: Option<i64>,
    limit: Option<i64>,
}

impl DocumentQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn specification(mut self, spec: Specification) -> Self {
        self.specification = Some(spec);
        self
    }

    pub fn maybe_specification(mut self, spec: Option<Specification>) -> Self {
        self.specification = spec;
        self
    }

    pub fn order_by(mut self, attribute: impl Into<String>) -> Self {
        self.order_by = Some(attribute.into());
        self
    }

    pub fn maybe_order_by(mut self, attribute: Option<String>) -> Self {
        self.order_by = attribute;
        self
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.order_direction = direction;
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Validate and build the query
    pub fn build(self) -> DmsResult<DocumentQuery> {
        DocumentQuery::new(
            self.specification,
            self.order_by,
            self.order_direction,
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = DocumentQuery::unfiltered();
        assert!(query.specification.is_none());
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.order_direction, SortDirection::Asc);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_offset_derivation() {
        let query = DocumentQuery::new(None, None, SortDirection::Asc, 3, 25).unwrap();
        assert_eq!(query.offset(), 50);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let query = DocumentQuery::new(None, None, SortDirection::Asc, i64::MAX, 100).unwrap();
        assert_eq!(query.offset(), i64::MAX);
    }

    #[test]
    fn test_page_boundaries() {
        assert!(DocumentQuery::new(None, None, SortDirection::Asc, 0, 20).is_err());
        assert!(DocumentQuery::new(None, None, SortDirection::Asc, 1, 20).is_ok());
    }

    #[test]
    fn test_limit_boundaries() {
        assert!(DocumentQuery::new(None, None, SortDirection::Asc, 1, 0).is_err());
        assert!(DocumentQuery::new(None, None, SortDirection::Asc, 1, 101).is_err());
        assert!(DocumentQuery::new(None, None, SortDirection::Asc, 1, 1).is_ok());
        assert!(DocumentQuery::new(None, None, SortDirection::Asc, 1, 100).is_ok());
    }

    #[test]
    fn test_unknown_order_by_rejected() {
        let err = DocumentQuery::new(
            None,
            Some("ransom_note".into()),
            SortDirection::Asc,
            1,
            20,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "bad_request");
    }

    #[test]
    fn test_builder() {
        let query = DocumentQueryBuilder::new()
            .order_by("created_at")
            .direction(SortDirection::Desc)
            .page(2)
            .limit(50)
            .build()
            .unwrap();

        assert_eq!(query.order_by.as_deref(), Some("created_at"));
        assert_eq!(query.order_direction, SortDirection::Desc);
        assert_eq!(query.offset(), 50);
    }

    #[test]
    fn test_builder_defaults() {
        let query = DocumentQueryBuilder::new().build().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_LIMIT);
    }
}
