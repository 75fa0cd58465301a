//! # dms-query
//!
//! Query system for DMS RS.
//!
//! This crate implements the specification (predicate) algebra over documents
//! and its two interpreters: direct in-memory evaluation and translation into
//! parameterized SQL clauses. It also carries the query and pagination objects
//! that wrap a specification for execution against a store.
//!
//! ## Structure
//!
//! - `spec` - Specification tree (leaf predicates and And/Or/Not combinators)
//!   with the in-memory evaluator
//! - `translate` - Translation of a specification tree into a composable
//!   where-expression plus parameter table, and SQL rendering
//! - `sorts` - Sort direction and the sortable-attribute whitelist
//! - `query` - The validated `DocumentQuery` object
//! - `paginated` - `PaginatedResult` with page-count/navigation math
//!
//! ## Example
//!
//! ```
//! use dms_query::spec::Specification;
//! use dms_query::translate::translate;
//! use dms_models::DocumentStatus;
//!
//! let spec = Specification::status(DocumentStatus::Approved)
//!     .and(Specification::tags(vec!["finance".into()]));
//!
//! let filter = translate(&spec);
//! assert!(filter.expr.is_some());
//! assert_eq!(filter.params.len(), 2);
//! ```

pub mod paginated;
pub mod query;
pub mod sorts;
pub mod spec;
pub mod translate;

// Re-exports for convenience
pub use paginated::PaginatedResult;
pub use query::{DocumentQuery, DocumentQueryBuilder};
pub use sorts::SortDirection;
pub use spec::Specification;
pub use translate::{translate, CompareOp, FilterExpr, ParamMap, SqlValue, TranslatedFilter};
