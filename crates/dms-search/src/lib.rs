//! # dms-search
//!
//! The document search use case: turn raw filter key/value input into a
//! specification tree, wrap it in a validated query, delegate to a document
//! store, and shape the paginated response.
//!
//! - `command` - Raw search input (filters, sorting, pagination)
//! - `handler` - Orchestration: resolve references, build the specification,
//!   execute the query
//! - `response` - Response DTOs (documents plus pagination metadata)

pub mod command;
pub mod handler;
pub mod response;

pub use command::{SearchDocumentsCommand, SearchFilters};
pub use handler::SearchDocumentsHandler;
pub use response::{DocumentDto, PaginationDto, SearchDocumentsResponse};
