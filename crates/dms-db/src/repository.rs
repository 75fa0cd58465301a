//! Store traits and repository errors
//!
//! The query core only ever talks to these traits; the SQL repositories in
//! this crate and the in-memory stores both implement them, which is what
//! makes the evaluator/translator equivalence property checkable.

use async_trait::async_trait;
use dms_core::error::DmsError;
use dms_core::traits::Id;
use dms_models::{Document, User};
use dms_query::{DocumentQuery, PaginatedResult, Specification};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Row decode error: {0}")]
    Decode(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: Id) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<RepositoryError> for DmsError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => Self::NotFound {
                entity,
                field: "id",
                value: id,
            },
            RepositoryError::Database(e) => Self::Database(e.to_string()),
            RepositoryError::Decode(message) => Self::Internal(message),
        }
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Document persistence operations required by the query core
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find a document by id, failing with a not-found error when absent
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Document>;

    /// Persist a document (insert or update)
    async fn save(&self, document: &Document) -> RepositoryResult<()>;

    /// Apply the query's specification, ordering, and pagination.
    ///
    /// The total count is taken before offset/limit; items come back in
    /// store-native order when no `order_by` is given.
    async fn find_by_query(
        &self,
        query: &DocumentQuery,
    ) -> RepositoryResult<PaginatedResult<Document>>;

    /// Count documents matching a specification, ignoring pagination
    async fn count_by_specification<'a>(
        &self,
        specification: Option<&'a Specification>,
    ) -> RepositoryResult<i64>;
}

/// User persistence operations required by the query core
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by id, failing with a not-found error when absent
    async fn find_by_id(&self, id: Id) -> RepositoryResult<User>;

    /// Persist a user (insert or update)
    async fn save(&self, user: &User) -> RepositoryResult<()>;
}
