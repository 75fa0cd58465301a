//! # dms-db
//!
//! Persistence layer for DMS RS.
//!
//! - `pool` - PostgreSQL connection pooling
//! - `repository` - Store traits, repository errors
//! - `documents` - Document repository (specification-driven search)
//! - `users` - User repository
//! - `memory` - In-memory stores for tests and materialized record sets

pub mod documents;
pub mod memory;
pub mod pool;
pub mod repository;
pub mod users;

pub use documents::DocumentRepository;
pub use memory::{InMemoryDocumentStore, InMemoryUserStore};
pub use pool::{Database, DatabaseConfig};
pub use repository::{DocumentStore, RepositoryError, RepositoryResult, UserStore};
pub use users::UserRepository;

#[cfg(feature = "mocks")]
pub use repository::{MockDocumentStore, MockUserStore};
