//! # dms-models
//!
//! Domain entities for DMS RS.
//!
//! - `document` - The document aggregate (title, author, status, file metadata, tags)
//! - `user` - Document authors
//! - `status` - Document lifecycle status

pub mod document;
pub mod status;
pub mod user;

pub use document::Document;
pub use status::DocumentStatus;
pub use user::User;
