//! Result type alias for DMS operations

use crate::error::DmsError;

/// Standard Result type for DMS operations
pub type DmsResult<T> = Result<T, DmsError>;
