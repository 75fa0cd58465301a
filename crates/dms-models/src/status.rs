//! Document status
//!
//! Fixed lifecycle states for documents. Parsing an unknown string is a
//! validation error, surfaced before any query executes.

use dms_core::error::DmsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Pending,
    Approved,
    Archived,
}

impl DocumentStatus {
    /// All known statuses, in lifecycle order
    pub const ALL: [Self; 4] = [Self::Draft, Self::Pending, Self::Approved, Self::Archived];

    /// The database/API string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = DmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "archived" => Ok(Self::Archived),
            other => Err(DmsError::validation(
                "status",
                format!("unknown status: {other}"),
            )),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
