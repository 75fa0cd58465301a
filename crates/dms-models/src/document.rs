//! Document entity
//!
//! Table: documents
//!
//! Documents reference their author by id; the resolved `User` travels with
//! the document for response shaping but equality and filtering key on the id.

use chrono::{DateTime, Utc};
use dms_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::status::DocumentStatus;
use crate::user::User;

/// A stored document with its search-relevant attributes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Id,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub author: User,

    pub status: DocumentStatus,

    /// File extension without the dot (e.g. "pdf")
    #[validate(length(min = 1, max = 10))]
    pub file_type: String,

    /// File size in bytes
    pub file_size: i64,

    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document with a generated id and current timestamps
    pub fn new(
        title: impl Into<String>,
        author: User,
        status: DocumentStatus,
        file_type: impl Into<String>,
        file_size: i64,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author,
            status,
            file_type: file_type.into(),
            file_size,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check for a single tag (exact match)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check whether the document carries at least one of the given tags
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|tag| self.has_tag(tag.as_ref()))
    }

    /// Move the document to a new status, touching `updated_at`
    pub fn update_status(&mut self, status: DocumentStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Document {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for Document {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Document {
    const TABLE_NAME: &'static str = "documents";
    const TYPE_NAME: &'static str = "Document";
}
