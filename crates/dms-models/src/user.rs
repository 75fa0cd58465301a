//! User entity
//!
//! Document authors. Table: users

use dms_core::traits::{Entity, Id, Identifiable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A document author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,
}

impl User {
    /// Create a new user with a generated id
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Rebuild a user from stored fields
    pub fn with_id(id: Id, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Identifiable for User {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for User {
    const TABLE_NAME: &'static str = "users";
    const TYPE_NAME: &'static str = "User";
}
