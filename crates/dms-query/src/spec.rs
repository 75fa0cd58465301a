//! Document specifications
//!
//! A specification is a boolean-valued expression over a document, composable
//! with And/Or/Not. Trees are immutable once built and evaluated in two ways:
//! directly via [`Specification::is_satisfied_by`], or structurally via
//! [`crate::translate::translate`] into SQL clauses. Both interpretations must
//! select the same documents.

use chrono::{DateTime, Utc};
use dms_core::traits::Id;
use dms_models::{Document, DocumentStatus};

/// A predicate over documents
///
/// Leaf variants test one attribute; combinator variants compose child
/// specifications. The enum is closed on purpose: every interpreter matches
/// exhaustively, so adding a variant is a compile-time checklist of every
/// place that must handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum Specification {
    /// Document author id equals the given id
    Author(Id),
    /// Document status equals the given status
    Status(DocumentStatus),
    /// Document carries at least one of the given tags (match-any)
    Tags(Vec<String>),
    /// Document file type equals the given string exactly
    FileType(String),
    /// Document was created at or after the given instant (inclusive)
    CreatedAfter(DateTime<Utc>),
    /// Document was created at or before the given instant (inclusive)
    CreatedBefore(DateTime<Utc>),
    /// All children are satisfied; vacuously true when empty
    And(Vec<Specification>),
    /// At least one child is satisfied; false when empty
    Or(Vec<Specification>),
    /// The child is not satisfied
    Not(Box<Specification>),
}

impl Specification {
    /// Leaf: filter by author id
    pub fn author(id: Id) -> Self {
        Self::Author(id)
    }

    /// Leaf: filter by status
    pub fn status(status: DocumentStatus) -> Self {
        Self::Status(status)
    }

    /// Leaf: filter by tags, matching documents carrying any of them
    pub fn tags(tags: Vec<String>) -> Self {
        Self::Tags(tags)
    }

    /// Leaf: filter by exact file type
    pub fn file_type(file_type: impl Into<String>) -> Self {
        Self::FileType(file_type.into())
    }

    /// Leaf: filter by creation date, inclusive lower bound
    pub fn created_after(date: DateTime<Utc>) -> Self {
        Self::CreatedAfter(date)
    }

    /// Leaf: filter by creation date, inclusive upper bound
    pub fn created_before(date: DateTime<Utc>) -> Self {
        Self::CreatedBefore(date)
    }

    /// Combine with another specification under And
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut children) => {
                children.push(other);
                Self::And(children)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Combine with another specification under Or
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut children) => {
                children.push(other);
                Self::Or(children)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    /// Negate this specification
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Combine a list of specifications under And.
    ///
    /// Zero specifications mean "match everything" and yield `None`; a single
    /// specification is returned as-is; two or more are wrapped in `And`.
    pub fn all(mut specs: Vec<Specification>) -> Option<Self> {
        match specs.len() {
            0 => None,
            1 => specs.pop(),
            _ => Some(Self::And(specs)),
        }
    }

    /// Evaluate this specification directly against one document.
    ///
    /// Pure and total: any well-formed document yields a boolean. And/Or
    /// short-circuit left to right.
    pub fn is_satisfied_by(&self, document: &Document) -> bool {
        match self {
            Self::Author(id) => document.author.id == *id,
            Self::Status(status) => document.status == *status,
            Self::Tags(tags) => document.has_any_tag(tags),
            Self::FileType(file_type) => document.file_type == *file_type,
            Self::CreatedAfter(date) => document.created_at >= *date,
            Self::CreatedBefore(date) => document.created_at <= *date,
            Self::And(children) => children.iter().all(|c| c.is_satisfied_by(document)),
            Self::Or(children) => children.iter().any(|c| c.is_satisfied_by(document)),
            Self::Not(child) => !child.is_satisfied_by(document),
        }
    }
}
