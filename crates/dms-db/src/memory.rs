//! In-memory stores
//!
//! Execute document queries against records materialized in memory, using the
//! specification's direct evaluator instead of SQL translation. Results must
//! match the SQL path for any record set; the integration tests lean on that.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Mutex;

use dms_core::traits::Id;
use dms_models::{Document, User};
use dms_query::sorts::{attributes, SortDirection};
use dms_query::{DocumentQuery, PaginatedResult, Specification};

use crate::repository::{DocumentStore, RepositoryError, RepositoryResult, UserStore};

/// Document store over an in-memory collection
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<Vec<Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
        }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Vec<Document>>> {
        self.documents
            .lock()
            .map_err(|_| RepositoryError::Decode("document store poisoned".into()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Document> {
        self.lock()?
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Document", id))
    }

    async fn save(&self, document: &Document) -> RepositoryResult<()> {
        let mut documents = self.lock()?;
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document.clone(),
            None => documents.push(document.clone()),
        }
        Ok(())
    }

    async fn find_by_query(
        &self,
        query: &DocumentQuery,
    ) -> RepositoryResult<PaginatedResult<Document>> {
        let mut matching: Vec<Document> = self
            .lock()?
            .iter()
            .filter(|d| match &query.specification {
                Some(spec) => spec.is_satisfied_by(d),
                None => true,
            })
            .cloned()
            .collect();

        let total = matching.len() as i64;

        if let Some(attribute) = query.order_by.as_deref() {
            matching.sort_by(|a, b| {
                let ordering = compare_by(attribute, a, b);
                match query.order_direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let items = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect();

        Ok(PaginatedResult::new(items, total, query.page, query.limit))
    }

    async fn count_by_specification<'a>(
        &self,
        specification: Option<&'a Specification>,
    ) -> RepositoryResult<i64> {
        let count = self
            .lock()?
            .iter()
            .filter(|d| match specification {
                Some(spec) => spec.is_satisfied_by(d),
                None => true,
            })
            .count();
        Ok(count as i64)
    }
}

fn compare_by(attribute: &str, a: &Document, b: &Document) -> Ordering {
    match attribute {
        attributes::TITLE => a.title.cmp(&b.title),
        attributes::STATUS => a.status.as_str().cmp(b.status.as_str()),
        attributes::FILE_TYPE => a.file_type.cmp(&b.file_type),
        attributes::FILE_SIZE => a.file_size.cmp(&b.file_size),
        attributes::CREATED_AT => a.created_at.cmp(&b.created_at),
        attributes::UPDATED_AT => a.updated_at.cmp(&b.updated_at),
        _ => Ordering::Equal,
    }
}

/// User store over an in-memory collection
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Vec<User>>> {
        self.users
            .lock()
            .map_err(|_| RepositoryError::Decode("user store poisoned".into()))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<User> {
        self.lock()?
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }

    async fn save(&self, user: &User) -> RepositoryResult<()> {
        let mut users = self.lock()?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }
}
