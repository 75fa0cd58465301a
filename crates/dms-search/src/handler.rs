//! Search documents handler
//!
//! Orchestrates one search: build leaf specifications for the filters that
//! are present, resolve the author reference, combine everything under And,
//! wrap in a validated query, and delegate to the document store. Reference
//! and input errors surface before any query executes.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use uuid::Uuid;

use dms_core::error::DmsError;
use dms_core::result::DmsResult;
use dms_db::repository::{DocumentStore, UserStore};
use dms_query::{DocumentQueryBuilder, SortDirection, Specification};

use crate::command::{SearchDocumentsCommand, SearchFilters};
use crate::response::SearchDocumentsResponse;

/// The search use case, parameterized over its stores
pub struct SearchDocumentsHandler<D, U> {
    documents: D,
    users: U,
}

impl<D: DocumentStore, U: UserStore> SearchDocumentsHandler<D, U> {
    pub fn new(documents: D, users: U) -> Self {
        Self { documents, users }
    }

    #[instrument(skip_all, fields(page = command.page, limit = command.limit))]
    pub async fn execute(
        &self,
        command: SearchDocumentsCommand,
    ) -> DmsResult<SearchDocumentsResponse> {
        let specification = self.build_specification(&command.filters).await?;

        let direction = match command.order_direction.as_deref() {
            None => SortDirection::default(),
            Some(raw) => SortDirection::from_str(raw).ok_or_else(|| {
                DmsError::validation(
                    "orderDirection",
                    format!("must be ASC or DESC, got: {raw}"),
                )
            })?,
        };

        let query = DocumentQueryBuilder::new()
            .maybe_specification(specification)
            .maybe_order_by(command.order_by)
            .direction(direction)
            .page(command.page)
            .limit(command.limit)
            .build()?;

        let result = self.documents.find_by_query(&query).await?;
        debug!(total = result.total, "document search executed");

        Ok(SearchDocumentsResponse::from(result))
    }

    /// Build leaf specifications for present filter keys; absent keys
    /// contribute nothing. Zero specs mean no predicate at all.
    async fn build_specification(
        &self,
        filters: &SearchFilters,
    ) -> DmsResult<Option<Specification>> {
        let mut specs = Vec::new();

        if let Some(raw) = filters.author_id.as_deref() {
            let id = Uuid::parse_str(raw).map_err(|_| {
                DmsError::validation("authorId", format!("not a valid id: {raw}"))
            })?;
            // Resolve the reference; an unknown author aborts the search
            let author = self.users.find_by_id(id).await?;
            specs.push(Specification::author(author.id));
        }

        if let Some(raw) = filters.status.as_deref() {
            specs.push(Specification::status(raw.parse()?));
        }

        if let Some(tags) = &filters.tags {
            if !tags.is_empty() {
                specs.push(Specification::tags(tags.clone()));
            }
        }

        if let Some(raw) = filters.created_after.as_deref() {
            specs.push(Specification::created_after(parse_date("createdAfter", raw)?));
        }

        if let Some(raw) = filters.created_before.as_deref() {
            specs.push(Specification::created_before(parse_date(
                "createdBefore",
                raw,
            )?));
        }

        if let Some(file_type) = filters.file_type.clone() {
            specs.push(Specification::file_type(file_type));
        }

        Ok(Specification::all(specs))
    }
}

fn parse_date(field: &'static str, raw: &str) -> DmsResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DmsError::validation(field, format!("not an ISO-8601 date/time: {e}")))
}
