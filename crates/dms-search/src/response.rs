//! Search response DTOs
//!
//! JSON shape: `data` (documents with embedded author) and `pagination`
//! (`{total, page, limit, totalPages}`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use dms_models::{Document, DocumentStatus};
use dms_query::PaginatedResult;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    pub id: Uuid,
    pub title: String,
    pub author: AuthorDto,
    pub status: DocumentStatus,
    pub file_type: String,
    pub file_size: i64,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentDto {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            author: AuthorDto {
                id: doc.author.id,
                name: doc.author.name,
            },
            status: doc.status,
            file_type: doc.file_type,
            file_size: doc.file_size,
            tags: doc.tags,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocumentsResponse {
    pub data: Vec<DocumentDto>,
    pub pagination: PaginationDto,
}

impl From<PaginatedResult<Document>> for SearchDocumentsResponse {
    fn from(result: PaginatedResult<Document>) -> Self {
        let pagination = PaginationDto {
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages(),
        };
        Self {
            data: result.items.into_iter().map(DocumentDto::from).collect(),
            pagination,
        }
    }
}
