//! Document repository
//!
//! Translates a `DocumentQuery` into SQL via the specification translator and
//! executes it against Postgres. The total count is computed before
//! pagination, with the same where-clause.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};
use uuid::Uuid;

use dms_core::traits::Id;
use dms_models::{Document, User};
use dms_query::sorts::sortable_column;
use dms_query::translate::{translate, SqlValue};
use dms_query::{DocumentQuery, PaginatedResult, Specification};

use crate::repository::{DocumentStore, RepositoryError, RepositoryResult};

const SELECT_COLUMNS: &str = "d.id, d.title, d.status, d.file_type, d.file_size, d.tags, \
     d.created_at, d.updated_at, \
     u.id AS author_id, u.name AS author_name, u.email AS author_email";

const FROM_CLAUSE: &str = "FROM documents d JOIN users u ON u.id = d.author_id";

/// Document row with the author joined in
#[derive(Debug, Clone, FromRow)]
struct DocumentRow {
    id: Uuid,
    title: String,
    status: String,
    file_type: String,
    file_size: i64,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: Uuid,
    author_name: String,
    author_email: String,
}

impl TryFrom<DocumentRow> for Document {
    type Error = RepositoryError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|_| RepositoryError::Decode(format!("bad status value: {}", row.status)))?;

        Ok(Document {
            id: row.id,
            title: row.title,
            author: User::with_id(row.author_id, row.author_name, row.author_email),
            status,
            file_type: row.file_type,
            file_size: row.file_size,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Build the paged search statement for a query.
///
/// Where-clause parameters take `$1..$n`; `LIMIT`/`OFFSET` are bound as the
/// two placeholders after them.
pub fn build_search_sql(query: &DocumentQuery) -> (String, Vec<SqlValue>) {
    let (where_sql, binds) = build_where_clause(query.specification.as_ref());

    let order_sql = query
        .order_by
        .as_deref()
        .and_then(sortable_column)
        .map(|column| format!(" ORDER BY {} {}", column, query.order_direction.as_sql()))
        .unwrap_or_default();

    let limit_n = binds.len() + 1;
    let offset_n = binds.len() + 2;
    let sql = format!(
        "SELECT {SELECT_COLUMNS} {FROM_CLAUSE}{where_sql}{order_sql} LIMIT ${limit_n} OFFSET ${offset_n}"
    );
    (sql, binds)
}

/// Build the count statement that pairs with [`build_search_sql`]
pub fn build_count_sql(specification: Option<&Specification>) -> (String, Vec<SqlValue>) {
    let (where_sql, binds) = build_where_clause(specification);
    let sql = format!("SELECT COUNT(*) FROM documents d{where_sql}");
    (sql, binds)
}

fn build_where_clause(specification: Option<&Specification>) -> (String, Vec<SqlValue>) {
    let rendered = specification
        .map(translate)
        .and_then(|filter| filter.render(1));

    match rendered {
        Some((expr_sql, binds)) => (format!(" WHERE {expr_sql}"), binds),
        None => (String::new(), Vec::new()),
    }
}

/// SQL-backed document store
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Document> {
        let sql = format!("SELECT {SELECT_COLUMNS} {FROM_CLAUSE} WHERE d.id = $1");
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| RepositoryError::not_found("Document", id))?
            .try_into()
    }

    #[instrument(skip_all, fields(document_id = %document.id))]
    async fn save(&self, document: &Document) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (id, title, author_id, status, file_type, file_size, tags, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                author_id = EXCLUDED.author_id,
                status = EXCLUDED.status,
                file_type = EXCLUDED.file_type,
                file_size = EXCLUDED.file_size,
                tags = EXCLUDED.tags,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(document.id)
        .bind(&document.title)
        .bind(document.author.id)
        .bind(document.status.as_str())
        .bind(&document.file_type)
        .bind(document.file_size)
        .bind(&document.tags)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[instrument(skip_all, fields(page = query.page, limit = query.limit))]
    async fn find_by_query(
        &self,
        query: &DocumentQuery,
    ) -> RepositoryResult<PaginatedResult<Document>> {
        // Count first, with the same where-clause and no pagination
        let total = self
            .count_by_specification(query.specification.as_ref())
            .await?;

        let (sql, binds) = build_search_sql(query);
        let mut stmt = sqlx::query_as::<_, DocumentRow>(&sql);
        for value in binds {
            stmt = bind_value(stmt, value);
        }
        let rows = stmt
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        debug!(total, returned = rows.len(), "document query executed");

        let items = rows
            .into_iter()
            .map(Document::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult::new(items, total, query.page, query.limit))
    }

    #[instrument(skip_all)]
    async fn count_by_specification<'a>(
        &self,
        specification: Option<&'a Specification>,
    ) -> RepositoryResult<i64> {
        let (sql, binds) = build_count_sql(specification);
        let mut stmt = sqlx::query_scalar::<_, i64>(&sql);
        for value in binds {
            stmt = bind_scalar_value(stmt, value);
        }
        Ok(stmt.fetch_one(&self.pool).await?)
    }
}

fn bind_value<'q, O>(
    stmt: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    value: SqlValue,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    match value {
        SqlValue::Uuid(v) => stmt.bind(v),
        SqlValue::Text(v) => stmt.bind(v),
        SqlValue::TextArray(v) => stmt.bind(v),
        SqlValue::Timestamp(v) => stmt.bind(v),
    }
}

fn bind_scalar_value<'q, O>(
    stmt: sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    value: SqlValue,
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    match value {
        SqlValue::Uuid(v) => stmt.bind(v),
        SqlValue::Text(v) => stmt.bind(v),
        SqlValue::TextArray(v) => stmt.bind(v),
        SqlValue::Timestamp(v) => stmt.bind(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dms_models::DocumentStatus;
    use dms_query::SortDirection;

    #[test]
    fn test_search_sql_without_specification() {
        let query = DocumentQuery::unfiltered();
        let (sql, binds) = build_search_sql(&query);
        assert!(!sql.contains("WHERE"));
        assert!(!sql.contains("ORDER BY"));
        assert!(sql.ends_with("LIMIT $1 OFFSET $2"));
        assert!(binds.is_empty());
    }

    #[test]
    fn test_search_sql_with_specification_and_order() {
        let spec = Specification::status(DocumentStatus::Approved)
            .and(Specification::tags(vec!["finance".into()]));
        let query = DocumentQuery::new(
            Some(spec),
            Some("created_at".into()),
            SortDirection::Desc,
            2,
            20,
        )
        .unwrap();

        let (sql, binds) = build_search_sql(&query);
        assert!(sql.contains("WHERE (d.status = $1 AND d.tags && $2)"));
        assert!(sql.contains("ORDER BY d.created_at DESC"));
        assert!(sql.ends_with("LIMIT $3 OFFSET $4"));
        assert_eq!(binds.len(), 2);
        assert_eq!(binds[0], SqlValue::Text("approved".into()));
    }

    #[test]
    fn test_count_sql_shares_where_clause() {
        let spec = Specification::file_type("pdf");
        let (sql, binds) = build_count_sql(Some(&spec));
        assert_eq!(sql, "SELECT COUNT(*) FROM documents d WHERE d.file_type = $1");
        assert_eq!(binds, vec![SqlValue::Text("pdf".into())]);
    }

    #[test]
    fn test_count_sql_without_specification() {
        let (sql, binds) = build_count_sql(None);
        assert_eq!(sql, "SELECT COUNT(*) FROM documents d");
        assert!(binds.is_empty());
    }

    #[test]
    fn test_search_sql_or_tree_places_parameters_in_order() {
        let spec = Specification::Or(vec![
            Specification::status(DocumentStatus::Approved)
                .and(Specification::file_type("pdf")),
            Specification::status(DocumentStatus::Draft)
                .and(Specification::file_type("docx")),
        ]);
        let query = DocumentQuery::new(Some(spec), None, SortDirection::Asc, 1, 20).unwrap();

        let (sql, binds) = build_search_sql(&query);
        assert!(sql.contains(
            "WHERE ((d.status = $1 AND d.file_type = $2) OR (d.status = $3 AND d.file_type = $4))"
        ));
        assert!(sql.ends_with("LIMIT $5 OFFSET $6"));
        assert_eq!(binds.len(), 4);
        assert_eq!(binds[1], SqlValue::Text("pdf".into()));
        assert_eq!(binds[3], SqlValue::Text("docx".into()));
    }
}
