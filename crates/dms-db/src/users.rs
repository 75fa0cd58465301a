//! User repository
//!
//! Database operations for document authors.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use dms_core::traits::Id;
use dms_models::User;

use crate::repository::{RepositoryError, RepositoryResult, UserStore};

#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::with_id(row.id, row.name, row.email)
    }
}

/// SQL-backed user store
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepositoryResult<User> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::from)
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }

    #[instrument(skip_all, fields(user_id = %user.id))]
    async fn save(&self, user: &User) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
