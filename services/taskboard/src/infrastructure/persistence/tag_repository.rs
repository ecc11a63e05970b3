//! PostgreSQL Tag 仓储实现
//!
//! 默认查询排除 `deleted_at` 非空的行

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskboard_adapter_postgres::map_sqlx_error;
use taskboard_errors::{AppError, AppResult};
use taskboard_ports::{EntityStore, SoftDeleteStore};

use crate::domain::{NewTag, Tag, TagId};

pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
    color: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: TagId(row.id),
            name: row.name,
            color: row.color,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

fn tag_not_found(id: TagId) -> AppError {
    AppError::not_found(format!("Tag with id {} not found", id))
}

#[async_trait]
impl EntityStore<Tag> for PostgresTagRepository {
    async fn find(&self, id: TagId) -> AppResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT id, name, color, created_at, updated_at, deleted_at
            FROM tags WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Tag::from))
    }

    async fn find_all(&self, _filter: &()) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT id, name, color, created_at, updated_at, deleted_at
            FROM tags
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn insert(&self, draft: NewTag) -> AppResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            INSERT INTO tags (name, color)
            VALUES ($1, $2)
            RETURNING id, name, color, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.color)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn save(&self, tag: &Tag) -> AppResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            UPDATE tags
            SET name = $2, color = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, color, created_at, updated_at, deleted_at
            "#,
        )
        .bind(tag.id.0)
        .bind(&tag.name)
        .bind(&tag.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| tag_not_found(tag.id))?;

        Ok(row.into())
    }

    async fn remove(&self, tag: &Tag) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(tag.id.0)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(tag_not_found(tag.id));
        }

        Ok(())
    }
}

#[async_trait]
impl SoftDeleteStore<Tag> for PostgresTagRepository {
    async fn soft_delete(&self, tag: &Tag) -> AppResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            UPDATE tags
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, color, created_at, updated_at, deleted_at
            "#,
        )
        .bind(tag.id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| tag_not_found(tag.id))?;

        Ok(row.into())
    }

    async fn find_with_deleted(&self, id: TagId) -> AppResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT id, name, color, created_at, updated_at, deleted_at
            FROM tags WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Tag::from))
    }
}
