//! PostgreSQL Todo 仓储实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskboard_adapter_postgres::map_sqlx_error;
use taskboard_errors::{AppError, AppResult};
use taskboard_ports::EntityStore;

use crate::domain::{NewTodo, Priority, Todo, TodoFilter, TodoId};

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
    priority: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = AppError;

    fn try_from(row: TodoRow) -> AppResult<Self> {
        let priority: Priority = row
            .priority
            .parse()
            .map_err(|e: crate::domain::UnknownPriority| AppError::database(e.to_string()))?;

        Ok(Todo {
            id: TodoId(row.id),
            title: row.title,
            description: row.description,
            completed: row.completed,
            priority,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl EntityStore<Todo> for PostgresTodoRepository {
    async fn find(&self, id: TodoId) -> AppResult<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, description, completed, priority::text AS priority,
                   created_at, updated_at
            FROM todos WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Todo::try_from).transpose()
    }

    async fn find_all(&self, filter: &TodoFilter) -> AppResult<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, description, completed, priority::text AS priority,
                   created_at, updated_at
            FROM todos
            WHERE ($1::boolean IS NULL OR completed = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(filter.completed)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn insert(&self, draft: NewTodo) -> AppResult<Todo> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (title, description, priority)
            VALUES ($1, $2, $3::todo_priority)
            RETURNING id, title, description, completed, priority::text AS priority,
                      created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.priority.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Todo::try_from(row)
    }

    async fn save(&self, todo: &Todo) -> AppResult<Todo> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET title = $2, description = $3, completed = $4,
                priority = $5::todo_priority, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, completed, priority::text AS priority,
                      created_at, updated_at
            "#,
        )
        .bind(todo.id.0)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.priority.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| AppError::not_found(format!("Todo with id {} not found", todo.id)))?;

        Todo::try_from(row)
    }

    async fn remove(&self, todo: &Todo) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo.id.0)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Todo with id {} not found",
                todo.id
            )));
        }

        Ok(())
    }
}
