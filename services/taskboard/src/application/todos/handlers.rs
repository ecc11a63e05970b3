//! Todo 处理器

use std::sync::Arc;

use async_trait::async_trait;
use taskboard_cqrs_core::{CommandHandler, QueryHandler};
use taskboard_errors::AppResult;
use taskboard_ports::EntityStore;
use tracing::{debug, info};

use super::commands::{CreateTodoCommand, DeleteTodoCommand, UpdateTodoCommand};
use super::queries::{GetTodoByIdQuery, GetTodosQuery};
use crate::application::not_found;
use crate::domain::{NewTodo, Todo, TodoFilter};

/// 创建 Todo 处理器
pub struct CreateTodoHandler {
    todos: Arc<dyn EntityStore<Todo>>,
}

impl CreateTodoHandler {
    pub fn new(todos: Arc<dyn EntityStore<Todo>>) -> Self {
        Self { todos }
    }
}

#[async_trait]
impl CommandHandler<CreateTodoCommand> for CreateTodoHandler {
    async fn handle(&self, command: CreateTodoCommand) -> AppResult<Todo> {
        info!(title = %command.title, "Handling CreateTodoCommand");

        let todo = self
            .todos
            .insert(NewTodo {
                title: command.title,
                description: command.description,
                priority: command.priority.unwrap_or_default(),
            })
            .await?;

        info!(todo_id = %todo.id, priority = %todo.priority, "Todo created");
        Ok(todo)
    }
}

/// 局部更新 Todo 处理器
pub struct UpdateTodoHandler {
    todos: Arc<dyn EntityStore<Todo>>,
}

impl UpdateTodoHandler {
    pub fn new(todos: Arc<dyn EntityStore<Todo>>) -> Self {
        Self { todos }
    }
}

#[async_trait]
impl CommandHandler<UpdateTodoCommand> for UpdateTodoHandler {
    async fn handle(&self, command: UpdateTodoCommand) -> AppResult<Todo> {
        info!(todo_id = %command.id, "Handling UpdateTodoCommand");

        let mut todo = self
            .todos
            .find(command.id)
            .await?
            .ok_or_else(|| not_found::<Todo>(command.id))?;

        let changed = command.patch.apply(&mut todo);
        debug!(todo_id = %todo.id, changed, "Patch applied");

        self.todos.save(&todo).await
    }
}

/// 删除 Todo 处理器
pub struct DeleteTodoHandler {
    todos: Arc<dyn EntityStore<Todo>>,
}

impl DeleteTodoHandler {
    pub fn new(todos: Arc<dyn EntityStore<Todo>>) -> Self {
        Self { todos }
    }
}

#[async_trait]
impl CommandHandler<DeleteTodoCommand> for DeleteTodoHandler {
    async fn handle(&self, command: DeleteTodoCommand) -> AppResult<()> {
        info!(todo_id = %command.id, "Handling DeleteTodoCommand");

        let todo = self
            .todos
            .find(command.id)
            .await?
            .ok_or_else(|| not_found::<Todo>(command.id))?;

        self.todos.remove(&todo).await
    }
}

/// 列出 Todo 处理器
pub struct GetTodosHandler {
    todos: Arc<dyn EntityStore<Todo>>,
}

impl GetTodosHandler {
    pub fn new(todos: Arc<dyn EntityStore<Todo>>) -> Self {
        Self { todos }
    }
}

#[async_trait]
impl QueryHandler<GetTodosQuery> for GetTodosHandler {
    async fn handle(&self, query: GetTodosQuery) -> AppResult<Vec<Todo>> {
        info!(completed = ?query.completed, "Handling GetTodosQuery");

        self.todos
            .find_all(&TodoFilter {
                completed: query.completed,
            })
            .await
    }
}

/// 通过 ID 获取 Todo 处理器
pub struct GetTodoByIdHandler {
    todos: Arc<dyn EntityStore<Todo>>,
}

impl GetTodoByIdHandler {
    pub fn new(todos: Arc<dyn EntityStore<Todo>>) -> Self {
        Self { todos }
    }
}

#[async_trait]
impl QueryHandler<GetTodoByIdQuery> for GetTodoByIdHandler {
    async fn handle(&self, query: GetTodoByIdQuery) -> AppResult<Todo> {
        info!(todo_id = %query.id, "Handling GetTodoByIdQuery");

        self.todos
            .find(query.id)
            .await?
            .ok_or_else(|| not_found::<Todo>(query.id))
    }
}
