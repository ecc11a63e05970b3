//! /todos 路由

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use taskboard_common::Patch;
use taskboard_cqrs_core::{CommandBus, QueryBus};
use taskboard_errors::{AppResult, FieldError};
use utoipa::{IntoParams, ToSchema};

use super::validation::{Violations, parse_priority, reject};
use super::{AppState, DeletedResponse};
use crate::application::todos::{
    CreateTodoCommand, DeleteTodoCommand, GetTodoByIdQuery, GetTodosQuery, UpdateTodoCommand,
};
use crate::domain::{Todo, TodoId, TodoPatch};

const TITLE_MAX: usize = 255;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
}

/// 创建请求
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTodoRequest {
    #[schema(example = "Buy milk", max_length = 255)]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = "low")]
    pub priority: Option<String>,
}

impl CreateTodoRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Violations::new();
        v.required_text("title", self.title.as_deref(), TITLE_MAX);
        v.priority("priority", self.priority.as_deref());
        v.into_result()
    }

    pub fn into_command(self) -> AppResult<CreateTodoCommand> {
        self.validate().map_err(reject)?;

        Ok(CreateTodoCommand {
            title: self.title.unwrap_or_default(),
            description: self.description,
            priority: self
                .priority
                .map(|p| parse_priority("priority", &p))
                .transpose()?,
        })
    }
}

/// 局部更新请求
///
/// 缺失的字段保持不变；`description` 为 null 时清空
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, max_length = 255)]
    pub title: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub completed: Patch<bool>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub priority: Patch<String>,
}

impl UpdateTodoRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Violations::new();
        v.patch_text("title", &self.title, TITLE_MAX);
        v.not_null("completed", &self.completed);
        v.not_null("priority", &self.priority);
        v.priority("priority", self.priority.as_set().map(String::as_str));
        v.into_result()
    }

    pub fn into_patch(self) -> AppResult<TodoPatch> {
        self.validate().map_err(reject)?;

        let priority = match self.priority {
            Patch::Set(p) => Patch::Set(parse_priority("priority", &p)?),
            Patch::Clear => Patch::Clear,
            Patch::Unchanged => Patch::Unchanged,
        };

        Ok(TodoPatch {
            title: self.title,
            description: self.description,
            completed: self.completed,
            priority,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTodosParams {
    /// 只返回指定完成状态的 Todo
    pub completed: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "todos",
    params(ListTodosParams),
    responses((status = 200, description = "Todos, newest first", body = [Todo]))
)]
pub(crate) async fn list_todos(
    State(state): State<AppState>,
    params: Result<Query<ListTodosParams>, QueryRejection>,
) -> AppResult<Json<Vec<Todo>>> {
    let Query(params) = params?;
    let todos = state
        .queries
        .dispatch(GetTodosQuery {
            completed: params.completed,
        })
        .await?;
    Ok(Json(todos))
}

#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo", body = Todo),
        (status = 404, description = "Todo not found")
    )
)]
pub(crate) async fn get_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Todo>> {
    let Path(id) = id?;
    let todo = state
        .queries
        .dispatch(GetTodoByIdQuery { id: TodoId(id) })
        .await?;
    Ok(Json(todo))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Validation failed")
    )
)]
pub(crate) async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let Json(body) = body?;
    let todo = state.commands.dispatch(body.into_command()?).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[utoipa::path(
    patch,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo id")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Todo not found")
    )
)]
pub(crate) async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> AppResult<Json<Todo>> {
    let Path(id) = id?;
    let Json(body) = body?;
    let todo = state
        .commands
        .dispatch(UpdateTodoCommand {
            id: TodoId(id),
            patch: body.into_patch()?,
        })
        .await?;
    Ok(Json(todo))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo deleted", body = DeletedResponse),
        (status = 404, description = "Todo not found")
    )
)]
pub(crate) async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<DeletedResponse>> {
    let Path(id) = id?;
    state
        .commands
        .dispatch(DeleteTodoCommand { id: TodoId(id) })
        .await?;
    Ok(Json(DeletedResponse::new("Todo", id)))
}
