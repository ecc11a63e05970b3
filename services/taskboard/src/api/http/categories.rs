//! /categories 路由

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use taskboard_common::Patch;
use taskboard_cqrs_core::{CommandBus, QueryBus};
use taskboard_errors::{AppResult, FieldError};
use utoipa::ToSchema;

use super::validation::{Violations, reject};
use super::{AppState, DeletedResponse};
use crate::application::categories::{
    CreateCategoryCommand, DeleteCategoryCommand, GetCategoriesQuery, GetCategoryByIdQuery,
    UpdateCategoryCommand,
};
use crate::domain::{Category, CategoryId, CategoryPatch};

const NAME_MAX: usize = 255;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCategoryRequest {
    #[schema(example = "Work", max_length = 255)]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Violations::new();
        v.required_text("name", self.name.as_deref(), NAME_MAX);
        v.into_result()
    }

    pub fn into_command(self) -> AppResult<CreateCategoryCommand> {
        self.validate().map_err(reject)?;

        Ok(CreateCategoryCommand {
            name: self.name.unwrap_or_default(),
            description: self.description,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, max_length = 255)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Violations::new();
        v.patch_text("name", &self.name, NAME_MAX);
        v.into_result()
    }

    pub fn into_patch(self) -> AppResult<CategoryPatch> {
        self.validate().map_err(reject)?;

        Ok(CategoryPatch {
            name: self.name,
            description: self.description,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses((status = 200, description = "Live categories, newest first", body = [Category]))
)]
pub(crate) async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.queries.dispatch(GetCategoriesQuery).await?))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "Category not found or deleted")
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Category>> {
    let Path(id) = id?;
    let category = state
        .queries
        .dispatch(GetCategoryByIdQuery { id: CategoryId(id) })
        .await?;
    Ok(Json(category))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation failed")
    )
)]
pub(crate) async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let Json(body) = body?;
    let category = state.commands.dispatch(body.into_command()?).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Category not found or deleted")
    )
)]
pub(crate) async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> AppResult<Json<Category>> {
    let Path(id) = id?;
    let Json(body) = body?;
    let category = state
        .commands
        .dispatch(UpdateCategoryCommand {
            id: CategoryId(id),
            patch: body.into_patch()?,
        })
        .await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category soft-deleted", body = DeletedResponse),
        (status = 404, description = "Category not found or already deleted")
    )
)]
pub(crate) async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<DeletedResponse>> {
    let Path(id) = id?;
    state
        .commands
        .dispatch(DeleteCategoryCommand { id: CategoryId(id) })
        .await?;
    Ok(Json(DeletedResponse::new("Category", id)))
}
