//! /tags 路由

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use taskboard_common::Patch;
use taskboard_cqrs_core::{CommandBus, QueryBus};
use taskboard_errors::{AppResult, FieldError};
use utoipa::ToSchema;

use super::validation::{Violations, reject};
use super::{AppState, DeletedResponse};
use crate::application::tags::{
    CreateTagCommand, DeleteTagCommand, GetTagByIdQuery, GetTagsQuery, UpdateTagCommand,
};
use crate::domain::{Tag, TagId, TagPatch};

const NAME_MAX: usize = 50;
const COLOR_MESSAGE: &str = "must be a hex color like #FF5733";

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/{id}", get(get_tag).patch(update_tag).delete(delete_tag))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTagRequest {
    #[schema(example = "urgent", max_length = 50)]
    pub name: Option<String>,
    #[schema(example = "#FF5733", pattern = "^#[0-9a-fA-F]{6}$")]
    pub color: Option<String>,
}

impl CreateTagRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Violations::new();
        v.required_text("name", self.name.as_deref(), NAME_MAX);
        v.matches("color", self.color.as_deref(), is_hex_color, COLOR_MESSAGE);
        v.into_result()
    }

    pub fn into_command(self) -> AppResult<CreateTagCommand> {
        self.validate().map_err(reject)?;

        Ok(CreateTagCommand {
            name: self.name.unwrap_or_default(),
            color: self.color,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTagRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, max_length = 50)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, pattern = "^#[0-9a-fA-F]{6}$")]
    pub color: Patch<String>,
}

impl UpdateTagRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Violations::new();
        v.patch_text("name", &self.name, NAME_MAX);
        v.matches(
            "color",
            self.color.as_set().map(String::as_str),
            is_hex_color,
            COLOR_MESSAGE,
        );
        v.into_result()
    }

    pub fn into_patch(self) -> AppResult<TagPatch> {
        self.validate().map_err(reject)?;

        Ok(TagPatch {
            name: self.name,
            color: self.color,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    responses((status = 200, description = "Live tags, newest first", body = [Tag]))
)]
pub(crate) async fn list_tags(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    Ok(Json(state.queries.dispatch(GetTagsQuery).await?))
}

#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    tag = "tags",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "The tag", body = Tag),
        (status = 404, description = "Tag not found or deleted")
    )
)]
pub(crate) async fn get_tag(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Tag>> {
    let Path(id) = id?;
    let tag = state
        .queries
        .dispatch(GetTagByIdQuery { id: TagId(id) })
        .await?;
    Ok(Json(tag))
}

#[utoipa::path(
    post,
    path = "/api/tags",
    tag = "tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 400, description = "Validation failed")
    )
)]
pub(crate) async fn create_tag(
    State(state): State<AppState>,
    body: Result<Json<CreateTagRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    let Json(body) = body?;
    let tag = state.commands.dispatch(body.into_command()?).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    patch,
    path = "/api/tags/{id}",
    tag = "tags",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = UpdateTagRequest,
    responses(
        (status = 200, description = "Tag updated", body = Tag),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Tag not found or deleted")
    )
)]
pub(crate) async fn update_tag(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateTagRequest>, JsonRejection>,
) -> AppResult<Json<Tag>> {
    let Path(id) = id?;
    let Json(body) = body?;
    let tag = state
        .commands
        .dispatch(UpdateTagCommand {
            id: TagId(id),
            patch: body.into_patch()?,
        })
        .await?;
    Ok(Json(tag))
}

#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    tag = "tags",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag soft-deleted", body = DeletedResponse),
        (status = 404, description = "Tag not found or already deleted")
    )
)]
pub(crate) async fn delete_tag(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<DeletedResponse>> {
    let Path(id) = id?;
    state
        .commands
        .dispatch(DeleteTagCommand { id: TagId(id) })
        .await?;
    Ok(Json(DeletedResponse::new("Tag", id)))
}
