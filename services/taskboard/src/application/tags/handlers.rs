//! Tag 处理器

use std::sync::Arc;

use async_trait::async_trait;
use taskboard_cqrs_core::{CommandHandler, QueryHandler};
use taskboard_errors::AppResult;
use taskboard_ports::SoftDeleteStore;
use tracing::info;

use super::commands::{CreateTagCommand, DeleteTagCommand, UpdateTagCommand};
use super::queries::{GetTagByIdQuery, GetTagsQuery};
use crate::application::not_found;
use crate::domain::{NewTag, Tag};

pub struct CreateTagHandler {
    tags: Arc<dyn SoftDeleteStore<Tag>>,
}

impl CreateTagHandler {
    pub fn new(tags: Arc<dyn SoftDeleteStore<Tag>>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl CommandHandler<CreateTagCommand> for CreateTagHandler {
    async fn handle(&self, command: CreateTagCommand) -> AppResult<Tag> {
        info!(name = %command.name, "Handling CreateTagCommand");

        self.tags
            .insert(NewTag {
                name: command.name,
                color: command.color,
            })
            .await
    }
}

pub struct UpdateTagHandler {
    tags: Arc<dyn SoftDeleteStore<Tag>>,
}

impl UpdateTagHandler {
    pub fn new(tags: Arc<dyn SoftDeleteStore<Tag>>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl CommandHandler<UpdateTagCommand> for UpdateTagHandler {
    async fn handle(&self, command: UpdateTagCommand) -> AppResult<Tag> {
        info!(tag_id = %command.id, "Handling UpdateTagCommand");

        let mut tag = self
            .tags
            .find(command.id)
            .await?
            .ok_or_else(|| not_found::<Tag>(command.id))?;

        command.patch.apply(&mut tag);
        self.tags.save(&tag).await
    }
}

/// 软删除 Tag，行保留，之后的默认查询不可见
pub struct DeleteTagHandler {
    tags: Arc<dyn SoftDeleteStore<Tag>>,
}

impl DeleteTagHandler {
    pub fn new(tags: Arc<dyn SoftDeleteStore<Tag>>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl CommandHandler<DeleteTagCommand> for DeleteTagHandler {
    async fn handle(&self, command: DeleteTagCommand) -> AppResult<()> {
        info!(tag_id = %command.id, "Handling DeleteTagCommand");

        let tag = self
            .tags
            .find(command.id)
            .await?
            .ok_or_else(|| not_found::<Tag>(command.id))?;

        let deleted = self.tags.soft_delete(&tag).await?;
        info!(tag_id = %deleted.id, deleted_at = ?deleted.deleted_at, "Tag soft-deleted");
        Ok(())
    }
}

pub struct GetTagsHandler {
    tags: Arc<dyn SoftDeleteStore<Tag>>,
}

impl GetTagsHandler {
    pub fn new(tags: Arc<dyn SoftDeleteStore<Tag>>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl QueryHandler<GetTagsQuery> for GetTagsHandler {
    async fn handle(&self, _query: GetTagsQuery) -> AppResult<Vec<Tag>> {
        info!("Handling GetTagsQuery");
        self.tags.find_all(&()).await
    }
}

pub struct GetTagByIdHandler {
    tags: Arc<dyn SoftDeleteStore<Tag>>,
}

impl GetTagByIdHandler {
    pub fn new(tags: Arc<dyn SoftDeleteStore<Tag>>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl QueryHandler<GetTagByIdQuery> for GetTagByIdHandler {
    async fn handle(&self, query: GetTagByIdQuery) -> AppResult<Tag> {
        info!(tag_id = %query.id, "Handling GetTagByIdQuery");

        self.tags
            .find(query.id)
            .await?
            .ok_or_else(|| not_found::<Tag>(query.id))
    }
}
