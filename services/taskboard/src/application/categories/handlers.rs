//! Category 处理器

use std::sync::Arc;

use async_trait::async_trait;
use taskboard_cqrs_core::{CommandHandler, QueryHandler};
use taskboard_errors::AppResult;
use taskboard_ports::SoftDeleteStore;
use tracing::info;

use super::commands::{CreateCategoryCommand, DeleteCategoryCommand, UpdateCategoryCommand};
use super::queries::{GetCategoriesQuery, GetCategoryByIdQuery};
use crate::application::not_found;
use crate::domain::{Category, NewCategory};

/// 创建 Category 处理器
pub struct CreateCategoryHandler {
    categories: Arc<dyn SoftDeleteStore<Category>>,
}

impl CreateCategoryHandler {
    pub fn new(categories: Arc<dyn SoftDeleteStore<Category>>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CommandHandler<CreateCategoryCommand> for CreateCategoryHandler {
    async fn handle(&self, command: CreateCategoryCommand) -> AppResult<Category> {
        info!(name = %command.name, "Handling CreateCategoryCommand");

        self.categories
            .insert(NewCategory {
                name: command.name,
                description: command.description,
            })
            .await
    }
}

pub struct UpdateCategoryHandler {
    categories: Arc<dyn SoftDeleteStore<Category>>,
}

impl UpdateCategoryHandler {
    pub fn new(categories: Arc<dyn SoftDeleteStore<Category>>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CommandHandler<UpdateCategoryCommand> for UpdateCategoryHandler {
    async fn handle(&self, command: UpdateCategoryCommand) -> AppResult<Category> {
        info!(category_id = %command.id, "Handling UpdateCategoryCommand");

        let mut category = self
            .categories
            .find(command.id)
            .await?
            .ok_or_else(|| not_found::<Category>(command.id))?;

        command.patch.apply(&mut category);
        self.categories.save(&category).await
    }
}

/// 软删除 Category，行保留，之后的默认查询不可见
pub struct DeleteCategoryHandler {
    categories: Arc<dyn SoftDeleteStore<Category>>,
}

impl DeleteCategoryHandler {
    pub fn new(categories: Arc<dyn SoftDeleteStore<Category>>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CommandHandler<DeleteCategoryCommand> for DeleteCategoryHandler {
    async fn handle(&self, command: DeleteCategoryCommand) -> AppResult<()> {
        info!(category_id = %command.id, "Handling DeleteCategoryCommand");

        let category = self
            .categories
            .find(command.id)
            .await?
            .ok_or_else(|| not_found::<Category>(command.id))?;

        let deleted = self.categories.soft_delete(&category).await?;
        info!(
            category_id = %deleted.id,
            deleted_at = ?deleted.deleted_at,
            "Category soft-deleted"
        );
        Ok(())
    }
}

/// 列出未删除的 Category
pub struct GetCategoriesHandler {
    categories: Arc<dyn SoftDeleteStore<Category>>,
}

impl GetCategoriesHandler {
    pub fn new(categories: Arc<dyn SoftDeleteStore<Category>>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl QueryHandler<GetCategoriesQuery> for GetCategoriesHandler {
    async fn handle(&self, _query: GetCategoriesQuery) -> AppResult<Vec<Category>> {
        info!("Handling GetCategoriesQuery");
        self.categories.find_all(&()).await
    }
}

pub struct GetCategoryByIdHandler {
    categories: Arc<dyn SoftDeleteStore<Category>>,
}

impl GetCategoryByIdHandler {
    pub fn new(categories: Arc<dyn SoftDeleteStore<Category>>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl QueryHandler<GetCategoryByIdQuery> for GetCategoryByIdHandler {
    async fn handle(&self, query: GetCategoryByIdQuery) -> AppResult<Category> {
        info!(category_id = %query.id, "Handling GetCategoryByIdQuery");

        self.categories
            .find(query.id)
            .await?
            .ok_or_else(|| not_found::<Category>(query.id))
    }
}
