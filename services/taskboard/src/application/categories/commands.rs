//! Category 命令

use taskboard_cqrs_core::Command;

use crate::domain::{Category, CategoryId, CategoryPatch};

/// 创建 Category 命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
}

impl Command for CreateCategoryCommand {
    const NAME: &'static str = "categories.create";
    type Result = Category;
}

/// 局部更新 Category 命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCategoryCommand {
    pub id: CategoryId,
    pub patch: CategoryPatch,
}

impl Command for UpdateCategoryCommand {
    const NAME: &'static str = "categories.update";
    type Result = Category;
}

/// 删除 Category 命令（软删除）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCategoryCommand {
    pub id: CategoryId,
}

impl Command for DeleteCategoryCommand {
    const NAME: &'static str = "categories.delete";
    type Result = ();
}
