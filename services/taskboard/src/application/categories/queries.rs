//! Category 查询

use taskboard_cqrs_core::Query;

use crate::domain::{Category, CategoryId};

/// 列出未删除的 Category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetCategoriesQuery;

impl Query for GetCategoriesQuery {
    const NAME: &'static str = "categories.list";
    type Result = Vec<Category>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCategoryByIdQuery {
    pub id: CategoryId,
}

impl Query for GetCategoryByIdQuery {
    const NAME: &'static str = "categories.get";
    type Result = Category;
}
