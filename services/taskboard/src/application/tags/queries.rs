//! Tag 查询

use taskboard_cqrs_core::Query;

use crate::domain::{Tag, TagId};

/// 列出未删除的 Tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetTagsQuery;

impl Query for GetTagsQuery {
    const NAME: &'static str = "tags.list";
    type Result = Vec<Tag>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetTagByIdQuery {
    pub id: TagId,
}

impl Query for GetTagByIdQuery {
    const NAME: &'static str = "tags.get";
    type Result = Tag;
}
