//! Tag 命令

use taskboard_cqrs_core::Command;

use crate::domain::{Tag, TagId, TagPatch};

/// 创建 Tag 命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTagCommand {
    pub name: String,
    pub color: Option<String>,
}

impl Command for CreateTagCommand {
    const NAME: &'static str = "tags.create";
    type Result = Tag;
}

/// 局部更新 Tag 命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTagCommand {
    pub id: TagId,
    pub patch: TagPatch,
}

impl Command for UpdateTagCommand {
    const NAME: &'static str = "tags.update";
    type Result = Tag;
}

/// 删除 Tag 命令（软删除）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTagCommand {
    pub id: TagId,
}

impl Command for DeleteTagCommand {
    const NAME: &'static str = "tags.delete";
    type Result = ();
}
