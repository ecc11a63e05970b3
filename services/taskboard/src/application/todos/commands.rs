//! Todo 命令

use taskboard_cqrs_core::Command;

use crate::domain::{Priority, Todo, TodoId, TodoPatch};

/// 创建 Todo 命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoCommand {
    pub title: String,
    pub description: Option<String>,
    /// 未指定时为 `low`
    pub priority: Option<Priority>,
}

impl Command for CreateTodoCommand {
    const NAME: &'static str = "todos.create";
    type Result = Todo;
}

/// 局部更新 Todo 命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoCommand {
    pub id: TodoId,
    pub patch: TodoPatch,
}

impl Command for UpdateTodoCommand {
    const NAME: &'static str = "todos.update";
    type Result = Todo;
}

/// 删除 Todo 命令（物理删除）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTodoCommand {
    pub id: TodoId,
}

impl Command for DeleteTodoCommand {
    const NAME: &'static str = "todos.delete";
    type Result = ();
}
