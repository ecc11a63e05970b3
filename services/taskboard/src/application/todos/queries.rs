//! Todo 查询

use taskboard_cqrs_core::Query;

use crate::domain::{Todo, TodoId};

/// 列出 Todo，可按完成状态过滤
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetTodosQuery {
    pub completed: Option<bool>,
}

impl Query for GetTodosQuery {
    const NAME: &'static str = "todos.list";
    type Result = Vec<Todo>;
}

/// 通过 ID 获取 Todo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetTodoByIdQuery {
    pub id: TodoId,
}

impl Query for GetTodoByIdQuery {
    const NAME: &'static str = "todos.get";
    type Result = Todo;
}
