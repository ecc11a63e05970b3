//! Todo 实体

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use taskboard_common::Patch;
use taskboard_domain_core::Entity;
use taskboard_ports::Persistable;
use utoipa::ToSchema;

/// Todo ID
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(transparent)]
pub struct TodoId(pub i64);

/// 优先级，未指定时为 `Low`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的优先级字符串
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown priority '{_0}', expected one of low, medium, high")]
pub struct UnknownPriority(#[error(not(source))] pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPriority(s.to_string()))
    }
}

/// Todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 待创建的 Todo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
}

/// Todo 局部更新
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub completed: Patch<bool>,
    pub priority: Patch<Priority>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_unchanged()
            && self.description.is_unchanged()
            && self.completed.is_unchanged()
            && self.priority.is_unchanged()
    }

    /// 只改写给出的字段，返回是否有字段被改写
    pub fn apply(self, todo: &mut Todo) -> bool {
        let mut changed = self.title.apply_to(&mut todo.title);
        changed |= self.description.apply_to_option(&mut todo.description);
        changed |= self.completed.apply_to(&mut todo.completed);
        changed |= self.priority.apply_to(&mut todo.priority);
        changed
    }
}

/// Todo 列表过滤条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub completed: Option<bool>,
}

impl Entity for Todo {
    type Id = TodoId;
    const NAME: &'static str = "Todo";

    fn id(&self) -> TodoId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Persistable for Todo {
    type Draft = NewTodo;
    type Filter = TodoFilter;

    fn from_draft(id: TodoId, draft: NewTodo, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            completed: false,
            priority: draft.priority,
            created_at: now,
            updated_at: now,
        }
    }

    fn matches(&self, filter: &TodoFilter) -> bool {
        filter.completed.is_none_or(|completed| self.completed == completed)
    }
}
