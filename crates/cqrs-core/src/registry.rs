//! 处理器注册表
//!
//! 以消息标识为键保存类型擦除后的处理器，构建完成后只读

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use taskboard_errors::{AppError, AppResult};

/// 消息种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Command,
    Query,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 类型擦除后的处理器
pub type ErasedHandler = Arc<dyn Any + Send + Sync>;

/// 处理器注册表
pub struct HandlerRegistry {
    kind: MessageKind,
    handlers: HashMap<&'static str, ErasedHandler>,
}

impl HandlerRegistry {
    pub fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            handlers: HashMap::new(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// 注册处理器
    ///
    /// 同一标识重复注册返回 `DuplicateHandler`，已有的注册保持不变
    pub fn register(&mut self, name: &'static str, handler: ErasedHandler) -> AppResult<()> {
        match self.handlers.entry(name) {
            Entry::Occupied(_) => Err(AppError::duplicate_handler(format!(
                "{} {}",
                self.kind, name
            ))),
            Entry::Vacant(slot) => {
                slot.insert(handler);
                Ok(())
            }
        }
    }

    /// 按标识查找处理器
    pub fn resolve(&self, name: &str) -> AppResult<&ErasedHandler> {
        self.handlers
            .get(name)
            .ok_or_else(|| AppError::unregistered_message(format!("{} {}", self.kind, name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// 已注册的标识，按字母序
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// 校验给定的消息都已注册，用于启动阶段
    pub fn ensure_handles(&self, names: &[&str]) -> AppResult<()> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::unregistered_message(format!(
                "{} {}",
                self.kind,
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kind", &self.kind)
            .field("handlers", &self.names())
            .finish()
    }
}
