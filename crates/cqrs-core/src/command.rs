//! Command trait 定义

use async_trait::async_trait;
use taskboard_errors::AppResult;

/// Command trait
///
/// 写意图的消息。`NAME` 是消息在注册表中的唯一标识。
pub trait Command: Send + Sync + 'static {
    const NAME: &'static str;

    type Result: Send + 'static;
}

/// Command Handler trait
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> AppResult<C::Result>;
}
