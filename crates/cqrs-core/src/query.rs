//! Query trait 定义

use async_trait::async_trait;
use taskboard_errors::AppResult;

/// Query trait
///
/// 读意图的消息，处理器不得修改状态
pub trait Query: Send + Sync + 'static {
    const NAME: &'static str;

    type Result: Send + 'static;
}

/// Query Handler trait
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, query: Q) -> AppResult<Q::Result>;
}
