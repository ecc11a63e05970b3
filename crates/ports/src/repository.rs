//! Repository trait 定义

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use taskboard_domain_core::{Entity, SoftDeletable};
use taskboard_errors::AppResult;

/// 可持久化实体
///
/// `Draft` 是尚未保存的新实体（没有 ID 与时间戳），
/// `Filter` 是列表查询的过滤条件，`Default` 表示不过滤。
pub trait Persistable: Entity {
    type Draft: Send + Sync + 'static;
    type Filter: Default + Send + Sync + 'static;

    /// 由草稿生成已保存的实体
    fn from_draft(id: Self::Id, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// 是否满足过滤条件
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// 默认读取是否可见，软删除实体在删除后返回 false
    fn is_live(&self) -> bool {
        true
    }
}

/// 基础实体存储
///
/// 默认的读取方法不会返回已软删除的行
#[async_trait]
pub trait EntityStore<E: Persistable>: Send + Sync {
    /// 根据 ID 查找
    async fn find(&self, id: E::Id) -> AppResult<Option<E>>;

    /// 按条件列出，按创建时间倒序
    async fn find_all(&self, filter: &E::Filter) -> AppResult<Vec<E>>;

    /// 插入新实体，返回带 ID 与时间戳的实体
    async fn insert(&self, draft: E::Draft) -> AppResult<E>;

    /// 保存实体修改，刷新更新时间
    async fn save(&self, entity: &E) -> AppResult<E>;

    /// 物理删除
    async fn remove(&self, entity: &E) -> AppResult<()>;
}

/// 支持软删除的实体存储
#[async_trait]
pub trait SoftDeleteStore<E: Persistable + SoftDeletable>: EntityStore<E> {
    /// 软删除：写入删除时间，保留行
    async fn soft_delete(&self, entity: &E) -> AppResult<E>;

    /// 根据 ID 查找，包含已软删除的行
    async fn find_with_deleted(&self, id: E::Id) -> AppResult<Option<E>>;
}
