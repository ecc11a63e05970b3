//! 内存存储
//!
//! 用于测试与 `storage.backend = "memory"`，进程退出后数据丢失

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use taskboard_domain_core::SoftDeletable;
use taskboard_errors::{AppError, AppResult};
use taskboard_ports::{EntityStore, Persistable, SoftDeleteStore};
use tokio::sync::RwLock;

/// 通用内存存储，ID 从 1 开始自增
pub struct InMemoryStore<E: Persistable> {
    rows: RwLock<BTreeMap<E::Id, E>>,
    next_id: AtomicI64,
}

impl<E> InMemoryStore<E>
where
    E: Persistable,
    E::Id: From<i64>,
{
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// 行数，包含已软删除的行
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<E> Default for InMemoryStore<E>
where
    E: Persistable,
    E::Id: From<i64>,
{
    fn default() -> Self {
        Self::new()
    }
}

fn not_found<E: Persistable>(id: E::Id) -> AppError {
    AppError::not_found(format!("{} with id {} not found", E::NAME, id))
}

#[async_trait]
impl<E> EntityStore<E> for InMemoryStore<E>
where
    E: Persistable,
    E::Id: From<i64>,
{
    async fn find(&self, id: E::Id) -> AppResult<Option<E>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).filter(|e| e.is_live()).cloned())
    }

    async fn find_all(&self, filter: &E::Filter) -> AppResult<Vec<E>> {
        let rows = self.rows.read().await;
        let mut list: Vec<E> = rows
            .values()
            .filter(|e| e.is_live() && e.matches(filter))
            .cloned()
            .collect();

        list.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(list)
    }

    async fn insert(&self, draft: E::Draft) -> AppResult<E> {
        let id = E::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let entity = E::from_draft(id, draft, Utc::now());

        self.rows.write().await.insert(id, entity.clone());
        Ok(entity)
    }

    async fn save(&self, entity: &E) -> AppResult<E> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .get_mut(&entity.id())
            .filter(|e| e.is_live())
            .ok_or_else(|| not_found::<E>(entity.id()))?;

        let mut updated = entity.clone();
        updated.touch(Utc::now());
        *slot = updated.clone();
        Ok(updated)
    }

    async fn remove(&self, entity: &E) -> AppResult<()> {
        self.rows
            .write()
            .await
            .remove(&entity.id())
            .map(|_| ())
            .ok_or_else(|| not_found::<E>(entity.id()))
    }
}

#[async_trait]
impl<E> SoftDeleteStore<E> for InMemoryStore<E>
where
    E: Persistable + SoftDeletable,
    E::Id: From<i64>,
{
    async fn soft_delete(&self, entity: &E) -> AppResult<E> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .get_mut(&entity.id())
            .filter(|e| e.is_live())
            .ok_or_else(|| not_found::<E>(entity.id()))?;

        let now = Utc::now();
        slot.mark_deleted(now);
        slot.touch(now);
        Ok(slot.clone())
    }

    async fn find_with_deleted(&self, id: E::Id) -> AppResult<Option<E>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }
}
