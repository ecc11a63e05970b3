//! 实体基础 trait

use std::fmt::{Debug, Display};
use std::hash::Hash;

use chrono::{DateTime, Utc};

/// 实体 trait
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static;

    /// 实体名称，用于日志与错误信息
    const NAME: &'static str;

    fn id(&self) -> Self::Id;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    /// 刷新更新时间
    fn touch(&mut self, at: DateTime<Utc>);
}

/// 支持软删除的实体
///
/// 软删除只写入 `deleted_at`，行保留在存储中，默认查询不可见
pub trait SoftDeletable: Entity {
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn mark_deleted(&mut self, at: DateTime<Utc>);

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Label {
        id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    }

    impl Entity for Label {
        type Id = i64;
        const NAME: &'static str = "Label";

        fn id(&self) -> i64 {
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

    impl SoftDeletable for Label {
        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.deleted_at
        }

        fn mark_deleted(&mut self, at: DateTime<Utc>) {
            self.deleted_at = Some(at);
        }
    }

    #[test]
    fn test_mark_deleted() {
        let now = Utc::now();
        let mut label = Label {
            id: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        assert!(!label.is_deleted());

        label.mark_deleted(now);
        assert!(label.is_deleted());
        assert_eq!(label.deleted_at(), Some(now));
        assert_eq!(label.id(), 1);
    }
}
