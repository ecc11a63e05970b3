//! PostgreSQL 迁移管理模块
//!
//! 迁移按版本顺序执行，每个迁移在独立事务中应用并记录校验和。
//! 已应用迁移的 SQL 被修改时校验和不一致，迁移中止。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use taskboard_errors::{AppError, AppResult};
use tracing::{info, warn};

/// 迁移记录
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: DateTime<Utc>,
    pub checksum: String,
}

/// 迁移定义
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    /// 可包含多条语句
    pub up_sql: String,
    pub checksum: String,
}

impl Migration {
    pub fn new(version: i64, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        let checksum = Self::calculate_checksum(&up_sql);
        Self {
            version,
            name: name.into(),
            up_sql,
            checksum,
        }
    }

    /// SHA-256 十六进制校验和
    fn calculate_checksum(sql: &str) -> String {
        hex::encode(Sha256::digest(sql.as_bytes()))
    }
}

/// 迁移计划中单个迁移的处理方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    Apply(i64),
    Skip(i64),
    ChecksumMismatch(i64),
}

/// 根据已应用记录生成迁移计划，按版本升序
pub fn plan_migrations(applied: &[MigrationRecord], migrations: &[Migration]) -> Vec<PlanStep> {
    let applied: HashMap<i64, &str> = applied
        .iter()
        .map(|r| (r.version, r.checksum.as_str()))
        .collect();

    let mut sorted: Vec<_> = migrations.iter().collect();
    sorted.sort_by_key(|m| m.version);

    sorted
        .into_iter()
        .map(|m| match applied.get(&m.version) {
            Some(checksum) if *checksum == m.checksum => PlanStep::Skip(m.version),
            Some(_) => PlanStep::ChecksumMismatch(m.version),
            None => PlanStep::Apply(m.version),
        })
        .collect()
}

/// 迁移管理器
pub struct MigrationManager {
    pool: PgPool,
    table_name: String,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table_name: "_migrations".to_string(),
        }
    }

    /// 设置迁移表名
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// 初始化迁移表
    pub async fn init(&self) -> AppResult<()> {
        let create_sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                checksum VARCHAR(64) NOT NULL
            )
            "#,
            self.table_name
        );

        sqlx::query(&create_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create migration table: {}", e)))?;

        Ok(())
    }

    /// 获取已应用的迁移
    pub async fn get_applied_migrations(&self) -> AppResult<Vec<MigrationRecord>> {
        let sql = format!(
            "SELECT version, name, applied_at, checksum FROM {} ORDER BY version ASC",
            self.table_name
        );

        sqlx::query_as::<_, MigrationRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get migrations: {}", e)))
    }

    /// 应用单个迁移
    pub async fn apply(&self, migration: &Migration) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::raw_sql(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to apply migration {}: {}",
                    migration.version, e
                ))
            })?;

        let insert_sql = format!(
            "INSERT INTO {} (version, name, checksum) VALUES ($1, $2, $3)",
            self.table_name
        );
        sqlx::query(&insert_sql)
            .bind(migration.version)
            .bind(&migration.name)
            .bind(&migration.checksum)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to record migration: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit migration: {}", e)))?;

        info!(
            version = migration.version,
            name = %migration.name,
            "Migration applied"
        );

        Ok(())
    }

    /// 应用所有待处理的迁移，遇到第一个错误即停止
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<MigrationResult> {
        self.init().await?;

        let applied = self.get_applied_migrations().await?;
        let mut result = MigrationResult::default();

        for step in plan_migrations(&applied, migrations) {
            match step {
                PlanStep::Skip(version) => result.skipped.push(version),
                PlanStep::ChecksumMismatch(version) => {
                    warn!(version, "Migration checksum mismatch");
                    result.errors.push(MigrationError {
                        version,
                        error: "Checksum mismatch - migration has been modified".to_string(),
                    });
                    break;
                }
                PlanStep::Apply(version) => {
                    let Some(migration) = migrations.iter().find(|m| m.version == version) else {
                        continue;
                    };
                    if let Err(e) = self.apply(migration).await {
                        result.errors.push(MigrationError {
                            version,
                            error: e.to_string(),
                        });
                        break;
                    }
                    result.applied.push(version);
                }
            }
        }

        Ok(result)
    }
}

/// 迁移结果
#[derive(Debug, Clone, Default)]
pub struct MigrationResult {
    pub applied: Vec<i64>,
    pub skipped: Vec<i64>,
    pub errors: Vec<MigrationError>,
}

impl MigrationResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// 有错误时转换为 AppError
    pub fn into_result(self) -> AppResult<Self> {
        match self.errors.first() {
            None => Ok(self),
            Some(e) => Err(AppError::database(format!(
                "Migration {} failed: {}",
                e.version, e.error
            ))),
        }
    }
}

/// 迁移错误
#[derive(Debug, Clone)]
pub struct MigrationError {
    pub version: i64,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(migration: &Migration) -> MigrationRecord {
        MigrationRecord {
            version: migration.version,
            name: migration.name.clone(),
            applied_at: Utc::now(),
            checksum: migration.checksum.clone(),
        }
    }

    #[test]
    fn test_checksum_is_stable_sha256() {
        let m = Migration::new(1, "empty", "");
        assert_eq!(
            m.checksum,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(m.checksum.len(), 64);
    }

    #[test]
    fn test_checksum_difference() {
        let m1 = Migration::new(1, "test", "CREATE TABLE todos (id INT)");
        let m2 = Migration::new(1, "test", "CREATE TABLE tags (id INT)");
        assert_ne!(m1.checksum, m2.checksum);
    }

    #[test]
    fn test_plan_sorts_and_skips_applied() {
        let m1 = Migration::new(1, "todos", "CREATE TABLE todos ()");
        let m2 = Migration::new(2, "tags", "CREATE TABLE tags ()");
        let m3 = Migration::new(3, "categories", "CREATE TABLE categories ()");

        let plan = plan_migrations(&[record(&m1)], &[m3.clone(), m1.clone(), m2.clone()]);

        assert_eq!(
            plan,
            vec![PlanStep::Skip(1), PlanStep::Apply(2), PlanStep::Apply(3)]
        );
    }

    #[test]
    fn test_plan_detects_modified_migration() {
        let original = Migration::new(1, "todos", "CREATE TABLE todos ()");
        let edited = Migration::new(1, "todos", "CREATE TABLE todos (id INT)");

        let plan = plan_migrations(&[record(&original)], &[edited]);
        assert_eq!(plan, vec![PlanStep::ChecksumMismatch(1)]);
    }

    #[test]
    fn test_migration_result_into_result() {
        let ok = MigrationResult {
            applied: vec![1, 2, 3],
            ..Default::default()
        };
        assert!(ok.is_success());
        assert_eq!(ok.into_result().unwrap().applied_count(), 3);

        let failed = MigrationResult {
            errors: vec![MigrationError {
                version: 2,
                error: "syntax error".to_string(),
            }],
            ..Default::default()
        };
        let err = failed.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Database error: Migration 2 failed: syntax error"
        );
    }
}
