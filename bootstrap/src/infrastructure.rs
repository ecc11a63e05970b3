//! 基础设施资源管理

use std::time::Duration;

use sqlx::PgPool;
use taskboard_adapter_postgres::{
    Migration, MigrationManager, PostgresConfig, SslMode, create_pool,
};
use taskboard_config::{AppConfig, StorageBackend};
use taskboard_errors::AppResult;
use tracing::info;

/// 基础设施资源容器
///
/// 内存存储模式下不创建数据库连接池
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: Option<PgPool>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let postgres_pool = match config.storage.backend {
            StorageBackend::Postgres => {
                let pool = create_pool(&Self::postgres_config(&config)?).await?;
                Some(pool)
            }
            StorageBackend::Memory => {
                info!("In-memory storage selected, skipping PostgreSQL");
                None
            }
        };

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    fn postgres_config(config: &AppConfig) -> AppResult<PostgresConfig> {
        let db = &config.database;
        let ssl_mode: SslMode = db.ssl_mode.parse()?;

        Ok(
            PostgresConfig::from_components(&db.host, db.port, &db.name, &db.user)
                .with_password(db.password.clone())
                .with_ssl_mode(ssl_mode)
                .with_pool(1, db.max_connections)
                .with_acquire_timeout(Duration::from_secs(db.acquire_timeout_secs))
                .with_application_name(&config.app_name),
        )
    }

    /// 按配置执行迁移
    ///
    /// 内存存储或 `run_migrations = false` 时跳过
    pub async fn run_migrations(&self, migrations: &[Migration]) -> AppResult<()> {
        let Some(pool) = &self.postgres_pool else {
            return Ok(());
        };
        if !self.config.run_migrations() {
            info!("Database migrations disabled");
            return Ok(());
        }

        let result = MigrationManager::new(pool.clone())
            .migrate(migrations)
            .await?
            .into_result()?;

        info!(
            applied = result.applied_count(),
            skipped = result.skipped.len(),
            "Database migrations complete"
        );
        Ok(())
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> Option<PgPool> {
        self.postgres_pool.clone()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::Secret;
    use taskboard_config::{DatabaseConfig, ServerConfig, StorageConfig, TelemetryConfig};

    use super::*;

    fn config(backend: StorageBackend, ssl_mode: &str) -> AppConfig {
        AppConfig {
            app_name: "taskboard".to_string(),
            app_env: "development".to_string(),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                health_port: None,
            },
            database: DatabaseConfig {
                host: "db.internal".to_string(),
                port: 5433,
                user: "app".to_string(),
                password: Secret::new("hunter2".to_string()),
                name: "todo_db".to_string(),
                max_connections: 7,
                acquire_timeout_secs: 3,
                ssl_mode: ssl_mode.to_string(),
                run_migrations: None,
            },
            storage: StorageConfig { backend },
            telemetry: TelemetryConfig::default(),
        }
    }

    #[test]
    fn test_postgres_config_from_app_config() {
        let pg = Infrastructure::postgres_config(&config(StorageBackend::Postgres, "require"))
            .unwrap();

        assert_eq!(pg.host, "db.internal");
        assert_eq!(pg.port, 5433);
        assert_eq!(pg.pool_max, 7);
        assert_eq!(pg.acquire_timeout, Duration::from_secs(3));
        assert_eq!(pg.ssl_mode, SslMode::Require);
        assert_eq!(pg.application_name.as_deref(), Some("taskboard"));
    }

    #[test]
    fn test_unknown_ssl_mode_is_rejected() {
        let result = Infrastructure::postgres_config(&config(StorageBackend::Postgres, "always"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_memory_backend_skips_postgres() {
        let infra = Infrastructure::from_config(config(StorageBackend::Memory, "prefer"))
            .await
            .unwrap();

        assert!(infra.postgres_pool().is_none());
        infra.run_migrations(&[]).await.unwrap();
    }
}
