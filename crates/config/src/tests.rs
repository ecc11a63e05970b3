use figment::Jail;
use secrecy::{ExposeSecret, Secret};

use crate::{AppConfig, DatabaseConfig, StorageBackend};

const DEFAULT_TOML: &str = r#"
app_name = "taskboard"

[server]
host = "127.0.0.1"
port = 3000

[database]
user = "postgres"
password = "postgres"
name = "todo_db"
"#;

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_password".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_password"));
}

#[test]
fn test_config_struct_redaction() {
    let config = DatabaseConfig {
        host: "localhost".to_string(),
        port: 5432,
        user: "postgres".to_string(),
        password: Secret::new("hunter2".to_string()),
        name: "todo_db".to_string(),
        max_connections: 10,
        acquire_timeout_secs: 5,
        ssl_mode: "prefer".to_string(),
        run_migrations: None,
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("hunter2"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_load_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", DEFAULT_TOML)?;

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;

        assert_eq!(config.app_name, "taskboard");
        assert_eq!(config.app_env, "development");
        assert_eq!(config.server.addr(), "127.0.0.1:3000");
        assert_eq!(config.server.health_port(), 4000);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.ssl_mode, "prefer");
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.run_migrations());
        assert!(!config.json_logs());
        Ok(())
    });
}

#[test]
fn test_conventional_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", DEFAULT_TOML)?;
        jail.set_env("DATABASE_HOST", "db.internal");
        jail.set_env("DATABASE_PORT", "6543");
        jail.set_env("DATABASE_PASSWORD", "s3cret-pw");
        jail.set_env("PORT", "8080");

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.password.expose_secret(), "s3cret-pw");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.health_port(), 9080);
        Ok(())
    });
}

#[test]
fn test_prefixed_env_wins() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", DEFAULT_TOML)?;
        jail.set_env("PORT", "8080");
        jail.set_env("TASKBOARD_SERVER__PORT", "9000");
        jail.set_env("TASKBOARD_STORAGE__BACKEND", "memory");
        jail.set_env("TASKBOARD_TELEMETRY__LOG_LEVEL", "debug");
        jail.set_env("TASKBOARD_DATABASE__SSL_MODE", "require");

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.ssl_mode, "require");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.telemetry.log_level, "debug");
        Ok(())
    });
}

#[test]
fn test_environment_file_and_production_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", DEFAULT_TOML)?;
        jail.create_file(
            "production.toml",
            r#"
            [server]
            health_port = 9100
            "#,
        )?;
        jail.set_env("APP_ENV", "production");

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;

        assert!(config.is_production());
        assert_eq!(config.server.health_port(), 9100);
        assert_eq!(config.server.port, 3000);
        assert!(!config.run_migrations());
        assert!(config.json_logs());
        Ok(())
    });
}

#[test]
fn test_missing_required_field_fails() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", "app_name = \"taskboard\"")?;
        assert!(AppConfig::load(".").is_err());
        Ok(())
    });
}
