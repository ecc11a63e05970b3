//! taskboard-adapter-postgres - PostgreSQL 适配器
//!
//! 连接池、错误映射与版本化迁移

mod config;
mod migration;
mod pool;

pub use config::*;
pub use migration::*;
pub use pool::*;
