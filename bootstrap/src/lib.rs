//! taskboard-bootstrap - 统一服务启动骨架
//!
//! 配置加载、日志、基础设施、运维端口与 graceful shutdown

mod health;
mod infrastructure;
mod metrics;
mod runtime;
mod shutdown;
mod starter;

pub use health::*;
pub use infrastructure::*;
pub use metrics::*;
pub use runtime::*;
pub use shutdown::*;
pub use starter::*;
