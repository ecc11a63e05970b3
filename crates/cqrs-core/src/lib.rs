//! taskboard-cqrs-core - CQRS 核心库
//!
//! Command/Query trait、处理器注册表、Bus、Middleware

mod bus;
mod command;
mod middleware;
mod query;
mod registry;

pub use bus::*;
pub use command::*;
pub use middleware::*;
pub use query::*;
pub use registry::*;
