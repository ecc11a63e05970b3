//! Tag 命令、查询与处理器

pub mod commands;
pub mod handlers;
pub mod queries;

pub use commands::*;
pub use handlers::*;
pub use queries::*;
