//! 持久化层模块
//!
//! 每个实体有 PostgreSQL 与内存两种存储实现

pub mod category_repository;
pub mod in_memory;
pub mod migrations;
pub mod tag_repository;
pub mod todo_repository;

pub use category_repository::PostgresCategoryRepository;
pub use in_memory::InMemoryStore;
pub use migrations::migrations;
pub use tag_repository::PostgresTagRepository;
pub use todo_repository::PostgresTodoRepository;
