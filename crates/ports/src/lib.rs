//! ports - 抽象 trait 层
//!
//! 定义实体存储的抽象接口，由 PostgreSQL 与内存实现

mod repository;

pub use repository::*;
