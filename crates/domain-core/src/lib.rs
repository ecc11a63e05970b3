//! domain-core - 跨 context 的领域核心 trait
//!
//! 实体标识、时间戳与软删除

mod entity;

pub use entity::*;
