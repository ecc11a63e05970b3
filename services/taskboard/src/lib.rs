//! Taskboard Service Library
//!
//! 模块划分：
//! - `domain`: Todo、Tag、Category 实体
//! - `application`: 命令、查询与处理器，Bus 装配
//! - `infrastructure`: PostgreSQL 与内存存储、数据库迁移
//! - `api`: HTTP 路由与请求校验

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use axum::Router;
use taskboard_errors::AppResult;

use api::http::{AppState, router};
use application::{Stores, build_buses};

/// 用给定存储装配完整的业务路由
pub fn app(stores: Stores) -> AppResult<Router> {
    let (commands, queries) = build_buses(stores)?;
    Ok(router(AppState::new(commands, queries)))
}
