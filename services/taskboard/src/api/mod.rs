//! 对外接口层

pub mod http;
