//! HTTP 请求处理器模块

pub mod item;
pub mod system;
