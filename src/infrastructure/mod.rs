//! 基础设施层：HTTP 客户端与日志

pub mod http;
pub mod logger;
