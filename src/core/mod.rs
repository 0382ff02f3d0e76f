//! 核心层：错误类型、响应文本、分发中间件

pub mod error;
pub mod middleware;
pub mod response;
