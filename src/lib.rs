//! # Products 表单控制台
//!
//! 把界面按钮映射为对 products REST 服务的调用，并把响应回填到表单与结果表格：
//! - 创建、更新、查询、删除、搜索、点赞六个远程动作，外加本地清空
//! - 表单、flash 消息区、结果区都是可注入的 trait，方便脱离界面测试
//! - 同一动作在途时不会重复发送
//! - 终端控制台作为默认界面

pub mod app;
pub mod config;
pub mod console;
pub mod core;
pub mod infrastructure;

pub use crate::core::error::{CoreError, Result};
pub use crate::core::response::Outcome;
