//! 核心响应处理模块
//!
//! 每个动作成功/失败时显示的 flash 文本，以及错误消息的解析策略。

use super::error::CoreError;

pub const SUCCESS: &str = "Success";
pub const DELETED: &str = "Product has been Deleted!";
pub const LIKED: &str = "Product liked";

/// 动作执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 请求成功，表单/表格已更新
    Done,
    /// 请求失败，已显示错误消息
    Failed,
    /// 本地前置条件不满足，没有发出请求（例如没有 id 时点赞）
    Skipped,
    /// 同一动作已有请求在途，本次触发被忽略
    Busy,
}

/// 选择失败时显示的文本：优先使用服务端 `message`，否则使用动作默认文本
pub fn failure_message(err: &CoreError, fallback: &str) -> String {
    err.server_message()
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_failure_message_prefers_server_text() {
        let err = CoreError::Api {
            status: StatusCode::BAD_REQUEST,
            message: Some("Invalid price format".to_string()),
        };
        assert_eq!(failure_message(&err, "Error searching products"), "Invalid price format");
    }

    #[test]
    fn test_failure_message_falls_back() {
        let err = CoreError::Api {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };
        assert_eq!(failure_message(&err, "Error creating product"), "Error creating product");

        let err = CoreError::Api {
            status: StatusCode::BAD_GATEWAY,
            message: Some(String::new()),
        };
        assert_eq!(failure_message(&err, "Error creating product"), "Error creating product");

        let err = CoreError::Decode("eof".to_string());
        assert_eq!(failure_message(&err, "Error liking product"), "Error liking product");
    }
}
