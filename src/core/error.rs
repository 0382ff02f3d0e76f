//! 核心错误处理模块

use reqwest::StatusCode;
use thiserror::Error;

/// 核心错误类型
///
/// 控制器把所有失败都折叠成一条 flash 消息，这里只保留决定消息内容所需的信息。
#[derive(Debug, Error)]
pub enum CoreError {
    /// 网络或传输层失败（连接被拒绝、超时等）
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 服务端返回了非 2xx 状态码
    #[error("server responded {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    /// 成功响应但响应体无法解析
    #[error("malformed response body: {0}")]
    Decode(String),

    /// 无法由基础地址拼出请求 URL
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// 结果表格渲染失败
    #[error("render error: {0}")]
    Render(#[from] tera::Error),
}

impl CoreError {
    /// 服务端在错误响应里给出的 `message` 字段
    pub fn server_message(&self) -> Option<&str> {
        match self {
            CoreError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// 对应的 HTTP 状态码（仅服务端错误才有）
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CoreError::Api { status, .. } => Some(*status),
            CoreError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
