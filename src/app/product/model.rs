//! 产品数据模型
//!
//! 服务端拥有产品记录，客户端只在表单里保留一份临时副本，所以这里的字段都是
//! 可以直接回填到输入框的文本。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 服务端返回的产品记录
///
/// `id` 和 `price` 可能是数字也可能是字符串，统一转成显示文本；
/// `likes` 缺失或无法解析时为 0。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "display_text")]
    pub id: String,
    #[serde(default, deserialize_with = "display_text")]
    pub name: String,
    #[serde(default, deserialize_with = "display_text")]
    pub description: String,
    #[serde(default, deserialize_with = "display_text")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub likes: i64,
}

/// 创建/更新请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: String,
    pub likes: i64,
}

impl ProductPayload {
    /// 由表单文本构造请求体，`likes` 按整数解析
    pub fn from_form(name: String, description: String, price: String, likes: &str) -> Self {
        Self {
            name,
            description,
            price,
            likes: parse_likes(likes),
        }
    }
}

/// 搜索条件，空字段不会出现在查询串里
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl SearchQuery {
    /// 非空的查询参数，顺序固定为 name, description, price
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", self.name.as_str()),
            ("description", self.description.as_str()),
            ("price", self.price.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}

/// 点赞响应，只关心 `likes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LikeResponse {
    #[serde(default, deserialize_with = "lenient_count")]
    pub likes: i64,
}

/// 错误响应体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// 解析失败或字段类型不对时返回 `None`
    pub fn message_from(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(bytes)
            .ok()
            .and_then(|body| body.message)
    }
}

/// 健康检查响应
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "display_text")]
    pub status: String,
}

/// 解析 likes 输入框：取前导整数（允许符号与首尾空白），失败时为 0
pub fn parse_likes(input: &str) -> i64 {
    let trimmed = input.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

fn display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => parse_likes(&s),
        _ => 0,
    })
}
