//! 表单状态、通知区与结果区的抽象
//!
//! 控制器只通过这三个 trait 读写界面，测试和终端控制台各自提供实现。

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fmt;
use std::str::FromStr;

use super::model::ProductRecord;
use super::render::SearchResults;

/// 表单里的五个输入框
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Description,
    Price,
    Likes,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Id,
        Field::Name,
        Field::Description,
        Field::Price,
        Field::Likes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Description => "description",
            Field::Price => "price",
            Field::Likes => "likes",
        }
    }

    fn of(record: &ProductRecord, field: Field) -> String {
        match field {
            Field::Id => record.id.clone(),
            Field::Name => record.name.clone(),
            Field::Description => record.description.clone(),
            Field::Price => record.price.clone(),
            Field::Likes => record.likes.to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    /// 接受 `name`、`Name`、`product_name` 等写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = lower.strip_prefix("product_").unwrap_or(&lower);
        Field::ALL
            .into_iter()
            .find(|f| f.name() == key)
            .ok_or_else(|| format!("unknown field: {}", s.trim()))
    }
}

/// 界面上的七个按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Create,
    Update,
    Retrieve,
    Delete,
    Clear,
    Search,
    Like,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Create,
        Button::Update,
        Button::Retrieve,
        Button::Delete,
        Button::Clear,
        Button::Search,
        Button::Like,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Button::Create => "create",
            Button::Update => "update",
            Button::Retrieve => "retrieve",
            Button::Delete => "delete",
            Button::Clear => "clear",
            Button::Search => "search",
            Button::Like => "like",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Button {
    type Err = String;

    /// 接受 `create`、`Create`、`create-btn` 等写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = lower.strip_suffix("-btn").unwrap_or(&lower);
        Button::ALL
            .into_iter()
            .find(|b| b.name() == key)
            .ok_or_else(|| format!("unknown button: {}", s.trim()))
    }
}

/// 表单状态访问器
pub trait FormState: Send + Sync {
    fn value(&self, field: Field) -> String;

    fn set_value(&self, field: Field, value: &str);

    fn like_enabled(&self) -> bool;

    fn set_like_enabled(&self, enabled: bool);

    /// 用一条记录回填全部输入框，并启用点赞按钮
    fn populate(&self, record: &ProductRecord) {
        for field in Field::ALL {
            self.set_value(field, &Field::of(record, field));
        }
        self.set_like_enabled(true);
    }

    /// 清空全部输入框，并禁用点赞按钮
    fn clear(&self) {
        for field in Field::ALL {
            self.set_value(field, "");
        }
        self.set_like_enabled(false);
    }
}

/// 单槽 flash 消息区
pub trait Notifier: Send + Sync {
    fn flash(&self, message: &str);

    fn clear(&self);
}

/// 搜索结果区
pub trait ResultsView: Send + Sync {
    fn show(&self, results: SearchResults);
}

/// 表单快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub likes: String,
    pub like_enabled: bool,
}

impl FormSnapshot {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::Price => &self.price,
            Field::Likes => &self.likes,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Id => &mut self.id,
            Field::Name => &mut self.name,
            Field::Description => &mut self.description,
            Field::Price => &mut self.price,
            Field::Likes => &mut self.likes,
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.get(f).is_empty())
    }
}

/// 内存表单
#[derive(Debug, Default)]
pub struct MemoryForm {
    state: Mutex<FormSnapshot>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.lock().clone()
    }
}

impl FormState for MemoryForm {
    fn value(&self, field: Field) -> String {
        self.state.lock().get(field).to_string()
    }

    fn set_value(&self, field: Field, value: &str) {
        *self.state.lock().slot(field) = value.to_string();
    }

    fn like_enabled(&self) -> bool {
        self.state.lock().like_enabled
    }

    fn set_like_enabled(&self, enabled: bool) {
        self.state.lock().like_enabled = enabled;
    }
}

/// flash 历史记录中的一条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashEntry {
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

/// 内存通知区，保留当前消息和历史
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    current: Mutex<String>,
    history: Mutex<Vec<FlashEntry>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前显示的文本，清空后为空串
    pub fn current(&self) -> String {
        self.current.lock().clone()
    }

    pub fn history(&self) -> Vec<FlashEntry> {
        self.history.lock().clone()
    }
}

impl Notifier for MemoryNotifier {
    fn flash(&self, message: &str) {
        *self.current.lock() = message.to_string();
        self.history.lock().push(FlashEntry {
            message: message.to_string(),
            shown_at: Utc::now(),
        });
    }

    fn clear(&self) {
        self.current.lock().clear();
    }
}

/// 内存结果区，只保留最近一次搜索
#[derive(Debug, Default)]
pub struct MemoryResults {
    last: Mutex<Option<SearchResults>>,
}

impl MemoryResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<SearchResults> {
        self.last.lock().clone()
    }
}

impl ResultsView for MemoryResults {
    fn show(&self, results: SearchResults) {
        *self.last.lock() = Some(results);
    }
}
