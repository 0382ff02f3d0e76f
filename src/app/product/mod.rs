//! 产品表单：模型、界面抽象、结果渲染、请求分发与控制器

pub mod form;
pub mod handler;
pub mod model;
pub mod render;
pub mod service;

pub use form::{Button, Field, FormState, MemoryForm, MemoryNotifier, MemoryResults, Notifier, ResultsView};
pub use handler::FormController;
pub use model::{ProductPayload, ProductRecord, SearchQuery};
pub use render::{ResultsRenderer, SearchResults};
pub use service::{HttpProductApi, ProductApi};
