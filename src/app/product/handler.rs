//! 产品表单控制器
//!
//! 每个按钮对应一个动作：读取表单、清空 flash、发出一个请求，然后根据结果回填表单、
//! 刷新结果表格并显示一条 flash 消息。动作之间没有共享状态，只有表单里留下的值。

use std::sync::Arc;
use tracing::debug;

use super::form::{Button, Field, FormState, Notifier, ResultsView};
use super::model::{ProductPayload, SearchQuery};
use super::render::ResultsRenderer;
use super::service::ProductApi;
use crate::core::error::{CoreError, Result};
use crate::core::middleware::{instrument, InFlight, InFlightGuard};
use crate::core::response::{failure_message, Outcome, DELETED, LIKED, SUCCESS};

const CREATE_FAILED: &str = "Error creating product";
const UPDATE_FAILED: &str = "Error updating product";
const RETRIEVE_FAILED: &str = "Error retrieving product";
const DELETE_FAILED: &str = "Error deleting product";
const SEARCH_FAILED: &str = "Error searching products";
const LIKE_FAILED: &str = "Error liking product";
const HEALTH_FAILED: &str = "Error checking service health";

const HEALTH: &str = "health";

pub struct FormController {
    api: Arc<dyn ProductApi>,
    form: Arc<dyn FormState>,
    notifier: Arc<dyn Notifier>,
    results: Arc<dyn ResultsView>,
    renderer: ResultsRenderer,
    in_flight: InFlight<&'static str>,
}

impl FormController {
    pub fn new(
        api: Arc<dyn ProductApi>,
        form: Arc<dyn FormState>,
        notifier: Arc<dyn Notifier>,
        results: Arc<dyn ResultsView>,
    ) -> Result<Self> {
        Ok(Self {
            api,
            form,
            notifier,
            results,
            renderer: ResultsRenderer::new()?,
            in_flight: InFlight::new(),
        })
    }

    /// 按钮点击入口
    pub async fn press(&self, button: Button) -> Outcome {
        match button {
            Button::Create => self.create().await,
            Button::Update => self.update().await,
            Button::Retrieve => self.retrieve().await,
            Button::Delete => self.delete().await,
            Button::Clear => self.clear(),
            Button::Search => self.search().await,
            Button::Like => self.like().await,
        }
    }

    pub async fn create(&self) -> Outcome {
        let payload = self.read_payload();
        let Some(_guard) = self.begin(Button::Create.name()) else {
            return Outcome::Busy;
        };

        match instrument(Button::Create, self.api.create(&payload)).await {
            Ok(record) => {
                self.form.populate(&record);
                self.notifier.flash(SUCCESS);
                Outcome::Done
            }
            Err(e) => self.fail(&e, CREATE_FAILED),
        }
    }

    pub async fn update(&self) -> Outcome {
        let id = self.form.value(Field::Id);
        let payload = self.read_payload();
        let Some(_guard) = self.begin(Button::Update.name()) else {
            return Outcome::Busy;
        };

        match instrument(Button::Update, self.api.update(&id, &payload)).await {
            Ok(record) => {
                self.form.populate(&record);
                self.notifier.flash(SUCCESS);
                Outcome::Done
            }
            Err(e) => self.fail(&e, UPDATE_FAILED),
        }
    }

    pub async fn retrieve(&self) -> Outcome {
        let id = self.form.value(Field::Id);
        let Some(_guard) = self.begin(Button::Retrieve.name()) else {
            return Outcome::Busy;
        };

        match instrument(Button::Retrieve, self.api.retrieve(&id)).await {
            Ok(record) => {
                self.form.populate(&record);
                self.notifier.flash(SUCCESS);
                Outcome::Done
            }
            Err(e) => {
                self.form.clear();
                self.fail(&e, RETRIEVE_FAILED)
            }
        }
    }

    pub async fn delete(&self) -> Outcome {
        let id = self.form.value(Field::Id);
        let Some(_guard) = self.begin(Button::Delete.name()) else {
            return Outcome::Busy;
        };

        match instrument(Button::Delete, self.api.delete(&id)).await {
            Ok(()) => {
                self.form.clear();
                self.notifier.flash(DELETED);
                Outcome::Done
            }
            Err(e) => {
                // 失败也清空表单
                self.form.clear();
                self.fail(&e, DELETE_FAILED)
            }
        }
    }

    /// 只在本地清空表单与 flash
    pub fn clear(&self) -> Outcome {
        self.form.clear();
        self.notifier.clear();
        Outcome::Done
    }

    pub async fn search(&self) -> Outcome {
        let query = SearchQuery {
            name: self.form.value(Field::Name),
            description: self.form.value(Field::Description),
            price: self.form.value(Field::Price),
        };
        let Some(_guard) = self.begin(Button::Search.name()) else {
            return Outcome::Busy;
        };

        let found = instrument(Button::Search, async {
            let records = self.api.search(&query).await?;
            self.renderer.render(records)
        })
        .await;

        match found {
            Ok(results) => {
                let first = results.first().cloned();
                self.results.show(results);
                if let Some(record) = first {
                    self.form.populate(&record);
                }
                self.notifier.flash(SUCCESS);
                Outcome::Done
            }
            Err(e) => self.fail(&e, SEARCH_FAILED),
        }
    }

    /// 没有 id 时什么也不做；成功时只更新 likes
    pub async fn like(&self) -> Outcome {
        let id = self.form.value(Field::Id);
        if id.is_empty() {
            debug!("like ignored: no product loaded");
            return Outcome::Skipped;
        }
        let Some(_guard) = self.begin(Button::Like.name()) else {
            return Outcome::Busy;
        };

        match instrument(Button::Like, self.api.like(&id)).await {
            Ok(response) => {
                self.form.set_value(Field::Likes, &response.likes.to_string());
                self.notifier.flash(LIKED);
                Outcome::Done
            }
            Err(e) => self.fail(&e, LIKE_FAILED),
        }
    }

    /// 探测服务健康状态
    pub async fn health(&self) -> Outcome {
        let Some(_guard) = self.begin(HEALTH) else {
            return Outcome::Busy;
        };

        match instrument(HEALTH, self.api.health()).await {
            Ok(health) => {
                self.notifier.flash(&format!("Service is {}", health.status));
                Outcome::Done
            }
            Err(e) => self.fail(&e, HEALTH_FAILED),
        }
    }

    fn read_payload(&self) -> ProductPayload {
        ProductPayload::from_form(
            self.form.value(Field::Name),
            self.form.value(Field::Description),
            self.form.value(Field::Price),
            &self.form.value(Field::Likes),
        )
    }

    /// 占用在途槽位并清空 flash；同一动作已在途时返回 `None`
    fn begin(&self, action: &'static str) -> Option<InFlightGuard<&'static str>> {
        let guard = self.in_flight.try_acquire(action);
        match guard {
            Some(_) => self.notifier.clear(),
            None => debug!("{} ignored: request already in flight", action),
        }
        guard
    }

    fn fail(&self, err: &CoreError, fallback: &str) -> Outcome {
        self.notifier.flash(&failure_message(err, fallback));
        Outcome::Failed
    }
}
