//! HTTP 客户端基础设施

use reqwest::Client;
use std::time::Duration;

use crate::config::ApiConfig;

pub struct HttpClientManager {
    client: Client,
}

impl HttpClientManager {
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(concat!("product-console/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}
