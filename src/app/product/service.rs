//! Products 服务请求分发

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use super::model::{ErrorBody, HealthStatus, LikeResponse, ProductPayload, ProductRecord, SearchQuery};
use crate::core::error::{CoreError, Result};

/// 请求关联 id 的请求头
pub const X_REQUEST_ID: &str = "x-request-id";

const JSON: &str = "application/json";

/// Products REST 接口
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// `POST /products`
    async fn create(&self, payload: &ProductPayload) -> Result<ProductRecord>;

    /// `PUT /products/{id}`
    async fn update(&self, id: &str, payload: &ProductPayload) -> Result<ProductRecord>;

    /// `GET /products/{id}`
    async fn retrieve(&self, id: &str) -> Result<ProductRecord>;

    /// `DELETE /products/{id}`
    async fn delete(&self, id: &str) -> Result<()>;

    /// `GET /products?name=&description=&price=`
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProductRecord>>;

    /// `PUT /products/{id}/like`
    async fn like(&self, id: &str) -> Result<LikeResponse>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus>;
}

/// 基于 reqwest 的实现
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    base_url: Url,
}

impl HttpProductApi {
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| CoreError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 在基础地址后追加路径段，每段单独做百分号编码
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CoreError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 搜索地址；没有条件时不带查询串
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        let mut url = self.endpoint(&["products"])?;
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&ProductPayload>) -> Result<Vec<u8>> {
        let request_id = Uuid::new_v4().to_string();
        debug!("{} {} - request_id={}", method, url, request_id);

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .header(X_REQUEST_ID, &request_id);
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?.to_vec();

        info!(
            "{} {} - {} - request_id={}",
            method,
            url.path(),
            status,
            request_id
        );

        if !status.is_success() {
            return Err(CoreError::Api {
                status,
                message: ErrorBody::message_from(&bytes),
            });
        }

        Ok(bytes)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&ProductPayload>,
    ) -> Result<T> {
        let bytes = self.send(method, url, body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn create(&self, payload: &ProductPayload) -> Result<ProductRecord> {
        let url = self.endpoint(&["products"])?;
        self.send_json(Method::POST, url, Some(payload)).await
    }

    async fn update(&self, id: &str, payload: &ProductPayload) -> Result<ProductRecord> {
        let url = self.endpoint(&["products", id])?;
        self.send_json(Method::PUT, url, Some(payload)).await
    }

    async fn retrieve(&self, id: &str) -> Result<ProductRecord> {
        let url = self.endpoint(&["products", id])?;
        self.send_json(Method::GET, url, None).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&["products", id])?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProductRecord>> {
        let url = self.search_url(query)?;
        self.send_json(Method::GET, url, None).await
    }

    async fn like(&self, id: &str) -> Result<LikeResponse> {
        let url = self.endpoint(&["products", id, "like"])?;
        self.send_json(Method::PUT, url, None).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&["health"])?;
        self.send_json(Method::GET, url, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpProductApi {
        HttpProductApi::new(Client::new(), base).unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let api = api("http://localhost:8080");
        assert_eq!(
            api.endpoint(&["products"]).unwrap().as_str(),
            "http://localhost:8080/products"
        );
        assert_eq!(
            api.endpoint(&["products", "42", "like"]).unwrap().as_str(),
            "http://localhost:8080/products/42/like"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_id() {
        let api = api("http://svc.local/shop/");
        assert_eq!(
            api.endpoint(&["products", "a/b c"]).unwrap().as_str(),
            "http://svc.local/shop/products/a%2Fb%20c"
        );
    }

    #[test]
    fn test_search_url_without_filters_has_no_query() {
        let api = api("http://localhost:8080");
        let url = api.search_url(&SearchQuery::default()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/products");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_search_url_with_filters() {
        let api = api("http://localhost:8080");
        let query = SearchQuery {
            name: "foo".to_string(),
            description: String::new(),
            price: "9.99".to_string(),
        };
        assert_eq!(
            api.search_url(&query).unwrap().as_str(),
            "http://localhost:8080/products?name=foo&price=9.99"
        );

        let query = SearchQuery {
            name: "big hat".to_string(),
            ..Default::default()
        };
        assert_eq!(
            api.search_url(&query).unwrap().query(),
            Some("name=big+hat")
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            HttpProductApi::new(Client::new(), "not a url"),
            Err(CoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpProductApi::new(Client::new(), "mailto:ops@example.com"),
            Err(CoreError::InvalidUrl(_))
        ));
    }
}
