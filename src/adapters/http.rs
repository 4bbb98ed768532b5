use crate::core::{
    ConfigProvider, ProductCatalog, ProductDescriptor, ProductId, RequestPolicy, StockOracle,
    StockSnapshot,
};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Stock and catalog lookups against the shop's JSON API
/// (`GET {base}/stock/{id}` and `GET {base}/products/{id}`).
#[derive(Debug, Clone)]
pub struct HttpShopApi {
    client: Client,
    base_url: String,
    policy: RequestPolicy,
}

#[derive(Deserialize)]
struct StockBody {
    amount: u32,
}

impl HttpShopApi {
    pub fn new(base_url: impl Into<String>, policy: RequestPolicy) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            policy,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.api_endpoint(), config.request_policy())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// GET with per-request timeout, retrying transient failures with
    /// exponential backoff.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.policy.retry_attempts => {
                    let delay = self.policy.backoff(attempt);
                    tracing::debug!(
                        "📡 GET {} failed ({}), retry {}/{} in {:?}",
                        url,
                        e,
                        attempt + 1,
                        self.policy.retry_attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("📡 GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.policy.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CartError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl StockOracle for HttpShopApi {
    async fn stock(&self, product_id: ProductId) -> Result<StockSnapshot> {
        let body: StockBody = self.get_json(&format!("stock/{}", product_id)).await?;
        Ok(StockSnapshot {
            id: product_id,
            amount: body.amount,
        })
    }
}

#[async_trait]
impl ProductCatalog for HttpShopApi {
    async fn product(&self, product_id: ProductId) -> Result<ProductDescriptor> {
        self.get_json(&format!("products/{}", product_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn fast_policy(retry_attempts: u32) -> RequestPolicy {
        RequestPolicy {
            timeout: Duration::from_secs(2),
            retry_attempts,
            retry_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_stock_lookup() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/stock/7");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": 7, "amount": 3}));
        });

        let api = HttpShopApi::new(server.base_url(), fast_policy(0));
        let stock = api.stock(ProductId(7)).await.unwrap();

        stock_mock.assert();
        assert_eq!(stock.id, ProductId(7));
        assert_eq!(stock.amount, 3);
    }

    #[tokio::test]
    async fn test_product_lookup_with_trailing_slash_base() {
        let server = MockServer::start();
        let product_mock = server.mock(|when, then| {
            when.method(GET).path("/products/2");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": 2,
                    "title": "Tênis VR Caminhada Confortável",
                    "price": 139.9,
                    "image": "https://img.example/2.jpg"
                }));
        });

        let api = HttpShopApi::new(format!("{}/", server.base_url()), fast_policy(0));
        let product = api.product(ProductId(2)).await.unwrap();

        product_mock.assert();
        assert_eq!(product.title, "Tênis VR Caminhada Confortável");
        assert_eq!(product.price, 139.9);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/stock/9");
            then.status(404);
        });

        let api = HttpShopApi::new(server.base_url(), fast_policy(3));
        let err = api.stock(ProductId(9)).await.unwrap_err();

        stock_mock.assert_hits(1);
        assert!(matches!(
            err,
            CartError::UnexpectedStatus { status: 404, .. }
        ));
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/stock/1");
            then.status(503);
        });

        let api = HttpShopApi::new(server.base_url(), fast_policy(2));
        let result = api.stock(ProductId(1)).await;

        assert!(result.is_err());
        stock_mock.assert_hits(3);
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/stock/1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": 1, "amount": -2}));
        });

        let api = HttpShopApi::new(server.base_url(), fast_policy(2));
        let err = api.stock(ProductId(1)).await.unwrap_err();

        stock_mock.assert_hits(1);
        assert!(matches!(err, CartError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/stock/1");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(serde_json::json!({"id": 1, "amount": 1}));
        });

        let policy = RequestPolicy {
            timeout: Duration::from_millis(50),
            retry_attempts: 0,
            retry_delay: Duration::from_millis(1),
        };
        let api = HttpShopApi::new(server.base_url(), policy);
        let err = api.stock(ProductId(1)).await.unwrap_err();

        stock_mock.assert_hits(1);
        assert!(matches!(err, CartError::Http(ref e) if e.is_timeout()));
    }
}
