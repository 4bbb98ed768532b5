use crate::domain::model::{ProductDescriptor, ProductId, StockSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Authoritative source of available quantities.
#[async_trait]
pub trait StockOracle: Send + Sync {
    async fn stock(&self, product_id: ProductId) -> Result<StockSnapshot>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn product(&self, product_id: ProductId) -> Result<ProductDescriptor>;
}

/// Key-value persistence that survives restarts.
pub trait DurableStore: Send + Sync {
    fn read(&self, key: &str)
        -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write(&self, key: &str, data: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Receives user-facing outcome messages. Fire-and-forget.
pub trait NotificationSink: Send + Sync {
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPolicy {
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl RequestPolicy {
    /// Delay before retry number `attempt` (0-based), doubling each time.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn request_policy(&self) -> RequestPolicy;
}
