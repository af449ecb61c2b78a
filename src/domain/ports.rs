use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the raw college document comes from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, used in logs and load errors.
    fn location(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_location(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
