// Transport trait for fetching raw sensor payloads
use async_trait::async_trait;

#[async_trait]
pub trait SensorTransport: Send + Sync {
    /// Fetch the JSON document at `url`. Timeouts are the implementation's concern.
    async fn fetch(&self, url: &str) -> anyhow::Result<String>;
}
