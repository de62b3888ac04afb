use crate::domain::model::TelemetryEvent;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_path(&self) -> &str;
    fn telemetry_log(&self) -> Option<&str>;
}

#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Records the events and returns how many were written.
    async fn log_events(&self, events: Vec<TelemetryEvent>) -> Result<usize>;
}
