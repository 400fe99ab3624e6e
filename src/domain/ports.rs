use crate::domain::model::{HerdReport, MatingBatch};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<MatingBatch>;
    async fn transform(&self, data: MatingBatch) -> Result<HerdReport>;
    async fn load(&self, report: HerdReport) -> Result<Vec<String>>;
}
