use crate::domain::model::Outcome;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn inputs(&self) -> &[f64];
    fn concurrency(&self) -> usize;
    fn output_format(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
}

/// A single-input asynchronous computation with a success/failure outcome.
#[async_trait]
pub trait Computation: Send + Sync {
    async fn compute(&self, input: f64) -> Outcome;
}
