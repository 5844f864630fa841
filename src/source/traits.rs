use crate::model::{MarketSnapshot, SourceError};

#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load(&self) -> Result<MarketSnapshot, SourceError>;
}
