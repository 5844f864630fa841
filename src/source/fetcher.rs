use crate::config::{InputConfig, InputFormat};
use crate::model::{MarketSnapshot, SourceError};
use crate::parser::{Parser, SteamMarketParser};
use crate::source::SnapshotSource;
use std::path::PathBuf;
use tracing::debug;

/// A snapshot already serialized as JSON.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl SnapshotSource for JsonFileSource {
    async fn load(&self) -> Result<MarketSnapshot, SourceError> {
        debug!("Reading snapshot JSON from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A listing page saved to disk, extracted with [`SteamMarketParser`].
pub struct HtmlFileSource {
    path: PathBuf,
}

impl HtmlFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl SnapshotSource for HtmlFileSource {
    async fn load(&self) -> Result<MarketSnapshot, SourceError> {
        debug!("Reading listing page from {}", self.path.display());
        let html = tokio::fs::read_to_string(&self.path).await?;
        let parser = SteamMarketParser::new()?;
        Ok(parser.parse(&html)?)
    }
}

/// Picks the source matching the configured input format.
pub fn from_config(input: &InputConfig) -> Box<dyn SnapshotSource> {
    match input.format {
        InputFormat::Json => Box::new(JsonFileSource::new(&input.path)),
        InputFormat::Html => Box::new(HtmlFileSource::new(&input.path)),
    }
}
