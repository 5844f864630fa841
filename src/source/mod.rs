// Snapshot sources: where analysis input comes from.

pub mod fetcher;
pub mod traits;

pub use fetcher::{HtmlFileSource, JsonFileSource, from_config};
pub use traits::SnapshotSource;
