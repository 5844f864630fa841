//! Market analytics for community market commodity listings.
//!
//! [`analyze`] turns one [`MarketSnapshot`] (order book scalars plus a raw
//! price/volume history) into an [`AnalysisResult`] with trend, volatility,
//! spread, volume and recommendation reports. The computation is pure and
//! never fails; sparse input degrades to `insufficient_data` tags.

pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod source;
pub mod utils;

pub use analyzer::{Analyzer, MarketAnalyzer, analyze, analyze_at};
pub use model::{AnalysisResult, MarketSnapshot, RawSample};
