// Analyzer module: aggregates submodules for the different aspects of market analysis.

pub mod recommendation;
pub mod spread;
pub mod trend;
pub mod volatility;
pub mod volume;

use crate::model::{AnalysisResult, MarketSnapshot, Report};
use crate::normalizer::normalize;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Trait defining the interface for a market snapshot analyzer.
pub trait Analyzer {
    /// Analyzes a snapshot against an explicit wall-clock instant.
    fn analyze_at(&self, snapshot: Option<&MarketSnapshot>, now: DateTime<Utc>) -> AnalysisResult;

    fn analyze(&self, snapshot: Option<&MarketSnapshot>) -> AnalysisResult {
        self.analyze_at(snapshot, Utc::now())
    }
}

/// Stateless implementation; one instance can serve any number of threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarketAnalyzer;

impl MarketAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for MarketAnalyzer {
    fn analyze_at(&self, snapshot: Option<&MarketSnapshot>, now: DateTime<Utc>) -> AnalysisResult {
        analyze_at(snapshot, now)
    }
}

/// Analyzes a snapshot at the current time.
pub fn analyze(snapshot: Option<&MarketSnapshot>) -> AnalysisResult {
    analyze_at(snapshot, Utc::now())
}

/// Builds the full analysis. The trend windows are anchored to `now`, which is
/// also stamped on the result, so identical inputs give identical output.
pub fn analyze_at(snapshot: Option<&MarketSnapshot>, now: DateTime<Utc>) -> AnalysisResult {
    let now_ms = now.timestamp_millis();

    let Some(snapshot) = snapshot.filter(|s| s.price_series.as_ref().is_some_and(|series| !series.is_empty()))
    else {
        debug!("No price history, returning empty analysis");
        return empty_analysis(now_ms);
    };

    let series = normalize(snapshot.price_series.as_deref());
    debug!("Analyzing '{}' over {} normalized samples", snapshot.name, series.len());

    let trends = trend::analyze_trends(&series, now_ms);
    let volatility = volatility::analyze_volatility(&series);
    let spread = spread::analyze_spread(snapshot);
    let volume = volume::analyze_volume(&series);
    let recommendations = recommendation::generate_recommendations(&trends, &spread, &volatility);

    if let Some(status) = volatility.status() {
        debug!("Volatility unavailable: {:?}", status);
    }
    if let Some(status) = volume.status() {
        debug!("Volume unavailable: {:?}", status);
    }

    AnalysisResult {
        current_price: trend::current_price(snapshot, &series),
        timestamp: now_ms,
        trends: Report::Ready(trends),
        volatility,
        spread_analysis: Report::Ready(spread),
        volume_analysis: volume,
        recommendations,
    }
}

/// Canonical result for a missing snapshot or an empty history.
pub fn empty_analysis(timestamp: i64) -> AnalysisResult {
    AnalysisResult {
        current_price: 0.0,
        timestamp,
        trends: Report::insufficient(),
        volatility: Report::insufficient(),
        spread_analysis: Report::insufficient(),
        volume_analysis: Report::insufficient(),
        recommendations: recommendation::insufficient_data(),
    }
}
