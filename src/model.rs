// Core structs: snapshot input, normalized samples and analysis reports
use crate::utils::parse_datetime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Timestamp as it appears in a raw price history entry.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampLike {
    Millis(i64),
    Text(String),
}

impl TimestampLike {
    /// Converts to epoch milliseconds, if the value names a representable instant.
    pub fn to_millis(&self) -> Option<i64> {
        match self {
            TimestampLike::Millis(ms) => Some(*ms),
            TimestampLike::Text(text) => parse_datetime(text).map(|dt| dt.timestamp_millis()),
        }
    }
}

/// One price history entry as received: `[timestampLike, price, volume?]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawSample {
    pub timestamp: Option<TimestampLike>,
    pub price: Option<f64>,
    pub volume: Option<f64>,
}

impl RawSample {
    pub fn new(timestamp: TimestampLike, price: f64, volume: Option<f64>) -> Self {
        Self {
            timestamp: Some(timestamp),
            price: Some(price),
            volume,
        }
    }

    pub fn at_millis(timestamp_ms: i64, price: f64) -> Self {
        Self::new(TimestampLike::Millis(timestamp_ms), price, None)
    }
}

impl From<Value> for RawSample {
    fn from(value: Value) -> Self {
        let fields = match value {
            Value::Array(fields) if fields.len() >= 2 => fields,
            _ => {
                return Self {
                    timestamp: None,
                    price: None,
                    volume: None,
                };
            }
        };

        let timestamp = match &fields[0] {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .map(TimestampLike::Millis),
            Value::String(s) => Some(TimestampLike::Text(s.clone())),
            _ => None,
        };

        Self {
            timestamp,
            price: numeric_field(&fields[1]),
            volume: fields.get(2).and_then(numeric_field),
        }
    }
}

/// Numbers pass through, numeric strings ("12", "0.35") are parsed, anything else is missing.
fn numeric_field(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

/// A validated history point. Prices are always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSample {
    pub timestamp_ms: i64,
    pub price: f64,
    pub volume: f64,
}

/// Everything the extraction side knows about one commodity listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketSnapshot {
    pub name: String,
    pub sale_price: f64,
    pub request_price: f64,
    pub sale_count: i64,
    pub request_count: i64,
    #[serde(deserialize_with = "lenient_series")]
    pub price_series: Option<Vec<RawSample>>,
}

/// A series that is not a JSON array is treated as absent instead of failing the whole snapshot.
fn lenient_series<'de, D>(deserializer: D) -> Result<Option<Vec<RawSample>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items.into_iter().map(RawSample::from).collect()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    StrongBearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityLevel {
    Extreme,
    High,
    Moderate,
    Low,
    VeryLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryHigh,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    Stable,
    Increasing,
    Decreasing,
}

/// Why a report carries no figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    InsufficientData,
    NoVolumeData,
}

/// Either a fully computed report or a bare status tag, never something in between.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report<T> {
    Ready(T),
    Unavailable { status: DataStatus },
}

impl<T> Report<T> {
    pub fn insufficient() -> Self {
        Report::Unavailable {
            status: DataStatus::InsufficientData,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Report::Ready(report) => Some(report),
            Report::Unavailable { .. } => None,
        }
    }

    pub fn status(&self) -> Option<DataStatus> {
        match self {
            Report::Ready(_) => None,
            Report::Unavailable { status } => Some(*status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTrend {
    pub trend_percent: f64,
    pub direction: TrendDirection,
    pub confidence: f64,
    pub sample_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallTrend {
    pub trend_percent: f64,
    pub direction: TrendDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub last24h: PeriodTrend,
    pub last7d: PeriodTrend,
    pub last30d: PeriodTrend,
    pub overall: OverallTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityReport {
    pub daily_volatility_percent: f64,
    pub classification: VolatilityLevel,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadReport {
    pub absolute: f64,
    pub percent: f64,
    pub liquidity: i64,
    pub opportunity: OpportunityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeReport {
    pub total: f64,
    pub average: f64,
    pub recent_average: f64,
    pub trend: VolumeTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Arbitrage,
    Caution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalConfidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Immediate,
    ShortTerm,
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub action: Action,
    pub confidence: SignalConfidence,
    pub reason: String,
    pub timeframe: Timeframe,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport {
    pub items: Vec<Recommendation>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub current_price: f64,
    pub timestamp: i64,
    pub trends: Report<TrendReport>,
    pub volatility: Report<VolatilityReport>,
    pub spread_analysis: Report<SpreadReport>,
    pub volume_analysis: Report<VolumeReport>,
    pub recommendations: RecommendationReport,
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector `{0}`")]
    Selector(String),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to extract snapshot from page: {0}")]
    Parse(#[from] ParserError),
}
