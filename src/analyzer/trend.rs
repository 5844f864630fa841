use crate::model::{MarketSnapshot, NormalizedSample, OverallTrend, PeriodTrend, TrendDirection, TrendReport};
use crate::utils::round2;

pub const MILLIS_IN_DAY: i64 = 24 * 60 * 60 * 1000;

/// Points needed before a period trend reaches full confidence.
const FULL_CONFIDENCE_SAMPLES: f64 = 10.0;

/// Sale price from the order book first, then the latest history price.
pub fn current_price(snapshot: &MarketSnapshot, series: &[NormalizedSample]) -> f64 {
    if snapshot.sale_price > 0.0 {
        return snapshot.sale_price;
    }
    series.last().map(|s| s.price).unwrap_or(0.0)
}

/// Trends over the trailing 24h, 7d and 30d windows ending at `now_ms`, plus the whole series.
pub fn analyze_trends(series: &[NormalizedSample], now_ms: i64) -> TrendReport {
    TrendReport {
        last24h: period_trend(series, now_ms.saturating_sub(MILLIS_IN_DAY)),
        last7d: period_trend(series, now_ms.saturating_sub(7 * MILLIS_IN_DAY)),
        last30d: period_trend(series, now_ms.saturating_sub(30 * MILLIS_IN_DAY)),
        overall: overall_trend(series),
    }
}

/// Percentage change between the first and last samples at or after `since_ms`.
pub fn period_trend(series: &[NormalizedSample], since_ms: i64) -> PeriodTrend {
    let window: Vec<&NormalizedSample> = series.iter().filter(|s| s.timestamp_ms >= since_ms).collect();

    let (first, last) = match (window.first(), window.last()) {
        (Some(first), Some(last)) if window.len() >= 2 => (first, last),
        _ => {
            return PeriodTrend {
                trend_percent: 0.0,
                direction: TrendDirection::Neutral,
                confidence: 0.0,
                sample_count: window.len(),
            };
        }
    };

    let change = percent_change(first.price, last.price);
    PeriodTrend {
        trend_percent: round2(change),
        direction: classify_direction(change),
        confidence: (window.len() as f64 / FULL_CONFIDENCE_SAMPLES).min(1.0),
        sample_count: window.len(),
    }
}

pub fn overall_trend(series: &[NormalizedSample]) -> OverallTrend {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= 2 => (first, last),
        _ => {
            return OverallTrend {
                trend_percent: 0.0,
                direction: TrendDirection::Neutral,
                period_days: None,
            };
        }
    };

    let change = percent_change(first.price, last.price);
    OverallTrend {
        trend_percent: round2(change),
        direction: classify_direction(change),
        period_days: Some((last.timestamp_ms - first.timestamp_ms).div_euclid(MILLIS_IN_DAY)),
    }
}

/// Boundaries belong to the weaker bucket: exactly 10% is bullish, exactly -3% is bearish.
pub fn classify_direction(trend_percent: f64) -> TrendDirection {
    if trend_percent > 10.0 {
        TrendDirection::StrongBullish
    } else if trend_percent > 3.0 {
        TrendDirection::Bullish
    } else if trend_percent > -3.0 {
        TrendDirection::Neutral
    } else if trend_percent > -10.0 {
        TrendDirection::Bearish
    } else {
        TrendDirection::StrongBearish
    }
}

fn percent_change(start: f64, end: f64) -> f64 {
    let change = (end - start) / start * 100.0;
    if start <= 0.0 || !change.is_finite() {
        return 0.0;
    }
    change
}
