use crate::model::{NormalizedSample, Report, RiskLevel, VolatilityLevel, VolatilityReport};

pub const MIN_SAMPLES: usize = 5;

/// Dispersion of consecutive simple returns, as a percentage.
pub fn analyze_volatility(series: &[NormalizedSample]) -> Report<VolatilityReport> {
    if series.len() < MIN_SAMPLES {
        return Report::insufficient();
    }

    let prices: Vec<f64> = series.iter().map(|s| s.price).collect();
    let volatility = population_std_dev(&simple_returns(&prices)) * 100.0;

    Report::Ready(VolatilityReport {
        daily_volatility_percent: volatility,
        classification: classify_volatility(volatility),
        risk_level: assess_risk(volatility),
    })
}

/// `(p[i] - p[i-1]) / p[i-1]`; a zero base yields a zero return.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

/// Standard deviation dividing by N, not N - 1.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    variance.sqrt()
}

pub fn classify_volatility(volatility: f64) -> VolatilityLevel {
    if volatility > 8.0 {
        VolatilityLevel::Extreme
    } else if volatility > 5.0 {
        VolatilityLevel::High
    } else if volatility > 3.0 {
        VolatilityLevel::Moderate
    } else if volatility > 1.0 {
        VolatilityLevel::Low
    } else {
        VolatilityLevel::VeryLow
    }
}

pub fn assess_risk(volatility: f64) -> RiskLevel {
    if volatility > 8.0 {
        RiskLevel::VeryHigh
    } else if volatility > 5.0 {
        RiskLevel::High
    } else if volatility > 3.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataStatus;

    fn series_from_prices(prices: &[f64]) -> Vec<NormalizedSample> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| NormalizedSample {
                timestamp_ms: i as i64 * 1000,
                price,
                volume: 0.0,
            })
            .collect()
    }

    #[test]
    fn population_std_dev_of_known_returns() {
        let returns = [0.02, -0.01, 0.03, -0.02, 0.01];
        // mean 0.006, squared deviations sum 0.00172, / 5 = 0.000344
        let expected = 0.000344_f64.sqrt();
        assert!((population_std_dev(&returns) - expected).abs() < 1e-12);
        assert_eq!(classify_volatility(expected * 100.0), VolatilityLevel::Low);
        assert_eq!(assess_risk(expected * 100.0), RiskLevel::Low);
    }

    #[test]
    fn four_samples_are_not_enough() {
        let report = analyze_volatility(&series_from_prices(&[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(report.status(), Some(DataStatus::InsufficientData));
    }

    #[test]
    fn flat_prices_are_very_low() {
        let report = analyze_volatility(&series_from_prices(&[5.0; 6]));
        let report = report.ready().unwrap();
        assert_eq!(report.daily_volatility_percent, 0.0);
        assert_eq!(report.classification, VolatilityLevel::VeryLow);
        assert_eq!(report.risk_level, RiskLevel::Low);
    }

    #[test]
    fn swinging_prices_are_extreme() {
        let report = analyze_volatility(&series_from_prices(&[10.0, 15.0, 9.0, 14.0, 8.0]));
        let report = report.ready().unwrap();
        assert!(report.daily_volatility_percent > 8.0);
        assert_eq!(report.classification, VolatilityLevel::Extreme);
        assert_eq!(report.risk_level, RiskLevel::VeryHigh);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(classify_volatility(8.0), VolatilityLevel::High);
        assert_eq!(classify_volatility(5.0), VolatilityLevel::Moderate);
        assert_eq!(classify_volatility(3.0), VolatilityLevel::Low);
        assert_eq!(classify_volatility(1.0), VolatilityLevel::VeryLow);
        assert_eq!(assess_risk(8.0), RiskLevel::High);
        assert_eq!(assess_risk(5.0), RiskLevel::Medium);
        assert_eq!(assess_risk(3.0), RiskLevel::Low);
    }
}
