use crate::model::{
    Action, OpportunityLevel, Recommendation, RecommendationReport, Report, RiskLevel, SignalConfidence, SpreadReport,
    Timeframe, TrendDirection, TrendReport, VolatilityReport,
};

pub const INSUFFICIENT_DATA_SUMMARY: &str = "Insufficient data for analysis";
pub const NO_RECOMMENDATIONS_SUMMARY: &str = "No active recommendations";
pub const HIGH_RISK_SUMMARY: &str = "Caution: high risk";
pub const BUY_SUMMARY: &str = "Buy signals prevail";
pub const SELL_SUMMARY: &str = "Sell signals prevail";
pub const MIXED_SUMMARY: &str = "Mixed signals";

/// Runs the rule list in order; each rule adds at most one recommendation.
pub fn generate_recommendations(
    trends: &TrendReport,
    spread: &SpreadReport,
    volatility: &Report<VolatilityReport>,
) -> RecommendationReport {
    let mut items = Vec::new();

    match trends.last7d.direction {
        TrendDirection::StrongBullish => items.push(Recommendation {
            action: Action::Buy,
            confidence: SignalConfidence::High,
            reason: "Strong upward trend over the last 7 days".to_string(),
            timeframe: Timeframe::ShortTerm,
        }),
        TrendDirection::StrongBearish => items.push(Recommendation {
            action: Action::Sell,
            confidence: SignalConfidence::High,
            reason: "Strong downward trend over the last 7 days".to_string(),
            timeframe: Timeframe::ShortTerm,
        }),
        _ => {}
    }

    if spread.opportunity == OpportunityLevel::Excellent {
        items.push(Recommendation {
            action: Action::Arbitrage,
            confidence: SignalConfidence::Medium,
            reason: format!("Wide spread of {}%: arbitrage opportunity", spread.percent),
            timeframe: Timeframe::Immediate,
        });
    }

    if volatility.ready().is_some_and(|v| v.risk_level == RiskLevel::VeryHigh) {
        items.push(Recommendation {
            action: Action::Caution,
            confidence: SignalConfidence::High,
            reason: "Very high volatility: elevated risk".to_string(),
            timeframe: Timeframe::All,
        });
    }

    let summary = summarize(&items).to_string();
    RecommendationReport { items, summary }
}

/// Caution outranks everything, then whichever of buy/sell is more frequent.
pub fn summarize(items: &[Recommendation]) -> &'static str {
    if items.is_empty() {
        return NO_RECOMMENDATIONS_SUMMARY;
    }

    let count = |action: Action| items.iter().filter(|r| r.action == action).count();

    if count(Action::Caution) > 0 {
        HIGH_RISK_SUMMARY
    } else if count(Action::Buy) > count(Action::Sell) {
        BUY_SUMMARY
    } else if count(Action::Sell) > count(Action::Buy) {
        SELL_SUMMARY
    } else {
        MIXED_SUMMARY
    }
}

/// Result used when there is nothing to analyze.
pub fn insufficient_data() -> RecommendationReport {
    RecommendationReport {
        items: Vec::new(),
        summary: INSUFFICIENT_DATA_SUMMARY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OverallTrend, PeriodTrend, VolatilityLevel};

    fn period(direction: TrendDirection) -> PeriodTrend {
        PeriodTrend {
            trend_percent: 0.0,
            direction,
            confidence: 1.0,
            sample_count: 10,
        }
    }

    fn trends(last7d: TrendDirection) -> TrendReport {
        TrendReport {
            last24h: period(TrendDirection::Neutral),
            last7d: period(last7d),
            last30d: period(TrendDirection::Neutral),
            overall: OverallTrend {
                trend_percent: 0.0,
                direction: TrendDirection::Neutral,
                period_days: Some(30),
            },
        }
    }

    fn spread(opportunity: OpportunityLevel) -> SpreadReport {
        SpreadReport {
            absolute: 3.0,
            percent: 20.0,
            liquidity: 10,
            opportunity,
        }
    }

    fn volatility(risk_level: RiskLevel) -> Report<VolatilityReport> {
        Report::Ready(VolatilityReport {
            daily_volatility_percent: 9.5,
            classification: VolatilityLevel::Extreme,
            risk_level,
        })
    }

    fn actions(report: &RecommendationReport) -> Vec<Action> {
        report.items.iter().map(|r| r.action).collect()
    }

    #[test]
    fn buy_and_caution_summarize_as_high_risk() {
        let report = generate_recommendations(
            &trends(TrendDirection::StrongBullish),
            &spread(OpportunityLevel::Poor),
            &volatility(RiskLevel::VeryHigh),
        );
        assert_eq!(actions(&report), vec![Action::Buy, Action::Caution]);
        assert_eq!(report.summary, HIGH_RISK_SUMMARY);
        assert_eq!(report.items[0].timeframe, Timeframe::ShortTerm);
        assert_eq!(report.items[1].timeframe, Timeframe::All);
    }

    #[test]
    fn sell_with_arbitrage_leans_sell() {
        let report = generate_recommendations(
            &trends(TrendDirection::StrongBearish),
            &spread(OpportunityLevel::Excellent),
            &volatility(RiskLevel::Low),
        );
        assert_eq!(actions(&report), vec![Action::Sell, Action::Arbitrage]);
        assert_eq!(report.summary, SELL_SUMMARY);
        assert_eq!(report.items[1].confidence, SignalConfidence::Medium);
        assert!(report.items[1].reason.contains("20%"));
    }

    #[test]
    fn arbitrage_alone_is_mixed() {
        let report = generate_recommendations(
            &trends(TrendDirection::Bullish),
            &spread(OpportunityLevel::Excellent),
            &Report::insufficient(),
        );
        assert_eq!(actions(&report), vec![Action::Arbitrage]);
        assert_eq!(report.summary, MIXED_SUMMARY);
    }

    #[test]
    fn quiet_market_has_no_recommendations() {
        let report = generate_recommendations(
            &trends(TrendDirection::Neutral),
            &spread(OpportunityLevel::Good),
            &volatility(RiskLevel::High),
        );
        assert!(report.items.is_empty());
        assert_eq!(report.summary, NO_RECOMMENDATIONS_SUMMARY);
    }

    #[test]
    fn buy_alone_leans_buy() {
        let report = generate_recommendations(
            &trends(TrendDirection::StrongBullish),
            &spread(OpportunityLevel::Fair),
            &Report::insufficient(),
        );
        assert_eq!(report.summary, BUY_SUMMARY);
    }
}
