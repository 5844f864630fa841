use crate::model::{MarketSnapshot, OpportunityLevel, SpreadReport};
use crate::utils::round2;

/// Gap between the lowest sell listing and the highest buy order.
/// Uses the order book scalars only; the price history is not consulted.
pub fn analyze_spread(snapshot: &MarketSnapshot) -> SpreadReport {
    let spread = snapshot.sale_price - snapshot.request_price;
    let spread_percent = Some(spread / snapshot.request_price * 100.0)
        .filter(|p| snapshot.request_price > 0.0 && p.is_finite())
        .unwrap_or(0.0);

    SpreadReport {
        absolute: spread,
        percent: round2(spread_percent),
        liquidity: snapshot.sale_count.saturating_add(snapshot.request_count),
        opportunity: assess_opportunity(spread_percent),
    }
}

pub fn assess_opportunity(spread_percent: f64) -> OpportunityLevel {
    if spread_percent > 15.0 {
        OpportunityLevel::Excellent
    } else if spread_percent > 10.0 {
        OpportunityLevel::Good
    } else if spread_percent > 5.0 {
        OpportunityLevel::Fair
    } else {
        OpportunityLevel::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(sale_price: f64, request_price: f64) -> MarketSnapshot {
        MarketSnapshot {
            sale_price,
            request_price,
            sale_count: 120,
            request_count: 45,
            ..Default::default()
        }
    }

    #[test]
    fn wide_spread_is_excellent() {
        let report = analyze_spread(&snapshot(80.0, 50.0));
        assert_eq!(report.absolute, 30.0);
        assert_eq!(report.percent, 60.0);
        assert_eq!(report.liquidity, 165);
        assert_eq!(report.opportunity, OpportunityLevel::Excellent);
    }

    #[test]
    fn zero_request_price_gives_zero_percent() {
        let report = analyze_spread(&snapshot(80.0, 0.0));
        assert_eq!(report.absolute, 80.0);
        assert_eq!(report.percent, 0.0);
        assert_eq!(report.opportunity, OpportunityLevel::Poor);
    }

    #[test]
    fn inverted_book_is_poor() {
        let report = analyze_spread(&snapshot(9.0, 10.0));
        assert_eq!(report.percent, -10.0);
        assert_eq!(report.opportunity, OpportunityLevel::Poor);
    }

    #[test]
    fn liquidity_saturates_on_huge_counts() {
        let mut input = snapshot(80.0, 50.0);
        input.sale_count = i64::MAX;
        input.request_count = 1;
        assert_eq!(analyze_spread(&input).liquidity, i64::MAX);

        input.sale_count = i64::MIN;
        input.request_count = -1;
        assert_eq!(analyze_spread(&input).liquidity, i64::MIN);
    }

    #[test]
    fn tiny_request_price_does_not_overflow_percent() {
        let report = analyze_spread(&snapshot(1.0e300, 1.0e-300));
        assert_eq!(report.percent, 0.0);
        assert_eq!(report.opportunity, OpportunityLevel::Poor);
    }

    #[test]
    fn opportunity_thresholds() {
        assert_eq!(assess_opportunity(15.0), OpportunityLevel::Good);
        assert_eq!(assess_opportunity(10.0), OpportunityLevel::Fair);
        assert_eq!(assess_opportunity(5.0), OpportunityLevel::Poor);
        assert_eq!(assess_opportunity(5.5), OpportunityLevel::Fair);
    }
}
