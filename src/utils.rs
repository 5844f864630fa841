// Utility functions
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

/// Parses a history timestamp into `DateTime<Utc>`, if possible.
///
/// Accepts RFC 3339, a plain `YYYY-MM-DD HH:MM:SS` (read as UTC) and the
/// marketplace history format `"Mar 05 2024 01: +0"`, where the trailing
/// part is the UTC offset in whole hours.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    let text = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    parse_market_hour(text)
}

fn parse_market_hour(text: &str) -> Option<DateTime<Utc>> {
    let (head, offset) = text.split_once(':')?;
    let offset_hours: i64 = offset.trim().trim_start_matches('+').parse().ok()?;
    let naive = NaiveDateTime::parse_from_str(&format!("{} 00", head.trim()), "%b %d %Y %H %M").ok()?;
    let offset = TimeDelta::try_hours(offset_hours)?;
    Some(naive.checked_sub_signed(offset)?.and_utc())
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_market_history_format() {
        let dt = parse_datetime("Mar 05 2024 01: +0").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 1, 0, 0).unwrap());
    }

    #[test]
    fn market_format_applies_offset() {
        let dt = parse_datetime("Mar 05 2024 03: +2").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 1, 0, 0).unwrap());
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(parse_datetime("Mar 05 2024 01: +99999999999999").is_none());
        assert!(parse_datetime("Mar 05 2024 01: -9223372036854775807").is_none());
        assert!(parse_datetime("Mar 05 2024 01: +9999999999").is_none());
    }

    #[test]
    fn parses_rfc3339() {
        let dt = parse_datetime("2024-03-05T01:00:00+00:00").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_709_600_400_000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("yesterday").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(20.0), 20.0);
        assert_eq!(round2(-19.999), -20.0);
        assert_eq!(round2(1.234), 1.23);
    }
}
