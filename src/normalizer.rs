use crate::model::{NormalizedSample, RawSample};
use tracing::debug;

/// Validates raw history entries and sorts them by time.
///
/// Entries without a positive price or a convertible, non-negative timestamp
/// are dropped. Equal timestamps keep their input order.
pub fn normalize(raw: Option<&[RawSample]>) -> Vec<NormalizedSample> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut samples: Vec<NormalizedSample> = raw.iter().filter_map(normalize_sample).collect();
    samples.sort_by_key(|s| s.timestamp_ms);

    if samples.len() < raw.len() {
        debug!("Dropped {} of {} history entries", raw.len() - samples.len(), raw.len());
    }

    samples
}

fn normalize_sample(raw: &RawSample) -> Option<NormalizedSample> {
    let price = raw.price.filter(|p| *p > 0.0)?;
    let timestamp_ms = raw.timestamp.as_ref()?.to_millis().filter(|ms| *ms >= 0)?;
    let volume = raw.volume.filter(|v| *v > 0.0).unwrap_or(0.0);

    Some(NormalizedSample {
        timestamp_ms,
        price,
        volume,
    })
}
