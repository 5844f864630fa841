use crate::model::{DataStatus, NormalizedSample, Report, VolumeReport, VolumeTrend};
use crate::utils::round2;

/// Trailing samples that make up the "recent" week.
pub const RECENT_WINDOW: usize = 7;

/// Traded volume totals and whether the last week runs above or below the overall average.
///
/// The recent average always divides by [`RECENT_WINDOW`], so a history shorter
/// than a week reads as a partial week rather than being rescaled.
pub fn analyze_volume(series: &[NormalizedSample]) -> Report<VolumeReport> {
    if series.is_empty() {
        return Report::insufficient();
    }

    let volumes: Vec<f64> = series.iter().map(|s| s.volume).filter(|v| *v > 0.0).collect();
    if volumes.is_empty() {
        return Report::Unavailable {
            status: DataStatus::NoVolumeData,
        };
    }

    let total: f64 = volumes.iter().sum();
    let average = total / volumes.len() as f64;
    let tail = &volumes[volumes.len().saturating_sub(RECENT_WINDOW)..];
    let recent_average = tail.iter().sum::<f64>() / RECENT_WINDOW as f64;

    Report::Ready(VolumeReport {
        total,
        average: round2(average),
        recent_average: round2(recent_average),
        trend: classify_volume_trend(recent_average, average),
    })
}

pub fn classify_volume_trend(recent_average: f64, average: f64) -> VolumeTrend {
    if recent_average > average * 1.2 {
        VolumeTrend::Increasing
    } else if recent_average < average * 0.8 {
        VolumeTrend::Decreasing
    } else {
        VolumeTrend::Stable
    }
}
