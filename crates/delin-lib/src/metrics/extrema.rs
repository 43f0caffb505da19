use chrono::{NaiveDateTime, TimeDelta};

use crate::annotation::HeartRateSample;
use crate::error::DelineationError;

/// Mean rate plus the slowest and fastest beats, anchored to wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateExtrema {
    pub mean_bpm: f64,
    pub min_bpm: f64,
    pub min_time: NaiveDateTime,
    pub max_bpm: f64,
    pub max_time: NaiveDateTime,
}

pub fn locate_extrema(
    samples: &[HeartRateSample],
    start: NaiveDateTime,
) -> Result<RateExtrema, DelineationError> {
    let first = samples
        .first()
        .ok_or(DelineationError::InsufficientIntervals)?;
    let mut min = first;
    let mut max = first;
    let mut sum = 0.0;
    for sample in samples {
        // strict comparisons: ties keep the earliest sample
        if sample.rate_bpm < min.rate_bpm {
            min = sample;
        }
        if sample.rate_bpm > max.rate_bpm {
            max = sample;
        }
        sum += sample.rate_bpm;
    }
    Ok(RateExtrema {
        mean_bpm: sum / samples.len() as f64,
        min_bpm: min.rate_bpm,
        min_time: onset_to_datetime(start, min.onset_ms)?,
        max_bpm: max.rate_bpm,
        max_time: onset_to_datetime(start, max.onset_ms)?,
    })
}

/// Absolute time of an onset. Millisecond precision is kept.
pub fn onset_to_datetime(
    start: NaiveDateTime,
    onset_ms: u64,
) -> Result<NaiveDateTime, DelineationError> {
    i64::try_from(onset_ms)
        .ok()
        .and_then(TimeDelta::try_milliseconds)
        .and_then(|offset| start.checked_add_signed(offset))
        .ok_or(DelineationError::TimestampMapping)
}
