use crate::annotation::HeartRateSample;
use crate::error::DelineationError;

/// Convert consecutive QRS onsets (ms, input order) into instantaneous heart rate samples.
///
/// Each sample keeps the onset of the later QRS of its pair. Onsets must strictly increase;
/// an equal or earlier onset would give an infinite or negative rate and is rejected.
pub fn heart_rate_samples(
    qrs_onsets_ms: &[u64],
) -> Result<Vec<HeartRateSample>, DelineationError> {
    if qrs_onsets_ms.is_empty() {
        return Err(DelineationError::NoQrs);
    }
    if qrs_onsets_ms.len() < 2 {
        return Err(DelineationError::InsufficientIntervals);
    }
    qrs_onsets_ms
        .windows(2)
        .map(|w| {
            let (previous_ms, current_ms) = (w[0], w[1]);
            if current_ms <= previous_ms {
                return Err(DelineationError::NonIncreasingOnset {
                    previous_ms,
                    current_ms,
                });
            }
            let interval_s = (current_ms - previous_ms) as f64 / 1000.0;
            Ok(HeartRateSample {
                onset_ms: current_ms,
                rate_bpm: 60.0 / interval_s,
            })
        })
        .collect()
}
