use serde::{Deserialize, Serialize};

/// Wave family of a delineated feature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WaveKind {
    P,
    Qrs,
    Other,
}

impl WaveKind {
    /// Map the literal label column. Only `P` and `QRS` are recognised; matching is case-sensitive.
    pub fn from_label(label: &str) -> Self {
        match label {
            "P" => WaveKind::P,
            "QRS" => WaveKind::Qrs,
            _ => WaveKind::Other,
        }
    }
}

/// One labeled waveform interval (onset/offset in ms relative to recording start).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaveAnnotation {
    pub kind: WaveKind,
    pub onset_ms: u64,
    pub offset_ms: u64,
    /// Normalized tag string, see [`crate::tags::merge_tags`].
    pub tags: String,
}

impl WaveAnnotation {
    pub fn is_qrs(&self) -> bool {
        self.kind == WaveKind::Qrs
    }

    /// Individual tags, in column order, without empty entries.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.split(',').filter(|t| !t.is_empty()).collect()
    }
}

/// Instantaneous heart rate at the QRS onset that closes an RR interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HeartRateSample {
    pub onset_ms: u64,
    pub rate_bpm: f64,
}

/// Parser output: the typed annotations plus how many rows were dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub annotations: Vec<WaveAnnotation>,
    pub skipped_rows: usize,
}

impl ParsedRecords {
    pub fn len(&self) -> usize {
        self.annotations.len()
    }
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
    pub fn count_kind(&self, kind: WaveKind) -> usize {
        self.annotations.iter().filter(|a| a.kind == kind).count()
    }

    /// QRS onsets in input order (not re-sorted).
    pub fn qrs_onsets(&self) -> Vec<u64> {
        self.annotations
            .iter()
            .filter(|a| a.is_qrs())
            .map(|a| a.onset_ms)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(kind: WaveKind, onset_ms: u64, tags: &str) -> WaveAnnotation {
        WaveAnnotation {
            kind,
            onset_ms,
            offset_ms: onset_ms + 80,
            tags: tags.to_string(),
        }
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(WaveKind::from_label("P"), WaveKind::P);
        assert_eq!(WaveKind::from_label("QRS"), WaveKind::Qrs);
        assert_eq!(WaveKind::from_label("qrs"), WaveKind::Other);
        assert_eq!(WaveKind::from_label("T"), WaveKind::Other);
        assert_eq!(WaveKind::from_label(" P"), WaveKind::Other);
    }

    #[test]
    fn qrs_onsets_keep_input_order() {
        let records = ParsedRecords {
            annotations: vec![
                ann(WaveKind::Qrs, 900, ""),
                ann(WaveKind::P, 750, ""),
                ann(WaveKind::Qrs, 100, ""),
                ann(WaveKind::Other, 1200, ""),
            ],
            skipped_rows: 0,
        };
        assert_eq!(records.qrs_onsets(), vec![900, 100]);
        assert_eq!(records.count_kind(WaveKind::Other), 1);
    }

    #[test]
    fn tag_list_drops_empty_entries() {
        let a = ann(WaveKind::P, 0, "premature,noisy");
        assert_eq!(a.tag_list(), vec!["premature", "noisy"]);
        assert!(ann(WaveKind::P, 0, "").tag_list().is_empty());
    }
}
