use crate::annotation::{WaveAnnotation, WaveKind};
use crate::tags::{has_marker, PREMATURE_MARKER};

/// Number of annotations of `kind` whose tags carry the premature marker.
pub fn count_premature(annotations: &[WaveAnnotation], kind: WaveKind) -> usize {
    count_marked(annotations, kind, PREMATURE_MARKER)
}

pub fn count_marked(annotations: &[WaveAnnotation], kind: WaveKind, marker: &str) -> usize {
    annotations
        .iter()
        .filter(|a| a.kind == kind && has_marker(&a.tags, marker))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(kind: WaveKind, tags: &str) -> WaveAnnotation {
        WaveAnnotation {
            kind,
            onset_ms: 0,
            offset_ms: 0,
            tags: tags.to_string(),
        }
    }

    #[test]
    fn counts_only_matching_kind() {
        let annotations = vec![
            ann(WaveKind::P, "premature"),
            ann(WaveKind::P, "noisy"),
            ann(WaveKind::Qrs, ""),
            ann(WaveKind::Qrs, "noisy,premature"),
            ann(WaveKind::Other, "premature"),
        ];
        assert_eq!(count_premature(&annotations, WaveKind::P), 1);
        assert_eq!(count_premature(&annotations, WaveKind::Qrs), 1);
        assert_eq!(count_premature(&annotations, WaveKind::Other), 1);
    }

    #[test]
    fn never_exceeds_kind_total() {
        let annotations: Vec<_> = (0..10)
            .map(|i| {
                let kind = if i % 3 == 0 { WaveKind::P } else { WaveKind::Qrs };
                ann(kind, if i % 2 == 0 { "premature" } else { "" })
            })
            .collect();
        for kind in [WaveKind::P, WaveKind::Qrs] {
            let total = annotations.iter().filter(|a| a.kind == kind).count();
            assert!(count_premature(&annotations, kind) <= total);
        }
    }

    #[test]
    fn empty_input_counts_zero() {
        assert_eq!(count_premature(&[], WaveKind::P), 0);
    }
}
