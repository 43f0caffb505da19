use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use std::path::Path;

use crate::annotation::{ParsedRecords, WaveAnnotation, WaveKind};
use crate::error::DelineationError;
use crate::tags::merge_tags;

/// Columns consumed from each row: kind, onset, offset, tag1, tag2. Anything after is ignored.
pub const MIN_FIELDS: usize = 5;

/// Parse a headerless delimited payload into annotations, dropping malformed rows.
///
/// Only a tokenizer failure (invalid UTF-8, I/O) aborts the batch.
pub fn parse_annotations(payload: &[u8]) -> Result<ParsedRecords, DelineationError> {
    parse_annotations_with(payload, MIN_FIELDS)
}

/// Same as [`parse_annotations`] with a configurable minimum column count.
pub fn parse_annotations_with(
    payload: &[u8],
    min_fields: usize,
) -> Result<ParsedRecords, DelineationError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(payload);
    let mut out = ParsedRecords::default();
    for result in reader.records() {
        let record = result.map_err(DelineationError::Parse)?;
        match annotation_from_record(&record, min_fields) {
            Some(annotation) => out.annotations.push(annotation),
            None => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                warn!("skipping malformed row at line {}: {:?}", line, record);
                out.skipped_rows += 1;
            }
        }
    }
    debug!(
        "parsed {} annotations ({} skipped)",
        out.len(),
        out.skipped_rows
    );
    Ok(out)
}

/// The single place where a row is judged usable.
fn annotation_from_record(record: &StringRecord, min_fields: usize) -> Option<WaveAnnotation> {
    if record.len() < min_fields.max(3) {
        return None;
    }
    let onset_ms = record.get(1)?.trim().parse::<u64>().ok()?;
    let offset_ms = record.get(2)?.trim().parse::<u64>().ok()?;
    let tag1 = record.get(3).unwrap_or("");
    let tag2 = record.get(4).unwrap_or("");
    Some(WaveAnnotation {
        kind: WaveKind::from_label(record.get(0)?),
        onset_ms,
        offset_ms,
        tags: merge_tags(tag1, tag2),
    })
}

/// Read a whole annotation file into memory.
pub fn read_payload(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
