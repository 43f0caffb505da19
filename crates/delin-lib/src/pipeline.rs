use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    annotation::WaveKind,
    error::DelineationError,
    io::records::{parse_annotations_with, MIN_FIELDS},
    metrics::{extrema::locate_extrema, premature::count_marked, rate::heart_rate_samples},
    tags::PREMATURE_MARKER,
};

/// Wall-clock format for the reference start time and the reported extremum times.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tunable parameters for the delineation summary pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Substring in the merged tags that marks a premature beat (case-sensitive).
    pub premature_marker: String,
    /// Rows with fewer columns than this are skipped.
    pub min_fields: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            premature_marker: PREMATURE_MARKER.to_string(),
            min_fields: MIN_FIELDS,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing pipeline config")
    }

    pub fn from_toml_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}

/// Summary statistics of one annotation payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisResult {
    pub premature_p_count: usize,
    pub premature_qrs_count: usize,
    pub mean_rate_bpm: f64,
    pub min_rate_bpm: f64,
    pub min_rate_time: NaiveDateTime,
    pub max_rate_bpm: f64,
    pub max_rate_time: NaiveDateTime,
}

/// Wire form of [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelineationReport {
    #[serde(rename = "Premature P Count")]
    pub premature_p_count: usize,
    #[serde(rename = "Premature QRS Count")]
    pub premature_qrs_count: usize,
    #[serde(rename = "Mean Heart Rate (bpm)")]
    pub mean_heart_rate: f64,
    #[serde(rename = "Min Heart Rate (bpm)")]
    pub min_heart_rate: f64,
    #[serde(rename = "Min Heart Rate Time")]
    pub min_heart_rate_time: String,
    #[serde(rename = "Max Heart Rate (bpm)")]
    pub max_heart_rate: f64,
    #[serde(rename = "Max Heart Rate Time")]
    pub max_heart_rate_time: String,
}

impl AnalysisResult {
    pub fn report(&self) -> DelineationReport {
        DelineationReport {
            premature_p_count: self.premature_p_count,
            premature_qrs_count: self.premature_qrs_count,
            mean_heart_rate: self.mean_rate_bpm,
            min_heart_rate: self.min_rate_bpm,
            min_heart_rate_time: self.min_rate_time.format(DATETIME_FORMAT).to_string(),
            max_heart_rate: self.max_rate_bpm,
            max_heart_rate_time: self.max_rate_time.format(DATETIME_FORMAT).to_string(),
        }
    }
}

/// Parse → count → rates → extrema over one fully materialized payload.
pub fn run_delineation(
    payload: &[u8],
    start: NaiveDateTime,
    cfg: &PipelineConfig,
) -> Result<AnalysisResult, DelineationError> {
    let records = parse_annotations_with(payload, cfg.min_fields)?;
    let premature_p_count = count_marked(&records.annotations, WaveKind::P, &cfg.premature_marker);
    let premature_qrs_count =
        count_marked(&records.annotations, WaveKind::Qrs, &cfg.premature_marker);

    let qrs_onsets = records.qrs_onsets();
    let samples = heart_rate_samples(&qrs_onsets)?;
    debug!(
        "{} QRS onsets -> {} heart rate samples",
        qrs_onsets.len(),
        samples.len()
    );
    let extrema = locate_extrema(&samples, start)?;

    Ok(AnalysisResult {
        premature_p_count,
        premature_qrs_count,
        mean_rate_bpm: extrema.mean_bpm,
        min_rate_bpm: extrema.min_bpm,
        min_rate_time: extrema.min_time,
        max_rate_bpm: extrema.max_bpm,
        max_rate_time: extrema.max_time,
    })
}

pub fn parse_start_datetime(value: &str) -> Result<NaiveDateTime, DelineationError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|source| {
        DelineationError::InvalidStartTime {
            value: value.to_string(),
            source,
        }
    })
}

/// Request-level entry: resolves missing input and the optional start time, then runs the pipeline.
///
/// `now` is used when no start time is given; the caller decides what "now" is.
pub fn analyze_request(
    payload: Option<&[u8]>,
    start_datetime: Option<&str>,
    now: NaiveDateTime,
    cfg: &PipelineConfig,
) -> Result<AnalysisResult, DelineationError> {
    let payload = payload.ok_or(DelineationError::MissingInput)?;
    let start = match start_datetime {
        Some(value) => parse_start_datetime(value)?,
        None => now,
    };
    run_delineation(payload, start, cfg)
}
