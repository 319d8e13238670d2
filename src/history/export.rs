//! History export (JSON and CSV)

use super::entry::HistoryEntry;
use crate::comparator::Direction;
use crate::error::{RateGapError, Result};
use serde::Serialize;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Parse from a name or file extension
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(RateGapError::InvalidData(format!(
                "Unknown export format: {}",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    created_at: String,
    rate_as_of: &'a str,
    krw_amount: f64,
    usd_amount: f64,
    effective_rate: f64,
    published_rate: f64,
    delta_pct: f64,
    impact_usd: f64,
    direction: &'static str,
}

/// Pretty-printed JSON array
pub fn export_json(entries: &[HistoryEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// CSV with a header row, one line per entry, plus the derived impact and direction
pub fn export_csv(entries: &[HistoryEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for entry in entries {
        writer.serialize(CsvRow {
            id: &entry.id,
            created_at: entry.created_at.to_rfc3339(),
            rate_as_of: &entry.rate_as_of,
            krw_amount: entry.krw_amount,
            usd_amount: entry.usd_amount,
            effective_rate: entry.effective_rate,
            published_rate: entry.published_rate,
            delta_pct: entry.delta_pct,
            impact_usd: entry.impact_usd(),
            direction: match entry.direction() {
                Direction::Lost => "lost",
                Direction::Gained => "gained",
            },
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RateGapError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| RateGapError::InvalidData(e.to_string()))
}

/// Export in the requested format
pub fn export(entries: &[HistoryEntry], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_json(entries),
        ExportFormat::Csv => export_csv(entries),
    }
}
