//! JSON match report.
//!
//! The report lists every duplicate with the small-schema field whose value
//! triggered the match, so whoever checks the exported CSV can highlight
//! that cell.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use dedup_model::{ClassifiedRecord, DatasetSchemas, DedupReport, MatchMethod, MethodCounts};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

pub const REPORT_FILE: &str = "match_report.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub threshold: f64,
    pub summary: ReportSummary,
    pub matches: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub duplicates: usize,
    pub non_duplicates: usize,
    pub skipped_blank_names: usize,
    pub methods: MethodCounts,
}

/// One duplicate. Row numbers are 1-based data rows, header excluded.
///
/// `trigger_field` is omitted when the small list has no column of that name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub row: usize,
    pub method: MatchMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_field: Option<String>,
    pub master_row: usize,
    pub matched_customer_id: String,
    pub matched_full_name: String,
}

impl ReportEntry {
    fn from_classified(duplicate: &ClassifiedRecord, schemas: &DatasetSchemas) -> Option<Self> {
        let method = duplicate.result.method()?;
        let master_row = duplicate.result.master_row()?;
        Some(Self {
            row: duplicate.row + 1,
            method,
            score: duplicate.result.score(),
            trigger_field: method
                .trigger_field(&schemas.small)
                .filter(|field| duplicate.record.contains(field))
                .map(str::to_string),
            master_row: master_row + 1,
            matched_customer_id: duplicate.matched_customer_id.clone(),
            matched_full_name: duplicate.matched_full_name.clone(),
        })
    }
}

impl MatchReport {
    pub fn build(report: &DedupReport, schemas: &DatasetSchemas, threshold: f64) -> Self {
        Self {
            threshold,
            summary: ReportSummary {
                total: report.total,
                duplicates: report.duplicates.len(),
                non_duplicates: report.non_duplicates.len(),
                skipped_blank_names: report.skipped_blank_names,
                methods: report.method_counts(),
            },
            matches: report
                .duplicates
                .iter()
                .filter_map(|duplicate| ReportEntry::from_classified(duplicate, schemas))
                .collect(),
        }
    }
}

/// Serialize `report` as pretty JSON to `writer`; `path` labels errors.
pub fn render_match_report<W: Write>(mut writer: W, report: &MatchReport, path: &Path) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })
}

pub fn write_match_report(path: &Path, report: &MatchReport) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    render_match_report(BufWriter::new(file), report, path)?;
    info!(path = %path.display(), matches = report.matches.len(), "wrote match report");
    Ok(())
}
