//! CSV export of classified records.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use dedup_model::{DatasetSchemas, DedupReport, Record, Role};

use crate::common::{ensure_dir, ensure_parent_dir};
use crate::error::{OutputError, Result};

pub const DUPLICATES_FILE: &str = "duplicates.csv";
pub const NON_DUPLICATES_FILE: &str = "non_duplicates.csv";

/// Files written by [`write_outputs`]; `None` when the collection was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPaths {
    pub duplicates: Option<PathBuf>,
    pub non_duplicates: Option<PathBuf>,
}

/// Union of field names across `records`, in order of first appearance.
pub fn header_union(records: &[Record]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !headers.iter().any(|existing| existing == name) {
                headers.push(name.to_string());
            }
        }
    }
    headers
}

/// Write `records` as CSV to `writer`; `path` labels errors.
pub fn render_records_csv<W: Write>(writer: W, records: &[Record], path: &Path) -> Result<()> {
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let headers = header_union(records);
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&headers).map_err(csv_error)?;
    for record in records {
        writer
            .write_record(headers.iter().map(|header| record.get(header)))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `records` to a CSV file at `path`.
pub fn write_records_csv(path: &Path, records: &[Record]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    render_records_csv(BufWriter::new(file), records, path)
}

/// Flatten duplicates into export rows led by the master customer field.
pub fn duplicate_rows(report: &DedupReport, schemas: &DatasetSchemas) -> Vec<Record> {
    let customer_field = schemas.master.field(Role::CustomerId);
    report
        .duplicates
        .iter()
        .map(|duplicate| duplicate.to_output_record(customer_field))
        .collect()
}

/// Write both collections into `output_dir`.
///
/// An empty collection gets no file, and a file left by an earlier run in the
/// same directory is removed.
pub fn write_outputs(
    output_dir: &Path,
    report: &DedupReport,
    schemas: &DatasetSchemas,
) -> Result<OutputPaths> {
    ensure_dir(output_dir)?;
    let mut paths = OutputPaths::default();
    let path = output_dir.join(DUPLICATES_FILE);
    if report.duplicates.is_empty() {
        remove_stale(&path)?;
    } else {
        write_records_csv(&path, &duplicate_rows(report, schemas))?;
        info!(path = %path.display(), rows = report.duplicates.len(), "wrote duplicates");
        paths.duplicates = Some(path);
    }
    let path = output_dir.join(NON_DUPLICATES_FILE);
    if report.non_duplicates.is_empty() {
        remove_stale(&path)?;
    } else {
        write_records_csv(&path, &report.non_duplicates)?;
        info!(path = %path.display(), rows = report.non_duplicates.len(), "wrote non-duplicates");
        paths.non_duplicates = Some(path);
    }
    Ok(paths)
}

fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale output");
            Ok(())
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(OutputError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
