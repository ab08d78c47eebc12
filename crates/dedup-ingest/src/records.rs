use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use dedup_model::{Record, Schema};

use crate::error::{IngestError, Result};

/// Records of one input file together with its header row.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Schema field names that no header carries.
    pub fn missing_fields<'s>(&self, schema: &'s Schema) -> Vec<&'s str> {
        schema
            .roles()
            .into_iter()
            .map(|(_, field)| field)
            .filter(|field| !self.headers.iter().any(|header| header == field))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Read a CSV file with a header row into records.
pub fn read_records(path: &Path) -> Result<RecordSet> {
    let file = File::open(path).map_err(|source| IngestError::io(path, source))?;
    read_records_from_reader(file, path)
}

/// Read CSV from any reader; `source` only labels errors and logs.
///
/// Cell values are kept verbatim. Short rows are padded with empty cells,
/// cells beyond the header are dropped, and rows whose cells are all blank
/// are skipped.
pub fn read_records_from_reader<R: Read>(reader: R, source: &Path) -> Result<RecordSet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| IngestError::csv(source, error))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut records = Vec::new();
    let mut blank_rows = 0usize;
    for row in reader.records() {
        let row = row.map_err(|error| IngestError::csv(source, error))?;
        if row.iter().all(|value| value.trim().is_empty()) {
            blank_rows += 1;
            continue;
        }
        let record = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.as_str(), row.get(idx).unwrap_or("")))
            .collect::<Record>();
        records.push(record);
    }
    debug!(
        path = %source.display(),
        columns = headers.len(),
        records = records.len(),
        blank_rows,
        "read records"
    );
    Ok(RecordSet { headers, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_strips_bom_and_padding() {
        assert_eq!(normalize_header("\u{feff}Full Name "), "Full Name");
        assert_eq!(normalize_header(" State / Region"), "State / Region");
    }
}
