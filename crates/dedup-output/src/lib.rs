//! Writers for classified deduplication results.
//!
//! - **CSV**: `duplicates.csv` and `non_duplicates.csv`, one per non-empty collection
//! - **JSON**: a match report with the trigger field of every duplicate

mod common;
mod csv_output;
mod error;
mod report;

pub use csv_output::{
    DUPLICATES_FILE, NON_DUPLICATES_FILE, OutputPaths, duplicate_rows, header_union,
    render_records_csv, write_outputs, write_records_csv,
};
pub use error::{OutputError, Result};
pub use report::{
    MatchReport, REPORT_FILE, ReportEntry, ReportSummary, render_match_report, write_match_report,
};
