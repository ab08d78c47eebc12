//! Tests for CSV record loading.

use std::fs;
use std::path::{Path, PathBuf};

use dedup_ingest::{IngestError, read_records, read_records_from_reader};
use dedup_model::Schema;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_records_in_column_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "small.csv",
        "Name,Email Address,Postal Code\nJon Smith,a@x.com, 98101 \n",
    );

    let set = read_records(&path).expect("read csv");

    assert_eq!(set.headers, vec!["Name", "Email Address", "Postal Code"]);
    assert_eq!(set.len(), 1);
    let fields: Vec<(&str, &str)> = set.records[0].fields().collect();
    assert_eq!(
        fields,
        vec![
            ("Name", "Jon Smith"),
            ("Email Address", "a@x.com"),
            ("Postal Code", " 98101 "),
        ]
    );
}

#[test]
fn pads_short_rows_and_skips_blank_rows() {
    let contents = "A,B,C\n1,x\n,,\n  , \n2,y,z,extra\n";
    let set = read_records_from_reader(contents.as_bytes(), Path::new("inline.csv"))
        .expect("read csv");

    assert_eq!(set.len(), 2);
    assert_eq!(set.records[0].get("C"), "");
    assert!(set.records[0].contains("C"));
    assert_eq!(set.records[1].get("C"), "z");
    assert_eq!(set.records[1].len(), 3);
}

#[test]
fn quoted_cells_keep_commas() {
    let contents = "Email Addresses,Full Name\n\"a@x.com, b@x.com\",\"Smith, Jane\"\n";
    let set = read_records_from_reader(contents.as_bytes(), Path::new("inline.csv"))
        .expect("read csv");

    assert_eq!(set.records[0].get("Email Addresses"), "a@x.com, b@x.com");
    assert_eq!(set.records[0].get("Full Name"), "Smith, Jane");
}

#[test]
fn reports_schema_fields_missing_from_headers() {
    let contents = "Name,Email Address,Address 1\n";
    let set = read_records_from_reader(contents.as_bytes(), Path::new("inline.csv"))
        .expect("read csv");

    assert!(set.is_empty());
    let schema = Schema::small_default();
    let missing = set.missing_fields(&schema);
    assert_eq!(
        missing,
        vec!["Address 2", "Address 3", "Country ID", "Postal Code", "State / Region"]
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let error = read_records(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(error, IngestError::Io { .. }));
    assert!(error.to_string().contains("absent.csv"));
}
