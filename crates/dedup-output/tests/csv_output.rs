//! Tests for CSV export of classified records.

use std::fs;
use std::path::Path;

use dedup_model::{ClassifiedRecord, DatasetSchemas, DedupReport, MatchMethod, MatchResult, Record};
use dedup_output::{
    DUPLICATES_FILE, NON_DUPLICATES_FILE, header_union, render_records_csv, write_outputs,
};
use tempfile::TempDir;

fn sample_report() -> DedupReport {
    DedupReport {
        duplicates: vec![
            ClassifiedRecord {
                row: 0,
                record: Record::from_pairs([("Email Address", "a@x.com"), ("Name", "Jon Smith")]),
                result: MatchResult::Matched {
                    method: MatchMethod::Email,
                    score: None,
                    master_row: 0,
                },
                matched_customer_id: "C1".to_string(),
                matched_full_name: "John Smith".to_string(),
                matched_address: String::new(),
            },
            ClassifiedRecord {
                row: 2,
                record: Record::from_pairs([
                    ("Email Address", ""),
                    ("Name", "Jane Roe"),
                    ("Address 1", "12 Elm St"),
                ]),
                result: MatchResult::Matched {
                    method: MatchMethod::Address,
                    score: Some(0.91),
                    master_row: 4,
                },
                matched_customer_id: "C5".to_string(),
                matched_full_name: "Janet Roe".to_string(),
                matched_address: "12 Elm Street".to_string(),
            },
        ],
        non_duplicates: vec![Record::from_pairs([("Email Address", ""), ("Name", "Zzz Qqq")])],
        skipped_blank_names: 1,
        total: 4,
    }
}

fn render(records: &[Record]) -> String {
    let mut buffer = Vec::new();
    render_records_csv(&mut buffer, records, Path::new("inline.csv")).expect("render csv");
    String::from_utf8(buffer).expect("utf8 csv")
}

#[test]
fn header_union_keeps_first_appearance_order() {
    let records = vec![
        Record::from_pairs([("B", "1"), ("A", "2")]),
        Record::from_pairs([("A", "3"), ("C", "4")]),
    ];
    assert_eq!(header_union(&records), vec!["B", "A", "C"]);
}

#[test]
fn duplicates_csv_layout() {
    let report = sample_report();
    let rows = dedup_output::duplicate_rows(&report, &DatasetSchemas::default());

    insta::assert_snapshot!(render(&rows), @r"
Customer #,Email Address,Name,_matchMethod,_matchScore,_matchedFullName,_matchedAddress,Address 1
C1,a@x.com,Jon Smith,email,,John Smith,,
C5,,Jane Roe,address,0.91,Janet Roe,12 Elm Street,12 Elm St
");
}

#[test]
fn cells_with_commas_are_quoted() {
    let records = vec![Record::from_pairs([("Name", "Smith, Jane")])];
    assert_eq!(render(&records), "Name\n\"Smith, Jane\"\n");
}

#[test]
fn writes_both_files_when_non_empty() {
    let dir = TempDir::new().expect("temp dir");
    let out_dir = dir.path().join("out");

    let paths = write_outputs(&out_dir, &sample_report(), &DatasetSchemas::default())
        .expect("write outputs");

    let duplicates = paths.duplicates.expect("duplicates path");
    let non_duplicates = paths.non_duplicates.expect("non-duplicates path");
    assert_eq!(duplicates, out_dir.join(DUPLICATES_FILE));
    assert_eq!(non_duplicates, out_dir.join(NON_DUPLICATES_FILE));

    let contents = fs::read_to_string(&non_duplicates).expect("read non-duplicates");
    assert_eq!(contents, "Email Address,Name\n,Zzz Qqq\n");
    let contents = fs::read_to_string(&duplicates).expect("read duplicates");
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn empty_collections_are_not_written() {
    let dir = TempDir::new().expect("temp dir");
    let mut report = sample_report();
    report.duplicates.clear();

    let paths = write_outputs(dir.path(), &report, &DatasetSchemas::default())
        .expect("write outputs");

    assert_eq!(paths.duplicates, None);
    assert!(!dir.path().join(DUPLICATES_FILE).exists());
    assert!(paths.non_duplicates.is_some());
}

#[test]
fn rerun_without_duplicates_removes_previous_file() {
    let dir = TempDir::new().expect("temp dir");
    let schemas = DatasetSchemas::default();
    write_outputs(dir.path(), &sample_report(), &schemas).expect("first run");
    assert!(dir.path().join(DUPLICATES_FILE).exists());

    let mut report = sample_report();
    report.duplicates.clear();
    let paths = write_outputs(dir.path(), &report, &schemas).expect("second run");

    assert_eq!(paths.duplicates, None);
    assert!(!dir.path().join(DUPLICATES_FILE).exists());
    assert!(dir.path().join(NON_DUPLICATES_FILE).exists());
}

#[test]
fn rerun_without_non_duplicates_removes_previous_file() {
    let dir = TempDir::new().expect("temp dir");
    let schemas = DatasetSchemas::default();
    write_outputs(dir.path(), &sample_report(), &schemas).expect("first run");

    let mut report = sample_report();
    report.non_duplicates.clear();
    let paths = write_outputs(dir.path(), &report, &schemas).expect("second run");

    assert_eq!(paths.non_duplicates, None);
    assert!(!dir.path().join(NON_DUPLICATES_FILE).exists());
    assert!(dir.path().join(DUPLICATES_FILE).exists());
}
