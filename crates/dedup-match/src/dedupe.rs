use std::time::Instant;

use dedup_model::{
    ClassifiedRecord, DatasetSchemas, DedupOptions, DedupReport, MatchMethod, MatchResult, Record,
    Role,
};
use tracing::{debug, info, info_span};

use crate::engine::MatchEngine;
use crate::normalize::concat_address;

/// Position of a run, handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

/// Classify every small record against `master`.
pub fn deduplicate(
    master: &[Record],
    small: &[Record],
    schemas: &DatasetSchemas,
    options: &DedupOptions,
) -> DedupReport {
    deduplicate_with_progress(master, small, schemas, options, |_| {})
}

/// Classify every small record, calling `on_progress` every
/// `options.progress_interval` records and once at the end.
///
/// Small records with a blank name are dropped: they appear in neither output
/// collection and are only counted in [`DedupReport::skipped_blank_names`].
/// They still count as processed, so [`Progress::processed`] advances over
/// every small record and [`Progress::total`] is the full small dataset size.
pub fn deduplicate_with_progress<F>(
    master: &[Record],
    small: &[Record],
    schemas: &DatasetSchemas,
    options: &DedupOptions,
    mut on_progress: F,
) -> DedupReport
where
    F: FnMut(Progress),
{
    let span = info_span!(
        "dedupe",
        master_records = master.len(),
        small_records = small.len(),
        threshold = options.threshold.value()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let engine = MatchEngine::new(master, schemas, options.threshold);
    debug!(
        indexed_emails = engine.email_index().len(),
        "email index built"
    );

    let total = small.len();
    let mut report = DedupReport {
        total,
        ..DedupReport::default()
    };
    let mut last_reported = None;

    for (row, record) in small.iter().enumerate() {
        let processed = row + 1;
        if schemas.small.value(record, Role::Name).trim().is_empty() {
            debug!(row, "skipping record with blank name");
            report.skipped_blank_names += 1;
        } else {
            match engine.classify(record) {
                MatchResult::NoMatch => report.non_duplicates.push(record.clone()),
                result => report
                    .duplicates
                    .push(classify_duplicate(&engine, row, record, result)),
            }
        }
        if options.progress_interval > 0 && processed % options.progress_interval == 0 {
            on_progress(Progress { processed, total });
            last_reported = Some(processed);
        }
    }
    if last_reported != Some(total) {
        on_progress(Progress {
            processed: total,
            total,
        });
    }

    let counts = report.method_counts();
    info!(
        duplicates = report.duplicates.len(),
        non_duplicates = report.non_duplicates.len(),
        skipped_blank_names = report.skipped_blank_names,
        email = counts.email,
        name = counts.name,
        address = counts.address,
        duration_ms = start.elapsed().as_millis(),
        "dedupe complete"
    );
    report
}

fn classify_duplicate(
    engine: &MatchEngine<'_>,
    row: usize,
    record: &Record,
    result: MatchResult,
) -> ClassifiedRecord {
    let master_schema = &engine.schemas().master;
    let matched = result
        .master_row()
        .and_then(|master_row| engine.master_record(master_row));
    let (matched_customer_id, matched_full_name, matched_address) = match matched {
        Some(matched) => (
            master_schema.value(matched, Role::CustomerId).to_string(),
            master_schema.value(matched, Role::Name).to_string(),
            if result.method() == Some(MatchMethod::Address) {
                concat_address(matched, master_schema)
            } else {
                String::new()
            },
        ),
        None => (String::new(), String::new(), String::new()),
    };
    ClassifiedRecord {
        row,
        record: record.clone(),
        result,
        matched_customer_id,
        matched_full_name,
        matched_address,
    }
}
