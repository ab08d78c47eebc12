//! Deduplication run with explicit stages.
//!
//! 1. **Load**: read the run configuration and both CSV inputs
//! 2. **Classify**: run the email/name/address cascade over the small list
//! 3. **Output**: write duplicate and non-duplicate CSVs and the JSON report
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use dedup_ingest::{DedupConfig, RecordSet, load_config_or_default, read_records};
use dedup_match::{Progress, deduplicate_with_progress};
use dedup_model::{DatasetSchemas, DedupOptions, DedupReport, Schema, Threshold};
use dedup_output::{MatchReport, OutputPaths, REPORT_FILE, write_match_report, write_outputs};

use crate::logging::redact_value;

/// Inputs and switches of one run.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub master: PathBuf,
    pub small: PathBuf,
    pub output_dir: PathBuf,
    /// Explicit config file; falls back to `DEDUP_CONFIG`, then the defaults.
    pub config: Option<PathBuf>,
    /// Raw threshold as typed by the operator; overrides the config file.
    pub threshold: Option<String>,
    pub progress_interval: Option<usize>,
    pub write_report: bool,
    pub dry_run: bool,
}

/// Everything the summary needs after a run.
#[derive(Debug)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub master_records: usize,
    pub options: DedupOptions,
    pub report: DedupReport,
    pub outputs: OutputPaths,
    pub match_report: Option<PathBuf>,
    pub missing_master_fields: Vec<String>,
    pub missing_small_fields: Vec<String>,
    pub dry_run: bool,
}

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Result of the load stage.
#[derive(Debug)]
pub struct LoadResult {
    pub schemas: DatasetSchemas,
    pub options: DedupOptions,
    pub master: RecordSet,
    pub small: RecordSet,
    pub missing_master_fields: Vec<String>,
    pub missing_small_fields: Vec<String>,
}

/// Apply command-line overrides on top of the config file.
///
/// A threshold that is not a number in `(0, 1]` is logged and replaced by the
/// default rather than rejected.
pub fn resolve_options(
    config: &DedupConfig,
    threshold: Option<&str>,
    progress_interval: Option<usize>,
) -> DedupOptions {
    let mut options = config.options;
    if let Some(raw) = threshold {
        let threshold = raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Threshold::new)
            .unwrap_or_else(|| {
                warn!(
                    value = raw,
                    default = Threshold::DEFAULT.value(),
                    "invalid threshold, using default"
                );
                Threshold::DEFAULT
            });
        options = options.with_threshold(threshold);
    }
    if let Some(interval) = progress_interval {
        options = options.with_progress_interval(interval);
    }
    options
}

pub fn load(config: &RunConfig) -> Result<LoadResult> {
    let span = info_span!("load");
    let _guard = span.enter();
    let start = Instant::now();

    let dedup_config =
        load_config_or_default(config.config.as_deref()).context("load run configuration")?;
    let options = resolve_options(
        &dedup_config,
        config.threshold.as_deref(),
        config.progress_interval,
    );
    let schemas = dedup_config.schemas;

    let master = read_records(&config.master)
        .with_context(|| format!("read master list {}", config.master.display()))?;
    let small = read_records(&config.small)
        .with_context(|| format!("read small list {}", config.small.display()))?;

    let missing_master_fields = missing_fields(&master, &schemas.master, &config.master);
    let missing_small_fields = missing_fields(&small, &schemas.small, &config.small);

    info!(
        master_records = master.len(),
        small_records = small.len(),
        threshold = options.threshold.value(),
        duration_ms = start.elapsed().as_millis(),
        "inputs loaded"
    );
    Ok(LoadResult {
        schemas,
        options,
        master,
        small,
        missing_master_fields,
        missing_small_fields,
    })
}

fn missing_fields(set: &RecordSet, schema: &Schema, path: &Path) -> Vec<String> {
    let missing: Vec<String> = set
        .missing_fields(schema)
        .into_iter()
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        warn!(
            path = %path.display(),
            fields = ?missing,
            "schema fields missing from header; they read as empty"
        );
    }
    missing
}

// ============================================================================
// Stage 2: Classify
// ============================================================================

pub fn classify<F>(loaded: &LoadResult, on_progress: F) -> DedupReport
where
    F: FnMut(Progress),
{
    let report = deduplicate_with_progress(
        &loaded.master.records,
        &loaded.small.records,
        &loaded.schemas,
        &loaded.options,
        on_progress,
    );
    for duplicate in &report.duplicates {
        let Some(method) = duplicate.result.method() else {
            continue;
        };
        let trigger = method.trigger_field(&loaded.schemas.small).unwrap_or("");
        debug!(
            row = duplicate.row + 1,
            method = %method,
            score = %duplicate.result.score_label(),
            field = trigger,
            value = redact_value(duplicate.record.get(trigger)),
            matched = redact_value(&duplicate.matched_full_name),
            "duplicate"
        );
    }
    report
}

// ============================================================================
// Stage 3: Output
// ============================================================================

/// Result of the output stage.
#[derive(Debug, Default)]
pub struct OutputResult {
    pub paths: OutputPaths,
    pub match_report: Option<PathBuf>,
}

pub fn output(config: &RunConfig, loaded: &LoadResult, report: &DedupReport) -> Result<OutputResult> {
    let span = info_span!("output", output_dir = %config.output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    if config.dry_run {
        info!(
            duplicates = report.duplicates.len(),
            non_duplicates = report.non_duplicates.len(),
            "output skipped (dry run)"
        );
        return Ok(OutputResult::default());
    }

    let paths = write_outputs(&config.output_dir, report, &loaded.schemas)
        .context("write classified records")?;
    let match_report = if config.write_report {
        let path = config.output_dir.join(REPORT_FILE);
        let document = MatchReport::build(report, &loaded.schemas, loaded.options.threshold.value());
        write_match_report(&path, &document).context("write match report")?;
        Some(path)
    } else {
        None
    };

    info!(
        duration_ms = start.elapsed().as_millis(),
        "outputs written"
    );
    Ok(OutputResult {
        paths,
        match_report,
    })
}

/// Run all stages.
pub fn run<F>(config: &RunConfig, on_progress: F) -> Result<RunResult>
where
    F: FnMut(Progress),
{
    let loaded = load(config)?;
    let report = classify(&loaded, on_progress);
    let written = output(config, &loaded, &report)?;
    Ok(RunResult {
        output_dir: config.output_dir.clone(),
        master_records: loaded.master.len(),
        options: loaded.options,
        report,
        outputs: written.paths,
        match_report: written.match_report,
        missing_master_fields: loaded.missing_master_fields,
        missing_small_fields: loaded.missing_small_fields,
        dry_run: config.dry_run,
    })
}
