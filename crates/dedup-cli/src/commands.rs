use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info_span;

use dedup_cli::pipeline::{RunConfig, RunResult, run};
use dedup_ingest::load_config_or_default;
use dedup_model::Schema;

use crate::cli::{RunArgs, SchemaArgs};
use crate::summary::apply_table_style;

pub fn run_dedupe(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", small = %args.small.display());
    let _guard = span.enter();
    let config = RunConfig {
        master: args.master.clone(),
        small: args.small.clone(),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.small)),
        config: args.config.clone(),
        threshold: args.threshold.clone(),
        progress_interval: args.progress_interval,
        write_report: !args.no_report,
        dry_run: args.dry_run,
    };

    let bar = progress_bar(!args.no_progress && io::stderr().is_terminal());
    let result = run(&config, |progress| {
        bar.set_length(progress.total as u64);
        bar.set_position(progress.processed as u64);
    });
    bar.finish_and_clear();
    result
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let config = load_config_or_default(args.config.as_deref()).context("load run configuration")?;
    print_schema("Master", &config.schemas.master);
    print_schema("Small", &config.schemas.small);
    println!("Threshold: {}", config.options.threshold.value());
    Ok(())
}

fn default_output_dir(small: &Path) -> PathBuf {
    small
        .parent()
        .map(|parent| parent.join("output"))
        .unwrap_or_else(|| PathBuf::from("output"))
}

fn progress_bar(visible: bool) -> ProgressBar {
    let bar = ProgressBar::new(0);
    if !visible {
        bar.set_draw_target(ProgressDrawTarget::hidden());
        return bar;
    }
    if let Ok(style) =
        ProgressStyle::with_template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message("Matching");
    bar
}

fn print_schema(label: &str, schema: &Schema) {
    let mut table = Table::new();
    table.set_header(vec!["Role", "Field"]);
    apply_table_style(&mut table);
    for (role, field) in schema.roles() {
        table.add_row(vec![role.to_string(), field.to_string()]);
    }
    println!("{label}:");
    println!("{table}");
}
