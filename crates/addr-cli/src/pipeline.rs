//! Address standardization pipeline with explicit stages.
//!
//! Stages run in order:
//! 1. **Load**: read the delimited input table
//! 2. **Locate**: pick the address column (explicit or detected)
//! 3. **Rules**: apply the abbreviation rule engine
//! 4. **Rewrite**: pass the values through the generative service (fail-open)
//! 5. **Save**: write the table with the derived column
//!
//! Rules and rewrite are optional; a job selects at least one of them.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::{info, info_span, trace};

use addr_ingest::{read_csv_table, resolve_address_column, write_csv_table};
use addr_normalize::{ColumnOptions, ColumnReport, RuleEngine, normalize_column};
use addr_rewrite::{AddressRewriter, RewriteReport, TextGenerator, rewrite_column};

use crate::logging::{log_data_enabled, redact_value};
use crate::progress::stage_progress;

/// Rewriter over a boxed generator so the CLI can swap the service.
pub type DynRewriter = AddressRewriter<Box<dyn TextGenerator>>;

/// Rows logged at `trace` after each column stage.
const SAMPLE_ROWS: usize = 3;

/// One input file to transform into one output file.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: u8,
    /// Column to transform; detected from the header when `None`.
    pub column: Option<String>,
    /// Name of the derived column; the source column is replaced when `None`.
    pub output_column: Option<String>,
    pub show_progress: bool,
}

/// What a completed job did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Column the values were read from.
    pub column: String,
    /// Column the results were written to.
    pub target: String,
    pub rows: usize,
    pub rules: Option<ColumnReport>,
    pub rewrite: Option<RewriteReport>,
    pub duration: Duration,
}

// ============================================================================
// Stage 1: Load
// ============================================================================

pub fn load(path: &Path, delimiter: u8) -> Result<DataFrame> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let df = read_csv_table(path, delimiter)
        .with_context(|| format!("read {}", path.display()))?;
    info!(
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "table loaded"
    );
    Ok(df)
}

// ============================================================================
// Stage 2: Locate
// ============================================================================

pub fn locate(df: &DataFrame, explicit: Option<&str>) -> Result<String> {
    let column = resolve_address_column(df, explicit).context("locate address column")?;
    info!(column = %column, "address column selected");
    Ok(column)
}

// ============================================================================
// Stage 3: Rules
// ============================================================================

pub fn apply_rules(
    df: &DataFrame,
    engine: &RuleEngine,
    source: &str,
    options: &ColumnOptions,
    show_progress: bool,
) -> Result<(DataFrame, ColumnReport)> {
    let span = info_span!("rules", column = %source, rules = engine.rule_count());
    let _guard = span.enter();
    let start = Instant::now();
    let bar = stage_progress(df.height(), "rules", show_progress);
    let (out, report) = normalize_column(df, engine, source, options, |rows| {
        bar.inc(rows as u64);
    })
    .with_context(|| format!("apply rules to column {source}"))?;
    bar.finish_and_clear();
    info!(
        rows = report.rows,
        changed = report.changed,
        missing = report.missing,
        duration_ms = start.elapsed().as_millis(),
        "rules applied"
    );
    Ok((out, report))
}

// ============================================================================
// Stage 4: Rewrite
// ============================================================================

pub fn apply_rewrite(
    df: &DataFrame,
    rewriter: &DynRewriter,
    source: &str,
    target: &str,
    show_progress: bool,
) -> Result<(DataFrame, RewriteReport)> {
    let span = info_span!("rewrite", column = %source, model = %rewriter.model());
    let _guard = span.enter();
    let start = Instant::now();
    let bar = stage_progress(df.height(), "rewrite", show_progress);
    let (out, report) = rewrite_column(df, rewriter, source, target, |rows| {
        bar.inc(rows as u64);
    })
    .with_context(|| format!("rewrite column {source}"))?;
    bar.finish_and_clear();
    info!(
        rows = report.rows,
        rewritten = report.rewritten,
        fallbacks = report.fallbacks,
        skipped = report.skipped,
        duration_ms = start.elapsed().as_millis(),
        "rewrite finished"
    );
    Ok((out, report))
}

// ============================================================================
// Stage 5: Save
// ============================================================================

pub fn save(df: &mut DataFrame, path: &Path, delimiter: u8) -> Result<()> {
    let span = info_span!("save", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    write_csv_table(df, path, delimiter).with_context(|| format!("write {}", path.display()))?;
    info!(
        rows = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "table saved"
    );
    Ok(())
}

/// Runs every selected stage for `job`.
///
/// With rules selected, the rewrite stage works on the rules output in place;
/// otherwise it reads the located column and writes the job's target column.
pub fn run_job(
    job: &Job,
    rules: Option<&RuleEngine>,
    rewriter: Option<&DynRewriter>,
) -> Result<RunSummary> {
    if rules.is_none() && rewriter.is_none() {
        bail!("no transformation stage selected");
    }
    let span = info_span!("job", input = %job.input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let mut df = load(&job.input, job.delimiter)?;
    let column = locate(&df, job.column.as_deref())?;
    let target = job.output_column.clone().unwrap_or_else(|| column.clone());

    let mut current = column.clone();
    let mut rules_report = None;
    if let Some(engine) = rules {
        let options = match &job.output_column {
            Some(name) => ColumnOptions::append(name.clone()),
            None => ColumnOptions::in_place(),
        };
        let (next, report) = apply_rules(&df, engine, &column, &options, job.show_progress)?;
        log_sample(&next, &column, &target);
        df = next;
        rules_report = Some(report);
        current.clone_from(&target);
    }

    let mut rewrite_report = None;
    if let Some(rewriter) = rewriter {
        let (next, report) = apply_rewrite(&df, rewriter, &current, &target, job.show_progress)?;
        df = next;
        rewrite_report = Some(report);
    }

    save(&mut df, &job.output, job.delimiter)?;

    let summary = RunSummary {
        input: job.input.clone(),
        output: job.output.clone(),
        column,
        target,
        rows: df.height(),
        rules: rules_report,
        rewrite: rewrite_report,
        duration: started.elapsed(),
    };
    info!(
        rows = summary.rows,
        duration_ms = summary.duration.as_millis(),
        "job complete"
    );
    Ok(summary)
}

/// Traces the first rows of a stage's input and output.
fn log_sample(df: &DataFrame, source: &str, target: &str) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    if source == target && !log_data_enabled() {
        return;
    }
    let (Some(before), Some(after)) = (text_column(df, source), text_column(df, target)) else {
        return;
    };
    for row in 0..df.height().min(SAMPLE_ROWS) {
        trace!(
            row,
            before = redact_value(before.get(row).unwrap_or_default()),
            after = redact_value(after.get(row).unwrap_or_default()),
            "sample"
        );
    }
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a polars::prelude::StringChunked> {
    df.column(name)
        .ok()
        .and_then(|column| column.as_materialized_series().str().ok())
}
