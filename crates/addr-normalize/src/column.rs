//! Applying the rule engine to a DataFrame column.

use polars::prelude::{DataFrame, DataType, NamedFrom, Series};

use crate::engine::RuleEngine;
use crate::error::{NormalizeError, Result};

/// Name of the derived column when none is configured.
pub const DEFAULT_OUTPUT_COLUMN: &str = "standardized_address";

/// Where normalized values are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnTarget {
    /// Append (or overwrite) a column with this name.
    Append(String),
    /// Overwrite the source column in place.
    Replace,
}

impl Default for ColumnTarget {
    fn default() -> Self {
        Self::Append(DEFAULT_OUTPUT_COLUMN.to_string())
    }
}

/// Options for [`normalize_column`].
#[derive(Debug, Clone, Default)]
pub struct ColumnOptions {
    pub target: ColumnTarget,
    /// Replace missing cells with an empty string.
    pub fill_missing: bool,
    /// Strip leading and trailing whitespace from normalized values.
    pub trim: bool,
}

impl ColumnOptions {
    /// Append the result under `name`, leaving missing cells missing.
    pub fn append(name: impl Into<String>) -> Self {
        Self {
            target: ColumnTarget::Append(name.into()),
            ..Self::default()
        }
    }

    /// Overwrite the source column, filling missing cells and trimming.
    pub fn in_place() -> Self {
        Self {
            target: ColumnTarget::Replace,
            fill_missing: true,
            trim: true,
        }
    }
}

/// Counts collected while normalizing a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnReport {
    pub rows: usize,
    /// Cells whose value differs from the input.
    pub changed: usize,
    /// Cells that were missing in the input.
    pub missing: usize,
}

/// Normalizes `source` and returns a new table with the result written to the
/// configured target.
///
/// String cells are normalized one by one. A non-string column has no text to
/// rewrite: in append mode it is copied as-is, in replace mode it is cast to
/// string first. `on_progress` receives the number of rows handled since the
/// previous call.
pub fn normalize_column(
    df: &DataFrame,
    engine: &RuleEngine,
    source: &str,
    options: &ColumnOptions,
    mut on_progress: impl FnMut(usize),
) -> Result<(DataFrame, ColumnReport)> {
    let column = df
        .column(source)
        .map_err(|_| NormalizeError::ColumnNotFound {
            column: source.to_string(),
        })?;
    let target_name = match &options.target {
        ColumnTarget::Append(name) => name.as_str(),
        ColumnTarget::Replace => source,
    };

    let mut series = column.as_materialized_series().clone();
    if series.dtype() != &DataType::String {
        if matches!(options.target, ColumnTarget::Append(_)) {
            tracing::debug!(
                column = %source,
                dtype = %series.dtype(),
                "address column is not text, copying values unchanged"
            );
            let report = ColumnReport {
                rows: series.len(),
                changed: 0,
                missing: series.null_count(),
            };
            on_progress(series.len());
            let mut out = df.clone();
            out.with_column(series.with_name(target_name.into()))?;
            return Ok((out, report));
        }
        series = series.cast(&DataType::String)?;
    }

    let strings = series.str()?;
    let mut report = ColumnReport {
        rows: strings.len(),
        ..ColumnReport::default()
    };
    let mut values: Vec<Option<String>> = Vec::with_capacity(strings.len());

    for value in strings {
        let normalized = match value {
            Some(text) => {
                let mut normalized = engine.normalize_text(text);
                if options.trim {
                    normalized = normalized.trim().to_string();
                }
                if normalized != text {
                    report.changed += 1;
                }
                Some(normalized)
            }
            None => {
                report.missing += 1;
                if options.fill_missing {
                    report.changed += 1;
                    Some(String::new())
                } else {
                    None
                }
            }
        };
        values.push(normalized);
        on_progress(1);
    }

    let mut out = df.clone();
    out.with_column(Series::new(target_name.into(), values))?;

    tracing::debug!(
        column = %source,
        target = %target_name,
        rows = report.rows,
        changed = report.changed,
        missing = report.missing,
        "normalized address column"
    );
    Ok((out, report))
}
