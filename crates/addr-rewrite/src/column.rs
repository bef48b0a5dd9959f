//! Rewriting a DataFrame column row by row.

use polars::prelude::{DataFrame, DataType, NamedFrom, Series};

use crate::error::{Result, RewriteError};
use crate::generator::TextGenerator;
use crate::rewriter::{AddressRewriter, RewriteOutcome};

/// Counts collected while rewriting a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Rows in the column.
    pub rows: usize,
    /// Rows replaced by the service response.
    pub rewritten: usize,
    /// Rows that kept their input because the call failed.
    pub fallbacks: usize,
    /// Missing or non-text cells that were not sent.
    pub skipped: usize,
}

/// Rewrites every text cell of `source` and writes the results to `target`.
///
/// `target` may equal `source` to rewrite a column in place. Each row gets
/// exactly one request; a failed row keeps its input and the next row is
/// processed. Missing cells are passed through without a request, and a
/// non-text column is copied unchanged. `on_progress` receives the number of
/// rows handled since the previous call.
pub fn rewrite_column<G: TextGenerator>(
    df: &DataFrame,
    rewriter: &AddressRewriter<G>,
    source: &str,
    target: &str,
    mut on_progress: impl FnMut(usize),
) -> Result<(DataFrame, RewriteReport)> {
    let column = df
        .column(source)
        .map_err(|_| RewriteError::ColumnNotFound(source.to_string()))?;
    let series = column.as_materialized_series();
    let mut out = df.clone();

    if series.dtype() != &DataType::String {
        let report = RewriteReport {
            rows: series.len(),
            skipped: series.len(),
            ..RewriteReport::default()
        };
        on_progress(series.len());
        out.with_column(series.clone().with_name(target.into()))?;
        return Ok((out, report));
    }

    let strings = series.str()?;
    let mut report = RewriteReport {
        rows: strings.len(),
        ..RewriteReport::default()
    };
    let mut values: Vec<Option<String>> = Vec::with_capacity(strings.len());

    for (row, value) in strings.into_iter().enumerate() {
        let rewritten = match value {
            Some(address) => {
                let outcome = rewriter.rewrite_or_original(address);
                if let RewriteOutcome::Fallback { reason, .. } = &outcome {
                    tracing::debug!(row, error = %reason, "row kept its input");
                    report.fallbacks += 1;
                } else {
                    report.rewritten += 1;
                }
                Some(outcome.into_value())
            }
            None => {
                report.skipped += 1;
                None
            }
        };
        values.push(rewritten);
        on_progress(1);
    }

    out.with_column(Series::new(target.into(), values))?;

    tracing::info!(
        column = %source,
        target = %target,
        rows = report.rows,
        rewritten = report.rewritten,
        fallbacks = report.fallbacks,
        skipped = report.skipped,
        "rewrote address column"
    );
    Ok((out, report))
}
