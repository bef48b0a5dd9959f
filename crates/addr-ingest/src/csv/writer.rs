//! Delimited file writing.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, DataType, NamedFrom, SerWriter, Series};

use crate::error::{IngestError, Result};

/// Writes the table with a header row and no index column.
///
/// Missing values and empty strings are both written as bare empty fields.
/// The whole file is written in one pass; a failure part-way leaves a
/// truncated file behind.
pub fn write_csv_table(df: &mut DataFrame, path: &Path, delimiter: u8) -> Result<()> {
    let mut out = empty_strings_as_missing(df)?;
    let file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    CsvWriter::new(BufWriter::new(file))
        .include_header(true)
        .with_separator(delimiter)
        .finish(&mut out)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote address table"
    );
    Ok(())
}

/// Polars quotes empty strings (`""`) to tell them apart from nulls; the
/// output format has no such distinction.
fn empty_strings_as_missing(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    let text_columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| column.name().to_string())
        .collect();

    for name in text_columns {
        let series = out.column(&name)?.as_materialized_series().clone();
        let strings = series.str()?;
        if !strings.into_iter().any(|value| value == Some("")) {
            continue;
        }
        let values: Vec<Option<&str>> = strings
            .into_iter()
            .map(|value| value.filter(|text| !text.is_empty()))
            .collect();
        out.with_column(Series::new(name.as_str().into(), values))?;
    }
    Ok(out)
}
