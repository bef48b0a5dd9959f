//! Delimited file reading into a text-only DataFrame.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

use super::header::read_csv_header;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Columns beyond this count trigger a performance warning.
const WIDE_TABLE_COLUMNS: usize = 500;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_read(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::from_read(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file
        .read(&mut buffer)
        .map_err(|e| IngestError::from_read(path, e))?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the header)
    Ok(())
}

/// Reads a delimited file with a single header row into a DataFrame.
///
/// Every column is read as text so values are written back exactly as they
/// were read (no numeric coercion of ids or postal codes). Empty fields become
/// missing values.
pub fn read_csv_table(path: &Path, delimiter: u8) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;
    let header = read_csv_header(path, delimiter)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(delimiter))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    strip_bom_from_first_column(&mut df)?;
    warn_on_shape(&df, path);

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = header.len(),
        "loaded address table"
    );
    Ok(df)
}

/// Removes a UTF-8 byte-order mark left on the first column name.
fn strip_bom_from_first_column(df: &mut DataFrame) -> Result<()> {
    let Some(first) = df.get_column_names_str().first().map(|s| (*s).to_string()) else {
        return Ok(());
    };
    if let Some(clean) = first.strip_prefix('\u{feff}') {
        df.rename(&first, clean.into())?;
    }
    Ok(())
}

fn warn_on_shape(df: &DataFrame, path: &Path) {
    if df.height() == 0 {
        tracing::warn!(path = %path.display(), "table has a header but no rows");
    }
    if df.width() > WIDE_TABLE_COLUMNS {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "Dataset has more than 500 columns - may impact performance"
        );
    }
}
