//! Header row parsing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{IngestError, Result};

/// Reads and parses the header row of a delimited file.
///
/// A leading UTF-8 byte-order mark is stripped.
pub fn read_csv_header(path: &Path, delimiter: u8) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| IngestError::from_read(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::from_read(path, e))?;

    if bytes == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let line = line.trim_end_matches(['\r', '\n']);
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    let columns = parse_csv_line(line, char::from(delimiter));
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    Ok(columns)
}

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Parses one delimited line into fields, handling quoted values.
pub fn parse_csv_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            c if c == delimiter && !in_quotes => {
                fields.push(normalize_header(&current));
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(normalize_header(&current));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  hello  "), "hello");
        assert_eq!(normalize_header("hello"), "hello");
    }

    #[test]
    fn test_parse_csv_line_simple() {
        assert_eq!(parse_csv_line("a,b,c", ','), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_semicolon() {
        assert_eq!(
            parse_csv_line("id;Direccion Address;zip", ';'),
            vec!["id", "Direccion Address", "zip"]
        );
    }

    #[test]
    fn test_parse_csv_line_quoted() {
        let result = parse_csv_line("\"home, address\",b,c", ',');
        assert_eq!(result, vec!["home, address", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        let result = parse_csv_line("\"the \"\"main\"\" address\",b", ',');
        assert_eq!(result, vec!["the \"main\" address", "b"]);
    }

    #[test]
    fn test_read_csv_header_strips_bom() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\u{feff}id,address\r\n1,Calle 5\r\n").unwrap();
        let columns = read_csv_header(file.path(), b',').unwrap();
        assert_eq!(columns, vec!["id", "address"]);
    }

    #[test]
    fn test_read_csv_header_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let result = read_csv_header(file.path(), b',');
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_header_blank_line() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, " , \n1,2\n").unwrap();
        let result = read_csv_header(file.path(), b',');
        assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
    }
}
