//! Address table ingestion utilities.
//!
//! This crate loads delimited address tables into Polars DataFrames, writes
//! them back, and locates the address column.
//!
//! # Features
//!
//! - **CSV Loading**: Read delimited files with every field kept as text
//! - **CSV Saving**: Write the table back with a header row and no index column
//! - **Column Selection**: Find the first column whose name mentions "address"
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use addr_ingest::{read_csv_table, resolve_address_column, write_csv_table};
//!
//! let df = read_csv_table(Path::new("addresses.csv"), b',')?;
//! let column = resolve_address_column(&df, None)?;
//! ```

mod csv;
mod error;
mod select;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use csv::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_header,
    read_csv_table, validate_encoding, write_csv_table,
};

// === Column Selection ===
pub use select::{ADDRESS_KEYWORD, resolve_address_column, select_address_column};
