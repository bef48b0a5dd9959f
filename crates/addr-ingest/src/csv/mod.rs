//! Delimited file reading and writing.

mod header;
mod reader;
mod writer;

pub use header::read_csv_header;
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_table,
    validate_encoding,
};
pub use writer::write_csv_table;
