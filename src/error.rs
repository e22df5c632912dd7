use thiserror::Error;

/// Terminal failures of the schema pipeline. I/O and CSV parse failures are
/// carried by the underlying `std::io::Error` / `csv::Error` in the anyhow
/// context chain instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("an input CSV file path argument is required")]
    MissingArgument,
    #[error("CSV contains no data rows after the header")]
    EmptyInput,
    #[error("first data row has {row} field(s) but the header has {header}")]
    ShapeMismatch { header: usize, row: usize },
    #[error("column {position} has an empty header name")]
    EmptyName { position: usize },
    #[error("column definition is missing a {part}")]
    InvalidColumn { part: &'static str },
}
