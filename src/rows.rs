//! Splits CSV text into header and data rows and samples the first row.

use anyhow::{Context, Result};

use crate::{error::SchemaError, io_utils};

/// One CSV column paired with its sampled value from the first data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub name: String,
    pub sample_value: String,
}

/// Parses CSV text into a header row and the remaining data rows.
pub fn split_rows(content: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = io_utils::open_csv_reader(content.as_bytes(), true);
    let header = reader
        .headers()
        .context("Reading CSV header row")?
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Reading CSV data row")?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    if rows.is_empty() {
        return Err(SchemaError::EmptyInput.into());
    }
    Ok((header, rows))
}

/// Pairs each header name with the first data row's value at the same index.
/// Only the first row is sampled; later rows are never consulted.
pub fn sample_fields(header: &[String], rows: &[Vec<String>]) -> Result<Vec<RawField>> {
    let first = rows.first().ok_or(SchemaError::EmptyInput)?;
    if first.len() != header.len() {
        return Err(SchemaError::ShapeMismatch {
            header: header.len(),
            row: first.len(),
        }
        .into());
    }
    let fields = header
        .iter()
        .zip(first)
        .map(|(name, value)| RawField {
            name: name.clone(),
            sample_value: value.clone(),
        })
        .collect();
    Ok(fields)
}
