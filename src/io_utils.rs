//! File reading, UTF-8 decoding, CSV reader construction, and output paths.

use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::UTF_8;

/// Reads the whole input file and decodes it as UTF-8 text.
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Reading input file {path:?}"))?;
    decode_bytes(&bytes)
}

pub fn decode_bytes(bytes: &[u8]) -> Result<String> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            UTF_8.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

/// Derives the table name from the file-name portion of the input path,
/// truncated at the first `.` (`people.csv` -> `people`).
pub fn table_name(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Input path {path:?} has no file name"))?;
    let base = file_name
        .split_once('.')
        .map(|(base, _)| base)
        .unwrap_or(file_name);
    Ok(base.to_string())
}

/// The output file sits beside the input: `<inputPath>.result.sql`.
pub fn result_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".result.sql");
    PathBuf::from(name)
}

pub fn write_result(path: &Path, statement: &str) -> Result<()> {
    fs::write(path, statement).with_context(|| format!("Creating output file {path:?}"))
}

pub fn open_csv_reader<R>(reader: R, has_headers: bool) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    // Flexible: record width against the header is validated downstream so a
    // mismatch reports the field counts instead of a generic parse error.
    builder
        .has_headers(has_headers)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}
