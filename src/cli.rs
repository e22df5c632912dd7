use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Infer a PostgreSQL CREATE TABLE statement from a CSV file",
    long_about = None
)]
pub struct Cli {
    /// Input CSV file whose header and first data row drive the schema
    pub input: Option<PathBuf>,
}
