pub mod cli;
pub mod error;
pub mod io_utils;
pub mod rows;
pub mod schema;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{cli::Cli, error::SchemaError};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_ddl", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let input = cli.input.ok_or(SchemaError::MissingArgument)?;
    let table_name = io_utils::table_name(&input)?;
    let content = io_utils::read_input(&input)
        .with_context(|| format!("Loading CSV content from {input:?}"))?;
    let statement = schema::render_schema(&table_name, &content)
        .with_context(|| format!("Inferring schema from {input:?}"))?;
    let result_path = io_utils::result_path(&input);
    io_utils::write_result(&result_path, &statement)
        .with_context(|| format!("Writing schema to {result_path:?}"))?;
    info!("CREATE TABLE statement written to {result_path:?}");
    Ok(())
}
