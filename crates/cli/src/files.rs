//! File access shared by the subcommands: config loading, CSV in and out.

use std::path::Path;

use listcheck_match::{read_table, MatchConfig, Table};
use serde::Serialize;

use crate::CliError;

/// Load and validate a config, or fall back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<MatchConfig, CliError> {
    let Some(path) = path else {
        return Ok(MatchConfig::default());
    };
    if !path.is_file() {
        return Err(CliError::usage(format!("config file not found: {}", path.display())));
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::general(format!("cannot read {}: {e}", path.display())))?;
    let config = MatchConfig::from_toml(&text).map_err(|e| {
        let mut err = CliError::matching(e);
        err.message = format!("{}: {}", path.display(), err.message);
        err
    })?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Read an input CSV. `columns` names the headers the command needs and only
/// feeds the hint shown when the file is missing.
pub fn read_input(path: &Path, columns: &[&str]) -> Result<Table, CliError> {
    if !path.is_file() {
        return Err(
            CliError::usage(format!("input file not found: {}", path.display())).with_hint(format!(
                "expected a CSV with columns: {}",
                columns.join(", ")
            )),
        );
    }
    let data = std::fs::read_to_string(path)
        .map_err(|e| CliError::general(format!("cannot read {}: {e}", path.display())))?;
    let table = read_table(&path.display().to_string(), &data).map_err(CliError::matching)?;
    log::info!("loaded {} rows from {}", table.rows.len(), path.display());
    Ok(table)
}

pub fn write_csv(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<(), CliError> {
    let write_err = |e: csv::Error| CliError::io(format!("cannot write {}: {e}", path.display()));

    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    writer.write_record(headers).map_err(write_err)?;
    for row in rows {
        writer.write_record(row).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
    println!("{json}");
    Ok(())
}
