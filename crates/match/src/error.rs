use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (threshold ordering, weights, empty column names).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// Missing required column in input data.
    #[error("{file}: missing required column '{column}' (available: {available})")]
    MissingColumn {
        file: String,
        column: String,
        available: String,
    },
    /// CSV structure could not be read.
    #[error("{file}: {message}")]
    Csv { file: String, message: String },
}
