//! CLI error type

use crate::error::OmfError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Conversion failed: {0}")]
    ConversionError(String),
    #[error("Export failed: {0}")]
    ExportError(String),
}

impl From<OmfError> for CliError {
    fn from(err: OmfError) -> Self {
        match err {
            OmfError::Config(e) => CliError::ConfigError(e.to_string()),
            OmfError::Export(e) => CliError::ExportError(e.to_string()),
            other => CliError::ConversionError(other.to_string()),
        }
    }
}
