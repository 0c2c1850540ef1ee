//! Export functionality
//!
//! Serializes OMF documents (module views and trees) to:
//! - JSON
//! - YAML
//! - TOML (feature `toml`)

use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Result of an export operation
#[derive(Debug)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err.to_string())
    }
}

/// Document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Toml => "toml",
        }
    }

    /// File extension for documents in this format
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "toml" => Ok(ExportFormat::Toml),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Exporter for OMF documents
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExporter {
    format: ExportFormat,
}

impl DocumentExporter {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Serialize `document` (pretty-printed for JSON and TOML).
    pub fn export<T: Serialize + ?Sized>(&self, document: &T) -> Result<ExportResult, ExportError> {
        let content = match self.format {
            ExportFormat::Json => serde_json::to_string_pretty(document)?,
            ExportFormat::Yaml => serde_yaml::to_string(document)?,
            ExportFormat::Toml => to_toml(document)?,
        };

        Ok(ExportResult {
            content,
            format: self.format.to_string(),
        })
    }

    /// Serialize `document` and write it to `path`.
    pub fn write_file<T: Serialize + ?Sized>(
        &self,
        document: &T,
        path: &Path,
    ) -> Result<ExportResult, ExportError> {
        let result = self.export(document)?;
        std::fs::write(path, &result.content)
            .map_err(|e| ExportError::IoError(format!("{}: {}", path.display(), e)))?;
        Ok(result)
    }
}

#[cfg(feature = "toml")]
fn to_toml<T: Serialize + ?Sized>(document: &T) -> Result<String, ExportError> {
    toml::to_string_pretty(document).map_err(|e| ExportError::SerializationError(e.to_string()))
}

#[cfg(not(feature = "toml"))]
fn to_toml<T: Serialize + ?Sized>(_document: &T) -> Result<String, ExportError> {
    Err(ExportError::UnsupportedFormat(
        "toml (built without the toml feature)".to_string(),
    ))
}
