//! Crate-level error type

use crate::config::ConfigError;
use crate::diagnostics::Diagnostic;
use crate::export::ExportError;
use crate::source::SourceError;

/// Error returned by the top-level conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum OmfError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
    /// Strict mode: the result carried diagnostics.
    #[error("Module {module} rejected: {} diagnostic(s), first: {}", .diagnostics.len(), first_of(.diagnostics))]
    Rejected {
        module: String,
        diagnostics: Vec<Diagnostic>,
    },
    /// Strict mode: composition stopped at a failing import.
    #[error("Module {module}: import {import} failed: {reason}")]
    ImportFailed {
        module: String,
        import: String,
        reason: String,
    },
}

fn first_of(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, OmfError>;
