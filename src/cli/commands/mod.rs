//! CLI command implementations

use crate::cli::error::CliError;
use crate::cli::output::{
    format_composition_summary, format_diagnostics, format_module_summary, format_tree_summary,
};
use crate::compose::CompositionScope;
use crate::config::OmfConfig;
use crate::convert::{convert_complete_tree, convert_module, convert_module_tree};
use crate::export::{DocumentExporter, ExportFormat};
use crate::models::Oid;
use crate::source::FileSystemSource;
use crate::tree::RootSelection;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments shared by the `module`, `tree` and `complete` commands
#[derive(Debug, Default)]
pub struct ConvertArgs {
    /// Module to convert
    pub name: String,
    /// Search paths, appended after those of the config file
    pub paths: Vec<PathBuf>,
    /// Output format (json, yaml, toml); guessed from `output` when absent
    pub format: Option<String>,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Fail on diagnostics or partial compositions
    pub strict: bool,
    /// Composition scope (loaded, imports)
    pub scope: Option<String>,
    /// Canonical root OID for single-module trees
    pub root: Option<String>,
}

/// Build the effective configuration: config file first, then flags
pub fn resolve_config(args: &ConvertArgs) -> Result<OmfConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            OmfConfig::from_toml_file(path).map_err(|e| CliError::ConfigError(e.to_string()))?
        }
        None => OmfConfig::default(),
    };

    config.search_paths.extend(args.paths.iter().cloned());
    if args.strict {
        config.strict = true;
    }
    if let Some(scope) = &args.scope {
        config.scope = match scope.as_str() {
            "loaded" => CompositionScope::LoadedSet,
            "imports" => CompositionScope::ImportClosure,
            other => {
                return Err(CliError::InvalidArgument(format!(
                    "Unknown scope: {} (expected loaded or imports)",
                    other
                )));
            }
        };
    }
    if let Some(root) = &args.root {
        let oid: Oid = root
            .parse()
            .map_err(|e: crate::models::OidParseError| CliError::InvalidArgument(e.to_string()))?;
        config.root_selection = RootSelection::Canonical(oid);
    }

    config
        .validate()
        .map_err(|e| CliError::ConfigError(e.to_string()))?;
    Ok(config)
}

/// Pick the output format: explicit flag, then output file extension, then JSON
pub fn resolve_format(args: &ConvertArgs) -> Result<ExportFormat, CliError> {
    if let Some(format) = &args.format {
        return format
            .parse()
            .map_err(|e: crate::export::ExportError| CliError::InvalidArgument(e.to_string()));
    }
    Ok(args
        .output
        .as_deref()
        .and_then(ExportFormat::from_path)
        .unwrap_or_default())
}

fn emit<T: Serialize>(document: &T, args: &ConvertArgs) -> Result<(), CliError> {
    let exporter = DocumentExporter::new(resolve_format(args)?);

    match &args.output {
        Some(path) => {
            exporter
                .write_file(document, path)
                .map_err(|e| CliError::ExportError(e.to_string()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let result = exporter
                .export(document)
                .map_err(|e| CliError::ExportError(e.to_string()))?;
            println!("{}", result.content);
        }
    }
    Ok(())
}

/// Handle the `module` command
pub fn handle_module(args: &ConvertArgs) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let mut source = FileSystemSource::new();

    let assembled = convert_module(&mut source, &args.name, &config)?;
    eprint!("{}", format_module_summary(&assembled.module));
    eprint!("{}", format_diagnostics(&assembled.diagnostics));

    emit(&assembled.module, args)
}

/// Handle the `tree` command
pub fn handle_tree(args: &ConvertArgs) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let mut source = FileSystemSource::new();

    let outcome = convert_module_tree(&mut source, &args.name, &config)?;
    eprint!("{}", format_tree_summary(&outcome.tree));
    eprint!("{}", format_diagnostics(&outcome.diagnostics));

    emit(&outcome.tree, args)
}

/// Handle the `complete` command
pub fn handle_complete(args: &ConvertArgs) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let mut source = FileSystemSource::new();

    let composition = convert_complete_tree(&mut source, &args.name, &config)?;
    eprint!("{}", format_composition_summary(&composition));
    eprint!("{}", format_diagnostics(&composition.diagnostics));

    emit(&composition.tree, args)
}
