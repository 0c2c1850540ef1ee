//! Configuration for module conversion

use crate::assemble::{AssembleOptions, DEFAULT_ROW_TABLE_ARCS};
use crate::compose::{ComposeOptions, CompositionScope};
use crate::models::Oid;
use crate::tree::{RootSelection, TreeOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Error in a configuration value or file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// Configuration shared by the conversion operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OmfConfig {
    /// Directories searched for module files, in order
    pub search_paths: Vec<PathBuf>,

    /// Root vertex of single-module trees
    pub root_selection: RootSelection,

    /// Trailing arcs stripped from a row OID to find its table
    pub row_table_arcs: usize,

    /// Modules contributing to a composed tree
    pub scope: CompositionScope,

    /// Fail instead of returning results that carry diagnostics
    pub strict: bool,
}

impl Default for OmfConfig {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            root_selection: RootSelection::ShortestPath,
            row_table_arcs: DEFAULT_ROW_TABLE_ARCS,
            scope: CompositionScope::LoadedSet,
            strict: false,
        }
    }
}

impl OmfConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> OmfConfigBuilder {
        OmfConfigBuilder::default()
    }

    /// Check values that deserialization alone cannot rule out
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_table_arcs == 0 {
            return Err(ConfigError::InvalidValue(
                "rowTableArcs must be at least 1".to_string(),
            ));
        }
        if let RootSelection::Canonical(root) = &self.root_selection {
            if root.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "canonical root OID must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions::new(self.root_selection.clone())
    }

    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            row_table_arcs: self.row_table_arcs,
        }
    }

    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions { scope: self.scope }
    }

    /// Parse and validate a TOML configuration document
    #[cfg(feature = "toml")]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file
    #[cfg(feature = "toml")]
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }
}

/// Builder for OmfConfig
#[derive(Debug, Default)]
pub struct OmfConfigBuilder {
    config: OmfConfig,
}

impl OmfConfigBuilder {
    /// Append a module search path
    pub fn search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.search_paths.push(path.into());
        self
    }

    /// Replace all search paths
    pub fn search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn root_selection(mut self, selection: RootSelection) -> Self {
        self.config.root_selection = selection;
        self
    }

    /// Pin single-module trees to a fixed root OID
    pub fn canonical_root(mut self, root: Oid) -> Self {
        self.config.root_selection = RootSelection::Canonical(root);
        self
    }

    /// Set the arcs stripped from a row OID (at least 1)
    pub fn row_table_arcs(mut self, arcs: usize) -> Self {
        self.config.row_table_arcs = arcs.max(1);
        self
    }

    pub fn scope(mut self, scope: CompositionScope) -> Self {
        self.config.scope = scope;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Build the configuration
    pub fn build(self) -> OmfConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OmfConfig::default();
        assert_eq!(config.row_table_arcs, 2);
        assert_eq!(config.root_selection, RootSelection::ShortestPath);
        assert_eq!(config.scope, CompositionScope::LoadedSet);
        assert!(!config.strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = OmfConfig::builder()
            .search_path("/usr/share/snmp/mibs")
            .search_path("./mibs")
            .canonical_root(Oid::new(vec![1, 3, 6, 1]))
            .scope(CompositionScope::ImportClosure)
            .strict(true)
            .build();

        assert_eq!(config.search_paths.len(), 2);
        assert_eq!(
            config.tree_options().root,
            RootSelection::Canonical(Oid::new(vec![1, 3, 6, 1]))
        );
        assert_eq!(config.compose_options().scope, CompositionScope::ImportClosure);
        assert!(config.strict);
    }

    #[test]
    fn test_row_table_arcs_clamping() {
        let config = OmfConfig::builder().row_table_arcs(0).build();
        assert_eq!(config.assemble_options().row_table_arcs, 1);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = OmfConfig {
            row_table_arcs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let config = OmfConfig::builder().canonical_root(Oid::default()).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = r#"{"rowTableArcs": 1, "rootSelection": {"canonical": "1.3.6.1"}}"#;
        let config: OmfConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.row_table_arcs, 1);
        assert_eq!(
            config.root_selection,
            RootSelection::Canonical(Oid::new(vec![1, 3, 6, 1]))
        );
        assert!(config.search_paths.is_empty());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_str() {
        let config = OmfConfig::from_toml_str(
            r#"
            searchPaths = ["/usr/share/snmp/mibs"]
            scope = "importClosure"
            strict = true

            [rootSelection]
            canonical = "1.3.6.1"
            "#,
        )
        .unwrap();

        assert_eq!(config.search_paths, vec![PathBuf::from("/usr/share/snmp/mibs")]);
        assert_eq!(config.scope, CompositionScope::ImportClosure);
        assert!(config.strict);
        assert_eq!(config.row_table_arcs, 2);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_str_validates() {
        assert!(matches!(
            OmfConfig::from_toml_str("rowTableArcs = 0"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            OmfConfig::from_toml_str("scope = 7"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
