//! OMF SDK - Normalized OID trees and module documents from parsed MIBs
//!
//! Provides:
//! - A MIB source abstraction (in-memory and file-system backed)
//! - Record normalization with identity fingerprints
//! - Bucketed module views with harvested textual conventions
//! - Single-module OID trees and composed multi-module forests
//! - Document export (JSON, YAML, TOML)

pub mod assemble;
#[cfg(feature = "cli")]
pub mod cli;
pub mod compose;
pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod fingerprint;
pub mod models;
pub mod normalize;
pub mod registry;
pub mod session;
pub mod source;
pub mod tree;

// Re-export commonly used types
pub use source::{InMemorySource, MibSource, RawModule, RawRecord, RawType, SourceError};
#[cfg(feature = "native-fs")]
pub use source::FileSystemSource;

pub use assemble::{AssembleOptions, Assembled, assemble_module};
pub use compose::{ComposeOptions, Composition, CompositionScope, CompositionStatus, compose};
pub use config::{ConfigError, OmfConfig, OmfConfigBuilder};
pub use convert::{convert_complete_tree, convert_module, convert_module_tree};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{OmfError, Result};
pub use export::{DocumentExporter, ExportError, ExportFormat, ExportResult};
pub use registry::OrderedRegistry;
pub use session::Session;
pub use tree::{RootSelection, TreeOptions, TreeOutcome, build_forest, build_module_tree};

// Re-export models
pub use models::enums::*;
pub use models::{
    ArcMap, CompleteModuleTree, ModuleInfo, ModuleTree, OmfImport, OmfModule, OmfNode,
    OmfNotification, OmfRevision, OmfTable, OmfTextualConvention, OmfType, Oid, TreeNode,
};
