//! MIB source abstraction
//!
//! Defines the MibSource trait: the contract of the external MIB parser that
//! loads modules and exposes their records with resolved OIDs. Implementations:
//! - InMemorySource: modules registered up front (embedders, tests)
//! - FileSystemSource: serialized modules found on search paths (native apps)
//!
//! A source owns its loaded-module set. Operations borrow it mutably for their
//! whole duration (see [`crate::session::Session`]), so two operations can never
//! observe each other's loads on the same source.

pub mod memory;
pub mod raw;

#[cfg(feature = "native-fs")]
pub mod filesystem;

pub use memory::InMemorySource;
pub use raw::{RawImport, RawModule, RawNamedNumber, RawRange, RawRecord, RawRevision, RawType};

#[cfg(feature = "native-fs")]
pub use filesystem::FileSystemSource;

use crate::models::Oid;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Error type for source operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source not initialized")]
    NotInitialized,
    #[error("Module not found: {name}")]
    ModuleNotFound { name: String, searched: Vec<PathBuf> },
    #[error("Module not loaded: {0}")]
    NotLoaded(String),
    #[error("Module {module} depends on {dependency}, which failed to load: {source}")]
    Dependency {
        module: String,
        dependency: String,
        #[source]
        source: Box<SourceError>,
    },
    #[error("Module file {path} declares module {found}, expected {expected}")]
    NameMismatch {
        path: String,
        expected: String,
        found: String,
    },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Io(e.to_string())
    }
}

/// Trait for MIB sources
///
/// Mirrors the lifecycle of a MIB parser: initialize, register search paths,
/// load modules (with their dependencies), query, tear down.
pub trait MibSource {
    /// Reset the loaded-module set
    fn initialize(&mut self) -> Result<(), SourceError>;

    /// Register a directory searched for module files
    fn append_search_path(&mut self, path: &Path);

    /// Load a module and its dependencies into the loaded set
    fn load_module(&mut self, name: &str) -> Result<&RawModule, SourceError>;

    /// Get an already loaded module
    fn get_module(&self, name: &str) -> Result<&RawModule, SourceError>;

    /// Every loaded module, in load order
    fn loaded_modules(&self) -> Vec<&RawModule>;

    /// Release the loaded-module set
    fn teardown(&mut self);

    /// Records strictly below `oid` across the loaded set, in OID order.
    ///
    /// Records sharing an OID keep load order.
    fn subtree(&self, oid: &Oid) -> Vec<&RawRecord> {
        let mut records: Vec<&RawRecord> = self
            .loaded_modules()
            .into_iter()
            .flat_map(|module| module.nodes.iter())
            .filter(|record| record.oid.is_descendant_of(oid))
            .collect();
        records.sort_by(|a, b| a.oid.cmp(&b.oid));
        records
    }
}

/// Loaded-module set shared by the source implementations.
#[derive(Debug, Default)]
pub struct LoadedSet {
    modules: Vec<RawModule>,
    index: HashMap<String, usize>,
}

impl LoadedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.modules.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&RawModule> {
        self.index.get(name).map(|&idx| &self.modules[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawModule> {
        self.modules.iter()
    }

    /// Load `name` and, transitively, every module it imports.
    ///
    /// `fetch` produces a module by name. An imported module that cannot be
    /// found is skipped, as a MIB parser does with unresolved imports; asking
    /// for it by name later reports the failure. Any other failure of an
    /// imported module is a hard dependency error. Nothing is added to the set
    /// unless the load succeeds.
    pub fn load_with<F>(&mut self, name: &str, mut fetch: F) -> Result<&RawModule, SourceError>
    where
        F: FnMut(&str) -> Result<RawModule, SourceError>,
    {
        let mut staged: Vec<RawModule> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::from([name.to_string()]);

        while let Some(next) = queue.pop_front() {
            if self.contains(&next) || !seen.insert(next.clone()) {
                continue;
            }

            let mut module = match fetch(&next) {
                Ok(module) => module,
                Err(e) if next == name => return Err(e),
                Err(SourceError::ModuleNotFound { .. }) => {
                    warn!("Module {} imports {}, which was not found", name, next);
                    continue;
                }
                Err(e) => {
                    return Err(SourceError::Dependency {
                        module: name.to_string(),
                        dependency: next,
                        source: Box::new(e),
                    });
                }
            };

            module.stamp_records();
            for dependency in module.imported_modules() {
                queue.push_back(dependency.to_string());
            }
            debug!("Fetched module {} ({} records)", module.name, module.nodes.len());
            staged.push(module);
        }

        for module in staged {
            self.index.insert(module.name.clone(), self.modules.len());
            self.modules.push(module);
        }

        self.get(name)
            .ok_or_else(|| SourceError::NotLoaded(name.to_string()))
    }
}
