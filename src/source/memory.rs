//! In-memory MIB source
//!
//! Holds a catalog of already parsed modules. `load_module` moves a module
//! (and its imports) from the catalog into the loaded set, exactly like a
//! parser would after reading the files from disk.

use super::{LoadedSet, MibSource, RawModule, SourceError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Source backed by modules registered up front
#[derive(Debug, Default)]
pub struct InMemorySource {
    catalog: HashMap<String, RawModule>,
    search_paths: Vec<PathBuf>,
    loaded: LoadedSet,
    initialized: bool,
    requested: Vec<String>,
}

impl InMemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module, builder style
    pub fn with_module(mut self, module: RawModule) -> Self {
        self.register(module);
        self
    }

    /// Make a module available for loading. Replaces a module of the same name.
    pub fn register(&mut self, module: RawModule) {
        self.catalog.insert(module.name.clone(), module);
    }

    /// Search paths registered since the last `initialize`
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Every module name passed to `load_module`, in call order
    pub fn requested(&self) -> &[String] {
        &self.requested
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl MibSource for InMemorySource {
    fn initialize(&mut self) -> Result<(), SourceError> {
        self.loaded.clear();
        self.search_paths.clear();
        self.requested.clear();
        self.initialized = true;
        Ok(())
    }

    fn append_search_path(&mut self, path: &Path) {
        self.search_paths.push(path.to_path_buf());
    }

    fn load_module(&mut self, name: &str) -> Result<&RawModule, SourceError> {
        if !self.initialized {
            return Err(SourceError::NotInitialized);
        }
        self.requested.push(name.to_string());

        let catalog = &self.catalog;
        let module = self.loaded.load_with(name, |wanted| {
            catalog
                .get(wanted)
                .cloned()
                .ok_or_else(|| SourceError::ModuleNotFound {
                    name: wanted.to_string(),
                    searched: Vec::new(),
                })
        })?;
        info!("Loaded module {} ({} records)", module.name, module.nodes.len());
        Ok(module)
    }

    fn get_module(&self, name: &str) -> Result<&RawModule, SourceError> {
        self.loaded
            .get(name)
            .ok_or_else(|| SourceError::NotLoaded(name.to_string()))
    }

    fn loaded_modules(&self) -> Vec<&RawModule> {
        self.loaded.iter().collect()
    }

    fn teardown(&mut self) {
        self.loaded.clear();
        self.initialized = false;
    }
}
