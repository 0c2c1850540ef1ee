//! File system MIB source
//!
//! Resolves `<search path>/<MODULE>.json`, `.yaml` or `.yml`, each holding a
//! serialized [`RawModule`] as produced by an external MIB parser. Search paths
//! are tried in registration order; within a directory JSON wins over YAML.

use super::{LoadedSet, MibSource, RawModule, SourceError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Source reading serialized modules from directories
#[derive(Debug, Default)]
pub struct FileSystemSource {
    search_paths: Vec<PathBuf>,
    loaded: LoadedSet,
    initialized: bool,
}

impl FileSystemSource {
    /// Create a new file system source
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Locate the file for `name` on the search paths
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        locate_in(&self.search_paths, name)
    }

    fn fetch(search_paths: &[PathBuf], name: &str) -> Result<RawModule, SourceError> {
        let path = locate_in(search_paths, name).ok_or_else(|| SourceError::ModuleNotFound {
            name: name.to_string(),
            searched: search_paths.to_vec(),
        })?;

        debug!("Reading module {} from {}", name, path.display());
        let content = fs::read_to_string(&path)?;
        let mut module = parse_module(&path, &content)?;

        if module.name.is_empty() {
            module.name = name.to_string();
        } else if module.name != name {
            return Err(SourceError::NameMismatch {
                path: path.display().to_string(),
                expected: name.to_string(),
                found: module.name,
            });
        }
        if module.path.is_none() {
            module.path = Some(path.display().to_string());
        }
        Ok(module)
    }
}

fn locate_in(search_paths: &[PathBuf], name: &str) -> Option<PathBuf> {
    search_paths.iter().find_map(|dir| {
        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{name}.{ext}")))
            .find(|candidate| candidate.is_file())
    })
}

/// Parse a module document, choosing the format from the file extension
fn parse_module(path: &Path, content: &str) -> Result<RawModule, SourceError> {
    let parse_error = |message: String| SourceError::Parse {
        path: path.display().to_string(),
        message,
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        _ => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

impl MibSource for FileSystemSource {
    fn initialize(&mut self) -> Result<(), SourceError> {
        self.loaded.clear();
        self.search_paths.clear();
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

        let search_paths = &self.search_paths;
        let module = self
            .loaded
            .load_with(name, |wanted| Self::fetch(search_paths, wanted))?;
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
