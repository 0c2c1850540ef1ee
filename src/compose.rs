//! Multi-module composition
//!
//! Resolves a module's imports through the source, then lays the records of
//! every module in scope into a single forest keyed by first OID arc.

use crate::diagnostics::Diagnostics;
use crate::models::CompleteModuleTree;
use crate::normalize::{module_info, normalize_imports, normalize_revisions};
use crate::source::{MibSource, RawModule, SourceError};
use crate::tree::build_forest;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::{info, warn};

/// Which loaded modules contribute records to the composed forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompositionScope {
    /// Every module resident in the source, including ones loaded earlier for
    /// unrelated reasons.
    #[default]
    LoadedSet,
    /// The root module and the modules reachable from it through imports.
    ImportClosure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    pub scope: CompositionScope,
}

/// Whether every import of the root module could be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionStatus {
    Complete,
    /// Import resolution stopped at `failed_import`; the composed document
    /// carries metadata only.
    Partial {
        failed_import: String,
        reason: String,
        /// Imports never attempted, in declaration order.
        skipped: Vec<String>,
    },
}

impl CompositionStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, CompositionStatus::Complete)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub tree: CompleteModuleTree,
    pub status: CompositionStatus,
    pub diagnostics: Diagnostics,
}

/// Compose the forest of `root` and its dependencies.
///
/// `root` must already be loaded. Imported modules are requested one by one
/// in declaration order; the first failure stops resolution and yields a
/// [`CompositionStatus::Partial`] result without a tree. Only an unknown root
/// is an error.
pub fn compose<S>(source: &mut S, root: &str, options: &ComposeOptions) -> Result<Composition, SourceError>
where
    S: MibSource + ?Sized,
{
    let (mut document, imports) = {
        let module = source.get_module(root)?;
        let revisions = normalize_revisions(&module.revisions);
        let imports: Vec<String> = normalize_imports(&module.imports)
            .into_iter()
            .map(|import| import.mod_name)
            .collect();
        (CompleteModuleTree::from(module_info(module, &revisions)), imports)
    };

    for (position, import) in imports.iter().enumerate() {
        if let Err(e) = source.load_module(import) {
            warn!("Composition of {} stopped: import {} failed: {}", root, import, e);
            return Ok(Composition {
                tree: document,
                status: CompositionStatus::Partial {
                    failed_import: import.clone(),
                    reason: e.to_string(),
                    skipped: imports[position + 1..].to_vec(),
                },
                diagnostics: Diagnostics::new(),
            });
        }
    }

    let modules = match options.scope {
        CompositionScope::LoadedSet => source.loaded_modules(),
        CompositionScope::ImportClosure => import_closure(&*source, root),
    };
    let build = build_forest(modules.iter().flat_map(|module| module.nodes.iter()));

    info!(
        "Composed {} from {} modules ({} definitions)",
        root,
        modules.len(),
        build.forest.definition_count()
    );
    document.tree = Some(build.forest);

    Ok(Composition {
        tree: document,
        status: CompositionStatus::Complete,
        diagnostics: build.diagnostics,
    })
}

/// `root` and every loaded module reachable from it through imports, in load
/// order. Unresolved imports are ignored.
pub fn import_closure<'s, S>(source: &'s S, root: &str) -> Vec<&'s RawModule>
where
    S: MibSource + ?Sized,
{
    let mut reachable: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([root]);

    while let Some(name) = queue.pop_front() {
        let Ok(module) = source.get_module(name) else {
            continue;
        };
        if reachable.insert(module.name.as_str()) {
            queue.extend(module.imported_modules());
        }
    }

    source
        .loaded_modules()
        .into_iter()
        .filter(|module| reachable.contains(module.name.as_str()))
        .collect()
}
