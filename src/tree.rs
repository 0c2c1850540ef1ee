//! OID tree construction
//!
//! Two modes:
//! - single root ([`build_module_tree`]): one module's records under a selected
//!   root vertex, expanded through the source's subtree queries
//! - forest ([`build_forest`]): any set of records, each inserted along its own
//!   OID from an empty forest keyed by first arc
//!
//! Both create synthetic vertices for every prefix without a definition of its
//! own, and report every dropped or overwritten record as a [`Diagnostic`].

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::models::{ArcMap, ModuleTree, Oid, TreeNode};
use crate::normalize::{module_info, normalize_imports, normalize_node, normalize_revisions};
use crate::source::{MibSource, RawModule, RawRecord, SourceError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info};

/// How the root vertex of a single-module tree is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RootSelection {
    /// Anchor on the module's shortest OID (first encountered on ties), then
    /// widen to the longest prefix shared by every eligible record.
    ///
    /// A heuristic: modules spreading records over unrelated branches get a
    /// shallow root (the empty path when first arcs differ), and a module with
    /// nothing but first-arc-0 records gets no tree at all.
    #[default]
    ShortestPath,
    /// Pin the root to a fixed OID such as `1.3.6.1`.
    Canonical(Oid),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeOptions {
    pub root: RootSelection,
}

impl TreeOptions {
    pub fn new(root: RootSelection) -> Self {
        Self { root }
    }
}

/// The chosen root: its path, and the record defined exactly there, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct RootChoice<'r> {
    pub path: Oid,
    pub anchor: Option<&'r RawRecord>,
}

/// A single-root tree and what was left out of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeBuild {
    pub root: Option<TreeNode>,
    pub diagnostics: Diagnostics,
}

/// A module tree document plus its diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeOutcome {
    pub tree: ModuleTree,
    pub diagnostics: Diagnostics,
}

/// A forest keyed by first arc plus its diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForestBuild {
    pub forest: ArcMap,
    pub diagnostics: Diagnostics,
}

/// Records placed under a single root: not administrative (first arc 0) and
/// with a non-empty OID.
fn is_rootable(record: &RawRecord) -> bool {
    !matches!(record.oid.first_arc(), None | Some(0))
}

/// Choose the root for `records`, or `None` when none can be rooted.
pub fn select_root<'r>(records: &[&'r RawRecord], selection: &RootSelection) -> Option<RootChoice<'r>> {
    match selection {
        RootSelection::ShortestPath => {
            let eligible = records.iter().copied().filter(|record| is_rootable(record));
            let anchor = eligible.clone().min_by_key(|record| record.oid.len())?;
            // Disjoint first arcs widen the root to the empty path.
            let path = eligible.fold(anchor.oid.clone(), |prefix, record| {
                prefix.common_prefix(&record.oid)
            });
            let anchor = (path == anchor.oid).then_some(anchor);
            Some(RootChoice { path, anchor })
        }
        RootSelection::Canonical(path) => Some(RootChoice {
            path: path.clone(),
            anchor: records.iter().copied().find(|record| record.oid == *path),
        }),
    }
}

/// Build the single-root tree of `module`.
///
/// Every rootable record of the module is queued in declared order; each one
/// dequeued is placed at its exact path and, for the module's own records, its
/// source-reported subtree is queued behind it. The visited guard is keyed by
/// OID: a second record under a different name at a visited OID is dropped
/// with a [`Diagnostic::DuplicateOid`].
pub fn build_tree<S>(source: &S, module: &RawModule, options: &TreeOptions) -> TreeBuild
where
    S: MibSource + ?Sized,
{
    let mut diagnostics = Diagnostics::new();
    let records: Vec<&RawRecord> = module.nodes.iter().collect();

    let Some(choice) = select_root(&records, &options.root) else {
        for record in &records {
            diagnostics.push(outside_root(record, ""));
        }
        return TreeBuild {
            root: None,
            diagnostics,
        };
    };

    let root_path = choice.path.to_dotted();
    debug!(
        "Module {} rooted at {} ({})",
        module.name,
        if root_path.is_empty() { "<empty>" } else { root_path.as_str() },
        choice.anchor.map_or("synthetic", |anchor| anchor.name.as_str())
    );

    let mut root = TreeNode::new(root_path.clone());
    let mut visited: HashMap<&Oid, &str> = HashMap::new();
    let mut seen: HashSet<(&str, &str, &Oid)> = HashSet::new();
    let mut queue: VecDeque<(&RawRecord, bool)> = VecDeque::new();

    for &record in &records {
        let placeable = match &options.root {
            RootSelection::ShortestPath => is_rootable(record),
            RootSelection::Canonical(path) => path.is_prefix_of(&record.oid),
        };
        if placeable {
            queue.push_back((record, true));
        } else {
            diagnostics.push(outside_root(record, &root_path));
        }
    }

    while let Some((record, expand)) = queue.pop_front() {
        if !seen.insert((record.module.as_str(), record.name.as_str(), &record.oid)) {
            continue;
        }
        if let Some(&kept) = visited.get(&record.oid) {
            if kept != record.name {
                diagnostics.push(Diagnostic::DuplicateOid {
                    oid: record.oid.to_dotted(),
                    kept: kept.to_string(),
                    dropped: record.name.clone(),
                });
            }
            continue;
        }
        let Some(relative) = record.oid.relative_to(&choice.path) else {
            diagnostics.push(outside_root(record, &root_path));
            continue;
        };

        visited.insert(&record.oid, record.name.as_str());
        root.insert(relative, normalize_node(record));

        if expand {
            for descendant in source.subtree(&record.oid) {
                queue.push_back((descendant, false));
            }
        }
    }

    TreeBuild {
        root: Some(root),
        diagnostics,
    }
}

fn outside_root(record: &RawRecord, root: &str) -> Diagnostic {
    Diagnostic::OutsideRoot {
        name: record.name.clone(),
        oid: record.oid.to_dotted(),
        root: root.to_string(),
    }
}

/// Build the [`ModuleTree`] document of a loaded module.
pub fn build_module_tree<S>(
    source: &S,
    name: &str,
    options: &TreeOptions,
) -> Result<TreeOutcome, SourceError>
where
    S: MibSource + ?Sized,
{
    let module = source.get_module(name)?;
    let revisions = normalize_revisions(&module.revisions);
    let build = build_tree(source, module, options);

    let tree = ModuleTree {
        info: module_info(module, &revisions),
        module_imports: normalize_imports(&module.imports),
        root_node: build.root,
    };
    info!(
        "Built tree for {} ({} definitions, {} diagnostics)",
        name,
        tree.root_node.as_ref().map_or(0, TreeNode::definition_count),
        build.diagnostics.len()
    );

    Ok(TreeOutcome {
        tree,
        diagnostics: build.diagnostics,
    })
}

/// Insert every record along its own OID into an empty forest.
///
/// A later record at an occupied path replaces the earlier one. The
/// replacement is reported unless both share the same identity fingerprint,
/// as happens when several modules restate a well-known node.
pub fn build_forest<'r, I>(records: I) -> ForestBuild
where
    I: IntoIterator<Item = &'r RawRecord>,
{
    let mut forest = ArcMap::new();
    let mut diagnostics = Diagnostics::new();

    for record in records {
        let Some((&first, rest)) = record.oid.arcs().split_first() else {
            diagnostics.push(outside_root(record, ""));
            continue;
        };

        let top = forest
            .entry(first)
            .or_insert_with(|| TreeNode::new(first.to_string()));
        let node = normalize_node(record);
        let current = node.name.clone();
        let current_hash = node.node_hash.clone();

        if let Some(previous) = top.insert(rest, node) {
            if previous.node_hash != current_hash {
                diagnostics.push(Diagnostic::OidOverwritten {
                    oid: record.oid.to_dotted(),
                    previous: previous.name,
                    current,
                });
            }
        }
    }

    ForestBuild {
        forest,
        diagnostics,
    }
}
