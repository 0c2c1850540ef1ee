//! Output formatting for CLI
//!
//! Human-readable summaries printed to stderr; documents themselves go to
//! stdout or the output file.

use crate::compose::{Composition, CompositionStatus};
use crate::diagnostics::Diagnostics;
use crate::models::{ModuleTree, OmfModule, TreeNode};

/// Format the diagnostics of a result, or nothing when there are none
pub fn format_diagnostics(diagnostics: &Diagnostics) -> String {
    if diagnostics.is_empty() {
        return String::new();
    }

    let mut output = format!("\n⚠️  {} diagnostic(s):\n", diagnostics.len());
    for diagnostic in diagnostics {
        output.push_str(&format!("  - {}\n", diagnostic));
    }
    output
}

/// Summarize an assembled module
pub fn format_module_summary(module: &OmfModule) -> String {
    let mut output = format!("\n✅ Assembled {} ({}):\n", module.name(), module.info.module_hash);
    output.push_str(&format!("  Imports: {}\n", module.imports.len()));
    output.push_str(&format!("  Revisions: {}\n", module.revisions.len()));
    output.push_str(&format!("  Scalars: {}\n", module.scalars.len()));
    output.push_str(&format!("  Tables: {}\n", module.tables.len()));

    let without_entry: Vec<&str> = module
        .tables
        .iter()
        .filter(|table| table.entry.is_none())
        .map(|table| table.node.name.as_str())
        .collect();
    if !without_entry.is_empty() {
        output.push_str(&format!("    Without entry: {}\n", without_entry.join(", ")));
    }

    output.push_str(&format!("  Notifications: {}\n", module.notifications.len()));
    output.push_str(&format!("  Types: {}\n", module.types.len()));
    output.push_str(&format!(
        "  Textual conventions: {}\n",
        module.textual_conventions.len()
    ));
    output.push_str(&format!("  Other nodes: {}\n", module.other_nodes.len()));
    output
}

/// Summarize a single-module tree
pub fn format_tree_summary(tree: &ModuleTree) -> String {
    match &tree.root_node {
        Some(root) => format!(
            "\n✅ Tree for {} rooted at {} ({} definitions)\n",
            tree.info.name,
            root.node_oid,
            root.definition_count()
        ),
        None => format!("\n⚠️  {} has no rootable definitions\n", tree.info.name),
    }
}

/// Summarize a composition, naming the failed import of a partial one
pub fn format_composition_summary(composition: &Composition) -> String {
    match &composition.status {
        CompositionStatus::Complete => {
            let forest = composition.tree.tree.as_ref();
            let definitions = forest.map_or(0, |forest| forest.definition_count());
            let deepest = forest
                .into_iter()
                .flat_map(|forest| forest.values())
                .flat_map(TreeNode::preorder)
                .map(|vertex| vertex.node_oid.split('.').count())
                .max()
                .unwrap_or(0);
            format!(
                "\n✅ Composed {} ({} definitions, depth {})\n",
                composition.tree.name, definitions, deepest
            )
        }
        CompositionStatus::Partial {
            failed_import,
            reason,
            skipped,
        } => {
            let mut output = format!(
                "\n⚠️  Partial composition of {}: import {} failed\n",
                composition.tree.name, failed_import
            );
            output.push_str(&format!("  Reason: {}\n", reason));
            if !skipped.is_empty() {
                output.push_str(&format!("  Not attempted: {}\n", skipped.join(", ")));
            }
            output
        }
    }
}
