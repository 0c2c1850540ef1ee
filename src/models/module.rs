//! Assembled module view

use super::enums::Language;
use super::node::{OmfNode, OmfTextualConvention, OmfType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Symbols imported from one source module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmfImport {
    pub mod_name: String,
    pub imported_nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmfRevision {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Table with its row entry, index members and columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmfTable {
    #[serde(flatten)]
    pub node: OmfNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<OmfNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<OmfNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<OmfNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmfNotification {
    #[serde(flatten)]
    pub node: OmfNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<OmfNode>,
}

/// Identity and descriptive metadata of a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleInfo {
    pub module_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Language::is_unknown")]
    pub language: Language,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A module's definitions grouped into ordered buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmfModule {
    #[serde(flatten)]
    pub info: ModuleInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<OmfImport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revisions: Vec<OmfRevision>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scalars: Vec<OmfNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<OmfType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub textual_conventions: Vec<OmfTextualConvention>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<OmfTable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<OmfNotification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_nodes: Vec<OmfNode>,
}

impl OmfModule {
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&OmfTable> {
        self.tables.iter().find(|t| t.node.name == name)
    }

    /// Look up a textual convention by name.
    pub fn textual_convention(&self, name: &str) -> Option<&OmfTextualConvention> {
        self.textual_conventions.iter().find(|tc| tc.r#type.name == name)
    }
}
