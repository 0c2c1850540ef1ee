//! Normalized node and type descriptors

use super::enums::{Access, BaseType, Decl, NodeKind, Status};
use crate::registry::OrderedRegistry;
use serde::{Deserialize, Serialize};

/// Enumeration of a type: symbolic name → integer value, in declared order.
pub type OmfEnum = OrderedRegistry<i64>;

/// Inclusive `[min, max]` range constraint.
pub type OmfRange = [i64; 2];

/// Canonical projection of a type reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmfType {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "BaseType::is_unknown")]
    pub base_type: BaseType,
    #[serde(default, skip_serializing_if = "Decl::is_unknown")]
    pub decl: Decl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "OrderedRegistry::is_empty")]
    pub r#enum: OmfEnum,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<OmfRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Status::is_unknown")]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl OmfType {
    /// Whether this type is a named, reusable textual convention.
    pub fn is_textual_convention(&self) -> bool {
        self.decl.is_textual_convention() && !self.name.is_empty()
    }
}

/// Canonical projection of a definition record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmfNode {
    /// Fingerprint of name, OID, status and kind.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub node_hash: String,
    #[serde(default, skip_serializing_if = "Access::is_unknown")]
    pub access: Access,
    #[serde(default, skip_serializing_if = "Decl::is_unknown")]
    pub decl: Decl,
    #[serde(default, skip_serializing_if = "NodeKind::is_unknown")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub oid: String,
    #[serde(default, skip_serializing_if = "Status::is_unknown")]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<OmfType>,
}

impl OmfNode {
    /// The node's type, when it is a textual convention.
    pub fn textual_convention(&self) -> Option<&OmfType> {
        self.r#type.as_ref().filter(|t| t.is_textual_convention())
    }
}

/// Named, reusable type harvested from type references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OmfTextualConvention {
    #[serde(flatten)]
    pub r#type: OmfType,
}

impl From<OmfType> for OmfTextualConvention {
    fn from(r#type: OmfType) -> Self {
        Self { r#type }
    }
}
