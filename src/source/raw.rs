//! Raw definition records as exposed by a MIB source
//!
//! These mirror what a MIB parser hands over after resolving OIDs and types.
//! They are read-only input to the SDK; the serde shape is the one
//! [`FileSystemSource`](super::filesystem::FileSystemSource) reads from disk.

use crate::models::{Access, BaseType, Decl, Language, NodeKind, Oid, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNamedNumber {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRange {
    pub min: i64,
    pub max: i64,
}

/// Type reference attached to a record, or a standalone type declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawType {
    pub name: String,
    pub base_type: BaseType,
    pub decl: Decl,
    pub description: Option<String>,
    #[serde(rename = "enum")]
    pub enum_values: Vec<RawNamedNumber>,
    pub ranges: Vec<RawRange>,
    pub format: Option<String>,
    pub units: Option<String>,
    pub status: Status,
    pub reference: Option<String>,
}

impl RawType {
    pub fn new(name: impl Into<String>, base_type: BaseType) -> Self {
        Self {
            name: name.into(),
            base_type,
            ..Default::default()
        }
    }

    pub fn with_decl(mut self, decl: Decl) -> Self {
        self.decl = decl;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_enum_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.enum_values.push(RawNamedNumber {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.ranges.push(RawRange { min, max });
        self
    }
}

/// A definition record with a resolved OID.
///
/// `columns` and `index` are only populated for tables, `objects` only for
/// notifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    pub name: String,
    /// Owning module; stamped by the source when the module is loaded.
    pub module: String,
    pub kind: NodeKind,
    pub oid: Oid,
    pub access: Access,
    pub decl: Decl,
    pub status: Status,
    pub description: Option<String>,
    pub units: Option<String>,
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: Option<RawType>,
    pub columns: Vec<RawRecord>,
    pub index: Vec<RawRecord>,
    pub objects: Vec<RawRecord>,
}

impl RawRecord {
    pub fn new(name: impl Into<String>, kind: NodeKind, oid: Oid) -> Self {
        Self {
            name: name.into(),
            kind,
            oid,
            ..Default::default()
        }
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn with_decl(mut self, decl: Decl) -> Self {
        self.decl = decl;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, type_ref: RawType) -> Self {
        self.type_ref = Some(type_ref);
        self
    }

    pub fn with_columns(mut self, columns: Vec<RawRecord>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_index(mut self, index: Vec<RawRecord>) -> Self {
        self.index = index;
        self
    }

    pub fn with_objects(mut self, objects: Vec<RawRecord>) -> Self {
        self.objects = objects;
        self
    }

    /// Set the owning module on this record and every nested record.
    pub(crate) fn stamp_module(&mut self, module: &str) {
        if self.module.is_empty() {
            self.module = module.to_string();
        }
        for nested in self
            .columns
            .iter_mut()
            .chain(self.index.iter_mut())
            .chain(self.objects.iter_mut())
        {
            nested.stamp_module(module);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRevision {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// One imported symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImport {
    pub module: String,
    pub name: String,
}

/// A parsed module as handed over by a MIB source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawModule {
    pub name: String,
    pub description: Option<String>,
    pub organization: Option<String>,
    pub contact_info: Option<String>,
    pub reference: Option<String>,
    pub language: Language,
    pub path: Option<String>,
    pub revisions: Vec<RawRevision>,
    pub imports: Vec<RawImport>,
    /// Flat list of every record defined by the module.
    pub nodes: Vec<RawRecord>,
    /// Standalone type declarations.
    pub types: Vec<RawType>,
}

impl RawModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_revision(mut self, date: DateTime<Utc>, description: impl Into<String>) -> Self {
        self.revisions.push(RawRevision {
            date,
            description: description.into(),
        });
        self
    }

    pub fn with_import(mut self, module: impl Into<String>, name: impl Into<String>) -> Self {
        self.imports.push(RawImport {
            module: module.into(),
            name: name.into(),
        });
        self
    }

    pub fn with_node(mut self, node: RawRecord) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_type(mut self, r#type: RawType) -> Self {
        self.types.push(r#type);
        self
    }

    /// Names of imported modules, each once, in first-seen order.
    pub fn imported_modules(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for import in &self.imports {
            if !names.contains(&import.module.as_str()) {
                names.push(&import.module);
            }
        }
        names
    }

    /// Set the owning module on every record.
    pub(crate) fn stamp_records(&mut self) {
        let name = self.name.clone();
        for node in &mut self.nodes {
            node.stamp_module(&name);
        }
    }
}
