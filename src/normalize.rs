//! Record normalization
//!
//! Maps raw source records into their canonical OMF shape. Kind-specific
//! structure (table columns and index members, notification objects) is
//! resolved once here into a [`Definition`], so later stages match on a closed
//! set of variants instead of re-inspecting kind tags.

use crate::fingerprint::{module_fingerprint, node_fingerprint};
use crate::models::{
    ModuleInfo, NodeKind, OmfEnum, OmfImport, OmfNode, OmfNotification, OmfRevision, OmfTable,
    OmfType,
};
use crate::registry::OrderedRegistry;
use crate::source::{RawImport, RawModule, RawRecord, RawRevision, RawType};

/// A normalized record, classified by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Scalar(OmfNode),
    Table(OmfTable),
    Row(OmfNode),
    Notification(OmfNotification),
    /// Columns, plain nodes, groups, compliances and anything else.
    Other(OmfNode),
}

impl Definition {
    /// The normalized node at the heart of this definition.
    pub fn node(&self) -> &OmfNode {
        match self {
            Definition::Scalar(node) | Definition::Row(node) | Definition::Other(node) => node,
            Definition::Table(table) => &table.node,
            Definition::Notification(notification) => &notification.node,
        }
    }
}

/// Normalize a type reference.
///
/// Enumeration values keep their declared order (a repeated name keeps its
/// first position and its last value). Ranges are kept as declared.
pub fn normalize_type(raw: &RawType) -> OmfType {
    let mut values = OmfEnum::new();
    for named in &raw.enum_values {
        values.insert(named.name.clone(), named.value);
    }

    OmfType {
        name: raw.name.clone(),
        base_type: raw.base_type,
        decl: raw.decl,
        description: raw.description.clone(),
        r#enum: values,
        format: raw.format.clone(),
        ranges: raw.ranges.iter().map(|range| [range.min, range.max]).collect(),
        reference: raw.reference.clone(),
        status: raw.status,
        units: raw.units.clone(),
    }
}

/// Normalize a single record, ignoring any nested structure.
pub fn normalize_node(raw: &RawRecord) -> OmfNode {
    let oid = raw.oid.to_dotted();
    let node_hash = node_fingerprint(&raw.name, &oid, raw.status, raw.kind);

    OmfNode {
        node_hash,
        access: raw.access,
        decl: raw.decl,
        kind: raw.kind,
        name: raw.name.clone(),
        module: raw.module.clone(),
        description: raw.description.clone(),
        oid,
        status: raw.status,
        r#type: raw.type_ref.as_ref().map(normalize_type),
    }
}

/// Normalize a table with its columns (declared order) and index members
/// (encounter order).
pub fn normalize_table(raw: &RawRecord) -> OmfTable {
    OmfTable {
        node: normalize_node(raw),
        entry: None,
        indexes: raw.index.iter().map(normalize_node).collect(),
        columns: raw.columns.iter().map(normalize_node).collect(),
    }
}

/// Normalize a notification with its objects in declared order.
pub fn normalize_notification(raw: &RawRecord) -> OmfNotification {
    OmfNotification {
        node: normalize_node(raw),
        objects: raw.objects.iter().map(normalize_node).collect(),
    }
}

/// Normalize a record and classify it by kind.
pub fn classify(raw: &RawRecord) -> Definition {
    match raw.kind {
        NodeKind::Scalar => Definition::Scalar(normalize_node(raw)),
        NodeKind::Table => Definition::Table(normalize_table(raw)),
        NodeKind::Row => Definition::Row(normalize_node(raw)),
        NodeKind::Notification => Definition::Notification(normalize_notification(raw)),
        _ => Definition::Other(normalize_node(raw)),
    }
}

/// Group imported symbols per source module.
///
/// Modules appear in first-seen order; each module lists its symbols once, in
/// first-seen order.
pub fn normalize_imports(imports: &[RawImport]) -> Vec<OmfImport> {
    let mut grouped: OrderedRegistry<OmfImport> = OrderedRegistry::new();
    for import in imports {
        match grouped.get_mut(&import.module) {
            Some(existing) => {
                if !existing.imported_nodes.contains(&import.name) {
                    existing.imported_nodes.push(import.name.clone());
                }
            }
            None => {
                grouped.insert(
                    import.module.clone(),
                    OmfImport {
                        mod_name: import.module.clone(),
                        imported_nodes: vec![import.name.clone()],
                    },
                );
            }
        }
    }
    grouped.into_vec()
}

pub fn normalize_revisions(revisions: &[RawRevision]) -> Vec<OmfRevision> {
    revisions
        .iter()
        .map(|revision| OmfRevision {
            date: revision.date,
            description: revision.description.clone(),
        })
        .collect()
}

/// Module metadata with its identity fingerprint.
pub fn module_info(module: &RawModule, revisions: &[OmfRevision]) -> ModuleInfo {
    let description = module.description.as_deref().unwrap_or_default();

    ModuleInfo {
        module_hash: module_fingerprint(description, &module.name, revisions),
        contact_info: module.contact_info.clone(),
        description: module.description.clone(),
        language: module.language,
        name: module.name.clone(),
        organization: module.organization.clone(),
        path: module.path.clone(),
        reference: module.reference.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Access, BaseType, Decl, Oid, Status};

    fn if_type() -> RawType {
        RawType::new("IANAifType", BaseType::Enum)
            .with_decl(Decl::TextualConvention)
            .with_enum_value("other", 1)
            .with_enum_value("ethernetCsmacd", 6)
            .with_enum_value("regular1822", 2)
            .with_range(10, 20)
            .with_range(1, 5)
    }

    #[test]
    fn test_normalize_type_preserves_declared_order() {
        let omf = normalize_type(&if_type());

        let names: Vec<&str> = omf.r#enum.keys().collect();
        assert_eq!(names, vec!["other", "ethernetCsmacd", "regular1822"]);
        assert_eq!(omf.r#enum.get("ethernetCsmacd"), Some(&6));
        assert_eq!(omf.ranges, vec![[10, 20], [1, 5]]);
        assert!(omf.is_textual_convention());
    }

    #[test]
    fn test_normalize_node_without_type() {
        let raw = RawRecord::new("ifNumber", NodeKind::Scalar, Oid::new(vec![1, 3, 6, 1, 2, 1, 2, 1]))
            .with_access(Access::ReadOnly)
            .with_status(Status::Current);
        let node = normalize_node(&raw);

        assert_eq!(node.oid, "1.3.6.1.2.1.2.1");
        assert!(node.r#type.is_none());
        assert_eq!(
            node.node_hash,
            node_fingerprint("ifNumber", "1.3.6.1.2.1.2.1", Status::Current, NodeKind::Scalar)
        );
    }

    #[test]
    fn test_fingerprint_ignores_non_identity_fields() {
        let raw = RawRecord::new("ifType", NodeKind::Column, Oid::new(vec![1, 3, 6, 1, 2, 1, 2, 2, 1, 3]))
            .with_status(Status::Current);
        let plain = normalize_node(&raw);
        let decorated = normalize_node(
            &raw.clone()
                .with_description("The type of interface.")
                .with_access(Access::ReadOnly)
                .with_type(if_type()),
        );

        assert_eq!(plain.node_hash, decorated.node_hash);
        assert_ne!(plain, decorated);
    }

    #[test]
    fn test_classify_table_keeps_column_order() {
        let base = Oid::new(vec![1, 3, 6, 1, 2, 1, 2, 2]);
        let column = |name: &str, arc: u32| {
            RawRecord::new(name, NodeKind::Column, base.child(1).child(arc))
        };
        let raw = RawRecord::new("ifTable", NodeKind::Table, base.clone())
            .with_columns(vec![column("ifIndex", 1), column("ifDescr", 2), column("ifType", 3)])
            .with_index(vec![column("ifIndex", 1)]);

        let Definition::Table(table) = classify(&raw) else {
            panic!("expected a table");
        };
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ifIndex", "ifDescr", "ifType"]);
        assert_eq!(table.indexes.len(), 1);
        assert!(table.entry.is_none());
    }

    #[test]
    fn test_classify_other_kinds() {
        let oid = Oid::new(vec![1, 3, 6, 1, 2, 1, 2, 2, 1, 1]);
        assert!(matches!(
            classify(&RawRecord::new("ifIndex", NodeKind::Column, oid.clone())),
            Definition::Other(_)
        ));
        assert!(matches!(
            classify(&RawRecord::new("ifEntry", NodeKind::Row, oid)),
            Definition::Row(_)
        ));
    }

    #[test]
    fn test_normalize_imports_groups_and_dedups() {
        let imports = vec![
            RawImport { module: "SNMPv2-SMI".into(), name: "MODULE-IDENTITY".into() },
            RawImport { module: "SNMPv2-TC".into(), name: "DisplayString".into() },
            RawImport { module: "SNMPv2-SMI".into(), name: "Counter32".into() },
            RawImport { module: "SNMPv2-SMI".into(), name: "MODULE-IDENTITY".into() },
        ];
        let grouped = normalize_imports(&imports);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].mod_name, "SNMPv2-SMI");
        assert_eq!(grouped[0].imported_nodes, vec!["MODULE-IDENTITY", "Counter32"]);
        assert_eq!(grouped[1].mod_name, "SNMPv2-TC");
    }
}
