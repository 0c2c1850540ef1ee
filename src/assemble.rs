//! Module assembly
//!
//! Groups a module's flat record list into the ordered buckets of an
//! [`OmfModule`]: scalars, tables (with entry, index members and columns),
//! notifications, standalone types and other nodes. Textual conventions are
//! harvested from every type reference met on the way.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::models::{
    OmfModule, OmfNode, OmfNotification, OmfTable, OmfTextualConvention, OmfType, Oid,
};
use crate::normalize::{
    Definition, classify, module_info, normalize_imports, normalize_revisions, normalize_type,
};
use crate::registry::OrderedRegistry;
use crate::source::RawModule;
use std::collections::HashMap;
use tracing::info;

/// Trailing arcs stripped from a row OID to find its table by default.
pub const DEFAULT_ROW_TABLE_ARCS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Arcs stripped from a row OID to find the owning table's OID.
    pub row_table_arcs: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            row_table_arcs: DEFAULT_ROW_TABLE_ARCS,
        }
    }
}

/// An assembled module plus the anomalies found while assembling it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembled {
    pub module: OmfModule,
    pub diagnostics: Diagnostics,
}

/// Textual conventions keyed by name; the first definition of a name wins.
#[derive(Debug, Default)]
struct ConventionHarvest(OrderedRegistry<OmfTextualConvention>);

impl ConventionHarvest {
    fn offer(&mut self, r#type: Option<&OmfType>) {
        if let Some(tc) = r#type.filter(|t| t.is_textual_convention()) {
            self.0.insert_first(tc.name.clone(), OmfTextualConvention::from(tc.clone()));
        }
    }

    fn offer_nodes<'a>(&mut self, nodes: impl IntoIterator<Item = &'a OmfNode>) {
        for node in nodes {
            self.offer(node.r#type.as_ref());
        }
    }
}

/// Bucket every record of `module`.
///
/// Rows are attached after the whole module has been bucketed, so a row
/// declared before its table still finds it. A row whose OID minus
/// `row_table_arcs` trailing arcs is no table's OID is reported as
/// [`Diagnostic::OrphanRow`] and left out.
pub fn assemble_module(module: &RawModule, options: &AssembleOptions) -> Assembled {
    let mut scalars: OrderedRegistry<OmfNode> = OrderedRegistry::new();
    let mut tables: OrderedRegistry<OmfTable> = OrderedRegistry::new();
    let mut notifications: OrderedRegistry<OmfNotification> = OrderedRegistry::new();
    let mut types: OrderedRegistry<OmfType> = OrderedRegistry::new();
    let mut other_nodes: OrderedRegistry<OmfNode> = OrderedRegistry::new();
    let mut conventions = ConventionHarvest::default();

    let mut table_index: HashMap<Oid, String> = HashMap::new();
    let mut rows: Vec<(Oid, OmfNode)> = Vec::new();

    for record in &module.nodes {
        match classify(record) {
            Definition::Table(table) => {
                conventions.offer_nodes(&table.columns);
                table_index.insert(record.oid.clone(), table.node.name.clone());
                tables.insert(table.node.name.clone(), table);
            }
            Definition::Notification(notification) => {
                conventions.offer_nodes(&notification.objects);
                notifications.insert(notification.node.name.clone(), notification);
            }
            Definition::Scalar(scalar) => {
                conventions.offer(scalar.r#type.as_ref());
                scalars.insert(scalar.name.clone(), scalar);
            }
            Definition::Row(row) => rows.push((record.oid.clone(), row)),
            Definition::Other(node) => {
                conventions.offer(node.r#type.as_ref());
                other_nodes.insert(node.name.clone(), node);
            }
        }
    }

    let mut diagnostics = Diagnostics::new();
    for (oid, row) in rows {
        let table_oid = oid.ancestor(options.row_table_arcs);
        let table = table_oid
            .as_ref()
            .and_then(|table_oid| table_index.get(table_oid))
            .and_then(|name| tables.get_mut(name));

        match table {
            Some(table) => table.entry = Some(row),
            None => diagnostics.push(Diagnostic::OrphanRow {
                module: module.name.clone(),
                row: row.name,
                oid: row.oid,
                table_oid: table_oid.map(|t| t.to_dotted()).unwrap_or_default(),
            }),
        }
    }

    for raw in &module.types {
        let omf = normalize_type(raw);
        conventions.offer(Some(&omf));
        types.insert(omf.name.clone(), omf);
    }

    let revisions = normalize_revisions(&module.revisions);
    let assembled = OmfModule {
        info: module_info(module, &revisions),
        imports: normalize_imports(&module.imports),
        revisions,
        scalars: scalars.into_vec(),
        types: types.into_vec(),
        textual_conventions: conventions.0.into_vec(),
        tables: tables.into_vec(),
        notifications: notifications.into_vec(),
        other_nodes: other_nodes.into_vec(),
    };

    info!(
        "Assembled {}: {} scalars, {} tables, {} notifications, {} textual conventions",
        assembled.info.name,
        assembled.scalars.len(),
        assembled.tables.len(),
        assembled.notifications.len(),
        assembled.textual_conventions.len()
    );

    Assembled {
        module: assembled,
        diagnostics,
    }
}
