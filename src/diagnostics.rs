//! Non-fatal data-shaping anomalies
//!
//! Anything the tree builder or module assembler drops, overwrites or cannot
//! attach is recorded as a [`Diagnostic`] on the result instead of being lost.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A classified, non-fatal anomaly found while shaping a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A row whose OID minus its trailing arcs matches no table of its module.
    #[serde(rename_all = "camelCase")]
    OrphanRow {
        module: String,
        row: String,
        oid: String,
        table_oid: String,
    },
    /// Two records share an OID in a single-root tree; the first one was kept.
    #[serde(rename_all = "camelCase")]
    DuplicateOid {
        oid: String,
        kept: String,
        dropped: String,
    },
    /// A later record replaced an earlier one at the same forest path.
    #[serde(rename_all = "camelCase")]
    OidOverwritten {
        oid: String,
        previous: String,
        current: String,
    },
    /// A record that cannot be placed under the selected root.
    #[serde(rename_all = "camelCase")]
    OutsideRoot {
        name: String,
        oid: String,
        root: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OrphanRow {
                module,
                row,
                oid,
                table_oid,
            } => write!(
                f,
                "{module}: row {row} ({oid}) has no table at {table_oid}"
            ),
            Diagnostic::DuplicateOid { oid, kept, dropped } => {
                write!(f, "duplicate OID {oid}: kept {kept}, dropped {dropped}")
            }
            Diagnostic::OidOverwritten {
                oid,
                previous,
                current,
            } => write!(f, "OID {oid}: {current} replaced {previous}"),
            Diagnostic::OutsideRoot { name, oid, root } => {
                write!(f, "{name} ({oid}) lies outside root {root}")
            }
        }
    }
}

/// Ordered collection of diagnostics, logging each one as it is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it at warn level.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.0.push(diagnostic);
    }

    /// Append diagnostics that were already logged.
    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
