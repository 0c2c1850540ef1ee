//! OID (Object Identifier) representation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write};
use std::str::FromStr;

/// A fully-resolved numeric OID.
///
/// Serializes as dotted notation (`"1.3.6.1"`). Deserializes from either dotted
/// notation or an array of arcs, since MIB dumps produced by external parsers
/// use both shapes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid {
    arcs: Vec<u32>,
}

/// Error returned when a dotted OID string contains a non-numeric arc.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid OID '{0}': arcs must be non-negative integers")]
pub struct OidParseError(pub String);

impl Oid {
    /// Create a new OID from a vector of arcs.
    #[must_use]
    pub fn new(arcs: Vec<u32>) -> Self {
        Self { arcs }
    }

    /// Create an OID from a slice of arcs.
    #[must_use]
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: arcs.to_vec(),
        }
    }

    /// Parse an OID from dotted notation (e.g., "1.3.6.1.2.1").
    #[must_use]
    pub fn from_dotted(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('.');
        if s.is_empty() {
            return Some(Self::new(Vec::new()));
        }
        let arcs: Result<Vec<u32>, _> = s.split('.').map(|p| p.parse()).collect();
        arcs.ok().map(Self::new)
    }

    /// Convert to dotted notation string.
    #[must_use]
    pub fn to_dotted(&self) -> String {
        let mut result = String::with_capacity(self.arcs.len() * 4);
        let mut iter = self.arcs.iter();
        if let Some(first) = iter.next() {
            // write! to String is infallible
            let _ = write!(result, "{first}");
            for arc in iter {
                result.push('.');
                let _ = write!(result, "{arc}");
            }
        }
        result
    }

    /// Get the parent OID (all arcs except the last).
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.arcs.len() <= 1 {
            None
        } else {
            Some(Self::from_slice(&self.arcs[..self.arcs.len() - 1]))
        }
    }

    /// Strip `count` trailing arcs. Returns `None` when fewer than `count` arcs exist.
    #[must_use]
    pub fn ancestor(&self, count: usize) -> Option<Self> {
        let len = self.arcs.len().checked_sub(count)?;
        Some(Self::from_slice(&self.arcs[..len]))
    }

    /// Get the first arc.
    #[must_use]
    pub fn first_arc(&self) -> Option<u32> {
        self.arcs.first().copied()
    }

    /// Get the last arc.
    #[must_use]
    pub fn last_arc(&self) -> Option<u32> {
        self.arcs.last().copied()
    }

    /// Check if this OID is a prefix of another (an OID is a prefix of itself).
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.arcs.starts_with(&self.arcs)
    }

    /// Check if this OID lies strictly below `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &Self) -> bool {
        self.arcs.len() > ancestor.arcs.len() && ancestor.is_prefix_of(self)
    }

    /// Arcs of this OID below `prefix`, or `None` if `prefix` is not a prefix.
    #[must_use]
    pub fn relative_to(&self, prefix: &Self) -> Option<&[u32]> {
        self.arcs.strip_prefix(prefix.arcs.as_slice())
    }

    /// Longest OID that is a prefix of both `self` and `other`.
    #[must_use]
    pub fn common_prefix(&self, other: &Self) -> Self {
        let len = self
            .arcs
            .iter()
            .zip(other.arcs.iter())
            .take_while(|(a, b)| a == b)
            .count();
        Self::from_slice(&self.arcs[..len])
    }

    /// Get the number of arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Get the arcs as a slice.
    #[must_use]
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Create a child OID by appending an arc.
    #[must_use]
    pub fn child(&self, arc: u32) -> Self {
        let mut arcs = Vec::with_capacity(self.arcs.len() + 1);
        arcs.extend_from_slice(&self.arcs);
        arcs.push(arc);
        Self::new(arcs)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}

impl FromStr for Oid {
    type Err = OidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dotted(s).ok_or_else(|| OidParseError(s.to_string()))
    }
}

impl From<Vec<u32>> for Oid {
    fn from(arcs: Vec<u32>) -> Self {
        Self::new(arcs)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl Serialize for Oid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_dotted())
    }
}

impl<'de> Deserialize<'de> for Oid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Dotted(String),
            Arcs(Vec<u32>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Dotted(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Arcs(arcs) => Ok(Self::new(arcs)),
        }
    }
}
