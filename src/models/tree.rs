//! OID-addressed tree documents

use super::enums::Language;
use super::module::{ModuleInfo, OmfImport};
use super::node::OmfNode;
use super::oid::Oid;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Children of a tree vertex keyed by the next OID arc.
///
/// Kept in numeric arc order. Serialized as a map with stringified arcs as keys
/// so every document format (including TOML) can carry it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcMap(BTreeMap<u32, TreeNode>);

impl ArcMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Find the vertex at `arcs`, where the first arc is a key of this map.
    pub fn find(&self, arcs: &[u32]) -> Option<&TreeNode> {
        let (first, rest) = arcs.split_first()?;
        self.0.get(first)?.descendant(rest)
    }

    /// Find the vertex addressed by an absolute OID (forest lookup).
    pub fn find_oid(&self, oid: &Oid) -> Option<&TreeNode> {
        self.find(oid.arcs())
    }

    /// Number of vertices carrying a definition, across the whole forest.
    pub fn definition_count(&self) -> usize {
        self.0.values().map(TreeNode::definition_count).sum()
    }
}

impl Deref for ArcMap {
    type Target = BTreeMap<u32, TreeNode>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ArcMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Serialize for ArcMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (arc, child) in &self.0 {
            map.serialize_entry(&arc.to_string(), child)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ArcMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ArcMapVisitor;

        impl<'de> Visitor<'de> for ArcMapVisitor {
            type Value = ArcMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map keyed by OID arc")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut children = BTreeMap::new();
                while let Some((key, child)) = access.next_entry::<String, TreeNode>()? {
                    let arc = key.parse::<u32>().map_err(|_| {
                        serde::de::Error::custom(format!("invalid OID arc '{key}'"))
                    })?;
                    children.insert(arc, child);
                }
                Ok(ArcMap(children))
            }
        }

        deserializer.deserialize_map(ArcMapVisitor)
    }
}

/// A vertex of the OID tree.
///
/// `node` is `None` for synthetic vertices that only exist because some
/// definition lives below them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TreeNode {
    pub node_oid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<OmfNode>,
    #[serde(default, skip_serializing_if = "ArcMap::is_empty")]
    pub children: ArcMap,
}

impl TreeNode {
    /// Create an empty (synthetic) vertex at `node_oid`.
    pub fn new(node_oid: impl Into<String>) -> Self {
        Self {
            node_oid: node_oid.into(),
            node: None,
            children: ArcMap::new(),
        }
    }

    /// Whether no definition occupies this vertex.
    pub fn is_synthetic(&self) -> bool {
        self.node.is_none()
    }

    /// Place `node` at the vertex `relative` arcs below this one, creating
    /// synthetic vertices along the way. Returns the definition it replaced.
    pub fn insert(&mut self, relative: &[u32], node: OmfNode) -> Option<OmfNode> {
        let mut current = self;
        for &arc in relative {
            let path = child_path(&current.node_oid, arc);
            current = current
                .children
                .entry(arc)
                .or_insert_with(|| TreeNode::new(path));
        }
        current.node.replace(node)
    }

    /// The vertex `relative` arcs below this one.
    pub fn descendant(&self, relative: &[u32]) -> Option<&TreeNode> {
        let mut current = self;
        for arc in relative {
            current = current.children.get(arc)?;
        }
        Some(current)
    }

    /// Number of vertices carrying a definition in this subtree.
    pub fn definition_count(&self) -> usize {
        usize::from(self.node.is_some()) + self.children.definition_count()
    }

    /// All vertices of this subtree in pre-order.
    pub fn preorder(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(vertex) = stack.pop() {
            out.push(vertex);
            stack.extend(vertex.children.values().rev());
        }
        out
    }
}

/// Dotted path of the child `arc` below `parent`.
pub(crate) fn child_path(parent: &str, arc: u32) -> String {
    if parent.is_empty() {
        arc.to_string()
    } else {
        format!("{parent}.{arc}")
    }
}

/// A module's own definitions arranged under a single root vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleTree {
    #[serde(flatten)]
    pub info: ModuleInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub module_imports: Vec<OmfImport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_node: Option<TreeNode>,
}

/// Forest spanning a module and every module loaded alongside it.
///
/// `tree` is absent when resolving the module's imports failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompleteModuleTree {
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<ArcMap>,
}

impl From<ModuleInfo> for CompleteModuleTree {
    fn from(info: ModuleInfo) -> Self {
        Self {
            hash: info.module_hash,
            contact: info.contact_info,
            description: info.description,
            language: info.language,
            name: info.name,
            organization: info.organization,
            path: info.path,
            reference: info.reference,
            tree: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, oid: &str) -> OmfNode {
        OmfNode {
            name: name.to_string(),
            oid: oid.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_creates_synthetic_path() {
        let mut root = TreeNode::new("1.3.6.1");
        root.insert(&[4, 1, 1], named("fooTable", "1.3.6.1.4.1.1"));

        let four = root.children.get(&4).unwrap();
        assert!(four.is_synthetic());
        assert_eq!(four.node_oid, "1.3.6.1.4");

        let table = root.descendant(&[4, 1, 1]).unwrap();
        assert_eq!(table.node_oid, "1.3.6.1.4.1.1");
        assert_eq!(table.node.as_ref().unwrap().name, "fooTable");
        assert_eq!(root.definition_count(), 1);
    }

    #[test]
    fn test_insert_returns_replaced_definition() {
        let mut root = TreeNode::new("1");
        assert!(root.insert(&[3], named("org", "1.3")).is_none());
        let previous = root.insert(&[3], named("iso-org", "1.3")).unwrap();
        assert_eq!(previous.name, "org");
    }

    #[test]
    fn test_children_serialize_in_numeric_order() {
        let mut root = TreeNode::new("1");
        root.insert(&[10], named("ten", "1.10"));
        root.insert(&[2], named("two", "1.2"));

        let json = serde_json::to_string(&root).unwrap();
        let two = json.find("\"2\"").unwrap();
        let ten = json.find("\"10\"").unwrap();
        assert!(two < ten);

        let back: TreeNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
    }

    #[test]
    fn test_preorder_visits_parents_first() {
        let mut root = TreeNode::new("1");
        root.insert(&[3, 6], named("dod", "1.3.6"));
        root.insert(&[2], named("member-body", "1.2"));

        let paths: Vec<&str> = root.preorder().iter().map(|v| v.node_oid.as_str()).collect();
        assert_eq!(paths, vec!["1", "1.2", "1.3", "1.3.6"]);
    }
}
