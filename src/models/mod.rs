//! Models module for the SDK
//!
//! Defines the OMF document structures produced from parsed MIB modules:
//! normalized nodes and types, the bucketed module view, and OID trees.

pub mod enums;
pub mod module;
pub mod node;
pub mod oid;
pub mod tree;

pub use enums::{Access, BaseType, Decl, Language, NodeKind, Status};
pub use module::{ModuleInfo, OmfImport, OmfModule, OmfNotification, OmfRevision, OmfTable};
pub use node::{OmfEnum, OmfNode, OmfRange, OmfTextualConvention, OmfType};
pub use oid::{Oid, OidParseError};
pub use tree::{ArcMap, CompleteModuleTree, ModuleTree, TreeNode};
