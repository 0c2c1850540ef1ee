//! Symbolic enumerations shared by raw records and OMF documents.
//!
//! Every enumeration renders as the symbolic name of its variant, which is the
//! form downstream consumers of OMF documents match on.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! symbolic_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            /// Not reported by the source.
            #[default]
            Unknown,
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Symbolic name of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    Self::Unknown => "Unknown",
                    $(Self::$variant => stringify!($variant),)+
                }
            }

            /// Whether the source left this value unset.
            pub fn is_unknown(&self) -> bool {
                matches!(self, Self::Unknown)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

symbolic_enum! {
    /// Classification of a definition in the OID tree.
    pub enum NodeKind {
        /// OBJECT-IDENTITY, MODULE-IDENTITY or value assignment.
        Node,
        /// OBJECT-TYPE not in a table.
        Scalar,
        /// SYNTAX is SEQUENCE OF.
        Table,
        /// Has INDEX or AUGMENTS clause.
        Row,
        /// Parent is a row.
        Column,
        /// NOTIFICATION-TYPE or TRAP-TYPE.
        Notification,
        /// OBJECT-GROUP or NOTIFICATION-GROUP.
        Group,
        /// MODULE-COMPLIANCE.
        Compliance,
        /// AGENT-CAPABILITIES.
        Capabilities,
    }
}

symbolic_enum! {
    /// MAX-ACCESS / ACCESS clause.
    pub enum Access {
        NotImplemented,
        NotAccessible,
        Notify,
        ReadOnly,
        ReadWrite,
        ReadCreate,
        WriteOnly,
    }
}

symbolic_enum! {
    /// Declaration form that introduced a definition.
    pub enum Decl {
        Implicit,
        TypeAssignment,
        ImplSequenceOf,
        ValueAssignment,
        ObjectType,
        ObjectIdentity,
        ModuleIdentity,
        NotificationType,
        TrapType,
        ObjectGroup,
        NotificationGroup,
        ModuleCompliance,
        AgentCapabilities,
        TextualConvention,
        Macro,
        ComplianceGroup,
        ComplianceObject,
    }
}

symbolic_enum! {
    /// STATUS clause.
    pub enum Status {
        Current,
        Deprecated,
        Mandatory,
        Optional,
        Obsolete,
    }
}

symbolic_enum! {
    /// Underlying SMI base type of a type reference.
    pub enum BaseType {
        Integer32,
        OctetString,
        ObjectIdentifier,
        Unsigned32,
        Integer64,
        Unsigned64,
        Float32,
        Float64,
        Float128,
        Enum,
        Bits,
        Pointer,
    }
}

symbolic_enum! {
    /// SMI language a module is written in.
    pub enum Language {
        SMIv1,
        SMIv2,
        SMIng,
        SPPI,
    }
}

impl Decl {
    /// Whether a type with this declaration is a named, reusable type.
    pub fn is_textual_convention(&self) -> bool {
        matches!(self, Self::TextualConvention)
    }
}
