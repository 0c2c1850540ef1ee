//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use omf_sdk::{
    Access, BaseType, Decl, InMemorySource, MibSource, NodeKind, Oid, RawModule, RawRecord,
    RawType, Status,
};

pub fn oid(dotted: &str) -> Oid {
    Oid::from_dotted(dotted).expect("valid OID")
}

pub fn record(name: &str, kind: NodeKind, dotted: &str) -> RawRecord {
    RawRecord::new(name, kind, oid(dotted)).with_status(Status::Current)
}

pub fn display_string() -> RawType {
    RawType::new("DisplayString", BaseType::OctetString)
        .with_decl(Decl::TextualConvention)
        .with_description("Represents textual information taken from the NVT ASCII character set.")
        .with_range(0, 255)
}

/// Enterprise module with one scalar, one table (one column) and one row.
pub fn enterprise_module() -> RawModule {
    let column = record("fooIndex", NodeKind::Column, "1.3.6.1.4.1.1.1.1")
        .with_access(Access::ReadOnly)
        .with_type(RawType::new("Integer32", BaseType::Integer32));

    RawModule::new("FOO-MIB")
        .with_description("Example enterprise module.")
        .with_revision(Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap(), "Initial version.")
        .with_import("SNMPv2-SMI", "enterprises")
        .with_import("SNMPv2-SMI", "Integer32")
        .with_node(
            record("fooScalar", NodeKind::Scalar, "1.3.6.1.4.1.0")
                .with_access(Access::ReadOnly)
                .with_type(display_string()),
        )
        .with_node(
            record("fooTable", NodeKind::Table, "1.3.6.1.4.1.1")
                .with_access(Access::NotAccessible)
                .with_columns(vec![column.clone()]),
        )
        .with_node(column)
        .with_node(record("fooEntry", NodeKind::Row, "1.3.6.1.4.1.1.1.2"))
}

/// Module defining the well-known roots the enterprise module imports.
pub fn smi_module() -> RawModule {
    RawModule::new("SNMPv2-SMI")
        .with_description("The SMI for SNMPv2.")
        .with_node(record("zeroDotZero", NodeKind::Node, "0.0"))
        .with_node(record("iso", NodeKind::Node, "1"))
        .with_node(record("internet", NodeKind::Node, "1.3.6.1"))
        .with_node(record("mgmt", NodeKind::Node, "1.3.6.1.2"))
        .with_node(record("mib-2", NodeKind::Node, "1.3.6.1.2.1"))
        .with_node(record("enterprises", NodeKind::Node, "1.3.6.1.4.1"))
}

/// Slice of IF-MIB: interfaces group, ifTable with three columns, ifEntry and a
/// notification. ifEntry sits one arc below ifTable, as in the real module.
pub fn interfaces_module() -> RawModule {
    let column = |name: &str, arc: u32, type_ref: RawType| {
        record(name, NodeKind::Column, &format!("1.3.6.1.2.1.2.2.1.{arc}"))
            .with_access(Access::ReadOnly)
            .with_type(type_ref)
    };
    let if_index = column("ifIndex", 1, RawType::new("InterfaceIndex", BaseType::Integer32).with_decl(Decl::TextualConvention));
    let if_descr = column("ifDescr", 2, display_string());
    let if_oper_status = column(
        "ifOperStatus",
        8,
        RawType::new("", BaseType::Enum)
            .with_enum_value("up", 1)
            .with_enum_value("down", 2)
            .with_enum_value("testing", 3),
    );

    RawModule::new("IF-MIB")
        .with_description("The MIB module to describe generic objects for network interface sub-layers.")
        .with_import("SNMPv2-SMI", "mib-2")
        .with_import("SNMPv2-TC", "DisplayString")
        .with_node(record("interfaces", NodeKind::Node, "1.3.6.1.2.1.2"))
        .with_node(record("ifNumber", NodeKind::Scalar, "1.3.6.1.2.1.2.1").with_type(RawType::new("Integer32", BaseType::Integer32)))
        .with_node(
            record("ifTable", NodeKind::Table, "1.3.6.1.2.1.2.2")
                .with_columns(vec![if_index.clone(), if_descr.clone(), if_oper_status.clone()])
                .with_index(vec![if_index.clone()]),
        )
        .with_node(record("ifEntry", NodeKind::Row, "1.3.6.1.2.1.2.2.1"))
        .with_node(if_index.clone())
        .with_node(if_descr)
        .with_node(if_oper_status.clone())
        .with_node(
            record("linkDown", NodeKind::Notification, "1.3.6.1.6.3.1.1.5.3")
                .with_objects(vec![if_index, if_oper_status]),
        )
}

pub fn tc_module() -> RawModule {
    RawModule::new("SNMPv2-TC").with_type(display_string())
}

/// Source holding every fixture module, initialized but with nothing loaded.
pub fn catalog() -> InMemorySource {
    let mut source = InMemorySource::new()
        .with_module(smi_module())
        .with_module(tc_module())
        .with_module(enterprise_module())
        .with_module(interfaces_module());
    source.initialize().expect("initialize");
    source
}
