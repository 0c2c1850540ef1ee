//! Module assembly tests

mod common;

use common::{catalog, display_string, enterprise_module, interfaces_module, record};
use omf_sdk::fingerprint::{module_fingerprint, node_fingerprint};
use omf_sdk::normalize::{normalize_node, normalize_revisions, normalize_type};
use omf_sdk::{
    AssembleOptions, BaseType, Decl, Diagnostic, MibSource, NodeKind, OmfConfig, OmfError,
    RawModule, RawType, Status, assemble_module, convert_module,
};

mod bucketing_tests {
    use super::*;

    #[test]
    fn test_enterprise_module_buckets() {
        let assembled = assemble_module(&enterprise_module(), &AssembleOptions::default());
        let module = &assembled.module;

        assert_eq!(module.scalars.len(), 1);
        assert_eq!(module.tables.len(), 1);
        assert!(module.notifications.is_empty());

        let table = &module.tables[0];
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.columns[0].name, "fooIndex");
        assert!(table.indexes.is_empty());
        assert_eq!(table.entry.as_ref().unwrap().name, "fooEntry");

        // The column record is also listed on its own.
        assert_eq!(module.other_nodes.len(), 1);
        assert!(assembled.diagnostics.is_empty());
    }

    #[test]
    fn test_interfaces_table_structure() {
        let options = AssembleOptions { row_table_arcs: 1 };
        let assembled = assemble_module(&interfaces_module(), &options);
        let table = assembled.module.table("ifTable").unwrap();

        let columns: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(columns, vec!["ifIndex", "ifDescr", "ifOperStatus"]);
        assert_eq!(table.indexes[0].name, "ifIndex");
        assert_eq!(table.entry.as_ref().unwrap().oid, "1.3.6.1.2.1.2.2.1");

        let status = table.columns[2].r#type.as_ref().unwrap();
        let values: Vec<(&str, i64)> = status.r#enum.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(values, vec![("up", 1), ("down", 2), ("testing", 3)]);
    }

    #[test]
    fn test_interfaces_row_needs_matching_arcs() {
        let assembled = assemble_module(&interfaces_module(), &AssembleOptions::default());

        assert!(assembled.module.table("ifTable").unwrap().entry.is_none());
        assert!(matches!(
            assembled.diagnostics.iter().next(),
            Some(Diagnostic::OrphanRow { row, table_oid, .. })
                if row == "ifEntry" && table_oid == "1.3.6.1.2.1.2"
        ));
    }

    #[test]
    fn test_row_attaches_by_stripped_oid() {
        let module = RawModule::new("IF-MIB")
            .with_node(record("ifTable", NodeKind::Table, "1.3.6.1.2.1.2"))
            .with_node(record("ifEntry", NodeKind::Row, "1.3.6.1.2.1.2.1.5"));
        let assembled = assemble_module(&module, &AssembleOptions::default());

        assert_eq!(
            assembled.module.tables[0].entry.as_ref().unwrap().name,
            "ifEntry"
        );
    }

    #[test]
    fn test_notification_objects_in_order() {
        let assembled = assemble_module(&interfaces_module(), &AssembleOptions { row_table_arcs: 1 });
        let notification = &assembled.module.notifications[0];

        let objects: Vec<&str> = notification.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(objects, vec!["ifIndex", "ifOperStatus"]);
    }

    #[test]
    fn test_textual_conventions_harvested_once() {
        let assembled = assemble_module(&interfaces_module(), &AssembleOptions { row_table_arcs: 1 });

        let names: Vec<&str> = assembled
            .module
            .textual_conventions
            .iter()
            .map(|tc| tc.r#type.name.as_str())
            .collect();
        assert_eq!(names, vec!["InterfaceIndex", "DisplayString"]);
    }

    #[test]
    fn test_first_textual_convention_wins() {
        let changed = RawType::new("DisplayString", BaseType::OctetString)
            .with_decl(Decl::TextualConvention)
            .with_description("A later, different definition.");
        let module = RawModule::new("TC-MIB")
            .with_node(record("a", NodeKind::Scalar, "1.3.6.1.4.1.3.1").with_type(display_string()))
            .with_node(record("b", NodeKind::Scalar, "1.3.6.1.4.1.3.2").with_type(changed));
        let assembled = assemble_module(&module, &AssembleOptions::default());

        let conventions = &assembled.module.textual_conventions;
        assert_eq!(conventions.len(), 1);
        assert_eq!(
            conventions[0].r#type,
            normalize_type(&display_string())
        );
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let module = interfaces_module();
        let options = AssembleOptions { row_table_arcs: 1 };

        let first = serde_json::to_string(&assemble_module(&module, &options).module).unwrap();
        let second = serde_json::to_string(&assemble_module(&module, &options).module).unwrap();
        assert_eq!(first, second);
    }
}

mod identity_tests {
    use super::*;

    #[test]
    fn test_node_hash_ignores_descriptive_fields() {
        let plain = record("fooScalar", NodeKind::Scalar, "1.3.6.1.4.1.0");
        let described = plain
            .clone()
            .with_description("Something else entirely.")
            .with_type(display_string());

        let a = normalize_node(&plain);
        let b = normalize_node(&described);
        assert_eq!(a.node_hash, b.node_hash);
        assert_eq!(
            a.node_hash,
            node_fingerprint("fooScalar", "1.3.6.1.4.1.0", Status::Current, NodeKind::Scalar)
        );

        let deprecated = normalize_node(&plain.with_status(Status::Deprecated));
        assert_ne!(a.node_hash, deprecated.node_hash);
    }

    #[test]
    fn test_module_hash_tracks_revisions() {
        let module = enterprise_module();
        let assembled = assemble_module(&module, &AssembleOptions::default());
        let expected = module_fingerprint(
            "Example enterprise module.",
            "FOO-MIB",
            &normalize_revisions(&module.revisions),
        );
        assert_eq!(assembled.module.info.module_hash, expected);

        let revised = module.with_revision(chrono::Utc::now(), "Added counters.");
        let reassembled = assemble_module(&revised, &AssembleOptions::default());
        assert_ne!(reassembled.module.info.module_hash, expected);
    }
}

mod conversion_tests {
    use super::*;

    #[test]
    fn test_convert_module_loads_through_session() {
        let mut source = catalog();
        let config = OmfConfig::builder().row_table_arcs(1).build();

        let assembled = convert_module(&mut source, "IF-MIB", &config).unwrap();
        assert_eq!(assembled.module.name(), "IF-MIB");
        assert_eq!(assembled.module.scalars[0].module, "IF-MIB");
        assert!(source.loaded_modules().is_empty());
    }

    #[test]
    fn test_convert_unknown_module_fails() {
        let mut source = catalog();
        let err = convert_module(&mut source, "NOPE-MIB", &OmfConfig::default()).unwrap_err();
        assert!(matches!(err, OmfError::Source(_)));
    }

    #[test]
    fn test_strict_rejects_orphan_rows() {
        let mut source = catalog();
        let config = OmfConfig::builder().strict(true).build();

        let err = convert_module(&mut source, "IF-MIB", &config).unwrap_err();
        let OmfError::Rejected { module, diagnostics } = err else {
            panic!("expected rejection");
        };
        assert_eq!(module, "IF-MIB");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut source = catalog();
        let config = OmfConfig {
            row_table_arcs: 0,
            ..Default::default()
        };
        assert!(matches!(
            convert_module(&mut source, "IF-MIB", &config),
            Err(OmfError::Config(_))
        ));
    }
}
