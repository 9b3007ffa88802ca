use sprocgen::{
    generate_script, CatalogSnapshot, ColumnDescriptor, DiagnosticKind, GeneratorConfig,
    KeyColumn, Operation, Procedure, ProcedureSink, SinkError,
};
use std::collections::BTreeMap;

fn col(table: &str, name: &str, data_type: &str, ordinal: u32) -> ColumnDescriptor {
    ColumnDescriptor {
        schema: "dbo".to_string(),
        table: table.to_string(),
        name: name.to_string(),
        data_type: data_type.to_string(),
        char_length: None,
        is_computed: false,
        ordinal,
    }
}

fn key(name: &str) -> KeyColumn {
    KeyColumn {
        name: name.to_string(),
        data_type: "INT".to_string(),
        char_length: None,
    }
}

fn two_table_catalog() -> CatalogSnapshot {
    let mut keys = BTreeMap::new();
    keys.insert("tbl_Customer".to_string(), vec![key("CustomerId")]);
    keys.insert("tbl_Order".to_string(), vec![key("OrderId")]);
    CatalogSnapshot::new(
        vec![
            col("tbl_Customer", "CustomerId", "INT", 1),
            col("tbl_Customer", "Name", "NVARCHAR", 2),
            col("tbl_Order", "OrderId", "INT", 1),
            col("tbl_Order", "CustomerId", "INT", 2),
        ],
        keys,
    )
}

#[test]
fn test_script_contains_five_procedures_per_table_in_order() {
    let config = GeneratorConfig {
        strip_prefix: "tbl_".to_string(),
        ..GeneratorConfig::default()
    };
    let report = generate_script(&two_table_catalog(), &config).unwrap();
    assert_eq!(report.tables, 2);
    assert!(report.diagnostics.is_empty());

    let script = report.script.unwrap();
    assert_eq!(script.matches("CREATE PROCEDURE").count(), 10);
    assert_eq!(script.matches("\nGO\n").count(), 10);

    // Tables arrive in catalog order, operations in fixed order inside.
    let positions: Vec<usize> = [
        "[dbo].[Customer_Select]",
        "[dbo].[Customer_SelectById]",
        "[dbo].[Customer_Insert]",
        "[dbo].[Customer_Update]",
        "[dbo].[Customer_Delete]",
        "[dbo].[Order_Select]",
        "[dbo].[Order_Delete]",
    ]
    .iter()
    .map(|name| script.find(name).unwrap_or_else(|| panic!("missing {name}")))
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_update_round_trip_shape() {
    // All-null call must leave every column alone: each SET arm coalesces
    // onto the existing column value.
    let report = generate_script(&two_table_catalog(), &GeneratorConfig::default()).unwrap();
    let script = report.script.unwrap();
    assert!(script.contains("[Name] = COALESCE(@Name, [Name])"));
    // Exactly one updatable column on tbl_Customer, so one SET arm.
    let update_start = script.find("[dbo].[tbl_Customer_Update]").unwrap();
    let update_end = script[update_start..].find("GO").unwrap() + update_start;
    let update_body = &script[update_start..update_end];
    assert_eq!(update_body.matches("COALESCE").count(), 1);
}

/// Sink that rejects everything for one table.
struct RejectingSink {
    reject_table: String,
    accepted: Vec<String>,
}

impl ProcedureSink for RejectingSink {
    fn submit(&mut self, procedure: &Procedure) -> Result<(), SinkError> {
        if procedure.table == self.reject_table {
            return Err(SinkError(format!("{} rejected", procedure.name)));
        }
        self.accepted.push(procedure.name.clone());
        Ok(())
    }
}

#[test]
fn test_execution_errors_do_not_abort_remaining_tables() {
    let config = GeneratorConfig::default();
    let mut sink = RejectingSink {
        reject_table: "tbl_Customer".to_string(),
        accepted: Vec::new(),
    };
    let report = sprocgen::Generator::new(&config)
        .run(&two_table_catalog(), &mut sink)
        .unwrap();

    // Both tables processed; the rejected one is reported per operation.
    assert_eq!(report.tables, 2);
    assert_eq!(sink.accepted.len(), 5);
    assert!(sink.accepted.iter().all(|n| n.contains("tbl_Order")));
    assert_eq!(report.diagnostics.len(), 5);
    for d in &report.diagnostics {
        assert_eq!(d.kind, DiagnosticKind::ExecutionError);
        assert_eq!(d.table, "tbl_Customer");
        assert!(d.operation.is_some());
    }
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.operation == Some(Operation::Select)));
}

#[test]
fn test_char_length_renders_in_parameter_types() {
    let mut keys = BTreeMap::new();
    keys.insert("tbl_Note".to_string(), vec![key("NoteId")]);
    let catalog = CatalogSnapshot::new(
        vec![
            col("tbl_Note", "NoteId", "INT", 1),
            ColumnDescriptor {
                char_length: Some(255),
                ..col("tbl_Note", "Title", "NVARCHAR", 2)
            },
            ColumnDescriptor {
                char_length: Some(-1),
                ..col("tbl_Note", "Body", "NVARCHAR", 3)
            },
        ],
        keys,
    );
    let report = generate_script(&catalog, &GeneratorConfig::default()).unwrap();
    let script = report.script.unwrap();
    assert!(script.contains("@Title NVARCHAR(255) = NULL"));
    assert!(script.contains("@Body NVARCHAR(MAX) = NULL"));
    assert!(script.contains("@NoteId INT"));
}
