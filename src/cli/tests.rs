#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::commands::apply_overrides;
use super::*;
use crate::config::{GeneratorConfig, OutputMode};
use clap::Parser;

#[test]
fn test_parse_generate_flags() {
    let cli = Cli::try_parse_from([
        "sprocgen",
        "generate",
        "--catalog",
        "catalog.yaml",
        "--schema",
        "sales",
        "--tables",
        "A,B",
        "--strip-prefix",
        "tbl_",
        "--wildcard",
        "--page-size",
        "50",
    ])
    .unwrap();
    match cli.command {
        Commands::Generate {
            catalog,
            schema,
            tables,
            strip_prefix,
            wildcard,
            page_size,
            execute,
            ..
        } => {
            assert_eq!(catalog.to_str(), Some("catalog.yaml"));
            assert_eq!(schema.as_deref(), Some("sales"));
            assert_eq!(tables, Some(vec!["A".to_string(), "B".to_string()]));
            assert_eq!(strip_prefix.as_deref(), Some("tbl_"));
            assert!(wildcard);
            assert_eq!(page_size, Some(50));
            assert!(!execute);
        }
        _ => panic!("expected generate command"),
    }
}

#[test]
fn test_parse_inspect() {
    let cli = Cli::try_parse_from(["sprocgen", "inspect", "--catalog", "c.json"]).unwrap();
    assert!(matches!(cli.command, Commands::Inspect { .. }));
}

#[test]
fn test_catalog_is_required() {
    assert!(Cli::try_parse_from(["sprocgen", "generate"]).is_err());
}

#[test]
fn test_overrides_replace_config_values() {
    let base = GeneratorConfig {
        schema: "dbo".to_string(),
        page_size: 10,
        ..GeneratorConfig::default()
    };
    let merged = apply_overrides(
        base,
        Some("sales".to_string()),
        Some(vec!["A".to_string()]),
        None,
        Some("FullText".to_string()),
        true,
        Some(100),
        true,
    );
    assert_eq!(merged.schema, "sales");
    assert_eq!(merged.tables, vec!["A"]);
    assert_eq!(merged.strip_prefix, "");
    assert_eq!(merged.search_column, "FullText");
    assert!(merged.wildcard_select);
    assert_eq!(merged.page_size, 100);
    assert_eq!(merged.output, OutputMode::Execute);
}

#[test]
fn test_no_overrides_keep_config() {
    let base = GeneratorConfig {
        strip_prefix: "tbl_".to_string(),
        wildcard_select: true,
        ..GeneratorConfig::default()
    };
    let merged = apply_overrides(base.clone(), None, None, None, None, false, None, false);
    assert_eq!(merged.strip_prefix, base.strip_prefix);
    assert!(merged.wildcard_select);
    assert_eq!(merged.output, OutputMode::Buffer);
}
