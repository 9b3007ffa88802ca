//! Run configuration: table allow-list, target schema, output mode, naming
//! prefix, search-column name, projection style, and default page size.
//!
//! Loadable from a `sprocgen.toml` file that sits alongside the catalog
//! snapshot; every field can also be overridden from the CLI.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where finished procedures go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Concatenate everything into one script with batch separators.
    #[default]
    Buffer,
    /// Submit each procedure to an execution sink as it is finished.
    Execute,
}

/// Read-only configuration for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Tables to generate for; empty means all tables in the catalog.
    pub tables: Vec<String>,
    /// Schema qualifying the generated procedure names.
    pub schema: String,
    /// Buffer a script or dispatch to an execution sink.
    pub output: OutputMode,
    /// Literal prefix stripped once from table names (e.g. `tbl_`).
    pub strip_prefix: String,
    /// Name of the computed column the Select procedure searches over.
    pub search_column: String,
    /// `SELECT *` instead of an explicit column list.
    pub wildcard_select: bool,
    /// Default `@PageSize` baked into Select procedures.
    pub page_size: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tables: Vec::new(),
            schema: "dbo".to_string(),
            output: OutputMode::Buffer,
            strip_prefix: String::new(),
            search_column: "SearchField".to_string(),
            wildcard_select: false,
            page_size: 10,
        }
    }
}

impl GeneratorConfig {
    /// Whether `table` should be emitted. An empty allow-list means all.
    pub fn in_scope(&self, table: &str) -> bool {
        self.tables.is_empty() || self.tables.iter().any(|t| t == table)
    }

    /// Table name with the configured prefix stripped, once, when it matches.
    pub fn stripped_name<'a>(&self, table: &'a str) -> &'a str {
        if self.strip_prefix.is_empty() {
            return table;
        }
        table.strip_prefix(&self.strip_prefix).unwrap_or(table)
    }
}

/// Load a [`GeneratorConfig`] from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<GeneratorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: GeneratorConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert!(config.tables.is_empty());
        assert_eq!(config.schema, "dbo");
        assert_eq!(config.output, OutputMode::Buffer);
        assert_eq!(config.page_size, 10);
        assert!(!config.wildcard_select);
    }

    #[test]
    fn test_empty_allow_list_means_all() {
        let config = GeneratorConfig::default();
        assert!(config.in_scope("Anything"));

        let config = GeneratorConfig {
            tables: vec!["A".to_string(), "B".to_string()],
            ..GeneratorConfig::default()
        };
        assert!(config.in_scope("A"));
        assert!(config.in_scope("B"));
        assert!(!config.in_scope("C"));
    }

    #[test]
    fn test_prefix_stripped_once_on_match_only() {
        let config = GeneratorConfig {
            strip_prefix: "tbl_".to_string(),
            ..GeneratorConfig::default()
        };
        assert_eq!(config.stripped_name("tbl_Order"), "Order");
        assert_eq!(config.stripped_name("Order"), "Order");
        assert_eq!(config.stripped_name("tbl_tbl_Order"), "tbl_Order");
    }

    #[test]
    fn test_parse_toml() {
        let config: GeneratorConfig = toml::from_str(
            r#"
tables = ["tbl_Order"]
schema = "sales"
output = "execute"
strip_prefix = "tbl_"
wildcard_select = true
page_size = 25
"#,
        )
        .unwrap();
        assert_eq!(config.tables, vec!["tbl_Order"]);
        assert_eq!(config.schema, "sales");
        assert_eq!(config.output, OutputMode::Execute);
        assert_eq!(config.page_size, 25);
        assert!(config.wildcard_select);
        // Unset fields keep defaults.
        assert_eq!(config.search_column, "SearchField");
    }
}
