use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One column row as delivered by the catalog.
///
/// Rows for a single table are contiguous and ordinal-ascending once they
/// have passed through [`CatalogSnapshot::new`], which is the invariant the
/// generator's table-boundary fold depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Schema the table lives in (e.g. `dbo`)
    pub schema: String,
    /// Table name as stored in the catalog
    pub table: String,
    /// Column name
    pub name: String,
    /// Declared type name (e.g. `INT`, `NVARCHAR`)
    pub data_type: String,
    /// Character length for text types; `-1` means MAX
    #[serde(default)]
    pub char_length: Option<i32>,
    /// Whether the store derives this column's value
    #[serde(default)]
    pub is_computed: bool,
    /// Ordinal position within the table
    pub ordinal: u32,
}

/// One member of a table's primary key, in key-ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColumn {
    /// Column name
    pub name: String,
    /// Declared type name
    pub data_type: String,
    /// Character length for text types; `-1` means MAX
    #[serde(default)]
    pub char_length: Option<i32>,
}

/// Ordered primary-key column list for one table.
///
/// Empty when the table has no primary key; the generator reports such
/// tables as skipped instead of emitting key predicates over nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryKeyDescriptor {
    pub columns: Vec<KeyColumn>,
}

impl PrimaryKeyDescriptor {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Catalog state for one generation run: every column row in scope plus
/// each table's primary key.
///
/// Construction sorts column rows by `(table, ordinal)` and is therefore
/// what guarantees the grouped, ordered delivery the generator relies on.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    columns: Vec<ColumnDescriptor>,
    primary_keys: BTreeMap<String, Vec<KeyColumn>>,
}

impl CatalogSnapshot {
    pub fn new(
        mut columns: Vec<ColumnDescriptor>,
        primary_keys: BTreeMap<String, Vec<KeyColumn>>,
    ) -> Self {
        columns.sort_by(|a, b| a.table.cmp(&b.table).then(a.ordinal.cmp(&b.ordinal)));
        Self {
            columns,
            primary_keys,
        }
    }

    /// Column rows, table-grouped and ordinal-ascending.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Primary key for `table`; empty descriptor when none is declared.
    pub fn primary_key(&self, table: &str) -> PrimaryKeyDescriptor {
        PrimaryKeyDescriptor {
            columns: self.primary_keys.get(table).cloned().unwrap_or_default(),
        }
    }

    /// Whether `table` carries a column literally named `Id`.
    pub fn has_id_column(&self, table: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.table == table && c.name == "Id")
    }

    /// Whether `table` exposes `column` as a computed column.
    pub fn has_computed_column(&self, table: &str, column: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.table == table && c.name == column && c.is_computed)
    }

    /// Distinct table names in delivery order.
    pub fn tables(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for col in &self.columns {
            if out.last() != Some(&col.table.as_str()) {
                out.push(&col.table);
            }
        }
        out
    }

    /// Number of column rows recorded for `table`.
    pub fn column_count(&self, table: &str) -> usize {
        self.columns.iter().filter(|c| c.table == table).count()
    }
}
