//! Per-table accumulation state and the table-boundary fold.
//!
//! Exactly one [`TableContext`] is live at a time: the generator is a
//! streaming fold over the column stream, not a retained collection of all
//! tables. [`TableFold`] makes the finalize-on-boundary-or-end rule a
//! standalone state machine, testable without any catalog access.

use super::sql::{sql_type, ParamDecl};
use crate::catalog::{ColumnDescriptor, PrimaryKeyDescriptor};

/// Closed classification of a table's key, selected once per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKeyShape {
    Single,
    Composite(usize),
}

/// Accumulated state for the table currently being processed: identity,
/// key descriptor, flags, and the partially built fragments of the five
/// procedures, extended one column row at a time.
#[derive(Debug)]
pub struct TableContext {
    pub schema: String,
    pub table: String,
    pub key: PrimaryKeyDescriptor,
    pub key_shape: Option<PrimaryKeyShape>,
    /// Table has a column literally named `Id`
    pub has_id: bool,
    /// Table exposes the configured search column as a computed column
    pub has_search: bool,
    /// Bracketed column names in declaration order
    pub projection: Vec<String>,
    /// One nullable parameter per non-computed column
    pub insert_params: Vec<ParamDecl>,
    pub insert_columns: Vec<String>,
    pub insert_values: Vec<String>,
    /// One nullable parameter per non-computed, non-key column
    pub update_params: Vec<ParamDecl>,
    /// `[C] = COALESCE(@C, [C])` per updatable column
    pub update_sets: Vec<String>,
}

impl TableContext {
    pub fn new(
        schema: String,
        table: String,
        key: PrimaryKeyDescriptor,
        has_id: bool,
        has_search: bool,
    ) -> Self {
        let key_shape = match key.columns.len() {
            0 => None,
            1 => Some(PrimaryKeyShape::Single),
            n => Some(PrimaryKeyShape::Composite(n)),
        };
        Self {
            schema,
            table,
            key,
            key_shape,
            has_id,
            has_search,
            projection: Vec::new(),
            insert_params: Vec::new(),
            insert_columns: Vec::new(),
            insert_values: Vec::new(),
            update_params: Vec::new(),
            update_sets: Vec::new(),
        }
    }

    fn is_key_column(&self, name: &str) -> bool {
        self.key.columns.iter().any(|k| k.name == name)
    }

    /// Extend the procedure fragments with one column row.
    ///
    /// Computed columns appear in the projection only: they are never
    /// settable. Key columns are settable on insert but never updated.
    pub fn push_column(&mut self, column: &ColumnDescriptor) {
        self.projection.push(format!("[{}]", column.name));
        if column.is_computed {
            return;
        }
        let param = ParamDecl {
            name: column.name.clone(),
            sql_type: sql_type(&column.data_type, column.char_length),
        };
        self.insert_columns.push(format!("[{}]", column.name));
        self.insert_values.push(format!("@{}", column.name));
        self.insert_params.push(param.clone());
        if !self.is_key_column(&column.name) {
            self.update_sets
                .push(format!("[{0}] = COALESCE(@{0}, [{0}])", column.name));
            self.update_params.push(param);
        }
    }
}

/// The generator's table-boundary state machine.
#[derive(Debug, Default)]
enum FoldState {
    #[default]
    Idle,
    Accumulating(TableContext),
    Done,
}

/// Streaming fold over the column stream. `push` returns a finished
/// [`TableContext`] whenever the incoming row belongs to a different table
/// than the one in progress; `finish` flushes whatever is still open.
#[derive(Debug, Default)]
pub struct TableFold {
    state: FoldState,
}

impl TableFold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one column row. `seed` builds a fresh context when this row
    /// starts a new table.
    pub fn push<F>(&mut self, column: &ColumnDescriptor, seed: F) -> Option<TableContext>
    where
        F: FnOnce(&ColumnDescriptor) -> TableContext,
    {
        match std::mem::take(&mut self.state) {
            FoldState::Idle | FoldState::Done => {
                let mut ctx = seed(column);
                ctx.push_column(column);
                self.state = FoldState::Accumulating(ctx);
                None
            }
            FoldState::Accumulating(mut ctx) => {
                if ctx.table == column.table {
                    ctx.push_column(column);
                    self.state = FoldState::Accumulating(ctx);
                    None
                } else {
                    let mut next = seed(column);
                    next.push_column(column);
                    self.state = FoldState::Accumulating(next);
                    Some(ctx)
                }
            }
        }
    }

    /// Stream exhausted: emit the in-progress table, if any.
    pub fn finish(&mut self) -> Option<TableContext> {
        match std::mem::replace(&mut self.state, FoldState::Done) {
            FoldState::Accumulating(ctx) => Some(ctx),
            FoldState::Idle | FoldState::Done => None,
        }
    }
}
