//! # Generator Module
//!
//! The core of sprocgen: a single synchronous pass over the catalog's
//! ordered column stream that emits five CRUD stored procedures per
//! in-scope table.
//!
//! ```text
//! Catalog Snapshot → Table Fold → Fragment Assembly → Template Rendering → Sink
//! ```
//!
//! 1. **Table fold** - [`TableFold`] watches the stream for table
//!    boundaries; exactly one [`TableContext`] is live at a time.
//! 2. **Fragment assembly** - each column row extends the context's
//!    projection, insert and update fragments; key membership and the
//!    computed flag decide which procedures a column participates in.
//! 3. **Template rendering** - at the table boundary the five Askama
//!    templates produce the finished bodies in fixed order: Select,
//!    SelectById, Insert, Update, Delete.
//! 4. **Sink** - Buffer mode appends to one script with `GO` separators;
//!    Execute mode submits each text to the caller's sink.
//!
//! Tables without a primary key are skipped with a diagnostic rather than
//! emitting procedures with no usable key predicate. Out-of-scope tables
//! are still walked (keeping boundary detection trivial) but contribute no
//! output.

mod context;
mod sql;
mod templates;

pub use context::{PrimaryKeyShape, TableContext, TableFold};
pub use sql::ParamDecl;

use askama::Template;
use std::fmt;
use tracing::{debug, info};

use crate::catalog::{CatalogError, CatalogSnapshot, ColumnDescriptor};
use crate::config::GeneratorConfig;
use crate::report::{Diagnostic, DiagnosticKind, GenerationReport};
use crate::sink::{ProcedureSink, ScriptBuffer};

use sql::{
    bracket, key_predicate, keyset_column_expr, keyset_guard, keyset_value_expr, search_predicate,
    sql_type,
};
use templates::{
    DeleteProcTemplate, InsertProcTemplate, SelectByIdProcTemplate, SelectProcTemplate,
    UpdateProcTemplate,
};

/// The five fixed operations, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    SelectById,
    Insert,
    Update,
    Delete,
}

impl Operation {
    /// Suffix appended to the stripped table name.
    pub fn suffix(&self) -> &'static str {
        match self {
            Operation::Select => "Select",
            Operation::SelectById => "SelectById",
            Operation::Insert => "Insert",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// One finished procedure text.
#[derive(Debug, Clone)]
pub struct Procedure {
    /// Catalog table the procedure was generated from
    pub table: String,
    /// Externally visible name, `<schema>.<StrippedTable>_<Operation>`
    pub name: String,
    pub operation: Operation,
    pub body: String,
}

/// The finished procedures for one table, in fixed emission order.
/// Normally five; an operation can be individually absent when a
/// diagnostic replaced it (see [`DiagnosticKind::NoUpdatableColumns`]).
#[derive(Debug, Clone)]
pub struct ProcedureSet {
    pub table: String,
    pub procedures: Vec<Procedure>,
}

/// Fatal generation failure. Per-table conditions are diagnostics in the
/// report, not errors; only catalog loss and template breakage abort.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("failed to render {operation} for table {table}: {source}")]
    Render {
        table: String,
        operation: Operation,
        #[source]
        source: askama::Error,
    },
}

/// The procedure generator. Holds the run's read-only configuration; all
/// per-table state lives in the [`TableContext`] flowing through the fold.
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Fold the catalog's column stream into procedures, submitting each
    /// finished text to `sink` in fixed order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] only for run-fatal conditions; skipped
    /// tables and sink rejections are diagnostics in the report.
    pub fn run(
        &self,
        catalog: &CatalogSnapshot,
        sink: &mut dyn ProcedureSink,
    ) -> Result<GenerationReport, GenerationError> {
        let mut report = GenerationReport::default();
        let mut fold = TableFold::new();
        for column in catalog.columns() {
            if let Some(done) = fold.push(column, |c| self.seed_context(catalog, c)) {
                self.finalize(done, &mut report, sink)?;
            }
        }
        if let Some(done) = fold.finish() {
            self.finalize(done, &mut report, sink)?;
        }
        info!(
            tables = report.tables,
            diagnostics = report.diagnostics.len(),
            "generation complete"
        );
        Ok(report)
    }

    fn seed_context(&self, catalog: &CatalogSnapshot, column: &ColumnDescriptor) -> TableContext {
        TableContext::new(
            column.schema.clone(),
            column.table.clone(),
            catalog.primary_key(&column.table),
            catalog.has_id_column(&column.table),
            catalog.has_computed_column(&column.table, &self.config.search_column),
        )
    }

    /// Emit one finished table: apply the scope filter, classify the key,
    /// render the set, and submit to the sink.
    fn finalize(
        &self,
        ctx: TableContext,
        report: &mut GenerationReport,
        sink: &mut dyn ProcedureSink,
    ) -> Result<(), GenerationError> {
        if !self.config.in_scope(&ctx.table) {
            debug!(table = %ctx.table, "table not in allow-list, skipping");
            return Ok(());
        }
        if ctx.key.is_empty() {
            report.diagnostics.push(Diagnostic::new(
                &ctx.table,
                DiagnosticKind::NoPrimaryKey,
                "table declares no primary key; skipped",
            ));
            return Ok(());
        }

        let (set, mut diagnostics) = self.build_set(&ctx)?;
        report.diagnostics.append(&mut diagnostics);
        for procedure in &set.procedures {
            if let Err(e) = sink.submit(procedure) {
                report.diagnostics.push(
                    Diagnostic::new(
                        &procedure.table,
                        DiagnosticKind::ExecutionError,
                        e.to_string(),
                    )
                    .with_operation(procedure.operation),
                );
            }
        }
        report.tables += 1;
        Ok(())
    }

    /// Render the procedure set for one table. Callers have already
    /// ruled out empty keys; per-table conditions come back as
    /// diagnostics alongside the set.
    fn build_set(
        &self,
        ctx: &TableContext,
    ) -> Result<(ProcedureSet, Vec<Diagnostic>), GenerationError> {
        let config = self.config;
        let table_ref = format!("[{}].[{}]", ctx.schema, ctx.table);
        let projection = if config.wildcard_select {
            "*".to_string()
        } else {
            ctx.projection.join(", ")
        };
        let key = &ctx.key.columns;
        let key_params: Vec<ParamDecl> = key
            .iter()
            .map(|k| ParamDecl {
                name: k.name.clone(),
                sql_type: sql_type(&k.data_type, k.char_length),
            })
            .collect();
        let key_pred = key_predicate(key);

        let mut procedures = Vec::with_capacity(5);
        let mut diagnostics = Vec::new();

        let select = SelectProcTemplate {
            name: self.proc_ref(ctx, Operation::Select),
            table: table_ref.clone(),
            key_params: key_params.clone(),
            page_size: config.page_size,
            projection: projection.clone(),
            order_column: key.first().map(|k| bracket(&k.name)).unwrap_or_default(),
            keyset_guard: keyset_guard(key),
            keyset_column: keyset_column_expr(key),
            keyset_value: keyset_value_expr(key),
            has_search: ctx.has_search,
            search_predicate: search_predicate(&config.search_column),
        }
        .render()
        .map_err(|e| self.render_err(ctx, Operation::Select, e))?;
        procedures.push(self.procedure(ctx, Operation::Select, select));

        let select_by_id = SelectByIdProcTemplate {
            name: self.proc_ref(ctx, Operation::SelectById),
            table: table_ref.clone(),
            key_params: key_params.clone(),
            projection,
            key_predicate: key_pred.clone(),
        }
        .render()
        .map_err(|e| self.render_err(ctx, Operation::SelectById, e))?;
        procedures.push(self.procedure(ctx, Operation::SelectById, select_by_id));

        let insert = InsertProcTemplate {
            name: self.proc_ref(ctx, Operation::Insert),
            table: table_ref.clone(),
            params: ctx.insert_params.clone(),
            column_list: ctx.insert_columns.join(", "),
            value_list: ctx.insert_values.join(", "),
            has_columns: !ctx.insert_columns.is_empty(),
            has_id: ctx.has_id,
        }
        .render()
        .map_err(|e| self.render_err(ctx, Operation::Insert, e))?;
        procedures.push(self.procedure(ctx, Operation::Insert, insert));

        if ctx.update_sets.is_empty() {
            diagnostics.push(
                Diagnostic::new(
                    &ctx.table,
                    DiagnosticKind::NoUpdatableColumns,
                    "every column is a key member or computed; Update omitted",
                )
                .with_operation(Operation::Update),
            );
        } else {
            let update = UpdateProcTemplate {
                name: self.proc_ref(ctx, Operation::Update),
                table: table_ref.clone(),
                key_params: key_params.clone(),
                data_params: ctx.update_params.clone(),
                set_clause: ctx.update_sets.join(",\n        "),
                key_predicate: key_pred.clone(),
            }
            .render()
            .map_err(|e| self.render_err(ctx, Operation::Update, e))?;
            procedures.push(self.procedure(ctx, Operation::Update, update));
        }

        let delete = DeleteProcTemplate {
            name: self.proc_ref(ctx, Operation::Delete),
            table: table_ref,
            key_params,
            key_predicate: key_pred,
        }
        .render()
        .map_err(|e| self.render_err(ctx, Operation::Delete, e))?;
        procedures.push(self.procedure(ctx, Operation::Delete, delete));

        Ok((
            ProcedureSet {
                table: ctx.table.clone(),
                procedures,
            },
            diagnostics,
        ))
    }

    /// Plain qualified name, used for diagnostics and reporting.
    fn proc_name(&self, ctx: &TableContext, operation: Operation) -> String {
        format!(
            "{}.{}_{}",
            self.config.schema,
            self.config.stripped_name(&ctx.table),
            operation.suffix()
        )
    }

    /// Bracketed qualified name, used in the generated text.
    fn proc_ref(&self, ctx: &TableContext, operation: Operation) -> String {
        format!(
            "[{}].[{}_{}]",
            self.config.schema,
            self.config.stripped_name(&ctx.table),
            operation.suffix()
        )
    }

    fn procedure(&self, ctx: &TableContext, operation: Operation, body: String) -> Procedure {
        Procedure {
            table: ctx.table.clone(),
            name: self.proc_name(ctx, operation),
            operation,
            body,
        }
    }

    fn render_err(
        &self,
        ctx: &TableContext,
        operation: Operation,
        source: askama::Error,
    ) -> GenerationError {
        GenerationError::Render {
            table: ctx.table.clone(),
            operation,
            source,
        }
    }
}

/// Buffer-mode convenience: fold the catalog into one script with batch
/// separators and return it in the report.
///
/// # Errors
///
/// Returns [`GenerationError`] when the run fails outright.
pub fn generate_script(
    catalog: &CatalogSnapshot,
    config: &GeneratorConfig,
) -> Result<GenerationReport, GenerationError> {
    let mut buffer = ScriptBuffer::new();
    let mut report = Generator::new(config).run(catalog, &mut buffer)?;
    report.script = Some(buffer.into_script());
    Ok(report)
}
