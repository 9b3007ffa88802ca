//! # sprocgen
//!
//! **sprocgen** generates the five standard CRUD stored procedures for every
//! table in a relational schema, driven entirely by the schema's catalog
//! metadata. Hand-writing repetitive data-access procedures is wasteful and
//! error-prone; sprocgen turns a catalog snapshot into a complete, ordered
//! script (or a stream of submissions to an execution sink).
//!
//! ## Overview
//!
//! For each in-scope table the generator emits, in fixed order:
//!
//! - **Select** - row listing with offset or keyset pagination and an
//!   optional computed-column search predicate
//! - **SelectById** - single-row lookup over the full (possibly composite)
//!   primary key
//! - **Insert** - insert over the non-computed column set, reporting the
//!   generated id when the table has an `Id` column
//! - **Update** - patch-style COALESCE merge: null parameters leave
//!   columns unchanged
//! - **Delete** - delete by full key conjunction
//!
//! ## Architecture
//!
//! The library is organized into a few small modules:
//!
//! - **[`catalog`]** - the metadata reader: catalog snapshot loading and
//!   the ordered, table-grouped column stream
//! - **[`generator`]** - the core: a streaming fold with an explicit
//!   table-boundary state machine and Askama-templated procedure bodies
//! - **[`sink`]** - output sinks: script buffering with `GO` separators or
//!   per-procedure submission to an execution capability
//! - **[`config`]** - run configuration (TOML file plus CLI overrides)
//! - **[`report`]** - per-table diagnostics and the run-level result
//! - **[`cli`]** - the `sprocgen` command-line interface
//!
//! The whole run is a single-threaded, single-pass fold: exactly one
//! table's state is live at any moment, and a table is finalized the
//! moment the column stream moves past it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprocgen::{generate_script, load_catalog, GeneratorConfig};
//!
//! let catalog = load_catalog(Path::new("catalog.yaml"))?;
//! let report = generate_script(&catalog, &GeneratorConfig::default())?;
//! println!("{}", report.script.unwrap_or_default());
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod generator;
pub mod report;
pub mod sink;

pub use catalog::{
    load_catalog, CatalogError, CatalogSnapshot, ColumnDescriptor, KeyColumn,
    PrimaryKeyDescriptor,
};
pub use config::{load_config, GeneratorConfig, OutputMode};
pub use generator::{
    generate_script, GenerationError, Generator, Operation, Procedure, ProcedureSet,
};
pub use report::{Diagnostic, DiagnosticKind, GenerationReport};
pub use sink::{ProcedureSink, ScriptBuffer, SinkError, BATCH_SEPARATOR};
