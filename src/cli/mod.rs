//! # CLI Module
//!
//! Command-line interface for the sprocgen generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate the five CRUD procedures for every in-scope table:
//!
//! ```bash
//! sprocgen generate --catalog catalog.yaml --output procs.sql
//! ```
//!
//! Options:
//! - `--catalog <FILE>` - catalog snapshot, YAML or JSON (required)
//! - `--config <FILE>` - sprocgen.toml config file; flags override it
//! - `--schema <NAME>` - schema qualifying generated procedure names
//! - `--tables <A,B>` - allow-list; omit for all tables
//! - `--strip-prefix <P>` - table-name prefix removed from procedure names
//! - `--search-column <C>` - computed column the Select search targets
//! - `--wildcard` - `SELECT *` instead of explicit column lists
//! - `--page-size <N>` - default page size (10)
//! - `--output <FILE>` - write the script to a file instead of stdout
//! - `--execute` - submit per procedure instead of buffering a script
//!
//! ### `inspect`
//!
//! Summarize a catalog snapshot before generating:
//!
//! ```bash
//! sprocgen inspect --catalog catalog.yaml
//! ```
//!
//! Prints column counts, key shapes, and the flags that decide identity
//! reporting and search support per table.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
