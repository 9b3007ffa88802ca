//! # Catalog Module
//!
//! The metadata reader: turns catalog state into the ordered column stream
//! the generator folds over, plus per-table primary-key ordering and
//! computed-column flags.
//!
//! A run works from a [`CatalogSnapshot`], loaded from a YAML or JSON file
//! exported from the target database's information schema. The snapshot
//! sorts rows by `(table, ordinal)` on construction, so columns for one
//! table always arrive contiguously and in declaration order. That is the
//! single invariant the generator's boundary detection depends on.
//!
//! Catalog access failures are [`CatalogError::MetadataUnavailable`] and
//! abort the run; there is nothing to generate from.

mod load;
mod types;

pub use load::{load_catalog, CatalogError};
pub use types::{CatalogSnapshot, ColumnDescriptor, KeyColumn, PrimaryKeyDescriptor};
