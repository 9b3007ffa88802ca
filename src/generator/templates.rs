//! Askama template data for the five procedure bodies.
//!
//! The fragment strings (predicates, CASE chains, column lists) are
//! prepared by the generator; templates only lay out the procedure shell.

use askama::Template;

use super::sql::ParamDecl;

/// List procedure with the three pagination branches: offset when
/// `@PageNumber` is supplied, keyset when any key parameter is, otherwise
/// the full unbounded result.
#[derive(Template)]
#[template(path = "select.sql.txt", escape = "none")]
pub struct SelectProcTemplate {
    /// Qualified procedure name, e.g. `[dbo].[Order_Select]`
    pub name: String,
    /// Qualified table reference, e.g. `[dbo].[tbl_Order]`
    pub table: String,
    /// One nullable cursor parameter per key column
    pub key_params: Vec<ParamDecl>,
    /// Default page size baked into the parameter list
    pub page_size: u32,
    /// Wildcard or explicit declaration-ordered column list
    pub projection: String,
    /// First key column; orders the offset branch
    pub order_column: String,
    /// `@K IS NOT NULL OR …` over all key parameters
    pub keyset_guard: String,
    /// Column side of the keyset comparison
    pub keyset_column: String,
    /// Cursor side of the keyset comparison
    pub keyset_value: String,
    /// Whether the table exposes the configured search column
    pub has_search: bool,
    /// `@SearchTerm`-gated LIKE predicate
    pub search_predicate: String,
}

/// Single-row lookup: equality conjunction over the full key.
#[derive(Template)]
#[template(path = "select_by_id.sql.txt", escape = "none")]
pub struct SelectByIdProcTemplate {
    pub name: String,
    pub table: String,
    pub key_params: Vec<ParamDecl>,
    pub projection: String,
    pub key_predicate: String,
}

/// Insert over the non-computed column set; nulls pass through so catalog
/// defaults apply. Tables with an `Id` column report the inserted id.
#[derive(Template)]
#[template(path = "insert.sql.txt", escape = "none")]
pub struct InsertProcTemplate {
    pub name: String,
    pub table: String,
    pub params: Vec<ParamDecl>,
    pub column_list: String,
    pub value_list: String,
    /// False when every column is computed; falls back to DEFAULT VALUES
    pub has_columns: bool,
    pub has_id: bool,
}

/// Patch-style update: COALESCE keeps columns the caller left null.
#[derive(Template)]
#[template(path = "update.sql.txt", escape = "none")]
pub struct UpdateProcTemplate {
    pub name: String,
    pub table: String,
    pub key_params: Vec<ParamDecl>,
    pub data_params: Vec<ParamDecl>,
    pub set_clause: String,
    pub key_predicate: String,
}

#[derive(Template)]
#[template(path = "delete.sql.txt", escape = "none")]
pub struct DeleteProcTemplate {
    pub name: String,
    pub table: String,
    pub key_params: Vec<ParamDecl>,
    pub key_predicate: String,
}
