//! Run-level reporting: per-table diagnostics and the final result handed
//! back to the caller. Skipped tables are reported, never silently dropped.

use crate::generator::Operation;
use std::fmt;

/// Why a table (or one of its operations) produced no procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The table declares no primary key; SelectById/Update/Delete would
    /// have no usable predicate, so the whole table is skipped.
    NoPrimaryKey,
    /// Every column is either a key member or computed; there is nothing
    /// for Update to set, so only that operation is skipped.
    NoUpdatableColumns,
    /// The execution sink rejected a submitted procedure (Execute mode).
    ExecutionError,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::NoPrimaryKey => "no_primary_key",
            DiagnosticKind::NoUpdatableColumns => "no_updatable_columns",
            DiagnosticKind::ExecutionError => "execution_error",
        };
        write!(f, "{s}")
    }
}

/// A per-table finding, always attributed to the table (and operation when
/// one is involved) for traceability.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Table the finding applies to
    pub table: String,
    /// Operation involved, when the finding is narrower than the table
    pub operation: Option<Operation>,
    /// Classification of the finding
    pub kind: DiagnosticKind,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    pub fn new(table: impl Into<String>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            table: table.into(),
            operation: None,
            kind,
            message: message.into(),
        }
    }

    /// Attribute the finding to a specific operation.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            Some(op) => write!(f, "[{}] {}.{}: {}", self.kind, self.table, op, self.message),
            None => write!(f, "[{}] {}: {}", self.kind, self.table, self.message),
        }
    }
}

/// Result of one generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Tables that produced procedures
    pub tables: usize,
    /// Full script text (Buffer mode only)
    pub script: Option<String>,
    /// Everything that was skipped or rejected, in stream order
    pub diagnostics: Vec<Diagnostic>,
}

/// Print diagnostics to stderr, one line each.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("⚠️  {diagnostic}");
    }
}
