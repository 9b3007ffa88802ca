//! Output sinks: where finished procedure texts go.
//!
//! Buffer mode accumulates one script with `GO` batch separators via
//! [`ScriptBuffer`]; Execute mode submits each procedure to any
//! [`ProcedureSink`] implementation the caller wires in. The generator
//! treats the sink as an opaque capability with a single operation.

use crate::generator::Procedure;
use thiserror::Error;

/// Batch-separator line placed after each procedure in a buffered script.
pub const BATCH_SEPARATOR: &str = "GO";

/// A sink rejected a submitted procedure. Reported per table/operation;
/// remaining tables are still processed since they are independent units.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SinkError(pub String);

/// Receives finished procedures one at a time, in emission order.
pub trait ProcedureSink {
    /// Submit one procedure for execution or buffering.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the sink rejects the procedure.
    fn submit(&mut self, procedure: &Procedure) -> Result<(), SinkError>;
}

/// Sink that concatenates procedures into one script, each followed by a
/// batch-separator line.
#[derive(Debug, Default)]
pub struct ScriptBuffer {
    script: String,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_script(self) -> String {
        self.script
    }
}

impl ProcedureSink for ScriptBuffer {
    fn submit(&mut self, procedure: &Procedure) -> Result<(), SinkError> {
        self.script.push_str(&procedure.body);
        if !procedure.body.ends_with('\n') {
            self.script.push('\n');
        }
        self.script.push_str(BATCH_SEPARATOR);
        self.script.push_str("\n\n");
        Ok(())
    }
}

/// Sink that accepts everything and counts submissions. Used by the CLI's
/// execute dry-run and by tests.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub submitted: usize,
}

impl ProcedureSink for CountingSink {
    fn submit(&mut self, _procedure: &Procedure) -> Result<(), SinkError> {
        self.submitted += 1;
        Ok(())
    }
}
