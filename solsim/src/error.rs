//! Error types for the simulation core and the system file codec.

use thiserror::Error;

/// Errors reported by the simulation core.
///
/// Everything here is recoverable at the engine level: step-time conditions are
/// collected into a [`StepReport`](crate::simulation::engine::StepReport) and load-time
/// conditions become warnings on a [`LoadReport`](crate::persistence::system_file::LoadReport).
#[derive(Debug, Error)]
pub enum SimError {
    /// A body with zero, negative or non-finite mass reached integration.
    #[error("body `{name}` has degenerate mass {mass}")]
    DegenerateMass {
        /// Name of the offending body.
        name: String,
        /// The mass that was rejected.
        mass: f64,
    },

    /// A planet or satellite names a parent that was not declared before it.
    #[error("line {line}: `{name}` references unknown parent `{parent}`")]
    UnresolvedParent {
        /// 1-based line number in the source file.
        line: usize,
        /// Child body name.
        name: String,
        /// Parent name as written.
        parent: String,
    },

    /// A parent link with the wrong kind pairing (e.g. satellite -> star).
    #[error("`{parent}` cannot be the parent of `{child}`")]
    InvalidParent {
        /// Child body name.
        child: String,
        /// Rejected parent name.
        parent: String,
    },

    /// A persisted line that could not be parsed.
    #[error("line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the source file.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// A second body with an already used name.
    #[error("duplicate body name `{name}`")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// File-level I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
