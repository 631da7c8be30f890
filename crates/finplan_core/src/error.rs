//! Error taxonomy (spec.md §7).
//!
//! Recoverable conditions (missing optional envelope, a disabled
//! `event_functions` flag) are handled by the compilers themselves and
//! never surface as an `Err` — only structural problems that should abort
//! the whole run do.

use std::fmt;

use crate::model::EnvelopeKey;

/// `f_growth` failure: an unknown growth kind, or an invalid parameter
/// (non-positive `days_of_usefulness`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthError {
    InvalidUsefulness(f64),
}

impl fmt::Display for GrowthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthError::InvalidUsefulness(days) => {
                write!(f, "days_of_usefulness must be positive, got {days}")
            }
        }
    }
}

impl std::error::Error for GrowthError {}

/// Errors raised while compiling a `Plan`'s events into descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A descriptor referenced an envelope that does not exist in the
    /// store, and that envelope was a *required* target (a money-flow
    /// source or destination, not an optional reporting envelope).
    MissingRequiredEnvelope {
        event_id: crate::model::EventId,
        envelope: String,
    },
    /// `Depreciation (Days)` (or any growth kind needing validation) was
    /// given an invalid parameter.
    InvalidGrowthParameter {
        envelope: EnvelopeKey,
        source: GrowthError,
    },
    /// A plan referenced an event kind this build does not know how to
    /// compile (schema/core version skew).
    UnknownEventKind { event_id: crate::model::EventId, kind: String },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::MissingRequiredEnvelope { event_id, envelope } => write!(
                f,
                "event {event_id:?} references required envelope {envelope:?} which does not exist"
            ),
            CompileError::InvalidGrowthParameter { envelope, source } => {
                write!(f, "envelope {envelope:?} has an invalid growth parameter: {source}")
            }
            CompileError::UnknownEventKind { event_id, kind } => {
                write!(f, "event {event_id:?} has unknown event kind {kind:?}")
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Non-fatal conditions worth surfacing to the caller without aborting the
/// run (spec.md §7's `NumericFailure`).
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationWarning {
    /// A NaN/Inf value was produced at the given envelope/grid index and
    /// clamped to zero.
    NumericFailure { envelope: String, grid_index: usize },
}

impl fmt::Display for SimulationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationWarning::NumericFailure { envelope, grid_index } => write!(
                f,
                "non-finite value produced in envelope {envelope:?} at grid index {grid_index}; clamped to 0"
            ),
        }
    }
}

/// Top-level error from `run_simulation`. Any `Err` here means the run
/// aborted and the caller gets an empty result set (spec.md §7).
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Compile(CompileError),
    /// The plan references an envelope name with no matching `Envelope`
    /// definition at all (spec.md §3 invariant).
    UndeclaredEnvelope(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Compile(e) => write!(f, "{e}"),
            SimulationError::UndeclaredEnvelope(name) => {
                write!(f, "envelope {name:?} is referenced but not declared in the plan")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<CompileError> for SimulationError {
    fn from(e: CompileError) -> Self {
        SimulationError::Compile(e)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
