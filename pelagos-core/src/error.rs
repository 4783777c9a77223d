use thiserror::Error;

use crate::field::Location;

/// Error type for configuration defects detected while building a model.
///
/// Every variant is fatal: a configuration mistake aborts the model build
/// before any simulation step runs. There are no transient or retryable
/// failures in this subsystem; defects that survive validation are
/// programmer errors and panic at evaluation time.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("tracer '{tracer}' appears more than once in the declared tracer list")]
    DuplicateTracer { tracer: String },
    #[error("auxiliary field '{name}' duplicates a declared tracer or auxiliary field")]
    DuplicateAuxiliaryField { name: String },
    #[error("transition declared for '{tracer}', which is not in the declared tracer list {declared:?}")]
    UndeclaredTransition { tracer: String, declared: Vec<String> },
    #[error("drift speed declared for '{tracer}', which is not in the declared tracer list {declared:?}")]
    UndeclaredDriftSpeed { tracer: String, declared: Vec<String> },
    #[error("advection scheme declared for '{tracer}', which is not in the declared tracer list {declared:?}")]
    UndeclaredAdvectionScheme { tracer: String, declared: Vec<String> },
    #[error("forcing for '{tracer}' depends on '{dependency}', which is neither a declared tracer nor a declared auxiliary field")]
    UnknownDependency { tracer: String, dependency: String },
    #[error("required field '{name}' exists at {found} but must be at {required}")]
    IncompatibleLocation {
        name: String,
        required: Location,
        found: Location,
    },
    #[error("required field '{name}' has shape {found:?} but the grid is {expected:?}")]
    ShapeMismatch {
        name: String,
        expected: (usize, usize, usize),
        found: (usize, usize, usize),
    },
}

/// Convenience type for `Result<T, ConfigurationError>`.
pub type ConfigResult<T> = Result<T, ConfigurationError>;
