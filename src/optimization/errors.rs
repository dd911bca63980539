use argmin::core::{ArgminError, Error};
use ndarray::Array1;

use crate::transform::errors::TransformError;

/// Crate-wide result alias for design-point search operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    // ---- Derivatives ----
    /// Implies that finite differences should be used.
    GradientNotImplemented,

    /// Gradient dimensions do not match point dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite.
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Hessian matrix dimensions do not match point dimensions.
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// Hessian values need to be finite.
    InvalidHessian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Constraint evaluation ----
    /// The standardized limit state returned a non-finite value.
    NonFiniteConstraint {
        value: f64,
    },

    /// Starting point entries need to be finite and inside the function
    /// domain.
    InvalidStartingPoint {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Solver options ----
    /// A tolerance needs to be positive and finite.
    InvalidTolerance {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Maximum iterations needs to be positive.
    InvalidMaxIterations {
        max_iterations: usize,
        reason: &'static str,
    },

    /// Maximum evaluations needs to be positive.
    InvalidMaxEvaluations {
        max_evaluations: usize,
        reason: &'static str,
    },

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// L-BFGS memory needs to be at least 1.
    InvalidLbfgsMemory {
        memory: usize,
        reason: &'static str,
    },

    // ---- Search outcome ----
    /// The solver exhausted its budget or stagnated before reaching a
    /// feasible, optimal point. Carries the last iterate and residuals.
    ConvergenceFailure {
        iterations: usize,
        constraint_residual: f64,
        gradient_residual: f64,
        last_point: Array1<f64>,
    },

    /// The solver reported success but produced no point.
    MissingSolution,

    /// Solution entries must be finite.
    InvalidSolution {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Transform ----
    /// The standard-space transform was undefined at a required evaluation
    /// point.
    Transform(TransformError),

    // ---- Argmin ----
    /// Wrapper for argmin::InvalidParameter.
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented.
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized.
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated.
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug.
    PotentialBug {
        text: String,
    },
    /// Wrapper for other argmin::Error types.
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for SearchError {}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Derivatives ----
            SearchError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            SearchError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            SearchError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }
            SearchError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            SearchError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- Constraint evaluation ----
            SearchError::NonFiniteConstraint { value } => {
                write!(f, "Non-finite limit-state value: {value}")
            }
            SearchError::InvalidStartingPoint { index, value, reason } => {
                write!(f, "Invalid starting point at index {index}: {value}: {reason}")
            }

            // ---- Solver options ----
            SearchError::InvalidTolerance { name, value, reason } => {
                write!(f, "Invalid {name} tolerance {value}: {reason}")
            }
            SearchError::InvalidMaxIterations { max_iterations, reason } => {
                write!(f, "Invalid maximum iterations {max_iterations}: {reason}")
            }
            SearchError::InvalidMaxEvaluations { max_evaluations, reason } => {
                write!(f, "Invalid maximum evaluations {max_evaluations}: {reason}")
            }
            SearchError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            SearchError::InvalidLbfgsMemory { memory, reason } => {
                write!(f, "Invalid L-BFGS memory {memory}: {reason}")
            }

            // ---- Search outcome ----
            SearchError::ConvergenceFailure {
                iterations,
                constraint_residual,
                gradient_residual,
                ..
            } => {
                write!(
                    f,
                    "Design-point search did not converge after {iterations} iterations \
                     (constraint residual {constraint_residual}, gradient residual \
                     {gradient_residual})"
                )
            }
            SearchError::MissingSolution => {
                write!(f, "Missing solution point from solver")
            }
            SearchError::InvalidSolution { index, value, reason } => {
                write!(f, "Invalid solution at index {index}: {value}: {reason}")
            }

            // ---- Transform ----
            SearchError::Transform(err) => {
                write!(f, "Standard-space transform failed: {err}")
            }

            // ---- Argmin ----
            SearchError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            SearchError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            SearchError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            SearchError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            SearchError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            SearchError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            SearchError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<TransformError> for SearchError {
    fn from(err: TransformError) -> Self {
        SearchError::Transform(err)
    }
}

impl From<crate::reliability::errors::ReliabilityError> for SearchError {
    fn from(err: crate::reliability::errors::ReliabilityError) -> Self {
        use crate::reliability::errors::ReliabilityError;
        match err {
            ReliabilityError::Search(inner) => inner,
            ReliabilityError::NonFiniteCoordinate { index, value } => SearchError::InvalidSolution {
                index,
                value,
                reason: "Design-point coordinates must be finite.",
            },
            _ => SearchError::UnknownError,
        }
    }
}

impl From<Error> for SearchError {
    fn from(original_err: Error) -> Self {
        // Our own errors round-trip through the argmin error type when they
        // are raised inside a cost/gradient closure; unwrap them first.
        let original_err = match original_err.downcast::<SearchError>() {
            Ok(search_err) => return search_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => SearchError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => SearchError::NotImplemented { text },
                ArgminError::NotInitialized { text } => SearchError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => SearchError::ConditionViolated { text },
                ArgminError::PotentialBug { text } => SearchError::PotentialBug { text },
                _ => SearchError::UnknownError,
            },
            Err(err) => SearchError::BackendError { text: err.to_string() },
        }
    }
}
