//! reliability::errors — error types and validity warnings for the engine
//! layer.
//!
//! The engines distinguish three result states: fully valid, valid with
//! numerical-validity warnings attached, and absent with an explicit error.
//! [`ReliabilityError`] covers the third state;
//! [`NumericalValidityWarning`] values are carried on otherwise-valid
//! outcomes so downstream reporting can tell a trustworthy estimate from a
//! questionable one.
use crate::optimization::errors::SearchError;

/// Result alias for the reliability engines.
pub type ReliabilityResult<T> = Result<T, ReliabilityError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ReliabilityError {
    /// Event threshold must be finite.
    InvalidThreshold {
        value: f64,
    },

    /// Unrecognized comparison-operator name.
    InvalidOperator {
        name: String,
    },

    /// Standard- and physical-space coordinates disagree in length.
    PointDimMismatch {
        standard: usize,
        physical: usize,
    },

    /// Design-point coordinates must be finite.
    NonFiniteCoordinate {
        index: usize,
        value: f64,
    },

    /// The constraint gradient vanished at the design point, so the
    /// tangent-space geometry is undefined.
    ZeroGradient {
        norm: f64,
    },

    /// The implicit-function-theorem premise of the sensitivity layer is
    /// violated (numerically zero gradient at the design point).
    SensitivityUndefined {
        gradient_norm: f64,
    },

    /// The transform parameter gradient has the wrong number of rows.
    ParameterGradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// A caller-supplied Hessian does not match the standard-space
    /// dimension.
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// A search-layer failure encountered while evaluating the constraint
    /// on behalf of an engine.
    Search(SearchError),
}

impl std::error::Error for ReliabilityError {}

impl std::fmt::Display for ReliabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReliabilityError::InvalidThreshold { value } => {
                write!(f, "Invalid event threshold: {value}. Must be finite.")
            }
            ReliabilityError::InvalidOperator { name } => {
                write!(
                    f,
                    "Invalid comparison operator '{name}': valid options are '<', '<=', '>', \
                     '>=' or their case-insensitive names"
                )
            }
            ReliabilityError::PointDimMismatch { standard, physical } => {
                write!(
                    f,
                    "Design-point dimension mismatch: standard {standard}, physical {physical}"
                )
            }
            ReliabilityError::NonFiniteCoordinate { index, value } => {
                write!(f, "Non-finite design-point coordinate at index {index}: {value}")
            }
            ReliabilityError::ZeroGradient { norm } => {
                write!(f, "Constraint gradient norm {norm} is numerically zero at the design point")
            }
            ReliabilityError::SensitivityUndefined { gradient_norm } => {
                write!(
                    f,
                    "Sensitivity undefined: constraint gradient norm {gradient_norm} violates \
                     the implicit-function-theorem premise"
                )
            }
            ReliabilityError::ParameterGradientDimMismatch { expected, found } => {
                write!(
                    f,
                    "Parameter gradient dimension mismatch: expected {expected} rows, found {found}"
                )
            }
            ReliabilityError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            ReliabilityError::Search(err) => {
                write!(f, "Constraint evaluation failed: {err}")
            }
        }
    }
}

impl From<SearchError> for ReliabilityError {
    fn from(err: SearchError) -> Self {
        ReliabilityError::Search(err)
    }
}

/// Non-fatal numerical-validity warning attached to an engine outcome.
///
/// A warning never replaces a result; it flags that a degenerate term was
/// clipped or a documented fallback was used, so the accompanying numbers
/// should be treated with care.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericalValidityWarning {
    /// A second-order correction term `1 + βκ` was non-positive in some
    /// principal direction (locally non-convex boundary) and was clipped to
    /// a minimum positive epsilon.
    NonConvexCurvatureTerm { direction: usize, term: f64 },

    /// The design point coincides with the origin, so importance factors
    /// are undefined and a zero vector was reported instead.
    DegenerateDesignPoint { beta: f64 },
}

impl std::fmt::Display for NumericalValidityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericalValidityWarning::NonConvexCurvatureTerm { direction, term } => {
                write!(
                    f,
                    "Non-convex curvature term {term} in principal direction {direction}; \
                     clipped to a positive epsilon"
                )
            }
            NumericalValidityWarning::DegenerateDesignPoint { beta } => {
                write!(
                    f,
                    "Design point is degenerate (beta = {beta}); importance factors reported \
                     as a zero vector"
                )
            }
        }
    }
}
