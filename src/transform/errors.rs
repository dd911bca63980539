//! Error types for standard-space transforms.
//!
//! A transform evaluation fails either because the input itself is malformed
//! (wrong length, non-finite entries) or because the mapping is undefined at
//! the requested point: a marginal CDF saturating to exactly 0 or 1 leaves
//! the standard-normal quantile unbounded, and a vanishing reference density
//! makes the Jacobian singular. All of these surface as [`TransformError`]
//! values; the search layer wraps them as its domain-error case and aborts
//! the evaluation rather than retrying.

/// Result alias for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Input vector length does not match the transform dimension.
    DimensionMismatch { expected: usize, found: usize },

    /// An input coordinate is NaN or infinite.
    NonFiniteCoordinate { index: usize, value: f64 },

    /// A marginal CDF evaluated to exactly 0 or 1, so the standard-normal
    /// quantile is unbounded at this point.
    DomainSaturation { index: usize, probability: f64 },

    /// The reference density vanished at the mapped coordinate, making the
    /// Jacobian singular.
    DegenerateDensity { index: usize, density: f64 },

    /// The forward-map Jacobian is numerically singular, so gradients
    /// cannot be chained through the transform.
    SingularJacobian,

    /// The transform was constructed with no marginals.
    EmptyMarginals,
}

impl std::error::Error for TransformError {}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::DimensionMismatch { expected, found } => {
                write!(f, "Transform dimension mismatch: expected {expected}, found {found}")
            }
            TransformError::NonFiniteCoordinate { index, value } => {
                write!(f, "Non-finite coordinate at index {index}: {value}")
            }
            TransformError::DomainSaturation { index, probability } => {
                write!(
                    f,
                    "Marginal CDF saturated at index {index}: probability {probability} leaves \
                     the standard-normal quantile undefined"
                )
            }
            TransformError::DegenerateDensity { index, density } => {
                write!(f, "Degenerate reference density at index {index}: {density}")
            }
            TransformError::SingularJacobian => {
                write!(f, "Transform Jacobian is numerically singular")
            }
            TransformError::EmptyMarginals => {
                write!(f, "At least one marginal distribution must be provided")
            }
        }
    }
}
