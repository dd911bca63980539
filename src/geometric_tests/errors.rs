//! geometric_tests::errors — shared error types for the geometric
//! validation tests.
//!
//! The test layer validates its probabilistic levels up front and treats
//! constraint evaluation failures during sampling as fatal for the run;
//! both families are reported through [`GeoTestError`] with the offending
//! value attached, never as panics.
use crate::optimization::errors::SearchError;

pub type GeoTestResult<T> = Result<T, GeoTestError>;

/// GeoTestError — error conditions for the Strong Maximum Test.
///
/// Variants
/// --------
/// - `InvalidImportanceLevel` / `InvalidConfidenceLevel`: the level lies
///   outside the open interval (0, 1) or is non-finite.
/// - `InvalidAccuracyLevel`: the radius-enlargement factor is negative or
///   non-finite.
/// - `DegenerateDesignPoint`: the design point coincides with the origin,
///   so there is no sphere to sample.
/// - `SaturatedEnlargement`: the enlarged-radius derivation underflowed
///   (the target tail mass rounds to zero), leaving the radius undefined.
/// - `Constraint`: a constraint evaluation failed while classifying a
///   sampled point.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoTestError {
    InvalidImportanceLevel(f64),
    InvalidConfidenceLevel(f64),
    InvalidAccuracyLevel(f64),
    DegenerateDesignPoint { beta: f64 },
    SaturatedEnlargement { probability: f64 },
    Constraint(SearchError),
}

impl std::error::Error for GeoTestError {}

impl std::fmt::Display for GeoTestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoTestError::InvalidImportanceLevel(level) => {
                write!(f, "Invalid importance level: {level}. Must lie strictly between 0 and 1.")
            }
            GeoTestError::InvalidConfidenceLevel(level) => {
                write!(f, "Invalid confidence level: {level}. Must lie strictly between 0 and 1.")
            }
            GeoTestError::InvalidAccuracyLevel(level) => {
                write!(f, "Invalid accuracy level: {level}. Must be finite and non-negative.")
            }
            GeoTestError::DegenerateDesignPoint { beta } => {
                write!(f, "Design point is degenerate (beta = {beta}); nothing to sample")
            }
            GeoTestError::SaturatedEnlargement { probability } => {
                write!(
                    f,
                    "Sphere enlargement underflowed: target tail mass {probability} leaves the \
                     enlarged radius undefined"
                )
            }
            GeoTestError::Constraint(err) => {
                write!(f, "Constraint evaluation failed during sampling: {err}")
            }
        }
    }
}

impl From<SearchError> for GeoTestError {
    fn from(err: SearchError) -> Self {
        GeoTestError::Constraint(err)
    }
}
