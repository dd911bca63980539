//! Physical ⇄ standard-space transforms.
//!
//! The reliability engines never work on physical coordinates directly;
//! everything downstream of the design-point search happens in a
//! standardized space of independent standard-normal variables. This module
//! defines the [`traits::StandardSpaceTransform`] capability consumed by the
//! search layer, plus the two transforms shipped with the crate: the
//! identity transform for inputs already expressed in standard space and an
//! independent-marginal transform built from `statrs` distributions.

pub mod errors;
pub mod independent;
pub mod traits;

pub use self::errors::{TransformError, TransformResult};
pub use self::independent::IndependentMarginalTransform;
pub use self::traits::{StandardNormalTransform, StandardSpaceTransform};
