//! transform::independent — independent-marginal isoprobabilistic transform.
//!
//! Purpose
//! -------
//! Map a random vector with independent, caller-supplied marginal
//! distributions into standard-normal space componentwise via
//! `u_i = Φ⁻¹(F_i(x_i))`, together with the inverse map and the analytic
//! diagonal Jacobian `∂u_i/∂x_i = f_i(x_i)/φ(u_i)`. This is the Nataf
//! transform restricted to the independent case, which covers the
//! probabilistic models the reliability core ships with; correlated inputs
//! are expected to arrive through an external transform implementing the
//! same trait.
//!
//! Key behaviors
//! -------------
//! - Accept any `statrs` continuous distribution with a CDF and quantile as
//!   a marginal through the object-safe [`Marginal`] trait alias.
//! - Reject evaluations where a marginal CDF saturates to exactly 0 or 1
//!   (the quantile would be ±∞) with
//!   [`TransformError::DomainSaturation`] instead of propagating
//!   infinities into the search.
//! - Guard the Jacobian against vanishing standard-normal density in the
//!   far tails.
//!
//! Invariants & assumptions
//! ------------------------
//! - Marginals are continuous and strictly increasing on their support, so
//!   the componentwise map is a bijection wherever the CDF is not
//!   saturated.
//! - The transform owns its marginals; it is immutable after construction
//!   and safe to share by reference across a whole analysis.
//!
//! Conventions
//! -----------
//! - Index `i` of the marginal vector corresponds to coordinate `i` of both
//!   the physical and the standardized point.
//! - Errors carry the offending coordinate index and the saturated
//!   probability for diagnostics.
//!
//! Testing notes
//! -------------
//! - Unit tests check the round-trip property on lognormal/exponential
//!   marginals, the identity behavior for standard-normal marginals, and
//!   saturation rejection in the far tail.
use crate::transform::{
    errors::{TransformError, TransformResult},
    traits::{check_point, StandardSpaceTransform},
};
use ndarray::{Array1, Array2};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Object-safe alias for a continuous marginal with a density, CDF, and
/// quantile. Blanket-implemented for every `statrs` distribution that
/// provides the two underlying traits.
pub trait Marginal: Continuous<f64, f64> + ContinuousCDF<f64, f64> {}

impl<D> Marginal for D where D: Continuous<f64, f64> + ContinuousCDF<f64, f64> {}

/// Componentwise isoprobabilistic transform over independent marginals.
pub struct IndependentMarginalTransform {
    marginals: Vec<Box<dyn Marginal>>,
    reference: Normal,
}

impl IndependentMarginalTransform {
    /// Build a transform from one boxed marginal per input coordinate.
    ///
    /// # Errors
    /// Returns [`TransformError::EmptyMarginals`] when the vector is empty.
    pub fn new(marginals: Vec<Box<dyn Marginal>>) -> TransformResult<Self> {
        if marginals.is_empty() {
            return Err(TransformError::EmptyMarginals);
        }
        let reference = Normal::new(0.0, 1.0).expect("unit normal");
        Ok(Self { marginals, reference })
    }

    fn saturation_checked(&self, index: usize, probability: f64) -> TransformResult<f64> {
        if !(probability > 0.0 && probability < 1.0) {
            return Err(TransformError::DomainSaturation { index, probability });
        }
        Ok(probability)
    }
}

impl StandardSpaceTransform for IndependentMarginalTransform {
    fn dim(&self) -> usize {
        self.marginals.len()
    }

    fn to_standard(&self, x: &Array1<f64>) -> TransformResult<Array1<f64>> {
        check_point(x, self.dim())?;
        let mut u = Array1::zeros(self.dim());
        for (index, marginal) in self.marginals.iter().enumerate() {
            let p = self.saturation_checked(index, marginal.cdf(x[index]))?;
            let value = self.reference.inverse_cdf(p);
            if !value.is_finite() {
                return Err(TransformError::DomainSaturation { index, probability: p });
            }
            u[index] = value;
        }
        Ok(u)
    }

    fn to_physical(&self, u: &Array1<f64>) -> TransformResult<Array1<f64>> {
        check_point(u, self.dim())?;
        let mut x = Array1::zeros(self.dim());
        for (index, marginal) in self.marginals.iter().enumerate() {
            let p = self.saturation_checked(index, self.reference.cdf(u[index]))?;
            let value = marginal.inverse_cdf(p);
            if !value.is_finite() {
                return Err(TransformError::DomainSaturation { index, probability: p });
            }
            x[index] = value;
        }
        Ok(x)
    }

    fn jacobian(&self, x: &Array1<f64>) -> TransformResult<Array2<f64>> {
        check_point(x, self.dim())?;
        let u = self.to_standard(x)?;
        let mut jac = Array2::zeros((self.dim(), self.dim()));
        for (index, marginal) in self.marginals.iter().enumerate() {
            let reference_density = self.reference.pdf(u[index]);
            if reference_density <= f64::MIN_POSITIVE {
                return Err(TransformError::DegenerateDensity {
                    index,
                    density: reference_density,
                });
            }
            jac[[index, index]] = marginal.pdf(x[index]) / reference_density;
        }
        Ok(jac)
    }
}
