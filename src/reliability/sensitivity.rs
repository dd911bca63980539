//! reliability::sensitivity — closed-form derivatives of the reliability
//! index.
//!
//! Purpose
//! -------
//! Propagate derivatives of `β` and of the first-order probability with
//! respect to the parameters of the input distribution and the event
//! threshold, without re-optimization. Because the design point is a local
//! minimizer of `½‖u‖²` on `{h = 0}`, the envelope theorem collapses the
//! derivative to quantities already available at `u*`: the constraint
//! gradient, the transform's parameter gradient, and the operator sign.
//!
//! Formulas (with `g = ∇h(u*)`, `‖g‖` its norm, `s` the operator sign):
//! - distribution parameter `θ_j`:
//!   `∂β/∂θ_j = −gᵀ·(∂T/∂θ_j)(x*) / ‖g‖`
//!   (equal to `αᵀ·∂T/∂θ_j` at an exact design point).
//! - threshold `t`: `∂β/∂t = −s/‖g‖`.
//! - probabilities chain through the standard-normal density with the
//!   origin-side sign: `∂P/∂· = ∓φ(β)·∂β/∂·`.
//!
//! The implicit-function-theorem premise requires a nonzero gradient at
//! the design point; a numerically zero norm fails explicitly with
//! [`ReliabilityError::SensitivityUndefined`].
use crate::optimization::nearest_point::traits::{EqualityConstraint, PerformanceFunction};
use crate::reliability::{
    design_point::{DesignPoint, DEGENERATE_BETA},
    errors::{ReliabilityError, ReliabilityResult},
    event::Event,
};
use ndarray::{Array1, Array2};
use statrs::distribution::{Continuous, Normal};

/// SensitivityOutcome — derivatives of `β` and `P` for one design point.
///
/// One instance per reliability result; indices into the partial vectors
/// follow the columns of the supplied parameter gradient, and the
/// threshold derivative is reported separately.
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityOutcome {
    beta_partials: Array1<f64>,
    probability_partials: Array1<f64>,
    threshold_beta_partial: f64,
    threshold_probability_partial: f64,
}

impl SensitivityOutcome {
    /// Evaluate the sensitivities at a design point.
    ///
    /// # Parameters
    /// - `event`: the analyzed event; only its comparison operator enters
    ///   (through the threshold sign).
    /// - `constraint`: standardized limit state, evaluated for its
    ///   gradient at `u*`.
    /// - `design_point`: the converged design point.
    /// - `parameter_gradient`: `n × p` matrix whose column `j` is
    ///   `∂T/∂θ_j` evaluated at `x*` — the derivative of the forward
    ///   transform with respect to the `j`-th distribution parameter at
    ///   the fixed physical design point.
    ///
    /// # Errors
    /// - [`ReliabilityError::SensitivityUndefined`] when `‖∇h(u*)‖` is
    ///   numerically zero.
    /// - [`ReliabilityError::ParameterGradientDimMismatch`] when the
    ///   matrix row count differs from the standard-space dimension.
    /// - Propagates constraint evaluation failures.
    pub fn evaluate<F: PerformanceFunction>(
        event: &Event<'_, F>, constraint: &dyn EqualityConstraint, design_point: &DesignPoint,
        parameter_gradient: &Array2<f64>,
    ) -> ReliabilityResult<Self> {
        let dim = design_point.dim();
        if parameter_gradient.nrows() != dim {
            return Err(ReliabilityError::ParameterGradientDimMismatch {
                expected: dim,
                found: parameter_gradient.nrows(),
            });
        }

        let gradient = constraint.gradient(&design_point.standard)?;
        let grad_norm = gradient.dot(&gradient).sqrt();
        if grad_norm <= DEGENERATE_BETA {
            return Err(ReliabilityError::SensitivityUndefined { gradient_norm: grad_norm });
        }

        let parameters = parameter_gradient.ncols();
        let mut beta_partials = Array1::zeros(parameters);
        for j in 0..parameters {
            let directional: f64 =
                (0..dim).map(|i| gradient[i] * parameter_gradient[[i, j]]).sum();
            beta_partials[j] = -directional / grad_norm;
        }
        let threshold_beta_partial = -event.operator().sign() / grad_norm;

        // dP = ∓φ(β)·dβ: the minus branch is the origin-safe tail Φ(−β),
        // the plus branch its complement.
        let normal = Normal::new(0.0, 1.0).expect("unit normal");
        let density = normal.pdf(design_point.beta);
        let chain = if design_point.origin_in_failure_domain { density } else { -density };
        let probability_partials = beta_partials.mapv(|d_beta| chain * d_beta);
        let threshold_probability_partial = chain * threshold_beta_partial;

        Ok(Self {
            beta_partials,
            probability_partials,
            threshold_beta_partial,
            threshold_probability_partial,
        })
    }

    /// `∂β/∂θ_j` per parameter-gradient column.
    pub fn beta_partials(&self) -> &Array1<f64> {
        &self.beta_partials
    }

    /// `∂P/∂θ_j` per parameter-gradient column.
    pub fn probability_partials(&self) -> &Array1<f64> {
        &self.probability_partials
    }

    /// `∂β/∂t` with respect to the event threshold.
    pub fn threshold_beta_partial(&self) -> f64 {
        self.threshold_beta_partial
    }

    /// `∂P/∂t` with respect to the event threshold.
    pub fn threshold_probability_partial(&self) -> f64 {
        self.threshold_probability_partial
    }
}
