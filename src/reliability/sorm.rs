//! reliability::sorm — second-order reliability method.
//!
//! Purpose
//! -------
//! Correct the first-order probability with the local curvature of the
//! failure boundary at the design point. One curvature profile is computed
//! per evaluation and shared by three alternative corrections — Breitung's
//! asymptotic formula, Hohenbichler's density-ratio refinement, and
//! Tvedt's three-term expansion — which are reported side by side, never
//! reconciled.
//!
//! Key behaviors
//! -------------
//! - Breitung: `P ≈ Φ(−β)·Π(1 + βκ_i)^{−1/2}`, exact in the limit
//!   `β → ∞`.
//! - Hohenbichler: replaces `β` in the product with the standard-normal
//!   hazard ratio `φ(β)/Φ(−β)`, which is more faithful at moderate `β`.
//! - Tvedt: adds two correction terms to the Breitung product, the last
//!   involving a complex-argument product evaluated with `num-complex`;
//!   computed last as the most expensive and most curvature-sensitive.
//! - Any non-positive product term `1 + cκ_i` marks a locally non-convex
//!   boundary: the term is clipped to a minimum positive epsilon and the
//!   correction carries a [`NumericalValidityWarning`] instead of going
//!   complex or negative silently.
//! - The origin-side flag complements the corrected tail exactly as FORM
//!   does; the generalized index is derived from the corrected
//!   probability.
//!
//! Conventions
//! -----------
//! - Corrected probabilities are asymptotic approximations and may fall
//!   slightly outside `[0, 1]`; they are reported unclamped (only the
//!   quantile evaluation clamps internally) and callers should treat them
//!   as labeled approximations.
use crate::optimization::nearest_point::{traits::EqualityConstraint, types::Hessian};
use crate::reliability::{
    curvature::CurvatureProfile,
    design_point::DesignPoint,
    errors::{NumericalValidityWarning, ReliabilityResult},
    form::generalized_index_from,
};
use num_complex::Complex64;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Minimum positive value a clipped curvature term is replaced with.
const CLIP_EPSILON: f64 = 1e-12;

/// One curvature-corrected probability estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct SormCorrection {
    probability: f64,
    generalized_index: f64,
    warnings: Vec<NumericalValidityWarning>,
}

impl SormCorrection {
    /// The corrected event probability (approximate; may fall slightly
    /// outside the unit interval for extreme curvatures).
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// The generalized reliability index `−Φ⁻¹(P)` of the corrected
    /// probability.
    pub fn generalized_index(&self) -> f64 {
        self.generalized_index
    }

    /// Clipped-term warnings attached to this correction.
    pub fn warnings(&self) -> &[NumericalValidityWarning] {
        &self.warnings
    }

    /// Whether the correction carries no validity warnings.
    pub fn is_fully_valid(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// SormOutcome — the three curvature corrections for one design point.
///
/// All three share one [`CurvatureProfile`] computed once per evaluation;
/// the profile is exposed for reporting alongside the probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct SormOutcome {
    curvatures: CurvatureProfile,
    breitung: SormCorrection,
    hohenbichler: SormCorrection,
    tvedt: SormCorrection,
}

impl SormOutcome {
    /// Evaluate the second-order corrections at a design point.
    ///
    /// # Parameters
    /// - `constraint`: standardized limit state, evaluated for its
    ///   gradient (and Hessian unless `exact_hessian` is given) at `u*`.
    /// - `design_point`: the converged design point.
    /// - `exact_hessian`: optional exact standard-space Hessian of `h` at
    ///   `u*`; when absent a finite-difference Hessian is used.
    ///
    /// # Errors
    /// - Propagates every curvature-layer error
    ///   ([`ReliabilityError::ZeroGradient`](crate::reliability::errors::ReliabilityError),
    ///   Hessian shape mismatches, constraint failures).
    pub fn evaluate(
        constraint: &dyn EqualityConstraint, design_point: &DesignPoint,
        exact_hessian: Option<&Hessian>,
    ) -> ReliabilityResult<Self> {
        let curvatures =
            CurvatureProfile::at_design_point(constraint, design_point, exact_hessian)?;
        let normal = Normal::new(0.0, 1.0).expect("unit normal");
        let beta = design_point.beta;
        let tail = normal.cdf(-beta);
        let density = normal.pdf(beta);

        let breitung = correction_from_product(&normal, design_point, {
            let (product, warnings) = clipped_product(curvatures.kappas().iter(), beta);
            (tail * product, warnings)
        });

        let hohenbichler = correction_from_product(&normal, design_point, {
            // Hazard ratio φ(β)/Φ(−β); tends to β from above as β grows.
            let ratio = density / tail;
            let (product, warnings) = clipped_product(curvatures.kappas().iter(), ratio);
            (tail * product, warnings)
        });

        // Tvedt's three-term expansion, computed last.
        let tvedt = correction_from_product(&normal, design_point, {
            let kappas = curvatures.kappas();
            let (product_beta, mut warnings) = clipped_product(kappas.iter(), beta);
            let (product_beta_plus, more) = clipped_product(kappas.iter(), beta + 1.0);
            warnings.extend(more);

            let complex_product = kappas
                .iter()
                .fold(Complex64::new(1.0, 0.0), |acc, &kappa| {
                    let term = Complex64::new(1.0 + beta * kappa, kappa);
                    acc / term.sqrt()
                })
                .re;

            let weight = beta * tail - density;
            let a1 = tail * product_beta;
            let a2 = weight * (product_beta - product_beta_plus);
            let a3 = (beta + 1.0) * weight * (product_beta - complex_product);
            (a1 + a2 + a3, warnings)
        });

        Ok(Self { curvatures, breitung, hohenbichler, tvedt })
    }

    /// The shared curvature profile.
    pub fn curvatures(&self) -> &CurvatureProfile {
        &self.curvatures
    }

    /// Breitung's asymptotic correction.
    pub fn breitung(&self) -> &SormCorrection {
        &self.breitung
    }

    /// Hohenbichler's density-ratio correction.
    pub fn hohenbichler(&self) -> &SormCorrection {
        &self.hohenbichler
    }

    /// Tvedt's three-term correction.
    pub fn tvedt(&self) -> &SormCorrection {
        &self.tvedt
    }
}

// ---- Helper methods ----

/// Product `Π(1 + c·κ_i)^{−1/2}` with non-positive terms clipped to
/// [`CLIP_EPSILON`] and reported.
fn clipped_product<'a, I>(kappas: I, factor: f64) -> (f64, Vec<NumericalValidityWarning>)
where
    I: Iterator<Item = &'a f64>,
{
    let mut product = 1.0;
    let mut warnings = Vec::new();
    for (direction, &kappa) in kappas.enumerate() {
        let mut term = 1.0 + factor * kappa;
        if term <= 0.0 {
            warnings.push(NumericalValidityWarning::NonConvexCurvatureTerm { direction, term });
            term = CLIP_EPSILON;
        }
        product /= term.sqrt();
    }
    (product, warnings)
}

/// Assemble a [`SormCorrection`] from the origin-out tail estimate,
/// applying the origin-side complement and deriving the generalized index
/// from the final probability.
fn correction_from_product(
    normal: &Normal, design_point: &DesignPoint, raw: (f64, Vec<NumericalValidityWarning>),
) -> SormCorrection {
    let (tail_estimate, warnings) = raw;
    let probability = if design_point.origin_in_failure_domain {
        1.0 - tail_estimate
    } else {
        tail_estimate
    };
    let generalized_index = generalized_index_from(normal, probability);
    SormCorrection { probability, generalized_index, warnings }
}
