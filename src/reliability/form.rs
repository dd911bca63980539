//! reliability::form — first-order reliability method.
//!
//! Purpose
//! -------
//! Turn a converged design point into the first-order failure-probability
//! approximation, the generalized reliability index, and an
//! importance-factor decomposition of the design direction. The failure
//! boundary is replaced by its tangent hyperplane at the design point, so
//! the probability reduces to a standard-normal tail at distance β — exact
//! for affine boundaries, asymptotically correct otherwise.
//!
//! Key behaviors
//! -------------
//! - Apply the origin-side sign convention once: `P ≈ Φ(−β)` when the
//!   origin is safe, `Φ(β)` when the origin itself realizes the event.
//! - Derive the generalized index as `−Φ⁻¹(P)` from the probability, never
//!   by forwarding `β`, so the same accessor stays consistent when a
//!   SORM-corrected probability replaces the first-order one.
//! - Report importance factors under two independent conventions and fall
//!   back to a documented zero vector (with a validity warning) for the
//!   degenerate `β = 0` case instead of propagating NaN.
//!
//! Conventions
//! -----------
//! - `Classical` importance factors are the signed squared direction
//!   cosines `sign(u*_i)·(u*_i/β)²`; `Absolute` drops the sign and reports
//!   the magnitudes. Both sum to 1 in absolute value for `β > 0`.
//! - For quantile evaluation the probability is clamped to the open unit
//!   interval; the stored probability itself is never clamped.
use crate::reliability::{
    design_point::{DesignPoint, DEGENERATE_BETA},
    errors::{NumericalValidityWarning, ReliabilityResult},
};
use ndarray::Array1;
use statrs::distribution::{ContinuousCDF, Normal};

/// Importance-factor reporting convention.
///
/// The two conventions share the underlying ratios `(u*_i/β)²` and differ
/// only in sign reporting; equal-magnitude components receive identical
/// weights under both. They are independent contracts, not refinements of
/// one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportanceConvention {
    /// Signed squared direction cosines: `sign(u*_i)·(u*_i/β)²`.
    Classical,
    /// Unsigned squared direction cosines: `(u*_i/β)²`.
    Absolute,
}

/// FormOutcome — first-order probability estimate for one design point.
///
/// One instance per `(design point, convention)` pair. The probability is
/// exact when the standardized failure boundary is affine and an
/// asymptotic approximation otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct FormOutcome {
    probability: f64,
    generalized_index: f64,
    importance_factors: Array1<f64>,
    convention: ImportanceConvention,
    warnings: Vec<NumericalValidityWarning>,
}

impl FormOutcome {
    /// Evaluate the first-order approximation at a design point.
    ///
    /// # Parameters
    /// - `design_point`: converged, immutable design point.
    /// - `convention`: importance-factor reporting convention.
    ///
    /// # Degenerate case
    /// When `β` is numerically zero the importance ratios are 0/0; the
    /// outcome then carries a zero importance vector plus a
    /// [`NumericalValidityWarning::DegenerateDesignPoint`] warning, and the
    /// probability is ½ as the tangent hyperplane passes through the
    /// origin.
    ///
    /// # Errors
    /// Currently infallible beyond the design-point invariants already
    /// enforced at construction; the `Result` return keeps the engine
    /// signature uniform with SORM and the sensitivity layer.
    pub fn evaluate(
        design_point: &DesignPoint, convention: ImportanceConvention,
    ) -> ReliabilityResult<Self> {
        let normal = Normal::new(0.0, 1.0).expect("unit normal");
        let beta = design_point.beta;

        let tail = normal.cdf(-beta);
        let probability =
            if design_point.origin_in_failure_domain { 1.0 - tail } else { tail };
        let generalized_index = generalized_index_from(&normal, probability);

        let mut warnings = Vec::new();
        let importance_factors = if beta <= DEGENERATE_BETA {
            warnings.push(NumericalValidityWarning::DegenerateDesignPoint { beta });
            Array1::zeros(design_point.dim())
        } else {
            design_point.standard.mapv(|u_i| {
                let ratio = (u_i / beta) * (u_i / beta);
                match convention {
                    ImportanceConvention::Classical => ratio.copysign(u_i),
                    ImportanceConvention::Absolute => ratio,
                }
            })
        };

        Ok(Self { probability, generalized_index, importance_factors, convention, warnings })
    }

    /// The event probability estimate.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// The generalized reliability index `−Φ⁻¹(P)`.
    pub fn generalized_index(&self) -> f64 {
        self.generalized_index
    }

    /// One signed (or unsigned, per convention) weight per standard-space
    /// direction.
    pub fn importance_factors(&self) -> &Array1<f64> {
        &self.importance_factors
    }

    /// The convention the importance factors were reported under.
    pub fn convention(&self) -> ImportanceConvention {
        self.convention
    }

    /// Validity warnings attached to this outcome.
    pub fn warnings(&self) -> &[NumericalValidityWarning] {
        &self.warnings
    }

    /// Whether the outcome carries no validity warnings.
    pub fn is_fully_valid(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Derive `−Φ⁻¹(P)` with the probability clamped into the open unit
/// interval for quantile evaluation only.
pub(crate) fn generalized_index_from(normal: &Normal, probability: f64) -> f64 {
    let clamped = probability.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON);
    -normal.inverse_cdf(clamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reliability::design_point::ConvergenceDiagnostics;
    use ndarray::array;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The origin-side sign flip of the probability formula.
    // - Derivation of the generalized index from the probability.
    // - Importance-factor normalization under both conventions, including
    //   randomized cases and the degenerate fallback.
    //
    // They intentionally DO NOT cover:
    // - Design points produced by real searches (integration tests).
    // -------------------------------------------------------------------------

    fn point(standard: Array1<f64>, origin_in: bool) -> DesignPoint {
        let physical = standard.clone();
        DesignPoint::new(
            standard,
            physical,
            origin_in,
            ConvergenceDiagnostics {
                iterations: 1,
                constraint_residual: 0.0,
                gradient_residual: 0.0,
            },
        )
        .expect("valid design point")
    }

    #[test]
    // Purpose
    // -------
    // Verify the probability and generalized index for an origin-safe
    // design point at β = 2.
    //
    // Given
    // -----
    // - A design point (2, 0) with the origin outside the failure domain.
    //
    // Expect
    // ------
    // - P = Φ(−2) ≈ 0.02275 and generalized index ≈ +2.
    fn origin_safe_probability_is_lower_tail() {
        // Arrange
        let dp = point(array![2.0, 0.0], false);

        // Act
        let outcome = FormOutcome::evaluate(&dp, ImportanceConvention::Classical).unwrap();

        // Assert
        assert!((outcome.probability() - 0.022750131948).abs() < 1e-9);
        assert!((outcome.generalized_index() - 2.0).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify the mandatory sign flip when the origin realizes the event.
    //
    // Given
    // -----
    // - The same design point with origin_in_failure_domain = true.
    //
    // Expect
    // ------
    // - P = Φ(2) ≈ 0.97725 and generalized index ≈ −2, derived from P.
    fn origin_in_failure_flips_probability() {
        // Arrange
        let dp = point(array![2.0, 0.0], true);

        // Act
        let outcome = FormOutcome::evaluate(&dp, ImportanceConvention::Classical).unwrap();

        // Assert
        assert!((outcome.probability() - 0.977249868052).abs() < 1e-9);
        assert!((outcome.generalized_index() + 2.0).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify both conventions on a point with a negative component:
    // classical weights carry the component sign, absolute weights do not,
    // and both sum to 1 in magnitude.
    //
    // Given
    // -----
    // - The design point (3, −4) with β = 5.
    //
    // Expect
    // ------
    // - Classical: (0.36, −0.64); Absolute: (0.36, 0.64).
    fn conventions_differ_only_in_sign() {
        // Arrange
        let dp = point(array![3.0, -4.0], false);

        // Act
        let classical = FormOutcome::evaluate(&dp, ImportanceConvention::Classical).unwrap();
        let absolute = FormOutcome::evaluate(&dp, ImportanceConvention::Absolute).unwrap();

        // Assert
        assert!((classical.importance_factors()[0] - 0.36).abs() < 1e-12);
        assert!((classical.importance_factors()[1] + 0.64).abs() < 1e-12);
        assert!((absolute.importance_factors()[0] - 0.36).abs() < 1e-12);
        assert!((absolute.importance_factors()[1] - 0.64).abs() < 1e-12);
        for outcome in [&classical, &absolute] {
            let total: f64 = outcome.importance_factors().iter().map(|w| w.abs()).sum();
            assert!((total - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the magnitude-sum invariant on 20 seeded random design
    // points in several dimensions.
    //
    // Given
    // -----
    // - 20 random non-degenerate points in dimensions 2..=6 from a fixed
    //   seed.
    //
    // Expect
    // ------
    // - |importance| sums to 1 within 1e-10 for every point under the
    //   classical convention.
    fn importance_magnitudes_sum_to_one_randomized() {
        // Arrange
        let mut rng = SmallRng::seed_from_u64(7);

        for case in 0..20 {
            let dim = 2 + case % 5;
            let standard =
                Array1::from_iter((0..dim).map(|_| rng.gen_range(-3.0..3.0) + 0.1));
            let dp = point(standard, false);

            // Act
            let outcome = FormOutcome::evaluate(&dp, ImportanceConvention::Classical).unwrap();

            // Assert
            let total: f64 = outcome.importance_factors().iter().map(|w| w.abs()).sum();
            assert!(
                (total - 1.0).abs() < 1e-10,
                "Importance magnitudes summed to {total} for case {case}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the documented degenerate fallback: a zero importance vector
    // with an attached validity warning, not NaN.
    //
    // Given
    // -----
    // - A design point at the origin.
    //
    // Expect
    // ------
    // - Zero importance factors, P = ½, a DegenerateDesignPoint warning,
    //   and is_fully_valid() == false.
    fn degenerate_beta_reports_zero_vector_with_warning() {
        // Arrange
        let dp = point(array![0.0, 0.0], false);

        // Act
        let outcome = FormOutcome::evaluate(&dp, ImportanceConvention::Classical).unwrap();

        // Assert
        assert!(outcome.importance_factors().iter().all(|&w| w == 0.0));
        assert!((outcome.probability() - 0.5).abs() < 1e-12);
        assert!(!outcome.is_fully_valid());
        match outcome.warnings() {
            [NumericalValidityWarning::DegenerateDesignPoint { .. }] => {}
            other => panic!("Expected a DegenerateDesignPoint warning, got {other:?}"),
        }
    }
}
