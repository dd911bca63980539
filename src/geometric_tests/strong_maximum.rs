//! geometric_tests::strong_maximum — sampling check that a design point is
//! the global nearest boundary point.
//!
//! Purpose
//! -------
//! FORM/SORM silently assume the optimizer found the *global* minimum-norm
//! boundary point. This test probes that assumption without touching the
//! optimizer: it samples directions uniformly on the standard-space sphere
//! of radius `β(1 + accuracy·δ)` and classifies each sampled point by
//! whether it lies in the failure domain and whether it falls inside the
//! angular vicinity of the design-point direction. Failure-domain points
//! *outside* the vicinity reveal a boundary region the search never saw —
//! the signature of a local (not global) design point.
//!
//! Key behaviors
//! -------------
//! - Derive the sample count analytically from a binomial-tail argument:
//!   the smallest `N` with `(1 − importance)^N ≤ 1 − confidence`, so any
//!   boundary region of directional probability mass ≥ `importance` is hit
//!   at least once with probability ≥ `confidence`.
//! - Derive the enlargement unit `δ` from the standard-normal shell whose
//!   tail mass is `importance·Φ(−β)`: `accuracy ∈ [0, 1]` interpolates
//!   between the β-sphere and that shell, larger values probe farther.
//! - Classify with the vicinity cosine `β/R`: a sampled point is "near"
//!   exactly when it lies beyond the FORM tangent hyperplane at the design
//!   point.
//! - Report the four disjoint point sets, the radius and cosine actually
//!   used, and leave interpretation to the caller — the test itself never
//!   raises an error on a suspicious geometry.
//!
//! Invariants & assumptions
//! ------------------------
//! - The four point sets partition the sample: every sampled point lands
//!   in exactly one set.
//! - Sampling is deterministic for a given seed (`SmallRng`), so runs are
//!   reproducible in tests and reports.
//! - The design point and event are read-only; the only side effects are
//!   the constraint evaluations themselves.
use crate::geometric_tests::{
    errors::{GeoTestError, GeoTestResult},
    validation::{validate_accuracy_level, validate_open_unit_level},
};
use crate::optimization::nearest_point::{traits::EqualityConstraint, types::Point};
use crate::reliability::design_point::DesignPoint;
use ndarray::Array1;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use statrs::distribution::{ContinuousCDF, Normal};

/// Smallest number of sampled directions such that any boundary region of
/// directional probability mass at least `importance_level` is hit at
/// least once with probability at least `confidence_level`.
///
/// Closed form: `N = ⌈ln(1 − confidence)/ln(1 − importance)⌉`, never less
/// than 1. Computed analytically, not guessed.
///
/// # Errors
/// Level validation errors when either argument leaves the open unit
/// interval.
pub fn required_sample_count(
    importance_level: f64, confidence_level: f64,
) -> GeoTestResult<usize> {
    validate_open_unit_level(importance_level, GeoTestError::InvalidImportanceLevel)?;
    validate_open_unit_level(confidence_level, GeoTestError::InvalidConfidenceLevel)?;
    let count = ((1.0 - confidence_level).ln() / (1.0 - importance_level).ln()).ceil();
    Ok((count as usize).max(1))
}

/// StrongMaximumOutcome — classified sphere sample for one design point.
///
/// The four sets are disjoint and together contain every sampled point:
/// near/far refers to the angular vicinity of the design-point direction
/// (cosine at least [`cos_vicinity`](Self::cos_vicinity)), in/outside to
/// membership in the failure domain (`h < 0`).
#[derive(Debug, Clone, PartialEq)]
pub struct StrongMaximumOutcome {
    near_in_event: Vec<Point>,
    near_outside_event: Vec<Point>,
    far_in_event: Vec<Point>,
    far_outside_event: Vec<Point>,
    sampling_radius: f64,
    cos_vicinity: f64,
    delta: f64,
    sample_count: usize,
}

impl StrongMaximumOutcome {
    /// Run the Strong Maximum Test.
    ///
    /// # Parameters
    /// - `constraint`: standardized limit state of the analyzed event;
    ///   only `value` is called, once per sampled point.
    /// - `design_point`: the design point under scrutiny (read-only).
    /// - `importance_level`: smallest directional probability mass the
    ///   test must be able to detect, in (0, 1).
    /// - `accuracy_level`: radius enlargement factor `k ≥ 0`; the sphere
    ///   radius is `β(1 + k·δ)`.
    /// - `confidence_level`: detection confidence, in (0, 1).
    /// - `seed`: RNG seed; equal seeds reproduce the sample exactly.
    ///
    /// # Errors
    /// - Level validation errors for out-of-range parameters.
    /// - [`GeoTestError::DegenerateDesignPoint`] when `β` is numerically
    ///   zero.
    /// - [`GeoTestError::SaturatedEnlargement`] when the enlargement
    ///   target underflows.
    /// - [`GeoTestError::Constraint`] when a sampled point cannot be
    ///   classified.
    pub fn strong_maximum(
        constraint: &dyn EqualityConstraint, design_point: &DesignPoint, importance_level: f64,
        accuracy_level: f64, confidence_level: f64, seed: u64,
    ) -> GeoTestResult<Self> {
        validate_open_unit_level(importance_level, GeoTestError::InvalidImportanceLevel)?;
        validate_open_unit_level(confidence_level, GeoTestError::InvalidConfidenceLevel)?;
        validate_accuracy_level(accuracy_level)?;

        let beta = design_point.beta;
        let direction = design_point
            .direction()
            .ok_or(GeoTestError::DegenerateDesignPoint { beta })?;

        // Enlargement unit: reach the shell whose tail mass is
        // importance · Φ(−β).
        let normal = Normal::new(0.0, 1.0).expect("unit normal");
        let target = importance_level * normal.cdf(-beta);
        if target <= 0.0 {
            return Err(GeoTestError::SaturatedEnlargement { probability: target });
        }
        let enlarged_beta = -normal.inverse_cdf(target);
        let delta = enlarged_beta / beta - 1.0;
        let sampling_radius = beta * (1.0 + accuracy_level * delta);
        let cos_vicinity = beta / sampling_radius;

        let sample_count = required_sample_count(importance_level, confidence_level)?;
        let dim = design_point.dim();
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut near_in_event = Vec::new();
        let mut near_outside_event = Vec::new();
        let mut far_in_event = Vec::new();
        let mut far_outside_event = Vec::new();

        for _ in 0..sample_count {
            let point = sample_sphere_point(&mut rng, dim, sampling_radius);
            let cosine = point.dot(&direction) / sampling_radius;
            let in_event = constraint.value(&point)? < 0.0;
            let near = cosine >= cos_vicinity;
            match (near, in_event) {
                (true, true) => near_in_event.push(point),
                (true, false) => near_outside_event.push(point),
                (false, true) => far_in_event.push(point),
                (false, false) => far_outside_event.push(point),
            }
        }

        Ok(Self {
            near_in_event,
            near_outside_event,
            far_in_event,
            far_outside_event,
            sampling_radius,
            cos_vicinity,
            delta,
            sample_count,
        })
    }

    /// Failure-domain points inside the design-point vicinity (expected
    /// when the design point is genuine).
    pub fn near_in_event(&self) -> &[Point] {
        &self.near_in_event
    }

    /// Safe points inside the vicinity.
    pub fn near_outside_event(&self) -> &[Point] {
        &self.near_outside_event
    }

    /// Failure-domain points *outside* the vicinity — a nonzero count
    /// means a boundary region the search never saw; interpretation is the
    /// caller's responsibility.
    pub fn far_in_event(&self) -> &[Point] {
        &self.far_in_event
    }

    /// Safe points outside the vicinity.
    pub fn far_outside_event(&self) -> &[Point] {
        &self.far_outside_event
    }

    /// The sphere radius actually sampled, `β(1 + accuracy·δ)`.
    pub fn sampling_radius(&self) -> f64 {
        self.sampling_radius
    }

    /// The empirical vicinity cosine `β/R` separating near from far.
    pub fn cos_vicinity(&self) -> f64 {
        self.cos_vicinity
    }

    /// The derived enlargement unit δ.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of directions sampled.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Total classified points; always equals [`sample_count`](Self::sample_count).
    pub fn total_classified(&self) -> usize {
        self.near_in_event.len()
            + self.near_outside_event.len()
            + self.far_in_event.len()
            + self.far_outside_event.len()
    }
}

// ---- Helper methods ----

/// Uniform random point on the sphere of the given radius: a standard
/// Gaussian vector scaled to the radius, resampled in the (measure-zero)
/// event of a numerically zero norm.
fn sample_sphere_point(rng: &mut SmallRng, dim: usize, radius: f64) -> Point {
    loop {
        let gaussian: Point = Array1::from_iter((0..dim).map(|_| rng.sample::<f64, _>(StandardNormal)));
        let norm = gaussian.dot(&gaussian).sqrt();
        if norm > f64::EPSILON {
            return gaussian * (radius / norm);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::SearchResult as SR;
    use crate::optimization::nearest_point::types::Gradient;
    use crate::reliability::design_point::ConvergenceDiagnostics;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The closed-form sample count at the specified boundary case.
    // - Partitioning and disjointness of the four point sets.
    // - Detection of a local (non-global) design point via far-in-event
    //   points on a two-lobe failure domain.
    // - Radius derivation for accuracy level zero.
    //
    // They intentionally DO NOT cover:
    // - FORM/SORM consumption of a validated design point.
    // -------------------------------------------------------------------------

    fn dp(standard: Array1<f64>) -> DesignPoint {
        let physical = standard.clone();
        DesignPoint::new(
            standard,
            physical,
            false,
            ConvergenceDiagnostics {
                iterations: 1,
                constraint_residual: 0.0,
                gradient_residual: 0.0,
            },
        )
        .expect("valid design point")
    }

    /// Two failure lobes: `h(u) = (2 − u₀)(u₀ + 1)`, failing for u₀ > 2
    /// (distance 2) and u₀ < −1 (distance 1). The nearer lobe is at
    /// distance 1, so (2, 0) is a local, not global, design point.
    struct TwoLobes;

    impl EqualityConstraint for TwoLobes {
        fn dim(&self) -> usize {
            2
        }
        fn value(&self, u: &Point) -> SR<f64> {
            Ok((2.0 - u[0]) * (u[0] + 1.0))
        }
        fn gradient(&self, u: &Point) -> SR<Gradient> {
            Ok(array![1.0 - 2.0 * u[0], 0.0])
        }
        fn evaluations(&self) -> u64 {
            0
        }
        fn gradient_evaluations(&self) -> u64 {
            0
        }
    }

    /// Single half-space `h(u) = 2 − u₀`, failing only for u₀ > 2.
    struct OneLobe;

    impl EqualityConstraint for OneLobe {
        fn dim(&self) -> usize {
            2
        }
        fn value(&self, u: &Point) -> SR<f64> {
            Ok(2.0 - u[0])
        }
        fn gradient(&self, _u: &Point) -> SR<Gradient> {
            Ok(array![-1.0, 0.0])
        }
        fn evaluations(&self) -> u64 {
            0
        }
        fn gradient_evaluations(&self) -> u64 {
            0
        }
    }

    #[test]
    // Purpose
    // -------
    // Regression-fix the closed-form sample count at the boundary case
    // importance = 0.01, confidence = 0.999999.
    //
    // Given
    // -----
    // - The two levels above.
    //
    // Expect
    // ------
    // - N = 1375, with (1 − 0.01)^N ≤ 1e−6 and N − 1 failing the bound.
    fn sample_count_boundary_case() {
        // Arrange
        let importance = 0.01;
        let confidence = 0.999999;

        // Act
        let n = required_sample_count(importance, confidence).unwrap();

        // Assert
        assert_eq!(n, 1375);
        assert!((1.0 - importance).powi(n as i32) <= 1.0 - confidence);
        assert!((1.0 - importance).powi(n as i32 - 1) > 1.0 - confidence);
    }

    #[test]
    // Purpose
    // -------
    // Verify the four sets partition the sample and that a genuine design
    // point produces no far-in-event points.
    //
    // Given
    // -----
    // - The single-lobe constraint with its true design point (2, 0) and
    //   moderate levels.
    //
    // Expect
    // ------
    // - total_classified() == sample_count() and far_in_event is empty.
    fn single_lobe_has_no_far_violations() {
        // Arrange
        let design_point = dp(array![2.0, 0.0]);

        // Act
        let outcome = StrongMaximumOutcome::strong_maximum(
            &OneLobe,
            &design_point,
            0.05,
            1.0,
            0.99,
            42,
        )
        .expect("Test run should succeed");

        // Assert
        assert_eq!(outcome.total_classified(), outcome.sample_count());
        assert!(
            outcome.far_in_event().is_empty(),
            "A global design point should produce no far-in-event points, found {}",
            outcome.far_in_event().len()
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the local-minimum signature: feeding the farther lobe's
    // design point on a two-lobe domain yields far-in-event points.
    //
    // Given
    // -----
    // - The two-lobe constraint with the (wrong) design point (2, 0) at
    //   distance 2, while the nearer lobe sits at distance 1.
    //
    // Expect
    // ------
    // - A nonzero count of far-in-event points with a fixed seed.
    fn two_lobes_flag_the_local_design_point() {
        // Arrange
        let design_point = dp(array![2.0, 0.0]);

        // Act
        let outcome = StrongMaximumOutcome::strong_maximum(
            &TwoLobes,
            &design_point,
            0.01,
            1.0,
            0.999,
            42,
        )
        .expect("Test run should succeed");

        // Assert
        assert!(
            !outcome.far_in_event().is_empty(),
            "The unseen nearer lobe must surface as far-in-event points"
        );
        assert_eq!(outcome.total_classified(), outcome.sample_count());
    }

    #[test]
    // Purpose
    // -------
    // Verify accuracy level 0 samples the β-sphere itself and that the
    // vicinity cosine is then exactly 1's companion β/R = 1.
    //
    // Given
    // -----
    // - The single-lobe design point with accuracy_level = 0.
    //
    // Expect
    // ------
    // - sampling_radius == β and cos_vicinity == 1; δ > 0 regardless.
    fn zero_accuracy_samples_the_beta_sphere() {
        // Arrange
        let design_point = dp(array![2.0, 0.0]);

        // Act
        let outcome = StrongMaximumOutcome::strong_maximum(
            &OneLobe,
            &design_point,
            0.05,
            0.0,
            0.9,
            7,
        )
        .expect("Test run should succeed");

        // Assert
        assert!((outcome.sampling_radius() - design_point.beta).abs() < 1e-12);
        assert!((outcome.cos_vicinity() - 1.0).abs() < 1e-12);
        assert!(outcome.delta() > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a degenerate design point is rejected before sampling.
    //
    // Given
    // -----
    // - A design point at the origin.
    //
    // Expect
    // ------
    // - GeoTestError::DegenerateDesignPoint.
    fn degenerate_design_point_is_rejected() {
        // Arrange
        let design_point = dp(array![0.0, 0.0]);

        // Act
        let result = StrongMaximumOutcome::strong_maximum(
            &OneLobe,
            &design_point,
            0.05,
            1.0,
            0.9,
            7,
        );

        // Assert
        match result {
            Err(GeoTestError::DegenerateDesignPoint { .. }) => {}
            other => panic!("Expected DegenerateDesignPoint, got {other:?}"),
        }
    }
}
