//! Integration tests for the reliability analysis pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path: from an event over a physical
//!   performance function, through the standard-space transform and the
//!   design-point search, to FORM/SORM probabilities, sensitivities, and
//!   the Strong Maximum Test.
//! - Exercise analytic scenarios with known answers (half-space exactness,
//!   the 4-dimensional linear benchmark, the parabolic boundary) rather
//!   than toy edge cases only.
//!
//! Coverage
//! --------
//! - `optimization::nearest_point`:
//!   - `find_design_point` with both the HLRF and the
//!     augmented-Lagrangian solver, including both line searches.
//! - `reliability::{form, sorm, sensitivity}`:
//!   - Exact FORM probability on an affine boundary; the measurable
//!     FORM-vs-Breitung gap on a curved boundary; the origin-side sign
//!     flip; analytic mean-shift sensitivities.
//! - `geometric_tests::strong_maximum`:
//!   - Detection of a deliberately wrong (local) design point on a
//!     two-lobe failure domain.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (validation
//!   routines, finite differences, error Display) — covered by unit tests.
//! - Non-normal marginal transforms beyond a round-trip sanity check —
//!   covered by the transform unit tests.
use ndarray::{array, Array1, Array2};
use rust_reliability::geometric_tests::strong_maximum::StrongMaximumOutcome;
use rust_reliability::optimization::errors::SearchResult;
use rust_reliability::optimization::nearest_point::{
    adapter::StandardConstraint,
    api::find_design_point,
    augmented::AugmentedLagrangianSolver,
    hlrf::HlrfSolver,
    traits::{LineSearcher, PerformanceFunction, SolverOptions, Tolerances},
    types::{Gradient, Point},
};
use rust_reliability::reliability::{
    event::{ComparisonOperator, Event},
    form::{FormOutcome, ImportanceConvention},
    sensitivity::SensitivityOutcome,
    sorm::SormOutcome,
};
use rust_reliability::transform::traits::{StandardNormalTransform, StandardSpaceTransform};

/// The 4-dimensional linear benchmark `g(x) = x₁ + 2x₂ − 3x₃ + 4x₄`.
struct Linear4;

impl PerformanceFunction for Linear4 {
    fn value(&self, x: &Point) -> SearchResult<f64> {
        Ok(x[0] + 2.0 * x[1] - 3.0 * x[2] + 4.0 * x[3])
    }

    fn check(&self, _x: &Point) -> SearchResult<()> {
        Ok(())
    }

    fn gradient(&self, _x: &Point) -> SearchResult<Gradient> {
        Ok(array![1.0, 2.0, -3.0, 4.0])
    }
}

/// Parabolic performance function `g(x) = 6 + x₀² − x₁` with a curved
/// limit-state boundary and analytic derivatives.
struct Parabolic;

impl PerformanceFunction for Parabolic {
    fn value(&self, x: &Point) -> SearchResult<f64> {
        Ok(6.0 + x[0] * x[0] - x[1])
    }

    fn check(&self, _x: &Point) -> SearchResult<()> {
        Ok(())
    }

    fn gradient(&self, x: &Point) -> SearchResult<Gradient> {
        Ok(array![2.0 * x[0], -1.0])
    }
}

/// Two failure lobes at different distances:
/// `g(x) = (2 − x₀)(x₀ + 1)`, failing (g < 0) for x₀ > 2 and x₀ < −1.
struct TwoLobes;

impl PerformanceFunction for TwoLobes {
    fn value(&self, x: &Point) -> SearchResult<f64> {
        Ok((2.0 - x[0]) * (x[0] + 1.0))
    }

    fn check(&self, _x: &Point) -> SearchResult<()> {
        Ok(())
    }

    fn gradient(&self, x: &Point) -> SearchResult<Gradient> {
        Ok(array![1.0 - 2.0 * x[0], 0.0])
    }
}

/// Baseline solver options used across the scenarios: default tolerances,
/// a 200-iteration budget, and the More–Thuente line search for the inner
/// solves of the augmented-Lagrangian path.
fn default_options() -> SolverOptions {
    SolverOptions::new(Tolerances::default(), 200, None, LineSearcher::MoreThuente, None, false)
        .expect("SolverOptions should be valid")
}

#[test]
// Purpose
// -------
// Verify the 4-dimensional linear benchmark end to end with the HLRF
// solver: design point, reliability index, exact FORM probability, and
// importance factors.
//
// Given
// -----
// - Independent standard normal inputs, event `g(X) < −3` with
//   g = x₁ + 2x₂ − 3x₃ + 4x₄, so ‖a‖ = √30.
//
// Expect
// ------
// - β = 3/√30 ≈ 0.5477, design point −3·a/30, P = Φ(−β) ≈ 0.2919
//   (exact: the boundary is affine), classical importance factors
//   (1, 4, 9, 16)/30 with signs matching the design point.
fn linear_benchmark_with_hlrf() {
    // Arrange
    let g = Linear4;
    let transform = StandardNormalTransform::new(4);
    let event = Event::new(&g, ComparisonOperator::LessThan, -3.0).expect("valid event");
    let solver = HlrfSolver::new();
    let opts = default_options();

    // Act
    let (design_point, trace) =
        find_design_point(&event, &transform, &solver, &Array1::zeros(4), &opts)
            .expect("Linear search should converge");
    let form = FormOutcome::evaluate(&design_point, ImportanceConvention::Classical)
        .expect("FORM should succeed");

    // Assert
    let beta_expected = 3.0 / 30.0_f64.sqrt();
    assert!(
        (design_point.beta - beta_expected).abs() < 1e-6,
        "beta = {}, expected {beta_expected}",
        design_point.beta
    );
    let expected_point = [-0.1, -0.2, 0.3, -0.4];
    for (i, &expected) in expected_point.iter().enumerate() {
        assert!(
            (design_point.standard[i] - expected).abs() < 1e-6,
            "u[{i}] = {}, expected {expected}",
            design_point.standard[i]
        );
    }
    assert!(!design_point.origin_in_failure_domain);
    assert!((form.probability() - 0.2919).abs() < 1e-3);
    let expected_importance = [-1.0 / 30.0, -4.0 / 30.0, 9.0 / 30.0, -16.0 / 30.0];
    for (i, &expected) in expected_importance.iter().enumerate() {
        assert!(
            (form.importance_factors()[i] - expected).abs() < 1e-6,
            "importance[{i}] = {}, expected {expected}",
            form.importance_factors()[i]
        );
    }
    assert!(trace.evaluations() > 0, "The search must report its evaluation trace");
}

#[test]
// Purpose
// -------
// Verify the augmented-Lagrangian solver reproduces the HLRF design point
// on the same benchmark, under both line searches.
//
// Given
// -----
// - The linear benchmark with the multiplier-method solver.
//
// Expect
// ------
// - β within 1e-4 of 3/√30 for More–Thuente and Hager–Zhang alike.
fn linear_benchmark_with_augmented_lagrangian() {
    for line_searcher in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
        // Arrange
        let g = Linear4;
        let transform = StandardNormalTransform::new(4);
        let event = Event::new(&g, ComparisonOperator::LessThan, -3.0).expect("valid event");
        let solver = AugmentedLagrangianSolver::default();
        let opts =
            SolverOptions::new(Tolerances::default(), 200, None, line_searcher, None, false)
                .expect("SolverOptions should be valid");

        // Act
        let (design_point, _trace) =
            find_design_point(&event, &transform, &solver, &Array1::zeros(4), &opts)
                .expect("Augmented-Lagrangian search should converge");

        // Assert
        let beta_expected = 3.0 / 30.0_f64.sqrt();
        assert!(
            (design_point.beta - beta_expected).abs() < 1e-4,
            "beta = {} under {line_searcher:?}",
            design_point.beta
        );
    }
}

#[test]
// Purpose
// -------
// Verify the curved-boundary scenario: the Breitung-corrected probability
// differs from FORM by more than 1 % relative, reproducibly.
//
// Given
// -----
// - Event `g(X) < 0` with g = 6 + x₀² − x₁ over standard normals: the
//   failure domain lies above the parabola, the design point is (0, 6)
//   with β = 6 and a single curvature +2.
//
// Expect
// ------
// - β ≈ 6, FORM P = Φ(−6), Breitung P ≈ Φ(−6)/√13, a relative gap above
//   1 % (in fact about 72 %).
fn curved_boundary_form_vs_sorm_gap() {
    // Arrange
    let g = Parabolic;
    let transform = StandardNormalTransform::new(2);
    let event = Event::new(&g, ComparisonOperator::LessThan, 0.0).expect("valid event");
    let solver = HlrfSolver::new();
    let opts = default_options();

    // Act
    let (design_point, _trace) =
        find_design_point(&event, &transform, &solver, &array![0.5, 1.0], &opts)
            .expect("Parabolic search should converge");
    let constraint = StandardConstraint::new(&event, &transform);
    let form = FormOutcome::evaluate(&design_point, ImportanceConvention::Classical)
        .expect("FORM should succeed");
    let sorm = SormOutcome::evaluate(&constraint, &design_point, None)
        .expect("SORM should succeed");

    // Assert
    assert!((design_point.beta - 6.0).abs() < 1e-4, "beta = {}", design_point.beta);
    assert_eq!(sorm.curvatures().len(), 1);
    assert!((sorm.curvatures().kappas()[0] - 2.0).abs() < 1e-3);
    let relative_gap =
        (form.probability() - sorm.breitung().probability()).abs() / form.probability();
    assert!(relative_gap > 0.01, "FORM-vs-Breitung gap {relative_gap} should exceed 1 %");
    assert!(sorm.breitung().is_fully_valid());
}

#[test]
// Purpose
// -------
// Verify the origin-side sign flip end to end: the complementary event
// `g(X) > 0` of the parabolic scenario has the origin inside the failure
// domain and a near-one probability whose complement scales with the same
// Breitung factor.
//
// Given
// -----
// - Event `g(X) > 0` with the same parabolic function; failure is below
//   the parabola and contains the origin; the design point is still
//   (0, 6).
//
// Expect
// ------
// - origin_in_failure_domain == true, FORM P = 1 − Φ(−6) (generalized
//   index ≈ −6), and 1 − P_breitung ≈ (1 − P_form)/√13.
fn complementary_event_flips_origin_side() {
    // Arrange
    let g = Parabolic;
    let transform = StandardNormalTransform::new(2);
    let event = Event::new(&g, ComparisonOperator::GreaterThan, 0.0).expect("valid event");
    let solver = HlrfSolver::new();
    let opts = default_options();

    // Act
    let (design_point, _trace) =
        find_design_point(&event, &transform, &solver, &array![0.5, 1.0], &opts)
            .expect("Complementary parabolic search should converge");
    let constraint = StandardConstraint::new(&event, &transform);
    let form = FormOutcome::evaluate(&design_point, ImportanceConvention::Classical)
        .expect("FORM should succeed");
    let sorm = SormOutcome::evaluate(&constraint, &design_point, None)
        .expect("SORM should succeed");

    // Assert
    assert!(design_point.origin_in_failure_domain);
    assert!((design_point.beta - 6.0).abs() < 1e-4);
    assert!(form.probability() > 0.999999);
    assert!((form.generalized_index() + 6.0).abs() < 1e-4);
    let form_complement = 1.0 - form.probability();
    let breitung_complement = 1.0 - sorm.breitung().probability();
    let ratio = form_complement / breitung_complement;
    assert!(
        (ratio - 13.0_f64.sqrt()).abs() < 0.05,
        "Complement ratio {ratio} should be about √13"
    );
}

#[test]
// Purpose
// -------
// Verify the two-lobe local-minimum scenario end to end: searching from a
// start biased toward the farther lobe converges to the local design
// point, and the Strong Maximum Test flags it.
//
// Given
// -----
// - Event `g(X) < 0` with g = (2 − x₀)(x₀ + 1): lobes at distance 2
//   (x₀ > 2) and 1 (x₀ < −1). Starting at (3, 0) drives HLRF into the
//   farther lobe's boundary point (2, 0).
//
// Expect
// ------
// - The search converges to (2, 0); the Strong Maximum Test reports a
//   nonzero count of failure-domain points outside the design-point
//   vicinity with a fixed seed.
fn two_lobe_local_design_point_is_flagged() {
    // Arrange
    let g = TwoLobes;
    let transform = StandardNormalTransform::new(2);
    let event = Event::new(&g, ComparisonOperator::LessThan, 0.0).expect("valid event");
    let solver = HlrfSolver::new();
    let opts = default_options();

    // Act
    let (design_point, _trace) =
        find_design_point(&event, &transform, &solver, &array![3.0, 0.0], &opts)
            .expect("Two-lobe search should converge to the nearer boundary of its basin");
    let constraint = StandardConstraint::new(&event, &transform);
    let outcome = StrongMaximumOutcome::strong_maximum(
        &constraint,
        &design_point,
        0.01,
        1.0,
        0.999,
        1234,
    )
    .expect("Strong maximum test should run");

    // Assert
    assert!(
        (design_point.standard[0] - 2.0).abs() < 1e-5,
        "Expected the local design point at x₀ = 2, got {}",
        design_point.standard[0]
    );
    assert!(
        !outcome.far_in_event().is_empty(),
        "The unseen nearer lobe must produce far-in-event points"
    );
    assert_eq!(outcome.total_classified(), outcome.sample_count());
}

#[test]
// Purpose
// -------
// Verify analytic mean-shift and threshold sensitivities on the linear
// benchmark.
//
// Given
// -----
// - The converged linear design point; mean parameters enter through
//   `u = x − m`, so the transform parameter gradient is −I.
//
// Expect
// ------
// - ∂β/∂m = a/‖a‖ = (1, 2, −3, 4)/√30 and ∂β/∂t = −1/√30.
fn linear_benchmark_sensitivities() {
    // Arrange
    let g = Linear4;
    let transform = StandardNormalTransform::new(4);
    let event = Event::new(&g, ComparisonOperator::LessThan, -3.0).expect("valid event");
    let solver = HlrfSolver::new();
    let opts = default_options();
    let (design_point, _trace) =
        find_design_point(&event, &transform, &solver, &Array1::zeros(4), &opts)
            .expect("Linear search should converge");
    let constraint = StandardConstraint::new(&event, &transform);
    let mut parameter_gradient = Array2::<f64>::zeros((4, 4));
    for i in 0..4 {
        parameter_gradient[[i, i]] = -1.0;
    }

    // Act
    let sensitivity =
        SensitivityOutcome::evaluate(&event, &constraint, &design_point, &parameter_gradient)
            .expect("Sensitivity should be defined");

    // Assert
    let norm = 30.0_f64.sqrt();
    let expected = [1.0 / norm, 2.0 / norm, -3.0 / norm, 4.0 / norm];
    for (j, &value) in expected.iter().enumerate() {
        assert!(
            (sensitivity.beta_partials()[j] - value).abs() < 1e-5,
            "∂β/∂m[{j}] = {}, expected {value}",
            sensitivity.beta_partials()[j]
        );
    }
    assert!((sensitivity.threshold_beta_partial() + 1.0 / norm).abs() < 1e-6);
}

#[test]
// Purpose
// -------
// Round-trip sanity of the identity transform used throughout, as a
// pipeline-level guard (the marginal transforms have their own unit
// tests).
//
// Given
// -----
// - A handful of points in R⁴.
//
// Expect
// ------
// - `to_physical(to_standard(x)) == x` exactly.
fn identity_transform_round_trip() {
    // Arrange
    let transform = StandardNormalTransform::new(4);
    let points = [array![0.0, 0.0, 0.0, 0.0], array![1.5, -2.0, 0.25, 3.0]];

    for x in points {
        // Act
        let u = transform.to_standard(&x).expect("forward map");
        let back = transform.to_physical(&u).expect("inverse map");

        // Assert
        assert_eq!(back, x);
    }
}
