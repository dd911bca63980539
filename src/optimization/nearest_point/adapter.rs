//! Adapters exposing an event as a standardized constraint and as an
//! `argmin` problem.
//!
//! [`StandardConstraint`] composes the caller's event with a standard-space
//! transform to form the standardized limit state
//! `h(u) = s·(g(T⁻¹(u)) − t)`, with `s` chosen per comparison operator so
//! that `h < 0` always denotes the interior of the failure domain. Analytic
//! performance-function gradients (if provided) are chained through the
//! transform Jacobian; otherwise we finite-difference `h` directly, trying
//! *central* differences first and retrying with *forward* differences when
//! an evaluation failed or validation rejects the result.
//!
//! Every `h` evaluation is recorded in an internal trace that the search
//! orchestration hands back to the caller as an owned
//! [`EvaluationTrace`](crate::reliability::design_point::EvaluationTrace) —
//! the function object itself carries no hidden mutable history.
use std::cell::{Cell, RefCell};

use crate::optimization::{
    errors::{SearchError, SearchResult},
    nearest_point::{
        finite_diff::run_fd_gradient,
        traits::{EqualityConstraint, PerformanceFunction},
        types::{Gradient, Merit, Point},
        validation::{validate_constraint_value, validate_gradient},
    },
};
use crate::reliability::{
    design_point::{EvaluationTrace, TraceSample},
    event::Event,
};
use crate::transform::{errors::TransformError, traits::StandardSpaceTransform};
use argmin::core::{CostFunction, Error, Gradient as ArgminGradient};
use finitediff::FiniteDiff;
use nalgebra::{DMatrix, DVector};
use ndarray::Array1;

/// Standardized limit-state function over a borrowed event and transform.
///
/// - `value` returns `h(u) = s·(g(T⁻¹(u)) − t)` and records the sample.
/// - `gradient` returns:
///   - the chain-ruled analytic gradient `s·(Jᵀ)⁻¹∇g` if the performance
///     function provides one, or
///   - a finite-difference gradient of `h` (no chaining needed).
#[derive(Debug)]
pub struct StandardConstraint<'a, F: PerformanceFunction, T: StandardSpaceTransform> {
    event: &'a Event<'a, F>,
    transform: &'a T,
    trace: RefCell<Vec<TraceSample>>,
    gradient_evals: Cell<u64>,
}

impl<'a, F: PerformanceFunction, T: StandardSpaceTransform> StandardConstraint<'a, F, T> {
    /// Construct a new constraint over a user event and its transform.
    pub fn new(event: &'a Event<'a, F>, transform: &'a T) -> Self {
        Self { event, transform, trace: RefCell::new(Vec::new()), gradient_evals: Cell::new(0) }
    }

    /// Surrender the recorded evaluation history as an owned value,
    /// leaving the internal trace empty.
    pub fn take_trace(&self) -> EvaluationTrace {
        EvaluationTrace::new(self.trace.take(), self.gradient_evals.get())
    }
}

impl<'a, F: PerformanceFunction, T: StandardSpaceTransform> EqualityConstraint
    for StandardConstraint<'a, F, T>
{
    fn dim(&self) -> usize {
        self.transform.dim()
    }

    /// Evaluate `h(u)` and record the sample.
    ///
    /// # Errors
    /// - Propagates transform domain errors as `SearchError::Transform`.
    /// - Propagates any `SearchError` from the user's `value` via `?`.
    /// - Returns `NonFiniteConstraint` if the standardized value is not
    ///   finite.
    fn value(&self, u: &Point) -> SearchResult<f64> {
        let x = self.transform.to_physical(u)?;
        let g = self.event.function().value(&x)?;
        let h = self.event.operator().sign() * (g - self.event.threshold());
        validate_constraint_value(h)?;
        self.trace.borrow_mut().push(TraceSample { point: u.clone(), residual: h });
        Ok(h)
    }

    /// Evaluate `∇h(u)`.
    ///
    /// Behavior:
    /// - If the user implements `gradient(x)`, we validate it, chain it
    ///   through the transform by solving `Jᵀ y = s·∇g`, and validate the
    ///   result.
    /// - Otherwise, we compute a finite-difference gradient of `h`:
    ///   - Try *central* differences first.
    ///   - If any evaluation of `h` failed (captured via `closure_err`),
    ///     or validation rejects the result, retry with *forward*
    ///     differences and validate again.
    ///
    /// Implementation notes:
    /// - The FD closure must return `f64`, so we can't use `?` inside it;
    ///   we capture the first error in `closure_err` and return `NaN` from
    ///   the closure. After FD, we turn that captured error back into a
    ///   real error (or switch to forward differences).
    ///
    /// # Errors
    /// - Propagates user errors from `gradient` (non-`GradientNotImplemented`).
    /// - Propagates any error raised by `h` evaluations performed during FD.
    /// - Returns `Transform(SingularJacobian)` when the chain-rule solve
    ///   fails.
    fn gradient(&self, u: &Point) -> SearchResult<Gradient> {
        self.gradient_evals.set(self.gradient_evals.get() + 1);
        let dim = self.dim();
        let x = self.transform.to_physical(u)?;
        match self.event.function().gradient(&x) {
            Ok(grad_x) => {
                validate_gradient(&grad_x, dim)?;
                let jac = self.transform.jacobian(&x)?;
                let sign = self.event.operator().sign();
                let jac_t = DMatrix::from_fn(dim, dim, |i, j| jac[[j, i]]);
                let rhs = DVector::from_fn(dim, |i, _| sign * grad_x[i]);
                let solved = jac_t
                    .lu()
                    .solve(&rhs)
                    .ok_or(SearchError::Transform(TransformError::SingularJacobian))?;
                let grad_u = Array1::from_iter(solved.iter().copied());
                validate_gradient(&grad_u, dim)?;
                Ok(grad_u)
            }
            Err(SearchError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<SearchError>> = RefCell::new(None);
                let value_fn = |point: &Point| -> f64 {
                    match self.value(point) {
                        Ok(v) => v,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_gradient = u.central_diff(&value_fn);
                if closure_err.borrow().is_some() {
                    return run_fd_gradient(u, &value_fn, &closure_err);
                }
                match validate_gradient(&fd_gradient, dim) {
                    Ok(()) => Ok(fd_gradient),
                    Err(_) => run_fd_gradient(u, &value_fn, &closure_err),
                }
            }
            Err(e) => Err(e),
        }
    }

    fn evaluations(&self) -> u64 {
        self.trace.borrow().len() as u64
    }

    fn gradient_evaluations(&self) -> u64 {
        self.gradient_evals.get()
    }
}

/// Augmented-Lagrangian merit problem over a standardized constraint.
///
/// Exposes `L(u) = ½‖u‖² + λ·h(u) + ½μ·h(u)²` to `argmin` as a cost
/// function with gradient `u + (λ + μh)·∇h`. One instance is built per
/// outer multiplier iteration; the multiplier and penalty are plain data
/// here, updated by the outer loop in
/// [`augmented`](crate::optimization::nearest_point::augmented).
pub struct AugmentedProblem<'a> {
    pub constraint: &'a dyn EqualityConstraint,
    pub multiplier: f64,
    pub penalty: f64,
}

impl<'a> CostFunction for AugmentedProblem<'a> {
    type Param = Point;
    type Output = Merit;

    fn cost(&self, u: &Self::Param) -> Result<Self::Output, Error> {
        let h = self.constraint.value(u)?;
        Ok(0.5 * u.dot(u) + self.multiplier * h + 0.5 * self.penalty * h * h)
    }
}

impl<'a> ArgminGradient for AugmentedProblem<'a> {
    type Param = Point;
    type Gradient = Gradient;

    fn gradient(&self, u: &Self::Param) -> Result<Self::Gradient, Error> {
        let h = self.constraint.value(u)?;
        let grad_h = self.constraint.gradient(u)?;
        Ok(u + &(grad_h * (self.multiplier + self.penalty * h)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reliability::event::ComparisonOperator;
    use crate::transform::traits::StandardNormalTransform;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Sign conventions of the standardized limit state for both operator
    //   families.
    // - Agreement between analytic chain-rule gradients and the FD
    //   fallback.
    // - Trace recording and counter behavior.
    // - The augmented merit value and gradient.
    //
    // They intentionally DO NOT cover:
    // - Full searches (see the solver and integration tests).
    // -------------------------------------------------------------------------

    /// `g(x) = x₀ + 2x₁` with an analytic gradient.
    struct LinearG;

    impl PerformanceFunction for LinearG {
        fn value(&self, x: &Point) -> SearchResult<f64> {
            Ok(x[0] + 2.0 * x[1])
        }

        fn check(&self, _x: &Point) -> SearchResult<()> {
            Ok(())
        }

        fn gradient(&self, _x: &Point) -> SearchResult<Gradient> {
            Ok(array![1.0, 2.0])
        }
    }

    /// Same function without an analytic gradient, to exercise the FD path.
    struct LinearGNoGrad;

    impl PerformanceFunction for LinearGNoGrad {
        fn value(&self, x: &Point) -> SearchResult<f64> {
            Ok(x[0] + 2.0 * x[1])
        }

        fn check(&self, _x: &Point) -> SearchResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `h < 0` denotes the failure interior for both a `<` and
    // a `>` event over the same function.
    //
    // Given
    // -----
    // - `g(x) = x₀ + 2x₁`, threshold 1, identity transform, and the point
    //   (0, 0) where g = 0.
    //
    // Expect
    // ------
    // - For `g < 1` the origin is failing: h(0) < 0.
    // - For `g > 1` the origin is safe: h(0) > 0.
    fn sign_convention_makes_failure_negative() {
        // Arrange
        let g = LinearG;
        let transform = StandardNormalTransform::new(2);
        let less = Event::new(&g, ComparisonOperator::LessThan, 1.0).unwrap();
        let greater = Event::new(&g, ComparisonOperator::GreaterThan, 1.0).unwrap();
        let origin = array![0.0, 0.0];

        // Act
        let h_less = StandardConstraint::new(&less, &transform).value(&origin).unwrap();
        let h_greater = StandardConstraint::new(&greater, &transform).value(&origin).unwrap();

        // Assert
        assert!(h_less < 0.0, "g(0) = 0 < 1 is failing, expected h < 0, got {h_less}");
        assert!(h_greater > 0.0, "g(0) = 0 is safe for g > 1, expected h > 0, got {h_greater}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that the finite-difference gradient fallback agrees with the
    // analytic chain-rule gradient.
    //
    // Given
    // -----
    // - The same linear event built over a function with and without an
    //   analytic gradient.
    //
    // Expect
    // ------
    // - Both gradients equal (1, 2) up to FD tolerance (sign +1 for `<`).
    fn fd_gradient_matches_analytic() {
        // Arrange
        let g = LinearG;
        let g_fd = LinearGNoGrad;
        let transform = StandardNormalTransform::new(2);
        let event = Event::new(&g, ComparisonOperator::LessThan, 1.0).unwrap();
        let event_fd = Event::new(&g_fd, ComparisonOperator::LessThan, 1.0).unwrap();
        let u = array![0.3, -0.2];

        // Act
        let analytic = StandardConstraint::new(&event, &transform).gradient(&u).unwrap();
        let numeric = StandardConstraint::new(&event_fd, &transform).gradient(&u).unwrap();

        // Assert
        for i in 0..2 {
            assert!(
                (analytic[i] - numeric[i]).abs() < 1e-5,
                "Gradient mismatch at {i}: {} vs {}",
                analytic[i],
                numeric[i]
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that every value evaluation is recorded in the trace and that
    // take_trace drains it.
    //
    // Given
    // -----
    // - Three value evaluations and one analytic gradient evaluation.
    //
    // Expect
    // ------
    // - evaluations() == 3 before take_trace; the returned trace holds the
    //   three samples and one gradient count; the counter resets to 0.
    fn trace_records_and_drains() {
        // Arrange
        let g = LinearG;
        let transform = StandardNormalTransform::new(2);
        let event = Event::new(&g, ComparisonOperator::LessThan, 1.0).unwrap();
        let constraint = StandardConstraint::new(&event, &transform);

        // Act
        for i in 0..3 {
            constraint.value(&array![i as f64, 0.0]).unwrap();
        }
        constraint.gradient(&array![0.0, 0.0]).unwrap();
        let trace = constraint.take_trace();

        // Assert
        assert_eq!(trace.evaluations(), 3);
        assert_eq!(trace.gradient_evaluations(), 1);
        assert_eq!(constraint.evaluations(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the augmented merit value and gradient against hand-computed
    // numbers.
    //
    // Given
    // -----
    // - The linear `<` event at u = (1, 0), where h = 1 + 0 − 1 = 0, with
    //   λ = 0.5 and μ = 2.
    //
    // Expect
    // ------
    // - cost = ½·1 + 0.5·0 + 1·0 = 0.5.
    // - gradient = u + (λ + μh)·∇h = (1, 0) + 0.5·(1, 2) = (1.5, 1.0).
    fn augmented_problem_matches_hand_computation() {
        // Arrange
        let g = LinearG;
        let transform = StandardNormalTransform::new(2);
        let event = Event::new(&g, ComparisonOperator::LessThan, 1.0).unwrap();
        let constraint = StandardConstraint::new(&event, &transform);
        let problem = AugmentedProblem { constraint: &constraint, multiplier: 0.5, penalty: 2.0 };
        let u = array![1.0, 0.0];

        // Act
        let cost = problem.cost(&u).unwrap();
        let gradient = ArgminGradient::gradient(&problem, &u).unwrap();

        // Assert
        assert!((cost - 0.5).abs() < 1e-12, "Got cost {cost}");
        assert!((gradient[0] - 1.5).abs() < 1e-12);
        assert!((gradient[1] - 1.0).abs() < 1e-12);
    }
}
