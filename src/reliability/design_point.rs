//! Design points and evaluation traces.
//!
//! A [`DesignPoint`] is the immutable product of one design-point search:
//! the nearest failure-boundary point in both coordinate systems, the
//! Hasofer–Lind index, the origin-side flag that fixes the sign convention
//! of every downstream probability formula, and the convergence
//! diagnostics of the solver run that produced it. The accompanying
//! [`EvaluationTrace`] is the explicit, returned record of every
//! constraint evaluation performed during the search — the search mutates
//! no hidden state on the function object.
use crate::optimization::nearest_point::types::Point;
use crate::reliability::errors::{ReliabilityError, ReliabilityResult};
use argmin_math::ArgminL2Norm;

/// Below this norm a design point is treated as coincident with the
/// origin: the direction `α = u*/β` and the importance factors are
/// undefined there.
pub const DEGENERATE_BETA: f64 = 1e-8;

/// Convergence diagnostics of the solver run that produced a design point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceDiagnostics {
    /// Number of (outer) solver iterations.
    pub iterations: usize,
    /// Final `|h(u*)|`.
    pub constraint_residual: f64,
    /// Final KKT alignment residual.
    pub gradient_residual: f64,
}

/// One recorded constraint evaluation: the standard-space point and the
/// limit-state value there.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSample {
    pub point: Point,
    pub residual: f64,
}

/// Ordered record of the constraint evaluations performed by one search.
///
/// Returned alongside the [`DesignPoint`] so the search stays referentially
/// transparent: callers that want evaluation counts or iteration histories
/// read them here instead of interrogating the performance function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationTrace {
    samples: Vec<TraceSample>,
    gradient_evaluations: u64,
}

impl EvaluationTrace {
    /// Assemble a trace from recorded samples and a gradient counter.
    pub fn new(samples: Vec<TraceSample>, gradient_evaluations: u64) -> Self {
        Self { samples, gradient_evaluations }
    }

    /// Number of constraint-value evaluations.
    pub fn evaluations(&self) -> u64 {
        self.samples.len() as u64
    }

    /// Number of constraint-gradient evaluations (analytic or one per
    /// finite-difference sweep entry).
    pub fn gradient_evaluations(&self) -> u64 {
        self.gradient_evaluations
    }

    /// The recorded samples, in evaluation order.
    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }
}

/// The converged design point of one reliability analysis.
///
/// Fields are public read-only data; the validating constructor is the only
/// way to build one, and nothing in the crate mutates a design point after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignPoint {
    /// Standard-space coordinates `u*`.
    pub standard: Point,
    /// Physical-space coordinates `x* = T⁻¹(u*)`.
    pub physical: Point,
    /// Hasofer–Lind reliability index `β = ‖u*‖`.
    pub beta: f64,
    /// Whether the standard-space origin itself realizes the event. Flips
    /// the sign convention of every probability formula downstream.
    pub origin_in_failure_domain: bool,
    /// Solver diagnostics for the run that produced this point.
    pub diagnostics: ConvergenceDiagnostics,
}

impl DesignPoint {
    /// Build a validated design point.
    ///
    /// Performs:
    /// - dimension agreement check between the two coordinate vectors,
    /// - finiteness check on every coordinate,
    /// - computation of `β` as the Euclidean norm of `standard`.
    ///
    /// # Errors
    /// - [`ReliabilityError::PointDimMismatch`] on a length disagreement.
    /// - [`ReliabilityError::NonFiniteCoordinate`] with the first offending
    ///   entry.
    pub fn new(
        standard: Point, physical: Point, origin_in_failure_domain: bool,
        diagnostics: ConvergenceDiagnostics,
    ) -> ReliabilityResult<Self> {
        if standard.len() != physical.len() {
            return Err(ReliabilityError::PointDimMismatch {
                standard: standard.len(),
                physical: physical.len(),
            });
        }
        for (index, &value) in standard.iter().chain(physical.iter()).enumerate() {
            if !value.is_finite() {
                return Err(ReliabilityError::NonFiniteCoordinate {
                    index: index % standard.len(),
                    value,
                });
            }
        }
        let beta = standard.l2_norm();
        Ok(Self { standard, physical, beta, origin_in_failure_domain, diagnostics })
    }

    /// Standard-space dimension `n`.
    pub fn dim(&self) -> usize {
        self.standard.len()
    }

    /// Unit direction `α = u*/β` toward the design point, or `None` when
    /// the point is degenerate (`β` numerically zero).
    pub fn direction(&self) -> Option<Point> {
        if self.beta <= DEGENERATE_BETA {
            return None;
        }
        Some(&self.standard / self.beta)
    }
}
