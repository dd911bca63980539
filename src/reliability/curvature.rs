//! reliability::curvature — principal curvatures of the limit-state
//! surface.
//!
//! Purpose
//! -------
//! Extract the `n − 1` signed principal curvatures of the standardized
//! failure boundary at the design point. The Hessian of `h` (exact if the
//! caller supplies one, else finite-differenced from the constraint
//! gradient) is projected onto the tangent space orthogonal to the design
//! direction and normalized by the implicit-surface denominator; its
//! eigenvalues, computed with `nalgebra`'s symmetric eigendecomposition,
//! are the curvatures consumed by every SORM correction.
//!
//! Key behaviors
//! -------------
//! - Build an orthonormal tangent basis by Gram–Schmidt against the design
//!   direction, dropping the coordinate axis most aligned with it.
//! - Normalize by `−∇h(u*)·α` — the implicit-function denominator, equal
//!   to `‖∇h‖` at an exact design point — with a guarded fallback to
//!   `‖∇h‖` when the optimality alignment has degraded, so arbitrarily
//!   small `β` never produces a division blow-up.
//! - Sign convention: positive curvature bends the boundary away from the
//!   origin (convex failure domain), which shrinks the second-order
//!   probability relative to FORM.
//!
//! Invariants & assumptions
//! ------------------------
//! - The profile length is always `n − 1`; a one-dimensional problem has
//!   an empty profile.
//! - Curvatures are sorted descending; ties keep the eigendecomposition
//!   order.
use crate::optimization::nearest_point::{
    finite_diff::constraint_hessian,
    traits::EqualityConstraint,
    types::{Hessian, Point},
};
use crate::reliability::{
    design_point::{DesignPoint, DEGENERATE_BETA},
    errors::{ReliabilityError, ReliabilityResult},
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Ordered principal curvatures `κ_1 ≥ … ≥ κ_{n−1}` of the failure
/// boundary at a design point.
///
/// A derived quantity: recomputed whenever the SORM engine runs, never
/// persisted independently of the design point that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvatureProfile {
    kappas: Array1<f64>,
}

impl CurvatureProfile {
    /// Compute the curvature profile at a design point.
    ///
    /// # Parameters
    /// - `constraint`: the standardized limit state; its gradient (and,
    ///   when no exact Hessian is given, a finite-difference Hessian of
    ///   that gradient) is evaluated at `u*`.
    /// - `design_point`: the converged design point.
    /// - `exact_hessian`: optional caller-supplied Hessian of `h` at `u*`
    ///   in standard space, used verbatim when present.
    ///
    /// # Errors
    /// - [`ReliabilityError::ZeroGradient`] when `‖∇h(u*)‖` is numerically
    ///   zero — the tangent space is undefined.
    /// - [`ReliabilityError::HessianDimMismatch`] when the supplied
    ///   Hessian has the wrong shape.
    /// - Propagates constraint evaluation failures as
    ///   [`ReliabilityError::Search`].
    pub fn at_design_point(
        constraint: &dyn EqualityConstraint, design_point: &DesignPoint,
        exact_hessian: Option<&Hessian>,
    ) -> ReliabilityResult<Self> {
        let dim = design_point.dim();
        if dim < 2 {
            return Ok(Self { kappas: Array1::zeros(0) });
        }

        let gradient = constraint.gradient(&design_point.standard)?;
        let grad_norm = gradient.dot(&gradient).sqrt();
        if grad_norm <= DEGENERATE_BETA {
            return Err(ReliabilityError::ZeroGradient { norm: grad_norm });
        }

        let hessian_owned;
        let hessian = match exact_hessian {
            Some(h) => {
                if h.nrows() != dim || h.ncols() != dim {
                    return Err(ReliabilityError::HessianDimMismatch {
                        expected: dim,
                        found: (h.nrows(), h.ncols()),
                    });
                }
                h
            }
            None => {
                hessian_owned = constraint_hessian(constraint, &design_point.standard)?;
                &hessian_owned
            }
        };

        // Design direction, falling back to the inward boundary normal for
        // a design point sitting numerically on the origin.
        let alpha = match design_point.direction() {
            Some(alpha) => alpha,
            None => gradient.mapv(|g| -g / grad_norm),
        };

        // Implicit-surface denominator; at an exact design point the
        // gradient is antiparallel to alpha and this equals ‖∇h‖.
        let mut denominator = -gradient.dot(&alpha);
        if denominator.abs() <= DEGENERATE_BETA * grad_norm.max(1.0) {
            denominator = grad_norm;
        }

        let basis = tangent_basis(&alpha);
        let projected = project_hessian(hessian, &basis, denominator);
        let kappas = symmetric_eigenvalues(&projected);
        Ok(Self { kappas })
    }

    /// The ordered curvatures, largest first.
    pub fn kappas(&self) -> &Array1<f64> {
        &self.kappas
    }

    /// Profile length, always `n − 1`.
    pub fn len(&self) -> usize {
        self.kappas.len()
    }

    /// True for one-dimensional problems, whose profile is empty.
    pub fn is_empty(&self) -> bool {
        self.kappas.is_empty()
    }
}

// ---- Helper methods ----

/// Orthonormal basis of the tangent space orthogonal to `alpha`.
///
/// Gram–Schmidt over the coordinate axes, skipping the axis most aligned
/// with `alpha` so the remaining candidates stay independent. Returns an
/// `n × (n−1)` matrix whose columns are the basis vectors.
fn tangent_basis(alpha: &Point) -> Array2<f64> {
    let dim = alpha.len();
    let skip = alpha
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut basis = Array2::zeros((dim, dim - 1));
    let mut filled = 0usize;
    for axis in 0..dim {
        if axis == skip {
            continue;
        }
        let mut candidate = Array1::zeros(dim);
        candidate[axis] = 1.0;

        // Orthogonalize against alpha and the accepted columns.
        let along = candidate.dot(alpha);
        candidate = &candidate - &(alpha * along);
        for prior in 0..filled {
            let column = basis.column(prior).to_owned();
            let along = candidate.dot(&column);
            candidate = &candidate - &(&column * along);
        }

        let norm = candidate.dot(&candidate).sqrt();
        candidate /= norm;
        basis.column_mut(filled).assign(&candidate);
        filled += 1;
    }
    basis
}

/// Projected, normalized curvature matrix `−(Bᵀ H B)/(∇h·α)` expressed
/// with the sign folded into `denominator = −∇h·α`.
fn project_hessian(hessian: &Hessian, basis: &Array2<f64>, denominator: f64) -> Array2<f64> {
    let reduced = basis.t().dot(hessian).dot(basis);
    reduced.mapv(|value| value / denominator)
}

/// Eigenvalues of a symmetric matrix, sorted descending, via `nalgebra`.
fn symmetric_eigenvalues(matrix: &Array2<f64>) -> Array1<f64> {
    let n = matrix.nrows();
    if n == 0 {
        return Array1::zeros(0);
    }
    let mut dense = DMatrix::<f64>::zeros(n, n);
    for j in 0..n {
        for i in 0..n {
            dense[(i, j)] = matrix[[i, j]];
        }
    }
    let eigen = dense.symmetric_eigen();
    let mut values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    values.sort_by(|a, b| b.total_cmp(a));
    Array1::from(values)
}
