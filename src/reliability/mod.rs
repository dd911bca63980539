//! reliability — events, design points, and the FORM/SORM engine layer.
//!
//! Purpose
//! -------
//! Hold the domain vocabulary of a reliability analysis (failure events,
//! design points, evaluation traces) and the read-only engines that turn a
//! converged design point into probability estimates: FORM, SORM curvature
//! corrections, and closed-form parameter sensitivities.
//!
//! Key behaviors
//! -------------
//! - Define the immutable [`event::Event`] referencing a caller-owned
//!   performance function, with a parseable comparison operator.
//! - Package the search result as an immutable
//!   [`design_point::DesignPoint`] with convergence diagnostics and the
//!   origin-in-failure-domain flag consumed uniformly by every engine.
//! - Compute first-order probabilities and importance factors
//!   ([`form`]), curvature profiles and three second-order corrections
//!   ([`curvature`], [`sorm`]), and envelope-theorem sensitivities
//!   ([`sensitivity`]).
//!
//! Conventions
//! -----------
//! - Engines are pure functions of an already-computed design point; they
//!   share one sign convention through the design point's origin flag and
//!   never re-derive it.
//! - Results carry explicit numerical-validity warnings when a formula had
//!   to clip a degenerate term; fully valid, questionable, and absent
//!   states are always distinguishable.

pub mod curvature;
pub mod design_point;
pub mod errors;
pub mod event;
pub mod form;
pub mod sensitivity;
pub mod sorm;
