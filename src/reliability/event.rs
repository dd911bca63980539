//! Failure events over a caller-owned performance function.
//!
//! An event is the triple (performance function, comparison operator,
//! threshold): failure occurs when `g(X) op t`. Events are immutable once
//! constructed and are borrowed, never copied, by the search components.
use crate::optimization::nearest_point::traits::PerformanceFunction;
use crate::reliability::errors::{ReliabilityError, ReliabilityResult};
use std::str::FromStr;

/// Comparison operator defining the failure region of an event.
///
/// Parsing:
/// This enum implements `FromStr` and accepts the symbols `"<"`, `"<="`,
/// `">"`, `">="` as well as case-insensitive names (`"LessThan"`,
/// `"LessOrEqual"`, `"GreaterThan"`, `"GreaterOrEqual"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl ComparisonOperator {
    /// Sign `s` of the standardized limit state `h(u) = s·(g − t)`, chosen
    /// so that `h < 0` denotes the interior of the failure domain for every
    /// operator.
    pub fn sign(&self) -> f64 {
        match self {
            ComparisonOperator::LessThan | ComparisonOperator::LessOrEqual => 1.0,
            ComparisonOperator::GreaterThan | ComparisonOperator::GreaterOrEqual => -1.0,
        }
    }

    /// Whether the comparison excludes the boundary itself.
    ///
    /// The probability formulas are identical for strict and non-strict
    /// operators (the boundary has zero probability mass under a continuous
    /// model); the distinction only matters for pointwise membership tests.
    pub fn is_strict(&self) -> bool {
        matches!(self, ComparisonOperator::LessThan | ComparisonOperator::GreaterThan)
    }

    /// Pointwise membership test `value op threshold`.
    pub fn compare(&self, value: f64, threshold: f64) -> bool {
        match self {
            ComparisonOperator::LessThan => value < threshold,
            ComparisonOperator::LessOrEqual => value <= threshold,
            ComparisonOperator::GreaterThan => value > threshold,
            ComparisonOperator::GreaterOrEqual => value >= threshold,
        }
    }
}

impl FromStr for ComparisonOperator {
    type Err = ReliabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "<" | "lessthan" => Ok(ComparisonOperator::LessThan),
            "<=" | "lessorequal" => Ok(ComparisonOperator::LessOrEqual),
            ">" | "greaterthan" => Ok(ComparisonOperator::GreaterThan),
            ">=" | "greaterorequal" => Ok(ComparisonOperator::GreaterOrEqual),
            _ => Err(ReliabilityError::InvalidOperator { name: s.to_string() }),
        }
    }
}

/// Failure event `g(X) op t` over a borrowed performance function.
///
/// The event does not own the function; it holds a shared reference for
/// the lifetime of the analysis, so the same function instance can back
/// several events with different operators or thresholds.
#[derive(Debug)]
pub struct Event<'a, F: PerformanceFunction> {
    function: &'a F,
    operator: ComparisonOperator,
    threshold: f64,
}

impl<'a, F: PerformanceFunction> Event<'a, F> {
    /// Build an event from a function reference, operator, and threshold.
    ///
    /// # Errors
    /// Returns [`ReliabilityError::InvalidThreshold`] when the threshold is
    /// NaN or infinite.
    pub fn new(
        function: &'a F, operator: ComparisonOperator, threshold: f64,
    ) -> ReliabilityResult<Self> {
        if !threshold.is_finite() {
            return Err(ReliabilityError::InvalidThreshold { value: threshold });
        }
        Ok(Self { function, operator, threshold })
    }

    /// The borrowed performance function.
    pub fn function(&self) -> &'a F {
        self.function
    }

    /// The comparison operator.
    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    /// The scalar threshold `t`.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether a raw performance value realizes the event.
    pub fn is_failure(&self, value: f64) -> bool {
        self.operator.compare(value, self.threshold)
    }
}
