//! Constraint variables: linear inequalities over decision variables.

use std::collections::HashSet;
use std::fmt;

use crate::error::{GridSolveError, Result};
use crate::op::ComparisonOp;

/// Tolerance for non-strict comparisons.
///
/// The weighted sum is accumulated in floating point, so `<=` and `>=`
/// absorb rounding error up to this delta. Strict operators compare
/// exactly.
pub const COMPARISON_EPSILON: f64 = 1e-7;

/// A named linear inequality that every feasible assignment must satisfy.
///
/// The left-hand side is `sum(coefficient * value(variable))` over the
/// ordered term list; it is compared against `bound` with the constraint's
/// operator. Constraint variables never tighten decision variable domains;
/// they only accept or reject complete assignments.
///
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct ConstraintVariable {
    name: String,
    terms: Vec<(String, f64)>,
    op: ComparisonOp,
    bound: f64,
}

impl ConstraintVariable {
    /// Creates a constraint variable.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when a decision variable appears
    /// more than once in the term list. Whether each referenced name exists
    /// is checked by [`crate::Problem::new`], which sees the full variable
    /// set.
    pub fn new(
        name: impl Into<String>,
        terms: Vec<(String, f64)>,
        op: ComparisonOp,
        bound: f64,
    ) -> Result<Self> {
        let name = name.into();
        let mut seen: HashSet<&str> = HashSet::with_capacity(terms.len());
        for (variable, _) in &terms {
            if !seen.insert(variable.as_str()) {
                return Err(GridSolveError::Config(format!(
                    "constraint variable \"{}\" references decision variable \
                     \"{}\" more than once",
                    name, variable
                )));
            }
        }
        Ok(Self {
            name,
            terms,
            op,
            bound,
        })
    }

    /// Constraint name (unique within a problem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered `(variable, coefficient)` term list.
    pub fn terms(&self) -> &[(String, f64)] {
        &self.terms
    }

    /// The relational operator.
    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    /// The right-hand-side bound.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Computes the left-hand-side weighted sum from a value lookup.
    pub fn lhs<F>(&self, value_of: F) -> f64
    where
        F: Fn(&str) -> f64,
    {
        self.terms
            .iter()
            .map(|(variable, coefficient)| coefficient * value_of(variable))
            .sum()
    }

    /// Whether a left-hand-side sum satisfies this constraint.
    ///
    /// Non-strict operators tolerate [`COMPARISON_EPSILON`]; strict
    /// operators are exact.
    #[inline]
    pub fn accepts(&self, lhs: f64) -> bool {
        match self.op {
            ComparisonOp::Le => lhs <= self.bound + COMPARISON_EPSILON,
            ComparisonOp::Lt => lhs < self.bound,
            ComparisonOp::Ge => lhs >= self.bound - COMPARISON_EPSILON,
            ComparisonOp::Gt => lhs > self.bound,
        }
    }

    /// Computes the weighted sum and checks it in one step.
    pub fn is_satisfied<F>(&self, value_of: F) -> bool
    where
        F: Fn(&str) -> f64,
    {
        self.accepts(self.lhs(value_of))
    }
}

impl fmt::Display for ConstraintVariable {
    /// Renders as `name: c1*v1 + c2*v2 <= bound`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (index, (variable, coefficient)) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*{}", coefficient, variable)?;
        }
        if self.terms.is_empty() {
            write!(f, "0")?;
        }
        write!(f, " {} {}", self.op, self.bound)
    }
}
