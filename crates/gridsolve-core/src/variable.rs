//! Decision variables with bounded integer domains.

use crate::error::{GridSolveError, Result};
use crate::op::ComparisonOp;

/// A named bounded integer decision variable.
///
/// Each variable contributes `unit_profit * value` to the objective. Its
/// feasible domain `[lower_bound, upper_bound]` starts unset and is
/// tightened by applying relational constraints; both bounds must be set
/// before a solve can begin, since enumeration over an unbounded domain
/// would not terminate.
///
/// The `value` field is the current trial assignment. During a solve it is
/// mutated in place by the search engine (the engine holds the problem
/// exclusively, so no other reader can observe intermediate values) and is
/// finally pinned to the optimal assignment when one exists.
///
/// # Examples
///
/// ```
/// use gridsolve_core::{ComparisonOp, DecisionVariable};
///
/// let mut table = DecisionVariable::new("table", 30.0);
/// table.apply_constraint(ComparisonOp::Ge, 0).unwrap();
/// table.apply_constraint(ComparisonOp::Lt, 9).unwrap();
/// assert_eq!(table.bounds().unwrap(), (0, 8));
/// ```
#[derive(Debug, Clone)]
pub struct DecisionVariable {
    name: String,
    unit_profit: f64,
    lower_bound: Option<i64>,
    upper_bound: Option<i64>,
    /// Current trial value, owned by the search engine during a solve.
    pub value: i64,
}

impl DecisionVariable {
    /// Creates an unbounded variable with the given per-unit objective
    /// contribution.
    pub fn new(name: impl Into<String>, unit_profit: f64) -> Self {
        Self {
            name: name.into(),
            unit_profit,
            lower_bound: None,
            upper_bound: None,
            value: 0,
        }
    }

    /// Variable name (unique within a problem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-unit contribution to the objective.
    pub fn unit_profit(&self) -> f64 {
        self.unit_profit
    }

    /// Current lower bound, if one has been applied.
    pub fn lower_bound(&self) -> Option<i64> {
        self.lower_bound
    }

    /// Current upper bound, if one has been applied.
    pub fn upper_bound(&self) -> Option<i64> {
        self.upper_bound
    }

    /// Tightens the domain with a relational constraint.
    ///
    /// Each application keeps the tightest bound seen so far: an upper-bound
    /// operator only ever lowers `upper_bound`, a lower-bound operator only
    /// ever raises `lower_bound`. Strict operators on an integer domain are
    /// folded into inclusive bounds (`< v` becomes `<= v - 1`, `> v`
    /// becomes `>= v + 1`).
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when the tightened domain becomes
    /// empty (`lower_bound > upper_bound`).
    pub fn apply_constraint(&mut self, op: ComparisonOp, bound: i64) -> Result<()> {
        match op {
            ComparisonOp::Le => self.tighten_upper(bound),
            ComparisonOp::Lt => self.tighten_upper(bound - 1),
            ComparisonOp::Ge => self.tighten_lower(bound),
            ComparisonOp::Gt => self.tighten_lower(bound + 1),
        }

        if let (Some(lower), Some(upper)) = (self.lower_bound, self.upper_bound) {
            if lower > upper {
                return Err(GridSolveError::Config(format!(
                    "the constraints on decision variable \"{}\" leave an empty \
                     domain [{}, {}]; the lower bound has to remain less than or \
                     equal to the upper bound",
                    self.name, lower, upper
                )));
            }
        }
        Ok(())
    }

    fn tighten_upper(&mut self, candidate: i64) {
        if self.upper_bound.map_or(true, |current| candidate < current) {
            self.upper_bound = Some(candidate);
        }
    }

    fn tighten_lower(&mut self, candidate: i64) {
        if self.lower_bound.map_or(true, |current| candidate > current) {
            self.lower_bound = Some(candidate);
        }
    }

    /// Returns the inclusive domain `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error naming this variable when either
    /// bound is still unset.
    pub fn bounds(&self) -> Result<(i64, i64)> {
        match (self.lower_bound, self.upper_bound) {
            (Some(lower), Some(upper)) => Ok((lower, upper)),
            (None, _) => Err(GridSolveError::Config(format!(
                "decision variable \"{}\" requires a lower bound constraint",
                self.name
            ))),
            (_, None) => Err(GridSolveError::Config(format!(
                "decision variable \"{}\" requires an upper bound constraint",
                self.name
            ))),
        }
    }

    /// Number of integer points in the domain, once both bounds are set.
    pub fn domain_size(&self) -> Option<u64> {
        match (self.lower_bound, self.upper_bound) {
            (Some(lower), Some(upper)) if lower <= upper => {
                Some((upper - lower) as u64 + 1)
            }
            _ => None,
        }
    }

    /// Objective contribution of the current trial value.
    #[inline]
    pub fn profit(&self) -> f64 {
        self.unit_profit * self.value as f64
    }
}
