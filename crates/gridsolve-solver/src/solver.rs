//! Exhaustive enumeration solver.

use std::time::Duration;

use gridsolve_core::{Criterion, GridSolveError, Problem, Result};

use crate::deadline::Deadline;

/// How many leaf evaluations pass between wall-clock checks.
///
/// Checking every leaf would put an `Instant::now()` call in the innermost
/// loop; at this cadence the overhead is unmeasurable while a timeout is
/// still detected within a fraction of a millisecond of real work.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Solves a problem by enumerating every integer assignment.
///
/// The engine iterates the Cartesian product of all decision variable
/// domains in declaration order, one variable per recursion level, mutating
/// each variable's trial value in place (no partial-assignment copies). At
/// every complete assignment it checks the constraint variables and, when
/// feasible, compares the objective against the incumbent under the
/// configured criterion. Ties keep the first-found assignment, so results
/// are deterministic.
///
/// A single [`Solver::solve`] call either completes the enumeration
/// (optimum known, or provably no feasible assignment) or aborts with a
/// timeout. On timeout the incumbent is discarded; a timed-out solve never
/// yields a partial result.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gridsolve_core::{ComparisonOp, Criterion, DecisionVariable, Problem};
/// use gridsolve_solver::Solver;
///
/// let mut x = DecisionVariable::new("x", 3.0);
/// x.apply_constraint(ComparisonOp::Ge, 0).unwrap();
/// x.apply_constraint(ComparisonOp::Le, 5).unwrap();
/// let problem = Problem::new(vec![x], vec![]).unwrap();
///
/// let mut solver = Solver::new(Criterion::Max, Duration::from_secs(10), problem).unwrap();
/// solver.solve().unwrap();
/// assert_eq!(solver.optimum(), Some(15.0));
/// assert_eq!(solver.problem().variable("x").unwrap().value, 5);
/// ```
#[derive(Debug)]
pub struct Solver {
    criterion: Criterion,
    time_limit: Duration,
    problem: Problem,
    optimum: Option<f64>,
    best_values: Vec<i64>,
    leaves_visited: u64,
}

impl Solver {
    /// Creates a solver for a validated problem.
    ///
    /// Re-validates the enumeration preconditions defensively: every
    /// decision variable must carry both bounds, and the time limit must be
    /// positive.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error identifying the first unbounded
    /// variable, or rejecting a zero time limit.
    pub fn new(criterion: Criterion, time_limit: Duration, problem: Problem) -> Result<Self> {
        if time_limit.is_zero() {
            return Err(GridSolveError::Config(
                "the timeout must be a positive number of seconds to ensure \
                 the solve terminates"
                    .to_string(),
            ));
        }
        for variable in problem.variables() {
            variable.bounds()?;
        }
        Ok(Self {
            criterion,
            time_limit,
            problem,
            optimum: None,
            best_values: Vec::new(),
            leaves_visited: 0,
        })
    }

    /// Runs the full enumeration.
    ///
    /// Returns `Ok` both when an optimum was found and when the search
    /// space holds no feasible assignment ([`Solver::optimum`] stays
    /// `None` in the latter case — a normal outcome, not an error).
    ///
    /// # Errors
    ///
    /// [`GridSolveError::Timeout`] when the wall-clock limit elapses before
    /// the enumeration completes. The incumbent found so far is discarded.
    pub fn solve(&mut self) -> Result<()> {
        self.optimum = None;
        self.best_values.clear();
        self.leaves_visited = 0;

        let bounds: Vec<(i64, i64)> = self
            .problem
            .variables()
            .iter()
            .map(|variable| variable.bounds())
            .collect::<Result<_>>()?;

        let search_space = self.problem.search_space().unwrap_or(0);
        tracing::info!(
            event = "solve_start",
            variable_count = self.problem.variable_count() as u64,
            constraint_count = self.problem.constraint_count() as u64,
            search_space = u64::try_from(search_space).unwrap_or(u64::MAX),
            time_limit_secs = self.time_limit.as_secs(),
        );

        let deadline = Deadline::start(self.time_limit);

        // Nothing to optimize over: terminates with no optimum.
        if !bounds.is_empty() {
            if let Err(error) = self.enumerate(0, &bounds, &deadline) {
                self.optimum = None;
                self.best_values.clear();
                tracing::info!(
                    event = "solve_timeout",
                    leaves = self.leaves_visited,
                    time_limit_secs = self.time_limit.as_secs(),
                );
                return Err(error);
            }
            self.pin_optimal_values();
        }

        let optimum = self
            .optimum
            .map_or_else(|| "none".to_string(), |value| value.to_string());
        tracing::info!(
            event = "solve_end",
            feasible = self.optimum.is_some(),
            optimum = optimum.as_str(),
            leaves = self.leaves_visited,
            duration_ms = deadline.elapsed().as_millis() as u64,
        );
        Ok(())
    }

    /// One recursion level per decision variable, iterating the inclusive
    /// domain of the variable at `level`.
    fn enumerate(
        &mut self,
        level: usize,
        bounds: &[(i64, i64)],
        deadline: &Deadline,
    ) -> Result<()> {
        let (lower, upper) = bounds[level];
        let last_level = level + 1 == bounds.len();
        for value in lower..=upper {
            self.problem.variables_mut()[level].value = value;
            if !last_level {
                self.enumerate(level + 1, bounds, deadline)?;
                continue;
            }

            self.leaves_visited += 1;
            if self.leaves_visited % DEADLINE_CHECK_INTERVAL == 0 && deadline.is_exceeded() {
                return Err(GridSolveError::Timeout(deadline.limit()));
            }

            if !self.problem.is_feasible() {
                continue;
            }
            let objective = self.problem.objective_value();
            let improved = match self.optimum {
                None => true,
                Some(incumbent) => self.criterion.improves(objective, incumbent),
            };
            if improved {
                self.optimum = Some(objective);
                self.best_values.clear();
                self.best_values
                    .extend(self.problem.variables().iter().map(|variable| variable.value));
                tracing::trace!(
                    event = "incumbent",
                    objective,
                    leaves = self.leaves_visited,
                );
            }
        }
        Ok(())
    }

    /// Rewrites every variable's trial value with the optimal assignment.
    ///
    /// Leaves the variables at their last trial values when no feasible
    /// assignment was found.
    fn pin_optimal_values(&mut self) {
        if self.optimum.is_none() {
            return;
        }
        for (variable, &value) in self
            .problem
            .variables_mut()
            .iter_mut()
            .zip(self.best_values.iter())
        {
            variable.value = value;
        }
    }

    /// Best objective value, or `None` when no feasible assignment exists
    /// (or `solve` has not run).
    pub fn optimum(&self) -> Option<f64> {
        self.optimum
    }

    /// The problem, with variable values pinned to the optimal assignment
    /// after a successful solve.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The optimization direction.
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// The configured wall-clock limit.
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Complete assignments evaluated so far; after a completed solve this
    /// equals the product of all domain sizes.
    pub fn leaves_visited(&self) -> u64 {
        self.leaves_visited
    }
}
