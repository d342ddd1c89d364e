//! The validated problem aggregate consumed by the solver.

use std::collections::HashMap;

use crate::constraint::ConstraintVariable;
use crate::error::{GridSolveError, Result};
use crate::variable::DecisionVariable;

/// A validated optimization problem.
///
/// Holds the decision variables in declaration order (which is also the
/// enumeration order, so results are deterministic) together with the
/// constraint variables. Construction cross-validates the two sets; the
/// boundary that produced the definitions is not trusted to have done so.
///
/// Constraint terms are resolved to variable indices once, up front, so
/// feasibility checks inside the enumeration hot path do not hash variable
/// names.
///
/// # Examples
///
/// ```
/// use gridsolve_core::{ComparisonOp, ConstraintVariable, DecisionVariable, Problem};
///
/// let mut x = DecisionVariable::new("x", 3.0);
/// x.apply_constraint(ComparisonOp::Ge, 0).unwrap();
/// x.apply_constraint(ComparisonOp::Le, 5).unwrap();
///
/// let cap = ConstraintVariable::new("cap", vec![("x".into(), 2.0)], ComparisonOp::Le, 6.0)
///     .unwrap();
///
/// let problem = Problem::new(vec![x], vec![cap]).unwrap();
/// assert_eq!(problem.variable_count(), 1);
/// assert!(problem.is_feasible()); // x starts at 0, 2*0 <= 6
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    variables: Vec<DecisionVariable>,
    index: HashMap<String, usize>,
    constraints: Vec<ConstraintVariable>,
    /// Per-constraint `(variable_index, coefficient)` pairs.
    resolved: Vec<Vec<(usize, f64)>>,
}

impl Problem {
    /// Assembles and validates a problem.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when a decision or constraint
    /// variable name repeats, or when a constraint references an
    /// undeclared decision variable.
    pub fn new(
        variables: Vec<DecisionVariable>,
        constraints: Vec<ConstraintVariable>,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(variables.len());
        for (position, variable) in variables.iter().enumerate() {
            if index.insert(variable.name().to_string(), position).is_some() {
                return Err(GridSolveError::Config(format!(
                    "the name of each decision variable needs to be unique, \
                     but \"{}\" is declared twice",
                    variable.name()
                )));
            }
        }

        let mut constraint_names = HashMap::with_capacity(constraints.len());
        let mut resolved = Vec::with_capacity(constraints.len());
        for (position, constraint) in constraints.iter().enumerate() {
            if constraint_names
                .insert(constraint.name().to_string(), position)
                .is_some()
            {
                return Err(GridSolveError::Config(format!(
                    "the name of each constraint variable needs to be unique, \
                     but \"{}\" is declared twice",
                    constraint.name()
                )));
            }
            let mut terms = Vec::with_capacity(constraint.terms().len());
            for (variable, coefficient) in constraint.terms() {
                let Some(&variable_index) = index.get(variable.as_str()) else {
                    return Err(GridSolveError::Config(format!(
                        "constraint variable \"{}\" depends on \"{}\", which is \
                         not a declared decision variable",
                        constraint.name(),
                        variable
                    )));
                };
                terms.push((variable_index, *coefficient));
            }
            resolved.push(terms);
        }

        Ok(Self {
            variables,
            index,
            constraints,
            resolved,
        })
    }

    /// Decision variables in declaration (= enumeration) order.
    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    /// Mutable access for the search engine, which owns value mutation
    /// exclusively for the duration of a solve.
    pub fn variables_mut(&mut self) -> &mut [DecisionVariable] {
        &mut self.variables
    }

    /// Constraint variables in declaration order.
    pub fn constraints(&self) -> &[ConstraintVariable] {
        &self.constraints
    }

    /// Looks up a decision variable by name.
    pub fn variable(&self, name: &str) -> Option<&DecisionVariable> {
        self.index.get(name).map(|&position| &self.variables[position])
    }

    /// Number of decision variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraint variables.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value of the current trial assignment.
    pub fn objective_value(&self) -> f64 {
        self.variables.iter().map(DecisionVariable::profit).sum()
    }

    /// Recomputes the left-hand-side sum of the constraint at `position`
    /// against the current variable values.
    ///
    /// Used by the search hot path and, after a solve, by reporting.
    #[inline]
    pub fn constraint_lhs(&self, position: usize) -> f64 {
        self.resolved[position]
            .iter()
            .map(|&(variable_index, coefficient)| {
                coefficient * self.variables[variable_index].value as f64
            })
            .sum()
    }

    /// Whether the current trial assignment satisfies every constraint.
    pub fn is_feasible(&self) -> bool {
        self.constraints
            .iter()
            .enumerate()
            .all(|(position, constraint)| constraint.accepts(self.constraint_lhs(position)))
    }

    /// Total number of integer points in the Cartesian product of all
    /// domains, saturating at `u128::MAX`. `None` until every variable has
    /// both bounds.
    pub fn search_space(&self) -> Option<u128> {
        let mut product: u128 = 1;
        for variable in &self.variables {
            let size = variable.domain_size()?;
            product = product.saturating_mul(size as u128);
        }
        Some(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::ComparisonOp;

    fn bounded(name: &str, unit_profit: f64, lower: i64, upper: i64) -> DecisionVariable {
        let mut v = DecisionVariable::new(name, unit_profit);
        v.apply_constraint(ComparisonOp::Ge, lower).unwrap();
        v.apply_constraint(ComparisonOp::Le, upper).unwrap();
        v
    }

    #[test]
    fn test_duplicate_variable_name_rejected() {
        let err = Problem::new(
            vec![bounded("x", 1.0, 0, 1), bounded("x", 2.0, 0, 1)],
            vec![],
        )
        .unwrap_err();
        assert!(err.to_string().contains("unique"), "{}", err);
    }

    #[test]
    fn test_duplicate_constraint_name_rejected() {
        let c1 = ConstraintVariable::new("cap", vec![("x".into(), 1.0)], ComparisonOp::Le, 3.0)
            .unwrap();
        let c2 = ConstraintVariable::new("cap", vec![("x".into(), 2.0)], ComparisonOp::Le, 5.0)
            .unwrap();
        let err = Problem::new(vec![bounded("x", 1.0, 0, 5)], vec![c1, c2]).unwrap_err();
        assert!(err.to_string().contains("\"cap\""), "{}", err);
    }

    #[test]
    fn test_unknown_dependency_rejected() {
        let cv = ConstraintVariable::new("cap", vec![("y".into(), 1.0)], ComparisonOp::Le, 3.0)
            .unwrap();
        let err = Problem::new(vec![bounded("x", 1.0, 0, 5)], vec![cv]).unwrap_err();
        assert!(err.to_string().contains("\"y\""), "{}", err);
        assert!(err.to_string().contains("not a declared"), "{}", err);
    }

    #[test]
    fn test_objective_and_lhs_follow_current_values() {
        let cv = ConstraintVariable::new(
            "wood",
            vec![("table".into(), 4.0), ("chair".into(), 3.0)],
            ComparisonOp::Le,
            40.0,
        )
        .unwrap();
        let mut problem = Problem::new(
            vec![bounded("table", 30.0, 0, 10), bounded("chair", 20.0, 0, 10)],
            vec![cv],
        )
        .unwrap();

        problem.variables_mut()[0].value = 4;
        problem.variables_mut()[1].value = 8;

        assert_eq!(problem.objective_value(), 4.0 * 30.0 + 8.0 * 20.0);
        assert_eq!(problem.constraint_lhs(0), 4.0 * 4.0 + 8.0 * 3.0);
        assert!(problem.is_feasible());

        problem.variables_mut()[1].value = 10;
        assert!(!problem.is_feasible());
    }

    #[test]
    fn test_variable_lookup() {
        let problem = Problem::new(vec![bounded("x", 1.0, 0, 1)], vec![]).unwrap();
        assert!(problem.variable("x").is_some());
        assert!(problem.variable("y").is_none());
    }

    #[test]
    fn test_search_space() {
        let problem = Problem::new(
            vec![bounded("x", 1.0, 0, 4), bounded("y", 1.0, 1, 3)],
            vec![],
        )
        .unwrap();
        assert_eq!(problem.search_space(), Some(15));

        let unbounded = Problem::new(vec![DecisionVariable::new("x", 1.0)], vec![]).unwrap();
        assert_eq!(unbounded.search_space(), None);
    }
}
