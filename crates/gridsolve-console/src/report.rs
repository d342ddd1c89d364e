//! Solution report and CSV export.
//!
//! The solver only exposes read access to its final state; everything a
//! human (or a results table) sees is recomputed here on demand.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use gridsolve_core::COMPARISON_EPSILON;
use gridsolve_solver::Solver;

/// Renders an objective value, collapsing near-integral floats.
///
/// The objective is accumulated in floating point even when every term is
/// integral, so values within epsilon of an integer are printed without a
/// fractional part.
fn format_objective(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() <= COMPARISON_EPSILON {
        format!("{}", rounded as i64)
    } else {
        format!("{}", value)
    }
}

/// Prints the solved state to standard output.
///
/// Shows the objective value, every constraint variable with its recomputed
/// left-hand-side sum, and every decision variable's pinned value. A solve
/// that found no feasible assignment prints an explicit notice instead.
pub fn print_solution(solver: &Solver) {
    let Some(optimum) = solver.optimum() else {
        println!(
            "{}",
            "No feasible solution: the objective could not be solved."
                .bright_red()
                .bold()
        );
        return;
    };

    let problem = solver.problem();

    println!(
        "Objective ({}): {}",
        solver.criterion(),
        format_objective(optimum).bright_green().bold()
    );
    for (position, constraint) in problem.constraints().iter().enumerate() {
        println!(
            "  {} │ left sum {}",
            constraint,
            format_objective(problem.constraint_lhs(position)).bright_yellow()
        );
    }
    for variable in problem.variables() {
        println!(
            "  {} = {} (unit profit {})",
            variable.name().white().bold(),
            variable.value.bright_cyan(),
            variable.unit_profit()
        );
    }
    println!();
}

/// CSV exporter for solve results.
///
/// Produces one header row and one data row per solve: the scenario label,
/// each decision variable's optimal count, and the total objective value.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gridsolve_core::{ComparisonOp, Criterion, DecisionVariable, Problem};
/// use gridsolve_solver::Solver;
/// use gridsolve_console::CsvExporter;
///
/// let mut x = DecisionVariable::new("table", 3.0);
/// x.apply_constraint(ComparisonOp::Ge, 0).unwrap();
/// x.apply_constraint(ComparisonOp::Le, 5).unwrap();
/// let problem = Problem::new(vec![x], vec![]).unwrap();
///
/// let mut solver = Solver::new(Criterion::Max, Duration::from_secs(10), problem).unwrap();
/// solver.solve().unwrap();
///
/// let csv = CsvExporter::to_string("scenario1", &solver).unwrap();
/// assert!(csv.contains("scenario,table_count,total_profit"));
/// assert!(csv.contains("scenario1,5,15"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Exports the solved state to a CSV string.
    ///
    /// Returns `None` when the solve found no feasible assignment; there is
    /// no row to write in that case.
    pub fn to_string(label: &str, solver: &Solver) -> Option<String> {
        let optimum = solver.optimum()?;
        let problem = solver.problem();

        let mut output = String::new();

        write!(output, "scenario").unwrap();
        for variable in problem.variables() {
            write!(output, ",{}_count", variable.name()).unwrap();
        }
        writeln!(output, ",total_profit").unwrap();

        write!(output, "{}", label).unwrap();
        for variable in problem.variables() {
            write!(output, ",{}", variable.value).unwrap();
        }
        writeln!(output, ",{}", format_objective(optimum)).unwrap();

        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use gridsolve_core::{ComparisonOp, Criterion, DecisionVariable, Problem};

    fn bounded(name: &str, unit_profit: f64, lower: i64, upper: i64) -> DecisionVariable {
        let mut variable = DecisionVariable::new(name, unit_profit);
        variable.apply_constraint(ComparisonOp::Ge, lower).unwrap();
        variable.apply_constraint(ComparisonOp::Le, upper).unwrap();
        variable
    }

    fn solved(variables: Vec<DecisionVariable>) -> Solver {
        let problem = Problem::new(variables, vec![]).unwrap();
        let mut solver = Solver::new(Criterion::Max, Duration::from_secs(10), problem).unwrap();
        solver.solve().unwrap();
        solver
    }

    #[test]
    fn test_format_objective_collapses_near_integers() {
        assert_eq!(format_objective(15.0), "15");
        assert_eq!(format_objective(15.000000004), "15");
        assert_eq!(format_objective(-3.0), "-3");
        assert_eq!(format_objective(2.5), "2.5");
    }

    #[test]
    fn test_csv_row() {
        let solver = solved(vec![bounded("table", 3.0, 0, 5), bounded("chair", 1.0, 0, 2)]);
        let csv = CsvExporter::to_string("scenario2", &solver).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("scenario,table_count,chair_count,total_profit"));
        assert_eq!(lines.next(), Some("scenario2,5,2,17"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_skipped_without_solution() {
        let problem = Problem::new(vec![], vec![]).unwrap();
        let mut solver = Solver::new(Criterion::Max, Duration::from_secs(10), problem).unwrap();
        solver.solve().unwrap();

        assert!(CsvExporter::to_string("empty", &solver).is_none());
    }
}
