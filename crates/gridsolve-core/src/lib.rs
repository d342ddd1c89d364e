//! GridSolve Core - Model types for exact enumeration solving
//!
//! This crate provides the fundamental abstractions for GridSolve:
//! - Decision variables with bounded integer domains
//! - Constraint variables (linear inequalities over decision variables)
//! - The optimization criterion
//! - The validated `Problem` aggregate consumed by the solver

pub mod constraint;
pub mod criterion;
pub mod error;
pub mod op;
pub mod problem;
pub mod variable;

pub use constraint::{ConstraintVariable, COMPARISON_EPSILON};
pub use criterion::Criterion;
pub use error::{GridSolveError, Result};
pub use op::ComparisonOp;
pub use problem::Problem;
pub use variable::DecisionVariable;
