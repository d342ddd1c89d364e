//! GridSolve Solver Engine
//!
//! This crate provides the exhaustive enumeration engine:
//! - `Solver`: recursive enumeration over every integer assignment in the
//!   Cartesian product of the decision variable domains
//! - `Deadline`: wall-clock supervision for a single solve call
//!
//! The engine guarantees global optimality within the enumerated space; it
//! deliberately has no relaxation bounds, so it only suits small problems.

pub mod deadline;
pub mod solver;

pub use deadline::Deadline;
pub use solver::Solver;
