//! Comparison operators for bound and feasibility constraints.

use std::fmt;
use std::str::FromStr;

use crate::error::GridSolveError;

/// A relational operator in a constraint.
///
/// The same four operators are used to tighten decision variable bounds
/// and to compare a constraint variable's weighted sum against its bound.
///
/// # Examples
///
/// ```
/// use gridsolve_core::ComparisonOp;
///
/// let op: ComparisonOp = "<=".parse().unwrap();
/// assert_eq!(op, ComparisonOp::Le);
/// assert!(!op.is_strict());
/// assert!("=<".parse::<ComparisonOp>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Strictly less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Strictly greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
}

impl ComparisonOp {
    /// All allowed operators, in display order.
    pub const ALL: [ComparisonOp; 4] = [
        ComparisonOp::Lt,
        ComparisonOp::Le,
        ComparisonOp::Gt,
        ComparisonOp::Ge,
    ];

    /// Returns true for `<` and `>`.
    ///
    /// Strict operators are compared exactly; non-strict operators absorb
    /// floating-point rounding up to [`crate::COMPARISON_EPSILON`].
    #[inline]
    pub fn is_strict(&self) -> bool {
        matches!(self, ComparisonOp::Lt | ComparisonOp::Gt)
    }

    /// Returns true for the operators that impose an upper bound (`<`, `<=`).
    #[inline]
    pub fn is_upper(&self) -> bool {
        matches!(self, ComparisonOp::Lt | ComparisonOp::Le)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
        };
        write!(f, "{}", token)
    }
}

impl FromStr for ComparisonOp {
    type Err = GridSolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(ComparisonOp::Lt),
            "<=" => Ok(ComparisonOp::Le),
            ">" => Ok(ComparisonOp::Gt),
            ">=" => Ok(ComparisonOp::Ge),
            other => Err(GridSolveError::Config(format!(
                "the comparison operator \"{}\" is not allowed; \
                 allowed operators: <, <=, >, >=",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_operators() {
        assert_eq!("<".parse::<ComparisonOp>().unwrap(), ComparisonOp::Lt);
        assert_eq!("<=".parse::<ComparisonOp>().unwrap(), ComparisonOp::Le);
        assert_eq!(">".parse::<ComparisonOp>().unwrap(), ComparisonOp::Gt);
        assert_eq!(">=".parse::<ComparisonOp>().unwrap(), ComparisonOp::Ge);
    }

    #[test]
    fn test_parse_rejects_unknown_operator() {
        for bad in ["==", "=<", "=>", "!=", "", "≤"] {
            let err = bad.parse::<ComparisonOp>().unwrap_err();
            assert!(err.to_string().contains("not allowed"), "{}", err);
        }
    }

    #[test]
    fn test_display_round_trips() {
        for op in ComparisonOp::ALL {
            assert_eq!(op.to_string().parse::<ComparisonOp>().unwrap(), op);
        }
    }

    #[test]
    fn test_strictness() {
        assert!(ComparisonOp::Lt.is_strict());
        assert!(ComparisonOp::Gt.is_strict());
        assert!(!ComparisonOp::Le.is_strict());
        assert!(!ComparisonOp::Ge.is_strict());
    }
}
