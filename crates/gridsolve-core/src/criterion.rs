//! Optimization criterion.

use std::fmt;
use std::str::FromStr;

use crate::error::GridSolveError;

/// The optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Criterion {
    /// Maximize the objective.
    #[default]
    Max,
    /// Minimize the objective.
    Min,
}

impl Criterion {
    /// Returns true if `candidate` is strictly better than `incumbent`.
    ///
    /// Ties are not improvements: the first-found assignment wins, which
    /// keeps the result deterministic in enumeration order.
    #[inline]
    pub fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Criterion::Max => candidate > incumbent,
            Criterion::Min => candidate < incumbent,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Max => write!(f, "max"),
            Criterion::Min => write!(f, "min"),
        }
    }
}

impl FromStr for Criterion {
    type Err = GridSolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max" => Ok(Criterion::Max),
            "min" => Ok(Criterion::Min),
            other => Err(GridSolveError::Config(format!(
                "the criterion \"{}\" is not allowed; allowed criteria: max, min",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("max".parse::<Criterion>().unwrap(), Criterion::Max);
        assert_eq!("min".parse::<Criterion>().unwrap(), Criterion::Min);
        assert!("MAX".parse::<Criterion>().is_err());
        assert!("maximize".parse::<Criterion>().is_err());
    }

    #[test]
    fn test_improvement_is_strict() {
        assert!(Criterion::Max.improves(5.0, 4.0));
        assert!(!Criterion::Max.improves(4.0, 4.0));
        assert!(!Criterion::Max.improves(3.0, 4.0));

        assert!(Criterion::Min.improves(3.0, 4.0));
        assert!(!Criterion::Min.improves(4.0, 4.0));
        assert!(!Criterion::Min.improves(5.0, 4.0));
    }
}
