//! Problem definition files for GridSolve.
//!
//! Parses YAML or TOML problem definitions into a raw [`ProblemConfig`]
//! with serde, then lowers them into the validated core model. The raw
//! layer is deliberately string-typed; every semantic check (operators,
//! criterion, name uniqueness, bound feasibility) happens in the core
//! `FromStr`/constructor code paths so it exists in exactly one place.
//!
//! # Examples
//!
//! ```
//! use gridsolve_config::ProblemConfig;
//!
//! let config = ProblemConfig::from_yaml_str(r#"
//!     timeout: 10
//!     criterion: max
//!     decision_variables:
//!       - name: table
//!         unit_profit: 30.0
//!         bounds:
//!           - { op: ">=", value: 0 }
//!           - { op: "<=", value: 8 }
//!     constraint_variables:
//!       - name: wood
//!         terms:
//!           - { variable: table, coefficient: 4.0 }
//!         op: "<="
//!         value: 40.0
//! "#).unwrap();
//!
//! let problem = config.to_problem().unwrap();
//! assert_eq!(problem.variable_count(), 1);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gridsolve_core::{
    ComparisonOp, ConstraintVariable, Criterion, DecisionVariable, GridSolveError, Problem,
};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<GridSolveError> for ConfigError {
    fn from(error: GridSolveError) -> Self {
        ConfigError::Invalid(error.to_string())
    }
}

/// Raw problem definition as written by the user.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProblemConfig {
    /// Wall-clock limit for the solve, in whole seconds. Must be positive.
    pub timeout: u64,

    /// Optimization direction: `"max"` or `"min"`.
    pub criterion: String,

    /// Decision variables with their bound constraints.
    pub decision_variables: Vec<DecisionVariableConfig>,

    /// Constraint variables; may be omitted entirely.
    #[serde(default)]
    pub constraint_variables: Vec<ConstraintVariableConfig>,
}

/// One decision variable declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DecisionVariableConfig {
    /// Unique variable name.
    pub name: String,

    /// Per-unit objective contribution.
    pub unit_profit: f64,

    /// Bound constraints; both a lower and an upper bound must be present
    /// (in any combination of operators) before a solve can run.
    #[serde(default)]
    pub bounds: Vec<BoundConfig>,
}

/// A relational bound on a single decision variable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BoundConfig {
    /// One of `<`, `<=`, `>`, `>=`.
    pub op: String,

    /// Integer bound value.
    pub value: i64,
}

/// One constraint variable declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstraintVariableConfig {
    /// Unique constraint name.
    pub name: String,

    /// Weighted references to decision variables.
    pub terms: Vec<TermConfig>,

    /// One of `<`, `<=`, `>`, `>=`.
    pub op: String,

    /// Right-hand-side bound.
    pub value: f64,
}

/// One weighted term of a constraint variable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TermConfig {
    /// Name of a declared decision variable.
    pub variable: String,

    /// Multiplier applied to the variable's value.
    pub coefficient: f64,
}

impl ProblemConfig {
    /// Loads a definition file, dispatching on the file extension:
    /// `.yaml`/`.yml` are parsed as YAML, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads a definition from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a definition from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a definition from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses a definition from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// The optimization direction.
    pub fn criterion(&self) -> Result<Criterion, ConfigError> {
        Ok(self.criterion.parse()?)
    }

    /// The solve time limit.
    pub fn time_limit(&self) -> Result<Duration, ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Invalid(
                "the timeout must be a positive number of seconds to ensure \
                 the solve terminates"
                    .to_string(),
            ));
        }
        Ok(Duration::from_secs(self.timeout))
    }

    /// Lowers the raw definition into a validated [`Problem`].
    ///
    /// Applies every bound constraint through
    /// [`DecisionVariable::apply_constraint`] (so tightening and
    /// feasibility rules live in core) and assembles the constraint
    /// variables.
    pub fn to_problem(&self) -> Result<Problem, ConfigError> {
        let mut variables = Vec::with_capacity(self.decision_variables.len());
        for declaration in &self.decision_variables {
            let mut variable = DecisionVariable::new(&declaration.name, declaration.unit_profit);
            for bound in &declaration.bounds {
                let op: ComparisonOp = bound.op.parse()?;
                variable.apply_constraint(op, bound.value)?;
            }
            variables.push(variable);
        }

        let mut constraints = Vec::with_capacity(self.constraint_variables.len());
        for declaration in &self.constraint_variables {
            let op: ComparisonOp = declaration.op.parse()?;
            let terms = declaration
                .terms
                .iter()
                .map(|term| (term.variable.clone(), term.coefficient))
                .collect();
            constraints.push(ConstraintVariable::new(
                &declaration.name,
                terms,
                op,
                declaration.value,
            )?);
        }

        Ok(Problem::new(variables, constraints)?)
    }
}

#[cfg(test)]
mod tests;
