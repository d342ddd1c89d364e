use std::io::Write as _;
use std::time::Duration;

use gridsolve_core::Criterion;

use super::*;

const FURNITURE_YAML: &str = r#"
timeout: 10
criterion: max
decision_variables:
  - name: table
    unit_profit: 30.0
    bounds:
      - { op: ">=", value: 0 }
      - { op: "<=", value: 8 }
  - name: chair
    unit_profit: 20.0
    bounds:
      - { op: ">=", value: 0 }
      - { op: "<", value: 13 }
constraint_variables:
  - name: wood
    terms:
      - { variable: table, coefficient: 4.0 }
      - { variable: chair, coefficient: 3.0 }
    op: "<="
    value: 40.0
"#;

const FURNITURE_TOML: &str = r#"
timeout = 10
criterion = "max"

[[decision_variables]]
name = "table"
unit_profit = 30.0
bounds = [
    { op = ">=", value = 0 },
    { op = "<=", value = 8 },
]

[[decision_variables]]
name = "chair"
unit_profit = 20.0
bounds = [
    { op = ">=", value = 0 },
    { op = "<", value = 13 },
]

[[constraint_variables]]
name = "wood"
op = "<="
value = 40.0
terms = [
    { variable = "table", coefficient = 4.0 },
    { variable = "chair", coefficient = 3.0 },
]
"#;

#[test]
fn test_yaml_parsing() {
    let config = ProblemConfig::from_yaml_str(FURNITURE_YAML).unwrap();
    assert_eq!(config.timeout, 10);
    assert_eq!(config.criterion().unwrap(), Criterion::Max);
    assert_eq!(config.time_limit().unwrap(), Duration::from_secs(10));
    assert_eq!(config.decision_variables.len(), 2);
    assert_eq!(config.constraint_variables.len(), 1);
}

#[test]
fn test_toml_parsing_matches_yaml() {
    let from_yaml = ProblemConfig::from_yaml_str(FURNITURE_YAML).unwrap();
    let from_toml = ProblemConfig::from_toml_str(FURNITURE_TOML).unwrap();

    let yaml_problem = from_yaml.to_problem().unwrap();
    let toml_problem = from_toml.to_problem().unwrap();
    assert_eq!(yaml_problem.variable_count(), toml_problem.variable_count());
    assert_eq!(
        yaml_problem.constraint_count(),
        toml_problem.constraint_count()
    );
    assert_eq!(
        yaml_problem.variable("chair").unwrap().upper_bound(),
        toml_problem.variable("chair").unwrap().upper_bound(),
    );
}

#[test]
fn test_bounds_are_applied_through_core() {
    let problem = ProblemConfig::from_yaml_str(FURNITURE_YAML)
        .unwrap()
        .to_problem()
        .unwrap();

    let table = problem.variable("table").unwrap();
    assert_eq!(table.bounds().unwrap(), (0, 8));
    // Strict `< 13` folds to an inclusive 12.
    let chair = problem.variable("chair").unwrap();
    assert_eq!(chair.bounds().unwrap(), (0, 12));
}

#[test]
fn test_constraint_variables_may_be_omitted() {
    let config = ProblemConfig::from_yaml_str(
        r#"
timeout: 5
criterion: min
decision_variables:
  - name: x
    unit_profit: 1.0
"#,
    )
    .unwrap();
    assert!(config.constraint_variables.is_empty());
    assert_eq!(config.criterion().unwrap(), Criterion::Min);
}

#[test]
fn test_missing_required_key_is_a_parse_error() {
    let result = ProblemConfig::from_yaml_str(
        r#"
criterion: max
decision_variables: []
"#,
    );
    assert!(matches!(result, Err(ConfigError::Yaml(_))));
}

#[test]
fn test_zero_timeout_rejected() {
    let mut config = ProblemConfig::from_yaml_str(FURNITURE_YAML).unwrap();
    config.timeout = 0;
    let err = config.time_limit().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_criterion_rejected() {
    let mut config = ProblemConfig::from_yaml_str(FURNITURE_YAML).unwrap();
    config.criterion = "maximize".to_string();
    let err = config.criterion().unwrap_err();
    assert!(err.to_string().contains("maximize"), "{}", err);
}

#[test]
fn test_disallowed_operator_rejected() {
    let mut config = ProblemConfig::from_yaml_str(FURNITURE_YAML).unwrap();
    config.constraint_variables[0].op = "==".to_string();
    let err = config.to_problem().unwrap_err();
    assert!(err.to_string().contains("not allowed"), "{}", err);
}

#[test]
fn test_duplicate_decision_variable_rejected() {
    let mut config = ProblemConfig::from_yaml_str(FURNITURE_YAML).unwrap();
    let mut duplicate = config.decision_variables[0].clone();
    duplicate.unit_profit = 1.0;
    config.decision_variables.push(duplicate);
    let err = config.to_problem().unwrap_err();
    assert!(err.to_string().contains("unique"), "{}", err);
}

#[test]
fn test_unknown_dependency_rejected() {
    let mut config = ProblemConfig::from_yaml_str(FURNITURE_YAML).unwrap();
    config.constraint_variables[0].terms[1].variable = "bench".to_string();
    let err = config.to_problem().unwrap_err();
    assert!(err.to_string().contains("bench"), "{}", err);
}

#[test]
fn test_infeasible_bounds_rejected() {
    let config = ProblemConfig::from_yaml_str(
        r#"
timeout: 5
criterion: max
decision_variables:
  - name: x
    unit_profit: 1.0
    bounds:
      - { op: ">=", value: 4 }
      - { op: "<=", value: 3 }
"#,
    )
    .unwrap();
    let err = config.to_problem().unwrap_err();
    assert!(err.to_string().contains("empty"), "{}", err);
}

#[test]
fn test_load_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();

    let yaml_path = dir.path().join("problem.yaml");
    let mut yaml_file = std::fs::File::create(&yaml_path).unwrap();
    yaml_file.write_all(FURNITURE_YAML.as_bytes()).unwrap();

    let toml_path = dir.path().join("problem.toml");
    let mut toml_file = std::fs::File::create(&toml_path).unwrap();
    toml_file.write_all(FURNITURE_TOML.as_bytes()).unwrap();

    let from_yaml = ProblemConfig::load(&yaml_path).unwrap();
    let from_toml = ProblemConfig::load(&toml_path).unwrap();
    assert_eq!(from_yaml.timeout, from_toml.timeout);

    let missing = ProblemConfig::load(dir.path().join("missing.toml"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}
