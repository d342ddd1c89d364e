//! GridSolve command-line interface.
//!
//! Loads a problem definition, runs the exhaustive solve, prints the
//! solution report, and optionally writes a CSV result row. Configuration
//! and timeout failures are reported as a styled message with a non-zero
//! exit status, never as a panic.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;

use gridsolve_config::ProblemConfig;
use gridsolve_console::CsvExporter;
use gridsolve_solver::Solver;

#[derive(Debug, Parser)]
#[command(
    name = "gridsolve",
    version,
    about = "Exact enumeration solver for small integer linear programs"
)]
struct Cli {
    /// Path to the problem definition file (YAML or TOML).
    #[arg(long, default_value = "configs/problem.yaml")]
    config: PathBuf,

    /// Write the optimal counts as a CSV row to this path.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Scenario label used in the CSV output.
    #[arg(long, default_value = "default")]
    label: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    gridsolve_console::init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error.to_string().bright_red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = ProblemConfig::load(&cli.config)?;
    let criterion = config.criterion()?;
    let time_limit = config.time_limit()?;
    let problem = config.to_problem()?;

    let mut solver = Solver::new(criterion, time_limit, problem)?;
    solver.solve()?;

    gridsolve_console::print_solution(&solver);

    if let Some(path) = &cli.csv {
        if let Some(csv) = CsvExporter::to_string(&cli.label, &solver) {
            std::fs::write(path, csv)?;
            println!("Results have been stored in {}.", path.display());
        }
    }

    Ok(())
}
