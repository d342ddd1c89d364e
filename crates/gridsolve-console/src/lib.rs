//! Colorful console output for solver runs.
//!
//! Provides a custom `tracing` layer that formats solver lifecycle events
//! with colors, plus the solution report and CSV export used after a solve.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end/timeout)
//! - **TRACE**: Individual incumbent improvements

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub mod report;

pub use report::{print_solution, CsvExporter};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the GridSolve banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive("gridsolve_solver=info".parse().unwrap())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    (now_nanos - start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  ____      _     _  ____        _
 / ___|_ __(_) __| |/ ___|  ___ | |_   _____
| |  _| '__| |/ _` |\___ \ / _ \| \ \ / / _ \
| |_| | |  | | (_| | ___) | (_) | |\ V /  __/
 \____|_|  |_|\__,_||____/ \___/|_| \_/ \___|
"#;

    let version_line = format!("            v{} - Exact Enumeration Solver\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        // Accept events from solver modules
        if !target.starts_with("gridsolve_solver") && !target.starts_with("gridsolve_cli") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    variable_count: Option<u64>,
    constraint_count: Option<u64>,
    search_space: Option<u64>,
    time_limit_secs: Option<u64>,
    leaves: Option<u64>,
    duration_ms: Option<u64>,
    feasible: Option<bool>,
    optimum: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "optimum" => self.optimum = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "variable_count" => self.variable_count = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "search_space" => self.search_space = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            "leaves" => self.leaves = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "feasible" {
            self.feasible = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "optimum" => self.optimum = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "solve_timeout" => format_solve_timeout(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let variables = v.variable_count.unwrap_or(0);
    let constraints = v.constraint_count.unwrap_or(0);
    let time_limit = v.time_limit_secs.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving │ {} variables │ scale {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        variables.to_formatted_string(&Locale::en).bright_yellow(),
        format_scale(v.search_space.unwrap_or(0)).bright_magenta(),
    );

    if constraints > 0 {
        output.push_str(&format!(
            " │ {} constraints",
            constraints.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    if time_limit > 0 {
        output.push_str(&format!(
            " │ {}s limit",
            time_limit.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let is_feasible = v.feasible.unwrap_or(false);
    let status = if is_feasible {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "NO FEASIBLE SOLUTION".bright_red().bold().to_string()
    };
    let optimum = v.optimum.as_deref().unwrap_or("none");

    format!(
        "{} {} Solving complete │ optimum {} │ {} │ {} leaves │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        optimum.bright_white().bold(),
        status,
        v.leaves
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_solve_timeout(v: &EventVisitor) -> String {
    format!(
        "{} {} Solve aborted │ {}s limit exceeded │ {} leaves visited",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.time_limit_secs
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        v.leaves
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Renders a search-space size as `m.mmm x 10^e`.
fn format_scale(search_space: u64) -> String {
    if search_space == 0 {
        return "0".to_string();
    }

    let log_scale = (search_space as f64).log10();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(0), "0ms");
        assert_eq!(format_duration_ms(999), "999ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(61_000), "1m 1s");
    }

    #[test]
    fn test_format_scale() {
        assert_eq!(format_scale(0), "0");
        assert_eq!(format_scale(1), "1.000 x 10^0");
        assert_eq!(format_scale(1_000), "1.000 x 10^3");
        assert_eq!(format_scale(1_500_000), "1.500 x 10^6");
    }

    #[test]
    fn test_unknown_event_formats_to_nothing() {
        let visitor = EventVisitor {
            event: Some("progress".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor).is_empty());
    }
}
