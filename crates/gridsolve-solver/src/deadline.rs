//! Wall-clock deadline for a single solve call.

use std::time::{Duration, Instant};

/// A deadline armed when a solve starts.
///
/// The deadline is a plain value owned by the solve call and checked
/// explicitly inside the enumeration (no signals, no background threads),
/// so it cannot outlive the call or interrupt unrelated work.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gridsolve_solver::Deadline;
///
/// let deadline = Deadline::start(Duration::from_secs(30));
/// assert!(!deadline.is_exceeded());
/// ```
#[derive(Debug, Clone)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    /// Arms a deadline `limit` from now.
    pub fn start(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    /// The configured limit.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Time since the deadline was armed.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether the limit has elapsed.
    pub fn is_exceeded(&self) -> bool {
        self.started.elapsed() >= self.limit
    }
}
