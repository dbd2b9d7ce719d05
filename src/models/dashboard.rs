//! Response models for dashboard loads and timing comparisons.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::common::round_to;
use crate::models::student::{StudentAttendance, StudentMarks, StudentProfile};

/// Strategy used to run the three student data fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// Each fetch completes before the next one starts.
    Sequential,
    /// All fetches start together and are awaited as a group.
    Parallel,
}

impl ExecutionMode {
    /// Short machine label, used for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }

    /// Human-readable description returned to API clients.
    pub fn description(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => {
                "Sequential – each task waited for the previous one to finish"
            }
            ExecutionMode::Parallel => {
                "Parallel – all tasks ran simultaneously and were awaited together"
            }
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ExecutionMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.description())
    }
}

/// Combined dashboard for one student, always in profile, marks, attendance order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub profile: StudentProfile,
    pub marks: StudentMarks,
    pub attendance: StudentAttendance,
    pub time_taken_seconds: f64,
    pub execution_mode: ExecutionMode,
}

/// A single fetch result together with how long it took.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timed<T> {
    pub data: T,
    pub time_taken_seconds: f64,
}

/// Side-by-side timings of a sequential and a parallel load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub sequential_seconds: f64,
    pub parallel_seconds: f64,
    pub time_saved_seconds: f64,
    /// `"<n>x faster"`; absent when the parallel run took no measurable time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speedup_factor: Option<String>,
}

impl ComparisonReport {
    pub fn from_timings(sequential_seconds: f64, parallel_seconds: f64) -> Self {
        Self {
            sequential_seconds,
            parallel_seconds,
            time_saved_seconds: round_to(sequential_seconds - parallel_seconds, 3),
            speedup_factor: speedup_ratio(sequential_seconds, parallel_seconds)
                .map(|ratio| format!("{}x faster", format_ratio(ratio))),
        }
    }

    /// Numeric speedup, `None` when the parallel duration is zero.
    pub fn speedup(&self) -> Option<f64> {
        speedup_ratio(self.sequential_seconds, self.parallel_seconds)
    }
}

fn speedup_ratio(sequential_seconds: f64, parallel_seconds: f64) -> Option<f64> {
    if parallel_seconds > 0.0 {
        Some(round_to(sequential_seconds / parallel_seconds, 2))
    } else {
        None
    }
}

/// Two decimals with trailing zeros trimmed, keeping at least one ("3.0", "2.5", "2.99").
fn format_ratio(ratio: f64) -> String {
    let fixed = format!("{:.2}", ratio);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}
