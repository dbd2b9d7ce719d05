//! Back-to-back sequential and parallel loads with derived timing metrics.

use tracing::info;

use crate::error::DashboardError;
use crate::models::{ComparisonReport, StudentId};
use crate::services::dashboard::DashboardAggregator;

#[derive(Clone)]
pub struct ComparisonReporter {
    aggregator: DashboardAggregator,
}

impl ComparisonReporter {
    pub fn new(aggregator: DashboardAggregator) -> Self {
        Self { aggregator }
    }

    /// Run a sequential load, then a parallel load, and report both timings.
    /// A failure in either run aborts the comparison.
    pub async fn compare(&self, student_id: StudentId) -> Result<ComparisonReport, DashboardError> {
        let sequential = self.aggregator.load_sequential(student_id).await?;
        let parallel = self.aggregator.load_parallel(student_id).await?;

        let report =
            ComparisonReport::from_timings(sequential.time_taken_seconds, parallel.time_taken_seconds);

        info!(
            student_id,
            sequential_seconds = report.sequential_seconds,
            parallel_seconds = report.parallel_seconds,
            time_saved_seconds = report.time_saved_seconds,
            speedup = ?report.speedup(),
            "Comparison complete"
        );

        Ok(report)
    }
}
