//! Dashboard aggregation under the sequential and parallel strategies.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join3;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::common::{round_to, saturating_millis};
use crate::config::AppConfig;
use crate::error::{DashboardError, FetchError};
use crate::models::{
    AggregateResult, ExecutionMode, StudentAttendance, StudentId, StudentMarks, StudentProfile,
    Timed,
};
use crate::services::student_data::{DataSource, SimulatedStudentData, StudentDataSource};

type Records = (StudentProfile, StudentMarks, StudentAttendance);

/// Runs the three student fetches and assembles the combined dashboard.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct DashboardAggregator {
    source: Arc<dyn StudentDataSource>,
    timeout: Option<Duration>,
}

impl DashboardAggregator {
    pub fn new(source: Arc<dyn StudentDataSource>) -> Self {
        Self {
            source,
            timeout: None,
        }
    }

    /// Simulated source with the configured latency and timeout.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(SimulatedStudentData::new(config.fetch_delay)))
            .with_timeout(config.fetch_timeout)
    }

    /// Bound every provider call by `timeout`. Parallel fetches overlap, so they
    /// share one timer; on expiry all pending fetches are dropped.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn load(
        &self,
        student_id: StudentId,
        mode: ExecutionMode,
    ) -> Result<AggregateResult, DashboardError> {
        let start = Instant::now();

        let outcome = match mode {
            ExecutionMode::Sequential => self.run_sequential(student_id).await,
            ExecutionMode::Parallel => {
                self.bounded(mode.label(), self.run_parallel(student_id))
                    .await
            }
        };
        let time_taken_seconds = elapsed_seconds(start);

        match outcome {
            Ok((profile, marks, attendance)) => {
                info!(
                    student_id,
                    mode = %mode,
                    elapsed_seconds = time_taken_seconds,
                    "Dashboard loaded"
                );
                Ok(AggregateResult {
                    profile,
                    marks,
                    attendance,
                    time_taken_seconds,
                    execution_mode: mode,
                })
            }
            Err(e) => {
                warn!(
                    student_id,
                    mode = %mode,
                    elapsed_seconds = time_taken_seconds,
                    error = %e,
                    "Dashboard load failed"
                );
                Err(e)
            }
        }
    }

    pub async fn load_sequential(
        &self,
        student_id: StudentId,
    ) -> Result<AggregateResult, DashboardError> {
        self.load(student_id, ExecutionMode::Sequential).await
    }

    pub async fn load_parallel(
        &self,
        student_id: StudentId,
    ) -> Result<AggregateResult, DashboardError> {
        self.load(student_id, ExecutionMode::Parallel).await
    }

    pub async fn profile(
        &self,
        student_id: StudentId,
    ) -> Result<Timed<StudentProfile>, DashboardError> {
        self.timed(DataSource::Profile, self.source.fetch_profile(student_id))
            .await
    }

    pub async fn marks(&self, student_id: StudentId) -> Result<Timed<StudentMarks>, DashboardError> {
        self.timed(DataSource::Marks, self.source.fetch_marks(student_id))
            .await
    }

    pub async fn attendance(
        &self,
        student_id: StudentId,
    ) -> Result<Timed<StudentAttendance>, DashboardError> {
        self.timed(DataSource::Attendance, self.source.fetch_attendance(student_id))
            .await
    }

    /// Each fetch is awaited before the next starts; the first failure or
    /// timeout stops the load.
    async fn run_sequential(&self, student_id: StudentId) -> Result<Records, DashboardError> {
        let profile = self
            .bounded_fetch(DataSource::Profile, self.source.fetch_profile(student_id))
            .await?;
        let marks = self
            .bounded_fetch(DataSource::Marks, self.source.fetch_marks(student_id))
            .await?;
        let attendance = self
            .bounded_fetch(DataSource::Attendance, self.source.fetch_attendance(student_id))
            .await?;
        Ok((profile, marks, attendance))
    }

    /// All three fetches are polled on this task in profile, marks, attendance
    /// order and awaited together. Every outcome settles before failures are reported.
    async fn run_parallel(&self, student_id: StudentId) -> Result<Records, DashboardError> {
        let outcomes = join3(
            self.source.fetch_profile(student_id),
            self.source.fetch_marks(student_id),
            self.source.fetch_attendance(student_id),
        )
        .await;

        match outcomes {
            (Ok(profile), Ok(marks), Ok(attendance)) => Ok((profile, marks, attendance)),
            (profile, marks, attendance) => {
                let failures: Vec<FetchError> = [profile.err(), marks.err(), attendance.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                Err(DashboardError::AggregateFailure { failures })
            }
        }
    }

    async fn timed<T, F>(&self, source: DataSource, fetch: F) -> Result<Timed<T>, DashboardError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        let start = Instant::now();
        let outcome = self.bounded_fetch(source, fetch).await;
        let time_taken_seconds = elapsed_seconds(start);

        match outcome {
            Ok(data) => {
                info!(
                    source = %source,
                    elapsed_seconds = time_taken_seconds,
                    "Single source fetched"
                );
                Ok(Timed {
                    data,
                    time_taken_seconds,
                })
            }
            Err(e) => {
                warn!(source = %source, error = %e, "Single source fetch failed");
                Err(e)
            }
        }
    }

    async fn bounded_fetch<T, F>(&self, source: DataSource, fetch: F) -> Result<T, DashboardError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        self.bounded(source.as_str(), async { fetch.await.map_err(DashboardError::from) })
            .await
    }

    async fn bounded<T, F>(&self, scope: &'static str, work: F) -> Result<T, DashboardError>
    where
        F: Future<Output = Result<T, DashboardError>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, work).await.map_err(|_| {
                DashboardError::ProviderTimeout {
                    scope,
                    limit_ms: saturating_millis(limit),
                }
            })?,
            None => work.await,
        }
    }
}

/// Seconds since `start`, rounded to milliseconds.
fn elapsed_seconds(start: Instant) -> f64 {
    round_to(start.elapsed().as_secs_f64(), 3)
}
