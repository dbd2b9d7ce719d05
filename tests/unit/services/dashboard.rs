//! Unit tests for the dashboard aggregator
//!
//! Time is paused so elapsed durations are exact multiples of the simulated delay.

use std::sync::Arc;
use std::time::Duration;

use student_dashboard::error::DashboardError;
use student_dashboard::models::ExecutionMode;
use student_dashboard::services::student_data::{DataSource, SimulatedStudentData};
use student_dashboard::services::DashboardAggregator;

use crate::support::ScriptedSource;

fn simulated(delay_ms: u64) -> DashboardAggregator {
    DashboardAggregator::new(Arc::new(SimulatedStudentData::new(Duration::from_millis(
        delay_ms,
    ))))
}

#[tokio::test(start_paused = true)]
async fn test_sequential_takes_sum_of_latencies() {
    let result = simulated(2000).load_sequential(42).await.unwrap();

    assert_eq!(result.time_taken_seconds, 6.0);
    assert_eq!(result.execution_mode, ExecutionMode::Sequential);
    assert_eq!(result.profile.student_id, 42);
    assert_eq!(result.marks.student_id, 42);
    assert_eq!(result.attendance.student_id, 42);
}

#[tokio::test(start_paused = true)]
async fn test_parallel_takes_max_latency() {
    let result = simulated(2000).load_parallel(42).await.unwrap();

    assert_eq!(result.time_taken_seconds, 2.0);
    assert_eq!(result.execution_mode, ExecutionMode::Parallel);
    assert_eq!(result.marks.total_percentage, 83.0);
    assert_eq!(result.attendance.attendance_percentage, 88.44);
}

#[tokio::test(start_paused = true)]
async fn test_parallel_faster_than_sequential() {
    let aggregator = simulated(150);
    let sequential = aggregator.load(1, ExecutionMode::Sequential).await.unwrap();
    let parallel = aggregator.load(1, ExecutionMode::Parallel).await.unwrap();

    assert!(parallel.time_taken_seconds < sequential.time_taken_seconds);
    assert_eq!(sequential.time_taken_seconds, 0.45);
    assert_eq!(parallel.time_taken_seconds, 0.15);
}

#[tokio::test(start_paused = true)]
async fn test_both_modes_return_same_records() {
    let aggregator = simulated(2000);
    let sequential = aggregator.load_sequential(8).await.unwrap();
    let parallel = aggregator.load_parallel(8).await.unwrap();

    assert_eq!(sequential.profile, parallel.profile);
    assert_eq!(sequential.marks, parallel.marks);
    assert_eq!(sequential.attendance, parallel.attendance);
}

#[tokio::test(start_paused = true)]
async fn test_parallel_starts_in_order_and_assembles_regardless_of_completion() {
    let source = Arc::new(ScriptedSource::with_delays(
        Duration::from_millis(300),
        Duration::from_millis(200),
        Duration::from_millis(100),
    ));
    let aggregator = DashboardAggregator::new(source.clone());

    let result = aggregator.load_parallel(77).await.unwrap();

    assert_eq!(
        source.started(),
        vec![DataSource::Profile, DataSource::Marks, DataSource::Attendance]
    );
    assert_eq!(
        source.finished(),
        vec![DataSource::Attendance, DataSource::Marks, DataSource::Profile]
    );
    assert_eq!(result.profile.student_id, 77);
    assert_eq!(result.profile.name, "Rahul Sharma");
    assert_eq!(result.marks.subjects.len(), 5);
    assert_eq!(result.attendance.subject_wise.len(), 5);
    assert_eq!(result.time_taken_seconds, 0.3);
}

#[tokio::test(start_paused = true)]
async fn test_sequential_fails_fast() {
    let source = Arc::new(
        ScriptedSource::uniform(Duration::from_millis(100)).failing(DataSource::Marks),
    );
    let aggregator = DashboardAggregator::new(source.clone());

    let err = aggregator.load_sequential(3).await.unwrap_err();

    match &err {
        DashboardError::Fetch(e) => assert_eq!(e.data_source, DataSource::Marks),
        other => panic!("expected single fetch failure, got {other:?}"),
    }
    assert_eq!(err.failed_sources(), vec![DataSource::Marks]);
    assert_eq!(source.started(), vec![DataSource::Profile, DataSource::Marks]);
}

#[tokio::test(start_paused = true)]
async fn test_parallel_waits_for_all_then_reports_every_failure() {
    let source = Arc::new(
        ScriptedSource::with_delays(
            Duration::from_millis(500),
            Duration::ZERO,
            Duration::from_millis(50),
        )
        .failing(DataSource::Attendance)
        .failing(DataSource::Marks),
    );
    let aggregator = DashboardAggregator::new(source.clone());

    let err = aggregator.load_parallel(3).await.unwrap_err();

    match &err {
        DashboardError::AggregateFailure { failures } => {
            let sources: Vec<DataSource> = failures.iter().map(|f| f.data_source).collect();
            assert_eq!(sources, vec![DataSource::Marks, DataSource::Attendance]);
        }
        other => panic!("expected aggregate failure, got {other:?}"),
    }
    assert_eq!(source.finished().len(), 3);
    assert!(source.finished().contains(&DataSource::Profile));
    assert_eq!(err.code(), "AGGREGATE_FAILURE");
}

#[tokio::test(start_paused = true)]
async fn test_timeout_aborts_whole_load_with_single_error() {
    let source = Arc::new(ScriptedSource::uniform(Duration::from_millis(2000)));
    let aggregator =
        DashboardAggregator::new(source.clone()).with_timeout(Some(Duration::from_millis(1000)));

    let err = aggregator.load_parallel(3).await.unwrap_err();

    match err {
        DashboardError::ProviderTimeout { scope, limit_ms } => {
            assert_eq!(scope, "parallel");
            assert_eq!(limit_ms, 1000);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert_eq!(source.started().len(), 3);
    assert!(source.finished().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timeout_bounds_each_sequential_fetch_not_their_sum() {
    let aggregator = simulated(2000).with_timeout(Some(Duration::from_millis(2500)));

    let parallel = aggregator.load_parallel(3).await.unwrap();
    assert_eq!(parallel.time_taken_seconds, 2.0);

    let sequential = aggregator.load_sequential(3).await.unwrap();
    assert_eq!(sequential.time_taken_seconds, 6.0);
    assert_eq!(sequential.profile.student_id, 3);
}

#[tokio::test(start_paused = true)]
async fn test_sequential_timeout_names_slow_source_and_stops() {
    let source = Arc::new(ScriptedSource::with_delays(
        Duration::from_millis(100),
        Duration::from_millis(3000),
        Duration::from_millis(100),
    ));
    let aggregator =
        DashboardAggregator::new(source.clone()).with_timeout(Some(Duration::from_millis(2500)));

    let err = aggregator.load_sequential(3).await.unwrap_err();

    assert!(matches!(
        err,
        DashboardError::ProviderTimeout { scope: "marks", limit_ms: 2500 }
    ));
    assert_eq!(source.started(), vec![DataSource::Profile, DataSource::Marks]);
    assert_eq!(source.finished(), vec![DataSource::Profile]);
}

#[tokio::test(start_paused = true)]
async fn test_single_source_fetches_are_timed() {
    let aggregator = simulated(2000);

    let profile = aggregator.profile(11).await.unwrap();
    assert_eq!(profile.data.student_id, 11);
    assert_eq!(profile.time_taken_seconds, 2.0);

    let marks = aggregator.marks(11).await.unwrap();
    assert_eq!(marks.data.grade.as_str(), "A");
    assert_eq!(marks.time_taken_seconds, 2.0);

    let attendance = aggregator.attendance(11).await.unwrap();
    assert_eq!(attendance.data.attended_classes, 199);
    assert_eq!(attendance.time_taken_seconds, 2.0);
}

#[tokio::test(start_paused = true)]
async fn test_single_source_failure_and_timeout() {
    let source = Arc::new(
        ScriptedSource::uniform(Duration::from_millis(100)).failing(DataSource::Profile),
    );
    let aggregator =
        DashboardAggregator::new(source).with_timeout(Some(Duration::from_millis(50)));

    assert!(matches!(
        aggregator.profile(1).await,
        Err(DashboardError::ProviderTimeout { scope: "profile", limit_ms: 50 })
    ));

    let aggregator = DashboardAggregator::new(Arc::new(
        ScriptedSource::uniform(Duration::ZERO).failing(DataSource::Profile),
    ));
    assert!(matches!(
        aggregator.profile(1).await,
        Err(DashboardError::Fetch(_))
    ));
}
