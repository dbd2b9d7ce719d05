//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::AppConfig;
use crate::error::DashboardError;
use crate::metrics::Metrics;
use crate::models::{
    AggregateResult, ComparisonReport, ExecutionMode, StudentAttendance, StudentId, StudentMarks,
    StudentProfile, Timed,
};
use crate::services::{ComparisonReporter, DashboardAggregator};

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub dashboard: DashboardAggregator,
    pub comparison: ComparisonReporter,
}

impl AppState {
    pub fn new(dashboard: DashboardAggregator, metrics: Arc<Metrics>) -> Self {
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            comparison: ComparisonReporter::new(dashboard.clone()),
            dashboard,
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "student-dashboard-api"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Parse a path segment as a non-negative student id.
pub fn parse_student_id(raw: &str) -> Result<StudentId, DashboardError> {
    raw.trim()
        .parse::<StudentId>()
        .map_err(|_| DashboardError::InvalidIdentifier {
            raw: raw.to_string(),
        })
}

async fn load_dashboard(
    state: &AppState,
    raw_id: &str,
    mode: ExecutionMode,
) -> Result<Json<AggregateResult>, DashboardError> {
    let student_id = parse_student_id(raw_id)?;

    match state.dashboard.load(student_id, mode).await {
        Ok(result) => {
            state.metrics.observe_load(mode, result.time_taken_seconds);
            Ok(Json(result))
        }
        Err(e) => {
            state.metrics.record_load_failure(mode);
            Err(e)
        }
    }
}

/// Load the dashboard one fetch at a time
async fn sequential_dashboard(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<AggregateResult>, DashboardError> {
    load_dashboard(&state, &student_id, ExecutionMode::Sequential).await
}

/// Load the dashboard with all fetches in flight together
async fn parallel_dashboard(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<AggregateResult>, DashboardError> {
    load_dashboard(&state, &student_id, ExecutionMode::Parallel).await
}

async fn profile(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Timed<StudentProfile>>, DashboardError> {
    let student_id = parse_student_id(&student_id)?;
    Ok(Json(state.dashboard.profile(student_id).await?))
}

async fn marks(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Timed<StudentMarks>>, DashboardError> {
    let student_id = parse_student_id(&student_id)?;
    Ok(Json(state.dashboard.marks(student_id).await?))
}

async fn attendance(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Timed<StudentAttendance>>, DashboardError> {
    let student_id = parse_student_id(&student_id)?;
    Ok(Json(state.dashboard.attendance(student_id).await?))
}

/// Run both strategies back to back and report the timings
async fn compare(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<ComparisonReport>, DashboardError> {
    let student_id = parse_student_id(&student_id)?;
    Ok(Json(state.comparison.compare(student_id).await?))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/dashboard/sequential/{student_id}", get(sequential_dashboard))
        .route("/dashboard/parallel/{student_id}", get(parallel_dashboard))
        .route("/dashboard/profile/{student_id}", get(profile))
        .route("/dashboard/marks/{student_id}", get(marks))
        .route("/dashboard/attendance/{student_id}", get(attendance))
        .route("/dashboard/compare/{student_id}", get(compare))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let dashboard = DashboardAggregator::from_config(&config);
    let state = AppState::new(dashboard, metrics);

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Dashboard endpoints available at http://0.0.0.0:{}/dashboard",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
