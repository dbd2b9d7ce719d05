//! Error types for student data fetches and dashboard loads.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::student_data::DataSource;

/// A single data source call that did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{data_source} fetch failed: {message}")]
pub struct FetchError {
    pub data_source: DataSource,
    pub message: String,
}

impl FetchError {
    pub fn new(data_source: DataSource, message: impl Into<String>) -> Self {
        Self {
            data_source,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid student identifier: {raw:?}")]
    InvalidIdentifier { raw: String },

    /// First failing fetch of a sequential load. Later fetches were not started.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Every failed fetch of a parallel load, in profile, marks, attendance order.
    #[error("{} of 3 fetches failed: {}", .failures.len(), describe(.failures))]
    AggregateFailure { failures: Vec<FetchError> },

    /// A provider call ran past the configured limit. `scope` names the source,
    /// or `parallel` for the shared timer of a parallel load.
    #[error("{scope} fetch exceeded the {limit_ms} ms timeout")]
    ProviderTimeout { scope: &'static str, limit_ms: u64 },
}

fn describe(failures: &[FetchError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DashboardError {
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            DashboardError::Fetch(_) => "FETCH_FAILED",
            DashboardError::AggregateFailure { .. } => "AGGREGATE_FAILURE",
            DashboardError::ProviderTimeout { .. } => "PROVIDER_TIMEOUT",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            DashboardError::Fetch(_) | DashboardError::AggregateFailure { .. } => {
                StatusCode::BAD_GATEWAY
            }
            DashboardError::ProviderTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Sources that failed, in fixed order.
    pub fn failed_sources(&self) -> Vec<DataSource> {
        match self {
            DashboardError::Fetch(e) => vec![e.data_source],
            DashboardError::AggregateFailure { failures } => {
                failures.iter().map(|f| f.data_source).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });

        let failed = self.failed_sources();
        if !failed.is_empty() {
            body["failedSources"] = json!(failed);
        }

        (self.status(), Json(body)).into_response()
    }
}
