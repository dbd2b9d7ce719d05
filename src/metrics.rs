//! Prometheus metrics for the HTTP layer and dashboard loads.

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

use crate::models::ExecutionMode;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub dashboard_load_duration_seconds: HistogramVec,
    pub dashboard_load_failures_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let dashboard_load_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "dashboard_load_duration_seconds",
                "Wall-clock time of a dashboard load by execution mode",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 12.0]),
            &["mode"],
        )?;
        let dashboard_load_failures_total = IntCounterVec::new(
            Opts::new(
                "dashboard_load_failures_total",
                "Dashboard loads that ended in an error, by execution mode",
            ),
            &["mode"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(dashboard_load_duration_seconds.clone()))?;
        registry.register(Box::new(dashboard_load_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            dashboard_load_duration_seconds,
            dashboard_load_failures_total,
        })
    }

    pub fn observe_load(&self, mode: ExecutionMode, seconds: f64) {
        self.dashboard_load_duration_seconds
            .with_label_values(&[mode.label()])
            .observe(seconds);
    }

    pub fn record_load_failure(&self, mode: ExecutionMode) {
        self.dashboard_load_failures_total
            .with_label_values(&[mode.label()])
            .inc();
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
