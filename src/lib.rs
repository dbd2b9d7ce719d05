//! Student dashboard API: sequential vs concurrent aggregation of latency-bound sources.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
