//! Small shared helpers.

pub mod math;

pub use math::{round_to, saturating_millis};
