//! Student data sources and the dashboard orchestration built on them.

pub mod comparison;
pub mod dashboard;
pub mod student_data;

pub use comparison::ComparisonReporter;
pub use dashboard::DashboardAggregator;
pub use student_data::{DataSource, SimulatedStudentData, StudentDataSource};
