//! Data models shared by the services and the HTTP layer.

pub mod dashboard;
pub mod student;

pub use dashboard::{AggregateResult, ComparisonReport, ExecutionMode, Timed};
pub use student::{
    AttendanceStatus, Grade, StudentAttendance, StudentId, StudentMarks, StudentProfile,
    SubjectAttendance, SubjectMark,
};
