//! Student data sources.
//!
//! The simulated source stands in for three independent I/O-bound lookups
//! (profile, marks, attendance). Each call waits on the runtime timer for the
//! configured latency and then returns fixed records for the requested id.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::common::saturating_millis;
use crate::error::FetchError;
use crate::models::{
    StudentAttendance, StudentId, StudentMarks, StudentProfile, SubjectAttendance, SubjectMark,
};

/// Identifies one of the three fetch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Profile,
    Marks,
    Attendance,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Profile => "profile",
            DataSource::Marks => "marks",
            DataSource::Attendance => "attendance",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latency-bound lookups behind the dashboard. The three calls are independent.
#[async_trait]
pub trait StudentDataSource: Send + Sync {
    async fn fetch_profile(&self, student_id: StudentId) -> Result<StudentProfile, FetchError>;

    async fn fetch_marks(&self, student_id: StudentId) -> Result<StudentMarks, FetchError>;

    async fn fetch_attendance(
        &self,
        student_id: StudentId,
    ) -> Result<StudentAttendance, FetchError>;
}

/// Fixed synthetic records with an artificial delay per call. Never fails.
#[derive(Debug, Clone)]
pub struct SimulatedStudentData {
    delay: Duration,
}

impl SimulatedStudentData {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    async fn simulate_latency(&self, source: DataSource, student_id: StudentId) {
        debug!(
            source = %source,
            student_id,
            delay_ms = saturating_millis(self.delay),
            "Simulating data source latency"
        );
        tokio::time::sleep(self.delay).await;
    }
}

#[async_trait]
impl StudentDataSource for SimulatedStudentData {
    async fn fetch_profile(&self, student_id: StudentId) -> Result<StudentProfile, FetchError> {
        self.simulate_latency(DataSource::Profile, student_id).await;
        Ok(sample_profile(student_id))
    }

    async fn fetch_marks(&self, student_id: StudentId) -> Result<StudentMarks, FetchError> {
        self.simulate_latency(DataSource::Marks, student_id).await;
        Ok(StudentMarks::from_subjects(student_id, sample_marks()))
    }

    async fn fetch_attendance(
        &self,
        student_id: StudentId,
    ) -> Result<StudentAttendance, FetchError> {
        self.simulate_latency(DataSource::Attendance, student_id).await;
        Ok(StudentAttendance::from_subjects(student_id, sample_attendance()))
    }
}

pub fn sample_profile(student_id: StudentId) -> StudentProfile {
    StudentProfile {
        student_id,
        name: "Rahul Sharma".to_string(),
        email: "rahul.sharma@college.edu".to_string(),
        course: "B.Tech Computer Science".to_string(),
        year: 3,
        department: "Computer Science & Engineering".to_string(),
    }
}

pub fn sample_marks() -> Vec<SubjectMark> {
    vec![
        SubjectMark::new("Data Structures", 88, 100),
        SubjectMark::new("Operating Systems", 75, 100),
        SubjectMark::new("Database Management", 91, 100),
        SubjectMark::new("Computer Networks", 82, 100),
        SubjectMark::new("Software Engineering", 79, 100),
    ]
}

pub fn sample_attendance() -> Vec<SubjectAttendance> {
    vec![
        SubjectAttendance::new("Data Structures", 42, 45),
        SubjectAttendance::new("Operating Systems", 38, 45),
        SubjectAttendance::new("Database Management", 44, 45),
        SubjectAttendance::new("Computer Networks", 35, 45),
        SubjectAttendance::new("Software Engineering", 40, 45),
    ]
}
