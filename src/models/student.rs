//! Student records returned by the data sources.
//!
//! All records are value objects built fresh for every request.

use serde::{Deserialize, Serialize};

use crate::common::round_to;

/// Non-negative student identifier, echoed verbatim into every record.
pub type StudentId = u32;

/// Minimum attendance percentage to sit the exams.
pub const ELIGIBILITY_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_id: StudentId,
    pub name: String,
    pub email: String,
    pub course: String,
    pub year: u8,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMark {
    pub subject: String,
    pub marks_obtained: u32,
    pub max_marks: u32,
}

impl SubjectMark {
    pub fn new(subject: impl Into<String>, marks_obtained: u32, max_marks: u32) -> Self {
        Self {
            subject: subject.into(),
            marks_obtained,
            max_marks,
        }
    }

    /// Percentage scored in this subject. Zero when `max_marks` is zero.
    pub fn percentage(&self) -> f64 {
        if self.max_marks == 0 {
            return 0.0;
        }
        self.marks_obtained as f64 / self.max_marks as f64 * 100.0
    }
}

/// Letter grade, a step function of the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Grade::APlus
        } else if percentage >= 80.0 {
            Grade::A
        } else if percentage >= 70.0 {
            Grade::B
        } else {
            Grade::C
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentMarks {
    pub student_id: StudentId,
    pub subjects: Vec<SubjectMark>,
    pub total_percentage: f64,
    pub grade: Grade,
}

impl StudentMarks {
    /// Derive the total percentage (mean of per-subject percentages, 2 decimals)
    /// and the grade. The grade is decided on the unrounded mean.
    pub fn from_subjects(student_id: StudentId, subjects: Vec<SubjectMark>) -> Self {
        let mean = if subjects.is_empty() {
            0.0
        } else {
            subjects.iter().map(SubjectMark::percentage).sum::<f64>() / subjects.len() as f64
        };

        Self {
            student_id,
            subjects,
            total_percentage: round_to(mean, 2),
            grade: Grade::from_percentage(mean),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAttendance {
    pub subject: String,
    pub attended: u32,
    pub total: u32,
}

impl SubjectAttendance {
    pub fn new(subject: impl Into<String>, attended: u32, total: u32) -> Self {
        Self {
            subject: subject.into(),
            attended,
            total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Eligible,
    Detained,
}

impl AttendanceStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= ELIGIBILITY_THRESHOLD {
            AttendanceStatus::Eligible
        } else {
            AttendanceStatus::Detained
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendance {
    pub student_id: StudentId,
    pub total_classes: u32,
    pub attended_classes: u32,
    pub attendance_percentage: f64,
    pub status: AttendanceStatus,
    pub subject_wise: Vec<SubjectAttendance>,
}

impl StudentAttendance {
    /// Totals across all subjects; the status is decided on the rounded percentage.
    pub fn from_subjects(student_id: StudentId, subject_wise: Vec<SubjectAttendance>) -> Self {
        let total_classes: u32 = subject_wise.iter().map(|s| s.total).sum();
        let attended_classes: u32 = subject_wise.iter().map(|s| s.attended).sum();
        let percentage = if total_classes == 0 {
            0.0
        } else {
            round_to(attended_classes as f64 / total_classes as f64 * 100.0, 2)
        };

        Self {
            student_id,
            total_classes,
            attended_classes,
            attendance_percentage: percentage,
            status: AttendanceStatus::from_percentage(percentage),
            subject_wise,
        }
    }
}
