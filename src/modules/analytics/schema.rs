use serde::Serialize;

use crate::services::aggregation::{AttendanceSummary, GradeDistribution, TrendPoint};

#[derive(Debug, Serialize)]
pub struct ClassGradeAnalytics {
    pub class_id: String,
    pub distribution: GradeDistribution,
}

#[derive(Debug, Serialize)]
pub struct StudentAttendanceAnalytics {
    pub student_id: String,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Serialize)]
pub struct StudentTrendAnalytics {
    pub student_id: String,
    pub trend: Vec<TrendPoint>,
}

/// School-wide headline numbers for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct SchoolOverview {
    pub students: usize,
    pub teachers: usize,
    pub classes: usize,
    pub grades_recorded: usize,
    pub average_marks: f64,
}
