use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::modules::attendance::model::AttendanceStatus;

/// Letter band for a numeric mark. Fixed cutoffs; boundary values land in
/// the higher band (exactly 90 is an A+, exactly 80 an A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn from_marks(marks: f64) -> Self {
        if marks >= 90.0 {
            Self::APlus
        } else if marks >= 80.0 {
            Self::A
        } else if marks >= 70.0 {
            Self::B
        } else if marks >= 60.0 {
            Self::C
        } else if marks >= 50.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GradeDistribution {
    pub a_plus: u32,
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
    pub f: u32,
    pub total: u32,
    pub average: f64,
}

/// Bucket marks into letter bands. Pure over the provided rows.
pub fn grade_distribution(marks: &[f64]) -> GradeDistribution {
    let mut dist = GradeDistribution::default();
    let mut sum = 0.0;

    for &m in marks {
        sum += m;
        match LetterGrade::from_marks(m) {
            LetterGrade::APlus => dist.a_plus += 1,
            LetterGrade::A => dist.a += 1,
            LetterGrade::B => dist.b += 1,
            LetterGrade::C => dist.c += 1,
            LetterGrade::D => dist.d += 1,
            LetterGrade::F => dist.f += 1,
        }
    }

    dist.total = marks.len() as u32;
    if !marks.is_empty() {
        dist.average = sum / marks.len() as f64;
    }
    dist
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub present: u32,
    pub late: u32,
    pub absent: u32,
    pub total: u32,
    /// present / total. LATE does not count as present here; it is reported
    /// in its own bucket.
    pub rate: f64,
}

pub fn attendance_summary(statuses: &[AttendanceStatus]) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();

    for status in statuses {
        match status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Late => summary.late += 1,
            AttendanceStatus::Absent => summary.absent += 1,
        }
    }

    summary.total = statuses.len() as u32;
    if summary.total > 0 {
        summary.rate = f64::from(summary.present) / f64::from(summary.total);
    }
    summary
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Year-month, e.g. `2026-03`.
    pub period: String,
    pub average: f64,
}

/// Average marks per calendar month, in chronological order.
pub fn monthly_trend(rows: &[(NaiveDate, f64)]) -> Vec<TrendPoint> {
    let mut buckets: Vec<((i32, u32), (f64, u32))> = Vec::new();

    for &(date, marks) in rows {
        let key = (date.year(), date.month());
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, (sum, count))) => {
                *sum += marks;
                *count += 1;
            }
            None => buckets.push((key, (marks, 1))),
        }
    }

    buckets.sort_by_key(|(k, _)| *k);
    buckets
        .into_iter()
        .map(|((year, month), (sum, count))| TrendPoint {
            period: format!("{year:04}-{month:02}"),
            average: sum / f64::from(count),
        })
        .collect()
}
