use serde::{Deserialize, Serialize};

use crate::model::course_record::CourseRecord;
use crate::model::department::Department;

/// A header row whose course could not be built.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedCourse {
    /// Index of the header row among the department's header rows.
    pub position: usize,
    /// Course code, when the header row was readable.
    pub code: Option<String>,
    /// Offending row, counted from the header row (0).
    pub row: usize,
    pub reason: String,
}

/// Result of parsing one department page: every course that parsed plus the ones that did not.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentReport {
    pub courses: Vec<CourseRecord>,
    pub skipped: Vec<SkippedCourse>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DepartmentSummary {
    pub department: Department,
    pub parsed: usize,
    pub skipped: Vec<SkippedCourse>,
    /// Set when the page could not be fetched or parsed at all.
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub departments: Vec<DepartmentSummary>,
}

impl RunSummary {
    pub fn total_parsed(&self) -> usize {
        self.departments.iter().map(|d| d.parsed).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.departments.iter().map(|d| d.skipped.len()).sum()
    }

    pub fn all_failed(&self) -> bool {
        !self.departments.is_empty() && self.departments.iter().all(|d| d.error.is_some())
    }
}
