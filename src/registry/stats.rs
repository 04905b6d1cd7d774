//! Directory aggregates

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::Student;

/// Department bucket for students without a department
pub const UNSPECIFIED_DEPARTMENT: &str = "Not Specified";

/// Message returned instead of aggregates for an empty directory
pub const NO_STUDENTS_MESSAGE: &str = "No students found!";

/// Directory statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DirectoryStats {
    /// No records: there is no average to report
    Empty { message: String },
    Summary {
        total_students: usize,
        average_age: f64,
        department_count: BTreeMap<String, usize>,
    },
}

impl DirectoryStats {
    /// Computes aggregates in a single pass
    pub fn compute<'a>(students: impl IntoIterator<Item = &'a Student>) -> Self {
        let mut total = 0usize;
        let mut age_sum = 0i128;
        let mut department_count: BTreeMap<String, usize> = BTreeMap::new();

        for student in students {
            total += 1;
            age_sum += i128::from(student.age);
            let department = student
                .department
                .clone()
                .unwrap_or_else(|| UNSPECIFIED_DEPARTMENT.to_string());
            *department_count.entry(department).or_insert(0) += 1;
        }

        if total == 0 {
            return DirectoryStats::Empty {
                message: NO_STUDENTS_MESSAGE.to_string(),
            };
        }

        DirectoryStats::Summary {
            total_students: total,
            average_age: age_sum as f64 / total as f64,
            department_count,
        }
    }

    /// Average age, absent for an empty directory
    pub fn average_age(&self) -> Option<f64> {
        match self {
            DirectoryStats::Empty { .. } => None,
            DirectoryStats::Summary { average_age, .. } => Some(*average_age),
        }
    }
}
