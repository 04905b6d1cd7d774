//! Student record types
//!
//! Two record kinds are served:
//! - `Student`: directory entry keyed by a server-assigned UUID, unique by email
//! - `RosterStudent`: roster entry keyed by a client-chosen integer id, unique by roll number

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Record;

/// Directory student as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub email: String,
    pub age: i64,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(rename = "CGPA")]
    pub cgpa: f64,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Record for Student {
    fn record_key(&self) -> String {
        self.id.to_string()
    }
}

/// Validated client-supplied fields of a directory student
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
    pub department: Option<String>,
    pub cgpa: f64,
}

impl NewStudent {
    /// Materialise a stored student with server-assigned id and timestamp
    pub fn into_student(self, id: Uuid, created_at: DateTime<Utc>) -> Student {
        Student {
            name: self.name,
            email: self.email,
            age: self.age,
            department: self.department,
            cgpa: self.cgpa,
            id,
            created_at,
        }
    }

    /// Replace every client-owned field of `student`; `id` and `created_at` are kept
    pub fn apply_to(self, student: &mut Student) {
        student.name = self.name;
        student.email = self.email;
        student.age = self.age;
        student.department = self.department;
        student.cgpa = self.cgpa;
    }
}

/// Roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterStudent {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub roll_number: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(rename = "CGPA", default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
}

impl Record for RosterStudent {
    fn record_key(&self) -> String {
        self.id.to_string()
    }
}

/// Static demo record served at the root path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedStudent {
    pub id: String,
    pub name: String,
    pub field_of_study: String,
}

impl Default for FeaturedStudent {
    fn default() -> Self {
        Self {
            id: "BSE223046".to_string(),
            name: "Rida Fatima".to_string(),
            field_of_study: "Software Engineering".to_string(),
        }
    }
}
