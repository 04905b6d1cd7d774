//! Filtering and sorting over a loaded collection
//!
//! Filters compose by intersection. Sorting is stable and re-run over the
//! whole filtered result on every request.

use std::cmp::Ordering;

use serde::Deserialize;

use super::errors::{RegistryError, RegistryResult};
use crate::schema::{RosterStudent, Student};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses `asc` / `desc` for the named parameter
    pub fn parse(param: &str, raw: &str) -> RegistryResult<Self> {
        match raw {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(RegistryError::InvalidQuery(format!(
                "{} must be 'asc' or 'desc', got '{}'",
                param, other
            ))),
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Directory field a search can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Numeric age
    Age,
    /// Case-insensitive name
    Name,
}

/// Sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }
}

/// Raw search parameters as they arrive in the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub sort_by_age: Option<String>,
    #[serde(default)]
    pub sort_by_name: Option<String>,
}

/// Validated directory search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Exact email
    pub email: Option<String>,
    /// Case-insensitive substring of the department
    pub department: Option<String>,
    pub sort: Option<SortSpec>,
}

impl StudentQuery {
    /// Builds a query from raw parameters.
    ///
    /// Empty strings count as absent. Supplying both `sort_by_age` and
    /// `sort_by_name` is rejected: only one sort key is allowed.
    pub fn from_params(params: &SearchParams) -> RegistryResult<Self> {
        let by_age = non_empty(&params.sort_by_age)
            .map(|raw| SortDirection::parse("sort_by_age", raw))
            .transpose()?;
        let by_name = non_empty(&params.sort_by_name)
            .map(|raw| SortDirection::parse("sort_by_name", raw))
            .transpose()?;

        let sort = match (by_age, by_name) {
            (Some(_), Some(_)) => {
                return Err(RegistryError::InvalidQuery(
                    "sort_by_age and sort_by_name cannot be combined".to_string(),
                ))
            }
            (Some(direction), None) => Some(SortSpec {
                key: SortKey::Age,
                direction,
            }),
            (None, Some(direction)) => Some(SortSpec {
                key: SortKey::Name,
                direction,
            }),
            (None, None) => None,
        };

        Ok(Self {
            name: non_empty(&params.name).map(str::to_string),
            email: non_empty(&params.email).map(str::to_string),
            department: non_empty(&params.department).map(str::to_string),
            sort,
        })
    }

    /// Checks if a student matches every provided filter
    pub fn matches(&self, student: &Student) -> bool {
        if let Some(ref name) = self.name {
            if !contains_ignore_case(&student.name, name) {
                return false;
            }
        }
        if let Some(ref email) = self.email {
            if &student.email != email {
                return false;
            }
        }
        if let Some(ref department) = self.department {
            match student.department {
                Some(ref dept) if contains_ignore_case(dept, department) => {}
                _ => return false,
            }
        }
        true
    }

    /// Filters then sorts
    pub fn apply(&self, students: Vec<Student>) -> Vec<Student> {
        let mut matched: Vec<Student> = students.into_iter().filter(|s| self.matches(s)).collect();
        if let Some(spec) = self.sort {
            sort_students(&mut matched, spec);
        }
        matched
    }
}

/// Sorts students in place. Stable: equal keys keep their relative order.
pub fn sort_students(students: &mut [Student], spec: SortSpec) {
    match spec.key {
        SortKey::Age => students.sort_by(|a, b| spec.direction.apply(a.age.cmp(&b.age))),
        SortKey::Name => students.sort_by(|a, b| {
            spec.direction
                .apply(a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
    }
}

/// Sorts roster entries by CGPA.
///
/// Entries without a CGPA order before all entries with one.
pub fn sort_by_cgpa(entries: &mut [RosterStudent], direction: SortDirection) {
    entries.sort_by(|a, b| direction.apply(compare_cgpa(a.cgpa, b.cgpa)));
}

fn compare_cgpa(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
