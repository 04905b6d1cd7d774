//! Explicit request validation
//!
//! Each function takes the raw JSON body and returns either the typed value
//! or the first field that violates its constraint. Validation never touches
//! storage; uniqueness is checked by the registry against the loaded
//! collection.
//!
//! Rules:
//! - Required fields must be present and non-null
//! - Integers must be JSON integers (no float coercion)
//! - Numbers accept both integers and floats
//! - Optional fields may be absent or null
//! - Undeclared fields are ignored

use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{NewStudent, RosterStudent};

/// Exclusive lower bound for a directory student's age
pub const STUDENT_MIN_AGE_EXCLUSIVE: i64 = 10;
/// Exclusive upper bound for any age
pub const MAX_AGE_EXCLUSIVE: i64 = 100;
/// Exclusive lower bound for a roster entry's age
pub const ROSTER_MIN_AGE_EXCLUSIVE: i64 = 5;
/// Minimum name length in characters
pub const NAME_MIN_LEN: usize = 2;
/// Maximum roster name length in characters
pub const ROSTER_NAME_MAX_LEN: usize = 50;

/// Validates a directory create/update body.
///
/// Expected shape: `{name, email, age, department?, CGPA}`.
pub fn validate_new_student(body: &Value) -> SchemaResult<NewStudent> {
    let obj = require_object(body)?;

    let name = require_string(obj, "name")?;
    if name.trim().chars().count() < NAME_MIN_LEN {
        return Err(SchemaError::validation_failed(ValidationDetails::new(
            "name",
            format!("at least {} characters", NAME_MIN_LEN),
            format!("{:?}", name),
        )));
    }

    let email = require_string(obj, "email")?;
    if email.trim().is_empty() {
        return Err(SchemaError::validation_failed(ValidationDetails::new(
            "email",
            "non-empty string",
            "empty string",
        )));
    }

    let age = require_integer(obj, "age")?;
    check_age(age, STUDENT_MIN_AGE_EXCLUSIVE)?;

    let department = optional_string(obj, "department")?;
    let cgpa = require_number(obj, "CGPA")?;

    Ok(NewStudent {
        name,
        email,
        age,
        department,
        cgpa,
    })
}

/// Validates a roster create body.
///
/// Expected shape: `{id, name, age, roll_number, grade?, CGPA?}`.
pub fn validate_roster_student(body: &Value) -> SchemaResult<RosterStudent> {
    let obj = require_object(body)?;

    let id = require_integer(obj, "id")?;

    let name = require_string(obj, "name")?;
    let name_len = name.chars().count();
    if !(NAME_MIN_LEN..=ROSTER_NAME_MAX_LEN).contains(&name_len) {
        return Err(SchemaError::validation_failed(ValidationDetails::new(
            "name",
            format!("between {} and {} characters", NAME_MIN_LEN, ROSTER_NAME_MAX_LEN),
            format!("{} characters", name_len),
        )));
    }

    let age = require_integer(obj, "age")?;
    check_age(age, ROSTER_MIN_AGE_EXCLUSIVE)?;

    let roll_number = require_string(obj, "roll_number")?;
    if roll_number.trim().is_empty() {
        return Err(SchemaError::validation_failed(ValidationDetails::new(
            "roll_number",
            "non-empty string",
            "empty string",
        )));
    }

    let grade = optional_string(obj, "grade")?;
    let cgpa = optional_number(obj, "CGPA")?;

    Ok(RosterStudent {
        id,
        name,
        age,
        roll_number,
        grade,
        cgpa,
    })
}

/// Parses a directory student id from a path segment
pub fn parse_student_id(raw: &str) -> SchemaResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        SchemaError::validation_failed(ValidationDetails::new("student_id", "UUID", format!("{:?}", raw)))
    })
}

fn check_age(age: i64, min_exclusive: i64) -> SchemaResult<()> {
    if age <= min_exclusive || age >= MAX_AGE_EXCLUSIVE {
        return Err(SchemaError::validation_failed(ValidationDetails::out_of_range(
            "age",
            format!(
                "integer greater than {} and less than {}",
                min_exclusive, MAX_AGE_EXCLUSIVE
            ),
            age,
        )));
    }
    Ok(())
}

fn require_object(body: &Value) -> SchemaResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| SchemaError::invalid_body(json_type_name(body)))
}

/// Returns the field value, treating null as absent.
fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|v| !v.is_null())
}

fn require<'a>(obj: &'a Map<String, Value>, name: &str) -> SchemaResult<&'a Value> {
    field(obj, name).ok_or_else(|| SchemaError::validation_failed(ValidationDetails::missing_field(name)))
}

fn require_string(obj: &Map<String, Value>, name: &str) -> SchemaResult<String> {
    let value = require(obj, name)?;
    as_string(value, name)
}

fn optional_string(obj: &Map<String, Value>, name: &str) -> SchemaResult<Option<String>> {
    field(obj, name).map(|value| as_string(value, name)).transpose()
}

fn require_integer(obj: &Map<String, Value>, name: &str) -> SchemaResult<i64> {
    let value = require(obj, name)?;
    value
        .as_i64()
        .ok_or_else(|| type_error(name, "integer", value))
}

fn require_number(obj: &Map<String, Value>, name: &str) -> SchemaResult<f64> {
    let value = require(obj, name)?;
    as_number(value, name)
}

fn optional_number(obj: &Map<String, Value>, name: &str) -> SchemaResult<Option<f64>> {
    field(obj, name).map(|value| as_number(value, name)).transpose()
}

fn as_string(value: &Value, name: &str) -> SchemaResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| type_error(name, "string", value))
}

fn as_number(value: &Value, name: &str) -> SchemaResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| type_error(name, "number", value))
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a type mismatch error.
fn type_error(field: &str, expected: &str, actual: &Value) -> SchemaError {
    SchemaError::validation_failed(ValidationDetails::type_mismatch(
        field,
        expected,
        json_type_name(actual),
    ))
}
