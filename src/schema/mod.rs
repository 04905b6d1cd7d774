//! Student record schema and request validation
//!
//! Validation is explicit: request bodies arrive as raw JSON and are turned
//! into typed values by the functions in `validator`, which report the first
//! offending field. Nothing invalid reaches storage.

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, ValidationDetails};
pub use types::{FeaturedStudent, NewStudent, RosterStudent, Student};
pub use validator::{
    parse_student_id, validate_new_student, validate_roster_student, MAX_AGE_EXCLUSIVE,
    NAME_MIN_LEN, ROSTER_MIN_AGE_EXCLUSIVE, ROSTER_NAME_MAX_LEN, STUDENT_MIN_AGE_EXCLUSIVE,
};
