//! Form validation for student records.
//!
//! Validation is a pure function of the raw form strings and the configured
//! [`Rules`]. It reports every failing field at once and hands back the coerced
//! numeric values so callers never parse twice.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use crate::record::{RecordInput, GENDER_OPTIONS};

/// Message for a missing required field.
pub const MSG_REQUIRED: &str = "Required";

/// Message for an age that is not a positive integer.
pub const MSG_INVALID_AGE: &str = "Enter a valid age";

/// Message for marks outside the accepted range.
pub const MSG_MARKS_RANGE: &str = "0 - 100 only";

/// Message for a registration number that fails the configured pattern.
pub const MSG_REG_NO_FORMAT: &str = "Does not match the expected format";

/// Message for a gender outside [`GENDER_OPTIONS`] when options are enforced.
pub const MSG_GENDER_OPTION: &str = "Select one of the listed options";

/// Lowest accepted marks value.
pub const MARKS_MIN: f64 = 0.0;

/// Highest accepted marks value.
pub const MARKS_MAX: f64 = 100.0;

/// A named form field, ordered as the form presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Student name.
    Name,
    /// Registration number.
    RegNo,
    /// Department.
    Dept,
    /// Age.
    Age,
    /// Date of birth.
    Dob,
    /// Internal marks.
    Marks,
    /// Gender.
    Gender,
}

impl Field {
    /// The field's name as it appears in stored JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::RegNo => "regNo",
            Self::Dept => "dept",
            Self::Age => "age",
            Self::Dob => "dob",
            Self::Marks => "marks",
            Self::Gender => "gender",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name to error message, one entry per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Record an error for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Check whether `field` failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// True when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Extra rules layered on top of the required-field checks.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    /// Registration numbers must fully match this pattern when set.
    pub reg_no_pattern: Option<Regex>,
    /// Restrict gender to [`GENDER_OPTIONS`].
    pub restrict_gender: bool,
}

/// Outcome of validating one form submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    /// Every failing field.
    pub errors: FieldErrors,
    /// Age coerced to an integer, when it parsed.
    pub age: Option<u32>,
    /// Marks coerced to a number, when it parsed.
    pub marks: Option<f64>,
}

impl Validation {
    /// True when the input may be written.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate raw form input.
///
/// Text fields must be non-empty after trimming. Age must parse to an integer
/// greater than zero; marks must parse to a number in `[0, 100]`.
#[must_use]
pub fn validate(input: &RecordInput, rules: &Rules) -> Validation {
    let mut errors = FieldErrors::default();

    require(&mut errors, Field::Name, &input.name);
    if require(&mut errors, Field::RegNo, &input.reg_no) {
        if let Some(pattern) = &rules.reg_no_pattern {
            if !full_match(pattern, input.reg_no.trim()) {
                errors.insert(Field::RegNo, MSG_REG_NO_FORMAT);
            }
        }
    }
    require(&mut errors, Field::Dept, &input.dept);

    let age = parse_age(&input.age);
    if input.age.trim().is_empty() {
        errors.insert(Field::Age, MSG_REQUIRED);
    } else if age.is_none() {
        errors.insert(Field::Age, MSG_INVALID_AGE);
    }

    let marks = parse_marks(&input.marks);
    if input.marks.trim().is_empty() {
        errors.insert(Field::Marks, MSG_REQUIRED);
    } else if marks.is_none() {
        errors.insert(Field::Marks, MSG_MARKS_RANGE);
    }

    if require(&mut errors, Field::Gender, &input.gender)
        && rules.restrict_gender
        && !GENDER_OPTIONS.contains(&input.gender.as_str())
    {
        errors.insert(Field::Gender, MSG_GENDER_OPTION);
    }
    require(&mut errors, Field::Dob, &input.dob);

    Validation {
        errors,
        age,
        marks,
    }
}

/// Flag `field` as required when blank. Returns whether the value is present.
fn require(errors: &mut FieldErrors, field: Field, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, MSG_REQUIRED);
        false
    } else {
        true
    }
}

fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

fn parse_marks(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|marks| (MARKS_MIN..=MARKS_MAX).contains(marks))
        // Turns `-0` into `0`.
        .map(|marks| marks + 0.0)
}

fn full_match(pattern: &Regex, value: &str) -> bool {
    pattern
        .find(value)
        .is_some_and(|m| m.start() == 0 && m.end() == value.len())
}
