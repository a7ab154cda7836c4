//! Core record types for rollbook.
//!
//! This module defines the stored student record, its identifier, and the
//! raw form input that create and update operations validate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender options offered by the record form.
pub const GENDER_OPTIONS: [&str; 5] = [
    "Female",
    "Male",
    "Non-binary",
    "Other",
    "Prefer not to say",
];

/// Opaque unique identifier of a stored record.
///
/// Fresh identifiers are UUID v4 strings, but any string read back from
/// storage is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A stored student record.
///
/// Serialises with camelCase keys (`regNo`) so the persisted collection keeps
/// the same JSON shape regardless of which blob store holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Assigned at creation and never changed.
    pub id: RecordId,
    /// Student name.
    pub name: String,
    /// Registration number.
    pub reg_no: String,
    /// Department.
    pub dept: String,
    /// Age in years, always greater than zero.
    pub age: u32,
    /// Gender, usually one of [`GENDER_OPTIONS`].
    pub gender: String,
    /// Internal marks in `[0, 100]`. Older collections may omit it.
    #[serde(default)]
    pub marks: f64,
    /// Date of birth as entered (`YYYY-MM-DD` from a date picker), possibly
    /// empty.
    #[serde(default)]
    pub dob: String,
}

impl StudentRecord {
    /// Check whether this record has the given id.
    #[must_use]
    pub fn has_id(&self, id: &RecordId) -> bool {
        &self.id == id
    }
}

/// Raw form input for creating or updating a record.
///
/// Every field is the string exactly as typed; numeric coercion happens
/// during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordInput {
    /// Student name.
    pub name: String,
    /// Registration number.
    pub reg_no: String,
    /// Department.
    pub dept: String,
    /// Age, parsed as an integer.
    pub age: String,
    /// Selected gender.
    pub gender: String,
    /// Internal marks, parsed as a number.
    pub marks: String,
    /// Date of birth.
    pub dob: String,
}

impl RecordInput {
    /// Overlay the non-`None` fields of `patch` onto this input.
    #[must_use]
    pub fn merged(mut self, patch: InputPatch) -> Self {
        let InputPatch {
            name,
            reg_no,
            dept,
            age,
            gender,
            marks,
            dob,
        } = patch;
        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = reg_no {
            self.reg_no = v;
        }
        if let Some(v) = dept {
            self.dept = v;
        }
        if let Some(v) = age {
            self.age = v;
        }
        if let Some(v) = gender {
            self.gender = v;
        }
        if let Some(v) = marks {
            self.marks = v;
        }
        if let Some(v) = dob {
            self.dob = v;
        }
        self
    }
}

/// Form prefill for editing an existing record.
impl From<&StudentRecord> for RecordInput {
    fn from(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            reg_no: record.reg_no.clone(),
            dept: record.dept.clone(),
            age: record.age.to_string(),
            gender: record.gender.clone(),
            marks: record.marks.to_string(),
            dob: record.dob.clone(),
        }
    }
}

/// A partial set of form fields, as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputPatch {
    /// Student name.
    pub name: Option<String>,
    /// Registration number.
    pub reg_no: Option<String>,
    /// Department.
    pub dept: Option<String>,
    /// Age.
    pub age: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// Internal marks.
    pub marks: Option<String>,
    /// Date of birth.
    pub dob: Option<String>,
}
