//! Fallback records used when nothing usable is persisted.

use crate::record::{RecordId, StudentRecord};

struct SeedRow {
    name: &'static str,
    reg_no: &'static str,
    dept: &'static str,
    age: u32,
    gender: &'static str,
    marks: f64,
    dob: &'static str,
}

const SEED_ROWS: [SeedRow; 2] = [
    SeedRow {
        name: "Ava Thomas",
        reg_no: "REG1023",
        dept: "Computer Science",
        age: 20,
        gender: "Female",
        marks: 86.0,
        dob: "2004-06-12",
    },
    SeedRow {
        name: "Liam Patel",
        reg_no: "REG1044",
        dept: "Mechanical Eng",
        age: 22,
        gender: "Male",
        marks: 78.0,
        dob: "2002-03-28",
    },
];

/// The seed dataset with freshly generated ids.
#[must_use]
pub fn records() -> Vec<StudentRecord> {
    SEED_ROWS
        .iter()
        .map(|row| StudentRecord {
            id: RecordId::generate(),
            name: row.name.to_string(),
            reg_no: row.reg_no.to_string(),
            dept: row.dept.to_string(),
            age: row.age,
            gender: row.gender.to_string(),
            marks: row.marks,
            dob: row.dob.to_string(),
        })
        .collect()
}
