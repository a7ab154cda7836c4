//! The record store.
//!
//! [`RecordStore`] owns the ordered collection of student records and mirrors
//! it, whole, into a [`BlobStore`] after every mutation. Reads from the blob
//! store never fail outward: a missing or unreadable value is replaced by the
//! seed dataset, after copying anything unreadable to a backup key.

pub mod seed;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::blob::BlobStore;
use crate::error::{Error, Result};
use crate::record::{RecordId, RecordInput, StudentRecord};
use crate::validate::{self, Rules, Validation};

/// Where the in-memory collection came from at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Deserialized from the blob store.
    Stored,
    /// Nothing was stored under the key; seeded.
    Missing,
    /// Some stored records could not be decoded and were left out.
    Partial {
        /// Number of records left out.
        skipped: usize,
    },
    /// The stored value could not be read or parsed; seeded.
    Unreadable,
}

impl LoadSource {
    /// True when the seed dataset was substituted.
    #[must_use]
    pub fn is_seeded(self) -> bool {
        matches!(self, Self::Missing | Self::Unreadable)
    }
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stored => write!(f, "stored"),
            Self::Missing => write!(f, "seeded (nothing stored)"),
            Self::Partial { skipped } => write!(f, "stored ({skipped} unreadable records skipped)"),
            Self::Unreadable => write!(f, "seeded (stored value unreadable)"),
        }
    }
}

/// Ordered collection of student records mirrored to a blob store.
#[derive(Debug)]
pub struct RecordStore<S> {
    blob: S,
    key: String,
    records: Vec<StudentRecord>,
    rules: Rules,
    source: LoadSource,
    synced: bool,
}

impl<S: BlobStore> RecordStore<S> {
    /// Load the collection stored under `key`.
    ///
    /// A missing or blank value is replaced by the seed dataset, which is then
    /// written back. Stored records that do not decode are skipped; if none
    /// decode, or the value is not a JSON array, the seed is used instead. In
    /// both cases the stored value is first copied to [`backup_key`] and is
    /// only overwritten once that copy succeeds.
    pub fn load(blob: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let raw = match blob.get(&key) {
            Ok(raw) => raw.filter(|value| !value.trim().is_empty()),
            Err(e) => {
                // Nothing to keep, and nothing safe to overwrite.
                warn!("Failed to read records under '{}': {}", key, e);
                return Self::from_parts(blob, key, seed::records(), LoadSource::Unreadable);
            }
        };

        let Some(raw) = raw else {
            info!("No records stored under '{}', using seed data", key);
            let mut store = Self::from_parts(blob, key, seed::records(), LoadSource::Missing);
            store.sync();
            return store;
        };

        let (records, source) = match decode_collection(&raw) {
            Ok((records, 0)) => (records, LoadSource::Stored),
            Ok((records, skipped)) if !records.is_empty() => {
                warn!(
                    "Skipped {} unreadable records under '{}', kept {}",
                    skipped,
                    key,
                    records.len()
                );
                (records, LoadSource::Partial { skipped })
            }
            Ok((_, skipped)) => {
                warn!("None of the {} records under '{}' could be read", skipped, key);
                (seed::records(), LoadSource::Unreadable)
            }
            Err(e) => {
                warn!("Failed to parse records under '{}': {}", key, e);
                (seed::records(), LoadSource::Unreadable)
            }
        };

        let mut store = Self::from_parts(blob, key, records, source);
        match source {
            LoadSource::Stored => {
                warn_on_duplicate_ids(&store.records);
                debug!(
                    "Loaded {} records from {} store",
                    store.records.len(),
                    store.blob.name()
                );
            }
            LoadSource::Partial { .. } => {
                warn_on_duplicate_ids(&store.records);
                store.back_up(&raw);
            }
            LoadSource::Unreadable => {
                if store.back_up(&raw) {
                    store.sync();
                }
            }
            LoadSource::Missing => {}
        }
        store
    }

    fn from_parts(blob: S, key: String, records: Vec<StudentRecord>, source: LoadSource) -> Self {
        Self {
            blob,
            key,
            records,
            rules: Rules::default(),
            source,
            synced: true,
        }
    }

    /// Replace the validation rules applied by [`validate`](Self::validate).
    #[must_use]
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Validate form input against this store's rules.
    #[must_use]
    pub fn validate(&self, input: &RecordInput) -> Validation {
        validate::validate(input, &self.rules)
    }

    /// Append a new record built from `input`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the input fails validation; the
    /// collection is left untouched.
    pub fn create(&mut self, input: &RecordInput) -> Result<StudentRecord> {
        let (age, marks) = self.accept(input)?;

        let mut id = RecordId::generate();
        while self.get(&id).is_some() {
            id = RecordId::generate();
        }

        let record = build_record(id, input, age, marks);
        self.records.push(record.clone());
        info!("Created record {} ({})", record.id, record.reg_no);
        self.sync();
        Ok(record)
    }

    /// Replace every field of the record `id` except the id itself.
    ///
    /// Returns `Ok(None)` without writing anything if no record has `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the input fails validation. Validation
    /// runs before the id is looked up.
    pub fn update(&mut self, id: &RecordId, input: &RecordInput) -> Result<Option<StudentRecord>> {
        let (age, marks) = self.accept(input)?;

        let Some(slot) = self.records.iter_mut().find(|r| r.has_id(id)) else {
            debug!("Update skipped, no record with id {}", id);
            return Ok(None);
        };

        *slot = build_record(id.clone(), input, age, marks);
        let updated = slot.clone();
        info!("Updated record {}", id);
        self.sync();
        Ok(Some(updated))
    }

    /// Remove the record `id`. Returns `true` if one was removed.
    ///
    /// Deleting an unknown id changes nothing and writes nothing.
    pub fn delete(&mut self, id: &RecordId) -> bool {
        let Some(index) = self.records.iter().position(|r| r.has_id(id)) else {
            debug!("Delete skipped, no record with id {}", id);
            return false;
        };

        self.records.remove(index);
        info!("Deleted record {}", id);
        self.sync();
        true
    }

    /// The collection in insertion order.
    #[must_use]
    pub fn list(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.has_id(id))
    }

    /// Form prefill for editing the record `id`.
    #[must_use]
    pub fn edit_form(&self, id: &RecordId) -> Option<RecordInput> {
        self.get(id).map(RecordInput::from)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop the persisted collection and start over from the seed dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob store cannot be written.
    pub fn reset(&mut self) -> Result<()> {
        self.blob.remove(&self.key)?;
        self.records = seed::records();
        self.source = LoadSource::Missing;
        info!("Reset records under '{}' to seed data", self.key);
        self.flush()
    }

    /// Write the collection now, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the blob write fails.
    pub fn flush(&mut self) -> Result<()> {
        let result = self.write();
        self.synced = result.is_ok();
        result
    }

    /// True when the last write reached the blob store.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// How the collection was obtained at load time.
    #[must_use]
    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// The blob key holding the collection.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying blob store.
    #[must_use]
    pub fn blob(&self) -> &S {
        &self.blob
    }

    /// When the collection was last written, if the backend tracks it.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob store cannot be read.
    pub fn last_written(&self) -> Result<Option<DateTime<Utc>>> {
        self.blob.updated_at(&self.key)
    }

    /// Give back the underlying blob store.
    #[must_use]
    pub fn into_blob(self) -> S {
        self.blob
    }

    /// Copy the stored value aside before anything replaces it.
    fn back_up(&mut self, raw: &str) -> bool {
        let backup = backup_key(&self.key);
        match self.blob.set(&backup, raw) {
            Ok(()) => {
                warn!("Kept the previous value of '{}' under '{}'", self.key, backup);
                true
            }
            Err(e) => {
                warn!("Failed to back up '{}' to '{}': {}", self.key, backup, e);
                false
            }
        }
    }

    fn accept(&self, input: &RecordInput) -> Result<(u32, f64)> {
        let Validation {
            errors,
            age,
            marks,
        } = self.validate(input);
        match (age, marks) {
            (Some(age), Some(marks)) if errors.is_empty() => Ok((age, marks)),
            _ => {
                debug!("Rejected input: {}", errors);
                Err(Error::Validation(errors))
            }
        }
    }

    /// Write the collection, masking failure behind the unsynced flag.
    fn sync(&mut self) {
        if let Err(e) = self.flush() {
            warn!(
                "Failed to persist {} records under '{}': {}",
                self.records.len(),
                self.key,
                e
            );
        }
    }

    fn write(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        self.blob.set(&self.key, &json)?;
        debug!(
            "Persisted {} records to {} store",
            self.records.len(),
            self.blob.name()
        );
        Ok(())
    }
}

/// The key a partly or wholly unreadable collection is copied to.
#[must_use]
pub fn backup_key(key: &str) -> String {
    format!("{key}.bak")
}

/// Decode a stored array record by record, counting the ones that fail.
fn decode_collection(raw: &str) -> Result<(Vec<StudentRecord>, usize)> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut records = Vec::with_capacity(values.len());
    let mut skipped = 0;
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!("Stored record {} is unreadable: {}", index, e);
                skipped += 1;
            }
        }
    }
    Ok((records, skipped))
}

fn warn_on_duplicate_ids(records: &[StudentRecord]) {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(&record.id) {
            warn!("Stored collection repeats record id {}", record.id);
        }
    }
}

fn build_record(id: RecordId, input: &RecordInput, age: u32, marks: f64) -> StudentRecord {
    StudentRecord {
        id,
        name: input.name.trim().to_string(),
        reg_no: input.reg_no.trim().to_string(),
        dept: input.dept.trim().to_string(),
        age,
        gender: input.gender.trim().to_string(),
        marks,
        dob: input.dob.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;
    use crate::validate::{Field, MSG_INVALID_AGE};

    const KEY: &str = "student-records";

    /// Blob store whose reads and/or writes always fail.
    #[derive(Debug, Default)]
    struct BrokenBlobStore {
        value: Option<String>,
        fail_reads: bool,
        fail_writes: bool,
        writes: usize,
    }

    impl BlobStore for BrokenBlobStore {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn get(&self, _key: &str) -> Result<Option<String>> {
            if self.fail_reads {
                return Err(std::io::Error::other("read refused").into());
            }
            Ok(self.value.clone())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            self.writes += 1;
            if self.fail_writes {
                return Err(std::io::Error::other("quota exceeded").into());
            }
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> Result<bool> {
            Ok(false)
        }
    }

    fn input(name: &str, reg_no: &str) -> RecordInput {
        RecordInput {
            name: name.to_string(),
            reg_no: reg_no.to_string(),
            dept: "CS".to_string(),
            age: "20".to_string(),
            gender: "Male".to_string(),
            marks: "90".to_string(),
            dob: "2000-01-01".to_string(),
        }
    }

    fn empty_store() -> RecordStore<MemoryBlobStore> {
        RecordStore::load(MemoryBlobStore::with_entry(KEY, "[]"), KEY)
    }

    fn reload(store: RecordStore<MemoryBlobStore>) -> RecordStore<MemoryBlobStore> {
        RecordStore::load(store.into_blob(), KEY)
    }

    fn stored_json(store: &RecordStore<MemoryBlobStore>) -> String {
        store.blob().get(KEY).unwrap().expect("collection persisted")
    }

    fn without_ids(records: &[StudentRecord]) -> Vec<(String, String, u32)> {
        records
            .iter()
            .map(|r| (r.name.clone(), r.reg_no.clone(), r.age))
            .collect()
    }

    #[test]
    fn test_load_empty_store_uses_seed() {
        let store = RecordStore::load(MemoryBlobStore::new(), KEY);

        assert_eq!(store.source(), LoadSource::Missing);
        assert_eq!(without_ids(store.list()), without_ids(&seed::records()));
    }

    #[test]
    fn test_seed_is_written_back() {
        let store = RecordStore::load(MemoryBlobStore::new(), KEY);
        let persisted: Vec<StudentRecord> = serde_json::from_str(&stored_json(&store)).unwrap();
        assert_eq!(persisted, store.list());
    }

    #[test]
    fn test_load_blank_value_uses_seed() {
        let store = RecordStore::load(MemoryBlobStore::with_entry(KEY, "  "), KEY);
        assert_eq!(store.source(), LoadSource::Missing);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_corrupt_value_uses_seed() {
        let store = RecordStore::load(MemoryBlobStore::with_entry(KEY, "{not json"), KEY);
        assert_eq!(store.source(), LoadSource::Unreadable);
        assert_eq!(without_ids(store.list()), without_ids(&seed::records()));
    }

    #[test]
    fn test_load_wrong_shape_uses_seed() {
        let store = RecordStore::load(
            MemoryBlobStore::with_entry(KEY, r#"[{"id":"x","name":"A"}]"#),
            KEY,
        );
        assert_eq!(store.source(), LoadSource::Unreadable);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_corrupt_value_is_backed_up() {
        let store = RecordStore::load(MemoryBlobStore::with_entry(KEY, "{not json"), KEY);

        let backup = store.blob().get(&backup_key(KEY)).unwrap();
        assert_eq!(backup.as_deref(), Some("{not json"));
        let persisted: Vec<StudentRecord> = serde_json::from_str(&stored_json(&store)).unwrap();
        assert_eq!(persisted, store.list());
    }

    #[test]
    fn test_load_keeps_decodable_records() {
        let stored = r#"[
            {"id":"a","name":"Kept","regNo":"R1","dept":"CS","age":20,"gender":"Male"},
            {"id":"b","name":"Odd","regNo":"R2","dept":"CS","age":20.5,"gender":"Male",
             "marks":50,"dob":""},
            {"id":"c","name":"Liam","regNo":"R3","dept":"ME","age":22,"gender":"Male",
             "marks":78,"dob":"2002-03-28"}
        ]"#;
        let store = RecordStore::load(MemoryBlobStore::with_entry(KEY, stored), KEY);

        assert_eq!(store.source(), LoadSource::Partial { skipped: 1 });
        assert!(!store.source().is_seeded());
        let names: Vec<&str> = store.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Kept", "Liam"]);
        assert_eq!(store.list()[0].dob, "");

        // Loading alone leaves the stored value as it was.
        assert_eq!(stored_json(&store), stored);
        let backup = store.blob().get(&backup_key(KEY)).unwrap();
        assert_eq!(backup.as_deref(), Some(stored));
    }

    #[test]
    fn test_load_does_not_overwrite_without_backup() {
        let blob = BrokenBlobStore {
            value: Some("{not json".to_string()),
            fail_writes: true,
            ..BrokenBlobStore::default()
        };
        let store = RecordStore::load(blob, KEY);

        assert_eq!(store.source(), LoadSource::Unreadable);
        assert_eq!(store.len(), 2);
        // Only the backup was attempted.
        assert_eq!(store.blob().writes, 1);
    }

    #[test]
    fn test_load_read_failure_uses_seed() {
        let blob = BrokenBlobStore {
            fail_reads: true,
            ..BrokenBlobStore::default()
        };
        let store = RecordStore::load(blob, KEY);
        assert_eq!(store.source(), LoadSource::Unreadable);
        assert_eq!(store.len(), 2);
        assert!(store.is_synced());
    }

    #[test]
    fn test_load_empty_array_is_not_seeded() {
        let store = empty_store();
        assert_eq!(store.source(), LoadSource::Stored);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_appends_with_coerced_numbers() {
        let mut store = empty_store();
        let record = store.create(&input("A", "R1")).unwrap();

        assert_eq!(record.age, 20);
        assert!((record.marks - 90.0).abs() < f64::EPSILON);
        assert_eq!(record.dob, "2000-01-01");
        assert_eq!(store.list().last(), Some(&record));
    }

    #[test]
    fn test_create_adds_exactly_one_with_fresh_id() {
        let mut store = RecordStore::load(MemoryBlobStore::new(), KEY);
        let before: Vec<RecordId> = store.list().iter().map(|r| r.id.clone()).collect();

        let record = store.create(&input("A", "R1")).unwrap();

        assert_eq!(store.len(), before.len() + 1);
        assert!(!before.contains(&record.id));
    }

    #[test]
    fn test_create_invalid_age_does_not_mutate() {
        let mut store = empty_store();
        let mut bad = input("A", "R1");
        bad.age = "-5".to_string();

        let err = store.create(&bad).unwrap_err();

        assert_eq!(
            err.field_errors().and_then(|e| e.get(Field::Age)),
            Some(MSG_INVALID_AGE)
        );
        assert!(store.is_empty());
        assert_eq!(stored_json(&store), "[]");
    }

    #[test]
    fn test_create_trims_text_fields() {
        let mut store = empty_store();
        let record = store.create(&input("  Ada  ", " R9 ")).unwrap();
        assert_eq!(record.name, "Ada");
        assert_eq!(record.reg_no, "R9");
    }

    #[test]
    fn test_create_persists() {
        let mut store = empty_store();
        store.create(&input("A", "R1")).unwrap();

        let reloaded = reload(store);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.list()[0].name, "A");
    }

    #[test]
    fn test_update_preserves_id_position_and_length() {
        let mut store = empty_store();
        let first = store.create(&input("A", "R1")).unwrap();
        let second = store.create(&input("B", "R2")).unwrap();
        let third = store.create(&input("C", "R3")).unwrap();

        let mut changed = input("Bee", "R2-b");
        changed.marks = "100".to_string();
        let updated = store.update(&second.id, &changed).unwrap().unwrap();

        assert_eq!(updated.id, second.id);
        assert_eq!(updated.name, "Bee");
        assert_eq!(store.len(), 3);
        assert_eq!(store.list()[0], first);
        assert_eq!(store.list()[1], updated);
        assert_eq!(store.list()[2], third);
    }

    #[test]
    fn test_update_persists() {
        let mut store = empty_store();
        let record = store.create(&input("A", "R1")).unwrap();
        store.update(&record.id, &input("Z", "R1")).unwrap();

        let reloaded = reload(store);
        assert_eq!(reloaded.get(&record.id).unwrap().name, "Z");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = empty_store();
        store.create(&input("A", "R1")).unwrap();
        let before = stored_json(&store);

        let result = store.update(&RecordId::from("missing"), &input("B", "R2"));

        assert!(matches!(result, Ok(None)));
        assert_eq!(store.len(), 1);
        assert_eq!(stored_json(&store), before);
    }

    #[test]
    fn test_update_invalid_input_is_rejected_first() {
        let mut store = empty_store();
        let record = store.create(&input("A", "R1")).unwrap();
        let mut bad = input("A", "R1");
        bad.marks = "101".to_string();

        assert!(store.update(&record.id, &bad).unwrap_err().is_validation());
        assert!(store
            .update(&RecordId::from("missing"), &bad)
            .unwrap_err()
            .is_validation());
        assert_eq!(store.get(&record.id), Some(&record));
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = empty_store();
        let a = store.create(&input("A", "R1")).unwrap();
        let b = store.create(&input("B", "R2")).unwrap();

        assert!(store.delete(&a.id));
        assert_eq!(store.list(), &[b]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = empty_store();
        let a = store.create(&input("A", "R1")).unwrap();

        assert!(store.delete(&a.id));
        assert!(!store.delete(&a.id));
        assert!(!store.delete(&RecordId::from("never-existed")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_persists() {
        let mut store = RecordStore::load(MemoryBlobStore::new(), KEY);
        let first = store.list()[0].id.clone();
        store.delete(&first);

        let reloaded = reload(store);
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get(&first).is_none());
    }

    #[test]
    fn test_round_trip_preserves_order_and_values() {
        let mut store = RecordStore::load(MemoryBlobStore::new(), KEY);
        store.create(&input("A", "R1")).unwrap();
        let mut fractional = input("B", "R2");
        fractional.marks = "72.25".to_string();
        store.create(&fractional).unwrap();
        let snapshot = store.list().to_vec();

        let reloaded = reload(store);
        assert_eq!(reloaded.source(), LoadSource::Stored);
        assert_eq!(reloaded.list(), snapshot.as_slice());
    }

    #[test]
    fn test_edit_form_prefills_current_values() {
        let mut store = empty_store();
        let record = store.create(&input("A", "R1")).unwrap();

        let form = store.edit_form(&record.id).unwrap();
        assert_eq!(form, input("A", "R1"));
        assert!(store.edit_form(&RecordId::from("missing")).is_none());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_change() {
        let blob = BrokenBlobStore {
            fail_writes: true,
            ..BrokenBlobStore::default()
        };
        let mut store = RecordStore::load(blob, KEY);
        assert!(!store.is_synced());

        let record = store.create(&input("A", "R1")).unwrap();

        assert!(!store.is_synced());
        assert_eq!(store.list().last(), Some(&record));
        assert!(store.flush().is_err());
    }

    #[test]
    fn test_flush_restores_sync_flag() {
        let blob = BrokenBlobStore {
            fail_writes: true,
            ..BrokenBlobStore::default()
        };
        let mut store = RecordStore::load(blob, KEY);
        assert!(!store.is_synced());

        let mut blob = store.into_blob();
        blob.fail_writes = false;
        let mut store = RecordStore::load(blob, KEY);
        assert!(store.flush().is_ok());
        assert!(store.is_synced());
    }

    #[test]
    fn test_noop_operations_do_not_write() {
        let mut store = RecordStore::load(BrokenBlobStore::default(), KEY);
        let writes_after_load = store.blob().writes;

        store.delete(&RecordId::from("missing"));
        store
            .update(&RecordId::from("missing"), &input("A", "R1"))
            .unwrap();

        assert_eq!(store.blob().writes, writes_after_load);
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut store = empty_store();
        store.create(&input("A", "R1")).unwrap();

        store.reset().unwrap();

        assert_eq!(store.source(), LoadSource::Missing);
        assert_eq!(without_ids(store.list()), without_ids(&seed::records()));
        let reloaded = reload(store);
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_rules_are_applied() {
        let rules = Rules {
            restrict_gender: true,
            ..Rules::default()
        };
        let mut store = empty_store().with_rules(rules);
        let mut odd = input("A", "R1");
        odd.gender = "Robot".to_string();

        assert!(store.create(&odd).unwrap_err().is_validation());
        assert!(store.validate(&input("A", "R1")).is_valid());
    }

    #[test]
    fn test_load_source_display() {
        assert_eq!(LoadSource::Stored.to_string(), "stored");
        assert!(LoadSource::Unreadable.is_seeded());
        assert_eq!(
            LoadSource::Partial { skipped: 2 }.to_string(),
            "stored (2 unreadable records skipped)"
        );
        assert!(!LoadSource::Stored.is_seeded());
    }
}
