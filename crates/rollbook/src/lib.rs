//! `rollbook` - Student record keeping backed by a key-value blob store
//!
//! This library provides the record store, its form validation, and the
//! blob store backends the collection is persisted to.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod blob;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod store;
pub mod validate;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore, SqliteBlobStore};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{RecordId, RecordInput, StudentRecord};
pub use store::{LoadSource, RecordStore};
pub use validate::{validate, Field, FieldErrors, Rules, Validation};
