//! File-per-record JSON document store.
//!
//! A [`Driver`] owns a root directory. Each collection is a subdirectory and
//! each record is one pretty-printed JSON file named after its generated
//! [`RecordId`]. It is meant to be embedded in a single process that needs
//! simple persistent CRUD without a database server.
//!
//! # Guarantees
//!
//! 1. Writes, updates and deletes on the same collection are serialized by a
//!    per-collection lock; different collections proceed in parallel.
//! 2. New records appear atomically (write to `<id>.json.tmp`, then rename).
//! 3. Every stored record carries its own id in the `_id` field.
//! 4. Updates deep-merge into the stored record (see [`bdb_merge`]).
//! 5. Reads take no lock and may race with updates and deletes.
//! 6. Nothing is coordinated across processes sharing a root directory.
//! 7. Collection and record names must be plain relative paths, so every
//!    operation stays under the root.
//!
//! # Modules
//!
//! - [`driver`] -- The storage engine
//! - [`codec`] -- Canonical mapping form and on-disk encoding
//! - [`locks`] -- Per-collection lock registry
//! - [`id`] -- Record identifier generation
//! - [`logger`] -- Pluggable diagnostic sink
//! - [`options`] -- Driver construction options
//! - [`paths`] -- Path normalization and record resolution
//! - [`error`] -- Error taxonomy

pub mod codec;
pub mod driver;
pub mod error;
pub mod id;
pub mod locks;
pub mod logger;
pub mod options;
pub mod paths;

pub use codec::{Record, EXTENSION, ID_FIELD};
pub use driver::Driver;
pub use error::{StoreError, StoreResult};
pub use id::RecordId;
pub use locks::CollectionLocks;
pub use logger::{Logger, Severity, TracingLogger};
pub use options::Options;
