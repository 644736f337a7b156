//! The storage engine: collections of JSON records under a root directory.
//!
//! On-disk layout:
//!
//! ```text
//! <root>/<collection>/<id>.json       one record per file
//! <root>/<collection>/<id>.json.tmp   only while a write is in flight
//! ```
//!
//! Writes, updates and deletes take the collection's lock; reads take none.
//! A write lands in a temporary sibling and is renamed into place, so readers
//! see either the complete record or nothing. An update removes the old file
//! and writes the merged record in place, so a concurrent reader may briefly
//! find the record missing (or, while the new file is being filled, cut
//! short). Nothing is coordinated across processes.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bdb_merge::merge_into;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::codec::{self, EXTENSION, ID_FIELD};
use crate::error::{StoreError, StoreResult};
use crate::id::RecordId;
use crate::locks::{acquire, CollectionLocks};
use crate::logger::Logger;
use crate::options::Options;
use crate::paths::{self, clean_path};

/// File-per-record document store rooted at a directory.
pub struct Driver {
    dir: PathBuf,
    locks: CollectionLocks,
    log: Arc<dyn Logger>,
}

impl Driver {
    /// Open the store at `dir`, creating the directory if it is absent.
    ///
    /// `options` of `None` installs a console logger at `Info`.
    pub fn new(dir: impl AsRef<Path>, options: Option<Options>) -> StoreResult<Self> {
        let dir = clean_path(dir.as_ref());
        let log = options.unwrap_or_default().into_logger();

        if dir.is_dir() {
            log.debug(format_args!(
                "Using '{}' (database already exists)",
                dir.display()
            ));
        } else {
            log.debug(format_args!(
                "Creating the database at '{}'...",
                dir.display()
            ));
            fs::create_dir_all(&dir)
                .map_err(|e| StoreError::io("create database directory", &dir, e))?;
        }

        Ok(Self {
            dir,
            locks: CollectionLocks::new(),
            log,
        })
    }

    /// The normalized root directory.
    pub fn root(&self) -> &Path {
        &self.dir
    }

    /// Store `value` as a new record in `collection` and return its id.
    ///
    /// The value must serialize to an object. Its `_id` field, if any, is
    /// replaced by the generated id.
    pub fn write<T: Serialize + ?Sized>(&self, collection: &str, value: &T) -> StoreResult<RecordId> {
        if collection.is_empty() {
            return Err(StoreError::MissingCollection);
        }
        paths::check_name(collection)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = acquire(&lock);

        let dir = self.dir.join(collection);
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::io("create collection directory", &dir, e))?;

        let mut record = codec::to_record(value)?;
        let id = RecordId::generate();
        record.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        let bytes = codec::encode(&record)?;

        let final_path = dir.join(format!("{id}.{EXTENSION}"));
        paths::write_atomic(&final_path, &bytes)?;

        self.log.trace(format_args!(
            "Wrote record {id} to {}",
            final_path.display()
        ));
        Ok(id)
    }

    /// Read record `id` from `collection` into `T`.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, id: &str) -> StoreResult<T> {
        self.log.debug(format_args!(
            "Reading record: {id} from collection: {collection}"
        ));

        if collection.is_empty() {
            return Err(StoreError::MissingCollection);
        }
        if id.is_empty() {
            return Err(StoreError::MissingResource);
        }
        paths::check_name(collection)?;
        paths::check_name(id)?;

        let path = self.locate(collection, id)?;
        self.log.debug(format_args!(
            "Reading record: {id} from path: {}",
            path.display()
        ));

        let bytes = read_record_file(&path)?;
        self.log.debug(format_args!(
            "Read bytes from file: {}",
            String::from_utf8_lossy(&bytes)
        ));

        let value = codec::decode_value(&bytes, &path)?;
        self.log.debug(format_args!("Unmarshalled record: {value}"));

        codec::from_value(value, &path)
    }

    /// Raw payloads of every record in `collection`.
    ///
    /// Order follows the directory listing and is not stable. The first
    /// unreadable file aborts the whole call.
    pub fn read_all(&self, collection: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .read_collection(collection)?
            .into_iter()
            .map(|(_, payload)| payload)
            .collect())
    }

    /// Every record in `collection`, decoded into `T`.
    pub fn read_all_as<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        self.read_collection(collection)?
            .into_iter()
            .map(|(path, payload)| {
                let value = codec::decode_value(payload.as_bytes(), &path)?;
                codec::from_value(value, &path)
            })
            .collect()
    }

    /// Merge `value` into record `id` of `collection`.
    ///
    /// Blank scalars in `value` (`null`, `0`, `""`, `false`) leave the stored
    /// field untouched, nested objects merge field by field and arrays
    /// replace the stored array. The record's `_id` cannot be changed.
    pub fn update<T: Serialize + ?Sized>(&self, collection: &str, id: &str, value: &T) -> StoreResult<()> {
        if collection.is_empty() {
            self.log.debug(format_args!("Collection is empty"));
            return Err(StoreError::MissingCollection);
        }
        if id.is_empty() {
            self.log.debug(format_args!("Resource is empty"));
            return Err(StoreError::MissingResource);
        }
        paths::check_name(collection)?;
        paths::check_name(id)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = acquire(&lock);

        let path = self.locate(collection, id).map_err(|e| {
            self.log.debug(format_args!("Resource does not exist ({e})"));
            e
        })?;

        let bytes = read_record_file(&path).map_err(|e| {
            self.log.debug(format_args!("Error reading file: {e}"));
            e
        })?;

        let mut existing = codec::decode_record(&bytes, &path).map_err(|e| {
            self.log.debug(format_args!("Error unmarshalling json: {e}"));
            e
        })?;

        let mut incoming = codec::to_record(value).map_err(|e| {
            self.log.debug(format_args!("Error converting data to map: {e}"));
            e
        })?;
        incoming.shift_remove(ID_FIELD);

        let stats = merge_into(&mut existing, &incoming);
        self.log.trace(format_args!(
            "Merged update into {}: {} inserted, {} replaced, {} unchanged",
            path.display(),
            stats.inserted,
            stats.replaced,
            stats.unchanged
        ));

        let bytes = codec::encode(&existing).map_err(|e| {
            self.log.debug(format_args!("Error marshalling json: {e}"));
            e
        })?;

        fs::remove_file(&path).map_err(|e| {
            self.log.debug(format_args!(
                "Error removing file: {} ({e})",
                path.display()
            ));
            StoreError::io("remove record", &path, e)
        })?;

        fs::write(&path, &bytes).map_err(|e| {
            self.log.debug(format_args!(
                "Error writing to file: {} ({e})",
                path.display()
            ));
            StoreError::io("write record", &path, e)
        })
    }

    /// Remove `resource` from `collection`.
    ///
    /// `resource` is resolved inside the collection directory: the exact name
    /// first, so nested directories can be reached, then the name with
    /// `.json`. A directory is removed recursively, anything else as a
    /// single file.
    pub fn delete(&self, collection: &str, resource: &str) -> StoreResult<()> {
        if collection.is_empty() {
            return Err(StoreError::MissingCollection);
        }
        if resource.is_empty() {
            return Err(StoreError::MissingResource);
        }
        paths::check_name(collection)?;
        paths::check_name(resource)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = acquire(&lock);

        let base = self.dir.join(collection).join(resource);
        let (path, meta) = paths::resolve(&base)?
            .ok_or(StoreError::RecordNotFound { path: base })?;

        let removed = if meta.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::RecordNotFound { path: path.clone() },
            _ => StoreError::io("remove record", &path, e),
        })?;

        self.log.trace(format_args!("Deleted {}", path.display()));
        Ok(())
    }

    /// Path of an existing record file. Only `<id>.json` is considered, so
    /// stray files and directories named like the id are never touched.
    fn locate(&self, collection: &str, id: &str) -> StoreResult<PathBuf> {
        let path = paths::record_path(&self.dir.join(collection), id);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(StoreError::RecordNotFound { path }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::RecordNotFound { path })
            }
            Err(e) => Err(StoreError::io("stat", &path, e)),
        }
    }

    fn read_collection(&self, collection: &str) -> StoreResult<Vec<(PathBuf, String)>> {
        if collection.is_empty() {
            return Err(StoreError::MissingCollection);
        }
        paths::check_name(collection)?;

        let dir = self.dir.join(collection);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::CollectionNotFound { path: dir });
            }
            Err(e) => return Err(StoreError::io("read collection directory", &dir, e)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io("read collection directory", &dir, e))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| StoreError::io("stat", &path, e))?;
            if file_type.is_dir() || paths::is_temp(&path) {
                continue;
            }
            let bytes = fs::read(&path).map_err(|e| StoreError::io("read record", &path, e))?;
            let payload = String::from_utf8(bytes).map_err(|e| StoreError::Deserialization {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            records.push((path, payload));
        }
        Ok(records)
    }
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("dir", &self.dir)
            .field("collections_locked", &self.locks.len())
            .finish()
    }
}

/// Read a record file, reporting a vanished file as not found.
fn read_record_file(path: &Path) -> StoreResult<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::RecordNotFound {
            path: path.to_path_buf(),
        },
        _ => StoreError::io("read record", path, e),
    })
}
