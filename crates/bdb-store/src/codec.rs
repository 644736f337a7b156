//! Record codec: canonical mapping form and on-disk bytes.
//!
//! Any `Serialize` value is normalized by serializing it into a JSON value
//! and requiring a top-level object. Field names and order are therefore
//! exactly what the final encoding would produce. The bytes on disk are the
//! object pretty-printed with tab indentation plus a trailing newline.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// Field injected into every stored record holding its own id.
pub const ID_FIELD: &str = "_id";

/// Extension of record files.
pub const EXTENSION: &str = "json";

/// Canonical mapping form of a record.
pub type Record = Map<String, Value>;

/// Convert any serializable value into its canonical mapping form.
pub fn to_record<T: Serialize + ?Sized>(value: &T) -> StoreResult<Record> {
    let value = serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::NotAMapping {
            found: kind_name(&other),
        }),
    }
}

/// Encode a record as pretty-printed, tab-indented, newline-terminated JSON.
pub fn encode(record: &Record) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    record
        .serialize(&mut ser)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Parse stored bytes into a generic JSON value.
pub fn decode_value(bytes: &[u8], path: &Path) -> StoreResult<Value> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Deserialization {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse stored bytes into the canonical mapping form.
pub fn decode_record(bytes: &[u8], path: &Path) -> StoreResult<Record> {
    match decode_value(bytes, path)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Deserialization {
            path: path.to_path_buf(),
            reason: format!("expected an object, found {}", kind_name(&other)),
        }),
    }
}

/// Convert a decoded value into the caller's type.
pub fn from_value<T: DeserializeOwned>(value: Value, path: &Path) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|e| StoreError::Deserialization {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
