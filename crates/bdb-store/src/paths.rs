use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::codec::EXTENSION;
use crate::error::{StoreError, StoreResult};

const TEMP_SUFFIX: &str = "tmp";

/// Lexically normalize a path.
///
/// `.` segments and repeated separators disappear, `..` removes the previous
/// normal segment where there is one, and an empty result becomes `.`.
/// The filesystem is not consulted.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Reject a collection or record name that is not a plain relative path.
///
/// Only normal segments are allowed, so `dir.join(name)` always stays under
/// `dir`. Absolute paths, drive prefixes, `..` and `.` are refused.
pub fn check_name(name: &str) -> StoreResult<()> {
    let plain = Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if plain {
        Ok(())
    } else {
        Err(StoreError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// File holding record `id` inside `dir`: `<id>.json`, or `id` as given when
/// it already carries the extension.
pub fn record_path(dir: &Path, id: &str) -> PathBuf {
    if Path::new(id).extension().is_some_and(|e| e == EXTENSION) {
        dir.join(id)
    } else {
        dir.join(format!("{id}.{EXTENSION}"))
    }
}

/// `path` with `.json` appended to its final segment.
pub fn with_extension(path: &Path) -> PathBuf {
    append(path, EXTENSION)
}

/// Sibling used while a record is being written: `<path>.tmp`.
pub fn temp_path(path: &Path) -> PathBuf {
    append(path, TEMP_SUFFIX)
}

/// Whether a directory entry is an in-flight temporary file.
pub fn is_temp(path: &Path) -> bool {
    path.extension().map(|e| e == TEMP_SUFFIX).unwrap_or(false)
}

/// Write `bytes` to a `.tmp` sibling and rename it over `path`.
///
/// The temporary file is removed again if either step fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let temp = temp_path(path);
    if let Err(e) = fs::write(&temp, bytes) {
        let _ = fs::remove_file(&temp);
        return Err(StoreError::io("write temporary record", &temp, e));
    }
    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(StoreError::io("rename record into place", path, e));
    }
    Ok(())
}

/// Find an entry on disk, trying the exact path first and then the path
/// with the record extension. Returns `None` when neither exists.
pub fn resolve(base: &Path) -> StoreResult<Option<(PathBuf, Metadata)>> {
    if let Some(meta) = stat(base)? {
        return Ok(Some((base.to_path_buf(), meta)));
    }
    let with_ext = with_extension(base);
    Ok(stat(&with_ext)?.map(|meta| (with_ext, meta)))
}

fn stat(path: &Path) -> StoreResult<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io("stat", path, e)),
    }
}

fn append(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
