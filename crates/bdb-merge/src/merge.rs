//! Recursive field-wise merge of an incoming object into an existing one.
//!
//! For every field of the incoming object, in order:
//!
//! 1. absent or `null` in the existing object: the incoming value is taken.
//! 2. incoming is a non-blank scalar that differs: the incoming value is taken.
//! 3. incoming is an array that differs: the array is replaced wholesale.
//!    Elements are never merged pairwise.
//! 4. both sides are objects: recurse.
//! 5. anything else (a blank scalar, or an object meeting a non-object) leaves
//!    the existing value untouched.

use serde_json::{Map, Value};

use crate::value::{is_blank, is_scalar};

/// Counters describing what a merge did to the existing object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Fields that were absent from the existing side and got added.
    pub inserted: usize,
    /// Fields whose existing value was overwritten.
    pub replaced: usize,
    /// Fields left as they were.
    pub unchanged: usize,
}

impl MergeStats {
    /// `true` if the merge modified the existing object.
    pub fn changed(&self) -> bool {
        self.inserted + self.replaced > 0
    }
}

/// Merge `incoming` into `existing` in place.
pub fn merge_into(existing: &mut Map<String, Value>, incoming: &Map<String, Value>) -> MergeStats {
    let mut stats = MergeStats::default();
    merge_level(existing, incoming, &mut stats);
    stats
}

/// Owned variant of [`merge_into`] returning the merged object.
pub fn merged(mut existing: Map<String, Value>, incoming: &Map<String, Value>) -> Map<String, Value> {
    merge_into(&mut existing, incoming);
    existing
}

fn merge_level(
    existing: &mut Map<String, Value>,
    incoming: &Map<String, Value>,
    stats: &mut MergeStats,
) {
    for (key, new) in incoming {
        let Some(current) = existing.get_mut(key) else {
            existing.insert(key.clone(), new.clone());
            stats.inserted += 1;
            continue;
        };

        if current.is_null() {
            *current = new.clone();
            stats.replaced += 1;
        } else if is_scalar(new) && !is_blank(new) && *current != *new {
            *current = new.clone();
            stats.replaced += 1;
        } else if new.is_array() && *current != *new {
            *current = new.clone();
            stats.replaced += 1;
        } else if let (Value::Object(inner_new), Value::Object(inner_current)) = (new, current) {
            merge_level(inner_current, inner_new, stats);
        } else {
            stats.unchanged += 1;
        }
    }
}
