//! Deep merge engine for bdb records.
//!
//! A partial update arrives as a JSON object and is folded into the stored
//! record field by field. Nested objects are merged recursively, arrays are
//! replaced wholesale, and "blank" inputs never overwrite a value that is
//! already present.
//!
//! # Blank values
//!
//! `null`, `0`, `0.0`, `""` and `false` are blank (see [`is_blank`]). An
//! update payload cannot use them to clear a field: omitting a field and
//! sending it blank mean the same thing, "leave unchanged". This is a
//! product decision inherited by every caller of [`merge_into`].
//!
//! # Modules
//!
//! - [`value`] -- Classification of JSON values (blank, scalar)
//! - [`merge`] -- The recursive merge itself

pub mod merge;
pub mod value;

pub use merge::{merge_into, merged, MergeStats};
pub use value::{is_blank, is_scalar};
