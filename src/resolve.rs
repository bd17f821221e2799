//! Filter resolution: key lookup, effective values, emptiness.
//!
//! The resolver owns the merge between caller-supplied runtime values and
//! authored defaults, and the uniform emptiness test that decides whether
//! a token renders a fragment or is elided.

use std::collections::HashMap;

use serde_json::Value;

use crate::compile::{CompileError, CompileResult};
use crate::model::{FilterSpec, FilterValues};

/// Key → spec lookup for one compile call.
///
/// Built fresh per call; nothing is shared or cached across compiles.
#[derive(Debug)]
pub struct FilterIndex<'a> {
    map: HashMap<&'a str, &'a FilterSpec>,
}

impl<'a> FilterIndex<'a> {
    /// Build the index, rejecting duplicate keys.
    ///
    /// Duplicates are a definition error and fail the compile before any
    /// scanning happens.
    pub fn build(filters: &'a [FilterSpec]) -> CompileResult<Self> {
        let mut map = HashMap::with_capacity(filters.len());
        for spec in filters {
            if map.insert(spec.key.as_str(), spec).is_some() {
                return Err(CompileError::DuplicateFilter(spec.key.clone()));
            }
        }
        Ok(Self { map })
    }

    pub fn get(&self, key: &str) -> Option<&'a FilterSpec> {
        self.map.get(key).copied()
    }
}

/// Compute the value a filter actually renders with, if any.
///
/// The caller's value wins when present and non-null; an explicit null
/// falls through to the authored default (a caller cannot null out a
/// default, only omit the token from the template). The winner is then
/// subjected to the emptiness test: `None` means the token is elided (or
/// the compile fails, if the filter is required).
pub fn effective_value<'a>(spec: &'a FilterSpec, values: &'a FilterValues) -> Option<&'a Value> {
    values
        .get(&spec.key)
        .filter(|v| !v.is_null())
        .or(spec.default.as_ref())
        .filter(|v| should_render(v))
}

/// Uniform emptiness test over the runtime value union.
///
/// Null is empty, arrays and objects are empty when they hold nothing,
/// every other primitive renders. Note an empty string renders: `''` is a
/// legitimate SQL value.
pub fn should_render(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
    }
}
