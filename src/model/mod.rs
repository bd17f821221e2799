//! Metric template model types.
//!
//! A metric is authored once as a SQL template containing `{{key}}`
//! filter tokens plus one [`FilterSpec`] per token describing how that
//! token is rendered. The structs here are the in-memory form of that
//! definition: the (out-of-scope) metric loader deserializes them from
//! the authoring format via serde, and embedding code can assemble them
//! directly with the builder methods.

pub mod types;

pub use types::{FilterMode, FilterType};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied runtime filter values, keyed by filter key.
///
/// Values override the matching [`FilterSpec::default`] when present and
/// non-null. Supplied fresh per compile call; never retained.
pub type FilterValues = HashMap<String, Value>;

/// One named, typed filter parameter of a metric template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Unique key matching a `{{key}}` token in the template SQL.
    pub key: String,

    /// Qualified column reference (e.g. `o.created_at`).
    ///
    /// Required by the column comparison modes; ignored by the raw
    /// passthrough modes and `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Declared value type, driving literal rendering.
    #[serde(rename = "type")]
    pub filter_type: FilterType,

    /// Rendering mode.
    pub mode: FilterMode,

    /// Comparison operator for the single-comparison modes.
    #[serde(default = "default_op")]
    pub op: String,

    /// Authored default value, used when the caller supplies none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Whether compilation fails when the filter resolves to no value.
    #[serde(default)]
    pub required: bool,

    /// Per-filter override of the mode's `AND `-prefix policy.
    #[serde(
        rename = "needsLeadingAnd",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub needs_leading_and: Option<bool>,
}

fn default_op() -> String {
    "=".to_string()
}

impl FilterSpec {
    /// Create a filter spec with the given key, type and mode.
    ///
    /// Operator defaults to `=`; no column, no default, not required.
    pub fn new(key: &str, filter_type: FilterType, mode: FilterMode) -> Self {
        Self {
            key: key.to_string(),
            column: None,
            filter_type,
            mode,
            op: default_op(),
            default: None,
            required: false,
            needs_leading_and: None,
        }
    }

    /// Set the target column.
    pub fn with_column(mut self, column: &str) -> Self {
        self.column = Some(column.to_string());
        self
    }

    /// Set the comparison operator.
    pub fn with_op(mut self, op: &str) -> Self {
        self.op = op.to_string();
        self
    }

    /// Set the authored default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the filter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Override the mode's `AND `-prefix policy.
    pub fn with_leading_and(mut self, needs_leading_and: bool) -> Self {
        self.needs_leading_and = Some(needs_leading_and);
        self
    }

    /// Resolved `AND `-prefix policy: the explicit override if set, else
    /// the mode default.
    pub fn leading_and(&self) -> bool {
        self.needs_leading_and
            .unwrap_or_else(|| self.mode.leading_and_default())
    }
}

/// One metric's compilation input: a SQL template plus its filter specs.
///
/// Constructed by the metric loader (or assembled via the builder
/// methods) once per compile call; immutable during compilation and not
/// retained by the compiler afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTemplate {
    /// Metric name, informational only.
    pub name: String,

    /// The raw SQL template containing `{{key}}` tokens.
    pub sql: String,

    /// Filter specs, ordered as authored, unique by key.
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
}

impl MetricTemplate {
    /// Create a template with no filters.
    pub fn new(name: &str, sql: &str) -> Self {
        Self {
            name: name.to_string(),
            sql: sql.to_string(),
            filters: Vec::new(),
        }
    }

    /// Append a filter spec.
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    /// Compile this template against the given runtime values.
    ///
    /// Forwards to [`crate::compile::compile`].
    pub fn compile(&self, values: &FilterValues) -> crate::compile::CompileResult<String> {
        crate::compile::compile(self, values)
    }
}
