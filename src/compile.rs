//! End-to-end compilation from metric template to executable SQL.
//!
//! This module provides the high-level API for resolving a metric's
//! filter tokens:
//!
//! ```text
//! Template SQL + FilterSpecs + FilterValues → Scan → Resolve → Render → SQL
//! ```
//!
//! # Example
//!
//! ```
//! use sqlweave::compile::{compile, CompileResult};
//! use sqlweave::model::{FilterMode, FilterSpec, FilterType, FilterValues, MetricTemplate};
//!
//! # fn main() -> CompileResult<()> {
//! let template = MetricTemplate::new(
//!     "completed_orders",
//!     "SELECT COUNT(*) FROM orders o WHERE {{status}}",
//! )
//! .with_filter(
//!     FilterSpec::new("status", FilterType::String, FilterMode::Predicate)
//!         .with_column("o.status")
//!         .with_default("completed")
//!         .with_leading_and(false),
//! );
//!
//! let sql = compile(&template, &FilterValues::new())?;
//! assert_eq!(sql, "SELECT COUNT(*) FROM orders o WHERE o.status = 'completed'");
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;

use crate::model::{FilterMode, FilterValues, MetricTemplate};
use crate::render::{self, indent};
use crate::resolve::{self, FilterIndex};
use crate::scanner::{self, Segment};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during compilation.
///
/// Every failure is terminal for the current call — no partial SQL is
/// ever returned — and every message names the offending filter key, so
/// callers can surface it directly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// Two filter specs share a key.
    #[error("Duplicate filter key: '{0}'")]
    DuplicateFilter(String),

    /// A template token has no matching filter spec.
    #[error("No filter defined for token '{{{{{0}}}}}'")]
    UnresolvedToken(String),

    /// A filter spec's key never appears as a token in the template.
    #[error("Filter '{0}' is defined but never referenced in the SQL template")]
    UnusedFilter(String),

    /// A required filter resolved to no usable value.
    #[error("Required filter '{0}' has no value")]
    MissingRequired(String),

    /// A column-based mode was used without a column.
    #[error("Filter '{key}': mode '{mode}' requires a column")]
    MissingColumn { key: String, mode: FilterMode },

    /// A value failed its declared type's rendering rules.
    #[error("Filter '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Token syntax survived substitution — an internal bug, surfaced
    /// rather than swallowed.
    #[error("Unresolved token '{0}' remains in compiled SQL")]
    UnresolvedOutput(String),
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Compilation Functions
// ============================================================================

/// Compile a metric template against caller-supplied filter values.
///
/// Merges `values` over the template's authored defaults, replaces every
/// `{{key}}` token with a rendered, indentation-matched SQL fragment (or
/// removes it, when its filter resolves to nothing and is not required),
/// and enforces the completeness invariants: no duplicate filter keys, no
/// token without a filter, no filter without a token, no token syntax in
/// the output.
///
/// Pure and stateless: nothing is cached or retained across calls.
pub fn compile(template: &MetricTemplate, values: &FilterValues) -> CompileResult<String> {
    // Step 1: Index the filter specs, rejecting duplicate keys before
    // any scanning happens.
    let index = FilterIndex::build(&template.filters)?;

    // Step 2: Single substitution pass over the template.
    let mut used: HashSet<&str> = HashSet::with_capacity(template.filters.len());
    let mut out = String::with_capacity(template.sql.len());

    for segment in scanner::scan(&template.sql) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Token(token) => {
                let spec = index
                    .get(token.key)
                    .ok_or_else(|| CompileError::UnresolvedToken(token.key.to_string()))?;
                used.insert(spec.key.as_str());

                match resolve::effective_value(spec, values) {
                    Some(value) => {
                        let fragment = render::render_fragment(spec, value)?;
                        let indent = indent::leading_indent(&template.sql, token.start);
                        out.push_str(&indent::apply(&fragment, indent));
                    }
                    None if spec.required => {
                        return Err(CompileError::MissingRequired(spec.key.clone()));
                    }
                    // Elided: the token contributes no SQL.
                    None => {}
                }
            }
        }
    }

    // Step 3: Completeness checks. A filter the template never references
    // is authoring drift; residual token syntax is a compiler bug.
    for spec in &template.filters {
        if !used.contains(spec.key.as_str()) {
            return Err(CompileError::UnusedFilter(spec.key.clone()));
        }
    }
    if let Some(residual) = scanner::find_residual_token(&out) {
        return Err(CompileError::UnresolvedOutput(residual.to_string()));
    }

    Ok(out)
}

/// Compile a template using only its authored defaults.
///
/// Convenience wrapper for callers with no runtime filter values.
pub fn compile_with_defaults(template: &MetricTemplate) -> CompileResult<String> {
    compile(template, &FilterValues::new())
}
