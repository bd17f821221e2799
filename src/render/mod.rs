//! Fragment rendering: one resolved token to one SQL fragment.
//!
//! [`render_fragment`] dispatches on the filter's [`FilterMode`] with an
//! exhaustive match — every mode has a render rule or the crate does not
//! compile. The output is a raw fragment; indentation is applied by the
//! caller afterward ([`indent`]).
//!
//! # Escaping asymmetry
//!
//! The column comparison modes and `value` route every value through the
//! literal renderer, which escapes it. The raw passthrough modes
//! (`order_by_item`, `partition_by`, `select_expr`, `limit`,
//! `predicate_switch`, `predicate_complex`) substitute the value verbatim:
//! they carry author-written SQL fragments, and escaping them would break
//! valid SQL. That trust boundary is deliberate — metric definitions are
//! author-controlled, never end-user input.

pub mod indent;
pub mod literal;

use serde_json::Value;

use crate::compile::{CompileError, CompileResult};
use crate::model::{FilterMode, FilterSpec};
use literal::{kind_name, render_literal};

/// Render the SQL fragment for a resolved filter.
///
/// `value` is the non-empty effective value chosen by the resolver. The
/// returned fragment may still be empty (a range with both ends open, an
/// in-list coerced from an empty array); empty fragments never get the
/// `AND ` prefix.
pub fn render_fragment(spec: &FilterSpec, value: &Value) -> CompileResult<String> {
    let body = match spec.mode {
        FilterMode::Predicate
        | FilterMode::JoinPredicate
        | FilterMode::Qualify
        | FilterMode::Having => render_comparison(spec, value)?,
        FilterMode::Range => render_range(spec, value)?,
        FilterMode::InList => render_in_list(spec, value)?,
        FilterMode::OrderByItem
        | FilterMode::SelectExpr
        | FilterMode::Limit
        | FilterMode::PredicateSwitch
        | FilterMode::PredicateComplex
        | FilterMode::PartitionBy => render_passthrough(&spec.key, value)?,
        FilterMode::Value => render_value(spec, value)?,
    };

    if body.is_empty() || !spec.leading_and() {
        Ok(body)
    } else {
        Ok(format!("AND {}", body))
    }
}

/// `<column> <op> <literal>`
fn render_comparison(spec: &FilterSpec, value: &Value) -> CompileResult<String> {
    let column = column_ref(spec)?;
    let literal = render_literal(&spec.key, value, spec.filter_type)?;
    Ok(format!("{} {} {}", column, spec.op, literal))
}

/// `<column> >= <start>` / `<column> < <end>`, either side optional.
///
/// The two clauses sit on separate lines so a two-sided range stays
/// readable after indentation is applied.
fn render_range(spec: &FilterSpec, value: &Value) -> CompileResult<String> {
    let column = column_ref(spec)?;
    let items = match value {
        Value::Array(items) if items.len() == 2 => items,
        Value::Array(items) => {
            return Err(CompileError::InvalidValue {
                key: spec.key.clone(),
                message: format!(
                    "range value must be a 2-element [start, end] array, got {} elements",
                    items.len()
                ),
            });
        }
        other => {
            return Err(CompileError::InvalidValue {
                key: spec.key.clone(),
                message: format!(
                    "range value must be a 2-element [start, end] array, got {}",
                    kind_name(other)
                ),
            });
        }
    };

    let element_type = spec.filter_type.element_type();
    let mut clauses = Vec::with_capacity(2);
    if !items[0].is_null() {
        let literal = render_literal(&spec.key, &items[0], element_type)?;
        clauses.push(format!("{} >= {}", column, literal));
    }
    if !items[1].is_null() {
        let literal = render_literal(&spec.key, &items[1], element_type)?;
        clauses.push(format!("{} < {}", column, literal));
    }
    Ok(clauses.join("\nAND "))
}

/// `<column> IN (<literal>, ...)`; scalars wrap to a one-element list.
fn render_in_list(spec: &FilterSpec, value: &Value) -> CompileResult<String> {
    let column = column_ref(spec)?;
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        scalar => vec![scalar],
    };
    if items.is_empty() {
        return Ok(String::new());
    }

    let element_type = spec.filter_type.element_type();
    let literals = items
        .iter()
        .map(|item| render_literal(&spec.key, item, element_type))
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(format!("{} IN ({})", column, literals.join(", ")))
}

/// Verbatim substitution for the expression-carrying modes. No escaping.
fn render_passthrough(key: &str, value: &Value) -> CompileResult<String> {
    match value {
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| passthrough_text(key, item))
                .collect::<CompileResult<Vec<_>>>()?;
            Ok(parts.join(", "))
        }
        other => passthrough_text(key, other),
    }
}

fn passthrough_text(key: &str, value: &Value) -> CompileResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(CompileError::InvalidValue {
            key: key.to_string(),
            message: format!("value must be string/number, got {}", kind_name(other)),
        }),
    }
}

/// Pure literal substitution for tokens embedded in authored expressions.
fn render_value(spec: &FilterSpec, value: &Value) -> CompileResult<String> {
    match value {
        Value::Array(items) => {
            let element_type = spec.filter_type.element_type();
            let literals = items
                .iter()
                .map(|item| render_literal(&spec.key, item, element_type))
                .collect::<CompileResult<Vec<_>>>()?;
            Ok(literals.join(", "))
        }
        scalar => render_literal(&spec.key, scalar, spec.filter_type),
    }
}

fn column_ref(spec: &FilterSpec) -> CompileResult<&str> {
    spec.column
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| CompileError::MissingColumn {
            key: spec.key.clone(),
            mode: spec.mode,
        })
}
