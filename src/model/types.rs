//! Closed filter type and rendering mode enums.
//!
//! Both enums are deliberately closed: every rendering decision in the
//! crate is an exhaustive `match`, so adding a variant here forces a
//! corresponding render rule at compile time.

use serde::{Deserialize, Serialize};

/// Declared value type of a filter.
///
/// Drives literal rendering: how an effective value is turned into a
/// type-correct, escaped SQL literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Number,
    Boolean,
    String,
    Date,
    Timestamp,
    StringList,
    NumberList,
    #[serde(rename = "daterange")]
    DateRange,
    TimestampRange,
}

impl FilterType {
    /// The literal type of one element of a list or range value.
    ///
    /// Scalar types are their own element type.
    pub fn element_type(self) -> FilterType {
        match self {
            FilterType::StringList => FilterType::String,
            FilterType::NumberList => FilterType::Number,
            FilterType::DateRange => FilterType::Date,
            FilterType::TimestampRange => FilterType::Timestamp,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Number => "number",
            FilterType::Boolean => "boolean",
            FilterType::String => "string",
            FilterType::Date => "date",
            FilterType::Timestamp => "timestamp",
            FilterType::StringList => "string_list",
            FilterType::NumberList => "number_list",
            FilterType::DateRange => "daterange",
            FilterType::TimestampRange => "timestamp_range",
        }
    }

    pub fn from_str(s: &str) -> Option<FilterType> {
        match s {
            "number" => Some(FilterType::Number),
            "boolean" => Some(FilterType::Boolean),
            "string" => Some(FilterType::String),
            "date" => Some(FilterType::Date),
            "timestamp" => Some(FilterType::Timestamp),
            "string_list" => Some(FilterType::StringList),
            "number_list" => Some(FilterType::NumberList),
            "daterange" => Some(FilterType::DateRange),
            "timestamp_range" => Some(FilterType::TimestampRange),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering strategy for a filter token.
///
/// Modes fall into three families:
///
/// - **Column comparisons** (`Predicate`, `Range`, `InList`,
///   `JoinPredicate`, `Qualify`, `Having`) — render `column op literal`
///   shapes against the spec's column, with every value escaped.
/// - **Raw passthrough** (`OrderByItem`, `PartitionBy`, `SelectExpr`,
///   `Limit`, `PredicateSwitch`, `PredicateComplex`) — substitute the
///   value verbatim, **without escaping**. These carry author-written SQL
///   fragments (expressions, ORDER BY items), never end-user data; quoting
///   them would break valid SQL. Do not route untrusted input through
///   these modes.
/// - **`Value`** — a single escaped literal, for tokens that sit inside a
///   larger authored expression such as `EXTRACT(YEAR FROM {{start}})`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Predicate,
    Range,
    InList,
    JoinPredicate,
    Qualify,
    Having,
    OrderByItem,
    PartitionBy,
    SelectExpr,
    Limit,
    PredicateSwitch,
    PredicateComplex,
    Value,
}

impl FilterMode {
    /// Whether fragments in this mode get an `AND ` prefix by default.
    ///
    /// True for the condition modes, which are typically appended after
    /// existing WHERE/JOIN/QUALIFY/HAVING conditions; overridable per
    /// filter via `needs_leading_and`.
    pub fn leading_and_default(self) -> bool {
        matches!(
            self,
            FilterMode::Predicate
                | FilterMode::Range
                | FilterMode::InList
                | FilterMode::JoinPredicate
                | FilterMode::Qualify
                | FilterMode::Having
        )
    }

    /// Whether this mode renders against the spec's column.
    pub fn requires_column(self) -> bool {
        matches!(
            self,
            FilterMode::Predicate
                | FilterMode::Range
                | FilterMode::InList
                | FilterMode::JoinPredicate
                | FilterMode::Qualify
                | FilterMode::Having
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Predicate => "predicate",
            FilterMode::Range => "range",
            FilterMode::InList => "in_list",
            FilterMode::JoinPredicate => "join_predicate",
            FilterMode::Qualify => "qualify",
            FilterMode::Having => "having",
            FilterMode::OrderByItem => "order_by_item",
            FilterMode::PartitionBy => "partition_by",
            FilterMode::SelectExpr => "select_expr",
            FilterMode::Limit => "limit",
            FilterMode::PredicateSwitch => "predicate_switch",
            FilterMode::PredicateComplex => "predicate_complex",
            FilterMode::Value => "value",
        }
    }

    pub fn from_str(s: &str) -> Option<FilterMode> {
        match s {
            "predicate" => Some(FilterMode::Predicate),
            "range" => Some(FilterMode::Range),
            "in_list" => Some(FilterMode::InList),
            "join_predicate" => Some(FilterMode::JoinPredicate),
            "qualify" => Some(FilterMode::Qualify),
            "having" => Some(FilterMode::Having),
            "order_by_item" => Some(FilterMode::OrderByItem),
            "partition_by" => Some(FilterMode::PartitionBy),
            "select_expr" => Some(FilterMode::SelectExpr),
            "limit" => Some(FilterMode::Limit),
            "predicate_switch" => Some(FilterMode::PredicateSwitch),
            "predicate_complex" => Some(FilterMode::PredicateComplex),
            "value" => Some(FilterMode::Value),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
