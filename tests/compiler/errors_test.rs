//! Error taxonomy coverage: every failure is terminal, fail-fast, and
//! names the offending filter key in a directly renderable message.

use serde_json::json;

use sqlweave::compile::{compile, compile_with_defaults, CompileError};
use sqlweave::model::{FilterMode, FilterSpec, FilterType, FilterValues, MetricTemplate};

fn values(key: &str, value: serde_json::Value) -> FilterValues {
    FilterValues::from([(key.to_string(), value)])
}

#[test]
fn test_duplicate_filter_key() {
    let template = MetricTemplate::new("m", "SELECT * FROM t WHERE {{status}}")
        .with_filter(
            FilterSpec::new("status", FilterType::String, FilterMode::Predicate)
                .with_column("t.status"),
        )
        .with_filter(
            FilterSpec::new("status", FilterType::String, FilterMode::Predicate)
                .with_column("t.other"),
        );

    let err = compile_with_defaults(&template).unwrap_err();
    assert_eq!(err, CompileError::DuplicateFilter("status".to_string()));
    assert_eq!(err.to_string(), "Duplicate filter key: 'status'");
}

#[test]
fn test_unresolved_token_names_key() {
    let template = MetricTemplate::new("m", "SELECT * FROM t WHERE {{region}}");
    let err = compile_with_defaults(&template).unwrap_err();
    assert_eq!(err, CompileError::UnresolvedToken("region".to_string()));
    assert_eq!(
        err.to_string(),
        "No filter defined for token '{{region}}'"
    );
}

#[test]
fn test_unused_filter_names_key() {
    let template = MetricTemplate::new("m", "SELECT * FROM t").with_filter(
        FilterSpec::new("region", FilterType::String, FilterMode::Predicate)
            .with_column("t.region"),
    );
    let err = compile_with_defaults(&template).unwrap_err();
    assert_eq!(err, CompileError::UnusedFilter("region".to_string()));
    assert!(err.to_string().contains("'region'"));
    assert!(err.to_string().contains("never referenced"));
}

#[test]
fn test_required_filter_without_value() {
    let template = MetricTemplate::new("m", "SELECT * FROM t WHERE 1=1 {{region}}")
        .with_filter(
            FilterSpec::new("region", FilterType::String, FilterMode::Predicate)
                .with_column("t.region")
                .required(),
        );
    let err = compile_with_defaults(&template).unwrap_err();
    assert_eq!(err, CompileError::MissingRequired("region".to_string()));
    assert_eq!(err.to_string(), "Required filter 'region' has no value");
}

#[test]
fn test_required_filter_with_empty_array_value() {
    // Present but empty still violates requiredness.
    let template = MetricTemplate::new("m", "SELECT * FROM t WHERE 1=1 {{regions}}")
        .with_filter(
            FilterSpec::new("regions", FilterType::StringList, FilterMode::InList)
                .with_column("t.region")
                .required(),
        );
    let err = compile(&template, &values("regions", json!([]))).unwrap_err();
    assert_eq!(err, CompileError::MissingRequired("regions".to_string()));
}

#[test]
fn test_column_mode_without_column() {
    let template = MetricTemplate::new("m", "SELECT * FROM t WHERE {{status}}").with_filter(
        FilterSpec::new("status", FilterType::String, FilterMode::Predicate),
    );
    let err = compile(&template, &values("status", json!("x"))).unwrap_err();
    assert_eq!(
        err,
        CompileError::MissingColumn {
            key: "status".to_string(),
            mode: FilterMode::Predicate,
        }
    );
    assert_eq!(
        err.to_string(),
        "Filter 'status': mode 'predicate' requires a column"
    );
}

#[test]
fn test_non_numeric_number_value() {
    let template = MetricTemplate::new("m", "SELECT * FROM t WHERE {{amount}}").with_filter(
        FilterSpec::new("amount", FilterType::Number, FilterMode::Predicate)
            .with_column("t.amount"),
    );
    let err = compile(&template, &values("amount", json!("lots"))).unwrap_err();
    assert!(matches!(err, CompileError::InvalidValue { ref key, .. } if key == "amount"));
    assert!(err.to_string().starts_with("Filter 'amount':"));
}

#[test]
fn test_non_boolean_boolean_value() {
    let template = MetricTemplate::new("m", "SELECT * FROM t WHERE {{active}}").with_filter(
        FilterSpec::new("active", FilterType::Boolean, FilterMode::Predicate)
            .with_column("t.active"),
    );
    let err = compile(&template, &values("active", json!("yes"))).unwrap_err();
    assert!(matches!(err, CompileError::InvalidValue { ref key, .. } if key == "active"));
}

#[test]
fn test_malformed_range_values() {
    let template = MetricTemplate::new("m", "SELECT * FROM t WHERE {{window}}").with_filter(
        FilterSpec::new("window", FilterType::DateRange, FilterMode::Range)
            .with_column("t.created_at"),
    );

    for bad in [json!(["2024-01-01"]), json!(["a", "b", "c"]), json!("2024-01-01")] {
        let err = compile(&template, &values("window", bad)).unwrap_err();
        assert!(
            matches!(err, CompileError::InvalidValue { ref key, .. } if key == "window"),
            "unexpected error: {:?}",
            err
        );
    }
}

#[test]
fn test_object_rejected_by_passthrough_mode() {
    let template = MetricTemplate::new("m", "SELECT * FROM t ORDER BY {{sort}}").with_filter(
        FilterSpec::new("sort", FilterType::String, FilterMode::OrderByItem),
    );
    let err = compile(&template, &values("sort", json!({"column": "x"}))).unwrap_err();
    assert!(matches!(err, CompileError::InvalidValue { ref key, .. } if key == "sort"));
    assert!(err.to_string().contains("must be string/number"));
}

#[test]
fn test_error_kind_is_stable_across_calls() {
    let template = MetricTemplate::new("m", "SELECT * FROM t WHERE {{region}}");
    let first = compile_with_defaults(&template).unwrap_err();
    let second = compile_with_defaults(&template).unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn test_failure_fires_before_any_output_is_usable() {
    // A failing filter late in the template still fails the whole call.
    let template = MetricTemplate::new(
        "m",
        "SELECT * FROM t WHERE {{status}} AND {{amount}}",
    )
    .with_filter(
        FilterSpec::new("status", FilterType::String, FilterMode::Predicate)
            .with_column("t.status")
            .with_default("ok")
            .with_leading_and(false),
    )
    .with_filter(
        FilterSpec::new("amount", FilterType::Number, FilterMode::Predicate)
            .with_column("t.amount")
            .with_leading_and(false),
    );

    let err = compile(&template, &values("amount", json!("not-a-number"))).unwrap_err();
    assert!(matches!(err, CompileError::InvalidValue { .. }));
}
