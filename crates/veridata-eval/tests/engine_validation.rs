use veridata_core::{Dataset, Value};
use veridata_eval::{EvalOptions, ResultKind, Validator};
use veridata_suite::{Expectation, ExpectationSuite, Predicate};

fn dataset(columns: Vec<(&str, Vec<Value>)>) -> Dataset {
    Dataset::new(
        columns
            .into_iter()
            .map(|(name, values)| (name.to_string(), values))
            .collect(),
    )
    .expect("build dataset")
}

fn texts(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| Value::Text(v.to_string())).collect()
}

fn between(min: Option<i64>, max: Option<i64>) -> Predicate {
    Predicate::Between {
        min: min.map(Value::Int),
        max: max.map(Value::Int),
    }
}

#[test]
fn one_result_per_expectation_in_suite_order() {
    let data = dataset(vec![("a", vec![Value::Int(1), Value::Int(2)])]);
    let suite = ExpectationSuite::new(
        "order",
        vec![
            Expectation::new("a", Predicate::NotNull),
            Expectation::new("a", between(Some(0), None)),
            Expectation::new("a", Predicate::Unique),
            // Duplicates are legal and evaluated independently.
            Expectation::new("a", Predicate::NotNull),
        ],
    );

    let results = Validator::default().validate(&data, &suite);
    assert_eq!(results.len(), suite.expectations.len());
    for (result, expectation) in results.iter().zip(&suite.expectations) {
        assert_eq!(result.expectation.as_ref(), Some(expectation));
        assert_eq!(result.suite, "order");
    }
}

#[test]
fn between_excludes_missing_values_from_pass_and_fail() {
    let data = dataset(vec![(
        "amount",
        vec![Value::Int(-5), Value::Int(0), Value::Int(5), Value::Null],
    )]);
    let suite = ExpectationSuite::new(
        "bounds",
        vec![Expectation::new("amount", between(Some(0), None))],
    );

    let result = &Validator::default().validate(&data, &suite)[0];
    assert_eq!(result.kind, ResultKind::Evaluated);
    assert!(!result.success);
    assert_eq!(result.element_count, 4);
    assert_eq!(result.unexpected_count, 1);
    assert_eq!(result.unexpected_sample, vec![Value::Int(-5)]);
    assert_eq!(result.observed["missing_count"], serde_json::json!(1));
}

#[test]
fn between_bounds_are_inclusive() {
    let data = dataset(vec![(
        "n",
        vec![Value::Int(1), Value::Int(5), Value::Int(10), Value::Int(11)],
    )]);
    let suite = ExpectationSuite::new(
        "inclusive",
        vec![Expectation::new("n", between(Some(1), Some(10)))],
    );

    let result = &Validator::default().validate(&data, &suite)[0];
    assert_eq!(result.unexpected_count, 1);
    assert_eq!(result.unexpected_sample, vec![Value::Int(11)]);
}

#[test]
fn unique_counts_every_occurrence_of_a_duplicate() {
    let data = dataset(vec![(
        "id",
        vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(2),
            Value::Int(3),
            Value::Int(2),
        ],
    )]);
    let suite = ExpectationSuite::new("uniq", vec![Expectation::new("id", Predicate::Unique)]);

    let result = &Validator::default().validate(&data, &suite)[0];
    assert!(!result.success);
    // All three occurrences of 2 are unexpected, not just the repeats.
    assert_eq!(result.unexpected_count, 3);
    assert_eq!(
        result.unexpected_sample,
        vec![Value::Int(2), Value::Int(2), Value::Int(2)]
    );
    assert_eq!(result.observed["distinct_count"], serde_json::json!(3));
    assert_eq!(
        result.observed["duplicate_value_count"],
        serde_json::json!(1)
    );
}

#[test]
fn unique_distinguishes_values_whose_renderings_collide() {
    // Int(2) and Text("2") render the same but are different values;
    // so do Bool(true)/Text("true") and Null/Text("null").
    let data = dataset(vec![(
        "mixed",
        vec![
            Value::Int(2),
            Value::Text("2".into()),
            Value::Bool(true),
            Value::Text("true".into()),
            Value::Null,
            Value::Text("null".into()),
        ],
    )]);
    let suite = ExpectationSuite::new("uniq", vec![Expectation::new("mixed", Predicate::Unique)]);

    let result = &Validator::default().validate(&data, &suite)[0];
    assert!(result.success);
    assert_eq!(result.unexpected_count, 0);
    assert_eq!(result.observed["distinct_count"], serde_json::json!(6));

    // Int and Float still share the numeric keyspace, matching equality.
    let data = dataset(vec![("n", vec![Value::Int(2), Value::Float(2.0)])]);
    let suite = ExpectationSuite::new("uniq", vec![Expectation::new("n", Predicate::Unique)]);
    let result = &Validator::default().validate(&data, &suite)[0];
    assert_eq!(result.unexpected_count, 2);
}

#[test]
fn unique_treats_nulls_as_values() {
    let data = dataset(vec![("id", vec![Value::Null, Value::Null, Value::Int(1)])]);
    let suite = ExpectationSuite::new("uniq", vec![Expectation::new("id", Predicate::Unique)]);

    let result = &Validator::default().validate(&data, &suite)[0];
    assert_eq!(result.unexpected_count, 2);
}

#[test]
fn in_set_fails_missing_unless_null_is_allowed() {
    let data = dataset(vec![(
        "type",
        vec![
            Value::Text("A".into()),
            Value::Text("B".into()),
            Value::Text("C".into()),
            Value::Null,
        ],
    )]);

    let strict = ExpectationSuite::new(
        "set",
        vec![Expectation::new(
            "type",
            Predicate::InSet {
                value_set: texts(&["A", "B"]),
            },
        )],
    );
    let result = &Validator::default().validate(&data, &strict)[0];
    assert_eq!(result.unexpected_count, 2);
    assert_eq!(
        result.unexpected_sample,
        vec![Value::Text("C".into()), Value::Null]
    );

    let mut with_null = texts(&["A", "B", "C"]);
    with_null.push(Value::Null);
    let lenient = ExpectationSuite::new(
        "set",
        vec![Expectation::new(
            "type",
            Predicate::InSet {
                value_set: with_null,
            },
        )],
    );
    let result = &Validator::default().validate(&data, &lenient)[0];
    assert!(result.success);
    assert_eq!(result.observed["missing_count"], serde_json::json!(1));
}

#[test]
fn not_null_flags_only_missing_values() {
    let data = dataset(vec![(
        "acct",
        vec![Value::Text("ACC1".into()), Value::Null, Value::Text("ACC2".into())],
    )]);
    let suite = ExpectationSuite::new("nn", vec![Expectation::new("acct", Predicate::NotNull)]);

    let result = &Validator::default().validate(&data, &suite)[0];
    assert!(!result.success);
    assert_eq!(result.unexpected_count, 1);
    assert_eq!(result.unexpected_sample, vec![Value::Null]);
}

#[test]
fn missing_column_fails_that_expectation_and_the_run_continues() {
    let data = dataset(vec![("present", vec![Value::Int(1), Value::Int(2)])]);
    let suite = ExpectationSuite::new(
        "schema",
        vec![
            Expectation::new("absent", Predicate::NotNull),
            Expectation::new("present", Predicate::NotNull),
        ],
    );

    let results = Validator::default().validate(&data, &suite);
    assert_eq!(results.len(), 2);

    let broken = &results[0];
    assert_eq!(broken.kind, ResultKind::SchemaError);
    assert!(!broken.success);
    assert_eq!(broken.unexpected_count, 2);
    assert_eq!(broken.observed["schema_error"], serde_json::json!(true));

    assert!(results[1].success);
}

#[test]
fn incomparable_bound_surfaces_as_type_mismatch_not_a_crash() {
    let data = dataset(vec![(
        "date",
        vec![Value::Text("not-a-number".into()), Value::Text("also-text".into())],
    )]);
    let suite = ExpectationSuite::new(
        "types",
        vec![
            Expectation::new("date", between(Some(0), None)),
            Expectation::new("date", Predicate::NotNull),
        ],
    );

    let results = Validator::default().validate(&data, &suite);
    let mismatch = &results[0];
    assert_eq!(mismatch.kind, ResultKind::TypeMismatch);
    assert!(!mismatch.success);
    assert_eq!(mismatch.unexpected_count, 2);
    assert!(
        mismatch.observed["type_mismatch"]
            .as_str()
            .unwrap()
            .contains("cannot compare")
    );

    // The next expectation still ran.
    assert!(results[1].success);
}

#[test]
fn sample_capture_keeps_the_first_k_offenders_in_row_order() {
    let values: Vec<Value> = (0..10).map(|i| Value::Int(-i)).collect();
    let data = dataset(vec![("n", values)]);
    let suite = ExpectationSuite::new(
        "cap",
        vec![Expectation::new("n", between(Some(0), None))],
    );

    let validator = Validator::new(EvalOptions { max_examples: 3 });
    let result = &validator.validate(&data, &suite)[0];
    assert_eq!(result.unexpected_count, 9);
    assert_eq!(
        result.unexpected_sample,
        vec![Value::Int(-1), Value::Int(-2), Value::Int(-3)]
    );
}

#[test]
fn date_bounds_compare_chronologically() {
    let jan = |day: u32| {
        Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date"))
    };
    let data = dataset(vec![("d", vec![jan(1), jan(15), jan(31)])]);
    let suite = ExpectationSuite::new(
        "dates",
        vec![Expectation::new(
            "d",
            Predicate::Between {
                min: Some(jan(5)),
                max: Some(jan(20)),
            },
        )],
    );

    let result = &Validator::default().validate(&data, &suite)[0];
    assert_eq!(result.unexpected_count, 2);
    assert_eq!(result.unexpected_sample, vec![jan(1), jan(31)]);
}
