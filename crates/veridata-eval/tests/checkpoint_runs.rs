use veridata_core::{Dataset, Value};
use veridata_eval::{
    BatchSource, Binding, Checkpoint, EvalError, EvalOptions, MemorySource, ResultKind,
    render_report,
};
use veridata_suite::{Expectation, ExpectationSuite, Predicate};

/// A source whose dataset cannot be read at all.
struct BrokenSource;

impl BatchSource for BrokenSource {
    fn describe(&self) -> String {
        "corrupt.csv".to_string()
    }

    fn load(&self) -> Result<Dataset, EvalError> {
        Err(EvalError::Source("malformed batch".to_string()))
    }
}

fn transactions() -> Dataset {
    Dataset::new(vec![
        (
            "amount".to_string(),
            vec![Value::Int(10), Value::Int(-3), Value::Int(250)],
        ),
        (
            "account".to_string(),
            vec![
                Value::Text("ACC1".into()),
                Value::Text("ACC2".into()),
                Value::Text("ACC2".into()),
            ],
        ),
    ])
    .expect("build dataset")
}

fn transactions_suite() -> ExpectationSuite {
    ExpectationSuite::new(
        "transactions",
        vec![
            Expectation::new(
                "amount",
                Predicate::Between {
                    min: Some(Value::Int(0)),
                    max: None,
                },
            ),
            Expectation::new("account", Predicate::Unique),
        ],
    )
}

#[test]
fn rerunning_unchanged_inputs_yields_identical_results() {
    let checkpoint = Checkpoint::new("nightly", EvalOptions::default());
    let bindings = vec![Binding::new(
        MemorySource::new("transactions", transactions()),
        transactions_suite(),
    )];

    let first = checkpoint.run(&bindings);
    let second = checkpoint.run(&bindings);

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.results, second.results);
    assert_eq!(first.success(), second.success());
}

#[test]
fn failed_binding_is_recorded_and_other_bindings_proceed() {
    let checkpoint = Checkpoint::new("mixed", EvalOptions::default());
    let bindings = vec![
        Binding::new(
            MemorySource::new("transactions", transactions()),
            transactions_suite(),
        ),
        Binding::new(BrokenSource, ExpectationSuite::new("ghost", vec![])),
    ];

    let report = checkpoint.run(&bindings);

    // Two evaluated results from the first binding, one execution_error
    // entry for the second; never an empty report.
    assert_eq!(report.results.len(), 3);
    assert!(!report.success());

    let failed = &report.results[2];
    assert_eq!(failed.kind, ResultKind::ExecutionError);
    assert_eq!(failed.suite, "ghost");
    assert!(failed.expectation.is_none());
    assert_eq!(failed.observed["source"], serde_json::json!("corrupt.csv"));
    assert!(
        failed.observed["error"]
            .as_str()
            .unwrap()
            .contains("malformed batch")
    );
}

#[test]
fn results_concatenate_in_binding_order() {
    let checkpoint = Checkpoint::new("ordered", EvalOptions::default());
    let bindings = vec![
        Binding::new(
            MemorySource::new("first", transactions()),
            ExpectationSuite::new(
                "first",
                vec![Expectation::new("amount", Predicate::NotNull)],
            ),
        ),
        Binding::new(
            MemorySource::new("second", transactions()),
            ExpectationSuite::new(
                "second",
                vec![Expectation::new("account", Predicate::NotNull)],
            ),
        ),
    ];

    let report = checkpoint.run(&bindings);
    let suites: Vec<&str> = report
        .results
        .iter()
        .map(|result| result.suite.as_str())
        .collect();
    assert_eq!(suites, vec!["first", "second"]);
}

#[test]
fn report_success_is_derived_from_results() {
    let checkpoint = Checkpoint::new("derive", EvalOptions::default());
    let bindings = vec![Binding::new(
        MemorySource::new("transactions", transactions()),
        transactions_suite(),
    )];

    let mut report = checkpoint.run(&bindings);
    assert!(!report.success());

    // Dropping the failing results flips the derived flag; nothing is
    // cached anywhere.
    report.results.retain(|result| result.success);
    assert!(report.success());

    let doc = report.document();
    assert!(doc.success);
    assert_eq!(doc.run_id, report.run_id);
}

#[test]
fn markdown_report_lists_failures_and_recommendations() {
    let checkpoint = Checkpoint::new("render", EvalOptions::default());
    let bindings = vec![
        Binding::new(
            MemorySource::new("transactions", transactions()),
            transactions_suite(),
        ),
        Binding::new(BrokenSource, ExpectationSuite::new("ghost", vec![])),
    ];

    let report = checkpoint.run(&bindings);
    let rendered = render_report(&report, 20);

    assert!(rendered.contains("# Veridata Run Report"));
    assert!(rendered.contains("- success: false"));
    assert!(rendered.contains("| transactions | amount | between | false | 3 | 1 |"));
    assert!(rendered.contains("| transactions | account | unique | false | 3 | 2 |"));
    assert!(rendered.contains("| ghost | - | execution_error | false | 0 | 0 |"));
    assert!(rendered.contains("verify dataset sources are present and readable"));

    // Rendering is deterministic for the same report.
    assert_eq!(rendered, render_report(&report, 20));
}
