use crate::model::{ResultKind, RunReport, ValidationResult};

/// Render a deterministic markdown report from a checkpoint run.
pub fn render_report(report: &RunReport, max_examples: usize) -> String {
    let mut lines = Vec::new();

    lines.push("# Veridata Run Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- checkpoint: {}", report.checkpoint));
    lines.push(format!("- run_id: {}", report.run_id));
    lines.push(format!("- started_at: {}", report.started_at.to_rfc3339()));
    lines.push(format!("- success: {}", report.success()));
    lines.push(format!(
        "- expectations: {} ({} failing)",
        report.results.len(),
        report.failure_count()
    ));
    lines.push(String::new());

    lines.push("## Expectations".to_string());
    lines.push("| suite | column | kind | success | elements | unexpected |".to_string());
    lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
    for result in &report.results {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            result.suite,
            result
                .expectation
                .as_ref()
                .map(|exp| exp.column.as_str())
                .unwrap_or("-"),
            result_kind_label(result),
            result.success,
            result.element_count,
            result.unexpected_count
        ));
    }
    lines.push(String::new());

    let failing: Vec<&ValidationResult> = report
        .results
        .iter()
        .filter(|result| !result.success)
        .collect();

    if !failing.is_empty() {
        lines.push("## Failing expectations".to_string());
        for result in failing.iter().take(max_examples) {
            let column = result
                .expectation
                .as_ref()
                .map(|exp| exp.column.as_str())
                .unwrap_or("-");
            let detail = match result.kind {
                ResultKind::Evaluated => {
                    let samples: Vec<String> = result
                        .unexpected_sample
                        .iter()
                        .take(5)
                        .map(|value| value.to_string())
                        .collect();
                    if samples.is_empty() {
                        format!("{} unexpected value(s)", result.unexpected_count)
                    } else {
                        format!(
                            "{} unexpected value(s), e.g. {}",
                            result.unexpected_count,
                            samples.join(", ")
                        )
                    }
                }
                _ => observed_message(result),
            };
            lines.push(format!(
                "- {}.{} [{}]: {}",
                result.suite,
                column,
                result_kind_label(result),
                detail
            ));
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.extend(recommendations(report));
    lines.join("\n")
}

fn result_kind_label(result: &ValidationResult) -> &str {
    match result.kind {
        ResultKind::Evaluated => result
            .expectation
            .as_ref()
            .map(|exp| exp.predicate.kind())
            .unwrap_or("evaluated"),
        ResultKind::SchemaError => "schema_error",
        ResultKind::TypeMismatch => "type_mismatch",
        ResultKind::ExecutionError => "execution_error",
    }
}

fn observed_message(result: &ValidationResult) -> String {
    result
        .observed
        .get("error")
        .or_else(|| result.observed.get("type_mismatch"))
        .and_then(|value| value.as_str())
        .unwrap_or("see observed stats")
        .to_string()
}

fn recommendations(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();
    let has = |kind: ResultKind| report.results.iter().any(|result| result.kind == kind);

    if has(ResultKind::SchemaError) {
        lines.push("- check suite column names against the dataset schema.".to_string());
    }
    if has(ResultKind::TypeMismatch) {
        lines.push("- align between bounds with the column value types.".to_string());
    }
    if has(ResultKind::ExecutionError) {
        lines.push("- verify dataset sources are present and readable.".to_string());
    }
    if report
        .results
        .iter()
        .any(|result| result.kind == ResultKind::Evaluated && !result.success)
    {
        lines.push("- inspect unexpected samples before trusting this batch downstream.".to_string());
    }
    if report.success() {
        lines.push("- no failing expectations; compare reports across runs for drift.".to_string());
    }
    lines
}
