use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use veridata_core::{Dataset, Value};
use veridata_eval::{BatchSource, EvalError};

/// A CSV-backed batch: header row gives column names, cell types are
/// inferred per value. Loading happens once per checkpoint run; the
/// engine only ever sees the materialized dataset.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BatchSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Dataset, EvalError> {
        let file = File::open(&self.path)
            .map_err(|err| EvalError::Source(format!("{}: {err}", self.path.display())))?;
        dataset_from_reader(file)
            .map_err(|err| EvalError::Source(format!("{}: {err}", self.path.display())))
    }
}

/// Parse CSV bytes into a column-oriented dataset.
pub fn dataset_from_reader<R: Read>(reader: R) -> Result<Dataset, EvalError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| EvalError::Source(err.to_string()))?
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|err| EvalError::Source(err.to_string()))?;
        for (index, values) in columns.iter_mut().enumerate() {
            values.push(infer_value(record.get(index).unwrap_or_default()));
        }
    }

    let dataset = Dataset::new(headers.into_iter().zip(columns).collect())
        .map_err(|err| EvalError::Source(err.to_string()))?;
    Ok(dataset)
}

/// Infer the typed value of one CSV cell.
///
/// Empty cells and the literal `null` are the missing marker. Numbers,
/// booleans, ISO dates and ISO timestamps are tried before falling back
/// to text.
fn infer_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Value::Int(value);
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return Value::Float(value);
    }
    match trimmed.to_lowercase().as_str() {
        "true" | "t" => return Value::Bool(true),
        "false" | "f" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(value) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Value::Date(value);
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Value::Timestamp(value);
    }
    Value::Text(trimmed.to_string())
}
