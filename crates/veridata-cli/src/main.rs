mod config;
mod loader;
mod logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::warn;

use config::CheckpointConfig;
use loader::CsvSource;
use veridata_eval::{Binding, Checkpoint, EvalError, EvalOptions, render_report};
use veridata_suite::{ValidationReport, validate_suite_document};

/// JSON Schema for suite documents, bundled at build time.
const SUITE_SCHEMA: &str = include_str!("../../../schemas/suite.schema.json");

#[derive(Debug, Error)]
enum CliError {
    #[error("eval error: {0}")]
    Eval(#[from] EvalError),
    #[error("invalid suite '{path}': {count} issue(s)")]
    InvalidSuite { path: String, count: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "veridata", version, about = "Veridata data-quality CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a checkpoint over one or more dataset/suite bindings.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Checkpoint config (TOML) with ordered bindings.
    #[arg(long, conflicts_with_all = ["data", "suite"])]
    config: Option<PathBuf>,
    /// CSV dataset for a single ad-hoc binding.
    #[arg(long, requires = "suite")]
    data: Option<PathBuf>,
    /// Suite JSON document for a single ad-hoc binding.
    #[arg(long, requires = "data")]
    suite: Option<PathBuf>,
    /// Checkpoint name for ad-hoc runs.
    #[arg(long, default_value = "adhoc")]
    name: String,
    /// Output directory for run artifacts.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Override the bundled suite JSON Schema.
    #[arg(long)]
    suite_schema: Option<PathBuf>,
    /// Exit non-zero when any expectation fails.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Cap on failing values captured per result.
    #[arg(long, default_value_t = 20)]
    max_examples: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Check(args) => check(args),
    }
}

fn check(args: CheckArgs) -> Result<(), CliError> {
    let (name, pairs) = resolve_bindings(&args)?;

    fs::create_dir_all(&args.run_dir)?;
    if let Err(err) = logging::init_run_logging(&args.run_dir.join("logs.ndjson")) {
        eprintln!("warning: run logging unavailable: {err}");
    }

    tracing::info!(
        checkpoint = %name,
        suite_version = veridata_suite::SUITE_VERSION,
        strict = args.strict,
        "check starting"
    );

    let suite_schema = load_suite_schema(args.suite_schema.as_deref())?;

    let mut bindings = Vec::with_capacity(pairs.len());
    for (data_path, suite_path) in pairs {
        let suite = load_suite(&suite_path, &suite_schema)?;
        bindings.push(Binding::new(CsvSource::new(data_path), suite));
    }

    let checkpoint = Checkpoint::new(
        name,
        EvalOptions {
            max_examples: args.max_examples,
        },
    );
    let report = checkpoint.run(&bindings);

    let run_root = args.run_dir.join(format!(
        "{}__run_{}",
        report.started_at.format("%Y-%m-%dT%H-%M-%SZ"),
        report.run_id
    ));
    fs::create_dir_all(&run_root)?;

    let report_json_path = run_root.join("run_report.json");
    fs::write(&report_json_path, serde_json::to_vec_pretty(&report.document())?)?;

    let report_md_path = run_root.join("report.md");
    fs::write(&report_md_path, render_report(&report, args.max_examples))?;

    println!(
        "checkpoint '{}' {}: {} expectation(s), {} failing",
        report.checkpoint,
        if report.success() { "passed" } else { "failed" },
        report.results.len(),
        report.failure_count()
    );
    println!("  report: {}", report_md_path.display());
    println!("  results: {}", report_json_path.display());

    if args.strict && !report.success() {
        return Err(EvalError::FailedExpectations(report.failure_count()).into());
    }

    Ok(())
}

fn resolve_bindings(args: &CheckArgs) -> Result<(String, Vec<(PathBuf, PathBuf)>), CliError> {
    if let Some(config_path) = &args.config {
        let raw = fs::read_to_string(config_path)?;
        let config: CheckpointConfig = toml::from_str(&raw)?;
        if config.bindings.is_empty() {
            return Err(CliError::InvalidConfig(format!(
                "checkpoint '{}' declares no bindings",
                config.name
            )));
        }
        let pairs = config
            .bindings
            .into_iter()
            .map(|binding| (binding.data, binding.suite))
            .collect();
        return Ok((config.name, pairs));
    }

    match (&args.data, &args.suite) {
        (Some(data), Some(suite)) => Ok((args.name.clone(), vec![(data.clone(), suite.clone())])),
        _ => Err(CliError::InvalidConfig(
            "provide --config, or --data together with --suite".to_string(),
        )),
    }
}

fn load_suite_schema(path: Option<&Path>) -> Result<serde_json::Value, CliError> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)?,
        None => SUITE_SCHEMA.to_string(),
    };
    Ok(serde_json::from_str(&raw)?)
}

fn load_suite(
    path: &Path,
    schema: &serde_json::Value,
) -> Result<veridata_suite::ExpectationSuite, CliError> {
    let raw = fs::read_to_string(path)?;
    let doc: serde_json::Value = serde_json::from_str(&raw)?;

    match validate_suite_document(&doc, schema) {
        Ok(validated) => {
            for issue in &validated.warnings {
                warn!(
                    suite = %path.display(),
                    code = %issue.code,
                    path = %issue.path,
                    "{}",
                    issue.message
                );
            }
            Ok(validated.suite)
        }
        Err(report) => {
            print_issues(path, &report);
            Err(CliError::InvalidSuite {
                path: path.display().to_string(),
                count: report.errors.len(),
            })
        }
    }
}

fn print_issues(path: &Path, report: &ValidationReport) {
    for issue in report.errors.iter().chain(&report.warnings) {
        let hint = issue
            .hint
            .as_ref()
            .map(|hint| format!(" (hint: {hint})"))
            .unwrap_or_default();
        eprintln!(
            "{}: [{}] {} at {}{}",
            path.display(),
            issue.code,
            issue.message,
            issue.path,
            hint
        );
    }
}
