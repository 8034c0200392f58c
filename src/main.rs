//! CLI entry point for the report card generator.
//!
//! Reads course, student, test and mark tables and writes a JSON report card,
//! or a single-field error document when any input is invalid.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use reportcards::invocation::{Invocation, error_destinations};
use reportcards::output::{write_error, write_report};
use reportcards::{Error, reportcard};
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "reportcards")]
#[command(version, about = "Build student report cards from CSV tables", long_about = None)]
struct Cli {
    /// courses.csv students.csv tests.csv marks.csv output.json
    #[arg(value_name = "FILE")]
    params: Vec<String>,

    /// Pretty-print the report card
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e)
            if matches!(
                e.kind(),
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion
            ) =>
        {
            e.exit()
        }
        Err(e) => {
            warn!(error = %e, "Argument parsing failed");
            return invalid_invocation(
                std::env::args_os()
                    .skip(1)
                    .map(|a| a.to_string_lossy().into_owned()),
            );
        }
    };

    let invocation = match Invocation::from_params(&cli.params) {
        Ok(invocation) => invocation,
        Err(_) => return invalid_invocation(&cli.params),
    };

    match generate(&invocation, cli.pretty) {
        Ok(()) => {
            println!(
                "Report cards have been written to {}.",
                invocation.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = ?e.kind(), error = %e, "Report card generation failed");
            report_failure(std::slice::from_ref(&invocation.output), &e.to_string())
        }
    }
}

/// Runs the pipeline and writes the report card.
#[tracing::instrument(skip_all, fields(output = %invocation.output.display()))]
fn generate(invocation: &Invocation, pretty: bool) -> reportcards::Result<()> {
    let report = reportcard::run(&invocation.sources)?;
    write_report(&invocation.output, &report, pretty)?;
    info!(students = report.students.len(), "Report card written");
    Ok(())
}

fn invalid_invocation<I, S>(params: I) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let destinations = error_destinations(params);
    if destinations.is_empty() {
        warn!("No output document among the parameters");
    }
    report_failure(&destinations, &Error::InvalidInvocation.to_string())
}

/// Writes the error document to every destination and echoes the message.
fn report_failure(destinations: &[PathBuf], message: &str) -> ExitCode {
    for destination in destinations {
        if let Err(e) = write_error(destination, message)
            .with_context(|| format!("failed to write {}", destination.display()))
        {
            error!(error = %format!("{e:#}"), "Error document not written");
        }
    }
    eprintln!("error: {message}");
    ExitCode::FAILURE
}

/// Logging setup: colored stderr, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set.
fn init_tracing() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("RUST_LOG")
                .from_env_lossy(),
        );

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_path = Path::new(&log_file_path);
            let log_dir = log_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = log_path
                .file_name()
                .unwrap_or(OsStr::new("reportcards.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::DEBUG.into())
                        .with_env_var("RUST_LOG_JSON")
                        .from_env_lossy(),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}
