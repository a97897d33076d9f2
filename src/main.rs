use anyhow::{Context, Result};
use autocheck::render::{RunSummary, render_text};
use autocheck::serialize::to_json_pretty;
use autocheck::{CheckError, Severity};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// autocheck - structural checks for automation YAML
#[derive(Parser)]
#[command(name = "autocheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML file to check; `-` or omitted reads stdin
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also print the parsed root as JSON
    #[arg(short, long)]
    preview: bool,

    /// Check the bundled sample document instead of reading input
    #[arg(long, conflicts_with = "input")]
    sample: bool,

    /// Exit non-zero when any warning is reported
    #[arg(long)]
    deny_warnings: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(true)` when the run should exit successfully.
fn run(cli: &Cli) -> Result<bool> {
    let text = read_input(cli)?;

    let result = match autocheck::check(&text) {
        Ok(result) => result,
        Err(e) => {
            emit_failure(cli.format, &e)?;
            return Ok(false);
        }
    };

    let notices = result.notices();
    match cli.format {
        Format::Text => print!("{}", render_text(&notices, &result.reports)),
        Format::Json => {
            let summary = RunSummary::new(result.document_count, &notices, &result.reports);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    if cli.preview
        && let Some(root) = &result.root
    {
        println!("{}", to_json_pretty(root)?);
    }

    let failed = result.count(Severity::Error) > 0
        || (cli.deny_warnings && result.count(Severity::Warning) > 0);
    Ok(!failed)
}

fn read_input(cli: &Cli) -> Result<String> {
    if cli.sample {
        return Ok(autocheck::SAMPLE.to_string());
    }
    match &cli.input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn emit_failure(format: Format, error: &CheckError) -> Result<()> {
    let diagnostic = error.to_diagnostic();
    match format {
        Format::Text => print!("{}", render_text(&[diagnostic], &[])),
        Format::Json => {
            let notices = [diagnostic];
            let summary = RunSummary::new(0, &notices, &[]);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
