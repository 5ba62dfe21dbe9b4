//! CLI entry point for trendguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `trendguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use trendguard_app::{
    ExistingInput, ValidateInput, parse_report_json, render_annotations,
    render_markdown, render_text, run_existing, run_explain, run_validate, runtime_error_report,
    serialize_report, to_renderable, verdict_exit_code,
};
use trendguard_settings::Overrides;
use trendguard_types::TrendguardReport;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "trendguard",
    version,
    about = "Structural and cross-file consistency validator for GitHub Trending report sets"
)]
struct Cli {
    /// Path to trendguard config TOML. A missing file means defaults.
    #[arg(long, global = true, default_value = "trendguard.toml")]
    config: Utf8PathBuf,

    /// Override the output root that holds `<period>/<date>` report directories.
    #[arg(long, global = true)]
    output_root: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one report directory.
    Validate {
        /// Report directory; must be exactly `<output_root>/<period>/<date>`.
        #[arg(long)]
        report_dir: Utf8PathBuf,

        /// Report period (e.g. daily, weekly, monthly).
        #[arg(long)]
        period: String,

        /// Report date in YYYY-MM-DD format.
        #[arg(long)]
        date: String,

        /// What to print on stdout.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Also write the JSON report to this file.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Also write a Markdown summary to this file.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// Check whether the report for a period/date exists and is valid.
    ///
    /// Exit codes: 0 valid (reuse), 10 missing (generate), 20 invalid (regenerate).
    Existing {
        /// Report period (e.g. daily, weekly, monthly).
        #[arg(long)]
        period: String,

        /// Report date in YYYY-MM-DD format.
        #[arg(long)]
        date: String,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "html.structure") or code (e.g., "html_list_inside_paragraph") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Validate {
            ref report_dir,
            ref period,
            ref date,
            format,
            ref report_out,
            ref markdown_out,
        } => cmd_validate(
            &cli,
            report_dir,
            period,
            date,
            format,
            report_out.as_deref(),
            markdown_out.as_deref(),
        ),
        Commands::Existing {
            ref period,
            ref date,
        } => cmd_existing(&cli, period, date),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

/// Diagnostics go to stderr; stdout carries reports only.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("TRENDGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("TRENDGUARD_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
}

fn home_dir() -> Option<Utf8PathBuf> {
    std::env::var("HOME")
        .ok()
        .filter(|h| !h.is_empty())
        .map(Utf8PathBuf::from)
}

/// Missing config file is allowed (defaults apply); any other read failure is an error.
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(%path, "no config file; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {path}")),
    }
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        output_root: cli.output_root.clone(),
    }
}

fn cmd_validate(
    cli: &Cli,
    report_dir: &Utf8Path,
    period: &str,
    date: &str,
    format: OutputFormat,
    report_out: Option<&Utf8Path>,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config(&cli.config)?;
        let home = home_dir();

        let output = run_validate(ValidateInput {
            report_dir,
            period,
            date,
            config_text: &cfg_text,
            overrides: overrides(cli),
            home: home.as_deref(),
        })?;
        let report = output.report;

        if let Some(path) = report_out {
            write_report_file(path, &report).context("write report json")?;
        }
        let renderable = to_renderable(&report);
        if let Some(path) = markdown_out {
            write_text_file(path, &render_markdown(&renderable)).context("write markdown")?;
        }

        match format {
            OutputFormat::Text => print!("{}", render_text(&renderable)),
            OutputFormat::Json => print_report(&report)?,
        }

        Ok(verdict_exit_code(report.verdict.status))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"), period, date);
            if let Some(path) = report_out {
                let _ = write_report_file(path, &report);
            }
            if format == OutputFormat::Json {
                let _ = print_report(&report);
            }
            eprintln!("trendguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_existing(cli: &Cli, period: &str, date: &str) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config(&cli.config)?;
        let home = home_dir();
        let output = run_existing(ExistingInput {
            period,
            date,
            config_text: &cfg_text,
            overrides: overrides(cli),
            home: home.as_deref(),
        })?;
        let json = serde_json::to_string(&output.payload).context("serialize payload")?;
        println!("{json}");
        Ok(output.exit_code)
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("trendguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn print_report(report: &TrendguardReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    let text = String::from_utf8(data).context("report json is utf-8")?;
    println!("{text}");
    Ok(())
}

fn write_report_file(path: &Utf8Path, report: &TrendguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let renderable = to_renderable(&report);
    let md = render_markdown(&renderable);

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let renderable = to_renderable(&report);

    for annotation in render_annotations(&renderable, max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    let output = run_explain(identifier);
    if output.is_known() {
        print!("{}", output.render());
        return Ok(());
    }
    eprint!("{}", output.render());
    std::process::exit(1);
}
