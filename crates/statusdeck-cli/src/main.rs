//! statusdeck CLI - Project Status Reporting
//!
//! Command-line interface for loading a project workbook, deriving the
//! monthly status report, and rendering it.

mod config;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use statusdeck_core::{Renderer, StatusReport};
use statusdeck_engine::{MemberStrategy, ReportEngine, SystemClock};
use statusdeck_render::{ExcelRenderer, HtmlDashboardRenderer, JsonRenderer, TextRenderer};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "statusdeck")]
#[command(author, version, about = "Project status reporting", long_about = None)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a workbook and report what was found
    Check {
        /// Input workbook (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Build the status report for the current month
    Report {
        /// Input workbook (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (inferred from --output extension, else text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Evaluate as of this date instead of today (YYYY-MM-DD)
        #[arg(long, env = "STATUSDECK_AS_OF", value_name = "DATE")]
        as_of: Option<NaiveDate>,

        /// Report title
        #[arg(long)]
        title: Option<String>,

        /// Config file (default: statusdeck.toml beside FILE)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Active member selection (assignments, allocated-hours)
        #[arg(long)]
        strategy: Option<MemberStrategy>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
    Xlsx,
}

impl OutputFormat {
    fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { file } => cmd_check(&file),
        Commands::Report {
            file,
            format,
            output,
            as_of,
            title,
            config,
            strategy,
        } => {
            let config = Config::discover(&file, config.as_deref())?;
            let format = format
                .or_else(|| output.as_deref().and_then(OutputFormat::from_extension))
                .unwrap_or(OutputFormat::Text);
            let options = ReportOptions {
                format,
                as_of,
                title: title.or(config.title.clone()),
                strategy: strategy.or(config.member_strategy).unwrap_or_default(),
            };
            cmd_report(&file, output.as_deref(), &options, config)
        }
    }
}

fn cmd_check(file: &Path) -> Result<()> {
    let data = statusdeck_loader::load_file(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    println!("{}: OK", file.display());
    println!("  tasks:       {}", data.tasks.len());
    println!("  risks:       {}", data.risks.len());
    println!("  issues:      {}", data.issues.len());
    println!("  resources:   {}", data.resources.len());
    println!("  assignments: {}", data.assignments.len());
    Ok(())
}

struct ReportOptions {
    format: OutputFormat,
    as_of: Option<NaiveDate>,
    title: Option<String>,
    strategy: MemberStrategy,
}

fn cmd_report(
    file: &Path,
    output: Option<&Path>,
    options: &ReportOptions,
    config: Config,
) -> Result<()> {
    let data = statusdeck_loader::load_file(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let engine = ReportEngine::new().member_strategy(options.strategy);
    let report = match options.as_of {
        Some(today) => engine.report_as_of(&data, today),
        None => engine.run(&data, &SystemClock),
    };
    info!(
        as_of = %report.as_of,
        format = ?options.format,
        strategy = %options.strategy,
        "Report built"
    );

    let bytes = render(&report, options, config)?;
    match output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!(path = %path.display(), bytes = bytes.len(), "Wrote report");
        }
        None => {
            if options.format == OutputFormat::Xlsx {
                bail!("XLSX output needs --output");
            }
            std::io::stdout()
                .write_all(&bytes)
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn render(report: &StatusReport, options: &ReportOptions, config: Config) -> Result<Vec<u8>> {
    let title = options.title.clone();
    let bytes = match options.format {
        OutputFormat::Text => {
            let mut renderer = TextRenderer::new();
            if let Some(title) = title {
                renderer = renderer.title(title);
            }
            renderer.render(report)?.into_bytes()
        }
        OutputFormat::Json => JsonRenderer::new().render(report)?.into_bytes(),
        OutputFormat::Html => {
            let mut renderer = HtmlDashboardRenderer::new().photos(config.photos);
            if let Some(title) = title {
                renderer = renderer.title(title);
            }
            renderer.render(report)?.into_bytes()
        }
        OutputFormat::Xlsx => {
            let mut renderer = ExcelRenderer::new();
            if let Some(title) = title {
                renderer = renderer.title(title);
            }
            renderer.render(report)?
        }
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            OutputFormat::from_extension(Path::new("out/status.HTML")),
            Some(OutputFormat::Html)
        );
        assert_eq!(
            OutputFormat::from_extension(Path::new("status.xlsx")),
            Some(OutputFormat::Xlsx)
        );
        assert_eq!(OutputFormat::from_extension(Path::new("status")), None);
        assert_eq!(OutputFormat::from_extension(Path::new("status.pdf")), None);
    }

    #[test]
    fn report_flags_parse() {
        let cli = Cli::try_parse_from([
            "statusdeck",
            "report",
            "data.json",
            "--as-of",
            "2024-03-15",
            "--strategy",
            "allocated-hours",
            "-f",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Report {
                as_of,
                strategy,
                format,
                ..
            } => {
                assert_eq!(as_of, NaiveDate::from_ymd_opt(2024, 3, 15));
                assert_eq!(strategy, Some(MemberStrategy::AllocatedHours));
                assert_eq!(format, Some(OutputFormat::Json));
            }
            Commands::Check { .. } => panic!("expected report"),
        }
    }
}
