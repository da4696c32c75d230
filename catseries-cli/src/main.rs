//! catseries CLI — run the pipeline and manage its config.
//!
//! Commands:
//! - `run` — fetch the three sources (HTTP or local files), normalize, merge,
//!   group, print a per-category summary, optionally write JSON/CSV
//! - `config` — print or write the default TOML config

use anyhow::{Context, Result};
use catseries_core::config::Config;
use catseries_core::export::{export_merged_csv, export_report_json};
use catseries_core::pipeline::{self, RunReport};
use catseries_core::source::{FileProvider, HttpProvider, SourceProvider};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catseries",
    about = "catseries CLI — merge three category time series into chart-ready totals"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all three sources and run the pipeline.
    Run {
        /// Path to a TOML config file. Defaults to the built-in endpoints.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Read data1.json, data2.json and data3.json from this directory instead of HTTP.
        #[arg(long)]
        from_dir: Option<PathBuf>,

        /// Write the full JSON report here.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the merged records as CSV here.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the default config, or write it to a file.
    Config {
        /// Write to this path instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            from_dir,
            output,
            csv,
        } => run_cmd(config, from_dir, output, csv),
        Commands::Config { output } => config_cmd(output),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_cmd(
    config_path: Option<PathBuf>,
    from_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let provider: Box<dyn SourceProvider> = match from_dir {
        Some(dir) => Box::new(FileProvider::in_dir(dir)),
        None => Box::new(HttpProvider::new(config.sources.clone())?),
    };
    info!(provider = provider.name(), "starting run");

    let report = pipeline::run(provider.as_ref(), &config.chart)
        .context("pipeline run failed")?;

    print_summary(&report);

    if let Some(path) = output {
        let json = export_report_json(&report)?;
        write_file(&path, &json)?;
        println!("Report saved to: {}", path.display());
    }

    if let Some(path) = csv {
        let text = export_merged_csv(&report.merged)?;
        write_file(&path, &text)?;
        println!("Merged records saved to: {}", path.display());
    }

    Ok(())
}

fn config_cmd(output: Option<PathBuf>) -> Result<()> {
    let text = Config::default().to_toml()?;
    match output {
        Some(path) => {
            write_file(&path, &text)?;
            println!("Config written to: {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn print_summary(report: &RunReport) {
    let grouped = &report.grouped;

    println!("Input fingerprint: {}", report.fingerprint.short());
    println!(
        "Records: {} canonical, {} merged, {} categories",
        report.canonical_count,
        report.merged.len(),
        grouped.categories.len()
    );

    if let (Some(first), Some(last)) = (report.merged.first(), report.merged.last()) {
        println!(
            "Range: {} .. {}",
            format_date(first.timestamp),
            format_date(last.timestamp)
        );
    }

    println!();
    println!(
        "{:<12} {:>8} {:>14} {:>8}",
        "category",
        "points",
        "subtotal",
        "share"
    );
    for slice in &report.chart.pie {
        let Some(cat) = grouped.category(&slice.name) else {
            continue;
        };
        let marker = if slice.highlighted { " *" } else { "" };
        println!(
            "{:<12} {:>8} {:>14.2} {:>7.1}%{marker}",
            slice.name,
            cat.points.len(),
            cat.subtotal,
            slice.percentage
        );
    }
    println!("{:<12} {:>8} {:>14.2}", "TOTAL", "", grouped.grand_total);
}

fn format_date(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))
}
