//! Thesis Harvester main entry point
//!
//! This is the command-line interface for the thesis harvester.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use thesis_harvester::config::{load_config, validate, Config};
use thesis_harvester::crawler::{format_department_list, Coordinator, RunReport, Selection};
use thesis_harvester::{ConfigError, OutputFormat};
use tracing_subscriber::EnvFilter;

const HELP_HINTS: &str = "\
Department codes are the subdomain of the department site, not its acronym:
    DIFA -> fisica-astronomia
    CHIMIND -> chimica-industriale
Run with --list to see every code, or browse
    https://www.unibo.it/it/ateneo/sedi-e-strutture/dipartimenti";

/// Thesis Harvester: collects proposed and assigned theses per department
///
/// Crawls the department directory, the faculty listing of every requested
/// department and each faculty member's thesis tab, then writes one AsciiDoc
/// or LaTeX document per department.
#[derive(Parser, Debug)]
#[command(name = "thesis-harvester")]
#[command(version)]
#[command(about = "Collects thesis listings from university department sites", long_about = None)]
#[command(after_help = HELP_HINTS)]
struct Cli {
    /// Department codes to harvest, e.g. disi
    #[arg(value_name = "CODE")]
    codes: Vec<String>,

    /// Harvest every department of the directory
    #[arg(long, conflicts_with_all = ["codes", "list"])]
    all: bool,

    /// Print every department code and name, then exit
    #[arg(short, long)]
    list: bool,

    /// Directory receiving the generated documents [default: site]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Document format [default: asciidoc]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Thesis pages fetched at the same time within a department
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Do not log every visited URL
    #[arg(short, long)]
    quiet: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let coordinator = match Coordinator::new(config) {
        Ok(coordinator) => coordinator,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.list {
        handle_list(&coordinator).await
    } else if cli.all {
        handle_harvest(&coordinator, Selection::All).await
    } else if cli.codes.is_empty() {
        handle_no_selection(&coordinator).await
    } else {
        handle_harvest(&coordinator, Selection::Codes(cli.codes.clone())).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("thesis_harvester=info,warn"),
        1 => EnvFilter::new("thesis_harvester=debug,info"),
        2 => EnvFilter::new("thesis_harvester=trace,debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the run configuration: defaults, then the config file, then flags
fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(jobs) = cli.jobs {
        config.client.concurrency = jobs;
    }
    if cli.quiet {
        config.client.log_visits = false;
    }

    validate(&config)?;
    Ok(config)
}

/// Handles --list: prints every department sorted by code
async fn handle_list(coordinator: &Coordinator) -> ExitCode {
    match coordinator.departments().await {
        Ok(departments) => {
            for line in format_department_list(&departments) {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to list departments: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Handles a run without any department code
async fn handle_no_selection(coordinator: &Coordinator) -> ExitCode {
    eprintln!("No department code given. Pass one or more codes, or --all.\n");
    match coordinator.departments().await {
        Ok(departments) => print_available(&format_department_list(&departments)),
        Err(e) => tracing::error!("Failed to list departments: {}", e),
    }
    ExitCode::FAILURE
}

/// Handles the main harvest operation
async fn handle_harvest(coordinator: &Coordinator, selection: Selection) -> ExitCode {
    tracing::info!(
        "Writing {} documents to {}",
        coordinator.config().output.format,
        coordinator.config().output.directory.display()
    );

    match coordinator.run(&selection).await {
        Ok(report) => {
            print_report(&report);
            report.exit_code()
        }
        Err(e) => {
            tracing::error!("Harvest aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &RunReport) {
    for (code, path) in &report.written {
        println!("✓ {} -> {}", code, path.display());
    }
    for (code, error) in &report.failed {
        println!("✗ {}: {}", code, error);
    }

    if !report.unresolved.is_empty() {
        println!(
            "\nUnknown department code(s): {}",
            report.unresolved.join(", ")
        );
        print_available(&report.available);
    }
}

fn print_available(lines: &[String]) {
    println!("Available departments (use the code):");
    for line in lines {
        println!("  {}", line);
    }
}
