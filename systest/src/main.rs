//! `systest` entry point: resolve a run and print the plan for the engine.

use std::io::Write;

use clap::Parser;
use color_eyre::eyre::{Report, WrapErr};
use tracing_subscriber::EnvFilter;

use systest::cli::CommandLine;
use systest::config::{ConfigLoader, merge_sources};
use systest::suite::SuiteLocator;
use systest::{ResolutionRequest, create_suite, resolve};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = CommandLine::parse();
    init_tracing(cli.verbose);
    match cli.create_suite.as_deref() {
        Some(name) => run_create_suite(&cli, name),
        None => run_resolve(&cli),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_resolve(cli: &CommandLine) -> color_eyre::Result<()> {
    let plan = resolve(&ResolutionRequest::new(cli.cli_values())).map_err(Report::new)?;
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &plan).wrap_err("failed to write the plan")?;
    writeln!(stdout).wrap_err("failed to write the plan")?;
    Ok(())
}

fn run_create_suite(cli: &CommandLine, name: &str) -> color_eyre::Result<()> {
    let values = cli.cli_values();
    let loader = ConfigLoader::new().maybe_explicit_file(cli.config.clone());
    let sources = loader.load().map_err(Report::new)?;
    let configuration = merge_sources(&sources, &values).map_err(Report::new)?;
    let locator = SuiteLocator::from_config(&configuration).map_err(Report::new)?;
    let root = create_suite(name, locator.suites_dir()).map_err(Report::new)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "created test suite '{root}'").wrap_err("failed to report the new suite")?;
    Ok(())
}
