//! Command-line front-end.
//!
//! Parsing is left to `clap`; the result is converted into the command-line
//! configuration tier without re-tokenising anything.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser};

use crate::config::CliValues;
use crate::config::keys::{
    CONFIG, CYCLE_ID, DRY_RUN, ENVIRONMENT_FILE, EXCLUDE, FORMAT, LANG, LOGGING_LEVEL, NAME,
    OUTFILES, PATHS, STEPS_DIR, STOP, SUITE, SUITES_DIRECTORY, TAGS, USERDATA_DEFINES, VERBOSE,
};

/// Resolve a behavioural test run and print the plan as JSON.
#[derive(Debug, Default, Parser)]
#[command(name = "systest", version, about)]
pub struct CommandLine {
    /// Test suite to run, e.g. `mock` or `r2d2-3.2.1`.
    #[arg(short = 's', long = "suite", value_name = "SUITE")]
    pub suite: Option<String>,

    /// Directory containing the suite directories.
    #[arg(long = "suites-dir", value_name = "DIR")]
    pub suites_dir: Option<Utf8PathBuf>,

    /// Configuration file read above the project file.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Create a new suite skeleton with this name and exit.
    #[arg(long = "create-suite", value_name = "NAME")]
    pub create_suite: Option<String>,

    /// Only run scenarios matching the tag expression.
    #[arg(short = 't', long = "tags", value_name = "TAG_EXPRESSION", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Only run scenarios whose name matches the pattern.
    #[arg(short = 'n', long = "name", value_name = "PATTERN", action = ArgAction::Append)]
    pub name: Vec<String>,

    /// Output formatter.
    #[arg(short = 'f', long = "format", value_name = "FORMAT", action = ArgAction::Append)]
    pub format: Vec<String>,

    /// Output file for the matching formatter.
    #[arg(short = 'o', long = "outfile", value_name = "FILE", action = ArgAction::Append)]
    pub outfiles: Vec<String>,

    /// User data definition, `name=value`.
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE", action = ArgAction::Append)]
    pub define: Vec<String>,

    /// Test cycle identifier forwarded to reporters.
    #[arg(long = "cycle-id", value_name = "ID")]
    pub cycle_id: Option<String>,

    /// Name of the step-module directory in each feature area.
    #[arg(long = "steps-dir", value_name = "DIR")]
    pub steps_dir: Option<String>,

    /// File name of the per-area hooks module.
    #[arg(long = "environment-file", value_name = "FILE")]
    pub environment_file: Option<String>,

    /// Skip feature files matching the regular expression.
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    pub exclude: Option<String>,

    /// Gherkin language of the feature files.
    #[arg(short = 'l', long = "lang", value_name = "LANG")]
    pub lang: Option<String>,

    /// Log level forwarded to the execution engine.
    #[arg(long = "logging-level", value_name = "LEVEL")]
    pub logging_level: Option<String>,

    /// Stop at the first failure.
    #[arg(long = "stop", action = ArgAction::SetTrue)]
    pub stop: bool,

    /// Resolve and report without running steps.
    #[arg(short = 'd', long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Verbose output.
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Target expressions: areas, feature files, `file.feature:LINE`, globs
    /// or `@file` indirection files.
    #[arg(value_name = "PATHS")]
    pub paths: Vec<String>,
}

impl CommandLine {
    /// The command-line configuration tier.
    ///
    /// Options that were not given stay unset so lower tiers apply.
    #[must_use]
    pub fn cli_values(&self) -> CliValues {
        let mut cli = CliValues::new();
        cli.set_opt(SUITE, self.suite.as_deref());
        cli.set_opt(SUITES_DIRECTORY, self.suites_dir.as_deref().map(Utf8Path::as_str));
        cli.set_opt(CONFIG, self.config.as_deref().map(Utf8Path::as_str));
        cli.set_opt(CYCLE_ID, self.cycle_id.as_deref());
        cli.set_opt(STEPS_DIR, self.steps_dir.as_deref());
        cli.set_opt(ENVIRONMENT_FILE, self.environment_file.as_deref());
        cli.set_opt(EXCLUDE, self.exclude.as_deref());
        cli.set_opt(LANG, self.lang.as_deref());
        cli.set_opt(LOGGING_LEVEL, self.logging_level.as_deref());
        cli.set_flag(STOP, self.stop);
        cli.set_flag(DRY_RUN, self.dry_run);
        cli.set_flag(VERBOSE, self.verbose);
        cli.extend(TAGS, self.tags.iter().map(String::as_str));
        cli.extend(NAME, self.name.iter().map(String::as_str));
        cli.extend(FORMAT, self.format.iter().map(String::as_str));
        cli.extend(OUTFILES, self.outfiles.iter().map(String::as_str));
        cli.extend(USERDATA_DEFINES, self.define.iter().map(String::as_str));
        cli.extend(PATHS, self.paths.iter().map(String::as_str));
        cli
    }
}
