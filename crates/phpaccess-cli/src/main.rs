//! phpaccess CLI - getter/setter generator for PHP classes
//!
//! Available actions:
//! - getters-setters: Generate missing getters and setters
//! - getters: Generate missing getters
//! - setters: Generate missing setters
//!
//! `phpaccess lsp` serves the same actions as LSP code actions.

mod config;
mod lsp;
mod output;
mod picker;
mod process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;
use output::{OutputFormat, Reporter};
use phpaccess_gen::{AcceptAll, Action, GenerateOptions, Severity, Visibility};
use picker::TerminalPicker;
use process::{process_file, write_file, FileResult};

/// Environment variable holding the log filter
const LOG_ENV: &str = "PHPACCESS_LOG";

#[derive(Parser)]
#[command(name = "phpaccess")]
#[command(version)]
#[command(about = "Generate missing getters and setters for PHP classes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate missing getters and setters
    #[command(name = "getters-setters")]
    GettersSetters(ActionArgs),

    /// Generate missing getters
    Getters(ActionArgs),

    /// Generate missing setters
    Setters(ActionArgs),

    /// Run as a language server on stdio
    Lsp(SettingsArgs),
}

/// Options shared by every subcommand
#[derive(Args)]
struct SettingsArgs {
    /// Property visibility to generate for: private, public
    #[arg(long, value_name = "VISIBILITY")]
    visibility: Option<String>,

    /// Indentation width for generated code
    #[arg(long, value_name = "N")]
    tab_size: Option<String>,

    /// Path to config file (default: auto-detect .phpaccess.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Args)]
struct ActionArgs {
    /// PHP file to process
    path: PathBuf,

    /// Write the generated methods to the file
    #[arg(long)]
    fix: bool,

    /// Include every candidate class without prompting
    #[arg(long, short = 'y')]
    yes: bool,

    /// Output format: text, json, diff
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    #[command(flatten)]
    settings: SettingsArgs,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (action, args) = match cli.command {
        Command::GettersSetters(args) => (Action::GenerateGettersAndSetters, args),
        Command::Getters(args) => (Action::GenerateGetters, args),
        Command::Setters(args) => (Action::GenerateSetters, args),
        Command::Lsp(settings) => return run_lsp(&settings),
    };

    init_logging(args.settings.verbose);
    run_action(action, &args)
}

/// Install the stderr subscriber; stdout carries reports and the LSP transport
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(settings: &SettingsArgs) -> Result<Config> {
    if settings.no_config {
        return Ok(Config::default());
    }

    if let Some(config_path) = &settings.config {
        debug!(path = %config_path.display(), "using config");
        return Config::load_path(config_path);
    }

    match Config::load()? {
        Some((config, path)) => {
            debug!(path = %path.display(), "using config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn parse_visibility(raw: Option<&str>) -> Result<Option<Visibility>> {
    raw.map(|value| {
        Visibility::from_str(value).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid visibility '{}'. Valid options: private, public",
                value
            )
        })
    })
    .transpose()
}

fn output_format(args: &ActionArgs, config: &Config) -> Result<OutputFormat> {
    if args.json {
        return Ok(OutputFormat::Json);
    }

    let raw = args
        .format
        .as_deref()
        .or(config.output.format.as_deref())
        .unwrap_or("text");

    OutputFormat::from_str(raw).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid output format '{}'. Valid options: text, json, diff",
            raw
        )
    })
}

fn run_action(action: Action, args: &ActionArgs) -> Result<ExitCode> {
    let config = load_config(&args.settings)?;
    let format = output_format(args, &config)?;
    let visibility = config.effective_visibility(parse_visibility(args.settings.visibility.as_deref())?);
    let tab_size = config.effective_tab_size(args.settings.tab_size.as_deref());

    let options = GenerateOptions::new(action.kinds())
        .with_visibility(visibility)
        .with_tab_size(tab_size);

    debug!(
        action = action.name(),
        %visibility,
        tab_size,
        fix = args.fix,
        "running action"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start async runtime")?;

    let result = runtime.block_on(async {
        if args.yes {
            process_file(&args.path, &options, &mut AcceptAll).await
        } else {
            // prompts go to stderr so stdout carries only the report
            let stdin = std::io::stdin();
            let mut picker = TerminalPicker::new(stdin.lock(), std::io::stderr());
            process_file(&args.path, &options, &mut picker).await
        }
    })?;

    let reporter = Reporter::new(format, args.settings.verbose);
    report(&reporter, &args.path, result, args.fix)
}

fn report(reporter: &Reporter, path: &Path, result: FileResult, fix: bool) -> Result<ExitCode> {
    match result {
        FileResult::Edited(result) => {
            if fix {
                write_file(path, &result.new_source)?;
            }
            reporter.report_edits(path, &result, fix);

            if fix {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(2))
            }
        }
        FileResult::Cancelled => {
            reporter.report_cancelled(path);
            Ok(ExitCode::SUCCESS)
        }
        FileResult::Stopped(error) => {
            reporter.report_stopped(path, &error);
            match error.severity() {
                Severity::Error => Ok(ExitCode::from(1)),
                Severity::Info | Severity::Silent => Ok(ExitCode::SUCCESS),
            }
        }
    }
}

fn run_lsp(settings: &SettingsArgs) -> Result<ExitCode> {
    init_logging(settings.verbose);

    let config = load_config(settings)?;
    let lsp_settings = lsp::LspSettings {
        visibility: config.effective_visibility(parse_visibility(settings.visibility.as_deref())?),
        tab_size: config.effective_tab_size(settings.tab_size.as_deref()),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(lsp::run_lsp_server(lsp_settings));

    Ok(ExitCode::SUCCESS)
}
