//! `terminal-info` entry point

use crate::report::{HumanReport, SettingsReport};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use termcompat::{detect_with, DetectOptions, RenderSettings, SizeStrategy, SystemHost, TerminalSettings};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Report detected terminal capabilities")]
pub struct Args {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Log level when not verbose (defaults to RUST_LOG, then warn)
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Timeout for each tput/stty helper, in milliseconds
    #[arg(long, default_value = "1000")]
    timeout_ms: u64,

    /// Size strategies to try, in order (defaults to all)
    #[arg(long = "strategy", value_enum)]
    strategies: Vec<SizeStrategy>,

    /// Never spawn tput or stty
    #[arg(long)]
    no_commands: bool,

    /// Terminal settings file (JSON) to resolve against the detection
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn detect_options(&self) -> DetectOptions {
        let mut options = DetectOptions {
            command_timeout: Duration::from_millis(self.timeout_ms),
            ..DetectOptions::default()
        };
        if !self.strategies.is_empty() {
            options.strategies = self.strategies.clone();
        }
        if self.no_commands {
            options = options.without_commands();
        }
        options
    }
}

fn log_filter(args: &Args) -> EnvFilter {
    if args.verbose {
        return EnvFilter::new(LogLevel::Debug.directive());
    }
    match args.log_level {
        Some(level) => EnvFilter::new(level.directive()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(LogLevel::Warn.directive())),
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = log_filter(args);

    match &args.log_file {
        Some(path) => {
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(log_file)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn load_settings(path: &Path) -> Result<TerminalSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let settings: TerminalSettings = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid terminal settings in {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}

/// Detect, print the report and return the process exit code.
pub fn run() -> Result<i32> {
    let args = Args::parse();
    init_logging(&args)?;

    let settings = args.config.as_deref().map(load_settings).transpose()?;
    let options = args.detect_options();
    debug!("Detection options: {:?}", options);

    let info = detect_with(&SystemHost::new(), &options);
    let resolved = settings
        .as_ref()
        .map(|settings| RenderSettings::resolve(&info, settings));

    let mut stdout = io::stdout().lock();
    if args.json {
        let mut value = serde_json::to_value(&info)?;
        if let Some(resolved) = &resolved {
            value["render_settings"] = json!(resolved);
        }
        writeln!(stdout, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        write!(stdout, "{}", HumanReport(&info))?;
        if let Some(resolved) = &resolved {
            write!(stdout, "{}", SettingsReport(resolved))?;
        }
    }
    stdout.flush()?;

    let code = info.exit_code();
    info!("terminal-info exiting with {}", code);
    Ok(code)
}
