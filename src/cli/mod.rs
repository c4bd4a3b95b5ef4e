//! cli
//!
//! Command-line interface layer for modinit.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and install logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that drive [`crate::manifest`] and [`crate::engine`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::core::config::{Config, DEFAULT_LOG_FILTER};
use crate::ui::output::{self, Verbosity};

/// Execution context for commands.
///
/// Global settings derived from CLI flags and configuration.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory.
    pub cwd: PathBuf,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// JSON output.
    pub json: bool,
    /// Effective configuration.
    pub config: Config,
}

impl Context {
    /// Output verbosity for this invocation.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_quiet(self.quiet)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let cwd = match cli.cwd.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine working directory")?,
    };

    let loaded = Config::load(Some(&cwd)).context("Failed to load config")?;
    init_tracing(cli.debug, &loaded.config);

    let ctx = Context {
        cwd,
        debug: cli.debug,
        quiet: cli.quiet,
        json: cli.json || loaded.config.json(),
        config: loaded.config,
    };

    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }

    commands::dispatch(cli.command, &ctx)
}

/// Install the stderr `tracing` subscriber.
///
/// Filter precedence: `MODINIT_LOG`, then `--debug`, then the configured
/// `log_filter`, then [`DEFAULT_LOG_FILTER`].
fn init_tracing(debug: bool, config: &Config) {
    let filter = EnvFilter::try_from_env("MODINIT_LOG").unwrap_or_else(|_| {
        let directive = if debug {
            "debug"
        } else {
            config.log_filter().unwrap_or(DEFAULT_LOG_FILTER)
        };
        EnvFilter::new(directive)
    });

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
