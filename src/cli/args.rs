//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// modinit - Idempotent, dependency-ordered module initialization
#[derive(Parser, Debug)]
#[command(name = "modinit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if modinit was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a module manifest
    #[command(
        long_about = "Load a module manifest and check it: module names, \
            import references, duplicate entries, import cycles and the root module.\n\n\
            Import order is reported exactly as declared; it is never rearranged.",
        after_help = "\
EXAMPLES:
    # Check ./modules.toml
    modinit check

    # Check a specific manifest and list entry-point symbols
    modinit check build/modules.toml --symbols"
    )]
    Check {
        /// Manifest file (default: project config, then ./modules.toml)
        manifest: Option<PathBuf>,

        /// List each module's initializer symbol
        #[arg(long)]
        symbols: bool,
    },

    /// Run a manifest's initializers and report the order modules came up in
    #[command(
        long_about = "Assemble one initializer per module in the manifest and run the \
            root module's initializer.\n\n\
            Each module records itself when its own initialization runs, so the \
            output shows the exact order in which modules were brought up. \
            A module whose initialization already ran (or failed) is never run again.",
        after_help = "\
EXAMPLES:
    # Trace the manifest's root module
    modinit trace

    # Simulate a failing dependency, then show that a second call does not retry
    modinit trace --root Std --fail Std.Sat --repeat 2"
    )]
    Trace {
        /// Manifest file (default: project config, then ./modules.toml)
        manifest: Option<PathBuf>,

        /// Module to initialize (default: project config, then manifest root)
        #[arg(long)]
        root: Option<String>,

        /// Make this module's own initialization fail (repeatable)
        #[arg(long = "fail", value_name = "MODULE")]
        fail: Vec<String>,

        /// Initialize in builtin mode
        #[arg(long)]
        builtin: bool,

        /// Call the root initializer this many times
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        repeat: u32,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completion scripts
    #[command(
        long_about = "Generate shell completion scripts for modinit.",
        after_help = "\
INSTALLATION:
    # Bash
    modinit completion bash > ~/.local/share/bash-completion/completions/modinit

    # Zsh
    modinit completion zsh > ~/.zfunc/_modinit

    # Fish
    modinit completion fish > ~/.config/fish/completions/modinit.fish

    # PowerShell
    modinit completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
