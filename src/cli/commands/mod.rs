//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves its inputs (arguments first, then configuration)
//! 2. Calls into the manifest and engine layers
//! 3. Formats and displays output

mod check;
mod completion;
mod config_cmd;
mod trace;

// Re-export command functions for testing and direct invocation
pub use check::check;
pub use completion::completion;
pub use config_cmd::list as config_list;
pub use trace::trace;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::manifest::{Manifest, ValidatedManifest};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Check { manifest, symbols } => check::check(ctx, manifest.as_deref(), symbols),
        Command::Trace {
            manifest,
            root,
            fail,
            builtin,
            repeat,
        } => trace::trace(
            ctx,
            manifest.as_deref(),
            root.as_deref(),
            &fail,
            builtin,
            repeat,
        ),
        Command::Config => config_cmd::list(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Resolve the manifest path: explicit argument, then project config,
/// then the default file name in the working directory.
fn resolve_manifest(ctx: &Context, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => ctx.cwd.join(path),
        None => ctx.config.manifest_path(&ctx.cwd),
    }
}

/// Load and validate the manifest at `path`.
fn load_manifest(path: &Path) -> Result<ValidatedManifest> {
    let manifest = Manifest::load(path)?;
    manifest
        .validate()
        .with_context(|| format!("Invalid manifest '{}'", path.display()))
}
