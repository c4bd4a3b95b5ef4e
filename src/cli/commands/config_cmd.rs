//! config command - Show the effective configuration

use anyhow::Result;
use serde::Serialize;

use crate::cli::Context;
use crate::ui::output;

#[derive(Debug, Serialize)]
struct ConfigReport {
    builtin: bool,
    json: bool,
    log_filter: Option<String>,
    manifest: String,
    root: Option<String>,
    global_config: Option<String>,
    project_config: Option<String>,
}

/// List all effective configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let report = ConfigReport {
        builtin: config.builtin(),
        json: config.json(),
        log_filter: config.log_filter().map(String::from),
        manifest: config.manifest_path(&ctx.cwd).display().to_string(),
        root: config.root().map(String::from),
        global_config: config
            .global_config_loaded_from()
            .map(|p| p.display().to_string()),
        project_config: config
            .project_config_loaded_from()
            .map(|p| p.display().to_string()),
    };

    if ctx.json {
        output::json(&report)?;
        return Ok(());
    }

    let unset = || "(not set)".to_string();
    let verbosity = ctx.verbosity();
    output::print("# Effective Configuration", verbosity);
    output::print(format!("builtin = {}", report.builtin), verbosity);
    output::print(format!("json = {}", report.json), verbosity);
    output::print(
        format!("log_filter = {}", report.log_filter.unwrap_or_else(unset)),
        verbosity,
    );
    output::print(format!("manifest = {}", report.manifest), verbosity);
    output::print(
        format!("root = {}", report.root.unwrap_or_else(unset)),
        verbosity,
    );
    output::print(
        format!(
            "global config: {}",
            report.global_config.unwrap_or_else(unset)
        ),
        verbosity,
    );
    output::print(
        format!(
            "project config: {}",
            report.project_config.unwrap_or_else(unset)
        ),
        verbosity,
    );

    Ok(())
}
