//! check command - Validate a module manifest

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::{load_manifest, resolve_manifest};
use crate::cli::Context;
use crate::core::types::ModuleName;
use crate::ui::output;

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    manifest: String,
    root: Option<&'a ModuleName>,
    modules: Vec<ModuleEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ModuleEntry<'a> {
    name: &'a ModuleName,
    symbol: String,
    imports: &'a [ModuleName],
}

/// Validate a manifest and report what it declares.
pub fn check(ctx: &Context, manifest: Option<&Path>, symbols: bool) -> Result<()> {
    let path = resolve_manifest(ctx, manifest);
    let validated = load_manifest(&path)?;

    if ctx.json {
        let report = CheckReport {
            manifest: path.display().to_string(),
            root: validated.root(),
            modules: validated
                .modules()
                .iter()
                .map(|m| ModuleEntry {
                    name: &m.name,
                    symbol: m.name.initializer_symbol(),
                    imports: &m.imports,
                })
                .collect(),
        };
        output::json(&report)?;
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    output::print(
        format!("ok: {} module(s) in {}", validated.len(), path.display()),
        verbosity,
    );

    if symbols {
        let lines: Vec<_> = validated
            .modules()
            .iter()
            .map(|m| output::format_module(&m.name))
            .collect();
        output::print(output::format_list(&lines, "  "), verbosity);
    }

    Ok(())
}
