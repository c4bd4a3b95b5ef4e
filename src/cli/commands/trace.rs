//! trace command - Run a manifest's initializers and report the order

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{anyhow, bail, Context as _, Result};
use serde::Serialize;

use super::{load_manifest, resolve_manifest};
use crate::cli::Context;
use crate::core::types::{InitContext, ModuleName};
use crate::engine::{InitState, ModuleBody, ModuleError};
use crate::manifest::{ModuleSet, ValidatedManifest};
use crate::ui::output;

#[derive(Debug, Serialize)]
struct TraceReport {
    manifest: String,
    root: ModuleName,
    builtin: bool,
    runs: Vec<RunReport>,
}

#[derive(Debug, Serialize)]
struct RunReport {
    run: u32,
    outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    executed: Vec<ModuleName>,
    state: InitState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Outcome {
    Ok,
    Error,
}

type ExecutionLog = Arc<Mutex<Vec<ModuleName>>>;

/// Run the root module's initializer `repeat` times and report which
/// module bodies ran, in order.
///
/// Fails if the first run failed. Later runs always succeed because the
/// guard was entered on the first one.
pub fn trace(
    ctx: &Context,
    manifest: Option<&Path>,
    root: Option<&str>,
    fail: &[String],
    builtin: bool,
    repeat: u32,
) -> Result<()> {
    let path = resolve_manifest(ctx, manifest);
    let validated = load_manifest(&path)?;

    let root = resolve_root(ctx, &validated, root)?;
    let failing = resolve_failing(&validated, fail)?;

    let log: ExecutionLog = Arc::new(Mutex::new(Vec::new()));
    let set = ModuleSet::assemble(&validated, |name| {
        Some(recording_body(name, &log, failing.contains(name)))
    })?;
    let initializer = set
        .get(&root)
        .ok_or_else(|| anyhow!("Module '{}' is not declared in the manifest", root))?;

    let init_ctx = InitContext {
        builtin: builtin || ctx.config.builtin(),
    };

    let mut runs = Vec::new();
    let mut first_error = None;
    for run in 1..=repeat {
        let before = log.lock().unwrap_or_else(PoisonError::into_inner).len();
        let result = initializer.initialize_all(init_ctx);
        let executed = log.lock().unwrap_or_else(PoisonError::into_inner)[before..].to_vec();

        let (outcome, error) = match result {
            Ok(()) => (Outcome::Ok, None),
            Err(err) => {
                let message = err.to_string();
                if run == 1 {
                    first_error = Some(message.clone());
                }
                (Outcome::Error, Some(message))
            }
        };

        runs.push(RunReport {
            run,
            outcome,
            error,
            executed,
            state: initializer.state(),
        });
    }

    if ctx.json {
        output::json(&TraceReport {
            manifest: path.display().to_string(),
            root: root.clone(),
            builtin: init_ctx.builtin,
            runs,
        })?;
    } else {
        print_runs(ctx, &runs);
    }

    if let Some(message) = first_error {
        bail!("Initialization of '{}' failed: {}", root, message);
    }
    Ok(())
}

/// Root precedence: command line, project config, manifest.
fn resolve_root(
    ctx: &Context,
    manifest: &ValidatedManifest,
    explicit: Option<&str>,
) -> Result<ModuleName> {
    let root = match explicit.or_else(|| ctx.config.root()) {
        Some(name) => ModuleName::new(name).context("Invalid root module")?,
        None => manifest.root().cloned().ok_or_else(|| {
            anyhow!("No root module: pass --root, set `root` in config, or declare one in the manifest")
        })?,
    };

    if !manifest.contains(&root) {
        bail!("Module '{}' is not declared in the manifest", root);
    }
    Ok(root)
}

fn resolve_failing(manifest: &ValidatedManifest, fail: &[String]) -> Result<HashSet<ModuleName>> {
    fail.iter()
        .map(|name| {
            let name = ModuleName::new(name.as_str()).context("Invalid --fail module")?;
            if !manifest.contains(&name) {
                bail!("Module '{}' is not declared in the manifest", name);
            }
            Ok(name)
        })
        .collect()
}

fn recording_body(name: &ModuleName, log: &ExecutionLog, fails: bool) -> ModuleBody {
    let name = name.clone();
    let log = Arc::clone(log);
    Box::new(move |_ctx: InitContext| {
        if fails {
            return Err(ModuleError::msg(format!("{}: injected failure", name)));
        }
        log.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name.clone());
        Ok(())
    })
}

fn print_runs(ctx: &Context, runs: &[RunReport]) {
    let verbosity = ctx.verbosity();
    for run in runs {
        let status = match (&run.outcome, &run.error) {
            (Outcome::Error, Some(message)) => format!("error: {}", message),
            (Outcome::Error, None) => "error".to_string(),
            (Outcome::Ok, _) if run.executed.is_empty() && run.run > 1 => {
                "ok (already initialized)".to_string()
            }
            (Outcome::Ok, _) => "ok".to_string(),
        };
        output::print(format!("run {}: {}", run.run, status), verbosity);
        if !run.executed.is_empty() {
            output::print(output::format_list(&run.executed, "  "), verbosity);
        }
    }
}
