//! engine::initializer
//!
//! The module initializer: brings one module up by initializing its
//! dependencies in declared order.
//!
//! # Lifecycle
//!
//! ```text
//! initialize_all()
//!   guard already entered? -> Ok(()), nothing touched
//!   enter guard             (unconditional, before any dependency runs)
//!   for dep in dependencies:
//!       dep.initialize()?   (first error returned as-is, later deps skipped)
//!   body()?                 (only if every dependency succeeded)
//!   Ok(())
//! ```
//!
//! # Invariants
//!
//! - Dependencies run in exactly the order they were declared
//! - At most one walk per initializer, ever
//! - A failed walk is never retried: the next call returns `Ok(())`
//! - Errors pass through unchanged; nothing is wrapped, aggregated, or
//!   rolled back
//!
//! The last point surprises callers that expect a second call to retry.
//! Only the first call's result reports a failure.

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::guard::{InitGuard, InitState};
use super::module::{InitResult, Module};
use crate::core::types::{InitContext, ModuleName};

/// Ordered, fixed list of modules to initialize first.
///
/// The order must already be a valid initialization order; nothing here
/// checks or changes it. Once handed to a [`ModuleInitializer`] the list
/// cannot be modified.
#[derive(Clone, Default)]
pub struct DependencyList {
    modules: Vec<Arc<dyn Module>>,
}

impl DependencyList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dependency (builder style).
    pub fn with(mut self, module: Arc<dyn Module>) -> Self {
        self.modules.push(module);
        self
    }

    /// Append a dependency.
    pub fn push(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Iterate over the dependencies in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Module>> {
        self.modules.iter()
    }

    /// Names of the dependencies in declared order.
    pub fn names(&self) -> impl Iterator<Item = &ModuleName> {
        self.modules.iter().map(|m| m.name())
    }

    /// Number of dependencies.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<Arc<dyn Module>> for DependencyList {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Module>>>(iter: I) -> Self {
        Self {
            modules: iter.into_iter().collect(),
        }
    }
}

impl Debug for DependencyList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// A module's own initialization, boxed.
pub type ModuleBody = Box<dyn Fn(InitContext) -> InitResult + Send + Sync>;

/// Initializes one module's dependencies, once.
///
/// The guard lives inside the initializer, so whoever owns the initializer
/// decides its scope. For process scope keep it in a `static` (e.g. behind
/// `OnceLock`) or share it through an `Arc`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use modinit::core::types::{InitContext, ModuleName};
/// use modinit::engine::{DependencyList, FnModule, ModuleError, ModuleInitializer};
///
/// let name = |s: &str| ModuleName::new(s).unwrap();
/// let deps = DependencyList::new()
///     .with(Arc::new(FnModule::new(name("Std.Data"), |_| Ok(()))))
///     .with(Arc::new(FnModule::new(name("Std.Sat"), |_| {
///         Err(ModuleError::msg("sat-init-error"))
///     })));
///
/// let root = ModuleInitializer::new(name("Std"), deps);
///
/// let err = root.initialize_all(InitContext::default()).unwrap_err();
/// assert_eq!(err.to_string(), "sat-init-error");
///
/// // The guard was set before the walk, so the failure is not retried.
/// assert!(root.initialize_all(InitContext::default()).is_ok());
/// ```
pub struct ModuleInitializer {
    name: ModuleName,
    guard: InitGuard,
    dependencies: DependencyList,
    body: Option<ModuleBody>,
}

impl ModuleInitializer {
    /// Create an initializer for `name` over `dependencies`.
    pub fn new(name: ModuleName, dependencies: DependencyList) -> Self {
        Self {
            name,
            guard: InitGuard::new(),
            dependencies,
            body: None,
        }
    }

    /// Attach the module's own initialization, run after every dependency
    /// has succeeded.
    pub fn with_body<F>(mut self, body: F) -> Self
    where
        F: Fn(InitContext) -> InitResult + Send + Sync + 'static,
    {
        self.body = Some(Box::new(body));
        self
    }

    /// Initialize every dependency in order, then the body.
    ///
    /// Returns `Ok(())` immediately if this initializer was entered before,
    /// including when that earlier walk failed. Otherwise returns the first
    /// error any dependency (or the body) produced, untouched.
    pub fn initialize_all(&self, ctx: InitContext) -> InitResult {
        if !self.guard.enter() {
            trace!(module = %self.name, "already initialized");
            return Ok(());
        }

        debug!(
            module = %self.name,
            dependencies = self.dependencies.len(),
            builtin = ctx.builtin,
            "initializing"
        );

        self.dependencies.iter().try_for_each(|dep| {
            debug!(module = %self.name, dependency = %dep.name(), "initializing dependency");
            dep.initialize(ctx).inspect_err(|err| {
                warn!(
                    module = %self.name,
                    dependency = %dep.name(),
                    error = %err,
                    "dependency failed to initialize"
                );
            })
        })?;

        if let Some(body) = &self.body {
            body(ctx).inspect_err(|err| {
                warn!(module = %self.name, error = %err, "module body failed to initialize");
            })?;
        }

        Ok(())
    }

    /// The module this initializer brings up.
    pub fn name(&self) -> &ModuleName {
        &self.name
    }

    /// The declared dependencies.
    pub fn dependencies(&self) -> &DependencyList {
        &self.dependencies
    }

    /// Current guard state.
    pub fn state(&self) -> InitState {
        self.guard.state()
    }

    /// Whether the module has its own body.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

impl Module for ModuleInitializer {
    fn name(&self) -> &ModuleName {
        &self.name
    }

    fn initialize(&self, ctx: InitContext) -> InitResult {
        self.initialize_all(ctx)
    }
}

impl Debug for ModuleInitializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleInitializer")
            .field("name", &self.name)
            .field("state", &self.state())
            .field("dependencies", &self.dependencies)
            .field("has_body", &self.has_body())
            .finish()
    }
}
