//! engine::module
//!
//! The module seam: anything that can be initialized by name.
//!
//! # Contract
//!
//! A module exposes one operation, [`Module::initialize`]. Calling it more
//! than once is expected to be a no-op, but that is the module's own
//! promise; the engine never enforces it on a dependency's behalf.
//!
//! Failures are reported as a [`ModuleError`], an opaque value owned by
//! whoever receives it. The engine hands it back to its caller untouched.

use std::fmt::{Debug, Display};

use thiserror::Error;

use crate::core::types::{InitContext, ModuleName};

/// Outcome of initializing a module.
pub type InitResult = Result<(), ModuleError>;

/// Opaque failure produced by a module's initializer.
///
/// Wraps whatever the failing module reported. Use [`ModuleError::downcast_ref`]
/// to recover a typed payload.
///
/// # Example
///
/// ```
/// use modinit::engine::ModuleError;
///
/// let err = ModuleError::msg("sat-init-error");
/// assert_eq!(err.to_string(), "sat-init-error");
/// ```
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ModuleError(#[from] anyhow::Error);

impl ModuleError {
    /// Create an error from a printable message.
    pub fn msg<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self(anyhow::Error::msg(message))
    }

    /// Create an error from a typed error value.
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(anyhow::Error::new(error))
    }

    /// Borrow the payload as a concrete type, if it is one.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    /// Give up the wrapper and take the underlying error.
    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

/// A unit of program state that can be initialized.
///
/// `Send + Sync` so dependency lists can be shared across threads and held
/// in process-wide statics.
pub trait Module: Send + Sync {
    /// The module's name.
    fn name(&self) -> &ModuleName;

    /// Initialize the module.
    fn initialize(&self, ctx: InitContext) -> InitResult;
}

/// A [`Module`] backed by a closure.
///
/// # Example
///
/// ```
/// use modinit::core::types::{InitContext, ModuleName};
/// use modinit::engine::{FnModule, Module};
///
/// let data = FnModule::new(ModuleName::new("Std.Data").unwrap(), |_ctx| Ok(()));
/// assert!(data.initialize(InitContext::default()).is_ok());
/// ```
pub struct FnModule<F> {
    name: ModuleName,
    init: F,
}

impl<F> FnModule<F>
where
    F: Fn(InitContext) -> InitResult + Send + Sync,
{
    /// Wrap `init` as the initializer for `name`.
    pub fn new(name: ModuleName, init: F) -> Self {
        Self { name, init }
    }
}

impl<F> Module for FnModule<F>
where
    F: Fn(InitContext) -> InitResult + Send + Sync,
{
    fn name(&self) -> &ModuleName {
        &self.name
    }

    fn initialize(&self, ctx: InitContext) -> InitResult {
        (self.init)(ctx)
    }
}

impl<F> Debug for FnModule<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnModule").field("name", &self.name).finish()
    }
}
