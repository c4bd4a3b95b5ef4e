//! engine
//!
//! Idempotent, dependency-ordered module initialization.
//!
//! # Architecture
//!
//! A [`ModuleInitializer`] owns three things:
//!
//! 1. **Guard**: a one-way [`InitGuard`] entered before anything else runs
//! 2. **Dependencies**: a fixed [`DependencyList`] walked in declared order
//! 3. **Body** (optional): the module's own initialization, run last
//!
//! Every dependency is a [`Module`]. A `ModuleInitializer` is itself a
//! `Module`, so initializers compose: a module that imports `Std` simply
//! lists `Std`'s initializer as a dependency, and diamond imports run once
//! because each initializer's guard short-circuits repeat calls.
//!
//! # Invariants
//!
//! - The guard is entered unconditionally, before the first dependency
//! - The first failing dependency stops the walk and its error is returned
//!   as-is
//! - After any first call (success or failure) every later call returns
//!   `Ok(())` without touching a dependency
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use modinit::core::types::{InitContext, ModuleName};
//! use modinit::engine::{DependencyList, FnModule, Module, ModuleInitializer};
//!
//! let name = |s: &str| ModuleName::new(s).unwrap();
//! let deps: DependencyList = ["Std.Data", "Std.Sat", "Std.Tactic"]
//!     .into_iter()
//!     .map(|n| Arc::new(FnModule::new(name(n), |_| Ok(()))) as Arc<dyn Module>)
//!     .collect();
//!
//! let root = ModuleInitializer::new(name("Std"), deps);
//! root.initialize_all(InitContext::default()).unwrap();
//! ```

pub mod guard;
pub mod initializer;
pub mod module;

pub use guard::{InitGuard, InitState};
pub use initializer::{DependencyList, ModuleBody, ModuleInitializer};
pub use module::{FnModule, InitResult, Module, ModuleError};
