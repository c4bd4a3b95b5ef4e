//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! Command results go to stdout through this module; diagnostics go to
//! stderr through `tracing`.

pub mod output;
