//! modinit - Idempotent, dependency-ordered module initialization
//!
//! A module is brought up by initializing the modules it imports, in the
//! order they were declared, exactly once per initializer, stopping at the
//! first failure.
//!
//! # Architecture
//!
//! - [`engine`] - Guard, module seam and the initializer itself
//! - [`manifest`] - TOML dependency lists, validation and assembly
//! - [`core`] - Domain types and configuration
//! - [`cli`] - Command-line interface
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. Dependencies run in declared order and are never reordered
//! 2. The guard is entered before the first dependency runs
//! 3. The first failure is returned unchanged and ends the walk
//! 4. A second call never re-runs anything, even after a failure

pub mod cli;
pub mod core;
pub mod engine;
pub mod manifest;
pub mod ui;
