//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, output is machine-readable JSON.

use std::fmt::Display;

use serde::Serialize;

use crate::core::types::ModuleName;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
}

impl Verbosity {
    /// Create verbosity from the quiet flag.
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a value as pretty JSON (always shown).
pub fn json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a module name with its entry-point symbol.
pub fn format_module(name: &ModuleName) -> String {
    format!("{} ({})", name, name.initializer_symbol())
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_quiet() {
        assert_eq!(Verbosity::from_quiet(true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_quiet(false), Verbosity::Normal);
    }

    #[test]
    fn format_list_prefixes_each_line() {
        let items = ["Std.Data", "Std.Sat"];
        assert_eq!(format_list(&items, "  "), "  Std.Data\n  Std.Sat");
    }

    #[test]
    fn format_list_empty() {
        let items: [&str; 0] = [];
        assert_eq!(format_list(&items, "- "), "");
    }

    #[test]
    fn format_module_shows_symbol() {
        let name = ModuleName::new("Std.Data").unwrap();
        assert_eq!(format_module(&name), "Std.Data (initialize_Std_Data)");
    }
}
