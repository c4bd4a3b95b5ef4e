//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ModuleName`] - Validated dotted module name (`Std.Data`)
//! - [`InitContext`] - Flags forwarded unchanged through every initializer
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so the engine and the manifest never have to
//! re-check a name.
//!
//! # Examples
//!
//! ```
//! use modinit::core::types::ModuleName;
//!
//! let name = ModuleName::new("Std.Data").unwrap();
//! assert_eq!(name.components().collect::<Vec<_>>(), ["Std", "Data"]);
//! assert_eq!(name.initializer_symbol(), "initialize_Std_Data");
//!
//! assert!(ModuleName::new("Std..Data").is_err());
//! assert!(ModuleName::new("").is_err());
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid module name: {0}")]
    InvalidModuleName(String),
}

/// A validated module name.
///
/// Module names are dot-separated paths such as `Std.Sat.AIG`:
/// - Cannot be empty
/// - Every component between dots must be non-empty
/// - Cannot contain whitespace or ASCII control characters
///
/// # Example
///
/// ```
/// use modinit::core::types::ModuleName;
///
/// let name = ModuleName::new("Std.Tactic").unwrap();
/// assert_eq!(name.as_str(), "Std.Tactic");
/// assert_eq!(name.last(), "Tactic");
///
/// assert!(ModuleName::new(".Std").is_err());
/// assert!(ModuleName::new("Std.").is_err());
/// assert!(ModuleName::new("Std Data").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a new validated module name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidModuleName` if the name is empty, has an
    /// empty component, or contains whitespace or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidModuleName(
                "module name cannot be empty".into(),
            ));
        }

        if let Some(c) = name.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidModuleName(format!(
                "'{}' contains forbidden character {:?}",
                name, c
            )));
        }

        if name.split('.').any(str::is_empty) {
            return Err(TypeError::InvalidModuleName(format!(
                "'{}' has an empty component",
                name
            )));
        }

        Ok(())
    }

    /// Get the module name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the dot-separated components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// The final component (`Data` for `Std.Data`).
    pub fn last(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// The exported entry-point symbol for this module's initializer.
    ///
    /// Each component is mangled on its own: ASCII alphanumerics pass
    /// through, `_` doubles to `__`, and any other character becomes a
    /// fixed-width escape: `_x` and 2 hex digits below U+0100, `_u` and 4
    /// below U+10000, `_U` and 8 otherwise. Components are prefixed with
    /// `_`, or with `_0` when the mangled component starts with `_`, `x`,
    /// `u`, `U` or `0`, so a symbol decodes back to exactly one name.
    pub fn initializer_symbol(&self) -> String {
        let mut symbol = String::from("initialize");
        for component in self.components() {
            let mangled = mangle_component(component);
            if mangled.starts_with(|c: char| matches!(c, '_' | 'x' | 'u' | 'U' | '0')) {
                symbol.push_str("_0");
            } else {
                symbol.push('_');
            }
            symbol.push_str(&mangled);
        }
        symbol
    }
}

fn mangle_component(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for c in component.chars() {
        let code = c as u32;
        let _ = match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => write!(out, "{}", c),
            '_' => write!(out, "__"),
            _ if code < 0x100 => write!(out, "_x{:02X}", code),
            _ if code < 0x10000 => write!(out, "_u{:04X}", code),
            _ => write!(out, "_U{:08X}", code),
        };
    }
    out
}

impl TryFrom<String> for ModuleName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ModuleName {
    type Error = TypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ModuleName> for String {
    fn from(name: ModuleName) -> Self {
        name.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flags handed to every initializer.
///
/// The context is forwarded unchanged from an initializer to each of its
/// dependencies, so one call at the root decides the mode for the whole
/// walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitContext {
    /// Initializing as part of the builtin (bundled) environment.
    pub builtin: bool,
}

impl InitContext {
    /// Context for a builtin initialization.
    pub fn builtin() -> Self {
        Self { builtin: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod module_name {
        use super::*;

        #[test]
        fn valid_module_names() {
            assert!(ModuleName::new("Std").is_ok());
            assert!(ModuleName::new("Std.Data").is_ok());
            assert!(ModuleName::new("Std.Sat.AIG.Basic").is_ok());
            assert!(ModuleName::new("my_module.v2").is_ok());
            assert!(ModuleName::new("Init.Data.«term»").is_ok());
        }

        #[test]
        fn empty_name_rejected() {
            assert!(ModuleName::new("").is_err());
        }

        #[test]
        fn empty_component_rejected() {
            assert!(ModuleName::new(".Std").is_err());
            assert!(ModuleName::new("Std.").is_err());
            assert!(ModuleName::new("Std..Data").is_err());
            assert!(ModuleName::new(".").is_err());
        }

        #[test]
        fn whitespace_rejected() {
            assert!(ModuleName::new("Std Data").is_err());
            assert!(ModuleName::new("Std\tData").is_err());
            assert!(ModuleName::new(" Std").is_err());
        }

        #[test]
        fn control_chars_rejected() {
            assert!(ModuleName::new("Std\0").is_err());
            assert!(ModuleName::new("Std\x7f").is_err());
        }

        #[test]
        fn components_and_last() {
            let name = ModuleName::new("Std.Sat.AIG").unwrap();
            assert_eq!(name.components().collect::<Vec<_>>(), ["Std", "Sat", "AIG"]);
            assert_eq!(name.last(), "AIG");

            let single = ModuleName::new("Std").unwrap();
            assert_eq!(single.last(), "Std");
        }

        #[test]
        fn display() {
            let name = ModuleName::new("Std.Data").unwrap();
            assert_eq!(format!("{}", name), "Std.Data");
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<ModuleName, _> = serde_json::from_str("\"Std..Data\"");
            assert!(result.is_err());

            let parsed: ModuleName = serde_json::from_str("\"Std.Data\"").unwrap();
            assert_eq!(parsed.as_str(), "Std.Data");
        }
    }

    mod initializer_symbol {
        use super::*;

        fn symbol(name: &str) -> String {
            ModuleName::new(name).unwrap().initializer_symbol()
        }

        #[test]
        fn plain_components() {
            assert_eq!(symbol("Std"), "initialize_Std");
            assert_eq!(symbol("Std.Data"), "initialize_Std_Data");
            assert_eq!(symbol("Std.Tactic.BVDecide"), "initialize_Std_Tactic_BVDecide");
        }

        #[test]
        fn underscores_doubled() {
            assert_eq!(symbol("my_mod.y"), "initialize_my__mod_y");
        }

        #[test]
        fn other_chars_use_fixed_width_escapes() {
            assert_eq!(symbol("A-B"), "initialize_A_x2DB");
            assert_eq!(symbol("Std.Ω"), "initialize_Std_0_u03A9");
            assert_eq!(symbol("Std.\u{1F600}"), "initialize_Std_0_U0001F600");
        }

        #[test]
        fn ambiguous_component_starts_are_marked() {
            assert_eq!(symbol("Init.«term»"), "initialize_Init_0_xABterm_xBB");
            assert_eq!(symbol("Std.x1"), "initialize_Std_0x1");
            assert_eq!(symbol("Std.0"), "initialize_Std_00");
            assert_eq!(symbol("_"), "initialize_0__");
        }

        #[test]
        fn distinct_names_distinct_symbols() {
            assert_ne!(symbol("a_b"), symbol("a.b"));
            assert_ne!(symbol("a_.b"), symbol("a._b"));
            assert_ne!(symbol("a.«"), symbol("a.xAB"));
            assert_ne!(symbol("Std.\u{1F60}0"), symbol("Std.\u{1F600}"));
        }
    }

    mod init_context {
        use super::*;

        #[test]
        fn default_is_not_builtin() {
            assert!(!InitContext::default().builtin);
            assert!(InitContext::builtin().builtin);
        }
    }
}
