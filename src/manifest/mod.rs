//! manifest
//!
//! Build-time dependency lists, declared in TOML.
//!
//! # Overview
//!
//! A manifest names every module and, for each one, the ordered list of
//! modules it imports. That list becomes the module's
//! [`DependencyList`](crate::engine::DependencyList) verbatim.
//!
//! 1. [`Manifest::load`] / [`Manifest::parse`] read the file
//! 2. [`Manifest::validate`] checks names, references and cycles
//! 3. [`ModuleSet::assemble`] builds one shared initializer per module
//!
//! # Example
//!
//! ```
//! use modinit::core::types::InitContext;
//! use modinit::manifest::{Manifest, ModuleSet};
//!
//! let manifest = Manifest::parse(r#"
//!     root = "Std"
//!
//!     [[module]]
//!     name = "Std.Data"
//!
//!     [[module]]
//!     name = "Std"
//!     imports = ["Std.Data"]
//! "#).unwrap();
//!
//! let validated = manifest.validate().unwrap();
//! let set = ModuleSet::assemble(&validated, |_| None).unwrap();
//! set.root().unwrap().initialize_all(InitContext::default()).unwrap();
//! ```

pub mod assembly;
pub mod schema;

pub use assembly::ModuleSet;
pub use schema::{Manifest, ModuleDecl, ValidatedManifest, ValidatedModule};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{ModuleName, TypeError};

/// Errors from loading, validating or assembling a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error(transparent)]
    InvalidName(#[from] TypeError),

    #[error("module '{0}' is declared more than once")]
    DuplicateModule(ModuleName),

    #[error("manifest declares no modules")]
    Empty,

    #[error("module '{0}' imports itself")]
    SelfImport(ModuleName),

    #[error("module '{module}' imports '{import}' more than once")]
    DuplicateImport { module: ModuleName, import: ModuleName },

    #[error("module '{module}' imports undeclared module '{import}'")]
    UnknownImport { module: ModuleName, import: ModuleName },

    #[error("import cycle: {}", format_path(.0))]
    Cycle(Vec<ModuleName>),

    #[error("root module '{0}' is not declared")]
    UnknownRoot(ModuleName),
}

fn format_path(path: &[ModuleName]) -> String {
    path.iter()
        .map(ModuleName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl Manifest {
    /// Read and parse a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `ReadError` if the file cannot be read and `ParseError` if it
    /// is not a valid manifest document. Does not validate.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(path).map_err(|e| ManifestError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ManifestError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a manifest from a string.
    pub fn parse(contents: &str) -> Result<Self, ManifestError> {
        toml::from_str(contents).map_err(|e| ManifestError::ParseError {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modules.toml");
        fs::write(
            &path,
            r#"
            [[module]]
            name = "Std.Data"
            "#,
        )
        .unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.modules.len(), 1);
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = Manifest::load(&temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::ReadError { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modules.toml");
        fs::write(&path, "[[module]\nname = ").unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::ParseError { .. }));
    }

    #[test]
    fn parse_inline() {
        let err = Manifest::parse("module = 3").unwrap_err();
        assert!(err.to_string().contains("<inline>"));
    }

    #[test]
    fn invalid_name_displays_type_error() {
        let err = ManifestError::from(ModuleName::new("").unwrap_err());
        assert_eq!(
            err.to_string(),
            "invalid module name: module name cannot be empty"
        );
    }
}
