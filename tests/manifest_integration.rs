//! Integration tests for manifest-driven initialization.
//!
//! These tests load manifests from disk, assemble the module graph and run
//! it: Load → Validate → Assemble → Initialize.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use modinit::core::types::{InitContext, ModuleName};
use modinit::engine::{InitState, ModuleBody, ModuleError};
use modinit::manifest::{Manifest, ManifestError, ModuleSet};

// =============================================================================
// Test Fixtures
// =============================================================================

const STD_MANIFEST: &str = r#"
root = "Std"

[[module]]
name = "Init"

[[module]]
name = "Std.Data"
imports = ["Init"]

[[module]]
name = "Std.Sat"
imports = ["Init", "Std.Data"]

[[module]]
name = "Std.Tactic"
imports = ["Std.Sat"]

[[module]]
name = "Std"
imports = ["Std.Data", "Std.Sat", "Std.Tactic"]
"#;

/// A manifest file in a temporary directory.
struct ManifestFile {
    _dir: TempDir,
    path: PathBuf,
}

impl ManifestFile {
    fn new(contents: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("modules.toml");
        fs::write(&path, contents).expect("failed to write manifest");
        Self { _dir: dir, path }
    }

    fn load(&self) -> Result<Manifest, ManifestError> {
        Manifest::load(&self.path)
    }
}

type Log = Arc<Mutex<Vec<String>>>;

/// Assemble with bodies that log their module name, failing for `failing`.
fn assemble_logged(manifest: &str, failing: &[&str]) -> (ModuleSet, Log) {
    let validated = Manifest::parse(manifest).unwrap().validate().unwrap();
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let failing: Vec<ModuleName> = failing.iter().map(|f| ModuleName::new(*f).unwrap()).collect();

    let set = ModuleSet::assemble(&validated, |name| {
        let log = Arc::clone(&log);
        let name = name.clone();
        let fails = failing.contains(&name);
        let body: ModuleBody = Box::new(move |_ctx: InitContext| {
            if fails {
                return Err(ModuleError::msg(format!("{}-init-error", name.last())));
            }
            log.lock().unwrap().push(name.to_string());
            Ok(())
        });
        Some(body)
    })
    .unwrap();

    (set, log)
}

fn name(s: &str) -> ModuleName {
    ModuleName::new(s).unwrap()
}

// =============================================================================
// Loading and validation
// =============================================================================

mod loading {
    use super::*;

    #[test]
    fn loads_and_validates_from_disk() {
        let file = ManifestFile::new(STD_MANIFEST);
        let validated = file.load().unwrap().validate().unwrap();

        assert_eq!(validated.len(), 5);
        assert_eq!(validated.root(), Some(&name("Std")));
        assert_eq!(
            validated.module(&name("Std")).unwrap().imports,
            [name("Std.Data"), name("Std.Sat"), name("Std.Tactic")]
        );
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::ReadError { .. }));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let file = ManifestFile::new("[[module]\nname = ");
        let err = file.load().unwrap_err();
        assert!(matches!(err, ManifestError::ParseError { .. }));
        assert!(err.to_string().contains("modules.toml"));
    }

    #[test]
    fn cycle_on_disk_is_reported_with_path() {
        let file = ManifestFile::new(
            r#"
            [[module]]
            name = "A"
            imports = ["B"]

            [[module]]
            name = "B"
            imports = ["A"]
            "#,
        );
        let err = file.load().unwrap().validate().unwrap_err();
        assert!(matches!(err, ManifestError::Cycle(_)));
        assert!(err.to_string().starts_with("import cycle: "));
    }

    #[test]
    fn undeclared_import_is_rejected() {
        let file = ManifestFile::new(
            r#"
            [[module]]
            name = "Std"
            imports = ["Std.Missing"]
            "#,
        );
        let err = file.load().unwrap().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "module 'Std' imports undeclared module 'Std.Missing'"
        );
    }
}

// =============================================================================
// Running assembled modules
// =============================================================================

mod running {
    use super::*;

    #[test]
    fn runs_each_module_once_in_import_order() {
        let (set, log) = assemble_logged(STD_MANIFEST, &[]);

        set.root()
            .unwrap()
            .initialize_all(InitContext::default())
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            ["Init", "Std.Data", "Std.Sat", "Std.Tactic", "Std"]
        );
        assert!(set
            .names()
            .all(|n| set.get(n).unwrap().state() == InitState::Initialized));
    }

    #[test]
    fn failure_propagates_to_root_unchanged() {
        let (set, log) = assemble_logged(STD_MANIFEST, &["Std.Sat"]);
        let root = set.root().unwrap();

        let err = root.initialize_all(InitContext::default()).unwrap_err();

        assert_eq!(err.to_string(), "Sat-init-error");
        assert_eq!(*log.lock().unwrap(), ["Init", "Std.Data"]);
        assert_eq!(set.get(&name("Std.Tactic")).unwrap().state(), InitState::Uninitialized);

        // The root's guard is already set: no retry.
        assert!(root.initialize_all(InitContext::default()).is_ok());
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn initializing_a_leaf_first_is_remembered() {
        let (set, log) = assemble_logged(STD_MANIFEST, &[]);

        set.get(&name("Std.Data"))
            .unwrap()
            .initialize_all(InitContext::default())
            .unwrap();
        assert_eq!(*log.lock().unwrap(), ["Init", "Std.Data"]);

        set.root()
            .unwrap()
            .initialize_all(InitContext::default())
            .unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            ["Init", "Std.Data", "Std.Sat", "Std.Tactic", "Std"]
        );
    }

    #[test]
    fn builtin_flag_reaches_every_body() {
        let validated = Manifest::parse(STD_MANIFEST).unwrap().validate().unwrap();
        let seen: Arc<Mutex<Vec<bool>>> = Arc::new(Mutex::new(Vec::new()));

        let set = ModuleSet::assemble(&validated, |_| {
            let seen = Arc::clone(&seen);
            let body: ModuleBody = Box::new(move |ctx: InitContext| {
                seen.lock().unwrap().push(ctx.builtin);
                Ok(())
            });
            Some(body)
        })
        .unwrap();

        set.root()
            .unwrap()
            .initialize_all(InitContext::builtin())
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 5);
        assert!(seen.iter().all(|&b| b));
    }
}
