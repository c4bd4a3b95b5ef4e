//! manifest::schema
//!
//! Manifest file format and validation.
//!
//! # Format
//!
//! ```toml
//! root = "Std"
//!
//! [[module]]
//! name = "Std.Data"
//!
//! [[module]]
//! name = "Std.Sat"
//! imports = ["Std.Data"]
//!
//! [[module]]
//! name = "Std"
//! imports = ["Std.Data", "Std.Sat"]
//! ```
//!
//! # Validation
//!
//! Checks run in a fixed order and stop at the first problem:
//! names, duplicate declarations, emptiness, self-imports, duplicate
//! imports, unknown imports, cycles, root. Import order is never changed.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::ManifestError;
use crate::core::types::ModuleName;

/// A manifest as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Module to initialize when none is named explicitly.
    pub root: Option<String>,

    /// Declared modules, in file order.
    #[serde(rename = "module")]
    pub modules: Vec<ModuleDecl>,
}

/// One `[[module]]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleDecl {
    /// Module name.
    pub name: String,

    /// Modules to initialize first, in this exact order.
    pub imports: Vec<String>,
}

impl Manifest {
    /// Validate the manifest.
    ///
    /// # Errors
    ///
    /// Returns the first [`ManifestError`] found, checking in the order
    /// described in the module docs.
    pub fn validate(&self) -> Result<ValidatedManifest, ManifestError> {
        let mut modules = Vec::with_capacity(self.modules.len());
        for decl in &self.modules {
            let name = ModuleName::new(&decl.name)?;
            let imports = decl
                .imports
                .iter()
                .map(ModuleName::new)
                .collect::<Result<Vec<_>, _>>()?;
            modules.push(ValidatedModule { name, imports });
        }
        let root = self.root.as_deref().map(ModuleName::new).transpose()?;

        let mut index = HashMap::with_capacity(modules.len());
        for (i, module) in modules.iter().enumerate() {
            if index.insert(module.name.clone(), i).is_some() {
                return Err(ManifestError::DuplicateModule(module.name.clone()));
            }
        }

        if modules.is_empty() {
            return Err(ManifestError::Empty);
        }

        for module in &modules {
            if module.imports.contains(&module.name) {
                return Err(ManifestError::SelfImport(module.name.clone()));
            }
        }

        for module in &modules {
            let mut seen = HashSet::new();
            for import in &module.imports {
                if !seen.insert(import) {
                    return Err(ManifestError::DuplicateImport {
                        module: module.name.clone(),
                        import: import.clone(),
                    });
                }
            }
        }

        for module in &modules {
            if let Some(import) = module.imports.iter().find(|i| !index.contains_key(*i)) {
                return Err(ManifestError::UnknownImport {
                    module: module.name.clone(),
                    import: import.clone(),
                });
            }
        }

        let construction_order = construction_order(&modules, &index)?;

        if let Some(root) = &root {
            if !index.contains_key(root) {
                return Err(ManifestError::UnknownRoot(root.clone()));
            }
        }

        Ok(ValidatedManifest {
            root,
            modules,
            index,
            construction_order,
        })
    }
}

/// A module entry whose names have been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedModule {
    /// Module name.
    pub name: ModuleName,
    /// Imports in declared order.
    pub imports: Vec<ModuleName>,
}

/// A manifest that passed every check.
///
/// Names are valid, imports resolve, there are no cycles, and the root
/// (if any) is declared.
#[derive(Debug, Clone)]
pub struct ValidatedManifest {
    root: Option<ModuleName>,
    modules: Vec<ValidatedModule>,
    index: HashMap<ModuleName, usize>,
    construction_order: Vec<usize>,
}

impl ValidatedManifest {
    /// The declared root module, if any.
    pub fn root(&self) -> Option<&ModuleName> {
        self.root.as_ref()
    }

    /// Modules in file order.
    pub fn modules(&self) -> &[ValidatedModule] {
        &self.modules
    }

    /// Look up a module by name.
    pub fn module(&self, name: &ModuleName) -> Option<&ValidatedModule> {
        self.index.get(name).map(|&i| &self.modules[i])
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &ModuleName) -> bool {
        self.index.contains_key(name)
    }

    /// Number of declared modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the manifest declares no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules ordered so every module comes after everything it imports.
    ///
    /// Used to construct initializer objects bottom-up. It says nothing
    /// about the order initialization runs in; that is always each
    /// module's declared import order.
    pub fn construction_order(&self) -> impl Iterator<Item = &ValidatedModule> {
        self.construction_order.iter().map(|&i| &self.modules[i])
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first post-order over the import relation, failing on a cycle.
fn construction_order(
    modules: &[ValidatedModule],
    index: &HashMap<ModuleName, usize>,
) -> Result<Vec<usize>, ManifestError> {
    let mut marks = vec![Mark::Unvisited; modules.len()];
    let mut path = Vec::new();
    let mut order = Vec::with_capacity(modules.len());

    for start in 0..modules.len() {
        visit(start, modules, index, &mut marks, &mut path, &mut order)?;
    }
    Ok(order)
}

fn visit(
    i: usize,
    modules: &[ValidatedModule],
    index: &HashMap<ModuleName, usize>,
    marks: &mut [Mark],
    path: &mut Vec<usize>,
    order: &mut Vec<usize>,
) -> Result<(), ManifestError> {
    match marks[i] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            let from = path.iter().position(|&p| p == i).unwrap_or(0);
            let mut cycle: Vec<ModuleName> = path[from..]
                .iter()
                .map(|&p| modules[p].name.clone())
                .collect();
            cycle.push(modules[i].name.clone());
            return Err(ManifestError::Cycle(cycle));
        }
        Mark::Unvisited => {}
    }

    marks[i] = Mark::InProgress;
    path.push(i);
    for import in &modules[i].imports {
        if let Some(&j) = index.get(import) {
            visit(j, modules, index, marks, path, order)?;
        }
    }
    path.pop();
    marks[i] = Mark::Done;
    order.push(i);
    Ok(())
}
