//! manifest::assembly
//!
//! Turn a validated manifest into live initializers.
//!
//! Every declared module gets exactly one [`ModuleInitializer`]. Importers
//! share it through an `Arc`, so a module imported from several places is
//! still walked once: the first importer to reach it enters its guard,
//! everyone after gets `Ok(())` straight back.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::schema::ValidatedManifest;
use super::ManifestError;
use crate::core::types::ModuleName;
use crate::engine::{DependencyList, Module, ModuleBody, ModuleInitializer};

/// The initializers for every module in a manifest.
#[derive(Debug)]
pub struct ModuleSet {
    root: Option<ModuleName>,
    modules: HashMap<ModuleName, Arc<ModuleInitializer>>,
    order: Vec<ModuleName>,
}

impl ModuleSet {
    /// Build one initializer per declared module.
    ///
    /// `body_for` is asked once per module for its own initialization;
    /// `None` means the module only initializes its imports.
    ///
    /// # Errors
    ///
    /// Returns `UnknownImport` if an import has no initializer when its
    /// importer is built. Cannot happen for a [`ValidatedManifest`]: its
    /// construction order puts every import before its importer.
    pub fn assemble<F>(
        manifest: &ValidatedManifest,
        mut body_for: F,
    ) -> Result<Self, ManifestError>
    where
        F: FnMut(&ModuleName) -> Option<ModuleBody>,
    {
        let mut modules: HashMap<ModuleName, Arc<ModuleInitializer>> =
            HashMap::with_capacity(manifest.len());

        for decl in manifest.construction_order() {
            let dependencies = decl
                .imports
                .iter()
                .map(|import| {
                    modules
                        .get(import)
                        .map(|m| Arc::clone(m) as Arc<dyn Module>)
                        .ok_or_else(|| ManifestError::UnknownImport {
                            module: decl.name.clone(),
                            import: import.clone(),
                        })
                })
                .collect::<Result<DependencyList, _>>()?;

            let mut initializer = ModuleInitializer::new(decl.name.clone(), dependencies);
            if let Some(body) = body_for(&decl.name) {
                initializer = initializer.with_body(body);
            }

            debug!(
                module = %decl.name,
                imports = decl.imports.len(),
                has_body = initializer.has_body(),
                "assembled initializer"
            );
            modules.insert(decl.name.clone(), Arc::new(initializer));
        }

        Ok(Self {
            root: manifest.root().cloned(),
            modules,
            order: manifest.modules().iter().map(|m| m.name.clone()).collect(),
        })
    }

    /// The initializer for `name`.
    pub fn get(&self, name: &ModuleName) -> Option<&Arc<ModuleInitializer>> {
        self.modules.get(name)
    }

    /// The initializer for the manifest's declared root.
    pub fn root(&self) -> Option<&Arc<ModuleInitializer>> {
        self.root.as_ref().and_then(|r| self.modules.get(r))
    }

    /// Module names in manifest file order.
    pub fn names(&self) -> impl Iterator<Item = &ModuleName> {
        self.order.iter()
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
