//! Codemod registry: registration-ordered lookup over all codemods.
//!
//! Registration happens while building; [`CodemodRegistry::close`] freezes
//! the registry before execution, after which registration fails with
//! `RegistryError::RegistryClosed`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::codemod::Codemod;
use crate::descriptor::RuleDescriptor;
use crate::error::RegistryError;

/// Registry of codemod implementations keyed by descriptor id.
#[derive(Default)]
pub struct CodemodRegistry {
    codemods: Vec<Arc<dyn Codemod>>,
    index: HashMap<String, usize>,
    closed: bool,
}

impl CodemodRegistry {
    /// Empty, open registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a codemod.
    ///
    /// # Errors
    ///
    /// `RegistryClosed` after [`close`](Self::close); `DuplicateRuleId` when
    /// the id is already present.
    pub fn register(&mut self, codemod: Arc<dyn Codemod>) -> Result<(), RegistryError> {
        let id = codemod.descriptor().id.clone();
        if self.closed {
            return Err(RegistryError::RegistryClosed(id));
        }
        if self.index.contains_key(&id) {
            return Err(RegistryError::DuplicateRuleId(id));
        }
        self.index.insert(id, self.codemods.len());
        self.codemods.push(codemod);
        Ok(())
    }

    /// Freeze the registry. Idempotent.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Builder-style [`close`](Self::close).
    #[must_use]
    pub fn closed(mut self) -> Self {
        self.close();
        self
    }

    /// Whether the registry has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Descriptor for `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn lookup(&self, id: &str) -> Result<&RuleDescriptor, RegistryError> {
        self.get(id).map(|c| c.descriptor())
    }

    /// Implementation for `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn get(&self, id: &str) -> Result<&Arc<dyn Codemod>, RegistryError> {
        self.index
            .get(id)
            .and_then(|&i| self.codemods.get(i))
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// All descriptors in registration order.
    #[must_use]
    pub fn list_all(&self) -> Vec<&RuleDescriptor> {
        self.codemods.iter().map(|c| c.descriptor()).collect()
    }

    /// All codemods in registration order.
    #[must_use]
    pub fn codemods(&self) -> &[Arc<dyn Codemod>] {
        &self.codemods
    }

    /// Number of registered codemods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codemods.len()
    }

    /// Whether no codemod is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codemods.is_empty()
    }

    /// Registration-ordered subset: `include` empty means every codemod,
    /// and `exclude` wins over `include`.
    ///
    /// # Errors
    ///
    /// `NotFound` when either list names an unknown id.
    pub fn select<S: AsRef<str>>(
        &self,
        include: &[S],
        exclude: &[S],
    ) -> Result<Vec<Arc<dyn Codemod>>, RegistryError> {
        for id in include.iter().chain(exclude) {
            self.get(id.as_ref())?;
        }
        let wanted = |id: &str| include.is_empty() || include.iter().any(|i| i.as_ref() == id);
        let dropped = |id: &str| exclude.iter().any(|e| e.as_ref() == id);

        Ok(self
            .codemods
            .iter()
            .filter(|c| {
                let id = c.descriptor().id.as_str();
                wanted(id) && !dropped(id)
            })
            .cloned()
            .collect())
    }
}

impl std::fmt::Debug for CodemodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodemodRegistry")
            .field(
                "codemods",
                &self.list_all().iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            )
            .field("closed", &self.closed)
            .finish()
    }
}
