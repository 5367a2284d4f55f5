use crate::domain::model::Category;
use crate::domain::ports::Example;
use crate::utils::error::{CatalogError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered id → example mapping. Built once at startup, read-only afterwards.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Arc<dyn Example>>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `example` at the end of the registration order. A colliding id
    /// is rejected and leaves the registry untouched.
    pub fn register<E: Example + 'static>(&mut self, example: E) -> Result<()> {
        self.register_shared(Arc::new(example))
    }

    pub fn register_shared(&mut self, example: Arc<dyn Example>) -> Result<()> {
        let id = example.id().to_string();
        if self.index.contains_key(&id) {
            tracing::error!("Rejected duplicate example id: {}", id);
            return Err(CatalogError::DuplicateId { id });
        }

        tracing::debug!("Registered example {} ({})", id, example.category());
        self.index.insert(id, self.entries.len());
        self.entries.push(example);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&Arc<dyn Example>> {
        self.index
            .get(id)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Examples in registration order, optionally restricted to one
    /// category. The iterator is lazy and can be cloned to start over.
    pub fn list(
        &self,
        category: Option<Category>,
    ) -> impl Iterator<Item = &Arc<dyn Example>> + Clone + '_ {
        self.entries
            .iter()
            .filter(move |e| category.map_or(true, |c| e.category() == c))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entries.iter().map(|e| e.id())
    }

    /// Registration position of `id`, used to restore order after parallel runs.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}
