//! Name-keyed registry of phantom models.
//!
//! Owned by the host application and passed by reference to the components
//! that need model lookup. Build-then-freeze: all registration happens
//! before parallel work starts, after which the registry is only read.

use super::phantom::PhantomModel;

/// Append-only collection of phantoms keyed by unique name.
///
/// Duplicate names are not rejected; `get` returns the first match, so the
/// first-registered model wins.
#[derive(Default)]
pub struct ModelRegistry {
    models: Vec<PhantomModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a phantom. Registration order decides lookup precedence.
    pub fn register(&mut self, model: PhantomModel) {
        log::debug!("Registering phantom '{}'", model.name());
        self.models.push(model);
    }

    /// First registered phantom with the given name.
    pub fn get(&self, name: &str) -> Option<&PhantomModel> {
        self.models.iter().find(|m| m.name() == name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhantomModel> {
        self.models.iter()
    }
}
