use std::collections::HashMap;

use tracing::debug;

use super::LookupError;
use crate::{LinkTarget, ResolveCause, Resolver, StandardId, TargetType};

/// Registry of targets keyed by their [`StandardId`].
#[derive(Debug, Clone)]
pub struct InMemoryResolver<T> {
    entries: HashMap<StandardId, T>,
}

impl<T> Default for InMemoryResolver<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: LinkTarget> InMemoryResolver<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under its own identifier, returning any value it replaces.
    pub fn insert(&mut self, value: T) -> Option<T> {
        let identifier = value.standard_id().clone();
        debug!(%identifier, target_type = T::TYPE_NAME, "registering link target");
        self.entries.insert(identifier, value)
    }

    pub fn with(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    pub fn get(&self, identifier: &StandardId) -> Option<&T> {
        self.entries.get(identifier)
    }

    pub fn remove(&mut self, identifier: &StandardId) -> Option<T> {
        self.entries.remove(identifier)
    }

    pub fn contains(&self, identifier: &StandardId) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: LinkTarget> FromIterator<T> for InMemoryResolver<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for value in iter {
            resolver.insert(value);
        }
        resolver
    }
}

impl<T: LinkTarget> Resolver<T> for InMemoryResolver<T> {
    fn resolve(
        &self,
        identifier: &StandardId,
        target_type: TargetType<T>,
    ) -> Result<T, ResolveCause> {
        match self.entries.get(identifier) {
            Some(value) => {
                debug!(%identifier, target_type = target_type.name(), "resolved from registry");
                Ok(value.clone())
            }
            None => {
                debug!(%identifier, target_type = target_type.name(), "identifier not registered");
                Err(Box::new(LookupError::NotFound {
                    identifier: identifier.clone(),
                    target_type: target_type.name(),
                }))
            }
        }
    }
}
