use std::fmt::{Debug, Formatter};

use tracing::{debug, warn};

use super::{LookupError, ResolveAttempt};
use crate::{LinkTarget, ResolveCause, Resolver, StandardId, TargetType};

type BoxedResolver<T> = Box<dyn Resolver<T> + Send + Sync>;

/// Tries named resolvers in priority order; the first success wins.
pub struct ChainResolver<T> {
    resolvers: Vec<(String, BoxedResolver<T>)>,
}

impl<T> Default for ChainResolver<T> {
    fn default() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }
}

impl<T: LinkTarget> ChainResolver<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `resolver` at the lowest priority.
    pub fn with<R>(mut self, name: impl Into<String>, resolver: R) -> Self
    where
        R: Resolver<T> + Send + Sync + 'static,
    {
        self.resolvers.push((name.into(), Box::new(resolver)));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl<T: LinkTarget> Debug for ChainResolver<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainResolver")
            .field("target_type", &T::TYPE_NAME)
            .field("resolvers", &self.names())
            .finish()
    }
}

impl<T: LinkTarget> Resolver<T> for ChainResolver<T> {
    fn resolve(
        &self,
        identifier: &StandardId,
        target_type: TargetType<T>,
    ) -> Result<T, ResolveCause> {
        let mut attempts = Vec::with_capacity(self.resolvers.len());

        for (name, resolver) in &self.resolvers {
            match resolver.resolve(identifier, target_type) {
                Ok(value) => {
                    if !attempts.is_empty() {
                        debug!(
                            %identifier,
                            resolver = %name,
                            failed_attempts = attempts.len(),
                            "link resolution fallback succeeded"
                        );
                    }
                    return Ok(value);
                }
                Err(cause) => {
                    warn!(%identifier, resolver = %name, error = %cause, "resolver failed");
                    attempts.push(ResolveAttempt {
                        resolver: name.clone(),
                        message: cause.to_string(),
                    });
                }
            }
        }

        Err(Box::new(LookupError::Exhausted {
            identifier: identifier.clone(),
            target_type: target_type.name(),
            attempts,
        }))
    }
}
