//! Memoization of successful resolutions.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{LinkTarget, ResolveCause, Resolver, StandardId, TargetType};

/// Lifetime and capacity of cached resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a resolved target is reused. `Duration::ZERO` disables caching.
    pub ttl: Duration,
    /// Upper bound on cached targets; the entry closest to expiry is evicted first.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 10_000,
        }
    }
}

impl CacheConfig {
    pub fn disabled() -> Self {
        Self {
            ttl: Duration::ZERO,
            ..Self::default()
        }
    }

    pub const fn is_disabled(&self) -> bool {
        self.ttl.is_zero() || self.max_entries == 0
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    /// `None` when the TTL is too large to represent; such entries never expire.
    expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now <= expires_at)
    }
}

/// Wraps a resolver and reuses its successful results.
///
/// Failures are never cached, so a transient backend error is retried on the
/// next lookup of the same identifier.
#[derive(Debug)]
pub struct CachingResolver<R, T> {
    inner: R,
    config: CacheConfig,
    entries: RwLock<HashMap<StandardId, CacheEntry<T>>>,
}

impl<R, T> CachingResolver<R, T>
where
    R: Resolver<T>,
    T: LinkTarget,
{
    pub fn new(inner: R, config: CacheConfig) -> Self {
        Self {
            inner,
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_default_config(inner: R) -> Self {
        Self::new(inner, CacheConfig::default())
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub const fn config(&self) -> CacheConfig {
        self.config
    }

    /// Number of cached entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn clear_expired(&self) {
        let now = Instant::now();
        self.entries.write().retain(|_, entry| entry.is_live(now));
    }

    fn lookup(&self, identifier: &StandardId) -> Option<T> {
        let now = Instant::now();
        let entries = self.entries.read();
        entries
            .get(identifier)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    fn store(&self, identifier: StandardId, value: T) {
        if self.config.is_disabled() {
            return;
        }

        let now = Instant::now();
        let mut entries = self.entries.write();
        if entries.len() >= self.config.max_entries && !entries.contains_key(&identifier) {
            entries.retain(|_, entry| entry.is_live(now));
        }
        if entries.len() >= self.config.max_entries && !entries.contains_key(&identifier) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| (entry.expires_at.is_none(), entry.expires_at))
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                debug!(identifier = %oldest, "evicting cached link target");
                entries.remove(&oldest);
            }
        }

        entries.insert(
            identifier,
            CacheEntry {
                value,
                expires_at: now.checked_add(self.config.ttl),
            },
        );
    }
}

impl<R, T> Resolver<T> for CachingResolver<R, T>
where
    R: Resolver<T>,
    T: LinkTarget,
{
    fn resolve(
        &self,
        identifier: &StandardId,
        target_type: TargetType<T>,
    ) -> Result<T, ResolveCause> {
        if let Some(value) = self.lookup(identifier) {
            debug!(%identifier, target_type = target_type.name(), "link target cache hit");
            return Ok(value);
        }

        debug!(%identifier, target_type = target_type.name(), "link target cache miss");
        let value = self.inner.resolve(identifier, target_type)?;
        self.store(identifier.clone(), value.clone());
        Ok(value)
    }
}
