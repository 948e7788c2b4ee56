//! Ready-made [`Resolver`](crate::Resolver) implementations.
//!
//! | Resolver | Description |
//! |----------|-------------|
//! | [`InMemoryResolver`] | Map-backed registry of targets |
//! | [`CachingResolver`] | Memoizes successful lookups of another resolver |
//! | [`ChainResolver`] | Ordered fallback across named resolvers |

mod cache;
mod chain;
mod memory;

pub use cache::{CacheConfig, CachingResolver};
pub use chain::ChainResolver;
pub use memory::InMemoryResolver;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::StandardId;

/// One failed attempt recorded by [`ChainResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveAttempt {
    pub resolver: String,
    pub message: String,
}

/// Failures reported by the resolvers in this module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no {target_type} registered for '{identifier}'")]
    NotFound {
        identifier: StandardId,
        target_type: &'static str,
    },
    #[error("{target_type} '{identifier}' could not be resolved by any of {} resolvers", .attempts.len())]
    Exhausted {
        identifier: StandardId,
        target_type: &'static str,
        attempts: Vec<ResolveAttempt>,
    },
}
