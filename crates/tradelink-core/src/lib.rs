//! # Tradelink Core
//!
//! Identifiers, deferred links and bean introspection for tradelink.
//!
//! ## Overview
//!
//! This crate provides the generic machinery behind tradelink value types:
//!
//! - **Standard identifiers** naming external entities without embedding them
//! - **Links** that hold either an identifier or the resolved target
//! - **Resolvers**, the caller-supplied capability that turns identifiers into targets
//! - **Bean introspection** for name-based field access on immutable values
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`decimal`] | Serde form for `f64` fields that may be NaN or infinite |
//! | [`error`] | Validation errors |
//! | [`id`] | [`StandardId`] identifier |
//! | [`link`] | [`Link`], [`LinkTarget`] and [`TargetType`] |
//! | [`meta`] | [`Bean`], [`BeanBuilder`] and the [`MetaBean`] property table |
//! | [`resolver`] | [`Resolver`] capability and [`ResolutionError`] |
//! | [`resolvers`] | In-memory, caching and chained resolvers |
//!
//! ## Quick Start
//!
//! ```rust
//! use tradelink_core::{Link, LinkTarget, ResolveCause, StandardId, TargetType};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Venue {
//!     id: StandardId,
//! }
//!
//! impl LinkTarget for Venue {
//!     const TYPE_NAME: &'static str = "Venue";
//!
//!     fn standard_id(&self) -> &StandardId {
//!         &self.id
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let link = Link::<Venue>::unresolved(StandardId::parse("MIC~XLON")?);
//! let resolver = |id: &StandardId, _: TargetType<Venue>| -> Result<Venue, ResolveCause> {
//!     Ok(Venue { id: id.clone() })
//! };
//!
//! let resolved = link.resolve(&resolver)?;
//! assert!(resolved.is_resolved());
//! assert!(!link.is_resolved());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures are returned, never logged or retried here:
//!
//! - [`ValidationError`] for invalid construction input and missing fields
//! - [`ResolutionError`] when a resolver cannot produce a target
//! - [`PropertyError`] for name-based access to unknown or immutable fields

pub mod decimal;
pub mod error;
pub mod id;
pub mod link;
pub mod meta;
pub mod resolver;
pub mod resolvers;

// Error types
pub use error::ValidationError;

// Identifiers
pub use id::StandardId;

// Links
pub use link::{Link, LinkTarget, TargetType};

// Introspection
pub use meta::{Bean, BeanBuilder, MetaBean, MetaProperty, PropertyError, PropertyKind, PropertyValue};

// Resolution
pub use resolver::{resolve_links_in, Resolvable, ResolutionError, ResolveCause, Resolver};

// Resolver implementations
pub use resolvers::{
    CacheConfig, CachingResolver, ChainResolver, InMemoryResolver, LookupError, ResolveAttempt,
};
