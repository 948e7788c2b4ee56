//! The resolution capability consumed by links and the records that hold them.
//!
//! The core never caches, deduplicates, logs or retries; those are concerns
//! of the [`Resolver`] implementation supplied by the caller.

use std::error::Error as StdError;

use thiserror::Error;

use crate::{Link, LinkTarget, StandardId, TargetType};

/// Opaque failure reported by a resolver, passed through unchanged.
pub type ResolveCause = Box<dyn StdError + Send + Sync + 'static>;

/// Maps an identifier to a concrete target value.
///
/// Closures of the form `Fn(&StandardId, TargetType<T>) -> Result<T, ResolveCause>`
/// implement this trait, which keeps test doubles short.
pub trait Resolver<T: LinkTarget> {
    fn resolve(&self, identifier: &StandardId, target_type: TargetType<T>)
        -> Result<T, ResolveCause>;
}

impl<T, F> Resolver<T> for F
where
    T: LinkTarget,
    F: Fn(&StandardId, TargetType<T>) -> Result<T, ResolveCause>,
{
    fn resolve(
        &self,
        identifier: &StandardId,
        target_type: TargetType<T>,
    ) -> Result<T, ResolveCause> {
        self(identifier, target_type)
    }
}

/// A resolver failed to produce a value for `identifier`.
#[derive(Debug, Error)]
#[error("failed to resolve {target_type} link '{identifier}': {cause}")]
pub struct ResolutionError {
    identifier: StandardId,
    target_type: &'static str,
    #[source]
    cause: ResolveCause,
}

impl ResolutionError {
    pub fn new(identifier: StandardId, target_type: &'static str, cause: ResolveCause) -> Self {
        Self {
            identifier,
            target_type,
            cause,
        }
    }

    pub fn identifier(&self) -> &StandardId {
        &self.identifier
    }

    pub const fn target_type(&self) -> &'static str {
        self.target_type
    }

    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    pub fn into_cause(self) -> ResolveCause {
        self.cause
    }
}

/// A value whose links of type `T` can be resolved into a new value.
pub trait Resolvable<T: LinkTarget>: Sized {
    /// Resolve every link of type `T`, returning a new value.
    ///
    /// On failure `self` is left untouched and remains usable.
    fn resolve_links<R>(&self, resolver: &R) -> Result<Self, ResolutionError>
    where
        R: Resolver<T> + ?Sized;
}

impl<T: LinkTarget> Resolvable<T> for Link<T> {
    fn resolve_links<R>(&self, resolver: &R) -> Result<Self, ResolutionError>
    where
        R: Resolver<T> + ?Sized,
    {
        self.resolve(resolver)
    }
}

/// Resolve `link`, which belongs to `bean`, and rebuild the bean around the result.
///
/// When the link is already resolved the bean is cloned and `rebuild` is not
/// called.
pub fn resolve_links_in<B, T, R, F>(
    bean: &B,
    link: &Link<T>,
    resolver: &R,
    rebuild: F,
) -> Result<B, ResolutionError>
where
    B: Clone,
    T: LinkTarget,
    R: Resolver<T> + ?Sized,
    F: FnOnce(Link<T>) -> B,
{
    if link.is_resolved() {
        return Ok(bean.clone());
    }
    link.resolve(resolver).map(rebuild)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Venue {
        id: StandardId,
    }

    impl LinkTarget for Venue {
        const TYPE_NAME: &'static str = "Venue";

        fn standard_id(&self) -> &StandardId {
            &self.id
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Listing {
        venue: Link<Venue>,
        lot_size: u32,
    }

    fn venue_id() -> StandardId {
        StandardId::of("MIC", "XLON").expect("valid id")
    }

    #[test]
    fn resolve_links_in_rebuilds_bean() {
        let listing = Listing {
            venue: Link::unresolved(venue_id()),
            lot_size: 100,
        };
        let resolver = |id: &StandardId, _: TargetType<Venue>| -> Result<Venue, ResolveCause> {
            Ok(Venue { id: id.clone() })
        };

        let resolved = resolve_links_in(&listing, &listing.venue, &resolver, |venue| Listing {
            venue,
            ..listing.clone()
        })
        .expect("resolves");

        assert!(resolved.venue.is_resolved());
        assert_eq!(resolved.lot_size, 100);
        assert!(!listing.venue.is_resolved());
    }

    #[test]
    fn resolve_links_in_short_circuits_resolved_links() {
        let calls = Cell::new(0);
        let resolver = |id: &StandardId, _: TargetType<Venue>| -> Result<Venue, ResolveCause> {
            calls.set(calls.get() + 1);
            Ok(Venue { id: id.clone() })
        };
        let listing = Listing {
            venue: Link::resolved(Venue { id: venue_id() }),
            lot_size: 1,
        };

        let again = resolve_links_in(&listing, &listing.venue, &resolver, |_| {
            panic!("rebuild must not run for resolved links")
        })
        .expect("resolves");

        assert_eq!(again, listing);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn resolution_error_exposes_cause_as_source() {
        let err = ResolutionError::new(venue_id(), "Venue", "not listed".into());
        let source = StdError::source(&err).expect("source is set");
        assert_eq!(source.to_string(), "not listed");
        assert_eq!(
            err.to_string(),
            "failed to resolve Venue link 'MIC~XLON': not listed"
        );
    }

    #[test]
    fn links_are_resolvable() {
        let link = Link::<Venue>::unresolved(venue_id());
        let resolver = |id: &StandardId, _: TargetType<Venue>| -> Result<Venue, ResolveCause> {
            Ok(Venue { id: id.clone() })
        };
        let resolved = link.resolve_links(&resolver).expect("resolves");
        assert_eq!(resolved.identifier(), &venue_id());
    }
}
