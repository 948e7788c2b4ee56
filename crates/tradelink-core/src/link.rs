//! Deferred references between value types.
//!
//! A [`Link`] is either *unresolved*, holding only the [`StandardId`] of its
//! target, or *resolved*, holding the target itself. Resolution never
//! mutates a link; it produces a new one.

use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ResolutionError, Resolver, StandardId, ValidationError};

/// A value that can be the target of a [`Link`].
pub trait LinkTarget: Clone {
    /// Stable name of the target type, reported in errors and serialized links.
    const TYPE_NAME: &'static str;

    /// Identifier under which the value is published.
    fn standard_id(&self) -> &StandardId;
}

/// Type tag for the expected target of a link.
pub struct TargetType<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: LinkTarget> TargetType<T> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    pub fn name(self) -> &'static str {
        T::TYPE_NAME
    }
}

impl<T: LinkTarget> Default for TargetType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TargetType<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TargetType<T> {}

impl<T> PartialEq for TargetType<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for TargetType<T> {}

impl<T> Hash for TargetType<T> {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl<T: LinkTarget> Debug for TargetType<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TargetType").field(&T::TYPE_NAME).finish()
    }
}

impl<T: LinkTarget> Display for TargetType<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(T::TYPE_NAME)
    }
}

/// Reference to a target that is either unresolved or resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Link<T> {
    Unresolved(StandardId),
    Resolved(T),
}

impl<T: LinkTarget> Link<T> {
    pub fn unresolved(identifier: StandardId) -> Self {
        Self::Unresolved(identifier)
    }

    pub fn resolved(value: T) -> Self {
        Self::Resolved(value)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn target_type(&self) -> TargetType<T> {
        TargetType::new()
    }

    /// Identifier of the target, available in both states.
    pub fn identifier(&self) -> &StandardId {
        match self {
            Self::Unresolved(identifier) => identifier,
            Self::Resolved(value) => value.standard_id(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Unresolved(_) => None,
            Self::Resolved(value) => Some(value),
        }
    }

    /// The resolved target, or [`ValidationError::UnresolvedLink`].
    pub fn resolved_value(&self) -> Result<&T, ValidationError> {
        match self {
            Self::Unresolved(identifier) => Err(ValidationError::UnresolvedLink {
                identifier: identifier.clone(),
            }),
            Self::Resolved(value) => Ok(value),
        }
    }

    /// Resolve the link against `resolver`.
    ///
    /// A resolved link is returned as-is and the resolver is not called, so
    /// this is safe to invoke repeatedly.
    pub fn resolve<R>(&self, resolver: &R) -> Result<Self, ResolutionError>
    where
        R: Resolver<T> + ?Sized,
    {
        match self {
            Self::Resolved(_) => Ok(self.clone()),
            Self::Unresolved(identifier) => resolver
                .resolve(identifier, TargetType::new())
                .map(Self::Resolved)
                .map_err(|cause| ResolutionError::new(identifier.clone(), T::TYPE_NAME, cause)),
        }
    }
}

impl<T: LinkTarget> Display for Link<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_resolved() {
            "resolved"
        } else {
            "unresolved"
        };
        write!(f, "Link{{{} {}, {state}}}", T::TYPE_NAME, self.identifier())
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum LinkRef<'a, T> {
    Unresolved {
        identifier: &'a StandardId,
        target_type: &'static str,
    },
    Resolved {
        resolved: &'a T,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinkRepr<T> {
    Bare(StandardId),
    Unresolved {
        identifier: StandardId,
        target_type: String,
    },
    Resolved {
        resolved: T,
    },
}

impl<T> Serialize for Link<T>
where
    T: LinkTarget + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unresolved(identifier) => {
                let repr: LinkRef<'_, T> = LinkRef::Unresolved {
                    identifier,
                    target_type: T::TYPE_NAME,
                };
                repr.serialize(serializer)
            }
            Self::Resolved(resolved) => LinkRef::Resolved { resolved }.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for Link<T>
where
    T: LinkTarget + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match LinkRepr::<T>::deserialize(deserializer)? {
            LinkRepr::Bare(identifier) => Ok(Self::Unresolved(identifier)),
            LinkRepr::Unresolved {
                identifier,
                target_type,
            } => {
                if target_type != T::TYPE_NAME {
                    return Err(D::Error::custom(format!(
                        "link target type '{target_type}' does not match expected '{}'",
                        T::TYPE_NAME
                    )));
                }
                Ok(Self::Unresolved(identifier))
            }
            LinkRepr::Resolved { resolved } => Ok(Self::Resolved(resolved)),
        }
    }
}
