use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tradelink_core::{Link, LinkTarget, StandardId};

/// The financial product underlying a [`Security`].
pub trait Product: Debug + Clone {
    /// Name reported as the link target type of `Security<Self>`.
    const SECURITY_TYPE: &'static str;
}

/// A tradable security: a product published under a standard identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security<P> {
    standard_id: StandardId,
    name: String,
    product: P,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
}

impl<P: Product> Security<P> {
    pub fn new(standard_id: StandardId, name: impl Into<String>, product: P) -> Self {
        Self {
            standard_id,
            name: name.into(),
            product,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn standard_id(&self) -> &StandardId {
        &self.standard_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product(&self) -> &P {
        &self.product
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

impl<P: Product> LinkTarget for Security<P> {
    const TYPE_NAME: &'static str = P::SECURITY_TYPE;

    fn standard_id(&self) -> &StandardId {
        &self.standard_id
    }
}

/// Link from a trade to the security it trades.
pub type SecurityLink<P> = Link<Security<P>>;
