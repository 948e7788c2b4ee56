use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tradelink_core::{
    decimal, resolve_links_in, Bean, BeanBuilder, MetaBean, MetaProperty, PropertyKind,
    Resolvable, ResolutionError, Resolver, ValidationError,
};

use crate::{DeliverableSwapFuture, Product, Security, SecurityLink, TradeInfo};

const SECURITY_LINK: &str = "securityLink";

/// A trade in a security, referenced through a [`SecurityLink`].
pub trait SecurityTrade<P: Product>: Resolvable<Security<P>> {
    fn trade_info(&self) -> &TradeInfo;

    fn security_link(&self) -> &SecurityLink<P>;

    /// The traded security, available once the link has been resolved.
    fn security(&self) -> Result<&Security<P>, ValidationError> {
        self.security_link().resolved_value()
    }
}

/// A trade in a [`DeliverableSwapFuture`].
///
/// Built only through [`DeliverableSwapFutureTradeBuilder`] and never mutated;
/// deserialization also goes through the builder. Equality and hashing cover
/// all four fields; the trade price compares by bit pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DeliverableSwapFutureTradeBuilder")]
pub struct DeliverableSwapFutureTrade {
    trade_info: TradeInfo,
    security_link: SecurityLink<DeliverableSwapFuture>,
    /// Number of contracts; positive when buying, negative when selling.
    quantity: i64,
    /// Transaction price in the quoting convention of the future.
    #[serde(serialize_with = "decimal::serialize")]
    trade_price: f64,
}

impl DeliverableSwapFutureTrade {
    pub fn builder() -> DeliverableSwapFutureTradeBuilder {
        DeliverableSwapFutureTradeBuilder::default()
    }

    pub fn trade_info(&self) -> &TradeInfo {
        &self.trade_info
    }

    pub fn security_link(&self) -> &SecurityLink<DeliverableSwapFuture> {
        &self.security_link
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn trade_price(&self) -> f64 {
        self.trade_price
    }

    pub fn is_buy(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_sell(&self) -> bool {
        self.quantity < 0
    }

    pub fn to_builder(&self) -> DeliverableSwapFutureTradeBuilder {
        DeliverableSwapFutureTradeBuilder {
            trade_info: Some(self.trade_info.clone()),
            security_link: Some(self.security_link.clone()),
            quantity: self.quantity,
            trade_price: self.trade_price,
        }
    }

    /// Resolve the security link, returning a new trade.
    ///
    /// An already-resolved trade is returned unchanged without calling the
    /// resolver. On failure `self` is untouched.
    pub fn resolve_links<R>(&self, resolver: &R) -> Result<Self, ResolutionError>
    where
        R: Resolver<Security<DeliverableSwapFuture>> + ?Sized,
    {
        resolve_links_in(self, &self.security_link, resolver, |security_link| Self {
            security_link,
            ..self.clone()
        })
    }
}

impl Resolvable<Security<DeliverableSwapFuture>> for DeliverableSwapFutureTrade {
    fn resolve_links<R>(&self, resolver: &R) -> Result<Self, ResolutionError>
    where
        R: Resolver<Security<DeliverableSwapFuture>> + ?Sized,
    {
        DeliverableSwapFutureTrade::resolve_links(self, resolver)
    }
}

impl SecurityTrade<DeliverableSwapFuture> for DeliverableSwapFutureTrade {
    fn trade_info(&self) -> &TradeInfo {
        &self.trade_info
    }

    fn security_link(&self) -> &SecurityLink<DeliverableSwapFuture> {
        &self.security_link
    }
}

impl PartialEq for DeliverableSwapFutureTrade {
    fn eq(&self, other: &Self) -> bool {
        self.trade_info == other.trade_info
            && self.security_link == other.security_link
            && self.quantity == other.quantity
            && self.trade_price.to_bits() == other.trade_price.to_bits()
    }
}

impl Eq for DeliverableSwapFutureTrade {}

impl Hash for DeliverableSwapFutureTrade {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.trade_info.hash(state);
        self.security_link.hash(state);
        self.quantity.hash(state);
        self.trade_price.to_bits().hash(state);
    }
}

impl Display for DeliverableSwapFutureTrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DeliverableSwapFutureTrade{{tradeInfo={}, securityLink={}, quantity={}, tradePrice={}}}",
            self.trade_info, self.security_link, self.quantity, self.trade_price
        )
    }
}

/// Staging object for [`DeliverableSwapFutureTrade`].
///
/// Setters may be called in any order and any number of times; the last
/// write wins. [`build`](BeanBuilder::build) does not consume the builder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliverableSwapFutureTradeBuilder {
    trade_info: Option<TradeInfo>,
    security_link: Option<SecurityLink<DeliverableSwapFuture>>,
    quantity: i64,
    #[serde(deserialize_with = "decimal::deserialize")]
    trade_price: f64,
}

impl DeliverableSwapFutureTradeBuilder {
    pub fn trade_info(mut self, trade_info: TradeInfo) -> Self {
        self.trade_info = Some(trade_info);
        self
    }

    pub fn security_link(mut self, security_link: SecurityLink<DeliverableSwapFuture>) -> Self {
        self.security_link = Some(security_link);
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn trade_price(mut self, trade_price: f64) -> Self {
        self.trade_price = trade_price;
        self
    }

    /// Fill unset optional fields with their declared defaults.
    pub fn apply_defaults(&mut self) {
        if self.trade_info.is_none() {
            self.trade_info = Some(TradeInfo::empty());
        }
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.security_link.is_none() {
            return Err(missing_security_link());
        }
        Ok(())
    }
}

fn missing_security_link() -> ValidationError {
    ValidationError::MissingRequiredField {
        field: SECURITY_LINK,
    }
}

impl BeanBuilder for DeliverableSwapFutureTradeBuilder {
    type Bean = DeliverableSwapFutureTrade;

    fn build(&self) -> Result<DeliverableSwapFutureTrade, ValidationError> {
        let mut staged = self.clone();
        staged.apply_defaults();
        staged.validate()?;

        Ok(DeliverableSwapFutureTrade {
            trade_info: staged.trade_info.unwrap_or_default(),
            security_link: staged.security_link.ok_or_else(missing_security_link)?,
            quantity: staged.quantity,
            trade_price: staged.trade_price,
        })
    }
}

impl TryFrom<DeliverableSwapFutureTradeBuilder> for DeliverableSwapFutureTrade {
    type Error = ValidationError;

    fn try_from(builder: DeliverableSwapFutureTradeBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

static TRADE_META: Lazy<MetaBean<DeliverableSwapFutureTrade>> = Lazy::new(|| {
    MetaBean::new(
        "DeliverableSwapFutureTrade",
        vec![
            MetaProperty::new(
                "tradeInfo",
                PropertyKind::Composite,
                |trade| serde_json::to_value(&trade.trade_info),
                |builder| serde_json::to_value(&builder.trade_info),
                |builder, value| {
                    builder.trade_info = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
            MetaProperty::new(
                SECURITY_LINK,
                PropertyKind::Composite,
                |trade| serde_json::to_value(&trade.security_link),
                |builder| serde_json::to_value(&builder.security_link),
                |builder, value| {
                    builder.security_link = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
            MetaProperty::new(
                "quantity",
                PropertyKind::Integer,
                |trade| serde_json::to_value(trade.quantity),
                |builder| serde_json::to_value(builder.quantity),
                |builder, value| {
                    builder.quantity = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
            MetaProperty::new(
                "tradePrice",
                PropertyKind::Decimal,
                |trade| decimal::to_value(trade.trade_price),
                |builder| decimal::to_value(builder.trade_price),
                |builder, value| {
                    builder.trade_price = decimal::from_value(value)?;
                    Ok(())
                },
            ),
        ],
    )
});

impl Bean for DeliverableSwapFutureTrade {
    type Builder = DeliverableSwapFutureTradeBuilder;

    fn meta_bean() -> &'static MetaBean<Self> {
        &TRADE_META
    }

    fn to_builder(&self) -> DeliverableSwapFutureTradeBuilder {
        DeliverableSwapFutureTrade::to_builder(self)
    }
}
