//! # Tradelink Finance
//!
//! Immutable trade records that reference their securities through links.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`trade_info`] | [`TradeInfo`] metadata shared by all trades |
//! | [`security`] | [`Security`], [`Product`] and [`SecurityLink`] |
//! | [`product`] | [`DeliverableSwapFuture`] contract terms |
//! | [`trade`] | [`DeliverableSwapFutureTrade`] and its builder |
//!
//! ## Quick Start
//!
//! ```rust
//! use tradelink_core::{BeanBuilder, StandardId, ValidationError};
//! use tradelink_finance::{DeliverableSwapFutureTrade, SecurityLink};
//!
//! # fn main() -> Result<(), ValidationError> {
//! let trade = DeliverableSwapFutureTrade::builder()
//!     .security_link(SecurityLink::unresolved(StandardId::of("OG-Future", "F123")?))
//!     .quantity(10)
//!     .trade_price(99.5)
//!     .build()?;
//!
//! assert!(!trade.security_link().is_resolved());
//! assert!(trade.trade_info().is_empty());
//!
//! // A missing security link is reported and the builder stays usable.
//! let builder = DeliverableSwapFutureTrade::builder().quantity(1);
//! assert!(matches!(
//!     builder.build(),
//!     Err(ValidationError::MissingRequiredField { field: "securityLink" })
//! ));
//! # Ok(())
//! # }
//! ```

pub mod product;
pub mod security;
pub mod trade;
pub mod trade_info;

pub use product::{validate_currency_code, DeliverableSwapFuture};
pub use security::{Product, Security, SecurityLink};
pub use trade::{DeliverableSwapFutureTrade, DeliverableSwapFutureTradeBuilder, SecurityTrade};
pub use trade_info::{TradeInfo, TradeInfoBuilder};
