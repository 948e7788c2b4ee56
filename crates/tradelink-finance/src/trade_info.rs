use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use time::{Date, Time, UtcOffset};
use tradelink_core::{
    Bean, BeanBuilder, MetaBean, MetaProperty, PropertyKind, StandardId, ValidationError,
};

/// Additional information attached to a trade.
///
/// Every field is optional. [`TradeInfo::empty`] is the canonical instance
/// used when a trade is built without any.
/// Deserialization goes through [`TradeInfoBuilder`] and its validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TradeInfoBuilder")]
pub struct TradeInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<StandardId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    counterparty: Option<StandardId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trade_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trade_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone: Option<UtcOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    settlement_date: Option<Date>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
}

impl TradeInfo {
    pub const fn empty() -> Self {
        Self {
            id: None,
            counterparty: None,
            trade_date: None,
            trade_time: None,
            zone: None,
            settlement_date: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn builder() -> TradeInfoBuilder {
        TradeInfoBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    pub fn id(&self) -> Option<&StandardId> {
        self.id.as_ref()
    }

    pub fn counterparty(&self) -> Option<&StandardId> {
        self.counterparty.as_ref()
    }

    pub fn trade_date(&self) -> Option<Date> {
        self.trade_date
    }

    pub fn trade_time(&self) -> Option<Time> {
        self.trade_time
    }

    pub fn zone(&self) -> Option<UtcOffset> {
        self.zone
    }

    pub fn settlement_date(&self) -> Option<Date> {
        self.settlement_date
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn to_builder(&self) -> TradeInfoBuilder {
        TradeInfoBuilder {
            id: self.id.clone(),
            counterparty: self.counterparty.clone(),
            trade_date: self.trade_date,
            trade_time: self.trade_time,
            zone: self.zone,
            settlement_date: self.settlement_date,
            attributes: self.attributes.clone(),
        }
    }
}

impl Display for TradeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut fields = Vec::new();
        if let Some(id) = &self.id {
            fields.push(format!("id={id}"));
        }
        if let Some(counterparty) = &self.counterparty {
            fields.push(format!("counterparty={counterparty}"));
        }
        if let Some(trade_date) = self.trade_date {
            fields.push(format!("tradeDate={trade_date}"));
        }
        if let Some(trade_time) = self.trade_time {
            fields.push(format!("tradeTime={trade_time}"));
        }
        if let Some(zone) = self.zone {
            fields.push(format!("zone={zone}"));
        }
        if let Some(settlement_date) = self.settlement_date {
            fields.push(format!("settlementDate={settlement_date}"));
        }
        if !self.attributes.is_empty() {
            let attributes = self
                .attributes
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join(", ");
            fields.push(format!("attributes={{{attributes}}}"));
        }
        write!(f, "TradeInfo{{{}}}", fields.join(", "))
    }
}

/// Builder for [`TradeInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeInfoBuilder {
    id: Option<StandardId>,
    counterparty: Option<StandardId>,
    trade_date: Option<Date>,
    trade_time: Option<Time>,
    zone: Option<UtcOffset>,
    settlement_date: Option<Date>,
    attributes: BTreeMap<String, String>,
}

impl TradeInfoBuilder {
    pub fn id(mut self, id: StandardId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn counterparty(mut self, counterparty: StandardId) -> Self {
        self.counterparty = Some(counterparty);
        self
    }

    pub fn trade_date(mut self, trade_date: Date) -> Self {
        self.trade_date = Some(trade_date);
        self
    }

    pub fn trade_time(mut self, trade_time: Time) -> Self {
        self.trade_time = Some(trade_time);
        self
    }

    pub fn zone(mut self, zone: UtcOffset) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn settlement_date(mut self, settlement_date: Date) -> Self {
        self.settlement_date = Some(settlement_date);
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Check that settlement does not precede the trade date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(trade_date), Some(settlement_date)) = (self.trade_date, self.settlement_date) {
            if settlement_date < trade_date {
                return Err(ValidationError::InvalidDateOrder {
                    earlier: "tradeDate",
                    later: "settlementDate",
                });
            }
        }
        Ok(())
    }
}

impl BeanBuilder for TradeInfoBuilder {
    type Bean = TradeInfo;

    fn build(&self) -> Result<TradeInfo, ValidationError> {
        self.validate()?;
        Ok(TradeInfo {
            id: self.id.clone(),
            counterparty: self.counterparty.clone(),
            trade_date: self.trade_date,
            trade_time: self.trade_time,
            zone: self.zone,
            settlement_date: self.settlement_date,
            attributes: self.attributes.clone(),
        })
    }
}

impl TryFrom<TradeInfoBuilder> for TradeInfo {
    type Error = ValidationError;

    fn try_from(builder: TradeInfoBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

static TRADE_INFO_META: Lazy<MetaBean<TradeInfo>> = Lazy::new(|| {
    MetaBean::new(
        "TradeInfo",
        vec![
            MetaProperty::new(
                "id",
                PropertyKind::Composite,
                |bean| serde_json::to_value(&bean.id),
                |builder| serde_json::to_value(&builder.id),
                |builder, value| {
                    builder.id = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
            MetaProperty::new(
                "counterparty",
                PropertyKind::Composite,
                |bean| serde_json::to_value(&bean.counterparty),
                |builder| serde_json::to_value(&builder.counterparty),
                |builder, value| {
                    builder.counterparty = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
            MetaProperty::new(
                "tradeDate",
                PropertyKind::Text,
                |bean| serde_json::to_value(bean.trade_date),
                |builder| serde_json::to_value(builder.trade_date),
                |builder, value| {
                    builder.trade_date = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
            MetaProperty::new(
                "tradeTime",
                PropertyKind::Text,
                |bean| serde_json::to_value(bean.trade_time),
                |builder| serde_json::to_value(builder.trade_time),
                |builder, value| {
                    builder.trade_time = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
            MetaProperty::new(
                "zone",
                PropertyKind::Text,
                |bean| serde_json::to_value(bean.zone),
                |builder| serde_json::to_value(builder.zone),
                |builder, value| {
                    builder.zone = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
            MetaProperty::new(
                "settlementDate",
                PropertyKind::Text,
                |bean| serde_json::to_value(bean.settlement_date),
                |builder| serde_json::to_value(builder.settlement_date),
                |builder, value| {
                    builder.settlement_date = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
            MetaProperty::new(
                "attributes",
                PropertyKind::Composite,
                |bean| serde_json::to_value(&bean.attributes),
                |builder| serde_json::to_value(&builder.attributes),
                |builder, value| {
                    builder.attributes = serde_json::from_value(value)?;
                    Ok(())
                },
            ),
        ],
    )
});

impl Bean for TradeInfo {
    type Builder = TradeInfoBuilder;

    fn meta_bean() -> &'static MetaBean<Self> {
        &TRADE_INFO_META
    }

    fn to_builder(&self) -> TradeInfoBuilder {
        TradeInfo::to_builder(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::{date, offset, time};
    use tradelink_core::PropertyError;

    use super::*;

    fn populated() -> TradeInfo {
        TradeInfo::builder()
            .id(StandardId::of("OG-Trade", "T1").expect("valid id"))
            .counterparty(StandardId::of("LEI", "CPTY1").expect("valid id"))
            .trade_date(date!(2015 - 03 - 18))
            .trade_time(time!(11:30))
            .zone(offset!(+1))
            .settlement_date(date!(2015 - 03 - 20))
            .attribute("desk", "rates")
            .build()
            .expect("valid trade info")
    }

    #[test]
    fn default_is_the_canonical_empty_instance() {
        assert_eq!(TradeInfo::default(), TradeInfo::empty());
        assert!(TradeInfo::empty().is_empty());
        assert!(!populated().is_empty());
        assert_eq!(TradeInfo::empty().to_string(), "TradeInfo{}");
    }

    #[test]
    fn rejects_settlement_before_trade_date() {
        let err = TradeInfo::builder()
            .trade_date(date!(2015 - 03 - 18))
            .settlement_date(date!(2015 - 03 - 17))
            .build()
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDateOrder { .. }));
    }

    #[test]
    fn builder_round_trip_preserves_fields() {
        let info = populated();
        assert_eq!(info.to_builder().build().expect("valid"), info);
        assert_eq!(info.attribute("desk"), Some("rates"));
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let value = serde_json::to_value(populated()).expect("serialize");
        assert_eq!(value["tradeDate"], json!("2015-03-18"));
        assert_eq!(value["counterparty"], json!("LEI~CPTY1"));

        let empty = serde_json::to_value(TradeInfo::empty()).expect("serialize");
        assert_eq!(empty, json!({}));

        let back: TradeInfo = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, populated());
    }

    #[test]
    fn deserialization_validates_date_order() {
        let err = serde_json::from_value::<TradeInfo>(json!({
            "tradeDate": "2015-03-18",
            "settlementDate": "2015-03-01"
        }))
        .expect_err("must fail");
        assert!(err.to_string().contains("settlementDate"));

        let mut builder = TradeInfo::empty().to_builder();
        builder
            .set_string("tradeDate", "2015-03-18")
            .expect("settable");
        builder
            .set_string("settlementDate", "2015-03-01")
            .expect("settable");
        assert!(matches!(
            builder.build(),
            Err(ValidationError::InvalidDateOrder { .. })
        ));
    }

    #[test]
    fn exposes_properties_by_name() {
        let info = populated();
        assert_eq!(info.property("tradeDate").expect("readable"), json!("2015-03-18"));
        assert_eq!(TradeInfo::property_names().len(), 7);

        let mut builder = Bean::to_builder(&info);
        builder
            .set_string("settlementDate", "2015-03-25")
            .expect("settable");
        assert_eq!(
            builder.build().expect("valid").settlement_date(),
            Some(date!(2015 - 03 - 25))
        );

        let err = info
            .set_property("tradeDate", json!("2015-03-19"))
            .expect_err("must fail");
        assert!(matches!(err, PropertyError::ImmutableWriteRejected { .. }));
    }
}
