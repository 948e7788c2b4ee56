//! Generic, name-based access to the fields of immutable beans.
//!
//! Every bean type publishes a [`MetaBean`]: an ordered table of
//! [`MetaProperty`] descriptors, each pairing a field name with functions that
//! read the field from a bean, read it from a builder, and write it on a
//! builder. Values cross this surface as [`PropertyValue`]s so that tooling
//! (serializers, diffing, UI binding) can work without knowing the concrete
//! type.
//!
//! Beans are read-only through this surface: [`Bean::set_property`] always
//! rejects writes to known fields. Only a [`BeanBuilder`] accepts them.

use std::fmt::{Debug, Formatter};

use serde_json::Value;
use thiserror::Error;

use crate::{decimal, ValidationError};

/// Dynamic value exchanged through the introspection surface.
pub type PropertyValue = Value;

/// Shape of a property, used to convert text in [`BeanBuilder::set_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Text,
    Integer,
    /// Floating point; text may also be `NaN`, `Infinity` or `-Infinity`.
    Decimal,
    /// Structured value; text input is passed through as a JSON string.
    Composite,
}

/// Errors raised by name-based property access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("unknown property '{field}' on {bean}")]
    UnknownField { bean: &'static str, field: String },
    #[error("property '{field}' on {bean} is immutable; use the builder to change it")]
    ImmutableWriteRejected { bean: &'static str, field: String },
    #[error("value for property '{field}' on {bean} has the wrong type: {message}")]
    TypeMismatch {
        bean: &'static str,
        field: &'static str,
        message: String,
    },
    #[error("property '{field}' on {bean} could not be read: {message}")]
    Unreadable {
        bean: &'static str,
        field: &'static str,
        message: String,
    },
}

type Reader<S> = fn(&S) -> Result<Value, serde_json::Error>;
type Writer<S> = fn(&mut S, Value) -> Result<(), serde_json::Error>;

/// Descriptor of a single bean property.
pub struct MetaProperty<B: Bean> {
    name: &'static str,
    kind: PropertyKind,
    read: Reader<B>,
    read_builder: Reader<B::Builder>,
    write_builder: Writer<B::Builder>,
}

impl<B: Bean> MetaProperty<B> {
    pub fn new(
        name: &'static str,
        kind: PropertyKind,
        read: Reader<B>,
        read_builder: Reader<B::Builder>,
        write_builder: Writer<B::Builder>,
    ) -> Self {
        Self {
            name,
            kind,
            read,
            read_builder,
            write_builder,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn get(&self, bean: &B) -> Result<PropertyValue, PropertyError> {
        (self.read)(bean).map_err(|err| self.unreadable(err))
    }

    pub fn get_from_builder(&self, builder: &B::Builder) -> Result<PropertyValue, PropertyError> {
        (self.read_builder)(builder).map_err(|err| self.unreadable(err))
    }

    /// Write `value` on `builder`. The builder is unchanged when the value has
    /// the wrong shape.
    pub fn set_on_builder(
        &self,
        builder: &mut B::Builder,
        value: PropertyValue,
    ) -> Result<(), PropertyError> {
        (self.write_builder)(builder, value).map_err(|err| self.mismatch(err.to_string()))
    }

    /// Convert `text` according to this property's [`PropertyKind`].
    pub fn parse_text(&self, text: &str) -> Result<PropertyValue, PropertyError> {
        match self.kind {
            PropertyKind::Text | PropertyKind::Composite => Ok(Value::String(text.to_owned())),
            PropertyKind::Integer => text
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|err| self.mismatch(format!("'{text}' is not an integer: {err}"))),
            PropertyKind::Decimal => decimal::parse(text)
                .ok_or_else(|| self.mismatch(format!("'{text}' is not a decimal")))
                .and_then(|value| {
                    decimal::to_value(value).map_err(|err| self.mismatch(err.to_string()))
                }),
        }
    }

    fn unreadable(&self, err: serde_json::Error) -> PropertyError {
        PropertyError::Unreadable {
            bean: B::meta_bean().bean_name(),
            field: self.name,
            message: err.to_string(),
        }
    }

    fn mismatch(&self, message: String) -> PropertyError {
        PropertyError::TypeMismatch {
            bean: B::meta_bean().bean_name(),
            field: self.name,
            message,
        }
    }
}

impl<B: Bean> Debug for MetaProperty<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaProperty")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Ordered property table of a bean type.
pub struct MetaBean<B: Bean> {
    bean_name: &'static str,
    properties: Vec<MetaProperty<B>>,
}

impl<B: Bean> MetaBean<B> {
    pub fn new(bean_name: &'static str, properties: Vec<MetaProperty<B>>) -> Self {
        Self {
            bean_name,
            properties,
        }
    }

    pub const fn bean_name(&self) -> &'static str {
        self.bean_name
    }

    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(MetaProperty::name)
    }

    pub fn meta_properties(&self) -> &[MetaProperty<B>] {
        &self.properties
    }

    pub fn meta_property(&self, name: &str) -> Result<&MetaProperty<B>, PropertyError> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .ok_or_else(|| PropertyError::UnknownField {
                bean: self.bean_name,
                field: name.to_owned(),
            })
    }
}

impl<B: Bean> Debug for MetaBean<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaBean")
            .field("bean_name", &self.bean_name)
            .field("properties", &self.properties)
            .finish()
    }
}

/// An immutable value that exposes its fields through a [`MetaBean`].
pub trait Bean: Sized + 'static {
    type Builder: BeanBuilder<Bean = Self>;

    fn meta_bean() -> &'static MetaBean<Self>;

    /// A builder seeded with this bean's current field values.
    fn to_builder(&self) -> Self::Builder;

    fn property_names() -> Vec<&'static str> {
        Self::meta_bean().property_names().collect()
    }

    fn property(&self, name: &str) -> Result<PropertyValue, PropertyError> {
        Self::meta_bean().meta_property(name)?.get(self)
    }

    /// All properties in declaration order.
    fn properties(&self) -> Result<Vec<(&'static str, PropertyValue)>, PropertyError> {
        Self::meta_bean()
            .meta_properties()
            .iter()
            .map(|property| property.get(self).map(|value| (property.name(), value)))
            .collect()
    }

    /// Always fails: beans are immutable. Unknown names report
    /// [`PropertyError::UnknownField`] before the write is rejected.
    fn set_property(&self, name: &str, _value: PropertyValue) -> Result<(), PropertyError> {
        let meta = Self::meta_bean();
        let property = meta.meta_property(name)?;
        Err(PropertyError::ImmutableWriteRejected {
            bean: meta.bean_name(),
            field: property.name().to_owned(),
        })
    }
}

/// Mutable staging object for a [`Bean`].
pub trait BeanBuilder: Sized {
    type Bean: Bean<Builder = Self>;

    /// Validate the staged fields and produce a bean. The builder is not
    /// consumed and can be reused.
    fn build(&self) -> Result<Self::Bean, ValidationError>;

    fn get(&self, name: &str) -> Result<PropertyValue, PropertyError> {
        <Self::Bean as Bean>::meta_bean()
            .meta_property(name)?
            .get_from_builder(self)
    }

    fn set(&mut self, name: &str, value: PropertyValue) -> Result<&mut Self, PropertyError> {
        <Self::Bean as Bean>::meta_bean()
            .meta_property(name)?
            .set_on_builder(self, value)?;
        Ok(self)
    }

    fn set_string(&mut self, name: &str, text: &str) -> Result<&mut Self, PropertyError> {
        let property = <Self::Bean as Bean>::meta_bean().meta_property(name)?;
        let value = property.parse_text(text)?;
        property.set_on_builder(self, value)?;
        Ok(self)
    }
}
