use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const SEPARATOR: char = '~';

/// Namespaced identifier of an external entity, such as a security.
///
/// The text form is `scheme~value`. Comparison is exact: no trimming and no
/// case folding is applied to either part.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StandardId {
    scheme: String,
    value: String,
}

impl StandardId {
    /// Build an identifier from its scheme and value.
    pub fn of(scheme: impl Into<String>, value: impl Into<String>) -> Result<Self, ValidationError> {
        let scheme = scheme.into();
        let value = value.into();

        if scheme.is_empty() {
            return Err(invalid(&scheme, &value, "scheme cannot be empty"));
        }
        if value.is_empty() {
            return Err(invalid(&scheme, &value, "value cannot be empty"));
        }
        if scheme.contains(SEPARATOR) {
            return Err(invalid(&scheme, &value, "scheme cannot contain '~'"));
        }

        Ok(Self { scheme, value })
    }

    /// Parse the `scheme~value` text form.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.split_once(SEPARATOR) {
            Some((scheme, value)) => Self::of(scheme, value),
            None => Err(ValidationError::InvalidIdentifier {
                input: input.to_owned(),
                reason: "expected 'scheme~value'",
            }),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

fn invalid(scheme: &str, value: &str, reason: &'static str) -> ValidationError {
    ValidationError::InvalidIdentifier {
        input: format!("{scheme}{SEPARATOR}{value}"),
        reason,
    }
}

impl Display for StandardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.scheme, self.value)
    }
}

impl FromStr for StandardId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for StandardId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for StandardId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<StandardId> for String {
    fn from(value: StandardId) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scheme_and_value() {
        let id = StandardId::parse("OG-Future~F123").expect("identifier should parse");
        assert_eq!(id.scheme(), "OG-Future");
        assert_eq!(id.value(), "F123");
        assert_eq!(id.to_string(), "OG-Future~F123");
    }

    #[test]
    fn keeps_separator_inside_value() {
        let id = StandardId::parse("Ticker~A~B").expect("identifier should parse");
        assert_eq!(id.value(), "A~B");
    }

    #[test]
    fn equality_is_exact() {
        let upper = StandardId::of("OG-Future", "F123").expect("valid");
        let lower = StandardId::of("og-future", "F123").expect("valid");
        let padded = StandardId::of("OG-Future", " F123").expect("valid");
        assert_ne!(upper, lower);
        assert_ne!(upper, padded);
    }

    #[test]
    fn rejects_empty_parts() {
        let err = StandardId::of("", "F123").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidIdentifier { .. }));

        let err = StandardId::of("OG-Future", "").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidIdentifier { .. }));

        let err = StandardId::parse("F123").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidIdentifier { .. }));
    }

    #[test]
    fn serializes_as_text_form() {
        let id = StandardId::of("OG-Future", "F123").expect("valid");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"OG-Future~F123\"");

        let back: StandardId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
        assert!(serde_json::from_str::<StandardId>("\"~F123\"").is_err());
    }
}
