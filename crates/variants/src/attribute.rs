//! Attribute model: labeled values plus the differentiator flag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use varia_core::ValueObject;

/// A dynamic attribute value.
///
/// The backend stores these as untyped JSON blobs; here they are a closed
/// tagged union with an explicit deep-equality function, so the duplicate
/// and consistency comparisons are total and auditable. `untagged` keeps the
/// JSON wire shape unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<AttributeValue>),
    Map(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Structural equality.
    ///
    /// - maps are key-order independent (`BTreeMap` keeps them sorted),
    /// - lists are ordered (attribute values are scalars or small lists
    ///   representing a single choice),
    /// - numbers compare by value, with NaN equal to itself so the relation
    ///   stays reflexive.
    pub fn deep_eq(&self, other: &AttributeValue) -> bool {
        use AttributeValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Number(a), Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Text(a), Text(b)) => a == b,
            (List(a), List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_eq(y))
            }
            (Map(a), Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.deep_eq(vb))
            }
            _ => false,
        }
    }
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        self.deep_eq(other)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl ValueObject for AttributeValue {}

/// A single labeled attribute and its differentiator flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub label: String,
    pub value: AttributeValue,
    pub is_differentiator: bool,
}

impl Attribute {
    /// An attribute that distinguishes one variant from another (e.g. Color).
    pub fn differentiator(label: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_differentiator: true,
        }
    }

    /// A purely informational attribute.
    pub fn info(label: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_differentiator: false,
        }
    }
}

impl ValueObject for Attribute {}

/// A named bundle of attributes belonging to a variant
/// (e.g. "Physical Properties").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeGroup {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl AttributeGroup {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}

impl ValueObject for AttributeGroup {}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, AttributeValue)]) -> AttributeValue {
        AttributeValue::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn scalar_equality() {
        assert_eq!(AttributeValue::from("Red"), AttributeValue::from("Red"));
        assert_ne!(AttributeValue::from("Red"), AttributeValue::from("Blue"));
        assert_ne!(AttributeValue::from("1"), AttributeValue::from(1.0));
    }

    #[test]
    fn nan_is_equal_to_itself() {
        let nan = AttributeValue::Number(f64::NAN);
        assert_eq!(nan, nan.clone());
    }

    #[test]
    fn maps_compare_key_order_independent() {
        let a = map(&[("w", 10.0.into()), ("h", 20.0.into())]);
        let b = map(&[("h", 20.0.into()), ("w", 10.0.into())]);
        assert_eq!(a, b);
    }

    #[test]
    fn lists_compare_ordered() {
        let a = AttributeValue::List(vec!["S".into(), "M".into()]);
        let b = AttributeValue::List(vec!["M".into(), "S".into()]);
        assert_ne!(a, b);
        assert_eq!(a, AttributeValue::List(vec!["S".into(), "M".into()]));
    }

    #[test]
    fn mismatched_kinds_are_never_equal() {
        assert_ne!(AttributeValue::Null, AttributeValue::Bool(false));
        assert_ne!(AttributeValue::from(0.0), AttributeValue::Bool(false));
    }

    #[test]
    fn untagged_json_round_trip() {
        let value = map(&[
            ("finish", "matte".into()),
            ("sizes", AttributeValue::List(vec!["S".into(), "M".into()])),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);

        let null: AttributeValue = serde_json::from_str("null").unwrap();
        assert_eq!(null, AttributeValue::Null);
    }

    #[test]
    fn attribute_serializes_camel_case() {
        let attr = Attribute::differentiator("Color", "Red");
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["isDifferentiator"], serde_json::json!(true));
        assert_eq!(json["label"], serde_json::json!("Color"));
    }
}
