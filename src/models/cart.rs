use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier tying a browser session to a server-side cart.
///
/// Taken verbatim from the `cartId` query parameter; never validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(String);

impl CartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CartId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub item_title: String,
    #[serde(deserialize_with = "deserialize_loose_int")]
    pub item_count: i64,
}

impl CartItem {
    pub fn new(item_title: impl Into<String>, item_count: i64) -> Self {
        Self {
            item_title: item_title.into(),
            item_count,
        }
    }
}

/// Read-only copy of a cart as returned by the cart service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

// The cart service writes counts as decimal strings, older payloads as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseInt {
    Int(i64),
    Text(String),
}

impl LooseInt {
    pub(crate) fn to_i64(&self) -> Option<i64> {
        match self {
            LooseInt::Int(value) => Some(*value),
            LooseInt::Text(text) => text.trim().parse().ok(),
        }
    }

    pub(crate) fn raw(&self) -> String {
        match self {
            LooseInt::Int(value) => value.to_string(),
            LooseInt::Text(text) => text.clone(),
        }
    }
}

fn deserialize_loose_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = LooseInt::deserialize(deserializer)?;
    value
        .to_i64()
        .ok_or_else(|| de::Error::custom(format!("invalid integer: {:?}", value.raw())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_numeric_and_string_counts() {
        let body = r#"{"items":[
            {"itemTitle":"Asics Blue Running Shoes","itemCount":2},
            {"itemTitle":"Adidas Neon Running Shoes","itemCount":"1"}
        ]}"#;

        let cart: Cart = serde_json::from_str(body).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items[0], CartItem::new("Asics Blue Running Shoes", 2));
        assert_eq!(cart.items[1].item_count, 1);
    }

    #[test]
    fn test_decode_rejects_non_numeric_count() {
        let body = r#"{"items":[{"itemTitle":"Asics Blue Running Shoes","itemCount":"two"}]}"#;
        assert!(serde_json::from_str::<Cart>(body).is_err());
    }

    #[test]
    fn test_decode_requires_items() {
        assert!(serde_json::from_str::<Cart>("{}").is_err());
        let empty: Cart = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(empty.is_empty());
    }
}
