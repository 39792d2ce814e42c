use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Numeric product identifier, serialised as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    pub const FIRST: ProductId = ProductId(1);

    /// `None` once the id space is exhausted.
    pub fn next(self) -> Option<ProductId> {
        self.0.checked_add(1).map(ProductId)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no product id in {0:?}")]
pub struct InvalidProductId(String);

/// Reads ids the way path segments have always been read: leading
/// whitespace and an optional sign, then the leading run of decimal digits.
/// Anything after the digits is ignored, so `2abc` is 2 and `1.0` is 1.
/// Negative or out-of-range values can never name a record.
impl FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidProductId(s.to_string());
        let rest = s.trim_start();
        let (negative, rest) = match rest.as_bytes().first() {
            Some(b'-') => (true, &rest[1..]),
            Some(b'+') => (false, &rest[1..]),
            _ => (false, rest),
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(invalid());
        }
        let value: u64 = rest[..digits].parse().map_err(|_| invalid())?;
        if negative && value != 0 {
            return Err(invalid());
        }
        Ok(ProductId(value))
    }
}

/// Core product record. Every field except `id` may be absent; absent fields
/// are left out of the JSON representation entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kept as a JSON number so integer prices round-trip without a decimal point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

impl Product {
    /// A record holding only the fields the create operation keeps.
    pub fn from_create(id: ProductId, payload: CreateProduct) -> Self {
        Self {
            id,
            name: payload.name,
            description: None,
            price: payload.price,
            category: None,
            in_stock: None,
        }
    }

    /// Overwrites `name` and `price` with whatever the payload provides.
    pub fn apply(&mut self, payload: UpdateProduct) {
        if let Some(name) = payload.name {
            self.name = Some(name);
        }
        if let Some(price) = payload.price {
            self.price = Some(price);
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// A field of the wrong JSON type reads as absent instead of failing the body.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Body of `POST /api/products`. Unknown fields are dropped.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProduct {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Number>,
}

/// Body of `PUT /api/products/:id`. `null`, missing and mistyped all mean "keep".
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Number>,
}
