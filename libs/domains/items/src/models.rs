use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ItemError, ItemResult};

/// Store-assigned item identifier.
///
/// Wraps a MongoDB `ObjectId` and travels over the wire as its 24-character
/// hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(ObjectId);

impl ItemId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a path token; `None` for anything that is not an ObjectId
    pub fn parse(raw: &str) -> Option<Self> {
        ObjectId::parse_str(raw).ok().map(Self)
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for ItemId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for ItemId {
    type Err = mongodb::bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Item as exposed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier assigned by the store
    #[schema(value_type = String, example = "665f1c2ab4d3e2f1a0b9c8d7")]
    pub id: ItemId,
    /// Unique item name
    #[schema(example = "Widget")]
    pub name: String,
    /// Item price
    #[schema(example = 9.99)]
    pub price: f64,
}

/// Request body for creating or replacing an item.
///
/// Both fields are optional at the wire level so that absence is reported as
/// a domain error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ItemInput {
    #[validate(required, length(min = 1))]
    #[schema(example = "Widget")]
    pub name: Option<String>,
    #[validate(required)]
    #[schema(example = 9.99)]
    pub price: Option<f64>,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
        }
    }

    /// Check presence rules and unwrap into the fields to persist
    pub fn into_fields(self, rules: &ItemRules) -> ItemResult<ItemFields> {
        self.validate().map_err(|_| ItemError::MissingFields)?;

        let (Some(name), Some(price)) = (self.name, self.price) else {
            return Err(ItemError::MissingFields);
        };

        if price == 0.0 && !rules.allow_zero_price {
            return Err(ItemError::MissingFields);
        }

        Ok(ItemFields { name, price })
    }
}

/// Validated `name`/`price` pair handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub price: f64,
}

impl ItemFields {
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
        }
    }
}

/// Input rules that are deployment choices rather than invariants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemRules {
    /// Accept `price: 0`.
    ///
    /// Off by default: zero has always been rejected as if the price were
    /// missing, and clients rely on the 400.
    pub allow_zero_price: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_round_trips_through_hex() {
        let id = ItemId::new();
        let parsed = ItemId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_item_id_rejects_malformed_tokens() {
        assert!(ItemId::parse("not-an-id").is_none());
        assert!(ItemId::parse("123").is_none());
        assert!(ItemId::parse("").is_none());
        assert!(ItemId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").is_none());
    }

    #[test]
    fn test_item_serializes_id_as_hex_string() {
        let id = ItemId::parse("665f1c2ab4d3e2f1a0b9c8d7").unwrap();
        let item = ItemFields {
            name: "Widget".to_string(),
            price: 9.99,
        }
        .into_item(id);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "665f1c2ab4d3e2f1a0b9c8d7",
                "name": "Widget",
                "price": 9.99
            })
        );
    }

    #[test]
    fn test_into_fields_accepts_complete_input() {
        let fields = ItemInput::new("Widget", 9.99)
            .into_fields(&ItemRules::default())
            .unwrap();
        assert_eq!(fields.name, "Widget");
        assert_eq!(fields.price, 9.99);
    }

    #[test]
    fn test_into_fields_rejects_missing_price() {
        let input = ItemInput {
            name: Some("widget".to_string()),
            price: None,
        };
        assert!(matches!(
            input.into_fields(&ItemRules::default()),
            Err(ItemError::MissingFields)
        ));
    }

    #[test]
    fn test_into_fields_rejects_missing_or_empty_name() {
        let rules = ItemRules::default();
        let missing = ItemInput {
            name: None,
            price: Some(1.0),
        };
        assert!(matches!(
            missing.into_fields(&rules),
            Err(ItemError::MissingFields)
        ));
        assert!(matches!(
            ItemInput::new("", 1.0).into_fields(&rules),
            Err(ItemError::MissingFields)
        ));
    }

    #[test]
    fn test_zero_price_depends_on_rules() {
        assert!(matches!(
            ItemInput::new("Freebie", 0.0).into_fields(&ItemRules::default()),
            Err(ItemError::MissingFields)
        ));

        let lenient = ItemRules {
            allow_zero_price: true,
        };
        let fields = ItemInput::new("Freebie", 0.0).into_fields(&lenient).unwrap();
        assert_eq!(fields.price, 0.0);
    }

    #[test]
    fn test_negative_price_is_present() {
        let fields = ItemInput::new("Refund", -5.0)
            .into_fields(&ItemRules::default())
            .unwrap();
        assert_eq!(fields.price, -5.0);
    }

    #[test]
    fn test_item_input_deserializes_absent_fields_as_none() {
        let input: ItemInput = serde_json::from_str(r#"{"name": "widget"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("widget"));
        assert!(input.price.is_none());
    }
}
