//! # Wire Records
//!
//! The JSON shapes exchanged with the marketplace API, and their conversion
//! to and from the validated domain model.
//!
//! ## Wire Conventions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Record Encoding                                  │
//! │                                                                         │
//! │  condition  integer code (0 = AS_NEW, 1 = GOOD, 2 = ACCEPTABLE)        │
//! │  price      integer total of minor units (90000 = 900.00)              │
//! │                                                                         │
//! │  Decoding re-runs every field rule: the server is not trusted to hold  │
//! │  the domain invariants, so a fetched record that violates one is a     │
//! │  contract error naming the offending field.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use fleamarket_core::{
    Brand, Category, Condition, Description, Item, Name, Price, RemoteId,
};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Item Record (incoming)
// =============================================================================

/// One listing as the remote store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Identifier assigned by the remote store.
    pub id: RemoteId,
    pub name: String,
    pub description: String,
    /// Condition as the wire integer code.
    pub condition: i64,
    pub brand: String,
    /// Price as an integer total of minor units.
    pub price: i64,
    pub category: String,
}

impl ItemRecord {
    /// Decodes the record into a validated domain item plus its remote id.
    ///
    /// Every field goes back through its value-type rule; any violation is a
    /// [`ClientError::Contract`] naming the field, and no partial item
    /// escapes.
    pub fn decode(&self) -> ClientResult<(RemoteId, Item)> {
        fn contract<T>(field: &str, result: Result<T, impl std::fmt::Display>) -> ClientResult<T> {
            result.map_err(|err| ClientError::Contract(format!("{field}: {err}")))
        }

        let name = contract("name", Name::parse(&self.name))?;
        let description = contract("description", Description::parse(&self.description))?;
        let condition = contract("condition", Condition::from_code(self.condition))?;
        let brand = contract("brand", Brand::parse(&self.brand))?;
        let price = contract("price", Price::new(self.price / 100, self.price % 100))?;
        let category = contract("category", Category::parse(&self.category))?;

        Ok((
            self.id,
            Item::new(name, description, condition, brand, price, category),
        ))
    }
}

// =============================================================================
// Item Fields (outgoing)
// =============================================================================

/// The mutation body for create and update calls: the same fields as
/// [`ItemRecord`] minus the remote-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub condition: i64,
    pub brand: String,
    pub price: i64,
    pub category: String,
}

impl ItemFields {
    /// Encodes a domain item for transmission.
    pub fn from_item(item: &Item) -> Self {
        ItemFields {
            name: item.name.to_string(),
            description: item.description.to_string(),
            condition: i64::from(item.condition.code()),
            brand: item.brand.to_string(),
            price: item.price.total_cents(),
            category: item.category.to_string(),
        }
    }
}

// =============================================================================
// Auth Payloads
// =============================================================================

/// Body of a successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// The opaque session key the remote store expects back in the
    /// `Authorization: Token <key>` header.
    pub key: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fleamarket_core::Condition;

    fn record() -> ItemRecord {
        ItemRecord {
            id: 6,
            name: "davide".to_string(),
            description: "".to_string(),
            condition: 0,
            brand: "nike".to_string(),
            price: 200,
            category: "ciccio".to_string(),
        }
    }

    #[test]
    fn test_decode_valid_record() {
        let (id, item) = record().decode().unwrap();
        assert_eq!(id, 6);
        assert_eq!(item.name.as_str(), "davide");
        assert_eq!(item.condition, Condition::AsNew);
        assert_eq!(item.price.units(), 2);
        assert_eq!(item.price.cents(), 0);
    }

    #[test]
    fn test_decode_splits_price_into_units_and_cents() {
        let mut fetched = record();
        fetched.price = 90_000;
        let (_, item) = fetched.decode().unwrap();
        assert_eq!(item.price.units(), 900);
        assert_eq!(item.price.cents(), 0);

        fetched.price = 65_030;
        let (_, item) = fetched.decode().unwrap();
        assert_eq!(item.price.units(), 650);
        assert_eq!(item.price.cents(), 30);
    }

    #[test]
    fn test_decode_rejects_invalid_fields() {
        let mut bad = record();
        bad.condition = 9;
        let err = bad.decode().unwrap_err();
        assert!(matches!(err, ClientError::Contract(ref reason) if reason.starts_with("condition")));

        let mut bad = record();
        bad.name = "<script>".to_string();
        assert!(matches!(bad.decode().unwrap_err(), ClientError::Contract(_)));

        let mut bad = record();
        bad.price = -1;
        assert!(matches!(bad.decode().unwrap_err(), ClientError::Contract(_)));
    }

    #[test]
    fn test_encode_round_trips_through_decode() {
        let (_, item) = record().decode().unwrap();
        let fields = ItemFields::from_item(&item);
        assert_eq!(fields.name, "davide");
        assert_eq!(fields.condition, 0);
        assert_eq!(fields.price, 200);

        let echoed = ItemRecord {
            id: 42,
            name: fields.name.clone(),
            description: fields.description.clone(),
            condition: fields.condition,
            brand: fields.brand.clone(),
            price: fields.price,
            category: fields.category.clone(),
        };
        let (id, decoded) = echoed.decode().unwrap();
        assert_eq!(id, 42);
        assert_eq!(decoded, item);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::json!({
            "id": 6,
            "name": "davide",
            "description": ".",
            "condition": 0,
            "brand": "nike",
            "price": 200,
            "category": "ciccio"
        });
        let parsed: ItemRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.id, 6);
        assert_eq!(parsed.brand, "nike");
    }
}
