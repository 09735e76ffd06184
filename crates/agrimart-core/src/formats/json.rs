//! # JSON Catalog Format
//!
//! A catalog is stored as a JSON array of items with snake_case fields:
//!
//! ```json
//! [
//!   {
//!     "id": "1",
//!     "name": "Organic Tomatoes",
//!     "category": "Vegetables",
//!     "price": 45,
//!     "quantity_available": 50,
//!     "location_tag": "Maharashtra",
//!     "seller_name": "Ramesh Kumar",
//!     "seller_rating": 48,
//!     "is_organic": true,
//!     "created_order": 1
//!   }
//! ]
//! ```
//!
//! `seller_rating` is integer tenths; a decimal star value such as `4.8`
//! is read as the same rating.
//!
//! Size is checked before parsing, and every decoded item passes through
//! [`Catalog::from_items`] validation.

use crate::primitives::MAX_CATALOG_PAYLOAD_SIZE;
use crate::{Catalog, CatalogItem, MarketError};

/// Decode a catalog from JSON bytes.
///
/// This is a pure transformation - no file I/O.
pub fn catalog_from_json(bytes: &[u8]) -> Result<Catalog, MarketError> {
    if bytes.len() > MAX_CATALOG_PAYLOAD_SIZE {
        return Err(MarketError::SerializationError(format!(
            "Catalog size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_CATALOG_PAYLOAD_SIZE
        )));
    }

    let items: Vec<CatalogItem> = serde_json::from_slice(bytes).map_err(|e| {
        MarketError::SerializationError(format!("Failed to parse catalog JSON: {}", e))
    })?;

    Catalog::from_items(items)
}

/// Encode a catalog as pretty-printed JSON.
pub fn catalog_to_json(catalog: &Catalog) -> Result<Vec<u8>, MarketError> {
    serde_json::to_vec_pretty(catalog.items())
        .map_err(|e| MarketError::SerializationError(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ITEMS: &str = r#"[
        {"id": "1", "name": "Organic Tomatoes", "category": "Vegetables", "price": 45,
         "quantity_available": 50, "location_tag": "Maharashtra", "seller_name": "Ramesh Kumar",
         "seller_rating": 48, "is_organic": true, "created_order": 1},
        {"id": "2", "name": "Fresh Onions", "category": "Vegetables", "price": 30,
         "quantity_available": 0, "location_tag": "Karnataka", "seller_name": "Suresh Patil",
         "seller_rating": 45, "created_order": 2, "tags": ["bulk"]}
    ]"#;

    #[test]
    fn decodes_valid_catalog() {
        let catalog = catalog_from_json(TWO_ITEMS.as_bytes()).expect("decode");
        assert_eq!(catalog.len(), 2);
        assert!(catalog.items()[0].is_organic);
        assert_eq!(catalog.items()[1].tags, vec!["bulk".to_string()]);
    }

    #[test]
    fn encode_then_decode_preserves_items() {
        let catalog = catalog_from_json(TWO_ITEMS.as_bytes()).expect("decode");
        let bytes = catalog_to_json(&catalog).expect("encode");
        let restored = catalog_from_json(&bytes).expect("decode again");
        assert_eq!(catalog, restored);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let result = catalog_from_json(b"[{\"id\": ");
        assert!(matches!(result, Err(MarketError::SerializationError(_))));
    }

    #[test]
    fn validation_errors_surface() {
        let json = r#"[
            {"id": "1", "name": "A", "category": "Fruits", "price": 1, "quantity_available": 1,
             "location_tag": "", "seller_name": "", "seller_rating": 10, "created_order": 1},
            {"id": "1", "name": "B", "category": "Fruits", "price": 1, "quantity_available": 1,
             "location_tag": "", "seller_name": "", "seller_rating": 10, "created_order": 2}
        ]"#;
        let result = catalog_from_json(json.as_bytes());
        assert!(matches!(result, Err(MarketError::DuplicateItemId(_))));
    }

    #[test]
    fn decimal_star_ratings_decode_as_tenths() {
        let json = TWO_ITEMS.replace("\"seller_rating\": 48", "\"seller_rating\": 4.8");
        let catalog = catalog_from_json(json.as_bytes()).expect("decode");
        assert_eq!(catalog.items()[0].seller_rating.tenths(), 48);

        let too_precise = TWO_ITEMS.replace("\"seller_rating\": 48", "\"seller_rating\": 4.85");
        let result = catalog_from_json(too_precise.as_bytes());
        assert!(matches!(result, Err(MarketError::SerializationError(_))));
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        let catalog = catalog_from_json(b"[]").expect("decode");
        assert!(catalog.is_empty());
    }
}
