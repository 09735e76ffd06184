//! # Query Primitives
//!
//! Hardcoded defaults and limits for the Agrimart query engine.
//!
//! The configurable values (price bounds, currency symbol) only provide
//! defaults here; [`crate::QueryConfig`] can override them at runtime.
//! The limits are fixed and guard against oversized input.

/// Lower absolute bound for the price filter.
pub const DEFAULT_PRICE_FLOOR: u64 = 0;

/// Upper absolute bound for the price filter.
///
/// Also the default upper end of the price range, so a fresh query
/// admits every item priced within the slider's reach.
pub const DEFAULT_PRICE_CEILING: u64 = 1000;

/// Currency symbol used in price labels.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Highest valid seller rating, in tenths of a star (5.0).
pub const MAX_RATING_TENTHS: u8 = 50;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of characters kept from a search string.
///
/// Longer input is truncated, not rejected.
pub const MAX_SEARCH_TEXT_LENGTH: usize = 256;

/// Maximum length for item names, categories, locations and seller names.
pub const MAX_FIELD_LENGTH: usize = 256;

/// Maximum number of items in a single catalog.
pub const MAX_CATALOG_ITEMS: usize = 100_000;

/// Maximum size of a serialized catalog (32 MB).
pub const MAX_CATALOG_PAYLOAD_SIZE: usize = 32 * 1024 * 1024;
