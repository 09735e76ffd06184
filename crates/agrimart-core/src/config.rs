//! # Query Configuration
//!
//! Runtime-tunable values for the query engine. Loaded by the app layer
//! (from `[pricing]` in `agrimart.toml`); every field has a default, so an
//! empty table is valid.

use crate::MarketError;
use crate::primitives::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_PRICE_CEILING, DEFAULT_PRICE_FLOOR};
use serde::{Deserialize, Serialize};

/// Maximum length of the currency symbol, in bytes.
const MAX_CURRENCY_SYMBOL_LENGTH: usize = 8;

/// Absolute price bounds and label formatting for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Lowest value the price filter may take.
    pub price_floor: u64,
    /// Highest value the price filter may take.
    pub price_ceiling: u64,
    /// Prefix used for prices in active-filter labels.
    pub currency_symbol: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            price_floor: DEFAULT_PRICE_FLOOR,
            price_ceiling: DEFAULT_PRICE_CEILING,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl QueryConfig {
    /// Create a config with custom price bounds and the default symbol.
    #[must_use]
    pub fn with_price_bounds(floor: u64, ceiling: u64) -> Self {
        Self {
            price_floor: floor,
            price_ceiling: ceiling,
            ..Self::default()
        }
    }

    /// Reject configurations the query engine cannot honor.
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.price_floor > self.price_ceiling {
            return Err(MarketError::ConfigError(format!(
                "price_floor {} is greater than price_ceiling {}",
                self.price_floor, self.price_ceiling
            )));
        }
        if self.currency_symbol.len() > MAX_CURRENCY_SYMBOL_LENGTH {
            return Err(MarketError::ConfigError(format!(
                "currency_symbol length {} exceeds maximum {} bytes",
                self.currency_symbol.len(),
                MAX_CURRENCY_SYMBOL_LENGTH
            )));
        }
        Ok(())
    }

    /// Bounds as an ordered `(floor, ceiling)` pair.
    ///
    /// A config that failed validation still yields a usable pair: the
    /// two ends are swapped.
    #[must_use]
    pub fn bounds(&self) -> (u64, u64) {
        if self.price_floor <= self.price_ceiling {
            (self.price_floor, self.price_ceiling)
        } else {
            (self.price_ceiling, self.price_floor)
        }
    }
}
