//! Inventory item record and its price type.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Largest number of digits a price may carry (including the two decimals).
pub const PRICE_MAX_DIGITS: usize = 10;

/// Number of decimal places a price is stored with.
pub const PRICE_DECIMAL_PLACES: usize = 2;

// == Inventory Item ==
/// A stored inventory item, as kept by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub quantity: u64,
    pub price: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Serialized representation handed to clients and kept in the item cache.
    pub fn to_representation(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

// == Price ==
/// Non-negative fixed-point amount with two decimal places.
///
/// Serialized as a decimal string (`"9.99"`) so no precision is lost in
/// transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    cents: u64,
}

impl Price {
    /// Creates a price from an amount in cents.
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Amount in cents.
    pub const fn cents(&self) -> u64 {
        self.cents
    }

    /// Parses a decimal literal such as `"9.99"`, `"10"` or `"0.5"`.
    ///
    /// Returns the validation message to show the client on failure.
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        if input.starts_with('-') {
            return Err("Ensure this value is greater than or equal to 0.".to_string());
        }

        let (whole, frac) = match input.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (input, ""),
        };
        let whole = if whole.is_empty() && !frac.is_empty() {
            "0"
        } else {
            whole
        };

        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(frac) {
            return Err("A valid number is required.".to_string());
        }
        if frac.len() > PRICE_DECIMAL_PLACES {
            return Err(format!(
                "Ensure that there are no more than {} decimal places.",
                PRICE_DECIMAL_PLACES
            ));
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
            return Err(format!(
                "Ensure that there are no more than {} digits in total.",
                PRICE_MAX_DIGITS
            ));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| "A valid number is required.".to_string())?
        };
        let frac: u64 = format!("{:0<width$}", frac, width = PRICE_DECIMAL_PLACES)
            .parse()
            .map_err(|_| "A valid number is required.".to_string())?;

        Ok(Self::from_cents(whole * 100 + frac))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parse_and_display() {
        assert_eq!(Price::parse("9.99").unwrap().to_string(), "9.99");
        assert_eq!(Price::parse("10").unwrap().to_string(), "10.00");
        assert_eq!(Price::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Price::parse(".75").unwrap().cents(), 75);
        assert_eq!(Price::parse("007.10").unwrap().cents(), 710);
    }

    #[test]
    fn test_price_rejects_bad_input() {
        assert!(Price::parse("-1").is_err());
        assert!(Price::parse("abc").is_err());
        assert!(Price::parse("1.234").is_err());
        assert!(Price::parse("").is_err());
        assert!(Price::parse("1e3").is_err());
    }

    #[test]
    fn test_price_digit_limit() {
        assert!(Price::parse("99999999.99").is_ok());
        assert!(Price::parse("100000000").is_err());
    }

    #[test]
    fn test_item_representation() {
        let now = Utc::now();
        let item = InventoryItem {
            id: 1,
            name: "Test Item".to_string(),
            description: "This is a test item".to_string(),
            quantity: 10,
            price: Price::from_cents(999),
            created_at: now,
            updated_at: now,
        };

        let value = item.to_representation().unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Test Item");
        assert_eq!(value["quantity"], 10);
        assert_eq!(value["price"], "9.99");
        assert!(value["created_at"].is_string());
    }
}
