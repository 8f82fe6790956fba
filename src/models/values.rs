//! Cached Value Types
//!
//! Value shapes stored by the standard caches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A completed translation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// The translated text
    pub translation: String,
    /// Source language detected by the upstream service
    pub detected_language: String,
}

/// A currency-rate table for one base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRates {
    /// Target currency code to rate
    pub rates: HashMap<String, f64>,
}

impl CurrencyRates {
    /// Converts an amount into the target currency, if the rate is known.
    pub fn convert(&self, amount: f64, target: &str) -> Option<f64> {
        self.rates
            .get(&target.trim().to_uppercase())
            .map(|rate| amount * rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_conversion() {
        let rates = CurrencyRates {
            rates: HashMap::from([("EUR".to_string(), 0.92), ("JPY".to_string(), 151.2)]),
        };

        assert_eq!(rates.convert(100.0, "eur"), Some(92.0));
        assert_eq!(rates.convert(2.0, "JPY"), Some(302.4));
        assert_eq!(rates.convert(1.0, "GBP"), None);
    }

    #[test]
    fn test_translation_roundtrip() {
        let value = Translation {
            translation: "bonjour".to_string(),
            detected_language: "en".to_string(),
        };

        let json = serde_json::to_string(&value).unwrap();
        let back: Translation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
