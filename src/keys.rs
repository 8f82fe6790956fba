//! Cache Key Construction
//!
//! Deterministic key builders for the common lookup shapes, plus amount
//! validation for currency requests. Equivalent requests must collide and
//! distinct requests must never collide, so keys are pure functions of the
//! normalized request.

/// Symbols stripped from user-supplied currency fields.
pub const CURRENCY_SYMBOLS: &str = "$¢€£¥₹฿₽₩₺₴₦₲₡₱₮₭₪₸₫₵₢₯₠₣₧₤₥₰₶₾";

// == Translation Keys ==
/// Builds the cache key for a translation request.
///
/// The text is trimmed and the language codes lowercased so equivalent
/// requests share one entry.
pub fn translation_key(text: &str, target: &str, source: &str) -> String {
    format!(
        "{}->{}:{}",
        source.trim().to_lowercase(),
        target.trim().to_lowercase(),
        text.trim()
    )
}

// == Currency Keys ==
/// Builds the cache key for a currency-rate request.
///
/// Codes are uppercased; the amount is deliberately not part of the key, as
/// the cached value is the rate table for the pair.
pub fn currency_key(base: &str, target: &str) -> String {
    format!(
        "{}->{}",
        base.trim().to_uppercase(),
        target.trim().to_uppercase()
    )
}

// == Amount Validation ==
/// Parses a user-supplied monetary amount.
///
/// Leading/trailing currency symbols and whitespace are stripped, then the
/// remainder must be a well-formed finite non-negative decimal. Returns None
/// for anything else.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw
        .trim()
        .trim_matches(|c: char| CURRENCY_SYMBOLS.contains(c) || c.is_whitespace());

    if cleaned.is_empty() {
        return None;
    }

    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Some(amount),
        _ => None,
    }
}
