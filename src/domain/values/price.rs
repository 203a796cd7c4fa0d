//! Price text normalization.
//!
//! Marketplace and spec-page scrapes hand us price-like text in many shapes:
//! "$1,299.00", "699 USD", "249", or the sentinels "N/A" / "Not Found" that
//! the spec-page scraper writes when a card never had a listed launch price.
//! Absence is a normal outcome here, never an error.

/// Sentinel strings that mean "no price recorded", checked as substrings.
const ABSENT_SENTINELS: &[&str] = &["N/A", "Not Found"];

/// Parse arbitrary price text into a non-negative dollar amount.
///
/// Keeps only digits and the decimal point, then parses. Returns `None` for
/// sentinels, empty input, digit-free input, or anything the final parse
/// rejects.
///
/// Known limitation: strings with more than one decimal point (e.g. European
/// "1.299.00") fail the parse and come back as `None`; they are not
/// disambiguated.
pub fn normalize(text: &str) -> Option<f64> {
    if text.is_empty() || ABSENT_SENTINELS.iter().any(|s| text.contains(s)) {
        return None;
    }

    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => None,
    }
}
