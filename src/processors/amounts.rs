//! Monetary amount detection and parsing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a monetary amount: optional sign, 1-3 leading digits, optional
/// thousands groups separated by comma or space, optional 1-2 digit fraction.
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-+]?\d{1,3}(?:[,\s]\d{3})*(?:\.\d{1,2})?").expect("amount pattern")
});

/// Returns true when the cell text contains an amount-shaped substring.
pub fn contains_amount(cell: &str) -> bool {
    AMOUNT_RE.is_match(cell)
}

/// Parses an amount string into a float.
///
/// Thousands separators (commas and spaces) are stripped before conversion.
/// When direct conversion fails (the cell carries surrounding text), the last
/// amount-shaped match inside the stripped string is parsed instead.
pub fn clean_amount_str(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    let stripped = s.replace([',', ' '], "");
    let stripped = stripped.trim();
    if let Ok(value) = stripped.parse::<f64>() {
        return Some(value);
    }
    AMOUNT_RE
        .find_iter(stripped)
        .last()
        .and_then(|m| m.as_str().replace([',', ' '], "").parse::<f64>().ok())
}

/// Rounds to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_plain_and_grouped_amounts() {
        assert!(contains_amount("300.00"));
        assert!(contains_amount("8,250.00"));
        assert!(contains_amount("Rs 1 200"));
        assert!(contains_amount("-45.5"));
        assert!(!contains_amount("Subtotal"));
        assert!(!contains_amount(""));
    }

    #[test]
    fn test_clean_parses_separated_amounts() {
        assert_eq!(clean_amount_str("8,250.00"), Some(8250.0));
        assert_eq!(clean_amount_str("1 200"), Some(1200.0));
        assert_eq!(clean_amount_str(" 300.00 "), Some(300.0));
        assert_eq!(clean_amount_str("+42"), Some(42.0));
    }

    #[test]
    fn test_clean_falls_back_to_last_embedded_match() {
        assert_eq!(clean_amount_str("Qty 2 @ 150.00"), Some(150.0));
        assert_eq!(clean_amount_str("INR500.00"), Some(500.0));
    }

    #[test]
    fn test_clean_rejects_non_numeric_text() {
        assert_eq!(clean_amount_str("Description"), None);
        assert_eq!(clean_amount_str(""), None);
    }

    #[test]
    fn test_round2_is_idempotent() {
        let values = [0.0, 1.005, -3.14159, 8250.004, 99.999];
        for v in values {
            let once = round2(v);
            assert_eq!(once, round2(once));
        }
    }

    #[test]
    fn test_round2_two_decimals() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(8250.004), 8250.0);
        assert_eq!(round2(500.0), 500.0);
    }
}
