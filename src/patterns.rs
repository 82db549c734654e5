use lazy_static::lazy_static;
use regex::Regex;

/// Date placeholder for cards whose date could not be read.
pub const UNKNOWN_DATE: &str = "Unknown";

lazy_static! {
    // Currency marker followed by the leading numeric run: "₹1,299", "Rs. 45"
    pub static ref PRICE: Regex = Regex::new(r"(?:₹|Rs\.?)\s?([0-9][0-9,]*)").unwrap();

    // "₹123 • 08 Feb" on a single line
    pub static ref PRICE_THEN_DAY_MONTH: Regex =
        Regex::new(r"₹\s?([0-9,]+).*?(\d{1,2}\s[A-Z][a-z]{2})").unwrap();

    pub static ref PLACED_AT: Regex = Regex::new(r"Placed at\s(.+)").unwrap();

    pub static ref TOTAL_PAID: Regex =
        Regex::new(r"Total Paid:?\s*(?:₹|Rs\.?)\s?([0-9][0-9,]*)").unwrap();

    // "Delivered on Sun, Jan 21, 2026, 08:45 PM" -> "Jan 21, 2026"
    pub static ref DELIVERED_ON: Regex =
        Regex::new(r"Delivered on\s+(?:[A-Za-z]{3},\s*)?([A-Z][a-z]{2} \d{1,2}, \d{4})").unwrap();
}

/// Parse a captured price run, dropping thousands separators.
/// Anything unparseable reads as zero, which extractors filter out.
pub fn parse_price(raw: &str) -> u64 {
    raw.replace(',', "").trim().parse().unwrap_or(0)
}

/// First currency-prefixed amount in `text`.
pub fn first_price(text: &str) -> Option<u64> {
    PRICE.captures(text).map(|c| parse_price(&c[1]))
}

/// Case-sensitive count of non-overlapping occurrences.
pub fn count_marker(text: &str, marker: &str) -> usize {
    text.matches(marker).count()
}

/// True if any of `terms` appears in `value` (case-insensitive).
pub fn is_noise(value: &str, terms: &[&str]) -> bool {
    let value = value.to_lowercase();
    terms.iter().any(|t| value.contains(t))
}

/// Strip digits and keep the first two words, so "Amul Taaza Milk 500 ml"
/// and "Amul Taaza 1L" land on the same name.
pub fn short_name(raw: &str) -> String {
    let no_digits: String = raw.chars().filter(|c| !c.is_ascii_digit()).collect();
    no_digits.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}
