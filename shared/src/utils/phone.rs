//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Local or international number: optional leading '+', then 10 to 15 digits
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?\d{10,15}$").expect("phone regex is valid")
});

/// Normalize a phone number by removing common formatting characters
///
/// A `+` is kept only in leading position.
pub fn normalize_phone_number(phone: &str) -> String {
    let trimmed = phone.trim();
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if trimmed.starts_with('+') {
        format!("+{}", digits)
    } else {
        digits
    }
}

/// Check if a phone number has an acceptable shape (10 to 15 digits)
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Convert a phone number to E.164 form
///
/// Numbers already carrying a `+` keep their country code. Local numbers with
/// a leading trunk `0` are assumed to be Israeli (`+972`).
pub fn to_e164(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.starts_with('+') {
        normalized
    } else if let Some(national) = normalized.strip_prefix('0') {
        format!("+972{}", national)
    } else {
        format!("+{}", normalized)
    }
}

/// Mask a phone number for logs and display (e.g., 050****4567)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
