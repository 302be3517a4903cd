use std::fmt;

use serde::{Serialize, Serializer};

pub const PHONE_MAX_DIGITS: usize = 11;

/// Renders a digit buffer with the `+7 (DDD) DDD-DD-DD` mask.
///
/// Non-digits are ignored and at most eleven digits are used. The first digit
/// is always rendered as the `+7` country code, so only the remaining ten
/// digits fill the groups, and only as many groups as there are digits.
pub fn format_phone(input: &str) -> String {
    let digits: Vec<char> = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_MAX_DIGITS)
        .collect();
    let group = |from: usize, to: usize| -> String {
        digits[from.min(digits.len())..to.min(digits.len())]
            .iter()
            .collect()
    };

    let mut result = String::from("+7");
    if digits.len() > 1 {
        result.push_str(&format!(" ({}", group(1, 4)));
    }
    if digits.len() >= 4 {
        result.push_str(&format!(") {}", group(4, 7)));
    }
    if digits.len() >= 7 {
        result.push_str(&format!("-{}", group(7, 9)));
    }
    if digits.len() >= 9 {
        result.push_str(&format!("-{}", group(9, 11)));
    }
    result
}

/// Phone number as typed into the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    digits: String,
}

impl PhoneNumber {
    /// Re-derives the digit buffer from raw input. A buffer of one digit or
    /// less resets to `7` so the country code cannot be erased. The leading
    /// digit is always stored as the canonical `7`.
    pub fn from_input(raw: &str) -> Self {
        let mut digits = raw.chars().filter(char::is_ascii_digit).take(PHONE_MAX_DIGITS);
        if digits.next().is_none() {
            return Self::default();
        }
        let rest: String = digits.collect();
        if rest.is_empty() {
            return Self::default();
        }
        Self {
            digits: format!("7{rest}"),
        }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn formatted(&self) -> String {
        format_phone(&self.digits)
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == PHONE_MAX_DIGITS
    }
}

impl Default for PhoneNumber {
    fn default() -> Self {
        Self {
            digits: "7".to_string(),
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}

#[cfg(test)]
#[path = "tests/phone_tests.rs"]
mod tests;
