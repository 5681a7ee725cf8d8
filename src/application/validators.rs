use serde::de::DeserializeOwned;
use validator::ValidateEmail;

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Canonical form used for storage and duplicate detection.
/// Addresses are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Parses an age submitted either as a JSON integer or as a numeric string
/// (HTML number inputs post strings). Only positive values are accepted.
pub fn parse_age(value: &serde_json::Value) -> Option<i32> {
    let age = match value {
        serde_json::Value::Number(n) => n.as_i64()?,
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };

    if age <= 0 {
        return None;
    }
    i32::try_from(age).ok()
}

/// Returns the trimmed value, or `None` when it is absent or blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Reads an answer bundle from the submitted form value. Anything other than
/// a JSON object with string fields reads as an empty bundle.
pub fn parse_answers<T: DeserializeOwned + Default>(value: Option<serde_json::Value>) -> T {
    match value {
        Some(value @ serde_json::Value::Object(_)) => {
            serde_json::from_value(value).unwrap_or_default()
        }
        _ => T::default(),
    }
}
