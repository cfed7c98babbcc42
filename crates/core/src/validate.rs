//! Admission validation for keys and values.
//!
//! Validation happens before any mutation touches the store; a record
//! that made it in always satisfies these rules. Lengths are counted in
//! Unicode scalar values, not bytes.

use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// Validate a key against the configured rules.
///
/// A key must be non-empty, at most `max_key_length` characters, and
/// already trimmed (no leading or trailing whitespace).
pub fn validate_key(key: &str, config: &StoreConfig) -> Result<()> {
    if key.is_empty() {
        return Err(invalid_key(key, "empty"));
    }
    if key.trim() != key {
        return Err(invalid_key(key, "leading or trailing whitespace"));
    }
    let chars = key.chars().count();
    if chars > config.max_key_length {
        return Err(invalid_key(
            key,
            format!(
                "{} characters, limit is {}",
                chars, config.max_key_length
            ),
        ));
    }
    Ok(())
}

/// Validate a value against the configured rules.
///
/// A value must be non-empty and at most `max_value_length` characters.
pub fn validate_value(value: &str, config: &StoreConfig) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidValue {
            reason: "empty".to_string(),
        });
    }
    let chars = value.chars().count();
    if chars > config.max_value_length {
        return Err(Error::InvalidValue {
            reason: format!(
                "{} characters, limit is {}",
                chars, config.max_value_length
            ),
        });
    }
    Ok(())
}

fn invalid_key(key: &str, reason: impl Into<String>) -> Error {
    Error::InvalidKey {
        key: key.to_string(),
        reason: reason.into(),
    }
}
