//! Alias generation and validation utilities.
//!
//! Provides cryptographically secure random alias generation and validation
//! for caller-chosen aliases.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Longest alias a caller may choose.
pub const MAX_ALIAS_LENGTH: usize = 30;

/// Aliases reserved for system endpoints to prevent routing conflicts.
const RESERVED_ALIASES: &[&str] = &["api", "health"];

/// Generates a cryptographically secure random alias of `length` characters.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, truncated to the requested length. Every character is
/// drawn from `[A-Za-z0-9_-]`.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_alias(length: usize) -> String {
    // 3 random bytes per 4 base64 characters, rounded up.
    let mut buffer = vec![0u8; length.div_ceil(4) * 3];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut alias = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    alias.truncate(length);
    alias
}

/// Validates a caller-chosen alias.
///
/// # Rules
///
/// - Length: 1-30 characters
/// - Allowed characters: letters, digits, hyphens, underscores
/// - Cannot be a reserved system path
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            "Alias must be 1-30 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, hyphens, and underscores",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
