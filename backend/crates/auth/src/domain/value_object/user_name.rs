//! User Name Value Object
//!
//! Free-form display name shown on profiles and listings. Not used for
//! login, so it carries no uniqueness or reserved-word rules.
//!
//! ## Invariants
//! - NFKC normalized, surrounding whitespace trimmed
//! - 1 to 64 characters after normalization
//! - No control characters

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for a display name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Display name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(
                AppError::bad_request("Name cannot be empty").with_action("Please enter a name")
            );
        }

        let length = name.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters (got {})",
                USER_NAME_MAX_LENGTH, length
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains invalid characters"));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from a stored value (already normalized)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(UserName::new("Ann").unwrap().as_str(), "Ann");
        assert_eq!(UserName::new("  Ann Lee  ").unwrap().as_str(), "Ann Lee");
        assert!(UserName::new("Zoë").is_ok());
        assert!(UserName::new("山田 太郎").is_ok());
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth letters fold to ASCII
        assert_eq!(UserName::new("Ａｎｎ").unwrap().as_str(), "Ann");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new("   ").is_err());
    }

    #[test]
    fn test_rejects_too_long() {
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(UserName::new("Ann\u{0007}").is_err());
        assert!(UserName::new("A\nB").is_err());
    }
}
