//! User Password Value Objects
//!
//! Domain wrappers around `platform::password`. [`RawPassword`] is user
//! input (zeroized on drop); [`UserPassword`] is the stored Argon2id hash.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicy, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Admit a new password under `policy` (registration, password change)
    pub fn new(raw: String, policy: &PasswordPolicy) -> AppResult<Self> {
        ClearTextPassword::new(raw, policy)
            .map(Self)
            .map_err(policy_error_to_app_error)
    }

    /// Wrap a login attempt without policy checks
    ///
    /// Passwords admitted under an older policy must still be able to log in.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::unvalidated(raw))
    }

    pub fn as_clear_text(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

fn policy_error_to_app_error(err: PasswordPolicyError) -> AppError {
    let action = match err {
        PasswordPolicyError::TooShort { .. } => "Please choose a longer password",
        PasswordPolicyError::TooLong { .. } => "Please choose a shorter password",
        PasswordPolicyError::EmptyOrWhitespace => "Please enter a password",
        PasswordPolicyError::InvalidCharacter => "Please remove control characters",
        PasswordPolicyError::CommonPattern => "Please choose a less predictable password",
    };
    AppError::bad_request(err.to_string()).with_action(action)
}

// ============================================================================
// User Password (Stored Hash)
// ============================================================================

/// Stored password hash (PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_hashed(hashed: HashedPassword) -> Self {
        Self(hashed)
    }

    /// Load from a stored PHC string
    pub fn from_db(phc: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e: PasswordHashError| {
                AppError::internal("Stored password hash is unreadable").with_source(e)
            })
    }

    pub fn as_hashed(&self) -> &HashedPassword {
        &self.0
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}
