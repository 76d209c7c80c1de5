//! Password Hashing and Verification
//!
//! - Argon2id hashing with a per-install [`WorkFactor`]
//! - PHC-formatted output, so salt and parameters travel with the hash
//! - Zeroization of clear text, including peppered copies
//! - Configurable admission policy ([`PasswordPolicy`])
//!
//! Verification never fails loudly: a malformed stored hash simply does not
//! match.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Errors
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error("Invalid work factor: {0}")]
    InvalidWorkFactor(String),
}

// ============================================================================
// Policy
// ============================================================================

/// Rules a new password must satisfy before it is hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in Unicode code points
    pub min_length: usize,
    /// Maximum length in Unicode code points
    pub max_length: usize,
    /// Reject keyboard walks, digit runs and well-known passwords
    pub reject_common_patterns: bool,
}

impl Default for PasswordPolicy {
    /// Accepts any non-blank password; `nist()` is opt-in
    fn default() -> Self {
        Self::permissive()
    }
}

impl PasswordPolicy {
    /// NIST SP 800-63B: at least 8 characters, permit at least 64
    pub fn nist() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            reject_common_patterns: true,
        }
    }

    /// Anything non-blank up to the maximum length
    pub fn permissive() -> Self {
        Self {
            min_length: 1,
            max_length: 128,
            reject_common_patterns: false,
        }
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`, and `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new password, validated against `policy`
    ///
    /// Unicode is NFKC-normalized before validation and hashing.
    pub fn new(raw: String, policy: &PasswordPolicy) -> Result<Self, PasswordPolicyError> {
        let password = Self::unvalidated(raw);
        let normalized = password.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < policy.min_length {
            return Err(PasswordPolicyError::TooShort {
                min: policy.min_length,
                actual: char_count,
            });
        }
        if char_count > policy.max_length {
            return Err(PasswordPolicyError::TooLong {
                max: policy.max_length,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if policy.reject_common_patterns && is_common_pattern(normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(password)
    }

    /// Normalize without policy checks
    ///
    /// Used for login attempts, where a policy error would tell the caller
    /// something about the stored password.
    pub fn unvalidated(raw: String) -> Self {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Work factor
// ============================================================================

/// Argon2id cost parameters
///
/// Higher values trade login latency for brute-force resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkFactor {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for WorkFactor {
    /// OWASP recommendation: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl WorkFactor {
    /// Create a validated work factor
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordHashError> {
        let work_factor = Self {
            memory_kib,
            iterations,
            parallelism,
        };
        work_factor.params()?;
        Ok(work_factor)
    }

    fn params(&self) -> Result<Params, PasswordHashError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidWorkFactor(e.to_string()))
    }

    fn matches(&self, params: &Params) -> bool {
        params.m_cost() == self.memory_kib
            && params.t_cost() == self.iterations
            && params.p_cost() == self.parallelism
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id hasher bound to one install's work factor and pepper
#[derive(Clone)]
pub struct PasswordHasher {
    work_factor: WorkFactor,
    pepper: Option<Zeroizing<Vec<u8>>>,
}

impl PasswordHasher {
    pub fn new(work_factor: WorkFactor, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        work_factor.params()?;
        Ok(Self {
            work_factor,
            pepper: pepper.map(Zeroizing::new),
        })
    }

    pub fn work_factor(&self) -> WorkFactor {
        self.work_factor
    }

    /// Hash with a fresh 128-bit salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let input = self.peppered(password);
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.work_factor.params()?);

        let hash = argon2
            .hash_password(&input, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash
    ///
    /// Parameters are read from the hash itself, so hashes made under an
    /// older work factor still verify. Comparison is constant-time.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return false;
        };
        let input = self.peppered(password);

        Argon2::default().verify_password(&input, &parsed).is_ok()
    }

    /// True when the stored hash was not made with this hasher's settings
    pub fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return true;
        };

        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        match Params::try_from(&parsed) {
            Ok(params) => !self.work_factor.matches(&params),
            Err(_) => true,
        }
    }

    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut combined = Zeroizing::new(password.as_bytes().to_vec());
        if let Some(pepper) = &self.pepper {
            combined.extend_from_slice(pepper);
        }
        combined
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("work_factor", &self.work_factor)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "abcdefgh",
        "letmein",
        "welcome",
        "admin123",
        "iloveyou",
        "sunshine",
        "football",
        "baseball",
        "trustno1",
    ];

    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// A password made only of an ascending or descending digit run
fn is_sequential_numbers(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 4 || digits.len() != s.chars().count() {
        return false;
    }

    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);

    ascending || descending
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher(pepper: Option<&[u8]>) -> PasswordHasher {
        let work_factor = WorkFactor::new(64, 1, 1).unwrap();
        PasswordHasher::new(work_factor, pepper.map(<[u8]>::to_vec)).unwrap()
    }

    fn clear(raw: &str) -> ClearTextPassword {
        ClearTextPassword::unvalidated(raw.to_string())
    }

    #[test]
    fn test_policy_too_short() {
        let result = ClearTextPassword::new("short".to_string(), &PasswordPolicy::nist());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })));
    }

    #[test]
    fn test_policy_too_long() {
        let long_password = "ab".repeat(65);
        let result = ClearTextPassword::new(long_password, &PasswordPolicy::nist());
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_policy_whitespace_only() {
        for raw in ["", "        "] {
            let result = ClearTextPassword::new(raw.to_string(), &PasswordPolicy::permissive());
            assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
        }
    }

    #[test]
    fn test_policy_control_character() {
        let result = ClearTextPassword::new("abc\u{0007}defgh".to_string(), &PasswordPolicy::nist());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_policy_common_patterns() {
        let policy = PasswordPolicy::nist();
        for raw in ["password123", "qwertyuiop", "12345678", "98765432", "zzzzzzzz"] {
            let result = ClearTextPassword::new(raw.to_string(), &policy);
            assert!(
                matches!(result, Err(PasswordPolicyError::CommonPattern)),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_permissive_policy_accepts_short() {
        assert!(ClearTextPassword::new("pw1".to_string(), &PasswordPolicy::permissive()).is_ok());
    }

    #[test]
    fn test_default_policy_is_permissive() {
        assert_eq!(PasswordPolicy::default(), PasswordPolicy::permissive());
        assert!(ClearTextPassword::new("pw1".to_string(), &PasswordPolicy::default()).is_ok());
    }

    #[test]
    fn test_valid_password() {
        assert!(ClearTextPassword::new("MySecure#Pass2024!".to_string(), &PasswordPolicy::nist()).is_ok());
        assert!(ClearTextPassword::new("パスワード安全です!".to_string(), &PasswordPolicy::nist()).is_ok());
    }

    #[test]
    fn test_nfkc_normalization() {
        let hasher = fast_hasher(None);
        // Fullwidth "ＡＢＣ" normalizes to "ABC"
        let hashed = hasher.hash(&clear("ＡＢＣpass")).unwrap();
        assert!(hasher.verify(&clear("ABCpass"), &hashed));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher(None);
        let hashed = hasher.hash(&clear("TestPassword123!")).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hasher.verify(&clear("TestPassword123!"), &hashed));
        assert!(!hasher.verify(&clear("WrongPassword123!"), &hashed));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = fast_hasher(None);
        let a = hasher.hash(&clear("same")).unwrap();
        let b = hasher.hash(&clear("same")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = fast_hasher(Some(b"pepper".as_slice()));
        let hashed = peppered.hash(&clear("TestPassword123!")).unwrap();

        assert!(peppered.verify(&clear("TestPassword123!"), &hashed));
        assert!(!fast_hasher(None).verify(&clear("TestPassword123!"), &hashed));
        assert!(!fast_hasher(Some(b"other".as_slice())).verify(&clear("TestPassword123!"), &hashed));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = fast_hasher(None);
        let bogus = HashedPassword {
            hash: "not_a_valid_hash".to_string(),
        };
        assert!(!hasher.verify(&clear("anything"), &bogus));
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = fast_hasher(None);
        let hashed = hasher.hash(&clear("TestPassword123!")).unwrap();
        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&clear("TestPassword123!"), &restored));
    }

    #[test]
    fn test_verify_across_work_factors() {
        let old = fast_hasher(None);
        let hashed = old.hash(&clear("carry-over")).unwrap();

        let new = PasswordHasher::new(WorkFactor::new(128, 2, 1).unwrap(), None).unwrap();
        assert!(new.verify(&clear("carry-over"), &hashed));
        assert!(new.needs_rehash(&hashed));
        assert!(!old.needs_rehash(&hashed));
    }

    #[test]
    fn test_invalid_work_factor() {
        assert!(matches!(
            WorkFactor::new(1, 1, 1),
            Err(PasswordHashError::InvalidWorkFactor(_))
        ));
        assert!(WorkFactor::new(64, 0, 1).is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", clear("secret"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hasher_debug = format!("{:?}", fast_hasher(Some(b"pepper-value".as_slice())));
        assert!(!hasher_debug.contains("pepper-value"));
    }
}
