//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

pub use platform::cookie::{CookieConfig, SameSite};
pub use platform::password::{PasswordPolicy, WorkFactor};

/// Length of generated session secrets in bytes
pub const SESSION_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie attributes
    pub cookie: CookieConfig,
    /// HMAC key for session tokens; must be non-empty
    pub session_secret: Vec<u8>,
    /// Token lifetime; `None` issues tokens without expiry
    pub token_ttl: Option<Duration>,
    /// Argon2id cost for new hashes
    pub work_factor: WorkFactor,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Rules for newly chosen passwords; permissive unless opted into `nist()`
    pub password_policy: PasswordPolicy,
}

impl Default for AuthConfig {
    /// No session secret: token service construction fails until one is set
    fn default() -> Self {
        Self {
            cookie: CookieConfig::default(),
            session_secret: Vec::new(),
            token_ttl: None,
            work_factor: WorkFactor::default(),
            password_pepper: None,
            password_policy: PasswordPolicy::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret
    ///
    /// Sessions do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_bytes(SESSION_SECRET_LEN),
            ..Default::default()
        }
    }

    /// Create config for local development over plain HTTP
    ///
    /// Browsers drop `SameSite=None` cookies without `Secure`, so this
    /// falls back to `Lax`.
    pub fn development() -> Self {
        let mut config = Self::with_random_secret();
        config.cookie.secure = false;
        config.cookie.same_site = SameSite::Lax;
        config
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("cookie", &self.cookie)
            .field("session_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("work_factor", &self.work_factor)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("password_policy", &self.password_policy)
            .finish()
    }
}
