//! Server Configuration
//!
//! Everything the binary reads from the environment (or `.env`).

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::config::{PasswordPolicy, SESSION_SECRET_LEN, WorkFactor};
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";

#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            listen_addr,
            frontend_origins,
            auth: auth_config()?,
        })
    }
}

/// Auth settings
///
/// Release builds refuse to start without `AUTH_SESSION_SECRET`; debug
/// builds fall back to a per-process secret and a plain-HTTP cookie.
fn auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = match env::var("AUTH_SESSION_SECRET") {
        Ok(secret_b64) => AuthConfig {
            session_secret: decode_secret(&secret_b64)?,
            ..AuthConfig::default()
        },
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("AUTH_SESSION_SECRET not set, sessions will not survive a restart");
            AuthConfig::development()
        }
        Err(_) => bail!("AUTH_SESSION_SECRET must be set in production"),
    };

    config.token_ttl = token_ttl(optional_u64("AUTH_TOKEN_TTL_SECS")?)?;

    match env::var("PASSWORD_POLICY").as_deref() {
        Err(_) | Ok("permissive") => {}
        Ok("nist") => config.password_policy = PasswordPolicy::nist(),
        Ok(other) => bail!("PASSWORD_POLICY must be `permissive` or `nist`, got `{other}`"),
    }

    if let Ok(pepper_b64) = env::var("PASSWORD_PEPPER") {
        config.password_pepper = Some(
            general_purpose::STANDARD
                .decode(pepper_b64.trim())
                .context("PASSWORD_PEPPER must be base64")?,
        );
    }

    let memory_kib = optional_u64("PASSWORD_MEMORY_KIB")?;
    let iterations = optional_u64("PASSWORD_ITERATIONS")?;
    if memory_kib.is_some() || iterations.is_some() {
        let base = config.work_factor;
        config.work_factor = WorkFactor::new(
            narrow(memory_kib, base.memory_kib)?,
            narrow(iterations, base.iterations)?,
            base.parallelism,
        )?;
    }

    Ok(config)
}

/// Unset means tokens never expire; zero would expire them on issue
fn token_ttl(secs: Option<u64>) -> anyhow::Result<Option<Duration>> {
    match secs {
        Some(0) => bail!("AUTH_TOKEN_TTL_SECS must be greater than zero; unset it for no expiry"),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
        None => Ok(None),
    }
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<Vec<u8>> {
    let secret = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("AUTH_SESSION_SECRET must be base64")?;
    if secret.len() < SESSION_SECRET_LEN {
        bail!(
            "AUTH_SESSION_SECRET must decode to at least {} bytes",
            SESSION_SECRET_LEN
        );
    }
    Ok(secret)
}

fn optional_u64(name: &str) -> anyhow::Result<Option<u64>> {
    match env::var(name) {
        Ok(value) => Ok(Some(
            value
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a non-negative integer"))?,
        )),
        Err(_) => Ok(None),
    }
}

fn narrow(value: Option<u64>, fallback: u32) -> anyhow::Result<u32> {
    match value {
        Some(v) => u32::try_from(v).context("work factor value out of range"),
        None => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret() {
        let encoded = general_purpose::STANDARD.encode([7u8; 32]);
        assert_eq!(decode_secret(&encoded).unwrap(), vec![7u8; 32]);
    }

    #[test]
    fn test_short_secret_rejected() {
        let encoded = general_purpose::STANDARD.encode([7u8; 8]);
        assert!(decode_secret(&encoded).is_err());
    }

    #[test]
    fn test_garbage_secret_rejected() {
        assert!(decode_secret("not base64!").is_err());
    }

    #[test]
    fn test_token_ttl() {
        assert_eq!(token_ttl(None).unwrap(), None);
        assert_eq!(token_ttl(Some(3600)).unwrap(), Some(Duration::from_secs(3600)));
        assert!(token_ttl(Some(0)).is_err());
    }

    #[test]
    fn test_narrow() {
        assert_eq!(narrow(None, 3).unwrap(), 3);
        assert_eq!(narrow(Some(5), 3).unwrap(), 5);
        assert!(narrow(Some(u64::MAX), 3).is_err());
    }
}
