//! Session Tokens
//!
//! Stateless HS256 JWTs carrying a user's id and email.
//!
//! The signature is checked before the claims are decoded. Tokens are not
//! revocable: logout only clears the client's copy.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entity::identity::Identity;
use crate::domain::value_object::{email::Email, user_id::UserId};

/// Token failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Service was built without a signing secret
    #[error("Session secret is missing")]
    MissingSecret,

    /// Not a well-formed JWT, or the payload is not valid claims
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match the payload
    #[error("Invalid token signature")]
    BadSignature,

    /// Past its expiry time
    #[error("Token expired")]
    Expired,

    /// Claims could not be serialized
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// What a token asserts about its holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: UserId,
    pub email: String,
}

impl TokenClaims {
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    pub fn into_identity(self) -> Identity {
        Identity::new(self.id, Email::from_db(self.email))
    }
}

impl From<&Identity> for TokenClaims {
    fn from(identity: &Identity) -> Self {
        Self::new(identity.id, identity.email.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    id: UserId,
    email: String,
    /// Issued at (unix seconds)
    iat: i64,
    /// Expires at (unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Signed session token
///
/// The empty token is what logout hands back to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn cleared() -> Self {
        Self(String::new())
    }

    pub fn is_cleared(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_cleared() {
            f.write_str("SessionToken(<cleared>)")
        } else {
            f.write_str("SessionToken([REDACTED])")
        }
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl TokenService {
    /// Fails only when `secret` is empty
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        if ttl.is_none() {
            // Tokens carry no `exp` without a lifetime
            validation.required_spec_claims = HashSet::new();
            validation.validate_exp = false;
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn issue(&self, claims: &TokenClaims) -> Result<SessionToken, TokenError> {
        let now = Utc::now().timestamp();
        let exp = self
            .ttl
            .map(|ttl| now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)));

        let claims = Claims {
            id: claims.id,
            email: claims.email.clone(),
            iat: now,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(SessionToken)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;

        Ok(TokenClaims {
            id: data.claims.id,
            email: data.claims.email,
        })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    fn service() -> TokenService {
        TokenService::new(&SECRET, None).unwrap()
    }

    fn signed(claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(&SECRET),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_secret() {
        assert_eq!(
            TokenService::new(b"", None).unwrap_err(),
            TokenError::MissingSecret
        );
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let service = service();
        let claims = TokenClaims::new(UserId::new(), "ann@x.io");
        let token = service.issue(&claims).unwrap();
        assert_eq!(service.verify(token.as_str()).unwrap(), claims);
    }

    #[test]
    fn test_token_is_three_segment_jwt() {
        let token = service()
            .issue(&TokenClaims::new(UserId::new(), "ann@x.io"))
            .unwrap();
        assert_eq!(token.as_str().split('.').count(), 3);
        let header = jsonwebtoken::decode_header(token.as_str()).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = service()
            .issue(&TokenClaims::new(UserId::new(), "ann@x.io"))
            .unwrap();
        let other = TokenService::new(&[8u8; 32], None).unwrap();
        assert_eq!(other.verify(token.as_str()), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_tokens() {
        let service = service();
        assert_eq!(service.verify(""), Err(TokenError::Malformed));
        assert_eq!(service.verify("abc"), Err(TokenError::Malformed));
        assert_eq!(service.verify("a.b"), Err(TokenError::Malformed));
        assert_eq!(service.verify("a.b.c.d"), Err(TokenError::Malformed));
        assert_eq!(service.verify("!!!.!!!.!!!"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_expired_token() {
        let token = signed(&Claims {
            id: UserId::new(),
            email: "ann@x.io".to_string(),
            iat: 1_000,
            exp: Some(1_001),
        });

        let with_ttl = TokenService::new(&SECRET, Some(Duration::from_secs(60))).unwrap();
        assert_eq!(with_ttl.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_ttl_requires_expiry() {
        let token = signed(&Claims {
            id: UserId::new(),
            email: "ann@x.io".to_string(),
            iat: Utc::now().timestamp(),
            exp: None,
        });

        assert!(service().verify(&token).is_ok());
        let with_ttl = TokenService::new(&SECRET, Some(Duration::from_secs(60))).unwrap();
        assert_eq!(with_ttl.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_ttl_sets_future_expiry() {
        let service = TokenService::new(&SECRET, Some(Duration::from_secs(3600))).unwrap();
        let claims = TokenClaims::new(UserId::new(), "ann@x.io");
        let token = service.issue(&claims).unwrap();
        assert_eq!(service.verify(token.as_str()).unwrap(), claims);
    }

    #[test]
    fn test_debug_redacts_key() {
        assert!(format!("{:?}", service()).contains("[REDACTED]"));
    }

    #[test]
    fn test_cleared_token() {
        let token = SessionToken::cleared();
        assert!(token.is_cleared());
        assert_eq!(token.as_str(), "");
    }
}
