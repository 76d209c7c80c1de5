//! Password Service
//!
//! Policy admission and Argon2id hashing for the use cases. Hashing is
//! deliberately slow, so it runs on the blocking pool instead of the async
//! worker threads.

use platform::password::{ClearTextPassword, PasswordHasher, PasswordPolicy};

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Outcome of checking a login password
#[derive(Debug)]
pub enum Verification {
    Mismatch,
    /// `upgraded` holds a fresh hash when the stored one used outdated parameters
    Match { upgraded: Option<UserPassword> },
}

#[derive(Clone)]
pub struct PasswordService {
    hasher: PasswordHasher,
    policy: PasswordPolicy,
    /// Verified against when no account matches, so unknown emails cost a full hash
    decoy: UserPassword,
}

impl PasswordService {
    /// Hashes the decoy once with the hasher's work factor
    pub fn new(hasher: PasswordHasher, policy: PasswordPolicy) -> AuthResult<Self> {
        let decoy = hasher
            .hash(&ClearTextPassword::unvalidated("decoy-credential".to_string()))
            .map(UserPassword::from_hashed)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Self {
            hasher,
            policy,
            decoy,
        })
    }

    pub fn from_config(config: &AuthConfig) -> AuthResult<Self> {
        let hasher = PasswordHasher::new(config.work_factor, config.password_pepper.clone())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Self::new(hasher, config.password_policy.clone())
    }

    /// Check a newly chosen password against the policy
    pub fn admit(&self, raw: String) -> AuthResult<RawPassword> {
        RawPassword::new(raw, &self.policy)
            .map_err(|e| AuthError::PasswordValidation(e.message().to_string()))
    }

    pub async fn hash(&self, raw: RawPassword) -> AuthResult<UserPassword> {
        let hasher = self.hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(raw.as_clear_text()))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
            .map(UserPassword::from_hashed)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify, rehashing on success when the stored hash is outdated
    pub async fn verify(&self, raw: RawPassword, stored: &UserPassword) -> AuthResult<Verification> {
        let hasher = self.hasher.clone();
        let stored = stored.clone();

        tokio::task::spawn_blocking(move || {
            let password = raw.as_clear_text();
            if !hasher.verify(password, stored.as_hashed()) {
                return Ok(Verification::Mismatch);
            }
            if !hasher.needs_rehash(stored.as_hashed()) {
                return Ok(Verification::Match { upgraded: None });
            }
            hasher
                .hash(password)
                .map(|hashed| Verification::Match {
                    upgraded: Some(UserPassword::from_hashed(hashed)),
                })
                .map_err(|e| AuthError::Internal(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?
    }

    /// Spend the same work as a real check when there is no stored hash
    pub async fn verify_decoy(&self, raw: RawPassword) -> AuthResult<()> {
        let hasher = self.hasher.clone();
        let decoy = self.decoy.clone();

        tokio::task::spawn_blocking(move || {
            hasher.verify(raw.as_clear_text(), decoy.as_hashed());
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::WorkFactor;

    fn service(work_factor: WorkFactor) -> PasswordService {
        PasswordService::new(
            PasswordHasher::new(work_factor, None).unwrap(),
            PasswordPolicy::permissive(),
        )
        .unwrap()
    }

    fn cheap() -> WorkFactor {
        WorkFactor::new(64, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let service = service(cheap());
        let hash = service.hash(service.admit("pw1".into()).unwrap()).await.unwrap();

        let ok = service
            .verify(RawPassword::for_login("pw1".into()), &hash)
            .await
            .unwrap();
        assert!(matches!(ok, Verification::Match { upgraded: None }));

        let bad = service
            .verify(RawPassword::for_login("pw2".into()), &hash)
            .await
            .unwrap();
        assert!(matches!(bad, Verification::Mismatch));
    }

    #[tokio::test]
    async fn test_outdated_hash_is_upgraded() {
        let old = service(cheap());
        let hash = old.hash(old.admit("pw1".into()).unwrap()).await.unwrap();

        let new = service(WorkFactor::new(128, 1, 1).unwrap());
        let result = new
            .verify(RawPassword::for_login("pw1".into()), &hash)
            .await
            .unwrap();

        let Verification::Match {
            upgraded: Some(upgraded),
        } = result
        else {
            panic!("expected an upgraded hash");
        };
        assert_ne!(upgraded, hash);
        assert!(upgraded.as_phc_string().contains("m=128"));
    }

    #[tokio::test]
    async fn test_decoy_uses_configured_work_factor() {
        let service = service(WorkFactor::new(128, 1, 1).unwrap());
        assert!(service.decoy.as_phc_string().contains("m=128"));
        service
            .verify_decoy(RawPassword::for_login("anything".into()))
            .await
            .unwrap();
    }

    #[test]
    fn test_admit_maps_policy_errors() {
        let strict = PasswordService::new(
            PasswordHasher::new(cheap(), None).unwrap(),
            PasswordPolicy::nist(),
        )
        .unwrap();
        assert!(matches!(
            strict.admit("pw1".into()),
            Err(AuthError::PasswordValidation(_))
        ));
    }
}
