//! Password hashing collaborator.
//!
//! The domain never stores or compares plaintext passwords. It hands them to a
//! [`CredentialHasher`] and keeps only the resulting opaque [`Credential`].

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;

use super::models::Credential;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Hashing failed: {0}")]
    Hashing(String),
    #[error("Stored credential is malformed: {0}")]
    Malformed(String),
    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into an opaque credential
    async fn hash(&self, password: &str) -> Result<Credential, CredentialError>;

    /// Check a plaintext password against a stored credential
    async fn verify(&self, password: &str, credential: &Credential) -> Result<bool, CredentialError>;
}

/// Argon2id hasher. Hashing runs on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Use explicit cost parameters, e.g. cheap ones in tests
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<Credential, CredentialError> {
        let password = password.to_owned();
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Self::argon2(params)
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| Credential::from_phc(hash.to_string()))
                .map_err(|e| CredentialError::Hashing(e.to_string()))
        })
        .await?
    }

    async fn verify(&self, password: &str, credential: &Credential) -> Result<bool, CredentialError> {
        let password = password.to_owned();
        let stored = credential.clone();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(stored.as_str())
                .map_err(|e| CredentialError::Malformed(e.to_string()))?;

            // Parameters are read from the PHC string, not from self
            match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(CredentialError::Hashing(e.to_string())),
            }
        })
        .await?
    }
}
