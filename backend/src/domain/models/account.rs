//! Domain model for an account and its failure modes.
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

use crate::domain::credentials::CredentialError;
use crate::domain::session::AuthError;
use crate::storage::StorageError;

pub type AccountId = u64;

/// Opaque password hash in PHC string format.
///
/// Not serializable; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub credential: Credential,
    pub is_favored: bool,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Credential-free projection handed to callers
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            is_favored: self.is_favored,
            balance: self.balance,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub is_favored: bool,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input to the account store; the store assigns id, balance and timestamp.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub credential: Credential,
    pub is_favored: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    MissingFields(&'static str),
    #[error("Account already exists: {0}")]
    DuplicateIdentity(String),
    #[error("Account not found")]
    NotFound,
    #[error("Invalid password")]
    InvalidCredential,
    #[error("Credential processing failed: {0}")]
    Credential(#[from] CredentialError),
    #[error("Token issuing failed: {0}")]
    Token(#[from] AuthError),
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl AccountError {
    /// Stable tag for the failure reason
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::MissingFields(_) => "MISSING_FIELDS",
            AccountError::DuplicateIdentity(_) => "DUPLICATE_IDENTITY",
            AccountError::NotFound => "NOT_FOUND",
            AccountError::InvalidCredential => "INVALID_CREDENTIAL",
            AccountError::Credential(_) => "CREDENTIAL_ERROR",
            AccountError::Token(_) => "TOKEN_ERROR",
            AccountError::Storage(_) => "STORAGE_ERROR",
        }
    }
}
