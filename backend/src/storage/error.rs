use crate::domain::models::AccountId;

/// Failures reported by any storage backend
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Account with email {0} already exists")]
    DuplicateEmail(String),
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}
