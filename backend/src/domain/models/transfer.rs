//! Domain model for a ledger entry and the transfer rule violations.
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::account::AccountId;
use crate::storage::StorageError;

pub type TransferId = u64;

/// Ceiling for a single transfer into an account that is not favored.
pub const FAVORED_TRANSFER_LIMIT: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub id: TransferId,
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Decimal,
    pub description: Option<String>,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
}

impl Transfer {
    /// True when the account is either side of this transfer
    pub fn involves(&self, account_id: AccountId) -> bool {
        self.from_account_id == account_id || self.to_account_id == account_id
    }
}

/// Input to the ledger store; the store assigns id, status and timestamp.
#[derive(Debug, Clone)]
pub struct NewTransfer {
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("Recipient and amount are required")]
    MissingFields,
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Cannot transfer to the same account")]
    SelfTransfer,
    #[error("Source account not found: {0}")]
    SourceNotFound(AccountId),
    #[error("Destination account not found: {0}")]
    DestinationNotFound(AccountId),
    #[error("Insufficient funds: balance {available}, requested {requested}")]
    InsufficientFunds { available: Decimal, requested: Decimal },
    #[error("Transfers to non-favored accounts are limited to {limit}, requested {requested}")]
    FavoredLimitExceeded { limit: Decimal, requested: Decimal },
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
    #[error("Transfer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl TransferError {
    /// Stable tag for the failure reason
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::MissingFields => "MISSING_FIELDS",
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::SelfTransfer => "SELF_TRANSFER",
            TransferError::SourceNotFound(_) => "SOURCE_NOT_FOUND",
            TransferError::DestinationNotFound(_) => "DESTINATION_NOT_FOUND",
            TransferError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TransferError::FavoredLimitExceeded { .. } => "FAVORED_LIMIT_EXCEEDED",
            TransferError::Storage(_) => "STORAGE_ERROR",
            TransferError::Task(_) => "TASK_ERROR",
        }
    }

    /// Business rule and input failures, as opposed to infrastructure ones
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TransferError::Storage(_) | TransferError::Task(_))
    }
}
