//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::StorageError;
use crate::domain::models::{
    Account, AccountId, AccountSummary, NewAccount, NewTransfer, Transfer,
};

/// Trait defining the interface for account storage operations
///
/// The account store is the single owner of every balance. It never validates
/// the sign of a balance it is asked to store; that is the caller's job.
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Store a new account with a zero balance and the next sequential id.
    /// Fails with `DuplicateEmail` if the email is already registered.
    async fn create_account(&self, account: NewAccount) -> Result<Account, StorageError>;

    /// Retrieve a specific account by ID
    async fn get_account(&self, account_id: AccountId) -> Result<Option<Account>, StorageError>;

    /// Retrieve a specific account by email
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, StorageError>;

    /// List all accounts in creation order, without credentials
    async fn list_accounts(&self) -> Result<Vec<AccountSummary>, StorageError>;

    /// Replace the stored balance of an account
    async fn update_balance(
        &self,
        account_id: AccountId,
        new_balance: Decimal,
    ) -> Result<(), StorageError>;
}

/// Trait defining the interface for the append-only transfer ledger
#[async_trait]
pub trait TransferStorage: Send + Sync {
    /// Record a completed transfer with the next sequential id.
    /// No validation happens here.
    async fn append_transfer(&self, transfer: NewTransfer) -> Result<Transfer, StorageError>;

    /// List transfers where the account is the source or the destination,
    /// in insertion order
    async fn list_transfers_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transfer>, StorageError>;

    /// List every transfer in insertion order
    async fn list_transfers(&self) -> Result<Vec<Transfer>, StorageError>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories. This allows the domain layer to
/// work with any storage backend without knowing the implementation details.
/// Repositories must be `'static` so services can hand work to spawned tasks.
pub trait Connection: Send + Sync + Clone + 'static {
    /// The type of AccountStorage this connection creates
    type AccountRepository: AccountStorage + Clone + 'static;

    /// The type of TransferStorage this connection creates
    type TransferRepository: TransferStorage + Clone + 'static;

    /// Create a new account repository for this connection
    fn create_account_repository(&self) -> Self::AccountRepository;

    /// Create a new transfer repository for this connection
    fn create_transfer_repository(&self) -> Self::TransferRepository;
}
