//! The transfer engine.
//!
//! A transfer is validated in a fixed order, each check failing fast:
//!
//! 1. recipient and amount present
//! 2. amount strictly positive
//! 3. recipient differs from the actor
//! 4. source account exists
//! 5. destination account exists
//! 6. source balance covers the amount
//! 7. a destination that is not favored receives at most
//!    [`FAVORED_TRANSFER_LIMIT`] per transfer
//!
//! Balances are re-read and checked with both accounts locked, then the
//! source is debited, the destination credited and the ledger entry
//! appended. If a later step fails, the earlier balance writes are restored
//! before the error is returned, so callers see all or nothing. The locked
//! section runs on a spawned task and finishes even if the caller goes away.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::{
    account_locks::AccountLocks,
    commands::transfers::CreateTransferCommand,
    models::{
        Account, AccountId, NewTransfer, Transfer, TransferError, FAVORED_TRANSFER_LIMIT,
    },
};
use crate::storage::{AccountStorage, Connection, TransferStorage};

#[derive(Clone)]
pub struct TransferService<C: Connection> {
    account_repository: C::AccountRepository,
    transfer_repository: C::TransferRepository,
    account_locks: AccountLocks,
}

impl<C: Connection> TransferService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            account_repository: connection.create_account_repository(),
            transfer_repository: connection.create_transfer_repository(),
            account_locks: AccountLocks::new(),
        }
    }

    /// Move `amount` from the actor's account to the recipient's
    pub async fn create_transfer(
        &self,
        actor_id: AccountId,
        command: CreateTransferCommand,
    ) -> Result<Transfer, TransferError> {
        let (to_account_id, amount) = match (command.to_account_id, command.amount) {
            (Some(to_account_id), Some(amount)) => (to_account_id, amount),
            _ => return Err(TransferError::MissingFields),
        };

        if amount <= Decimal::ZERO {
            return Err(TransferError::InvalidAmount);
        }

        if actor_id == to_account_id {
            return Err(TransferError::SelfTransfer);
        }

        // Accounts are never deleted, so existence checked here holds below.
        // Checking first keeps unknown ids out of the lock registry.
        self.load_source(actor_id).await?;
        self.load_destination(to_account_id).await?;

        // The locked section runs on its own task so that dropping this
        // future (a client disconnect) cannot stop a commit halfway.
        let service = self.clone();
        let description = command.description;
        let transfer = tokio::spawn(async move {
            service
                .settle(actor_id, to_account_id, amount, description)
                .await
        })
        .await??;

        info!(
            "Transfer {} completed: {} -> {} amount {}",
            transfer.id, transfer.from_account_id, transfer.to_account_id, transfer.amount
        );
        Ok(transfer)
    }

    /// Every transfer the account sent or received, oldest first
    pub async fn transfers_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transfer>, TransferError> {
        Ok(self
            .transfer_repository
            .list_transfers_for_account(account_id)
            .await?)
    }

    /// The whole ledger, oldest first
    pub async fn all_transfers(&self) -> Result<Vec<Transfer>, TransferError> {
        Ok(self.transfer_repository.list_transfers().await?)
    }

    async fn load_source(&self, account_id: AccountId) -> Result<Account, TransferError> {
        self.account_repository
            .get_account(account_id)
            .await?
            .ok_or(TransferError::SourceNotFound(account_id))
    }

    async fn load_destination(&self, account_id: AccountId) -> Result<Account, TransferError> {
        self.account_repository
            .get_account(account_id)
            .await?
            .ok_or(TransferError::DestinationNotFound(account_id))
    }

    /// Lock both accounts, re-check the balance rules against fresh reads and
    /// commit.
    async fn settle(
        &self,
        actor_id: AccountId,
        to_account_id: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Transfer, TransferError> {
        let _guard = self.account_locks.acquire_pair(actor_id, to_account_id).await;

        let source = self.load_source(actor_id).await?;
        let destination = self.load_destination(to_account_id).await?;

        if source.balance < amount {
            warn!(
                "Transfer {} -> {} rejected: balance {} below {}",
                actor_id, to_account_id, source.balance, amount
            );
            return Err(TransferError::InsufficientFunds {
                available: source.balance,
                requested: amount,
            });
        }

        if !destination.is_favored && amount > FAVORED_TRANSFER_LIMIT {
            warn!(
                "Transfer {} -> {} rejected: {} exceeds non-favored limit",
                actor_id, to_account_id, amount
            );
            return Err(TransferError::FavoredLimitExceeded {
                limit: FAVORED_TRANSFER_LIMIT,
                requested: amount,
            });
        }

        self.commit(&source, &destination, amount, description).await
    }

    /// Apply both balance writes and the ledger append. Must be called with
    /// both accounts locked.
    async fn commit(
        &self,
        source: &Account,
        destination: &Account,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Transfer, TransferError> {
        let new_source_balance = source.balance - amount;
        let new_destination_balance = destination.balance + amount;

        self.account_repository
            .update_balance(source.id, new_source_balance)
            .await?;

        if let Err(e) = self
            .account_repository
            .update_balance(destination.id, new_destination_balance)
            .await
        {
            error!("Crediting account {} failed: {}", destination.id, e);
            self.restore_balance(source).await;
            return Err(e.into());
        }

        let appended = self
            .transfer_repository
            .append_transfer(NewTransfer {
                from_account_id: source.id,
                to_account_id: destination.id,
                amount,
                description,
            })
            .await;

        match appended {
            Ok(transfer) => Ok(transfer),
            Err(e) => {
                error!(
                    "Recording transfer {} -> {} failed: {}",
                    source.id, destination.id, e
                );
                self.restore_balance(destination).await;
                self.restore_balance(source).await;
                Err(e.into())
            }
        }
    }

    async fn restore_balance(&self, account: &Account) {
        if let Err(e) = self
            .account_repository
            .update_balance(account.id, account.balance)
            .await
        {
            error!(
                "Failed to restore balance {} on account {}: {}",
                account.balance, account.id, e
            );
        }
    }
}
