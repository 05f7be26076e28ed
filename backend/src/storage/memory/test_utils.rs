/// Test utilities for the in-memory backend
///
/// `TestEnvironment` wires a fresh store into the domain services so tests can
/// seed accounts and inspect balances without going through the REST layer.
/// `FailingConnection` wraps the same store and fails or holds one chosen
/// write, which lets tests observe how the transfer engine recovers.
use async_trait::async_trait;
use chrono::Duration;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Notify;

use super::{AccountRepository, MemoryConnection, TransferRepository};
use crate::domain::account_service::AccountService;
use crate::domain::commands::accounts::RegisterAccountCommand;
use crate::domain::credentials::{Argon2Hasher, CredentialHasher};
use crate::domain::models::{
    Account, AccountId, AccountSummary, NewAccount, NewTransfer, Transfer,
};
use crate::domain::session::TokenService;
use crate::domain::transfer_service::TransferService;
use crate::storage::{AccountStorage, Connection, StorageError, TransferStorage};

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_PASSWORD: &str = "123456";

/// Argon2 with the smallest parameters the crate accepts
pub fn cheap_hasher() -> Arc<dyn CredentialHasher> {
    let params = argon2::Params::new(argon2::Params::MIN_M_COST, 1, 1, None)
        .expect("minimum argon2 params are valid");
    Arc::new(Argon2Hasher::with_params(params))
}

pub fn test_token_service() -> TokenService {
    TokenService::new(TEST_SECRET, Duration::hours(24))
}

/// Domain services over one shared store
pub struct TestEnvironment<C: Connection = MemoryConnection> {
    /// Direct access to the tables, bypassing any injected failures
    pub memory: MemoryConnection,
    pub token_service: TokenService,
    pub account_service: AccountService<C>,
    pub transfer_service: TransferService<C>,
}

impl TestEnvironment<MemoryConnection> {
    pub fn new() -> Self {
        let memory = MemoryConnection::new();
        Self::build(memory.clone(), memory)
    }
}

impl TestEnvironment<FailingConnection> {
    pub fn with_connection(connection: FailingConnection) -> Self {
        let memory = connection.inner.clone();
        Self::build(memory, connection)
    }
}

impl<C: Connection> TestEnvironment<C> {
    fn build(memory: MemoryConnection, connection: C) -> Self {
        let connection = Arc::new(connection);
        let token_service = test_token_service();
        Self {
            memory,
            account_service: AccountService::new(
                connection.clone(),
                cheap_hasher(),
                token_service.clone(),
            ),
            transfer_service: TransferService::new(connection),
            token_service,
        }
    }

    /// Register an account with the test password and give it a starting balance
    pub async fn seed_account(
        &self,
        email: &str,
        is_favored: bool,
        balance: Decimal,
    ) -> AccountSummary {
        let account = self
            .account_service
            .register(RegisterAccountCommand {
                email: Some(email.to_string()),
                password: Some(TEST_PASSWORD.to_string()),
                name: Some(format!("Test {}", email)),
                is_favored: Some(is_favored),
            })
            .await
            .expect("Failed to seed account");

        self.set_balance(account.id, balance).await;
        AccountSummary { balance, ..account }
    }

    pub async fn set_balance(&self, account_id: AccountId, balance: Decimal) {
        self.memory
            .create_account_repository()
            .update_balance(account_id, balance)
            .await
            .expect("Failed to set balance");
    }

    pub async fn balance(&self, account_id: AccountId) -> Decimal {
        self.memory
            .create_account_repository()
            .get_account(account_id)
            .await
            .expect("Failed to read account")
            .expect("Account should exist")
            .balance
    }

    /// The stored account, credential included
    pub async fn account(&self, email: &str) -> Account {
        self.memory
            .create_account_repository()
            .get_account_by_email(email)
            .await
            .expect("Failed to read account")
            .expect("Account should exist")
    }
}

/// Which write a [`FailingConnection`] refuses or holds
#[derive(Clone)]
pub enum FailurePoint {
    /// Balance updates on this account fail
    CreditAccount(AccountId),
    /// Every ledger append fails
    AppendTransfer,
    /// Balance updates on this account wait until the gate is released
    HoldCredit(AccountId, WriteGate),
}

/// Parks a write until the test lets it through
#[derive(Clone, Default)]
pub struct WriteGate {
    reached: Arc<Notify>,
    release: Arc<Notify>,
}

impl WriteGate {
    /// Wait until a write is parked at the gate
    pub async fn reached(&self) {
        self.reached.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.reached.notify_one();
        self.release.notified().await;
    }
}

#[derive(Clone)]
pub struct FailingConnection {
    inner: MemoryConnection,
    failure: FailurePoint,
}

impl FailingConnection {
    pub fn new(failure: FailurePoint) -> Self {
        Self {
            inner: MemoryConnection::new(),
            failure,
        }
    }
}

impl Connection for FailingConnection {
    type AccountRepository = FailingAccountRepository;
    type TransferRepository = FailingTransferRepository;

    fn create_account_repository(&self) -> Self::AccountRepository {
        FailingAccountRepository {
            inner: self.inner.create_account_repository(),
            failure: self.failure.clone(),
        }
    }

    fn create_transfer_repository(&self) -> Self::TransferRepository {
        FailingTransferRepository {
            inner: self.inner.create_transfer_repository(),
            failure: self.failure.clone(),
        }
    }
}

#[derive(Clone)]
pub struct FailingAccountRepository {
    inner: AccountRepository,
    failure: FailurePoint,
}

#[async_trait]
impl AccountStorage for FailingAccountRepository {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StorageError> {
        self.inner.create_account(account).await
    }

    async fn get_account(&self, account_id: AccountId) -> Result<Option<Account>, StorageError> {
        self.inner.get_account(account_id).await
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, StorageError> {
        self.inner.get_account_by_email(email).await
    }

    async fn list_accounts(&self) -> Result<Vec<AccountSummary>, StorageError> {
        self.inner.list_accounts().await
    }

    async fn update_balance(
        &self,
        account_id: AccountId,
        new_balance: Decimal,
    ) -> Result<(), StorageError> {
        match &self.failure {
            FailurePoint::CreditAccount(id) if *id == account_id => {
                return Err(StorageError::Unavailable(format!(
                    "balance write refused for account {}",
                    account_id
                )));
            }
            FailurePoint::HoldCredit(id, gate) if *id == account_id => gate.pass().await,
            _ => {}
        }
        self.inner.update_balance(account_id, new_balance).await
    }
}

#[derive(Clone)]
pub struct FailingTransferRepository {
    inner: TransferRepository,
    failure: FailurePoint,
}

#[async_trait]
impl TransferStorage for FailingTransferRepository {
    async fn append_transfer(&self, transfer: NewTransfer) -> Result<Transfer, StorageError> {
        if matches!(self.failure, FailurePoint::AppendTransfer) {
            return Err(StorageError::Unavailable("ledger append refused".to_string()));
        }
        self.inner.append_transfer(transfer).await
    }

    async fn list_transfers_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transfer>, StorageError> {
        self.inner.list_transfers_for_account(account_id).await
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, StorageError> {
        self.inner.list_transfers().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_seed_account_sets_balance() {
        let env = TestEnvironment::new();
        let account = env.seed_account("seed@example.com", true, dec!(42.5)).await;

        assert_eq!(account.balance, dec!(42.5));
        assert_eq!(env.balance(account.id).await, dec!(42.5));
        assert!(env.account("seed@example.com").await.is_favored);
    }

    #[tokio::test]
    async fn test_failing_connection_refuses_only_chosen_write() {
        let env = TestEnvironment::with_connection(FailingConnection::new(
            FailurePoint::CreditAccount(2),
        ));
        let first = env.seed_account("a@example.com", false, dec!(1)).await;
        let second = env.seed_account("b@example.com", false, dec!(2)).await;

        let repository = FailingConnection {
            inner: env.memory.clone(),
            failure: FailurePoint::CreditAccount(2),
        }
        .create_account_repository();

        assert!(repository.update_balance(first.id, dec!(3)).await.is_ok());
        assert!(matches!(
            repository.update_balance(second.id, dec!(3)).await,
            Err(StorageError::Unavailable(_))
        ));
    }
}
