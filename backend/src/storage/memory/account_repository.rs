use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::connection::MemoryConnection;
use crate::domain::models::{Account, AccountId, AccountSummary, NewAccount};
use crate::storage::{AccountStorage, StorageError};

/// In-memory account repository
#[derive(Clone)]
pub struct AccountRepository {
    connection: MemoryConnection,
}

impl AccountRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StorageError> {
        let mut accounts = self.connection.accounts().write().await;

        if accounts.iter().any(|existing| existing.email == account.email) {
            return Err(StorageError::DuplicateEmail(account.email));
        }

        let stored = Account {
            id: accounts.len() as AccountId + 1,
            email: account.email,
            name: account.name,
            credential: account.credential,
            is_favored: account.is_favored,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        };
        accounts.push(stored.clone());

        info!("Stored account {} ({})", stored.id, stored.email);
        Ok(stored)
    }

    async fn get_account(&self, account_id: AccountId) -> Result<Option<Account>, StorageError> {
        let accounts = self.connection.accounts().read().await;
        Ok(accounts.iter().find(|account| account.id == account_id).cloned())
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, StorageError> {
        let accounts = self.connection.accounts().read().await;
        Ok(accounts.iter().find(|account| account.email == email).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<AccountSummary>, StorageError> {
        let accounts = self.connection.accounts().read().await;
        Ok(accounts.iter().map(Account::summary).collect())
    }

    async fn update_balance(
        &self,
        account_id: AccountId,
        new_balance: Decimal,
    ) -> Result<(), StorageError> {
        let mut accounts = self.connection.accounts().write().await;
        let account = accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or(StorageError::AccountNotFound(account_id))?;

        debug!(
            "Account {} balance {} -> {}",
            account_id, account.balance, new_balance
        );
        account.balance = new_balance;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Credential;
    use crate::storage::Connection;

    fn new_account(email: &str, is_favored: bool) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            name: "Test User".to_string(),
            credential: Credential::from_phc("hash"),
            is_favored,
        }
    }

    fn setup_test() -> AccountRepository {
        MemoryConnection::new().create_account_repository()
    }

    #[tokio::test]
    async fn test_create_account_assigns_sequential_ids_and_zero_balance() {
        let repo = setup_test();

        let first = repo.create_account(new_account("a@example.com", false)).await.unwrap();
        let second = repo.create_account(new_account("b@example.com", true)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.balance, Decimal::ZERO);
        assert_eq!(second.balance, Decimal::ZERO);
        assert!(second.is_favored);
    }

    #[tokio::test]
    async fn test_create_account_rejects_duplicate_email() {
        let repo = setup_test();
        repo.create_account(new_account("a@example.com", false)).await.unwrap();

        let result = repo.create_account(new_account("a@example.com", true)).await;
        assert_eq!(
            result.unwrap_err(),
            StorageError::DuplicateEmail("a@example.com".to_string())
        );

        // The rejected registration must not consume an id
        let next = repo.create_account(new_account("c@example.com", false)).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_lookups_by_id_and_email() {
        let repo = setup_test();
        let created = repo.create_account(new_account("a@example.com", false)).await.unwrap();

        let by_id = repo.get_account(created.id).await.unwrap().unwrap();
        let by_email = repo.get_account_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(by_id, created);
        assert_eq!(by_email, created);

        assert!(repo.get_account(99).await.unwrap().is_none());
        assert!(repo.get_account_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_accounts_in_creation_order() {
        let repo = setup_test();
        for email in ["c@example.com", "a@example.com", "b@example.com"] {
            repo.create_account(new_account(email, false)).await.unwrap();
        }

        let accounts = repo.list_accounts().await.unwrap();
        let emails: Vec<&str> = accounts.iter().map(|a| a.email.as_str()).collect();
        assert_eq!(emails, ["c@example.com", "a@example.com", "b@example.com"]);
    }

    #[tokio::test]
    async fn test_update_balance() {
        let repo = setup_test();
        let created = repo.create_account(new_account("a@example.com", false)).await.unwrap();

        repo.update_balance(created.id, Decimal::from(250)).await.unwrap();
        let stored = repo.get_account(created.id).await.unwrap().unwrap();
        assert_eq!(stored.balance, Decimal::from(250));

        // The store does not police the sign of the balance
        repo.update_balance(created.id, Decimal::from(-5)).await.unwrap();
        let stored = repo.get_account(created.id).await.unwrap().unwrap();
        assert_eq!(stored.balance, Decimal::from(-5));
    }

    #[tokio::test]
    async fn test_update_balance_unknown_account() {
        let repo = setup_test();
        let result = repo.update_balance(42, Decimal::ONE).await;
        assert_eq!(result.unwrap_err(), StorageError::AccountNotFound(42));
    }

    #[tokio::test]
    async fn test_repositories_from_cloned_connection_share_state() {
        let connection = MemoryConnection::new();
        let writer = connection.create_account_repository();
        let reader = connection.clone().create_account_repository();

        writer.create_account(new_account("a@example.com", false)).await.unwrap();
        assert_eq!(reader.list_accounts().await.unwrap().len(), 1);
    }
}
