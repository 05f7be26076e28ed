//! Account registration, login and lookup.
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    commands::accounts::{LoginCommand, RegisterAccountCommand, Session},
    credentials::CredentialHasher,
    models::{AccountError, AccountId, AccountSummary, NewAccount},
    session::TokenService,
};
use crate::storage::{AccountStorage, Connection, StorageError};

/// Service for managing accounts and issuing sessions
#[derive(Clone)]
pub struct AccountService<C: Connection> {
    account_repository: C::AccountRepository,
    hasher: Arc<dyn CredentialHasher>,
    token_service: TokenService,
}

/// Treat absent and blank values alike
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl<C: Connection> AccountService<C> {
    pub fn new(
        connection: Arc<C>,
        hasher: Arc<dyn CredentialHasher>,
        token_service: TokenService,
    ) -> Self {
        let account_repository = connection.create_account_repository();
        Self {
            account_repository,
            hasher,
            token_service,
        }
    }

    /// Register a new account with a zero balance
    pub async fn register(
        &self,
        command: RegisterAccountCommand,
    ) -> Result<AccountSummary, AccountError> {
        let (email, password, name) = match (
            required(command.email),
            required(command.password),
            required(command.name),
        ) {
            (Some(email), Some(password), Some(name)) => (email, password, name),
            _ => {
                return Err(AccountError::MissingFields(
                    "Email, password and name are required",
                ))
            }
        };

        // Checked before hashing; the store enforces it again atomically
        if self.account_repository.get_account_by_email(&email).await?.is_some() {
            warn!("Registration rejected, email already in use: {}", email);
            return Err(AccountError::DuplicateIdentity(email));
        }

        let credential = self.hasher.hash(&password).await?;
        let account = self
            .account_repository
            .create_account(NewAccount {
                email,
                name,
                credential,
                is_favored: command.is_favored.unwrap_or(false),
            })
            .await
            .map_err(|e| match e {
                StorageError::DuplicateEmail(email) => AccountError::DuplicateIdentity(email),
                other => AccountError::Storage(other),
            })?;

        info!("Registered account {} ({})", account.id, account.email);
        Ok(account.summary())
    }

    /// Verify an email and password and issue a session token
    pub async fn authenticate(&self, command: LoginCommand) -> Result<Session, AccountError> {
        let (email, password) = match (required(command.email), required(command.password)) {
            (Some(email), Some(password)) => (email, password),
            _ => return Err(AccountError::MissingFields("Email and password are required")),
        };

        let account = self
            .account_repository
            .get_account_by_email(&email)
            .await?
            .ok_or(AccountError::NotFound)?;

        if !self.hasher.verify(&password, &account.credential).await? {
            warn!("Invalid password for account {}", account.id);
            return Err(AccountError::InvalidCredential);
        }

        let summary = account.summary();
        let token = self.token_service.issue(&summary)?;

        info!("Account {} logged in", summary.id);
        Ok(Session {
            token,
            account: summary,
        })
    }

    /// List all accounts in creation order
    pub async fn list_accounts(&self) -> Result<Vec<AccountSummary>, AccountError> {
        let accounts = self.account_repository.list_accounts().await?;
        info!("Found {} accounts", accounts.len());
        Ok(accounts)
    }

    /// Get a single account
    pub async fn get_account(&self, account_id: AccountId) -> Result<AccountSummary, AccountError> {
        match self.account_repository.get_account(account_id).await? {
            Some(account) => Ok(account.summary()),
            None => {
                warn!("Account not found: {}", account_id);
                Err(AccountError::NotFound)
            }
        }
    }
}
