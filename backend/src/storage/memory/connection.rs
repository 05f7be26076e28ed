use std::sync::Arc;
use tokio::sync::RwLock;

use super::account_repository::AccountRepository;
use super::transfer_repository::TransferRepository;
use crate::domain::models::{Account, Transfer};
use crate::storage::traits::Connection;

/// MemoryConnection owns the process-lifetime tables for accounts and transfers.
///
/// Cloning the connection shares the same tables, so every repository created
/// from one connection (or any of its clones) sees the same data.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    accounts: Arc<RwLock<Vec<Account>>>,
    transfers: Arc<RwLock<Vec<Transfer>>>,
}

impl MemoryConnection {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn accounts(&self) -> &Arc<RwLock<Vec<Account>>> {
        &self.accounts
    }

    pub(crate) fn transfers(&self) -> &Arc<RwLock<Vec<Transfer>>> {
        &self.transfers
    }
}

impl Connection for MemoryConnection {
    type AccountRepository = AccountRepository;
    type TransferRepository = TransferRepository;

    fn create_account_repository(&self) -> Self::AccountRepository {
        AccountRepository::new(self.clone())
    }

    fn create_transfer_repository(&self) -> Self::TransferRepository {
        TransferRepository::new(self.clone())
    }
}
