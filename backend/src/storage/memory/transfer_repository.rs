use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use super::connection::MemoryConnection;
use crate::domain::models::{AccountId, NewTransfer, Transfer, TransferId, TransferStatus};
use crate::storage::{StorageError, TransferStorage};

/// In-memory, append-only transfer ledger
#[derive(Clone)]
pub struct TransferRepository {
    connection: MemoryConnection,
}

impl TransferRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl TransferStorage for TransferRepository {
    async fn append_transfer(&self, transfer: NewTransfer) -> Result<Transfer, StorageError> {
        let mut transfers = self.connection.transfers().write().await;

        let stored = Transfer {
            id: transfers.len() as TransferId + 1,
            from_account_id: transfer.from_account_id,
            to_account_id: transfer.to_account_id,
            amount: transfer.amount,
            description: transfer.description,
            status: TransferStatus::Completed,
            created_at: Utc::now(),
        };
        transfers.push(stored.clone());

        info!(
            "Recorded transfer {}: {} -> {} amount {}",
            stored.id, stored.from_account_id, stored.to_account_id, stored.amount
        );
        Ok(stored)
    }

    async fn list_transfers_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transfer>, StorageError> {
        let transfers = self.connection.transfers().read().await;
        Ok(transfers
            .iter()
            .filter(|transfer| transfer.involves(account_id))
            .cloned()
            .collect())
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, StorageError> {
        Ok(self.connection.transfers().read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Connection;
    use rust_decimal::Decimal;

    fn new_transfer(from: AccountId, to: AccountId, amount: i64) -> NewTransfer {
        NewTransfer {
            from_account_id: from,
            to_account_id: to,
            amount: Decimal::from(amount),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_append_assigns_ids_and_completed_status() {
        let repo = MemoryConnection::new().create_transfer_repository();

        let first = repo.append_transfer(new_transfer(1, 2, 10)).await.unwrap();
        let second = repo
            .append_transfer(NewTransfer {
                description: Some("Rent".to_string()),
                ..new_transfer(2, 1, 5)
            })
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, TransferStatus::Completed);
        assert_eq!(second.description.as_deref(), Some("Rent"));
    }

    #[tokio::test]
    async fn test_list_for_account_matches_either_side_in_order() {
        let repo = MemoryConnection::new().create_transfer_repository();
        repo.append_transfer(new_transfer(1, 2, 10)).await.unwrap();
        repo.append_transfer(new_transfer(3, 4, 20)).await.unwrap();
        repo.append_transfer(new_transfer(2, 1, 30)).await.unwrap();
        repo.append_transfer(new_transfer(3, 1, 40)).await.unwrap();

        let for_one = repo.list_transfers_for_account(1).await.unwrap();
        let ids: Vec<TransferId> = for_one.iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 3, 4]);

        assert!(repo.list_transfers_for_account(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_in_insertion_order() {
        let repo = MemoryConnection::new().create_transfer_repository();
        assert!(repo.list_transfers().await.unwrap().is_empty());

        repo.append_transfer(new_transfer(1, 2, 10)).await.unwrap();
        repo.append_transfer(new_transfer(2, 3, 20)).await.unwrap();

        let all = repo.list_transfers().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].amount, Decimal::from(10));
        assert_eq!(all[1].amount, Decimal::from(20));
    }
}
