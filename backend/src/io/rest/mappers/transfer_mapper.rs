use crate::domain::commands::transfers::CreateTransferCommand;
use crate::domain::models::{Transfer as DomainTransfer, TransferStatus as DomainTransferStatus};
use shared::{
    CreateTransferRequest, Transfer as SharedTransfer, TransferListResponse,
    TransferStatus as SharedTransferStatus,
};

/// Mapper to convert between shared Transfer DTOs and domain ledger entries.
pub struct TransferMapper;

impl TransferMapper {
    pub fn to_dto(domain: DomainTransfer) -> SharedTransfer {
        SharedTransfer {
            id: domain.id,
            from_user_id: domain.from_account_id,
            to_user_id: domain.to_account_id,
            amount: domain.amount,
            description: domain.description,
            status: Self::status_to_dto(domain.status),
            created_at: domain.created_at,
        }
    }

    fn status_to_dto(status: DomainTransferStatus) -> SharedTransferStatus {
        match status {
            DomainTransferStatus::Completed => SharedTransferStatus::Completed,
        }
    }

    pub fn to_transfer_list_dto(transfers: Vec<DomainTransfer>) -> TransferListResponse {
        let transfers: Vec<SharedTransfer> = transfers.into_iter().map(Self::to_dto).collect();
        TransferListResponse {
            total: transfers.len(),
            transfers,
        }
    }

    pub fn to_create_command(request: CreateTransferRequest) -> CreateTransferCommand {
        CreateTransferCommand {
            to_account_id: request.to_user_id,
            amount: request.amount,
            description: request.description,
        }
    }
}
