use crate::domain::commands::accounts::{LoginCommand, RegisterAccountCommand};
use crate::domain::models::AccountSummary;
use shared::{Account as SharedAccount, AccountListResponse, LoginRequest, RegisterAccountRequest};

/// Mapper to convert between shared Account DTOs and domain account models.
pub struct AccountMapper;

impl AccountMapper {
    pub fn to_dto(domain: AccountSummary) -> SharedAccount {
        SharedAccount {
            id: domain.id,
            email: domain.email,
            name: domain.name,
            is_favored: domain.is_favored,
            balance: domain.balance,
            created_at: domain.created_at,
        }
    }

    pub fn to_account_list_dto(accounts: Vec<AccountSummary>) -> AccountListResponse {
        let users: Vec<SharedAccount> = accounts.into_iter().map(Self::to_dto).collect();
        AccountListResponse {
            total: users.len(),
            users,
        }
    }

    pub fn to_register_command(request: RegisterAccountRequest) -> RegisterAccountCommand {
        RegisterAccountCommand {
            email: request.email,
            password: request.password,
            name: request.name,
            is_favored: request.is_favored,
        }
    }

    pub fn to_login_command(request: LoginRequest) -> LoginCommand {
        LoginCommand {
            email: request.email,
            password: request.password,
        }
    }
}
