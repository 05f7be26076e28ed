//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod accounts {
    use crate::domain::models::AccountSummary;

    /// Input for registering an account. Presence is validated by the service.
    #[derive(Debug, Clone, Default)]
    pub struct RegisterAccountCommand {
        pub email: Option<String>,
        pub password: Option<String>,
        pub name: Option<String>,
        pub is_favored: Option<bool>,
    }

    /// Input for exchanging an email and password for a session.
    #[derive(Debug, Clone, Default)]
    pub struct LoginCommand {
        pub email: Option<String>,
        pub password: Option<String>,
    }

    /// Result of a successful login.
    #[derive(Debug, Clone)]
    pub struct Session {
        pub token: String,
        pub account: AccountSummary,
    }
}

pub mod transfers {
    use crate::domain::models::AccountId;
    use rust_decimal::Decimal;

    /// Input for moving money out of the authenticated account.
    #[derive(Debug, Clone, Default)]
    pub struct CreateTransferCommand {
        pub to_account_id: Option<AccountId>,
        pub amount: Option<Decimal>,
        pub description: Option<String>,
    }
}
