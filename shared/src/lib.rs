use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub is_favored: bool,
    /// Current balance in currency units
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Request for registering a new account
///
/// Every field is optional on the wire so that missing values surface as a
/// domain validation error instead of a JSON rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequest {
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "123456")]
    pub password: Option<String>,
    #[schema(example = "Alice")]
    pub name: Option<String>,
    #[serde(default, alias = "isFavorecido")]
    pub is_favored: Option<bool>,
}

/// Response after registering an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegisterAccountResponse {
    pub message: String,
    pub user: Account,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "123456")]
    pub password: Option<String>,
}

/// Response after a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub user: Account,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub user: Account,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccountListResponse {
    pub users: Vec<Account>,
    pub total: usize,
}

/// Lifecycle state of a transfer. Only completed transfers are ever recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Completed,
}

/// A recorded transfer between two accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: u64,
    pub from_user_id: u64,
    pub to_user_id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub description: Option<String>,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
}

/// Request for moving money from the authenticated account to another one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferRequest {
    #[schema(example = 2)]
    pub to_user_id: Option<u64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 150.0)]
    pub amount: Option<Decimal>,
    #[schema(example = "Dinner")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateTransferResponse {
    pub message: String,
    pub transfer: Transfer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransferListResponse {
    pub transfers: Vec<Transfer>,
    pub total: usize,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable reason
    pub error: String,
    /// Stable machine readable tag, e.g. `INSUFFICIENT_FUNDS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// What the caller can do about it, when there is something to say
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
