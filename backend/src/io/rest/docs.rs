//! OpenAPI document for the HTTP API.
//!
//! - Swagger UI: `/api-docs`
//! - OpenAPI JSON: `/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use shared::{
    Account, AccountListResponse, AccountResponse, CreateTransferRequest, CreateTransferResponse,
    ErrorResponse, HealthResponse, LoginRequest, LoginResponse, RegisterAccountRequest,
    RegisterAccountResponse, Transfer, TransferListResponse, TransferStatus,
};

/// Bearer JWT issued by `POST /users/login`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transfer API",
        version = "1.0.0",
        description = "Accounts and money transfers between them."
    ),
    paths(
        super::health_apis::health_check,
        super::account_apis::register_account,
        super::account_apis::login,
        super::account_apis::list_accounts,
        super::account_apis::get_account,
        super::transfer_apis::create_transfer,
        super::transfer_apis::list_my_transfers,
        super::transfer_apis::list_transfers,
    ),
    components(
        schemas(
            Account,
            AccountListResponse,
            AccountResponse,
            CreateTransferRequest,
            CreateTransferResponse,
            ErrorResponse,
            HealthResponse,
            LoginRequest,
            LoginResponse,
            RegisterAccountRequest,
            RegisterAccountResponse,
            Transfer,
            TransferListResponse,
            TransferStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Registration, login and account lookup"),
        (name = "Transfers", description = "Money transfers (bearer token required)"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
