//! # REST API for Account Management
//!
//! Endpoints for registering, logging in and looking up accounts. None of
//! them require a session token.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::error::ApiError;
use super::mappers::AccountMapper;
use crate::domain::models::AccountError;
use crate::AppState;
use shared::{
    AccountListResponse, AccountResponse, ErrorResponse, LoginRequest, LoginResponse,
    RegisterAccountRequest, RegisterAccountResponse,
};

/// Register a new account
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterAccountRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterAccountResponse),
        (status = 400, description = "Missing fields or email already registered", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
pub async fn register_account(
    State(state): State<AppState>,
    payload: Result<Json<RegisterAccountRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };
    info!("POST /users - email: {:?}", request.email);

    let command = AccountMapper::to_register_command(request);
    match state.account_service.register(command).await {
        Ok(account) => {
            let response = RegisterAccountResponse {
                message: "Account created successfully".to_string(),
                user: AccountMapper::to_dto(account),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to register account: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Exchange an email and password for a session token
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };
    info!("POST /users/login - email: {:?}", request.email);

    let command = AccountMapper::to_login_command(request);
    match state.account_service.authenticate(command).await {
        Ok(session) => {
            let response = LoginResponse {
                message: "Login successful".to_string(),
                token: session.token,
                user: AccountMapper::to_dto(session.account),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Login failed: {}", e);
            let unauthorized = matches!(e, AccountError::NotFound);
            let api_error = ApiError::from(e);
            if unauthorized {
                api_error.with_status(StatusCode::UNAUTHORIZED).into_response()
            } else {
                api_error.into_response()
            }
        }
    }
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All accounts in creation order", body = AccountListResponse)
    ),
    tag = "Accounts"
)]
pub async fn list_accounts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /users");

    match state.account_service.list_accounts().await {
        Ok(accounts) => (
            StatusCode::OK,
            Json(AccountMapper::to_account_list_dto(accounts)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list accounts: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Get a single account
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "Account id")),
    responses(
        (status = 200, description = "The account", body = AccountResponse),
        (status = 404, description = "No account with this id", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /users/{}", raw_id);

    // A malformed id names no account
    let Ok(account_id) = raw_id.parse::<u64>() else {
        return ApiError::from(AccountError::NotFound).into_response();
    };

    match state.account_service.get_account(account_id).await {
        Ok(account) => {
            let response = AccountResponse {
                user: AccountMapper::to_dto(account),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to get account {}: {}", account_id, e);
            ApiError::from(e).into_response()
        }
    }
}
