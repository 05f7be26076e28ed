//! # REST API for Transfers
//!
//! Every endpoint here sits behind [`super::auth::require_auth`]; the
//! authenticated account is always the source of a new transfer.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use tracing::{error, info};

use super::error::ApiError;
use super::mappers::TransferMapper;
use crate::domain::Claims;
use crate::AppState;
use shared::{CreateTransferRequest, CreateTransferResponse, ErrorResponse, TransferListResponse};

/// Send money from the authenticated account
#[utoipa::path(
    post,
    path = "/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 201, description = "Transfer completed", body = CreateTransferResponse),
        (status = 400, description = "Transfer rejected by a business rule", body = ErrorResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Transfers"
)]
pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreateTransferRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };
    info!("POST /transfers - from {} request: {:?}", claims.user_id, request);

    let command = TransferMapper::to_create_command(request);
    match state
        .transfer_service
        .create_transfer(claims.user_id, command)
        .await
    {
        Ok(transfer) => {
            let response = CreateTransferResponse {
                message: "Transfer completed successfully".to_string(),
                transfer: TransferMapper::to_dto(transfer),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Transfer from {} failed: {}", claims.user_id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Transfers the authenticated account sent or received
#[utoipa::path(
    get,
    path = "/transfers/my",
    responses(
        (status = 200, description = "Transfers involving the caller, oldest first", body = TransferListResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Transfers"
)]
pub async fn list_my_transfers(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    info!("GET /transfers/my - account {}", claims.user_id);

    match state
        .transfer_service
        .transfers_for_account(claims.user_id)
        .await
    {
        Ok(transfers) => (
            StatusCode::OK,
            Json(TransferMapper::to_transfer_list_dto(transfers)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list transfers for {}: {}", claims.user_id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// The whole ledger
#[utoipa::path(
    get,
    path = "/transfers",
    responses(
        (status = 200, description = "Every transfer, oldest first", body = TransferListResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Transfers"
)]
pub async fn list_transfers(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /transfers");

    match state.transfer_service.all_transfers().await {
        Ok(transfers) => (
            StatusCode::OK,
            Json(TransferMapper::to_transfer_list_dto(transfers)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list transfers: {}", e);
            ApiError::from(e).into_response()
        }
    }
}
