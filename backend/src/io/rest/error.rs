//! Translation of domain failures into HTTP responses.
//!
//! Every failure body is an [`ErrorResponse`] carrying a human readable
//! reason and the stable tag from the domain error's `code()`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::error;

use crate::domain::models::{AccountError, TransferError};
use crate::domain::AuthError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(error, code),
        }
    }

    /// Attach a hint telling the caller how to recover
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body = self.body.with_message(message);
        self
    }

    /// Keep the body, answer with a different status
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> Option<&str> {
        self.body.code.as_deref()
    }

    fn internal(code: &str, cause: &dyn std::fmt::Display) -> Self {
        error!("Internal failure ({}): {}", code, cause);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        let status = match &e {
            AccountError::MissingFields(_) | AccountError::DuplicateIdentity(_) => {
                StatusCode::BAD_REQUEST
            }
            AccountError::NotFound => StatusCode::NOT_FOUND,
            AccountError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AccountError::Credential(_) | AccountError::Token(_) | AccountError::Storage(_) => {
                return Self::internal(e.code(), &e)
            }
        };
        Self::new(status, e.to_string(), e.code())
    }
}

impl From<TransferError> for ApiError {
    fn from(e: TransferError) -> Self {
        if e.is_rejection() {
            Self::new(StatusCode::BAD_REQUEST, e.to_string(), e.code())
        } else {
            Self::internal(e.code(), &e)
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken => {
                Self::new(StatusCode::UNAUTHORIZED, e.to_string(), "MISSING_TOKEN")
                    .with_message("Send a valid JWT in the Authorization header as `Bearer <token>`")
            }
            AuthError::InvalidToken(_) => {
                Self::new(StatusCode::FORBIDDEN, e.to_string(), "INVALID_TOKEN")
                    .with_message("The token is invalid or has expired; log in again")
            }
            AuthError::Signing(_) => Self::internal("TOKEN_ERROR", &e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text(), "INVALID_BODY")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use axum::body::to_bytes;
    use rust_decimal_macros::dec;

    async fn body_of(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_transfer_rejections_are_bad_requests() {
        let (status, body) = body_of(
            TransferError::InsufficientFunds {
                available: dec!(10),
                requested: dec!(20),
            }
            .into(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code.as_deref(), Some("INSUFFICIENT_FUNDS"));
        assert!(body.error.contains("Insufficient funds"));
    }

    #[tokio::test]
    async fn test_storage_failures_hide_details() {
        let (status, body) = body_of(
            TransferError::Storage(StorageError::Unavailable("disk on fire".to_string())).into(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code.as_deref(), Some("STORAGE_ERROR"));
        assert!(!body.error.contains("disk on fire"));
    }

    #[test]
    fn test_account_error_statuses() {
        let cases = [
            (AccountError::MissingFields("x"), StatusCode::BAD_REQUEST),
            (
                AccountError::DuplicateIdentity("a@example.com".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (AccountError::NotFound, StatusCode::NOT_FOUND),
            (AccountError::InvalidCredential, StatusCode::UNAUTHORIZED),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status(), expected);
        }
    }

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(ApiError::from(AuthError::MissingToken).status(), StatusCode::UNAUTHORIZED);

        let bad = jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidToken);
        let api_error = ApiError::from(AuthError::InvalidToken(bad));
        assert_eq!(api_error.status(), StatusCode::FORBIDDEN);
        assert_eq!(api_error.code(), Some("INVALID_TOKEN"));
    }

    #[tokio::test]
    async fn test_auth_errors_explain_how_to_recover() {
        let (_, missing) = body_of(AuthError::MissingToken.into()).await;
        assert!(missing.message.unwrap().contains("Authorization"));

        let bad = jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature);
        let (_, invalid) = body_of(AuthError::InvalidToken(bad).into()).await;
        assert!(invalid.message.unwrap().contains("log in again"));

        let (_, rejection) = body_of(TransferError::SelfTransfer.into()).await;
        assert!(rejection.message.is_none());
    }

    #[test]
    fn test_with_status_keeps_code() {
        let error = ApiError::from(AccountError::NotFound).with_status(StatusCode::UNAUTHORIZED);
        assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.code(), Some("NOT_FOUND"));
    }
}
