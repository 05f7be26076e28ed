//! # REST API Interface Layer
//!
//! Axum handlers for accounts and transfers. Handlers hold no business logic:
//! they log the request, call one service method and translate the outcome.
//!
//! - `account_apis`: registration, login, account lookup
//! - `transfer_apis`: creating transfers and reading the ledger
//! - `auth`: bearer token middleware for the transfer routes
//! - `error`: domain error to status code translation
//! - `docs`: OpenAPI document served through Swagger UI

pub mod account_apis;
pub mod auth;
pub mod docs;
pub mod error;
pub mod health_apis;
pub mod mappers;
pub mod transfer_apis;

pub use account_apis::*;
pub use auth::require_auth;
pub use docs::ApiDoc;
pub use error::ApiError;
pub use health_apis::*;
pub use transfer_apis::*;
