//! # Transfer Backend
//!
//! Accounts and money transfers behind a JSON REST API.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST handlers, auth middleware, DTO mappers)
//!     ↓
//! Domain Layer (account service, transfer engine, sessions)
//!     ↓
//! Storage Layer (Connection + repository traits, in-memory backend)
//! ```
//!
//! All state lives in process memory and is lost on restart.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::domain::{AccountService, Argon2Hasher, CredentialHasher, TokenService, TransferService};
use crate::io::rest::{self, ApiError};
use crate::storage::MemoryConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService<MemoryConnection>,
    pub transfer_service: TransferService<MemoryConnection>,
    pub token_service: TokenService,
}

impl AppState {
    pub fn new(
        connection: MemoryConnection,
        hasher: Arc<dyn CredentialHasher>,
        token_service: TokenService,
    ) -> Self {
        let connection = Arc::new(connection);
        Self {
            account_service: AccountService::new(
                connection.clone(),
                hasher,
                token_service.clone(),
            ),
            transfer_service: TransferService::new(connection),
            token_service,
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> AppState {
    info!("Setting up in-memory storage");
    let connection = MemoryConnection::new();

    info!("Setting up domain services");
    let token_service = TokenService::new(&config.jwt_secret, config.jwt_ttl);
    AppState::new(connection, Arc::new(Argon2Hasher::new()), token_service)
}

async fn route_not_found() -> impl IntoResponse {
    ApiError::new(StatusCode::NOT_FOUND, "Route not found", "NOT_FOUND")
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    match origin.parse::<HeaderValue>() {
        Ok(origin) if origin != "*" => cors.allow_origin(origin),
        Ok(_) => cors.allow_origin(Any),
        Err(e) => {
            warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
            cors
        }
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let transfer_routes = Router::new()
        .route(
            "/transfers",
            get(rest::list_transfers).post(rest::create_transfer),
        )
        .route("/transfers/my", get(rest::list_my_transfers))
        .route_layer(from_fn_with_state(
            app_state.token_service.clone(),
            rest::require_auth,
        ));

    let account_routes = Router::new()
        .route(
            "/users",
            get(rest::list_accounts).post(rest::register_account),
        )
        .route("/users/login", post(rest::login))
        .route("/users/:id", get(rest::get_account));

    Router::new()
        .route("/health", get(rest::health_check))
        .merge(account_routes)
        .merge(transfer_routes)
        .fallback(route_not_found)
        .with_state(app_state)
        .merge(SwaggerUi::new("/api-docs").url("/openapi.json", rest::ApiDoc::openapi()))
        .layer(cors_layer(&config.cors_origin))
        .layer(TraceLayer::new_for_http())
}
