//! # Domain Module
//!
//! Contains the business logic for accounts and money transfers.
//!
//! The domain operates on the storage traits only; it does not know whether
//! accounts live in memory or anywhere else, and it never sees HTTP or tokens
//! in transit. The REST layer authenticates callers and hands the resulting
//! account id inward.
//!
//! ## Module Organization
//!
//! - **models**: Accounts, ledger entries and their error types
//! - **commands**: Input types the services accept
//! - **account_service**: Registration, login and account lookup
//! - **transfer_service**: The transfer engine and ledger queries
//! - **credentials**: Password hashing behind the `CredentialHasher` trait
//! - **session**: Signing and verifying session tokens
//! - **account_locks**: Per-account locks serializing balance mutation
//!
//! ## Business Rules
//!
//! - New accounts start with a zero balance
//! - Emails are unique across accounts
//! - Transfer amounts must be strictly positive
//! - An account cannot transfer to itself
//! - A transfer never leaves the source balance negative
//! - Accounts that are not favored receive at most 5000 per transfer

pub mod account_locks;
pub mod account_service;
pub mod commands;
pub mod credentials;
pub mod models;
pub mod session;
pub mod transfer_service;

pub use account_locks::AccountLocks;
pub use account_service::AccountService;
pub use credentials::{Argon2Hasher, CredentialError, CredentialHasher};
pub use session::{AuthError, Claims, TokenService};
pub use transfer_service::TransferService;
