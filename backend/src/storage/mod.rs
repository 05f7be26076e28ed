//! # Storage Module
//!
//! Handles all data persistence operations for the transfer service.
//!
//! The domain layer only ever talks to the traits in [`traits`]; the concrete
//! backend is chosen when the application state is assembled. The shipped
//! backend keeps everything in process memory, so all state is lost on
//! restart.
//!
//! ## Key Responsibilities
//!
//! - **Account Store**: account records and the canonical balance of each account
//! - **Ledger Store**: the append-only list of completed transfers
//! - **Storage Abstraction**: a `Connection` that hands out repositories, so a
//!   durable backend can replace the in-memory one without touching the domain

pub mod error;
pub mod memory;
pub mod traits;

pub use error::StorageError;
pub use memory::MemoryConnection;
pub use traits::{AccountStorage, Connection, TransferStorage};
