//! In-memory storage backend.
//!
//! Every table lives behind a `tokio::sync::RwLock`, which makes each
//! individual repository call atomic. Multi-call sequences (such as a
//! transfer's two balance writes and ledger append) are serialized by the
//! domain layer, not here.

pub mod account_repository;
pub mod connection;
pub mod transfer_repository;

#[cfg(test)]
pub mod test_utils;

pub use account_repository::AccountRepository;
pub use connection::MemoryConnection;
pub use transfer_repository::TransferRepository;
