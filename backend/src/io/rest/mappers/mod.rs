//! Mappers between domain models and the DTOs in the `shared` crate.

pub mod account_mapper;
pub mod transfer_mapper;

pub use account_mapper::AccountMapper;
pub use transfer_mapper::TransferMapper;
