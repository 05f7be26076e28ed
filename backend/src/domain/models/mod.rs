//! Domain models shared by the services and the storage layer.

pub mod account;
pub mod transfer;

pub use account::*;
pub use transfer::*;
