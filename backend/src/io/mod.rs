//! # IO Module
//!
//! The adapter layer between HTTP clients and the domain. It maps JSON
//! bodies to domain commands, authenticates transfer requests, and converts
//! domain results and errors back into HTTP responses.

pub mod rest;

pub use rest::*;
