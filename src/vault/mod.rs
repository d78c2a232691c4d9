//! Vault HTTP access
//!
//! Implements [`crate::interface::VaultInterface`] over the Vault HTTP API.
//!
//! ## Testing strategy:
//! - Unit tests live next to the code in `#[cfg(test)] mod tests` blocks
//! - Integration tests in `tests/` run the client against an in-process
//!   HTTP stub, and optionally against a Docker container

pub mod client;
pub mod error;
pub mod status;

pub use client::VaultClient;
pub use error::VaultError;
pub use status::SealStatus;
