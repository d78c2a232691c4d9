//! vault-unsealer - keeps a HashiCorp Vault unsealed
//!
//! The crate polls a Vault server's seal status on a fixed interval and,
//! whenever the server reports itself sealed, submits every configured
//! unseal key share in order.
//!
//! ## Architecture
//!
//! - `config` module - loads the immutable [`Config`] once at startup
//! - `interface` module - the [`VaultInterface`] seam the loop talks to
//! - `vault` module - HTTP implementation of the interface
//! - `unsealer` module - the check / decide / unseal / sleep loop
//!
//! Errors during the loop are logged and swallowed. Only configuration
//! errors are fatal, and only at startup.

pub mod config;
pub mod interface;
pub mod unsealer;
pub mod vault;

pub use config::{load_config, Config, ConfigError, CONFIG_FILE};
pub use interface::VaultInterface;
pub use unsealer::{IterationOutcome, Unsealer, RECOVERY_DELAY};
pub use vault::{SealStatus, VaultClient, VaultError};

/// Initialize logging for tests
#[allow(dead_code)]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer() // This ensures output goes to both stdout and test output
        .try_init();
}
