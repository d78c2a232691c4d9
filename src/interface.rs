use crate::vault::{SealStatus, VaultError};
use async_trait::async_trait;

/// Vault operations the unseal loop depends on
#[async_trait]
pub trait VaultInterface {
    /// Fetch the current seal status
    async fn seal_status(&self) -> Result<SealStatus, VaultError>;

    /// Submit one unseal key share
    async fn submit_unseal_key(&self, key: &str) -> Result<(), VaultError>;
}
