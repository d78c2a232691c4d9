//! Seal status as reported by `sys/seal-status`

use serde::{Deserialize, Serialize};

/// The part of Vault's seal-status response the agent reads.
///
/// Vault returns many more fields (`type`, `initialized`, `version`, ...);
/// they are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealStatus {
    pub sealed: bool,
    /// Shares accepted so far toward the threshold
    #[serde(default)]
    pub progress: u32,
    /// Unseal threshold, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<u32>,
    /// Total number of key shares, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
}

impl SealStatus {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
