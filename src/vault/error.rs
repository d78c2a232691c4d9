#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to build request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Error while sending request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Error reading response: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Error parsing JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl VaultError {
    /// Whether the error happened before the vault produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, VaultError::Transport(_))
    }
}
