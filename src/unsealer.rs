//! The unseal loop.
//!
//! Each iteration checks the seal status, submits every key share when the
//! vault is sealed, and then sleeps. A failed status check shortens the
//! sleep to [`RECOVERY_DELAY`]; otherwise the configured poll interval is
//! used. The loop never returns.

use crate::config::Config;
use crate::interface::VaultInterface;
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, error, info};

/// Delay before retrying after a failed status check.
pub const RECOVERY_DELAY: Duration = Duration::from_secs(5);

/// What a single iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// The status check failed; nothing was submitted.
    Failed,
    /// The vault reported itself unsealed.
    Unsealed,
    /// The vault was sealed and every key share was submitted.
    Submitted { accepted: usize, attempted: usize },
}

impl IterationOutcome {
    /// How long to sleep before the next status check.
    pub fn next_delay(&self, poll_interval: Duration) -> Duration {
        match self {
            IterationOutcome::Failed => RECOVERY_DELAY,
            _ => poll_interval,
        }
    }
}

pub struct Unsealer<'a, V> {
    config: &'a Config,
    vault: V,
}

impl<'a, V: VaultInterface> Unsealer<'a, V> {
    pub fn new(config: &'a Config, vault: V) -> Self {
        Self { config, vault }
    }

    /// Runs iterations forever.
    pub async fn run(&self) -> Infallible {
        info!(
            "Watching vault at {} every {}s with {} key share(s)",
            self.config.base_url,
            self.config.unseal_interval,
            self.config.sealed_keys.len()
        );

        loop {
            let outcome = self.run_once().await;
            let delay = outcome.next_delay(self.config.poll_interval());
            debug!("Next status check in {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }

    /// Performs one status check and, if needed, one round of key submissions.
    pub async fn run_once(&self) -> IterationOutcome {
        info!("Checking vault status...");
        let status = match self.vault.seal_status().await {
            Ok(status) => status,
            Err(e) => {
                error!("{}", e);
                return IterationOutcome::Failed;
            }
        };

        let outcome = if status.sealed {
            info!(
                "Vault is sealed (progress {}/{}), submitting key shares",
                status.progress,
                status
                    .t
                    .map_or_else(|| "?".to_string(), |t| t.to_string())
            );
            self.submit_key_shares().await
        } else {
            IterationOutcome::Unsealed
        };

        info!("Vault is OK.");
        outcome
    }

    async fn submit_key_shares(&self) -> IterationOutcome {
        let keys = &self.config.sealed_keys;
        let mut accepted = 0;

        for (index, key) in keys.iter().enumerate() {
            match self.vault.submit_unseal_key(key).await {
                Ok(()) => accepted += 1,
                Err(e) => error!("Key share {}/{}: {}", index + 1, keys.len(), e),
            }
        }

        // Reported regardless of the individual results; the next status
        // check is what tells whether the vault actually opened.
        info!("Vault was unsealed.");
        info!("{}/{} key share submissions reached the vault", accepted, keys.len());

        IterationOutcome::Submitted {
            accepted,
            attempted: keys.len(),
        }
    }
}
