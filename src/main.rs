// src/main.rs
use tracing_subscriber::EnvFilter;
use vault_unsealer::{load_config, Unsealer, VaultClient, CONFIG_FILE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match load_config(CONFIG_FILE) {
        Ok(config) => config,
        Err(err) => {
            println!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    let client = VaultClient::new(&config.base_url)?;
    match Unsealer::new(&config, client).run().await {}
}
