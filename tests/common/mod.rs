//! Shared fixtures for the integration tests.
//!
//! `VaultStub` is a tiny HTTP/1.1 server that answers the two endpoints the
//! agent uses and records every request it receives. `setup_vault_container`
//! starts a real, uninitialized Vault for the ignored end-to-end tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::info;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub struct VaultStub {
    pub addr: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl VaultStub {
    /// Starts a stub whose seal-status endpoint always answers `status_body`.
    pub async fn start(status_body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let status_body = status_body.to_string();
        let recorded = requests.clone();
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let recorded = recorded.clone();
                let status_body = status_body.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, &status_body, &recorded).await;
                });
            }
        });

        VaultStub {
            addr,
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn unseal_bodies(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "PUT" && r.path == "/v1/sys/unseal")
            .map(|r| r.body)
            .collect()
    }
}

impl Drop for VaultStub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    mut stream: TcpStream,
    status_body: &str,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    let (status_line, response_body) = match (method.as_str(), path.as_str()) {
        ("GET", "/v1/sys/seal-status") => ("200 OK", status_body.to_string()),
        ("PUT", "/v1/sys/unseal") => ("200 OK", r#"{"sealed":true,"progress":1}"#.to_string()),
        _ => ("404 Not Found", r#"{"errors":[]}"#.to_string()),
    };

    recorded.lock().unwrap().push(RecordedRequest { method, path, body });

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        response_body.len(),
        response_body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Returns an address nothing is listening on.
pub async fn closed_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Starts an uninitialized Vault server with file storage.
pub async fn setup_vault_container() -> ContainerAsync<GenericImage> {
    let vault_local_config = r#"
    {"storage": {"file": {"path": "/vault/file"}},
     "listener": [{"tcp": { "address": "0.0.0.0:8200", "tls_disable": true}}],
     "default_lease_ttl": "168h", "max_lease_ttl": "720h", "ui": true}
    "#;

    let container = GenericImage::new("hashicorp/vault", "1.13.3")
        .with_exposed_port(8200.tcp())
        .with_wait_for(WaitFor::message_on_stdout("Vault server started!"))
        .with_env_var("VAULT_LOCAL_CONFIG", vault_local_config)
        .with_cmd(vec!["server"])
        .with_cap_add("IPC_LOCK")
        .start()
        .await
        .expect("Failed to start container");
    info!("Vault container started");
    container
}
