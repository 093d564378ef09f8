use std::{path::Path, time::Duration};

use anyhow::{Result, anyhow};
use movies_app::{contract::MovieResponse, rest_api::envelope::Envelope};
use movies_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::TempDir;
use tracing::debug;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str, base_dir: &Path) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix_in(format!("{}_", test_name), base_dir)?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let args = &[
        "movies-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
        "--cache-ttl",
        "10m",
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let base_dir = std::env::temp_dir();
    test_config(test_name, &base_dir)
}

/// Starts server in background and waits until it responds to health check
pub async fn spawn_server(args: ServerConfig) -> Result<Url> {
    let base_url = Url::parse(&args.base_url())?;
    tokio::spawn(async move {
        if let Err(e) = movies_server::run::run(args).await {
            tracing::error!("Server failed: {e}");
        }
    });

    let health = base_url.join("health")?;
    let client = reqwest::Client::new();
    for _ in 0..50 {
        match client.get(health.clone()).send().await {
            Ok(response) if response.status().is_success() => return Ok(base_url),
            Ok(_) | Err(_) => tokio::time::sleep(Duration::from_millis(100)).await,
        }
    }
    Err(anyhow!("Server did not start at {base_url}"))
}

pub async fn launch_env(test_name: &str) -> Result<(Url, ConfigGuard)> {
    let (args, guard) = prepare_env(test_name).await?;
    let base_url = spawn_server(args).await?;
    debug!("Server running at {base_url}");
    Ok((base_url, guard))
}

/// base_url always ends with slash, path must be relative
pub fn extend_url(base_url: &Url, path: &str) -> String {
    format!("{base_url}{path}")
}

/// Sends request and decodes response envelope
pub async fn call<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<(u16, Envelope<T>)> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let envelope: Envelope<T> = response.json().await?;
    Ok((status, envelope))
}

pub async fn create_movie(
    client: &reqwest::Client,
    base_url: &Url,
    payload: Value,
) -> Result<MovieResponse> {
    let (status, envelope) =
        call::<MovieResponse>(client.post(extend_url(base_url, "movies")).json(&payload)).await?;
    if status != 200 {
        return Err(anyhow!("Create failed with {status}: {:?}", envelope.error));
    }
    envelope.data.ok_or_else(|| anyhow!("Missing data"))
}
