//! Backend entry-point: parses flags, loads the token secret, and starts
//! the HTTP server.

mod server;

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::web;
use clap::Parser;
use rand::RngCore as _;
use rand::rngs::OsRng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use backend::inbound::http::health::HealthState;
use server::{ServerConfig, create_server, load_token_secret, secret_fingerprint};

/// Command-line options for the backend server.
#[derive(Debug, Parser)]
#[command(name = "pimp-your-grill", about = "Pimp Your Grill backend API server")]
struct CliArgs {
    /// Socket address for the HTTP listener.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Worker thread count; defaults to the Actix heuristic.
    #[arg(long)]
    workers: Option<usize>,

    /// Path to the JWT signing secret; overrides TOKEN_SECRET_FILE.
    #[arg(long)]
    token_secret_file: Option<PathBuf>,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();

    let secret_path = args.token_secret_file.unwrap_or_else(|| {
        env::var("TOKEN_SECRET_FILE")
            .unwrap_or_else(|_| "/var/run/secrets/token_secret".into())
            .into()
    });
    let token_secret = match load_token_secret(&secret_path) {
        Ok(secret) => secret,
        Err(e) => {
            let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %secret_path.display(), error = %e, "using temporary token secret (dev only)");
                ephemeral_secret()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read token secret at {}: {e}",
                    secret_path.display()
                )));
            }
        }
    };
    info!(fingerprint = %secret_fingerprint(&token_secret), "token signing secret loaded");

    let mut config = ServerConfig::new(args.bind, token_secret);
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()));

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

/// Random secret for development runs with no mounted key file. Tokens
/// stop verifying across restarts, which is acceptable there.
fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = vec![0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    Zeroizing::new(bytes)
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    use actix_web_prom::PrometheusMetricsBuilder;

    PrometheusMetricsBuilder::new("pimp_your_grill")
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}
