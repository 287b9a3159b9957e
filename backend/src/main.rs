//! Backend entry-point: wires the eco-action endpoint, health probes, and
//! OpenAPI docs.

use actix_web::web;
use clap::Parser;
use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::server::{app_config_from_env, create_server};

/// Command-line overrides for the server.
#[derive(Parser)]
#[command(name = "backend", about = "Eco-action logging API server")]
struct Cli {
    /// Socket address to bind, overriding the BIND_ADDR variable.
    #[arg(long)]
    bind: Option<std::net::SocketAddr>,
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

    let cli = Cli::parse();
    let mut config = app_config_from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
