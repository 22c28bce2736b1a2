//! Library server entry-point: loads settings, wires REST endpoints, and
//! serves OpenAPI docs in debug builds.

mod server;

use std::net::{IpAddr, SocketAddr};

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use library_backend::inbound::http::health::HealthState;
use library_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

fn bind_addr(settings: &AppSettings) -> std::io::Result<SocketAddr> {
    let ip: IpAddr = settings.host().parse().map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid host {:?}: {err}", settings.host()),
        )
    })?;
    Ok(SocketAddr::new(ip, settings.port()))
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

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let delete_policy = settings
        .spam_guard_policy()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    let config = ServerConfig::new(bind_addr(&settings)?, settings.data_dir())
        .with_delete_policy(delete_policy);
    info!(addr = %config.bind_addr(), "starting library server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
