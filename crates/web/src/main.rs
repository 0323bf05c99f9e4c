use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;

use translit_common::{config::DEFAULT_CONFIG_FILE, Config};
use translit_web::server::WebServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::var("TRANSLIT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = Config::load(&config_path)?;

    // TRANSLIT_WEB_ADDR overrides [web].addr
    let web_addr: SocketAddr = match std::env::var("TRANSLIT_WEB_ADDR") {
        Ok(addr) => addr.parse()?,
        Err(_) => config.web.socket_addr()?,
    };

    let cfg = WebServerConfig::from_config(&config);

    info!(
        "Starting report server on http://{} (cases: {})",
        web_addr,
        cfg.static_data.display()
    );

    translit_web::server::serve(web_addr, cfg).await
}
