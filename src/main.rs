use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info};

use rxledger::api::rest::RestApi;
use rxledger::config::{load_config, Config};
use rxledger::ops::Ledger;
use rxledger::store::MemoryStore;
use rxledger::RxError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let config_path = Path::new("config.yaml");
    let config = if config_path.exists() {
        load_config(config_path).map_err(RxError::from)?
    } else {
        info!("config.yaml not found, using built-in defaults");
        Config::default()
    };

    // Open the store against its snapshot directory when one is configured.
    let store = match &config.store.path {
        Some(path) => MemoryStore::open(path).map_err(RxError::from)?,
        None => MemoryStore::new(),
    };

    let ledger = Arc::new(Ledger::new(store, config.ledger.clone()));
    let api = RestApi::new(Arc::clone(&ledger));

    info!(host = %config.api.host, port = config.api.port, "starting ledger API");

    // Set up server with graceful shutdown
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let routes = api.routes();
    let addr: std::net::SocketAddr = format!("{}:{}", config.api.host, config.api.port).parse()?;

    let (_, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async move {
        shutdown_rx.await.ok();
        info!("shutting down server");
    });

    let server_handle = tokio::spawn(server);

    // Wait for Ctrl+C
    signal::ctrl_c().await?;
    info!("ctrl-c received, starting graceful shutdown");

    shutdown_tx.send(()).ok();
    server_handle.await?;

    // Flush entries to the snapshot before exiting
    if let Err(e) = ledger.store().flush() {
        error!("failed to flush store: {}", e);
    } else {
        info!("store flushed");
    }

    Ok(())
}
