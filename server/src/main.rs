
mod config;
mod interfaces;
mod standings;

use std::sync::Arc;

use clap::Parser;

use interfaces::http::{self, AppState};
use league::Registry;

use utils::error::*;
use utils::log;

///
/// A structure representing command line arguments.
///
#[derive(Parser)]
struct CLIArgs 
{
    #[clap(short, long, default_value = "config/config.toml")]
    config: String,

    /// Overrides the configured listen address.
    #[clap(short, long)]
    bind: Option<String>
}

#[tokio::main]
async fn main () -> Result<()>
{
    let args = CLIArgs::parse();

    let mut config = config::Config::load(& args.config)?;
    if let Some(bind) = args.bind 
    {
        config.server.bind = bind;
    }
    config.validate()?;

    let _logger = log::initialize(& config.log_path, "server", & config.log_level)?;

    let registry = Arc::new(Registry::from_config(& config.rating, & config.selection));
    let state = Arc::new(AppState::new(registry.clone()));
    log::info!("Selfplay service {} starting with {:?} selection.", state.instance, registry.policy());

    let router = http::create_router(state, & config.server.route_prefix);
    let listener = tokio::net::TcpListener::bind(& config.server.bind).await
        .with_context(|| format!("Could not bind '{}'.", config.server.bind))?;
    log::info!("Listening on {}.", config.server.bind);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed.")?;

    log::info!("Shut down with {} opponents.\n{}", registry.len(), standings::render(& registry.standings()));
    Ok(())
}

///
/// Resolves once the process is asked to stop.
///
async fn shutdown_signal ()
{
    if let Err(e) = tokio::signal::ctrl_c().await 
    {
        log::error!("Could not listen for shutdown: {}", e);
    }
}
