//! List and validate configuration variables against a live server
//!
//! ```text
//! SIDECAR_API__API_TOKEN=... cargo run --example variables_demo -- --debug
//! ```

use clap::Parser;
use sidecar_client::{
    ApiClient, Config, ConfigurationVariable, ConfigurationVariableStore, LogNotifier,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "variables_demo",
    about = "List and validate sidecar configuration variables"
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load(args.config.as_deref())?;
    info!("Using API at {}", config.api.base_url);

    let client = ApiClient::new(&config.api)?;
    let store = ConfigurationVariableStore::new(client, Arc::new(LogNotifier));

    let subscription = store.subscribe(|variables| {
        info!("Cache updated: {} configuration variables", variables.len());
    });

    // Validation is side-effect free, so the demo can run against any server
    let candidate = ConfigurationVariable::new("demo_spool_dir", "Demo variable", "/var/spool/demo");
    let validation = store.validate(&candidate).await?;
    if validation.has_errors() {
        info!("Server rejected \"{}\": {:?}", candidate.name, validation.errors);
    } else {
        info!("Server would accept \"{}\"", candidate.name);
    }

    for variable in store.all().await? {
        info!("{}: {}", variable.name, variable.description);
    }

    store.unsubscribe(subscription);
    Ok(())
}
