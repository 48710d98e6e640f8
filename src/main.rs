//! visitor-conf: load, inspect and hot-reload visitor configuration.
//!
//! # Commands
//! - `check <file>`: build every visitor, exit non-zero on the first error
//! - `show <file>`: print the decorated visitors as JSON
//! - `watch <file>`: keep the visitor set current as the file changes

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use visitor_conf::config::watcher::ConfigWatcher;
use visitor_conf::config::{load_config, ClientConfig, VisitorStore};
use visitor_conf::observability::logging::init_logging;
use visitor_conf::registry;

#[derive(Parser)]
#[command(name = "visitor-conf")]
#[command(about = "Load and validate tunnel visitor configuration", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is unset.
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every visitor in the file
    Check { path: PathBuf },
    /// Print the decorated visitors as JSON
    Show { path: PathBuf },
    /// Reload visitors whenever the file changes
    Watch { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Check { path } => {
            let config = load(&path)?;
            println!(
                "{}: {} visitor(s) OK (types: {})",
                path.display(),
                config.visitors.len(),
                registry::visitor_types().collect::<Vec<_>>().join(", ")
            );
        }
        Commands::Show { path } => {
            let config = load(&path)?;
            println!("{}", serde_json::to_string_pretty(&render(&config))?);
        }
        Commands::Watch { path } => watch(&path).await?,
    }

    Ok(())
}

fn load(path: &Path) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    load_config(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to load configuration");
        e.into()
    })
}

fn render(config: &ClientConfig) -> Value {
    let visitors: serde_json::Map<String, Value> = config
        .visitors
        .iter()
        .map(|(name, conf)| (name.clone(), json!(conf.base_info())))
        .collect();

    json!({
        "common": config.common,
        "visitors": visitors,
    })
}

async fn watch(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load(path)?;
    let store = VisitorStore::new(config.visitors);

    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(new_config) = updates.recv() => {
                let changes = store.reload(new_config.visitors);
                tracing::info!(
                    added = changes.added.len(),
                    removed = changes.removed.len(),
                    changed = changes.changed.len(),
                    total = store.load().len(),
                    "Visitors reloaded"
                );
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
