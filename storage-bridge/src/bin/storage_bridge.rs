//! Storage bridge binary entry point.
//!
//! Serves the host's storage ports over stdin/stdout as JSON lines.
//! Logs go to stderr so they never mix with responses.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result};
    use clap::Parser;
    use std::path::PathBuf;
    use std::sync::Arc;
    use storage_bridge::config::{BridgeConfig, ConfigOverrides, StorageBackend};
    use storage_bridge::infrastructure::{open_storage, HtmlEscapeHighlighter};
    use storage_bridge::presentation::{HostBootstrap, StdioTransport};
    use tokio::io::BufReader;
    use tracing_subscriber::EnvFilter;

    /// Storage bridge CLI arguments.
    #[derive(Parser, Debug)]
    #[command(name = "storage-bridge")]
    #[command(about = "Key/value storage bridge for host application ports")]
    struct Args {
        /// TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Storage backend (memory, sled). Overrides the configuration file.
        #[arg(short, long)]
        backend: Option<StorageBackend>,

        /// Database directory for the sled backend. Overrides the configuration file.
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Log level (trace, debug, info, warn, error). Overrides the configuration file.
        #[arg(long)]
        log_level: Option<String>,
    }

    pub async fn run() -> Result<()> {
        let args = Args::parse();

        let mut config = match &args.config {
            Some(path) => BridgeConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => BridgeConfig::default(),
        };
        config.apply_overrides(ConfigOverrides {
            backend: args.backend,
            data_dir: args.data_dir,
            log_level: args.log_level,
        });

        // Initialize tracing
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(&config.runtime.log_level)),
            )
            .init();

        tracing::info!("Starting storage bridge");
        tracing::info!("Storage backend: {:?}", config.storage.backend);
        if config.storage.backend == StorageBackend::Sled {
            tracing::info!("Storage path: {:?}", config.storage.path);
        }

        let storage = open_storage(&config.storage).context("Failed to open storage")?;
        let bindings = HostBootstrap::new(storage)
            .with_highlighter(Arc::new(HtmlEscapeHighlighter))
            .start()
            .context("Failed to attach storage bridge to host ports")?;

        let transport =
            StdioTransport::new(bindings.hub).context("Failed to listen on response port")?;

        transport
            .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
            .context("Storage bridge transport failed")?;

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
