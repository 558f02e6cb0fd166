//! mtb-site front door.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                   MTB-SITE                    │
//!                    │                                               │
//!   Client Request   │  ┌──────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│ listener │──▶│   http   │──▶│   route   │  │
//!                    │  │          │   │  server  │   │   table   │  │
//!                    │  └──────────┘   └──────────┘   └─────┬─────┘  │
//!                    │                                      │        │
//!                    │          admin/, django_ckeditor_5/, │ media/ │
//!                    │          root                        │ static/│
//!                    │              ▼                       ▼        │
//!                    │       ┌─────────────┐        ┌─────────────┐  │
//!                    │       │   forward   │        │    files    │  │
//!                    │       │  upstream   │        │ MEDIA_ROOT  │  │
//!                    │       └─────────────┘        └─────────────┘  │
//!                    └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use mtb_site::config;
use mtb_site::lifecycle::{signals, startup, Shutdown};
use mtb_site::observability::logging;

#[derive(Parser)]
#[command(name = "mtb-site")]
#[command(about = "Front door for the site: admin, editor, app and media routes", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        debug = config.debug,
        media_url = %config.media.url,
        media_root = %config.media.root,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    if let Err(e) = startup::run(config, shutdown).await {
        tracing::error!(error = %e, "Startup failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
