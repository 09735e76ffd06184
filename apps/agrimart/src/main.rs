//! # Agrimart - Farm Produce Catalog Server
//!
//! The main binary for the Agrimart catalog query engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for searching a catalog file
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │           apps/agrimart (THE BINARY)          │
//! │                                               │
//! │   ┌─────────────┐        ┌─────────────┐      │
//! │   │    CLI      │        │  HTTP API   │      │
//! │   │   (clap)    │        │   (axum)    │      │
//! │   └──────┬──────┘        └──────┬──────┘      │
//! │          └───────────┬──────────┘             │
//! │                      ▼                        │
//! │             ┌─────────────────┐               │
//! │             │  agrimart-core  │               │
//! │             │   (THE LOGIC)   │               │
//! │             └─────────────────┘               │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! agrimart --catalog demos/catalog.json serve --port 8080
//!
//! # CLI operations
//! agrimart -C demos/catalog.json search -s tomato --sort price-asc
//! agrimart -C demos/catalog.json facets --organic
//! agrimart -C demos/catalog.json validate
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // AGRIMART_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("AGRIMART_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agrimart=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = agrimart::cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = agrimart::cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Agrimart startup banner.
fn print_banner() {
    println!(
        r#"
   ___              _                      __
  / _ | ___ _____  (_)_ _  ___ _____ ____ / /_
 / __ |/ _ `/ __/ / /  ' \/ _ `/ __// __// __/
/_/ |_|\_, /_/   /_/_/_/_/\_,_/_/   \__/ \__/
      /___/

  Farm Produce Catalog v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
