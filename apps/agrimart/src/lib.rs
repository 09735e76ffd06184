//! # Agrimart
//!
//! Server and CLI over the `agrimart-core` query engine.
//!
//! - [`api`]: axum REST API over one shared browsing session
//! - [`cli`]: clap commands over a catalog file
//! - [`config`]: `agrimart.toml` and `AGRIMART_*` settings

pub mod api;
pub mod cli;
pub mod config;
