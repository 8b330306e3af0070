//! Browser-facing server for toolshelf catalogue pages.
//!
//! `toolshelf-web` serves the listing and detail pages rendered by
//! [`toolshelf`], plus the static asset directory (stylesheet, screenshots)
//! and the catalogue JSON itself.
//!
//! # Quick start
//!
//! ```ignore
//! use toolshelf_web::{WebConfig, spawn_web};
//!
//! let config = WebConfig::default();
//! let addr = spawn_web(config).await?;
//! println!("Tool shelf: http://{addr}");
//! ```
//!
//! # Routes
//!
//! ```text
//! GET /, /index.html     listing page
//! GET /tool.html?slug=…  detail page
//! GET /assets/*          <static_dir>/assets
//! GET /data/*            <static_dir>/data
//! ```
//!
//! Each page request loads the catalogue once from [`WebConfig::data`].
//! There is no cache: editing the JSON file shows up on the next reload.

mod pages;
mod server;

pub use pages::AppState;
pub use server::{build_router, start_server};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use toolshelf::source_from_location;

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Catalogue location: a file path, or an `http(s)://` URL.
    /// Default: `static/data/tools.json`.
    pub data: String,
    /// Directory holding `assets/` and `data/`. Default: `static`.
    ///
    /// If `None`, only the two pages are served.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            data: "static/data/tools.json".to_string(),
            static_dir: Some(PathBuf::from("static")),
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(config: WebConfig) -> Result<SocketAddr, String> {
    let source = source_from_location(&config.data)
        .map_err(|e| format!("bad catalogue location {:?}: {e}", config.data))?;
    let state = AppState {
        source: Arc::from(source),
    };
    let router = build_router(state, config.static_dir);
    start_server(router, config.bind_addr).await
}
