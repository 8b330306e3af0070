//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::pages::{self, AppState};

/// Build the full axum router.
///
/// The router serves:
/// - The listing page at `/` and `/index.html`
/// - The detail page at `/tool.html`
/// - Optional static files under `/assets` and `/data`
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    // Lets other origins load the catalogue JSON.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(pages::listing_page))
        .route("/index.html", get(pages::listing_page))
        .route("/tool.html", get(pages::detail_page))
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router
            .nest_service("/assets", ServeDir::new(dir.join("assets")))
            .nest_service("/data", ServeDir::new(dir.join("data")));
    }

    router.layer(cors)
}

/// Bind `bind_addr`, serve `router` on a Tokio task, and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> Result<SocketAddr, String> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("failed to bind {bind_addr}: {e}"))?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("failed to read bound address: {e}"))?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("server on {addr} stopped: {e}");
        }
    });

    info!("serving tool shelf on http://{addr}");
    Ok(addr)
}
