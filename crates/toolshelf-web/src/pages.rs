//! Page handlers.
//!
//! Every request renders a fresh [`Page`] shell against the configured
//! catalogue source. Missing or unknown slugs are still `200 OK`: the page
//! itself carries the message.

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::response::Html;
use toolshelf::{CatalogueSource, Page, render_page};
use tracing::info;
use url::form_urlencoded;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CatalogueSource>,
}

/// GET / and /index.html — the card grid.
pub async fn listing_page(State(app): State<AppState>) -> Html<String> {
    let mut page = Page::listing();
    render_page(&mut page, None, app.source.as_ref()).await;
    Html(page.to_html())
}

/// GET /tool.html?slug=… — one tool's detail view.
pub async fn detail_page(State(app): State<AppState>, RawQuery(query): RawQuery) -> Html<String> {
    let slug = first_slug(query.as_deref());
    info!("detail page requested for {slug:?}");
    let mut page = Page::detail();
    render_page(&mut page, slug.as_deref(), app.source.as_ref()).await;
    Html(page.to_html())
}

/// First `slug` value in a query string. Later repeats are ignored.
fn first_slug(query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "slug")
        .map(|(_, value)| value.into_owned())
}
