//! Pure formatting helpers shared by the listing and detail pages.

use std::sync::LazyLock;

use regex::Regex;
use url::{ParseError, Url};
use url::form_urlencoded::byte_serialize;

use crate::catalogue::Tool;

/// Currency unit appended to listing price labels.
pub const CURRENCY: &str = "EUR";

/// Directory tool screenshots are served from.
pub const ASSET_DIR: &str = "assets";

/// Path of the detail page, relative to the listing page.
pub const DETAIL_PAGE: &str = "tool.html";

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

static SHORT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]+)").unwrap());

static WATCH_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/watch\?(?:[^#]*&)?v=([A-Za-z0-9_-]+)").unwrap()
});

/// Integers render without a decimal point, everything else with exactly
/// two decimals.
pub fn format_price(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value}")
    } else {
        format!("{value:.2}")
    }
}

/// Listing label: `"Free"` or `"<amount> EUR"`.
pub fn price_label(tool: &Tool) -> String {
    match paid_price(tool) {
        Some(p) => format!("{} {CURRENCY}", format_price(p)),
        None => "Free".to_string(),
    }
}

/// Detail-page price line: `"Free"` or `"Price: <amount>"`.
pub fn price_line(tool: &Tool) -> String {
    match paid_price(tool) {
        Some(p) => format!("Price: {}", format_price(p)),
        None => "Free".to_string(),
    }
}

/// Purchase button label: `"Buy"` or `"Buy (<amount>)"`.
pub fn buy_label(tool: &Tool) -> String {
    match paid_price(tool) {
        Some(p) => format!("Buy ({})", format_price(p)),
        None => "Buy".to_string(),
    }
}

fn paid_price(tool: &Tool) -> Option<f64> {
    tool.price().filter(|p| *p > 0.0)
}

/// Rewrite a video URL into its embeddable form.
///
/// Embed URLs pass through, short links and `watch?v=` links are rewritten
/// around the extracted id, and anything unrecognized is returned as-is.
pub fn video_embed_url(url: &str) -> String {
    if url.contains("/embed/") {
        return url.to_string();
    }
    let id = SHORT_LINK
        .captures(url)
        .or_else(|| WATCH_LINK.captures(url))
        .and_then(|c| c.get(1));
    match id {
        Some(id) => format!("{EMBED_BASE}{}", id.as_str()),
        None => url.to_string(),
    }
}

/// Link from a listing card to the tool's detail page.
pub fn detail_href(slug: &str) -> String {
    let encoded: String = byte_serialize(slug.as_bytes()).collect();
    format!("{DETAIL_PAGE}?slug={encoded}")
}

/// Path of a screenshot inside the asset directory.
pub fn asset_path(image: &str) -> String {
    format!("{ASSET_DIR}/{}", image.trim_start_matches('/'))
}

/// Normalize a catalogue URL for outbound links and embeds.
///
/// Explicit `http`/`https` URLs pass through. Scheme-less host paths such as
/// `youtu.be/abc123` get `https://`. Any other explicit scheme
/// (`javascript:`, `data:`, ...) and root-relative paths are rejected.
pub fn external_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https").then(|| raw.to_string()),
        Err(ParseError::RelativeUrlWithoutBase) if !raw.is_empty() && !raw.starts_with('/') => {
            Url::parse(&format!("https://{raw}")).ok().map(String::from)
        }
        Err(_) => None,
    }
}
