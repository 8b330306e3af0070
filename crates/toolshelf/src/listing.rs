//! Catalogue grid page.

use tracing::debug;

use crate::catalogue::Tool;
use crate::dom::{Element, media};
use crate::format::{asset_path, detail_href, price_label};
use crate::source::{CatalogueSource, fetch_catalogue};

/// `id` of the container the listing renders into.
pub const LISTING_CONTAINER_ID: &str = "tools-grid";

/// Shown instead of cards when the catalogue is empty or could not be loaded.
pub const NO_TOOLS_MESSAGE: &str = "No tools available yet.";

/// Fetch the catalogue and render one card per tool into `container`.
///
/// No-op when `container` is `None`. The container is cleared first, so
/// repeated calls do not accumulate cards.
pub async fn render_listing(container: Option<&mut Element>, source: &dyn CatalogueSource) {
    let Some(container) = container else {
        return;
    };
    container.clear();
    let tools = fetch_catalogue(source).await;
    fill_listing(container, &tools);
}

/// Render already-loaded `tools` into `container`, in source order.
pub fn fill_listing(container: &mut Element, tools: &[Tool]) {
    if tools.is_empty() {
        container.push(Element::new("p").class("empty").text(NO_TOOLS_MESSAGE));
        return;
    }
    debug!("rendering {} tool card(s)", tools.len());
    for tool in tools {
        container.push(tool_card(tool));
    }
}

/// Clickable card linking to the tool's detail page.
pub fn tool_card(tool: &Tool) -> Element {
    let mut card = Element::new("a")
        .class("tool-card")
        .attr("href", detail_href(&tool.slug));
    if let Some(image) = tool.image() {
        card.push(media(&asset_path(image), &tool.name));
    }
    card.child(Element::new("h2").text(&tool.name))
        .child(
            Element::new("p")
                .class("tagline")
                .text(tool.tagline.as_deref().unwrap_or("")),
        )
        .child(Element::new("span").class("price").text(price_label(tool)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;

    fn container() -> Element {
        Element::new("div").id(LISTING_CONTAINER_ID)
    }

    fn slug_of(card: &Element) -> String {
        let href = card.attr_value("href").unwrap();
        let query = href.strip_prefix("tool.html?").unwrap();
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == "slug")
            .map(|(_, v)| v.into_owned())
            .unwrap()
    }

    #[tokio::test]
    async fn absent_container_is_a_no_op() {
        render_listing(None, &StaticSource::new("[]")).await;
    }

    #[tokio::test]
    async fn empty_catalogue_shows_message() {
        let mut grid = container();
        render_listing(Some(&mut grid), &StaticSource::new("[]")).await;
        assert_eq!(grid.children().len(), 1);
        assert_eq!(grid.text_content(), NO_TOOLS_MESSAGE);
    }

    #[tokio::test]
    async fn failed_fetch_shows_message() {
        let mut grid = container();
        render_listing(Some(&mut grid), &StaticSource::new("<html>oops")).await;
        assert_eq!(grid.text_content(), NO_TOOLS_MESSAGE);
    }

    #[tokio::test]
    async fn one_card_per_tool_in_source_order() {
        let source = StaticSource::new(
            r#"[
                {"slug": "zeta", "name": "Zeta"},
                {"slug": "a b/c?&", "name": "Weird"},
                {"slug": "alpha", "name": "Alpha"}
            ]"#,
        );
        let mut grid = container();
        render_listing(Some(&mut grid), &source).await;

        let cards = grid.find_by_class("tool-card");
        assert_eq!(cards.len(), 3);
        let slugs: Vec<String> = cards.iter().map(|c| slug_of(c)).collect();
        assert_eq!(slugs, ["zeta", "a b/c?&", "alpha"]);
    }

    #[tokio::test]
    async fn repeated_render_does_not_accumulate() {
        let source = StaticSource::new(r#"[{"slug": "x", "name": "X"}]"#);
        let mut grid = container().child(Element::new("p").text("Loading..."));
        render_listing(Some(&mut grid), &source).await;
        render_listing(Some(&mut grid), &source).await;
        assert_eq!(grid.children().len(), 1);
        assert!(!grid.text_content().contains("Loading"));
    }

    #[test]
    fn card_contents() {
        let tool: Tool = serde_json::from_value(serde_json::json!({
            "slug": "x",
            "name": "X",
            "price_eur": 12,
            "image": "x.png"
        }))
        .unwrap();
        let card = tool_card(&tool);
        let images = card.find_by_tag("img");
        assert_eq!(images[0].attr_value("src"), Some("assets/x.png"));
        assert_eq!(card.find_by_tag("h2")[0].text_content(), "X");
        assert_eq!(card.find_by_class("tagline")[0].text_content(), "");
        assert_eq!(card.find_by_class("price")[0].text_content(), "12 EUR");
    }

    #[test]
    fn card_without_image_has_no_media() {
        let tool: Tool =
            serde_json::from_value(serde_json::json!({"slug": "x", "name": "X", "tagline": "t"}))
                .unwrap();
        let card = tool_card(&tool);
        assert!(card.find_by_tag("img").is_empty());
        assert_eq!(card.find_by_class("price")[0].text_content(), "Free");
    }

    #[test]
    fn tool_text_is_escaped() {
        let tool: Tool = serde_json::from_value(serde_json::json!({
            "slug": "x",
            "name": "<img src=x onerror=alert(1)>"
        }))
        .unwrap();
        let html = tool_card(&tool).to_string();
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img src=x"));
    }
}
