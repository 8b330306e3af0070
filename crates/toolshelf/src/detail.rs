//! Single-tool detail page.
//!
//! The slug comes from the page's `?slug=` query parameter. Every path ends
//! in something readable: a "not specified" or "not found" message, or the
//! full view with per-section fallbacks for missing data.

use tracing::{debug, info};

use crate::catalogue::{Tool, find_tool};
use crate::dom::{Element, Node, render_items, render_list};
use crate::format::{buy_label, external_url, price_line, video_embed_url};
use crate::source::{CatalogueSource, fetch_catalogue};

/// `id` of the container the detail view renders into.
pub const DETAIL_CONTAINER_ID: &str = "tool-detail";

pub const NOT_SPECIFIED_MESSAGE: &str = "Tool not specified.";
pub const NOT_FOUND_MESSAGE: &str = "Tool not found.";
pub const NO_VIDEO_MESSAGE: &str = "Video coming soon.";
pub const NO_FEATURES_MESSAGE: &str = "No features listed.";
pub const FOR_WHO_FALLBACK: &str = "Anyone who finds it useful.";
pub const NOT_FOR_FALLBACK: &str = "No known exclusions.";
pub const PURCHASE_NOTICE: &str = "Payments are not available yet. Check back soon!";

const BUY_BUTTON_ID: &str = "buy-button";
const BUY_NOTICE_ID: &str = "buy-notice";

/// Reveals the purchase notice in the browser. Mirrors [`PurchaseNotice::reveal`].
const PURCHASE_SCRIPT: &str = "document.getElementById('buy-button')?.addEventListener('click', () => {\
document.getElementById('buy-notice')?.removeAttribute('hidden');\
});";

/// How a detail render ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    NotSpecified,
    NotFound,
    Rendered,
}

/// Visibility of the "payments unavailable" notice.
///
/// Starts hidden. [`reveal`](Self::reveal) is one-way: nothing hides it again.
///
/// This only decides how the notice is first serialized. Served pages always
/// start from the default (hidden) state; after that the browser owns the
/// state, and the inline `PURCHASE_SCRIPT` performs the same one-way reveal
/// when the buy button is clicked. There is no second state holder on the
/// server.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseNotice {
    visible: bool,
}

impl PurchaseNotice {
    pub fn reveal(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn to_element(self) -> Element {
        let notice = Element::new("p")
            .id(BUY_NOTICE_ID)
            .class("notice")
            .attr("role", "status");
        let notice = if self.visible {
            notice
        } else {
            notice.attr("hidden", "")
        };
        notice.text(PURCHASE_NOTICE)
    }
}

/// Render the detail view for `slug` into `container`.
///
/// No-op (returns `None`) when `container` is absent. A missing or empty
/// slug short-circuits before any fetch.
pub async fn render_detail(
    container: Option<&mut Element>,
    slug: Option<&str>,
    source: &dyn CatalogueSource,
) -> Option<DetailOutcome> {
    let container = container?;
    container.clear();

    let Some(slug) = slug.filter(|s| !s.is_empty()) else {
        container.push(message(NOT_SPECIFIED_MESSAGE));
        return Some(DetailOutcome::NotSpecified);
    };

    let tools = fetch_catalogue(source).await;
    let Some(tool) = find_tool(&tools, slug) else {
        info!("no tool with slug {slug:?} among {} tool(s)", tools.len());
        container.push(message(NOT_FOUND_MESSAGE));
        return Some(DetailOutcome::NotFound);
    };

    debug!("rendering detail for {slug:?}");
    container.push(detail_view(tool, PurchaseNotice::default()));
    container.push(Element::new("script").child(Node::Trusted(PURCHASE_SCRIPT)));
    Some(DetailOutcome::Rendered)
}

/// Full detail view for one tool.
pub fn detail_view(tool: &Tool, notice: PurchaseNotice) -> Element {
    Element::new("article")
        .class("tool-detail")
        .child(Element::new("h1").text(&tool.name))
        .child(
            Element::new("p")
                .class("tagline")
                .text(tool.tagline.as_deref().unwrap_or("")),
        )
        .child(
            Element::new("p")
                .class("description")
                .text(tool.description.as_deref().unwrap_or("")),
        )
        .child(video_section(tool))
        .child(
            section("features", "Features")
                .child(render_items(&tool.features, NO_FEATURES_MESSAGE)),
        )
        .child(
            section("for-who", "Who it's for")
                .child(render_list(tool.for_who.as_ref(), FOR_WHO_FALLBACK)),
        )
        .child(
            section("not-for", "Not for")
                .child(render_list(tool.not_for.as_ref(), NOT_FOR_FALLBACK)),
        )
        .child(Element::new("p").class("price").text(price_line(tool)))
        .child(actions(tool))
        .child(notice.to_element())
}

fn video_section(tool: &Tool) -> Element {
    let section = section("video", "Demo");
    let embed = tool
        .video_url()
        .map(video_embed_url)
        .and_then(|url| external_url(&url));
    match embed {
        Some(src) => section.child(
            Element::new("iframe")
                .attr("src", src)
                .attr("title", format!("{} demo", tool.name))
                .attr("loading", "lazy")
                .attr("allowfullscreen", ""),
        ),
        None => section.child(Element::new("p").class("muted").text(NO_VIDEO_MESSAGE)),
    }
}

fn actions(tool: &Tool) -> Element {
    let mut actions = Element::new("div").class("actions").child(
        Element::new("button")
            .id(BUY_BUTTON_ID)
            .attr("type", "button")
            .text(buy_label(tool)),
    );
    let links = [
        (tool.video_url(), "Watch demo"),
        (tool.release_url(), "View releases"),
        (tool.repo_url(), "View source"),
    ];
    for (url, label) in links {
        if let Some(url) = url.and_then(external_url) {
            actions.push(external_link(&url, label));
        }
    }
    actions
}

fn external_link(href: &str, label: &str) -> Element {
    Element::new("a")
        .attr("href", href)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .text(label)
}

fn section(class: &'static str, heading: &str) -> Element {
    Element::new("section")
        .class(class)
        .child(Element::new("h2").text(heading))
}

fn message(text: &str) -> Element {
    Element::new("p").class("empty").text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;

    const FIVE_TOOLS: &str = r#"[
        {"slug": "one", "name": "One"},
        {"slug": "two", "name": "Two", "price": 3},
        {"slug": "three", "name": "Three"},
        {"slug": "four", "name": "Four"},
        {"slug": "five", "name": "Five"}
    ]"#;

    fn container() -> Element {
        Element::new("div").id(DETAIL_CONTAINER_ID)
    }

    fn tool(value: serde_json::Value) -> Tool {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn absent_container_is_a_no_op() {
        let outcome = render_detail(None, Some("one"), &StaticSource::new(FIVE_TOOLS)).await;
        assert_eq!(outcome, None);
    }

    #[tokio::test]
    async fn missing_slug_is_not_specified() {
        let source = StaticSource::new(FIVE_TOOLS);
        for slug in [None, Some("")] {
            let mut el = container();
            let outcome = render_detail(Some(&mut el), slug, &source).await;
            assert_eq!(outcome, Some(DetailOutcome::NotSpecified));
            assert_eq!(el.text_content(), NOT_SPECIFIED_MESSAGE);
        }
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let mut el = container();
        let outcome = render_detail(Some(&mut el), Some("six"), &StaticSource::new(FIVE_TOOLS)).await;
        assert_eq!(outcome, Some(DetailOutcome::NotFound));
        assert_eq!(el.text_content(), NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let mut el = container();
        let outcome = render_detail(Some(&mut el), Some("ONE"), &StaticSource::new(FIVE_TOOLS)).await;
        assert_eq!(outcome, Some(DetailOutcome::NotFound));
    }

    #[tokio::test]
    async fn failed_fetch_is_not_found() {
        let mut el = container();
        let outcome = render_detail(Some(&mut el), Some("one"), &StaticSource::new("{")).await;
        assert_eq!(outcome, Some(DetailOutcome::NotFound));
    }

    #[tokio::test]
    async fn known_slug_renders_name() {
        let mut el = container();
        let outcome = render_detail(Some(&mut el), Some("two"), &StaticSource::new(FIVE_TOOLS)).await;
        assert_eq!(outcome, Some(DetailOutcome::Rendered));
        assert_eq!(el.find_by_tag("h1")[0].text_content(), "Two");
        assert_eq!(el.find_by_class("price")[0].text_content(), "Price: 3");
        assert_eq!(el.find_by_id(BUY_BUTTON_ID).unwrap().text_content(), "Buy (3)");
        assert_eq!(el.find_by_tag("script").len(), 1);
    }

    #[test]
    fn sparse_tool_uses_every_fallback() {
        let view = detail_view(&tool(serde_json::json!({"slug": "x", "name": "X"})), PurchaseNotice::default());
        let text = view.text_content();
        assert!(text.contains(NO_VIDEO_MESSAGE));
        assert!(text.contains(NO_FEATURES_MESSAGE));
        assert!(text.contains(FOR_WHO_FALLBACK));
        assert!(text.contains(NOT_FOR_FALLBACK));
        assert_eq!(view.find_by_class("price")[0].text_content(), "Free");
        assert_eq!(view.find_by_id(BUY_BUTTON_ID).unwrap().text_content(), "Buy");
        assert!(view.find_by_tag("iframe").is_empty());
        // Only the buy button; no outbound links.
        assert!(view.find_by_tag("a").is_empty());
    }

    #[test]
    fn full_tool_renders_every_section() {
        let t = tool(serde_json::json!({
            "slug": "x",
            "name": "X",
            "tagline": "Does things",
            "description": "Long text",
            "price_eur": 9.5,
            "features": ["fast", "small"],
            "for_who": ["devs"],
            "not_for": "People who want a GUI",
            "youtube_url": "https://youtu.be/abc123",
            "github_url": "https://github.com/x/x",
            "releases_url": "https://github.com/x/x/releases"
        }));
        let view = detail_view(&t, PurchaseNotice::default());

        let iframes = view.find_by_tag("iframe");
        assert_eq!(iframes[0].attr_value("src"), Some("https://www.youtube.com/embed/abc123"));
        assert_eq!(view.find_by_class("features")[0].find_by_tag("li").len(), 2);
        assert_eq!(view.find_by_class("for-who")[0].find_by_tag("li").len(), 1);
        assert_eq!(
            view.find_by_class("not-for")[0].find_by_tag("p")[0].text_content(),
            "People who want a GUI"
        );
        assert_eq!(view.find_by_class("price")[0].text_content(), "Price: 9.50");

        let links = view.find_by_tag("a");
        let labels: Vec<String> = links.iter().map(|a| a.text_content()).collect();
        assert_eq!(labels, ["Watch demo", "View releases", "View source"]);
        assert_eq!(links[0].attr_value("href"), Some("https://youtu.be/abc123"));
        assert!(links.iter().all(|a| a.attr_value("target") == Some("_blank")));
    }

    #[test]
    fn scheme_less_video_links_are_embedded() {
        let t = tool(serde_json::json!({"slug": "x", "name": "X", "video_url": "youtu.be/abc123"}));
        let view = detail_view(&t, PurchaseNotice::default());

        let iframes = view.find_by_tag("iframe");
        assert_eq!(iframes.len(), 1);
        assert_eq!(iframes[0].attr_value("src"), Some("https://www.youtube.com/embed/abc123"));
        assert!(!view.text_content().contains(NO_VIDEO_MESSAGE));

        let links = view.find_by_tag("a");
        assert_eq!(links[0].text_content(), "Watch demo");
        assert_eq!(links[0].attr_value("href"), Some("https://youtu.be/abc123"));
    }

    #[test]
    fn unsafe_link_schemes_are_dropped() {
        let t = tool(serde_json::json!({
            "slug": "x",
            "name": "X",
            "video_url": "javascript:alert(1)",
            "repo_url": "javascript:alert(2)"
        }));
        let view = detail_view(&t, PurchaseNotice::default());
        assert!(view.find_by_tag("a").is_empty());
        assert!(view.text_content().contains(NO_VIDEO_MESSAGE));
    }

    #[test]
    fn purchase_notice_starts_hidden_and_reveals_once() {
        let mut notice = PurchaseNotice::default();
        assert!(!notice.is_visible());
        assert_eq!(notice.to_element().attr_value("hidden"), Some(""));

        notice.reveal();
        notice.reveal();
        assert!(notice.is_visible());
        let el = notice.to_element();
        assert_eq!(el.attr_value("hidden"), None);
        assert_eq!(el.text_content(), PURCHASE_NOTICE);
    }
}
