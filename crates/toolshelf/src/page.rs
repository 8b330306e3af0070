//! Page shells and page-type detection.
//!
//! Both pages share one shell; they differ only in which container the
//! `<main>` holds. [`PageKind::detect`] looks at that once, and
//! [`render_page`] runs only the matching renderer.

use tracing::debug;

use crate::detail::{DETAIL_CONTAINER_ID, render_detail};
use crate::dom::Element;
use crate::listing::{LISTING_CONTAINER_ID, render_listing};
use crate::source::CatalogueSource;

pub const SITE_TITLE: &str = "Tool Shelf";
const STYLESHEET: &str = "assets/style.css";

/// Which controller a page needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Listing,
    Detail,
}

impl PageKind {
    /// Detect the page type from which container is present.
    pub fn detect(page: &Page) -> Option<Self> {
        if page.root.find_by_id(LISTING_CONTAINER_ID).is_some() {
            Some(Self::Listing)
        } else if page.root.find_by_id(DETAIL_CONTAINER_ID).is_some() {
            Some(Self::Detail)
        } else {
            None
        }
    }
}

/// A full HTML document.
#[derive(Debug, Clone)]
pub struct Page {
    root: Element,
}

impl Page {
    /// Listing page (`index.html`) with an empty grid container.
    pub fn listing() -> Self {
        Self::with_main(
            SITE_TITLE,
            Element::new("div")
                .id(LISTING_CONTAINER_ID)
                .class("tools-grid"),
        )
    }

    /// Detail page (`tool.html`) with an empty detail container.
    pub fn detail() -> Self {
        Self::with_main(
            SITE_TITLE,
            Element::new("div").id(DETAIL_CONTAINER_ID),
        )
    }

    /// Shell around arbitrary `<main>` content.
    pub fn with_main(title: &str, content: Element) -> Self {
        let head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(
                Element::new("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1"),
            )
            .child(Element::new("title").text(title))
            .child(
                Element::new("link")
                    .attr("rel", "stylesheet")
                    .attr("href", STYLESHEET),
            );
        let body = Element::new("body")
            .child(
                Element::new("header").child(
                    Element::new("a")
                        .class("site-title")
                        .attr("href", "index.html")
                        .text(SITE_TITLE),
                ),
            )
            .child(Element::new("main").child(content));
        Self {
            root: Element::new("html")
                .attr("lang", "en")
                .child(head)
                .child(body),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the container with `id`, if this page has one.
    pub fn container_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_by_id_mut(id)
    }

    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>\n{}\n", self.root)
    }
}

/// Detect the page type and run the matching renderer.
///
/// `slug` is only consulted on detail pages. Returns the detected kind, or
/// `None` for a page with neither container.
pub async fn render_page(
    page: &mut Page,
    slug: Option<&str>,
    source: &dyn CatalogueSource,
) -> Option<PageKind> {
    let kind = PageKind::detect(page)?;
    debug!("rendering {kind:?} page");
    match kind {
        PageKind::Listing => {
            render_listing(page.container_mut(LISTING_CONTAINER_ID), source).await;
        }
        PageKind::Detail => {
            render_detail(page.container_mut(DETAIL_CONTAINER_ID), slug, source).await;
        }
    }
    Some(kind)
}
