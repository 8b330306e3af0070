//! Catalogue model, data source, and page renderers for a tool shelf site.
//!
//! A tool shelf is two pages driven by one JSON file: a grid of tool cards
//! (`index.html`) and a per-tool detail page (`tool.html?slug=<slug>`). The
//! catalogue is loaded fresh for every page render and never written back.
//!
//! # Quick start
//!
//! ```ignore
//! use toolshelf::{FileSource, Page, render_page};
//!
//! let source = FileSource::new("static/data/tools.json");
//!
//! let mut page = Page::detail();
//! render_page(&mut page, Some("md-lint"), &source).await;
//! println!("{}", page.to_html());
//! ```
//!
//! # Where to find things
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalogue`] | [`Tool`] records, alias-coalescing accessors, parsing, slug lookup |
//! | [`source`] | [`CatalogueSource`] implementations and the fail-to-empty [`fetch_catalogue`] |
//! | [`format`] | Price labels, video embed URLs, detail links |
//! | [`dom`] | Escaping HTML element tree and list rendering |
//! | [`listing`] | Card grid renderer |
//! | [`detail`] | Detail view renderer and purchase-notice state |
//! | [`page`] | Document shells and page-type detection |
//!
//! # Failure policy
//!
//! Nothing in this crate surfaces an error to a page. A catalogue that cannot
//! be loaded is logged and treated as empty, a missing slug or unknown tool
//! renders a message, and every optional field has a fallback.

pub mod catalogue;
pub mod detail;
pub mod dom;
pub mod error;
pub mod format;
pub mod listing;
pub mod page;
pub mod source;

pub use catalogue::{ListField, Tool, find_tool, parse_catalogue};
pub use detail::{DetailOutcome, PurchaseNotice, render_detail};
pub use dom::{Element, Node, render_list};
pub use error::FetchError;
pub use format::{format_price, price_label, video_embed_url};
pub use listing::render_listing;
pub use page::{Page, PageKind, render_page};
pub use source::{
    CatalogueSource, FileSource, HttpSource, StaticSource, fetch_catalogue, source_from_location,
};
