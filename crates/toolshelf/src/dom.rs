//! Minimal structural HTML tree.
//!
//! Pages are assembled from [`Element`]s instead of string templates.
//! Catalogue text only ever enters the tree through [`Element::text`] and
//! [`Element::attr`], and both are escaped on serialization. The one escape
//! hatch, [`Node::Trusted`], takes `&'static str` so it cannot carry
//! runtime data.

use std::fmt;

use crate::catalogue::ListField;

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "meta", "link", "br", "hr", "input"];

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Escaped text content.
    Text(String),
    /// Markup compiled into the binary, emitted verbatim.
    Trusted(&'static str),
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

/// An HTML element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| *n != name);
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr_value("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Remove all children.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Depth-first search for the element with the given `id`, including self.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.attr_value("id") == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|e| e.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.attr_value("id") == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| match c {
            Node::Element(e) => e.find_by_id_mut(id),
            _ => None,
        })
    }

    /// All descendants (not including self) carrying `class`, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(&mut |e: &Element| e.has_class(class), &mut found);
        found
    }

    /// All descendants (not including self) with the given tag, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(&mut |e: &Element| e.tag == tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, pred: &mut dyn FnMut(&Element) -> bool, out: &mut Vec<&'a Element>) {
        for e in self.child_elements() {
            if pred(e) {
                out.push(e);
            }
            e.collect(pred, out);
        }
    }

    /// Concatenated text of all descendants, unescaped.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_text(out),
                Node::Text(t) => out.push_str(t),
                Node::Trusted(_) => {}
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            if value.is_empty() {
                write!(f, " {name}")?;
            } else {
                write!(f, " {name}=\"{}\"", escape_attr(value))?;
            }
        }
        f.write_str(">")?;
        if VOID_TAGS.contains(&self.tag) {
            return Ok(());
        }
        for child in &self.children {
            match child {
                Node::Element(e) => write!(f, "{e}")?,
                Node::Text(t) => f.write_str(&escape_text(t))?,
                Node::Trusted(raw) => f.write_str(raw)?,
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Lazily loaded screenshot.
pub fn media(src: &str, alt: &str) -> Element {
    Element::new("img")
        .attr("src", src)
        .attr("alt", alt)
        .attr("loading", "lazy")
}

/// Render an optional list-ish value, or `fallback` when there is nothing
/// to show.
///
/// A non-empty list becomes a `<ul>`, a non-blank string a `<p>`. Absent
/// values, empty lists and blank strings all produce the fallback paragraph.
pub fn render_list(value: Option<&ListField>, fallback: &str) -> Element {
    match value {
        Some(ListField::Items(items)) => render_items(items, fallback),
        Some(ListField::Text(text)) if !text.trim().is_empty() => Element::new("p").text(text),
        _ => fallback_paragraph(fallback),
    }
}

/// Bulleted list of `items`, or `fallback` when empty.
pub fn render_items(items: &[String], fallback: &str) -> Element {
    if items.is_empty() {
        return fallback_paragraph(fallback);
    }
    items.iter().fold(Element::new("ul"), |ul, item| {
        ul.child(Element::new("li").text(item))
    })
}

fn fallback_paragraph(text: &str) -> Element {
    Element::new("p").class("muted").text(text)
}
