//! Lenient HTML document parsing.
//!
//! Raw page bytes are decoded (see [`decode`]), handed to an HTML5 parser
//! with browser-style error recovery, then copied into an owned [`Element`]
//! tree. The owned tree is
//! `Send + Sync` and knows nothing about the page it came from; all
//! layout-specific knowledge lives in [`crate::extract`].

mod decode;
mod element;
mod error;

pub use element::{Descendants, Element, NodeKind};
pub use error::ParseError;

use scraper::{ElementRef, Html};
use tracing::debug;

/// Deepest element nesting accepted when building the tree.
pub const MAX_DEPTH: usize = 512;

/// A parsed document, rooted at its `<html>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse raw markup bytes.
    ///
    /// Malformed markup and malformed byte sequences are repaired rather
    /// than rejected. Fails only when the bytes look like binary data or
    /// are nested beyond [`MAX_DEPTH`].
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let decoded = decode::decode(bytes)?;

        let html = Html::parse_document(&decoded.text);
        if !html.errors.is_empty() {
            debug!(
                encoding = decoded.encoding.name(),
                recovered = html.errors.len(),
                "Markup errors repaired while parsing"
            );
        }

        let root = convert(html.root_element(), 0)?;
        Ok(Self { root })
    }

    /// The `<html>` element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Depth-first walk of the whole document.
    pub fn descendants(&self) -> Descendants<'_> {
        self.root.descendants()
    }

    /// First element in document order matching `predicate`.
    pub fn find_first<P>(&self, predicate: P) -> Option<&Element>
    where
        P: FnMut(&Element) -> bool,
    {
        self.root.find_first(predicate)
    }
}

/// Copy a scraper element and its subtree into an owned [`Element`].
fn convert(source: ElementRef<'_>, depth: usize) -> Result<Element, ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::TooDeep { max: MAX_DEPTH });
    }

    let value = source.value();
    let mut element = Element {
        kind: NodeKind::Element,
        name: value.name().to_string(),
        attrs: value
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        children: Vec::new(),
        text: None,
        tail: None,
    };

    for node in source.children() {
        if let Some(child) = ElementRef::wrap(node) {
            element.children.push(convert(child, depth + 1)?);
        } else if let Some(text) = node.value().as_text() {
            // Text before the first child belongs to the parent; after that
            // it trails the most recent child.
            let slot = match element.children.last_mut() {
                Some(last) => &mut last.tail,
                None => &mut element.text,
            };
            slot.get_or_insert_with(String::new).push_str(text);
        } else if let Some(comment) = node.value().as_comment() {
            element.children.push(Element::comment(comment));
        }
    }

    Ok(element)
}
