//! Thin view over the `scraper` document tree.
//!
//! The schedule markup is read positionally, so child lists here only contain
//! *significant* nodes: elements and non-blank text. Whitespace between tags and
//! comments would otherwise shift every index depending on how the page was
//! pretty-printed.

use scraper::{ElementRef, Node};

use crate::utils::text::clean_text;

/// Tagged view of one tree node.
#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
    /// Comments, doctypes and anything else that carries no schedule data.
    Boundary,
}

impl<'a> NodeKind<'a> {
    fn from_parts(value: &'a Node, element: Option<ElementRef<'a>>) -> Self {
        match (value, element) {
            (Node::Element(_), Some(element)) => NodeKind::Element(element),
            (Node::Text(text), _) => NodeKind::Text(&**text),
            _ => NodeKind::Boundary,
        }
    }

    fn is_significant(&self) -> bool {
        match self {
            NodeKind::Element(_) => true,
            NodeKind::Text(text) => !text.trim().is_empty(),
            NodeKind::Boundary => false,
        }
    }

    pub fn as_element(&self) -> Option<ElementRef<'a>> {
        match self {
            NodeKind::Element(element) => Some(*element),
            _ => None,
        }
    }

    /// Significant children; text nodes have none.
    pub fn children(&self) -> Vec<NodeKind<'a>> {
        match self {
            NodeKind::Element(element) => children(*element),
            _ => Vec::new(),
        }
    }

    /// All text below this node, whitespace collapsed.
    pub fn text(&self) -> String {
        match self {
            NodeKind::Element(element) => element_text(*element),
            NodeKind::Text(text) => clean_text(text),
            NodeKind::Boundary => String::new(),
        }
    }

    /// The node's only text value: a text node itself, or an element that wraps
    /// exactly one significant child, recursively. `None` for mixed content.
    pub fn single_string(&self) -> Option<String> {
        match self {
            NodeKind::Text(text) => Some(clean_text(text)),
            NodeKind::Element(_) => match self.children().as_slice() {
                [only] => only.single_string(),
                _ => None,
            },
            NodeKind::Boundary => None,
        }
    }

    /// Follows the first significant child `depth` times.
    pub fn descend(&self, depth: usize) -> Option<NodeKind<'a>> {
        let mut node = *self;
        for _ in 0..depth {
            node = node.children().into_iter().next()?;
        }
        Some(node)
    }

    /// First text token reached by always taking the first significant child.
    pub fn first_text(&self) -> Option<String> {
        match self {
            NodeKind::Text(text) => Some(clean_text(text)),
            NodeKind::Element(_) => self.children().first()?.first_text(),
            NodeKind::Boundary => None,
        }
    }
}

pub fn children(element: ElementRef<'_>) -> Vec<NodeKind<'_>> {
    element
        .children()
        .map(|node| NodeKind::from_parts(node.value(), ElementRef::wrap(node)))
        .filter(NodeKind::is_significant)
        .collect()
}

pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

pub fn is_row(element: ElementRef<'_>) -> bool {
    element.value().name().eq_ignore_ascii_case("tr")
}

/// Next sibling that matters for row walking: blank text and comments between
/// rows are stepped over, anything else is returned as-is.
pub fn next_sibling(element: ElementRef<'_>) -> Option<NodeKind<'_>> {
    let mut current = element.next_sibling();
    while let Some(node) = current {
        let kind = NodeKind::from_parts(node.value(), ElementRef::wrap(node));
        if kind.is_significant() {
            return Some(kind);
        }
        current = node.next_sibling();
    }
    None
}
