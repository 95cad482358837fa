//! Markup tree nodes.
//!
//! A [`Node`] is one element: a tag name, an attribute map, an ordered list of
//! children and an optional trailing text. Nodes own their children outright;
//! there are no back-references, so rendering is a plain top-down walk (see
//! [`crate::render`]).
//!
//! ```text
//! nav class="mainNavi"
//! ├── a href="/blog/"        "Blog"
//! └── span                   "About"
//! ```
//!
//! ## Construction
//!
//! Two factories exist:
//!
//! - [`Node::element`] takes `(name, value)` pairs. Component code uses this
//!   one, the pairing is enforced by the type.
//! - [`Node::from_tokens`] takes a flat `name, value, name, value, …` list, the
//!   shape the exported blog data and older call sites use. An odd token count
//!   is a contract violation and returns [`NodeError::OddAttributeCount`].
//!
//! ## Emptiness
//!
//! A node with no children and empty text is *empty* and renders self-closing
//! (`<meta name="x" />`). Anything else renders as an open/close pair.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NodeError {
    #[error("odd attribute token count ({count}) for <{tag}>: attributes must be name/value pairs")]
    OddAttributeCount { tag: String, count: usize },
}

/// One markup element.
///
/// The tag name is fixed at construction. Attributes live in a `BTreeMap`, so
/// iteration is always in lexicographic key order regardless of the order they
/// were set in; the renderer relies on that for reproducible output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
    text: String,
}

impl Node {
    /// A node without attributes.
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: text.into(),
        }
    }

    /// A node with attributes given as `(name, value)` pairs.
    ///
    /// A repeated name keeps the last value.
    pub fn element(tag: impl Into<String>, text: impl Into<String>, attrs: &[(&str, &str)]) -> Self {
        let mut node = Self::new(tag, text);
        for (name, value) in attrs {
            node.set_attr(*name, *value);
        }
        node
    }

    /// A node with attributes given as a flat `name, value, …` token list.
    ///
    /// ```
    /// use blogdoc::node::Node;
    ///
    /// let a = Node::from_tokens("a", "home", &["href", "/"]).unwrap();
    /// assert_eq!(a.attr("href"), Some("/"));
    /// assert!(Node::from_tokens("a", "home", &["href"]).is_err());
    /// ```
    pub fn from_tokens(
        tag: impl Into<String>,
        text: impl Into<String>,
        tokens: &[&str],
    ) -> Result<Self, NodeError> {
        let tag = tag.into();
        if tokens.len() % 2 != 0 {
            return Err(NodeError::OddAttributeCount {
                tag,
                count: tokens.len(),
            });
        }
        let mut node = Self::new(tag, text);
        for pair in tokens.chunks_exact(2) {
            node.set_attr(pair[0], pair[1]);
        }
        Ok(node)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Append an existing node and return a handle to it for chaining.
    pub fn add_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Build a child from `(name, value)` pairs, append it and return it.
    pub fn add_element(&mut self, tag: &str, text: &str, attrs: &[(&str, &str)]) -> &mut Node {
        self.add_child(Node::element(tag, text, attrs))
    }

    /// Build a child from a flat token list, append it and return it.
    pub fn add_tokens(&mut self, tag: &str, text: &str, tokens: &[&str]) -> Result<&mut Node, NodeError> {
        let child = Node::from_tokens(tag, text, tokens)?;
        Ok(self.add_child(child))
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// True iff the node has no children and no text.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_empty()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attributes in rendering order (sorted by name).
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}
