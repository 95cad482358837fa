//! Page documents: ordered head and body node lists plus root-tag attributes.

use crate::node::Node;
use crate::render;

/// An HTML page under construction.
///
/// Nodes are rendered in the order they were added. Nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    head: Vec<Node>,
    body: Vec<Node>,
    root_attributes: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to `<head>`.
    pub fn add_head_node(&mut self, node: Node) {
        self.head.push(node);
    }

    /// Append a node to `<body>`.
    pub fn add_body_node(&mut self, node: Node) {
        self.body.push(node);
    }

    /// Add a `name="value"` token to the `<html>` tag.
    ///
    /// Root attributes keep their insertion order, unlike node attributes.
    pub fn add_root_attr(&mut self, name: &str, value: &str) {
        self.root_attributes.push(format!(r#"{name}="{value}""#));
    }

    pub fn head_nodes(&self) -> &[Node] {
        &self.head
    }

    pub fn body_nodes(&self) -> &[Node] {
        &self.body
    }

    pub fn root_attributes(&self) -> &[String] {
        &self.root_attributes
    }

    pub fn render(&self) -> String {
        render::render_document(self)
    }
}
