//! Serialization of documents and nodes to markup.
//!
//! The output is deterministic: attributes are emitted sorted by name, children
//! in insertion order, and nothing is escaped. Text and attribute values are
//! treated as already-safe markup (post bodies arrive as HTML).
//!
//! ```text
//! <!doctype html><html lang="en"><head>…</head><body>…</body></html>
//! ```
//!
//! Per node:
//!
//! - empty (no children, no text): `<tag a="1" b="2" />`
//! - otherwise: `<tag a="1">` + children + text + `</tag>`
//!
//! Serialization never fails.

use crate::document::Document;
use crate::node::Node;

pub const DOCTYPE: &str = "<!doctype html>";

/// Render a full document.
pub fn render_document(doc: &Document) -> String {
    let mut out = String::from(DOCTYPE);
    out.push_str(&root_open_tag(doc.root_attributes()));
    out.push_str("<head>");
    for node in doc.head_nodes() {
        write_node(&mut out, node);
    }
    out.push_str("</head><body>");
    for node in doc.body_nodes() {
        write_node(&mut out, node);
    }
    out.push_str("</body></html>");
    out
}

/// Render a single node and its subtree.
pub fn render_node(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

/// Render a sequence of nodes back to back.
pub fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn root_open_tag(attrs: &[String]) -> String {
    if attrs.is_empty() {
        "<html>".to_string()
    } else {
        format!("<html {}>", attrs.join(" "))
    }
}

fn write_node(out: &mut String, node: &Node) {
    out.push('<');
    out.push_str(node.tag());
    for (name, value) in node.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    if node.is_empty() {
        out.push_str(" />");
        return;
    }
    out.push('>');
    for child in node.children() {
        write_node(out, child);
    }
    out.push_str(node.text());
    out.push_str("</");
    out.push_str(node.tag());
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document() {
        let doc = Document::new();
        assert_eq!(
            render_document(&doc),
            "<!doctype html><html><head></head><body></body></html>"
        );
    }

    #[test]
    fn empty_node_is_self_closing_with_space() {
        let n = Node::element("meta", "", &[("name", "testname"), ("content", "v")]);
        assert_eq!(render_node(&n), r#"<meta content="v" name="testname" />"#);
    }

    #[test]
    fn empty_node_without_attributes() {
        assert_eq!(render_node(&Node::new("br", "")), "<br />");
    }

    #[test]
    fn attributes_sorted_regardless_of_insertion_order() {
        let a = Node::element("img", "", &[("src", "a.png"), ("alt", "A"), ("class", "c")]);
        let b = Node::element("img", "", &[("class", "c"), ("src", "a.png"), ("alt", "A")]);
        assert_eq!(render_node(&a), render_node(&b));
        assert_eq!(render_node(&a), r#"<img alt="A" class="c" src="a.png" />"#);
    }

    #[test]
    fn nested_children() {
        let mut nav = Node::element("nav", "", &[("class", "mainNavi")]);
        nav.add_element("a", "test", &[("href", "test.html")]);
        assert_eq!(
            render_node(&nav),
            r#"<nav class="mainNavi"><a href="test.html">test</a></nav>"#
        );
    }

    #[test]
    fn children_precede_own_text() {
        let mut p = Node::new("p", " tail");
        p.add_element("b", "head", &[]);
        assert_eq!(render_node(&p), "<p><b>head</b> tail</p>");
    }

    #[test]
    fn text_is_not_escaped() {
        let n = Node::element("div", "<b>&amp;</b>", &[("data-x", "\"raw\"")]);
        assert_eq!(render_node(&n), r#"<div data-x=""raw""><b>&amp;</b></div>"#);
    }

    #[test]
    fn document_with_head_and_body() {
        let mut doc = Document::new();
        doc.add_head_node(Node::element("meta", "", &[("name", "wurst"), ("value", "mett")]));

        let mut nav = Node::element("nav", "", &[("class", "mainNav")]);
        nav.add_element("a", "1", &[("href", "page1.html")]);
        nav.add_element("a", "2", &[("href", "page2.html")]);
        doc.add_body_node(nav);

        let mut header = Node::new("header", "");
        header.add_child(Node::new("h1", "WTF"));
        doc.add_body_node(header);

        let mut main = Node::new("main", "");
        main.add_child(Node::new("p", "Test"));
        doc.add_body_node(main);

        let expected = concat!(
            "<!doctype html><html><head>",
            r#"<meta name="wurst" value="mett" />"#,
            "</head><body>",
            r#"<nav class="mainNav"><a href="page1.html">1</a><a href="page2.html">2</a></nav>"#,
            "<header><h1>WTF</h1></header>",
            "<main><p>Test</p></main>",
            "</body></html>"
        );
        assert_eq!(render_document(&doc), expected);
    }

    #[test]
    fn root_attributes_joined_by_space() {
        let mut doc = Document::new();
        doc.add_root_attr("lang", "en");
        doc.add_root_attr("class", "no-js");
        assert_eq!(
            render_document(&doc),
            r#"<!doctype html><html lang="en" class="no-js"><head></head><body></body></html>"#
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut doc = Document::new();
        doc.add_head_node(Node::new("title", "t"));
        doc.add_body_node(Node::element("p", "x", &[("b", "2"), ("a", "1")]));
        assert_eq!(render_document(&doc), render_document(&doc));
    }

    #[test]
    fn render_nodes_concatenates_in_order() {
        let nodes = vec![Node::new("b", "1"), Node::new("i", "2")];
        assert_eq!(render_nodes(&nodes), "<b>1</b><i>2</i>");
    }
}
