//! Addressable pages.
//!
//! A [`Location`] is where a page lives: its route, domain, title, thumbnail and
//! the `(directory, filename)` pair it is written to. Navigation components only
//! need locations, so they hold these rather than whole pages.
//!
//! An [`Element`] is a location plus content (description, body HTML, image,
//! publish time, comment-thread id) and the [`Document`] the components fill in.
//!
//! The url is always `fs_path + fs_filename`, computed once at construction.

use crate::component::{Component, Visit};
use crate::document::Document;
use crate::node::Node;

/// Identity and addressing of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: String,
    domain: String,
    title: String,
    thumbnail_url: String,
    fs_path: String,
    fs_filename: String,
}

impl Location {
    pub fn new(
        fs_path: impl Into<String>,
        fs_filename: impl Into<String>,
        domain: impl Into<String>,
        title: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        let fs_path = fs_path.into();
        let fs_filename = fs_filename.into();
        Self {
            url: format!("{fs_path}{fs_filename}"),
            domain: domain.into(),
            title: title.into(),
            thumbnail_url: thumbnail_url.into(),
            fs_path,
            fs_filename,
        }
    }

    /// Site-relative route, e.g. `/blog/2017/1/3/dawn/index.html`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Alias for [`Location::url`], the name used by navigation code.
    pub fn path(&self) -> &str {
        &self.url
    }

    /// Production domain including scheme, e.g. `https://drewing.de`.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    /// Output directory relative to the site root.
    pub fn fs_path(&self) -> &str {
        &self.fs_path
    }

    pub fn fs_filename(&self) -> &str {
        &self.fs_filename
    }

    /// Domain plus url, the canonical address of the page.
    pub fn absolute_url(&self) -> String {
        format!("{}{}", self.domain, self.url)
    }
}

/// Content fields of a page, grouped so constructors stay readable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub id: String,
    pub description: String,
    pub content: String,
    pub image_url: String,
    pub published_time: String,
    pub thread_id: String,
}

/// A single output page.
#[derive(Debug, Clone)]
pub struct Element {
    location: Location,
    content: Content,
    doc: Document,
}

impl Element {
    /// Create a page with an empty document.
    pub fn new(location: Location, content: Content) -> Self {
        Self {
            location,
            content,
            doc: Document::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn url(&self) -> &str {
        self.location.url()
    }

    pub fn path(&self) -> &str {
        self.location.path()
    }

    pub fn domain(&self) -> &str {
        self.location.domain()
    }

    pub fn title(&self) -> &str {
        self.location.title()
    }

    pub fn thumbnail_url(&self) -> &str {
        self.location.thumbnail_url()
    }

    pub fn fs_path(&self) -> &str {
        self.location.fs_path()
    }

    pub fn fs_filename(&self) -> &str {
        self.location.fs_filename()
    }

    pub fn id(&self) -> &str {
        &self.content.id
    }

    pub fn description(&self) -> &str {
        &self.content.description
    }

    /// Body HTML.
    pub fn content(&self) -> &str {
        &self.content.content
    }

    pub fn image_url(&self) -> &str {
        &self.content.image_url
    }

    pub fn published_time(&self) -> &str {
        &self.content.published_time
    }

    /// External comment-thread id (the disqus thread).
    pub fn thread_id(&self) -> &str {
        &self.content.thread_id
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Let `component` visit this page and apply what it produced.
    ///
    /// Returns the JS snippet of the visit (possibly empty); the caller decides
    /// how page scripts are aggregated.
    pub fn accept_visitor(&mut self, component: &Component) -> String {
        let Visit { head, body, js } = component.visit(self);
        self.add_header_nodes(head);
        self.add_body_nodes(body);
        js
    }

    pub(crate) fn add_header_nodes(&mut self, nodes: Vec<Node>) {
        for node in nodes {
            self.doc.add_head_node(node);
        }
    }

    pub(crate) fn add_body_nodes(&mut self, nodes: Vec<Node>) {
        for node in nodes {
            self.doc.add_body_node(node);
        }
    }

    pub(crate) fn add_root_attr(&mut self, name: &str, value: &str) {
        self.doc.add_root_attr(name, value);
    }

    pub fn render(&self) -> String {
        self.doc.render()
    }
}
