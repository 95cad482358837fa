//! # blogdoc
//!
//! A static site generator for a personal blog. Exported post and page records
//! become HTML pages; posts are also bundled into paginated overview pages.
//!
//! # Architecture: Documents Decorated by Components
//!
//! Every output page is an [`element::Element`]: identity and content plus an
//! owned [`document::Document`], a tree of [`node::Node`]s split into head and
//! body. A page starts out empty. [`component::Component`]s fill it in:
//!
//! ```text
//! record (JSON) ─→ Element ─┬─ visit(Title)      → <title>
//!                           ├─ visit(CssLink)    → <link rel="stylesheet">
//!                           ├─ visit(Content)    → <main>
//!                           ├─ visit(Comments)   → thread + embed script
//!                           └─ …
//!                              render() ─→ <!doctype html><html …>…</html>
//! ```
//!
//! A [`context::Context`] is one section of the site: an ordered list of
//! components and the pages they decorate. Registration order is output order.
//! The build ([`site`]) runs three contexts (blog posts, standalone pages and
//! overview pages) and writes the results plus one shared stylesheet.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`node`] | Markup tree node with sorted attributes |
//! | [`document`] | Head and body node lists plus root attributes |
//! | [`render`] | Deterministic serialization of documents and nodes |
//! | [`element`] | Pages (`Element`) and their addressing (`Location`) |
//! | [`component`] | The closed set of page components and their CSS |
//! | [`context`] | Component registries, per-page rendering, shared CSS |
//! | [`bundle`] | Pagination of posts into overview pages |
//! | [`record`] | Loading exported JSON records |
//! | [`markdown`] | Markdown conversion and new-post authoring |
//! | [`naming`] | Slugs and date paths for post urls |
//! | [`minify`] | Whitespace compaction for CSS and JS |
//! | [`config`] | `config.toml` loading, validation, and merging |
//! | [`site`] | Whole-site build: load, render, write |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Visits Are Pure
//!
//! One component instance serves every page of a context, so a visit must not
//! leave state behind. [`component::Component::visit`] returns everything it
//! produced as a [`component::Visit`] (head nodes, body nodes, JS snippet)
//! and the context applies it. Scripts are collected per page and appended as
//! one `<script>` after the document.
//!
//! ## No Escaping
//!
//! Post bodies arrive as HTML from the exporter and navigation labels carry
//! entities like `&lt;`. Text and attribute values are written verbatim.
//!
//! ## Stable Overview Filenames
//!
//! Posts are bundled oldest first, ten per page. Older overview pages are
//! `index1.html`, `index2.html`, …; the most recent is always `index.html`. A
//! full overview page keeps its filename and contents forever.

pub mod bundle;
pub mod component;
pub mod config;
pub mod context;
pub mod document;
pub mod element;
pub mod markdown;
pub mod minify;
pub mod naming;
pub mod node;
pub mod output;
pub mod record;
pub mod render;
pub mod site;

#[cfg(test)]
pub(crate) mod test_helpers;
