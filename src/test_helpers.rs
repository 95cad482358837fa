//! Shared test utilities for the blogdoc test suite.
//!
//! Provides element and location builders with predictable values, a JSON
//! record writer for ingestion tests, and lookup helpers that panic with a
//! readable message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let posts = numbered_posts(25);
//! let bundles = generate_bundles(&posts);
//! assert_eq!(bundle_sizes(&bundles), vec![10, 10, 5]);
//! ```
//!
//! Every builder uses the domain [`DOMAIN`] and the filename `index.html`, so
//! a path of `/p/` gives the url `/p/index.html`.

use std::path::Path;

use crate::bundle::ElementBundle;
use crate::context::RenderedPage;
use crate::element::{Content, Element, Location};

pub const DOMAIN: &str = "https://example.org";

// =========================================================================
// Element builders
// =========================================================================

/// A location titled `page {path}`.
pub fn location(path: &str) -> Location {
    Location::new(path, "index.html", DOMAIN, format!("page {path}"), "")
}

pub fn locations(paths: &[&str]) -> Vec<Location> {
    paths.iter().map(|p| location(p)).collect()
}

/// A page with only a title.
pub fn page(title: &str, path: &str) -> Element {
    element(title, path, "", "")
}

pub fn element(title: &str, path: &str, description: &str, image_url: &str) -> Element {
    Element::new(
        Location::new(path, "index.html", DOMAIN, title, ""),
        Content {
            description: description.to_string(),
            image_url: image_url.to_string(),
            ..Content::default()
        },
    )
}

pub fn with_content(title: &str, content: &str) -> Element {
    Element::new(
        Location::new("/p/", "index.html", DOMAIN, title, ""),
        Content {
            content: content.to_string(),
            ..Content::default()
        },
    )
}

pub fn with_thread(title: &str, path: &str, thread_id: &str) -> Element {
    Element::new(
        Location::new(path, "index.html", DOMAIN, title, ""),
        Content {
            thread_id: thread_id.to_string(),
            ..Content::default()
        },
    )
}

/// `count` posts in chronological order: `/blog/post-1/` … `/blog/post-N/`,
/// titled `post N`, with thumbnails `thumb-N.png`.
pub fn numbered_posts(count: usize) -> Vec<Element> {
    (1..=count)
        .map(|n| {
            Element::new(
                Location::new(
                    format!("/blog/post-{n}/"),
                    "index.html",
                    DOMAIN,
                    format!("post {n}"),
                    format!("thumb-{n}.png"),
                ),
                Content {
                    id: n.to_string(),
                    published_time: format!("2018-01-{n:02} 10:00:00"),
                    ..Content::default()
                },
            )
        })
        .collect()
}

// =========================================================================
// Record fixtures
// =========================================================================

/// Write an exported post record as `{dir}/{name}.json`.
pub fn write_post_json(dir: &Path, name: &str, title: &str, date: &str, url: &str) {
    let json = serde_json::json!({
        "thumbImg": "",
        "postImg": "",
        "filename": "",
        "post": {
            "post_id": name,
            "date": date,
            "url": url,
            "title": title,
            "excerpt": format!("about {title}"),
            "content": format!("<p>{title}</p>"),
            "custom_fields": { "dsq_thread_id": [format!("thread-{name}")] }
        }
    });
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(format!("{name}.json")), json.to_string()).unwrap();
}

// =========================================================================
// Extractors and lookups
// =========================================================================

pub fn bundle_sizes(bundles: &[ElementBundle<'_>]) -> Vec<usize> {
    bundles.iter().map(ElementBundle::len).collect()
}

pub fn titles(elements: &[Element]) -> Vec<&str> {
    elements.iter().map(Element::title).collect()
}

/// Find a rendered page by url. Panics if not found.
pub fn find_rendered<'a>(pages: &'a [RenderedPage], url: &str) -> &'a RenderedPage {
    pages.iter().find(|p| p.url() == url).unwrap_or_else(|| {
        let urls: Vec<String> = pages.iter().map(RenderedPage::url).collect();
        panic!("page '{url}' not found. Available: {urls:?}")
    })
}
