//! Pagination of posts into overview pages.
//!
//! Posts are grouped into bundles of [`BUNDLE_SIZE`] and each bundle becomes
//! one synthetic overview page showing a tile per post.
//!
//! ## Ordering
//!
//! Input is chronological, oldest first. Bundles are cut from the oldest end,
//! so only the most recent bundle can be partial:
//!
//! ```text
//! 25 posts → [1..=10] [11..=20] [21..=25]
//!            index1    index2    index
//! ```
//!
//! Bundle `i` (1-based) is written as `index{i}.html`, except the most recent
//! one, which is always `index.html`: that's the permanent home of the blog. An
//! older bundle keeps its filename and contents as new posts arrive, until the
//! newest bundle fills up and a new one starts.
//!
//! Within a bundle, posts keep their chronological order.

use crate::element::{Content, Element, Location};
use crate::node::Node;
use crate::render::render_node;

/// Number of posts per overview page.
pub const BUNDLE_SIZE: usize = 10;

/// Up to [`BUNDLE_SIZE`] posts destined for one overview page.
#[derive(Debug, Clone, Default)]
pub struct ElementBundle<'a> {
    elements: Vec<&'a Element>,
}

impl<'a> ElementBundle<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: &'a Element) {
        self.elements.push(element);
    }

    pub fn full(&self) -> bool {
        self.elements.len() >= BUNDLE_SIZE
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[&'a Element] {
        &self.elements
    }

    /// Markup of the tile grid for this bundle.
    pub fn render_tiles(&self) -> String {
        let mut grid = Node::element("div", "", &[("class", "tiles")]);
        for element in &self.elements {
            grid.add_child(tile(element));
        }
        render_node(&grid)
    }
}

fn tile(element: &Element) -> Node {
    let mut a = Node::element("a", "", &[("class", "tile"), ("href", element.url())]);
    a.add_element(
        "img",
        "",
        &[("src", element.thumbnail_url()), ("alt", element.title())],
    );
    a.add_element("span", element.title(), &[("class", "tileTitle")]);
    a
}

/// Split chronologically ordered posts into bundles.
///
/// Full bundles are sealed as soon as they reach [`BUNDLE_SIZE`]; a trailing
/// partial bundle is kept if it isn't empty.
pub fn generate_bundles(elements: &[Element]) -> Vec<ElementBundle<'_>> {
    let mut bundles = Vec::new();
    let mut current = ElementBundle::new();
    for element in elements {
        current.push(element);
        if current.full() {
            bundles.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        bundles.push(current);
    }
    bundles
}

/// Output filename of bundle `index` (0-based) out of `count`.
pub fn bundle_filename(index: usize, count: usize) -> String {
    if index + 1 == count {
        "index.html".to_string()
    } else {
        format!("index{}.html", index + 1)
    }
}

/// Where overview pages go and how they present themselves.
#[derive(Debug, Clone)]
pub struct OverviewSettings {
    pub fs_path: String,
    pub domain: String,
    pub title: String,
    pub description: String,
    pub default_image_url: String,
}

/// Turn bundles into overview pages, one per bundle, in bundle order.
///
/// Each page's content is the tile grid of its bundle. The page takes its
/// thumbnail and publish time from the newest post it shows.
pub fn overview_elements(bundles: &[ElementBundle<'_>], settings: &OverviewSettings) -> Vec<Element> {
    let count = bundles.len();
    bundles
        .iter()
        .enumerate()
        .map(|(i, bundle)| {
            let newest = bundle.elements().last();
            let thumbnail = newest.map_or("", |e| e.thumbnail_url());
            let location = Location::new(
                &settings.fs_path,
                bundle_filename(i, count),
                &settings.domain,
                format!("{} - page {}", settings.title, i + 1),
                thumbnail,
            );
            Element::new(
                location,
                Content {
                    id: format!("overview-{}", i + 1),
                    description: settings.description.clone(),
                    content: bundle.render_tiles(),
                    image_url: settings.default_image_url.clone(),
                    published_time: newest.map_or("", |e| e.published_time()).to_string(),
                    thread_id: String::new(),
                },
            )
        })
        .collect()
}
