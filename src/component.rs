//! Page components.
//!
//! A component is a reusable unit of markup generation. Visiting a page with a
//! component yields a [`Visit`]: the nodes to append to the page's head, the
//! nodes to append to its body, and a JS snippet for the page script. Visits
//! are pure functions of the component's configuration and the page being
//! visited, so one component instance can serve every page of a
//! [`Context`](crate::context::Context) in any order.
//!
//! ## Variants
//!
//! | Variant | Head | Body | JS |
//! |---------|------|------|----|
//! | `Title` | `<title>` | | |
//! | `SchemaOrgMeta` | `itemprop` metas | | |
//! | `TwitterMeta` | `twitter:*` metas | | |
//! | `OpenGraphMeta` | `og:*` / `article:*` metas | | |
//! | `CssLink` | stylesheet `<link>` | | |
//! | `RssLink` | feed `<link>` | | |
//! | `HeaderBar` | | site header | |
//! | `Navigation` | | `<div><nav>` of locations | |
//! | `Content` | | `<main>` with title and body HTML | |
//! | `ReaderNavigation` | first/prev/next/last `<link>`s | first/prev/next/last `<nav>` | |
//! | `Comments` | | disqus thread container | disqus embed |
//! | `Gallery` | | fixed placeholder grid | |
//! | `Copyright` | | copyright line | |
//! | `CookieBanner` | | consent banner | dismiss handler |
//!
//! Meta components always emit their full, fixed sequence of tags. A value the
//! page or site doesn't have renders as `content=""`, never as a missing tag.

use crate::element::{Element, Location};
use crate::node::Node;

/// Everything one component contributes to one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visit {
    pub head: Vec<Node>,
    pub body: Vec<Node>,
    pub js: String,
}

impl Visit {
    pub fn head(nodes: Vec<Node>) -> Self {
        Self {
            head: nodes,
            ..Self::default()
        }
    }

    pub fn body(nodes: Vec<Node>) -> Self {
        Self {
            body: nodes,
            ..Self::default()
        }
    }

    pub fn with_js(mut self, js: impl Into<String>) -> Self {
        self.js = js.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.body.is_empty() && self.js.is_empty()
    }
}

/// Schema.org microdata metas (`itemprop=name|description|image`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaOrgMeta;

/// Twitter card metas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwitterMeta {
    pub handle: String,
    pub card_type: String,
}

/// Open Graph and article metas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenGraphMeta {
    pub site_name: String,
    pub og_type: String,
    pub fb_page: String,
    pub content_section: String,
    pub content_tags: String,
}

/// The bar at the top of every page: site name linking home.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBar {
    pub site_name: String,
    pub home_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    Main,
    Footer,
}

impl NavigationKind {
    pub fn class(self) -> &'static str {
        match self {
            NavigationKind::Main => "mainNavi",
            NavigationKind::Footer => "footerNavi",
        }
    }
}

/// A flat list of links; the current page shows as a `<span>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub kind: NavigationKind,
    pub locations: Vec<Location>,
}

/// Minimum number of locations for [`ReaderNavigation`] to render anything.
pub const READER_NAVIGATION_MIN: usize = 3;

/// First/previous/next/last navigation through an ordered list of pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderNavigation {
    pub locations: Vec<Location>,
}

/// Disqus comment thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    pub shortname: String,
}

/// Number of tiles in the gallery placeholder grid.
pub const GALLERY_TILES: usize = 5;

/// Placeholder thumbnail grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    pub placeholder_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Copyright {
    pub owner: String,
    /// First year of the notice; 0 omits the year.
    pub since: u32,
}

/// The closed set of page components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Title,
    SchemaOrgMeta(SchemaOrgMeta),
    TwitterMeta(TwitterMeta),
    OpenGraphMeta(OpenGraphMeta),
    CssLink { url: String },
    RssLink { url: String, title: String },
    HeaderBar(HeaderBar),
    Navigation(Navigation),
    Content,
    ReaderNavigation(ReaderNavigation),
    Comments(Comments),
    Gallery(Gallery),
    Copyright(Copyright),
    CookieBanner,
}

impl Component {
    /// Produce this component's contribution to `page`.
    pub fn visit(&self, page: &Element) -> Visit {
        match self {
            Component::Title => Visit::head(vec![Node::new("title", page.title())]),
            Component::SchemaOrgMeta(c) => c.visit(page),
            Component::TwitterMeta(c) => c.visit(page),
            Component::OpenGraphMeta(c) => c.visit(page),
            Component::CssLink { url } => Visit::head(vec![Node::element(
                "link",
                "",
                &[("rel", "stylesheet"), ("type", "text/css"), ("href", url.as_str())],
            )]),
            // No feed configured, nothing to point at.
            Component::RssLink { url, .. } if url.is_empty() => Visit::default(),
            Component::RssLink { url, title } => Visit::head(vec![Node::element(
                "link",
                "",
                &[
                    ("rel", "alternate"),
                    ("type", "application/rss+xml"),
                    ("title", title.as_str()),
                    ("href", url.as_str()),
                ],
            )]),
            Component::HeaderBar(c) => c.visit(),
            Component::Navigation(c) => c.visit(page),
            Component::Content => visit_content(page),
            Component::ReaderNavigation(c) => c.visit(page),
            Component::Comments(c) => c.visit(page),
            Component::Gallery(c) => c.visit(),
            Component::Copyright(c) => c.visit(),
            Component::CookieBanner => visit_cookie_banner(),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Component::Title => "title",
            Component::SchemaOrgMeta(_) => "schema-org-meta",
            Component::TwitterMeta(_) => "twitter-meta",
            Component::OpenGraphMeta(_) => "open-graph-meta",
            Component::CssLink { .. } => "css-link",
            Component::RssLink { .. } => "rss-link",
            Component::HeaderBar(_) => "header-bar",
            Component::Navigation(n) => match n.kind {
                NavigationKind::Main => "main-navigation",
                NavigationKind::Footer => "footer-navigation",
            },
            Component::Content => "content",
            Component::ReaderNavigation(_) => "reader-navigation",
            Component::Comments(_) => "comments",
            Component::Gallery(_) => "gallery",
            Component::Copyright(_) => "copyright",
            Component::CookieBanner => "cookie-banner",
        }
    }

    /// Stylesheet fragment this component needs, empty if none.
    pub fn css(&self) -> &'static str {
        match self {
            Component::HeaderBar(_) => HEADER_BAR_CSS,
            Component::Navigation(n) => match n.kind {
                NavigationKind::Main => MAIN_NAVIGATION_CSS,
                NavigationKind::Footer => FOOTER_NAVIGATION_CSS,
            },
            Component::Content => CONTENT_CSS,
            Component::ReaderNavigation(_) => READER_NAVIGATION_CSS,
            Component::Gallery(_) => GALLERY_CSS,
            Component::Copyright(_) => COPYRIGHT_CSS,
            Component::CookieBanner => COOKIE_BANNER_CSS,
            _ => "",
        }
    }
}

fn meta(key: &str, name: &str, content: &str) -> Node {
    Node::element("meta", "", &[(key, name), ("content", content)])
}

impl SchemaOrgMeta {
    fn visit(&self, page: &Element) -> Visit {
        Visit::head(vec![
            meta("itemprop", "name", page.title()),
            meta("itemprop", "description", page.description()),
            meta("itemprop", "image", page.image_url()),
        ])
    }
}

impl TwitterMeta {
    fn visit(&self, page: &Element) -> Visit {
        Visit::head(vec![
            meta("name", "twitter:card", &self.card_type),
            meta("name", "twitter:site", &self.handle),
            meta("name", "twitter:title", page.title()),
            meta("name", "twitter:description", page.description()),
            meta("name", "twitter:creator", &self.handle),
            meta("name", "twitter:image", page.image_url()),
        ])
    }
}

impl OpenGraphMeta {
    fn visit(&self, page: &Element) -> Visit {
        let url = page.location().absolute_url();
        Visit::head(vec![
            meta("property", "og:title", page.title()),
            meta("property", "og:url", &url),
            meta("property", "og:image", page.image_url()),
            meta("property", "og:description", page.description()),
            meta("property", "og:site_name", &self.site_name),
            meta("property", "og:type", &self.og_type),
            meta("property", "article:published_time", page.published_time()),
            meta("property", "article:modified_time", page.published_time()),
            meta("property", "article:section", &self.content_section),
            meta("property", "article:tag", &self.content_tags),
            meta("property", "article:publisher", &self.fb_page),
        ])
    }
}

impl HeaderBar {
    fn visit(&self) -> Visit {
        let mut header = Node::element("header", "", &[("class", "mainHeader")]);
        header
            .add_element("div", "", &[("class", "wrapperInner")])
            .add_element("a", &self.site_name, &[("href", self.home_url.as_str()), ("class", "home")]);
        Visit::body(vec![header])
    }
}

impl Navigation {
    fn visit(&self, page: &Element) -> Visit {
        let mut nav = Node::new("nav", "");
        for location in &self.locations {
            if location.url() == page.url() {
                nav.add_element("span", location.title(), &[]);
            } else {
                nav.add_element("a", location.title(), &[("href", location.url())]);
            }
        }
        let wrapper = Node::element("div", "", &[("class", self.kind.class())]).with_child(nav);
        Visit::body(vec![wrapper])
    }
}

fn visit_content(page: &Element) -> Visit {
    let mut main = Node::element("main", page.content(), &[("class", "content")]);
    main.add_element("h1", page.title(), &[]);
    Visit::body(vec![main])
}

/// Where the current page sits among the reader locations.
///
/// Every field is `None` when there is no such neighbour, which includes the
/// case where the current page is not in the list at all.
#[derive(Debug, Default, PartialEq, Eq)]
struct Neighbours<'a> {
    first: Option<&'a Location>,
    previous: Option<&'a Location>,
    next: Option<&'a Location>,
    last: Option<&'a Location>,
}

impl ReaderNavigation {
    /// Index of the page with `url`, if registered.
    pub fn position_of(&self, url: &str) -> Option<usize> {
        self.locations.iter().position(|l| l.url() == url)
    }

    fn neighbours(&self, url: &str) -> Neighbours<'_> {
        let Some(index) = self.position_of(url) else {
            tracing::warn!(url, "page not found among reader navigation locations");
            return Neighbours::default();
        };
        let is_first = index == 0;
        let is_last = index + 1 == self.locations.len();
        Neighbours {
            first: (!is_first).then(|| &self.locations[0]),
            previous: index.checked_sub(1).map(|i| &self.locations[i]),
            next: self.locations.get(index + 1),
            last: (!is_last).then(|| self.locations.last()).flatten(),
        }
    }

    fn visit(&self, page: &Element) -> Visit {
        if self.locations.len() < READER_NAVIGATION_MIN {
            return Visit::default();
        }
        let n = self.neighbours(page.url());
        let entries = [
            ("first", "&lt;&lt; first", n.first),
            ("prev", "&lt; previous", n.previous),
            ("next", "next &gt;", n.next),
            ("last", "newest &gt;&gt;", n.last),
        ];

        let mut head = Vec::new();
        let mut nav = Node::element("nav", "", &[("class", "readerNavi")]);
        for (rel, label, target) in entries {
            match target {
                Some(location) => {
                    head.push(Node::element("link", "", &[("rel", rel), ("href", location.url())]));
                    nav.add_element("a", label, &[("href", location.url()), ("rel", rel)]);
                }
                None => {
                    nav.add_element("span", label, &[]);
                }
            }
        }
        Visit {
            head,
            body: vec![nav],
            js: String::new(),
        }
    }
}

impl Comments {
    fn visit(&self, page: &Element) -> Visit {
        if self.shortname.is_empty() {
            return Visit::default();
        }
        let mut thread = Node::element("div", "", &[("id", "disqus_thread")]);
        thread.add_element("noscript", "Please enable JavaScript to view the comments.", &[]);
        let wrapper = Node::element("div", "", &[("class", "comments")]).with_child(thread);
        Visit::body(vec![wrapper]).with_js(self.embed_js(page))
    }

    /// The disqus embed script for one page.
    ///
    /// Page values are written as JSON string literals so quotes in titles
    /// can't break out of the script. Without a thread id the page url is
    /// used as identifier.
    pub fn embed_js(&self, page: &Element) -> String {
        let url = page.location().absolute_url();
        let identifier = if page.thread_id().is_empty() {
            page.url()
        } else {
            page.thread_id()
        };
        format!(
            r#"var disqus_config = function () {{
    this.page.title = {title};
    this.page.url = {url};
    this.page.identifier = {identifier};
}};
(function () {{
    var d = document, s = d.createElement('script');
    s.src = 'https://{shortname}.disqus.com/embed.js';
    s.setAttribute('data-timestamp', +new Date());
    (d.head || d.body).appendChild(s);
}})();
"#,
            title = js_string(page.title()),
            url = js_string(&url),
            identifier = js_string(identifier),
            shortname = self.shortname,
        )
    }
}

fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

impl Gallery {
    fn visit(&self) -> Visit {
        let mut grid = Node::element("div", "", &[("class", "gallery")]);
        for i in 1..=GALLERY_TILES {
            let alt = format!("placeholder {i}");
            grid.add_element("a", "", &[("href", "#"), ("class", "galleryTile")])
                .add_element("img", "", &[("src", self.placeholder_url.as_str()), ("alt", alt.as_str())]);
        }
        Visit::body(vec![grid])
    }
}

impl Copyright {
    fn visit(&self) -> Visit {
        let notice = if self.since == 0 {
            format!("&copy; {}", self.owner)
        } else {
            format!("&copy; {} {}", self.since, self.owner)
        };
        let mut div = Node::element("div", "", &[("class", "copyright")]);
        div.add_element("span", &notice, &[]);
        Visit::body(vec![div])
    }
}

fn visit_cookie_banner() -> Visit {
    let mut banner = Node::element("div", "", &[("class", "cookieBanner"), ("id", "cookieBanner")]);
    banner.add_element(
        "p",
        "This site uses cookies for comments and statistics. By continuing you accept their use.",
        &[],
    );
    banner.add_element("a", "OK", &[("href", "#"), ("id", "cookieBannerAccept")]);
    Visit::body(vec![banner]).with_js(COOKIE_BANNER_JS)
}

const COOKIE_BANNER_JS: &str = r#"(function () {
    var banner = document.getElementById('cookieBanner');
    if (!banner) { return; }
    if (window.localStorage && localStorage.getItem('cookiesAccepted')) {
        banner.style.display = 'none';
        return;
    }
    document.getElementById('cookieBannerAccept').onclick = function (e) {
        e.preventDefault();
        if (window.localStorage) { localStorage.setItem('cookiesAccepted', '1'); }
        banner.style.display = 'none';
    };
})();
"#;

const HEADER_BAR_CSS: &str = r#"
.mainHeader {
    border-bottom: 1px solid #ccc;
    padding: 20px 0;
}
.mainHeader .home {
    font-size: 24px;
    color: black;
}
"#;

const MAIN_NAVIGATION_CSS: &str = r#"
.mainNavi nav {
    padding: 10px 0;
}
.mainNavi a,
.mainNavi span {
    margin-right: 15px;
}
"#;

const FOOTER_NAVIGATION_CSS: &str = r#"
.footerNavi nav {
    font-size: 12px;
    padding: 20px 0;
    border-top: 1px solid #ccc;
}
.footerNavi a,
.footerNavi span {
    margin-right: 10px;
}
"#;

const CONTENT_CSS: &str = r#"
.content h1 {
    font-size: 28px;
    margin: 20px 0;
}
.content p {
    line-height: 1.5;
    margin-bottom: 15px;
}
"#;

const READER_NAVIGATION_CSS: &str = r#"
.readerNavi {
    padding: 20px 0;
}
.readerNavi a,
.readerNavi span {
    margin: 0 10px;
}
.readerNavi span {
    color: #ccc;
}
"#;

const GALLERY_CSS: &str = r#"
.gallery {
    display: flex;
    flex-wrap: wrap;
}
.galleryTile {
    margin: 5px;
}
.galleryTile img {
    width: 150px;
    height: 150px;
}
"#;

const COPYRIGHT_CSS: &str = r#"
.copyright {
    font-size: 12px;
    color: grey;
    padding: 10px 0;
}
"#;

const COOKIE_BANNER_CSS: &str = r#"
.cookieBanner {
    position: fixed;
    bottom: 0;
    left: 0;
    right: 0;
    padding: 10px;
    background: #333;
    color: white;
}
.cookieBanner a {
    color: white;
    font-weight: bold;
}
"#;
