//! Contexts: a section of the site and the components that decorate it.
//!
//! A [`Context`] holds an ordered list of components and the pages of one site
//! section. Rendering runs every component over every page, in registration
//! order, so registration order *is* output order: metas before the
//! stylesheet link, the stylesheet before the title, and so on.
//!
//! Three stock contexts exist:
//!
//! | Context | Pages | Extra components |
//! |---------|-------|------------------|
//! | [`Context::blog`] | posts | comments |
//! | [`Context::pages`] | standalone pages | gallery (opt-in) |
//! | [`Context::overview`] | bundle overview pages | reader navigation |
//!
//! Page scripts are per page: each visit may return a JS snippet, and the
//! snippets of one page are joined, compacted and appended as a single
//! `<script>` after the document. The stylesheet is shared by the whole site,
//! see [`site_css`].

use crate::component::{
    Comments, Component, Copyright, Gallery, HeaderBar, Navigation, NavigationKind,
    OpenGraphMeta, ReaderNavigation, SchemaOrgMeta, TwitterMeta,
};
use crate::config::SiteConfig;
use crate::element::{Element, Location};
use crate::minify::{minify_css, minify_js};

/// One page ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub fs_path: String,
    pub fs_filename: String,
    pub title: String,
    pub html: String,
}

impl RenderedPage {
    pub fn url(&self) -> String {
        format!("{}{}", self.fs_path, self.fs_filename)
    }
}

#[derive(Debug, Clone)]
pub struct Context {
    name: String,
    components: Vec<Component>,
    elements: Vec<Element>,
}

impl Context {
    /// An empty context without components.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Posts: full meta set, navigation, content and comment thread.
    pub fn blog(config: &SiteConfig) -> Self {
        let mut ctx = Self::new("blog");
        ctx.add_head_components(config);
        ctx.add_component(header_bar(config));
        ctx.add_component(main_navigation(config));
        ctx.add_component(Component::Content);
        ctx.add_component(Component::Comments(Comments {
            shortname: config.comments.disqus_shortname.clone(),
        }));
        ctx.add_footer_components(config);
        ctx
    }

    /// Standalone pages: like the blog, without comments.
    pub fn pages(config: &SiteConfig) -> Self {
        let mut ctx = Self::new("pages");
        ctx.add_head_components(config);
        ctx.add_component(header_bar(config));
        ctx.add_component(main_navigation(config));
        ctx.add_component(Component::Content);
        if config.features.gallery {
            ctx.add_component(Component::Gallery(Gallery {
                placeholder_url: config.site.default_image_url.clone(),
            }));
        }
        ctx.add_footer_components(config);
        ctx
    }

    /// Overview pages, with reader navigation through `overview_locations`.
    pub fn overview(config: &SiteConfig, overview_locations: Vec<Location>) -> Self {
        let mut ctx = Self::new("overview");
        ctx.add_head_components(config);
        ctx.add_component(header_bar(config));
        ctx.add_component(main_navigation(config));
        ctx.add_component(Component::Content);
        ctx.add_component(Component::ReaderNavigation(ReaderNavigation {
            locations: overview_locations,
        }));
        ctx.add_footer_components(config);
        ctx
    }

    fn add_head_components(&mut self, config: &SiteConfig) {
        let social = &config.social;
        self.add_component(Component::SchemaOrgMeta(SchemaOrgMeta));
        self.add_component(Component::TwitterMeta(TwitterMeta {
            handle: social.twitter_handle.clone(),
            card_type: social.twitter_card_type.clone(),
        }));
        self.add_component(Component::OpenGraphMeta(OpenGraphMeta {
            site_name: config.site.name.clone(),
            og_type: social.og_type.clone(),
            fb_page: social.fb_page.clone(),
            content_section: social.content_section.clone(),
            content_tags: social.content_tags.clone(),
        }));
        self.add_component(Component::CssLink {
            url: config.site.css_url.clone(),
        });
        self.add_component(Component::RssLink {
            url: config.site.rss_url.clone(),
            title: config.site.name.clone(),
        });
        self.add_component(Component::Title);
    }

    fn add_footer_components(&mut self, config: &SiteConfig) {
        self.add_component(Component::Copyright(Copyright {
            owner: config.copyright.owner.clone(),
            since: config.copyright.since,
        }));
        self.add_component(Component::Navigation(Navigation {
            kind: NavigationKind::Footer,
            locations: config.navigation.footer_locations(&config.site.domain),
        }));
        if config.features.cookie_banner {
            self.add_component(Component::CookieBanner);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn add_elements(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.extend(elements);
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Run every component over every page and serialize the results.
    ///
    /// Pages are consumed: their documents are complete once rendered, and a
    /// second call renders nothing.
    pub fn render(&mut self) -> Vec<RenderedPage> {
        let elements = std::mem::take(&mut self.elements);
        tracing::info!(
            context = %self.name,
            pages = elements.len(),
            components = self.components.len(),
            "Rendering context"
        );
        elements
            .into_iter()
            .map(|element| self.render_element(element))
            .collect()
    }

    fn render_element(&self, mut element: Element) -> RenderedPage {
        element.add_root_attr("lang", "en");
        let mut scripts = Vec::new();
        for component in &self.components {
            let js = element.accept_visitor(component);
            if !js.is_empty() {
                scripts.push(js);
            }
        }
        tracing::debug!(url = element.url(), scripts = scripts.len(), "Visited page");

        let mut html = element.render();
        if !scripts.is_empty() {
            html.push_str("<script>");
            html.push_str(&minify_js(&scripts.concat()));
            html.push_str("</script>");
        }
        RenderedPage {
            fs_path: element.fs_path().to_string(),
            fs_filename: element.fs_filename().to_string(),
            title: element.title().to_string(),
            html,
        }
    }

    /// CSS fragments of this context's components, in registration order.
    pub fn css_fragments(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.iter().map(Component::css).filter(|c| !c.is_empty())
    }
}

fn header_bar(config: &SiteConfig) -> Component {
    Component::HeaderBar(HeaderBar {
        site_name: config.site.name.clone(),
        home_url: config.site.home_url.clone(),
    })
}

fn main_navigation(config: &SiteConfig) -> Component {
    Component::Navigation(Navigation {
        kind: NavigationKind::Main,
        locations: config.navigation.main_locations(&config.site.domain),
    })
}

const BASE_CSS: &str = r#"
body, p, span {
    margin: 0;
    padding: 0;
    font-family: Arial, Helvetica, sans-serif;
}
a {
    color: grey;
    text-decoration: none;
}
a:hover {
    text-decoration: underline;
}
.wrapperOuter {
    text-align: center;
}
.wrapperInner {
    margin: 0 auto;
    width: 800px;
}
.tiles {
    display: flex;
    flex-wrap: wrap;
}
.tile {
    width: 190px;
    margin: 5px;
}
.tile img {
    width: 190px;
}
.tileTitle {
    display: block;
    font-size: 12px;
}
"#;

/// The shared stylesheet: base rules, then each distinct component fragment
/// in first-registration order across `contexts`, compacted.
pub fn site_css(contexts: &[&Context]) -> String {
    let mut fragments: Vec<&'static str> = Vec::new();
    for ctx in contexts {
        for css in ctx.css_fragments() {
            if !fragments.contains(&css) {
                fragments.push(css);
            }
        }
    }
    let mut css = String::from(BASE_CSS);
    for fragment in fragments {
        css.push_str(fragment);
    }
    minify_css(&css)
}
