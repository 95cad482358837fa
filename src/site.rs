//! Whole-site build.
//!
//! ```text
//! source/                          output/
//! ├── config.toml                  ├── styles.css
//! ├── posts/*.json  ── blog ────→  ├── blog/2017/1/3/hello/index.html
//! │                 └─ overview ─→ ├── blog/index1.html … blog/index.html
//! └── pages/*.json  ── pages ───→  └── about/index.html
//! ```
//!
//! Posts are loaded oldest first and rendered by the blog context. The same
//! posts are bundled into overview pages, which get their own context with
//! reader navigation across all overview pages. Standalone pages go through
//! the pages context. The stylesheet collects the CSS of all three contexts.
//!
//! Rendering is pure ([`render_site`]); [`write_site`] is the only step that
//! touches the output directory. The build is all or nothing: a record or
//! config error, an unsafe output path, or two files claiming the same path
//! aborts before a single file is written.

use std::collections::HashSet;
use std::fs;
use std::path::{Component as PathComponent, Path, PathBuf};
use thiserror::Error;

use crate::bundle::{OverviewSettings, generate_bundles, overview_elements};
use crate::config::{self, ConfigError, SiteConfig};
use crate::context::{Context, RenderedPage, site_css};
use crate::element::{Element, Location};
use crate::record::{self, RecordError};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Record error: {0}")]
    Record(#[from] RecordError),
    #[error("Output path escapes the output directory: {0}")]
    UnsafePath(String),
    #[error("Two files would be written to the same output path: {0}")]
    DuplicateOutput(String),
}

/// Loaded source content.
#[derive(Debug, Clone)]
pub struct Source {
    pub config: SiteConfig,
    /// Posts, oldest first.
    pub posts: Vec<Element>,
    pub pages: Vec<Element>,
}

/// Read config and records below `root`.
pub fn load_source(root: &Path) -> Result<Source, BuildError> {
    let config = config::load_config(root)?;
    let posts = record::load_elements(&root.join(&config.site.posts_dir), &config)?;
    let pages = record::load_elements(&root.join(&config.site.pages_dir), &config)?;
    tracing::info!(posts = posts.len(), pages = pages.len(), "Loaded source");
    Ok(Source {
        config,
        posts,
        pages,
    })
}

/// Rendered pages of one context.
#[derive(Debug, Clone)]
pub struct RenderedContext {
    pub name: String,
    pub pages: Vec<RenderedPage>,
}

/// The complete site, ready to be written.
#[derive(Debug, Clone)]
pub struct RenderedSite {
    pub contexts: Vec<RenderedContext>,
    /// Site-relative path of the stylesheet.
    pub css_url: String,
    pub css: String,
}

impl RenderedSite {
    pub fn pages(&self) -> impl Iterator<Item = &RenderedPage> {
        self.contexts.iter().flat_map(|c| c.pages.iter())
    }

    pub fn page_count(&self) -> usize {
        self.contexts.iter().map(|c| c.pages.len()).sum()
    }
}

fn overview_settings(config: &SiteConfig) -> OverviewSettings {
    OverviewSettings {
        fs_path: config.site.blog_path.clone(),
        domain: config.site.domain.clone(),
        title: config.site.blog_title.clone(),
        description: format!("{} - {}", config.site.name, config.site.blog_title),
        default_image_url: config.site.default_image_url.clone(),
    }
}

/// Render every page and the shared stylesheet.
pub fn render_site(source: Source) -> RenderedSite {
    let Source {
        config,
        posts,
        pages,
    } = source;

    let overviews = {
        let bundles = generate_bundles(&posts);
        tracing::debug!(bundles = bundles.len(), "Bundled posts");
        overview_elements(&bundles, &overview_settings(&config))
    };
    let overview_locations: Vec<Location> =
        overviews.iter().map(|e| e.location().clone()).collect();

    let mut blog = Context::blog(&config);
    blog.add_elements(posts);
    let mut standalone = Context::pages(&config);
    standalone.add_elements(pages);
    let mut overview = Context::overview(&config, overview_locations);
    overview.add_elements(overviews);

    let css = site_css(&[&blog, &standalone, &overview]);
    let contexts = [blog, standalone, overview]
        .into_iter()
        .map(|mut ctx| RenderedContext {
            name: ctx.name().to_string(),
            pages: ctx.render(),
        })
        .collect();

    RenderedSite {
        contexts,
        css_url: config.site.css_url,
        css,
    }
}

/// Filesystem path of a site-relative `url` below `output`.
///
/// Parent-directory components are rejected so records can't write outside
/// the output directory.
pub fn output_path(output: &Path, url: &str) -> Result<PathBuf, BuildError> {
    let relative = Path::new(url.trim_start_matches('/'));
    let safe = relative
        .components()
        .all(|c| matches!(c, PathComponent::Normal(_) | PathComponent::CurDir));
    if !safe || relative.as_os_str().is_empty() {
        return Err(BuildError::UnsafePath(url.to_string()));
    }
    Ok(output.join(relative))
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

/// One file of the rendered site: where it goes and what it holds.
struct Target<'a> {
    path: PathBuf,
    contents: &'a str,
    kind: &'static str,
}

/// Resolve every page and the stylesheet to a path below `output`.
///
/// Fails on the first unsafe path and on the first path claimed twice, so
/// two records can't silently overwrite each other (or an overview page).
fn output_targets<'a>(site: &'a RenderedSite, output: &Path) -> Result<Vec<Target<'a>>, BuildError> {
    let mut seen = HashSet::new();
    let files = site
        .pages()
        .map(|page| (page.url(), page.html.as_str(), "page"))
        .chain(std::iter::once((site.css_url.clone(), site.css.as_str(), "stylesheet")));

    let mut targets = Vec::new();
    for (url, contents, kind) in files {
        let path = output_path(output, &url)?;
        if !seen.insert(path.clone()) {
            return Err(BuildError::DuplicateOutput(url));
        }
        targets.push(Target {
            path,
            contents,
            kind,
        });
    }
    Ok(targets)
}

/// Write all pages and the stylesheet below `output`.
///
/// Every target path is checked before anything is written.
pub fn write_site(site: &RenderedSite, output: &Path) -> Result<(), BuildError> {
    for target in output_targets(site, output)? {
        write_file(&target.path, target.contents)?;
        tracing::info!(path = %target.path.display(), kind = target.kind, "Wrote file");
    }
    Ok(())
}

/// Load, render and write the site.
pub fn build(source: &Path, output: &Path) -> Result<RenderedSite, BuildError> {
    let site = render_site(load_source(source)?);
    write_site(&site, output)?;
    Ok(site)
}

/// Load and render the site without writing anything.
///
/// Runs the same output path checks as [`write_site`].
pub fn check(source: &Path) -> Result<RenderedSite, BuildError> {
    let site = render_site(load_source(source)?);
    output_targets(&site, Path::new(""))?;
    Ok(site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{find_rendered, numbered_posts, page, write_post_json};
    use tempfile::TempDir;

    fn source(posts: Vec<Element>, pages: Vec<Element>) -> Source {
        Source {
            config: SiteConfig::default(),
            posts,
            pages,
        }
    }

    fn context<'a>(site: &'a RenderedSite, name: &str) -> &'a RenderedContext {
        site.contexts.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn render_site_has_three_contexts() {
        let site = render_site(source(numbered_posts(25), vec![page("About", "/about/")]));
        let names: Vec<&str> = site.contexts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["blog", "pages", "overview"]);
        assert_eq!(context(&site, "blog").pages.len(), 25);
        assert_eq!(context(&site, "pages").pages.len(), 1);
        assert_eq!(context(&site, "overview").pages.len(), 3);
        assert_eq!(site.page_count(), 29);
    }

    #[test]
    fn overview_pages_navigate_between_each_other() {
        let site = render_site(source(numbered_posts(25), vec![]));
        let pages = &context(&site, "overview").pages;

        let newest = find_rendered(pages, "/blog/index.html");
        assert!(newest.html.contains(r#"<link href="/blog/index1.html" rel="first" />"#));
        assert!(newest.html.contains(r#"<link href="/blog/index2.html" rel="prev" />"#));
        assert!(newest.html.contains("<span>newest &gt;&gt;</span>"));

        let oldest = find_rendered(pages, "/blog/index1.html");
        assert!(oldest.html.contains(r#"<a href="/blog/index2.html" rel="next">next &gt;</a>"#));
        assert!(oldest.html.contains("post 10</span>"));
    }

    #[test]
    fn two_overview_pages_have_no_reader_navigation() {
        let site = render_site(source(numbered_posts(15), vec![]));
        let pages = &context(&site, "overview").pages;
        assert_eq!(pages.len(), 2);
        assert!(!pages[0].html.contains("readerNavi"));
    }

    #[test]
    fn no_posts_no_overview() {
        let site = render_site(source(vec![], vec![page("About", "/about/")]));
        assert!(context(&site, "overview").pages.is_empty());
    }

    #[test]
    fn css_is_shared_and_compact() {
        let site = render_site(source(numbered_posts(1), vec![]));
        assert_eq!(site.css_url, "/styles.css");
        assert!(site.css.contains(".readerNavi{"));
        assert!(!site.css.contains('\n'));
    }

    #[test]
    fn output_path_rejects_parent_dirs() {
        let out = Path::new("/out");
        assert_eq!(
            output_path(out, "/blog/index.html").unwrap(),
            PathBuf::from("/out/blog/index.html")
        );
        assert!(matches!(
            output_path(out, "/../etc/index.html"),
            Err(BuildError::UnsafePath(_))
        ));
        assert!(output_path(out, "/").is_err());
    }

    #[test]
    fn build_writes_pages_and_css() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_post_json(
            &src.path().join("posts"),
            "hello",
            "Hello",
            "2017-01-03 10:00:00",
            "https://example.org/blog/2017/1/3/hello/",
        );

        let site = build(src.path(), out.path()).unwrap();
        assert_eq!(site.page_count(), 2);

        let post = fs::read_to_string(out.path().join("blog/2017/1/3/hello/index.html")).unwrap();
        assert!(post.starts_with("<!doctype html><html lang=\"en\">"));
        assert!(post.contains("<title>Hello</title>"));
        assert!(out.path().join("blog/index.html").is_file());
        assert!(out.path().join("styles.css").is_file());
    }

    #[test]
    fn broken_record_aborts_before_writing() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let posts = src.path().join("posts");
        write_post_json(&posts, "good", "Good", "2017-01-01", "https://x.org/good/");
        write_post_json(&posts, "bad", "Bad", "2017-01-02", "bad-url");

        let result = build(src.path(), out.path());
        assert!(matches!(result, Err(BuildError::Record(RecordError::MalformedUrl(_)))));
        assert!(fs::read_dir(out.path()).unwrap().next().is_none());
    }

    #[test]
    fn page_colliding_with_overview_aborts_before_writing() {
        let out = TempDir::new().unwrap();
        let site = render_site(source(numbered_posts(3), vec![page("Landing", "/blog/")]));

        let result = write_site(&site, out.path());
        assert!(matches!(
            result,
            Err(BuildError::DuplicateOutput(ref url)) if url == "/blog/index.html"
        ));
        assert!(fs::read_dir(out.path()).unwrap().next().is_none());
    }

    #[test]
    fn page_colliding_with_stylesheet_is_rejected() {
        let mut site = render_site(source(vec![], vec![page("About", "/about/")]));
        site.css_url = "/about/index.html".to_string();
        let result = write_site(&site, Path::new("/nonexistent-out"));
        assert!(matches!(result, Err(BuildError::DuplicateOutput(_))));
    }

    #[test]
    fn check_reports_duplicate_output() {
        let src = TempDir::new().unwrap();
        write_post_json(&src.path().join("posts"), "a", "A", "2017-01-01", "https://x.org/a/");
        write_post_json(&src.path().join("pages"), "landing", "Landing", "2017-01-01", "https://x.org/blog/");
        let result = check(src.path());
        assert!(matches!(result, Err(BuildError::DuplicateOutput(_))));
    }

    #[test]
    fn check_does_not_write() {
        let src = TempDir::new().unwrap();
        write_post_json(&src.path().join("posts"), "a", "A", "2017-01-01", "https://x.org/a/");
        let site = check(src.path()).unwrap();
        assert_eq!(site.page_count(), 2);
        assert!(!src.path().join("blog").exists());
    }
}
