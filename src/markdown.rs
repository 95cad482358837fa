//! Markdown conversion and new-post authoring.
//!
//! New posts are written in Markdown and stored as records of the same shape
//! the exporter produces, so the build treats them exactly like imported
//! posts. Conversion uses CommonMark without extensions:
//!
//! ```
//! use blogdoc::markdown::markdown_to_html;
//!
//! assert_eq!(markdown_to_html("test"), "<p>test</p>\n");
//! ```
//!
//! The record gets the url `{domain}{blog_path}{Y}/{M}/{D}/{slug}/` and is
//! written to `{posts_dir}/{YYYY-MM-DD}-{slug}.json`. Existing files are never
//! overwritten.

use chrono::NaiveDateTime;
use pulldown_cmark::{Options, Parser, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::naming::{blog_url, slugify};
use crate::record::{CustomFields, Entry, Record};

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Title '{0}' has no characters usable in a url")]
    EmptySlug(String),
    #[error("Post already exists: {0}")]
    Exists(PathBuf),
}

/// Render Markdown to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Everything needed to author a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub markdown: String,
    /// Empty derives the excerpt from the first line of text.
    pub excerpt: String,
    pub thumb_img: String,
    pub post_img: String,
}

/// First non-empty line of `markdown`, without heading markers.
fn derive_excerpt(markdown: &str) -> String {
    markdown
        .lines()
        .map(|l| l.trim().trim_start_matches('#').trim())
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Build the record for `post`, published at `now`.
pub fn new_post_record(
    post: &NewPost,
    config: &SiteConfig,
    now: NaiveDateTime,
) -> Result<Record, MarkdownError> {
    let slug = slugify(&post.title);
    if slug.is_empty() {
        return Err(MarkdownError::EmptySlug(post.title.clone()));
    }
    let excerpt = if post.excerpt.is_empty() {
        derive_excerpt(&post.markdown)
    } else {
        post.excerpt.clone()
    };
    Ok(Record {
        thumb_img: post.thumb_img.clone(),
        post_img: post.post_img.clone(),
        filename: String::new(),
        post: Entry {
            post_id: "000".to_string(),
            date: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            url: blog_url(&config.site.domain, &config.site.blog_path, now.date(), &slug),
            title: post.title.clone(),
            excerpt,
            content: markdown_to_html(&post.markdown),
            custom_fields: CustomFields::default(),
        },
    })
}

/// Write `post` into the posts directory below `source`.
///
/// Returns the path of the new record and the record as written.
pub fn write_new_post(
    source: &Path,
    config: &SiteConfig,
    post: &NewPost,
    now: NaiveDateTime,
) -> Result<(PathBuf, Record), MarkdownError> {
    let record = new_post_record(post, config, now)?;
    let dir = source.join(&config.site.posts_dir);
    let path = dir.join(format!(
        "{}-{}.json",
        now.format("%Y-%m-%d"),
        slugify(&post.title)
    ));
    if path.exists() {
        return Err(MarkdownError::Exists(path));
    }
    fs::create_dir_all(&dir)?;
    fs::write(&path, serde_json::to_string_pretty(&record)?)?;
    tracing::info!(path = %path.display(), url = %record.post.url, "Wrote new post");
    Ok((path, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 1, 3)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn dawn() -> NewPost {
        NewPost {
            title: "Dawn of the Dead".to_string(),
            markdown: "# Zombies\n\nThey are *back*.\n".to_string(),
            ..NewPost::default()
        }
    }

    #[test]
    fn plain_paragraph() {
        assert_eq!(markdown_to_html("test"), "<p>test</p>\n");
    }

    #[test]
    fn no_extensions_enabled() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn emphasis_and_headings() {
        assert_eq!(
            markdown_to_html("# T\n\n*x*"),
            "<h1>T</h1>\n<p><em>x</em></p>\n"
        );
    }

    #[test]
    fn record_url_uses_unpadded_date_and_slug() {
        let record = new_post_record(&dawn(), &SiteConfig::default(), now()).unwrap();
        assert_eq!(
            record.post.url,
            "https://example.org/blog/2017/1/3/dawn-of-the-dead/"
        );
        assert_eq!(record.post.date, "2017-01-03 10:30:00");
        assert_eq!(record.post.post_id, "000");
    }

    #[test]
    fn record_content_is_html() {
        let record = new_post_record(&dawn(), &SiteConfig::default(), now()).unwrap();
        assert_eq!(
            record.post.content,
            "<h1>Zombies</h1>\n<p>They are <em>back</em>.</p>\n"
        );
    }

    #[test]
    fn excerpt_derived_from_first_line() {
        let record = new_post_record(&dawn(), &SiteConfig::default(), now()).unwrap();
        assert_eq!(record.post.excerpt, "Zombies");

        let explicit = NewPost {
            excerpt: "Short".to_string(),
            ..dawn()
        };
        let record = new_post_record(&explicit, &SiteConfig::default(), now()).unwrap();
        assert_eq!(record.post.excerpt, "Short");
    }

    #[test]
    fn unusable_title_is_error() {
        let post = NewPost {
            title: "???".to_string(),
            ..dawn()
        };
        let result = new_post_record(&post, &SiteConfig::default(), now());
        assert!(matches!(result, Err(MarkdownError::EmptySlug(_))));
    }

    #[test]
    fn written_record_loads_as_element() {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::default();
        let (path, record) = write_new_post(tmp.path(), &config, &dawn(), now()).unwrap();
        assert!(path.ends_with("posts/2017-01-03-dawn-of-the-dead.json"));
        assert_eq!(
            record.post.url,
            "https://example.org/blog/2017/1/3/dawn-of-the-dead/"
        );

        let elements = crate::record::load_elements(&tmp.path().join("posts"), &config).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].url(), "/blog/2017/1/3/dawn-of-the-dead/index.html");
        assert_eq!(elements[0].image_url(), "/img/default.png");
    }

    #[test]
    fn existing_post_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::default();
        write_new_post(tmp.path(), &config, &dawn(), now()).unwrap();
        let again = write_new_post(tmp.path(), &config, &dawn(), now());
        assert!(matches!(again, Err(MarkdownError::Exists(_))));
    }
}
