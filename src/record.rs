//! Exported post and page records.
//!
//! Every post or page of the site arrives as one JSON file. The key names are
//! fixed by the exporter and must match bit for bit:
//!
//! ```json
//! {
//!   "thumbImg": "...", "postImg": "...", "filename": "...",
//!   "post": {
//!     "post_id": "...", "date": "...", "url": "...",
//!     "title": "...", "excerpt": "...", "content": "...",
//!     "custom_fields": { "dsq_thread_id": ["..."] }
//!   }
//! }
//! ```
//!
//! Page records carry the same entry under `page` instead of `post`. Older
//! exports name the thumbnail `postThumb`. Missing keys read as empty.
//!
//! ## Defaults
//!
//! | Field | Empty value becomes |
//! |-------|---------------------|
//! | `thumbImg` | `site.default_image_url` |
//! | `postImg` | `site.default_image_url` |
//! | `filename` | `index.html` |
//!
//! The page path is taken from the entry `url` with scheme and host stripped,
//! see [`path_from_url`]. A url that can't be stripped fails the whole load.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::element::{Content, Element, Location};

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid record {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Malformed url '{0}': expected scheme://host/path")]
    MalformedUrl(String),
}

/// One exported JSON record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "thumbImg", alias = "postThumb")]
    pub thumb_img: String,
    #[serde(rename = "postImg")]
    pub post_img: String,
    pub filename: String,
    #[serde(alias = "page")]
    pub post: Entry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub post_id: String,
    pub date: String,
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub custom_fields: CustomFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFields {
    pub dsq_thread_id: Vec<String>,
}

impl Record {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Comment thread id, empty if the record has none.
    pub fn thread_id(&self) -> &str {
        self.post
            .custom_fields
            .dsq_thread_id
            .first()
            .map_or("", String::as_str)
    }

    /// Build the page this record describes.
    pub fn into_element(self, config: &SiteConfig) -> Result<Element, RecordError> {
        let fs_path = path_from_url(&self.post.url)?;
        let fallback = |value: String| {
            if value.is_empty() {
                config.site.default_image_url.clone()
            } else {
                value
            }
        };
        let filename = if self.filename.is_empty() {
            "index.html".to_string()
        } else {
            self.filename.clone()
        };
        let thread_id = self.thread_id().to_string();
        let location = Location::new(
            fs_path,
            filename,
            &config.site.domain,
            self.post.title,
            fallback(self.thumb_img),
        );
        Ok(Element::new(
            location,
            Content {
                id: self.post.post_id,
                description: self.post.excerpt,
                content: self.post.content,
                image_url: fallback(self.post_img),
                published_time: self.post.date,
                thread_id,
            },
        ))
    }
}

/// Strip scheme and host from a full url.
///
/// Returns `/` followed by everything after the third `/`-delimited segment,
/// with a trailing `/` added when missing so the result is always a directory.
///
/// ```
/// use blogdoc::record::path_from_url;
///
/// assert_eq!(path_from_url("https://drewing.de/blog/2017/1/3/x/").unwrap(), "/blog/2017/1/3/x/");
/// assert_eq!(path_from_url("https://drewing.de").unwrap(), "/");
/// assert!(path_from_url("drewing.de/x").is_err());
/// ```
pub fn path_from_url(url: &str) -> Result<String, RecordError> {
    let mut parts = url.splitn(4, '/');
    let (Some(_scheme), Some(_empty), Some(_host)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(RecordError::MalformedUrl(url.to_string()));
    };
    let rest = parts.next().unwrap_or("");
    let mut path = format!("/{rest}");
    if !path.ends_with('/') {
        path.push('/');
    }
    Ok(path)
}

/// Read every `*.json` record directly inside `dir`, sorted by filename.
///
/// A missing directory holds no records.
pub fn load_records(dir: &Path) -> Result<Vec<Record>, RecordError> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "No record directory");
        return Ok(Vec::new());
    }
    let mut records = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        let is_json = entry.file_type().is_file()
            && path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if !is_json {
            continue;
        }
        let json = fs::read_to_string(path)?;
        let record = Record::from_json(&json).map_err(|source| RecordError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record);
    }
    tracing::debug!(dir = %dir.display(), count = records.len(), "Read records");
    Ok(records)
}

/// Load the records in `dir` as pages, oldest first.
///
/// Ordering is by publish date, then by url for records sharing a date.
pub fn load_elements(dir: &Path, config: &SiteConfig) -> Result<Vec<Element>, RecordError> {
    let mut elements = load_records(dir)?
        .into_iter()
        .map(|r| r.into_element(config))
        .collect::<Result<Vec<_>, _>>()?;
    elements.sort_by(|a, b| {
        a.published_time()
            .cmp(b.published_time())
            .then_with(|| a.url().cmp(b.url()))
    });
    Ok(elements)
}
