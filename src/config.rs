//! Site configuration module.
//!
//! Handles loading, validating, and merging the `config.toml` at the root of
//! the source directory. Stock defaults are the base layer; the user file only
//! needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! name = "My Blog"
//! domain = "https://example.org"   # production domain, no trailing slash
//! home_url = "/"
//! css_url = "/styles.css"          # link href and output filename of the stylesheet
//! rss_url = ""                   # feed link href; empty emits no link
//! default_image_url = "/img/default.png"
//! blog_path = "/blog/"             # where the paginated post overview lives
//! blog_title = "Blog"
//! posts_dir = "posts"              # exported post records, relative to the source dir
//! pages_dir = "pages"              # exported page records
//!
//! [social]
//! twitter_handle = ""
//! twitter_card_type = "summary_large_image"
//! og_type = "article"
//! fb_page = ""
//! content_section = "blog"
//! content_tags = ""
//!
//! [comments]
//! disqus_shortname = ""            # empty disables comment threads
//!
//! [copyright]
//! owner = ""
//! since = 0                        # 0 omits the year
//!
//! [features]
//! cookie_banner = true
//! gallery = false                  # placeholder grid on standalone pages
//!
//! [[navigation.main]]
//! title = "Blog"
//! path = "/blog/"
//! filename = "index.html"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::element::Location;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity, urls and source directories.
    pub site: SiteSettings,
    /// Values for the social meta tags.
    pub social: SocialConfig,
    /// Comment thread settings.
    pub comments: CommentsConfig,
    /// Footer copyright notice.
    pub copyright: CopyrightConfig,
    /// Optional page components.
    pub features: FeaturesConfig,
    /// Main and footer navigation links.
    pub navigation: NavigationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    pub name: String,
    pub domain: String,
    pub home_url: String,
    pub css_url: String,
    pub rss_url: String,
    pub default_image_url: String,
    pub blog_path: String,
    pub blog_title: String,
    pub posts_dir: String,
    pub pages_dir: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "My Blog".to_string(),
            domain: "https://example.org".to_string(),
            home_url: "/".to_string(),
            css_url: "/styles.css".to_string(),
            rss_url: String::new(),
            default_image_url: "/img/default.png".to_string(),
            blog_path: "/blog/".to_string(),
            blog_title: "Blog".to_string(),
            posts_dir: "posts".to_string(),
            pages_dir: "pages".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    pub twitter_handle: String,
    pub twitter_card_type: String,
    pub og_type: String,
    pub fb_page: String,
    pub content_section: String,
    pub content_tags: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            twitter_handle: String::new(),
            twitter_card_type: "summary_large_image".to_string(),
            og_type: "article".to_string(),
            fb_page: String::new(),
            content_section: "blog".to_string(),
            content_tags: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommentsConfig {
    /// Disqus shortname; empty disables the comment thread.
    pub disqus_shortname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyrightConfig {
    pub owner: String,
    pub since: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeaturesConfig {
    pub cookie_banner: bool,
    pub gallery: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            cookie_banner: true,
            gallery: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    pub main: Vec<NavLink>,
    pub footer: Vec<NavLink>,
}

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub title: String,
    /// Directory part of the target, e.g. `/blog/`.
    pub path: String,
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "index.html".to_string()
}

impl NavLink {
    /// The link as a location on `domain`.
    pub fn to_location(&self, domain: &str) -> Location {
        Location::new(&self.path, &self.filename, domain, &self.title, "")
    }
}

impl NavigationConfig {
    pub fn main_locations(&self, domain: &str) -> Vec<Location> {
        self.main.iter().map(|l| l.to_location(domain)).collect()
    }

    pub fn footer_locations(&self, domain: &str) -> Vec<Location> {
        self.footer.iter().map(|l| l.to_location(domain)).collect()
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.domain.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.domain must not end with '/'".into(),
            ));
        }
        for (key, value) in [
            ("site.blog_path", &self.site.blog_path),
            ("site.home_url", &self.site.home_url),
        ] {
            if !value.starts_with('/') || !value.ends_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{key} must start and end with '/'"
                )));
            }
        }
        if self.site.css_url.is_empty() || self.site.css_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.css_url must name a file".into(),
            ));
        }
        for link in self.navigation.main.iter().chain(&self.navigation.footer) {
            if !link.path.ends_with('/') {
                return Err(ConfigError::Validation(format!(
                    "navigation path '{}' must end with '/'",
                    link.path
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(root = %root.display(), domain = %config.site.domain, "Loaded config");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# blogdoc configuration
# ======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity and layout
# ---------------------------------------------------------------------------
[site]
name = "My Blog"

# Production domain including scheme, without trailing slash.
domain = "https://example.org"

home_url = "/"

# Stylesheet href; the shared CSS is also written to this path.
css_url = "/styles.css"

# Feed published alongside the site, linked from every page head.
# The feed itself is not generated; leave empty when there is none.
rss_url = ""

# Used when a record has no thumbnail or post image.
default_image_url = "/img/default.png"

# Directory of the paginated post overview (index.html, index1.html, ...).
blog_path = "/blog/"
blog_title = "Blog"

# Exported JSON records, relative to the source directory.
posts_dir = "posts"
pages_dir = "pages"

# ---------------------------------------------------------------------------
# Social meta tags (Twitter card, Open Graph)
# ---------------------------------------------------------------------------
[social]
twitter_handle = ""
twitter_card_type = "summary_large_image"
og_type = "article"
fb_page = ""
content_section = "blog"
content_tags = ""

# ---------------------------------------------------------------------------
# Comments
# ---------------------------------------------------------------------------
[comments]
# Disqus shortname. Leave empty to disable comment threads.
disqus_shortname = ""

# ---------------------------------------------------------------------------
# Copyright notice
# ---------------------------------------------------------------------------
[copyright]
owner = ""
# First year of the notice; 0 omits the year.
since = 0

# ---------------------------------------------------------------------------
# Optional components
# ---------------------------------------------------------------------------
[features]
cookie_banner = true
gallery = false

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
# [[navigation.main]]
# title = "Blog"
# path = "/blog/"
# filename = "index.html"
#
# [[navigation.footer]]
# title = "Imprint"
# path = "/imprint/"
"##
}
