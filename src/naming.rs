//! Url naming for new posts.
//!
//! A post lives below the blog path in a directory named after its publish
//! date and a slug of its title:
//!
//! ```text
//! https://drewing.de/blog/2017/1/3/dawn-of-the-dead/
//! └─ domain ───────┘└blog┘└ date ─┘└ slug ────────┘
//! ```
//!
//! Date parts are not zero-padded, so January 3rd is `1/3`, not `01/03`.

use chrono::{Datelike, NaiveDate};

/// Lowercase `title`, keeping ASCII letters and digits and joining every other
/// run of characters into a single dash.
///
/// - `"Dawn of the Dead"` → `"dawn-of-the-dead"`
/// - `"  What's new?  "` → `"what-s-new"`
/// - `"2017: A Review"` → `"2017-a-review"`
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// `{year}/{month}/{day}/` without padding.
pub fn date_path(date: NaiveDate) -> String {
    format!("{}/{}/{}/", date.year(), date.month(), date.day())
}

/// Full url of a post published on `date` with `slug`.
///
/// `blog_path` must start and end with `/`, as config validation enforces.
pub fn blog_url(domain: &str, blog_path: &str, date: NaiveDate, slug: &str) -> String {
    format!("{domain}{blog_path}{}{slug}/", date_path(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn slug_of_plain_title() {
        assert_eq!(slugify("Dawn of the Dead"), "dawn-of-the-dead");
    }

    #[test]
    fn slug_collapses_punctuation_and_trims() {
        assert_eq!(slugify("  What's new?  "), "what-s-new");
        assert_eq!(slugify("a -- b"), "a-b");
    }

    #[test]
    fn slug_keeps_digits() {
        assert_eq!(slugify("2017: A Review"), "2017-a-review");
    }

    #[test]
    fn slug_drops_non_ascii() {
        assert_eq!(slugify("Über Zeichnen"), "ber-zeichnen");
    }

    #[test]
    fn slug_of_symbols_only_is_empty() {
        assert_eq!(slugify("?!"), "");
    }

    #[test]
    fn date_path_is_unpadded() {
        assert_eq!(date_path(date(2017, 1, 3)), "2017/1/3/");
        assert_eq!(date_path(date(2018, 12, 24)), "2018/12/24/");
    }

    #[test]
    fn blog_url_joins_parts() {
        assert_eq!(
            blog_url("https://drewing.de", "/blog/", date(2017, 1, 3), "dawn"),
            "https://drewing.de/blog/2017/1/3/dawn/"
        );
    }
}
