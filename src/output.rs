//! CLI output formatting.
//!
//! Output lists what the site contains, context by context, each page with
//! its positional index, title and the file it lands in:
//!
//! ```text
//! Blog (2 pages)
//!     001 Hello → blog/2017/1/3/hello/index.html
//!     002 Dawn → blog/2017/1/4/dawn/index.html
//!
//! Pages (1 page)
//!     001 About → about/index.html
//!
//! Overview (1 page)
//!     001 Blog - page 1 → blog/index.html
//!
//! Stylesheet → styles.css
//! Generated 4 pages
//! ```
//!
//! Each `format_*` function returns `Vec<String>` and is pure; the `print_*`
//! wrapper writes the lines to stdout.

use std::path::Path;

use crate::site::{RenderedContext, RenderedSite};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// `blog` → `Blog`.
fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_context(context: &RenderedContext) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        display_name(&context.name),
        plural(context.pages.len(), "page")
    )];
    for (i, page) in context.pages.iter().enumerate() {
        lines.push(format!(
            "    {} {} \u{2192} {}",
            format_index(i + 1),
            page.title,
            page.url().trim_start_matches('/')
        ));
    }
    lines
}

/// Format the inventory of a rendered site. `verb` heads the total line.
pub fn format_site_output(site: &RenderedSite, verb: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for context in site.contexts.iter().filter(|c| !c.pages.is_empty()) {
        lines.extend(format_context(context));
        lines.push(String::new());
    }
    lines.push(format!(
        "Stylesheet \u{2192} {}",
        site.css_url.trim_start_matches('/')
    ));
    lines.push(format!("{verb} {}", plural(site.page_count(), "page")));
    lines
}

pub fn print_site_output(site: &RenderedSite, verb: &str) {
    for line in format_site_output(site, verb) {
        println!("{}", line);
    }
}

pub fn format_new_post_output(path: &Path, url: &str) -> Vec<String> {
    vec![
        format!("Created {}", path.display()),
        format!("    Url: {}", url),
    ]
}

pub fn print_new_post_output(path: &Path, url: &str) {
    for line in format_new_post_output(path, url) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
