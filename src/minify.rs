//! Whitespace compaction for the shared stylesheet and page scripts.
//!
//! This is deliberately conservative. CSS loses comments and insignificant
//! whitespace; quoted strings are copied untouched. JS only loses indentation
//! and blank lines, since anything smarter needs a real tokenizer (regex
//! literals, ASI).

/// Compact a stylesheet.
///
/// ```
/// use blogdoc::minify::minify_css;
///
/// assert_eq!(minify_css("a {\n    color: grey;\n}\n"), "a{color:grey}");
/// ```
pub fn minify_css(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    let mut pending_space = false;
    // One entry per open brace: true for a declaration block, false for a
    // block of rules (`@media`, `@supports`, …).
    let mut blocks: Vec<bool> = Vec::new();
    let mut prelude_start = true;
    let mut at_rule = false;

    while let Some(c) = chars.next() {
        if prelude_start && !c.is_whitespace() && !(c == '/' && chars.peek() == Some(&'*')) {
            at_rule = c == '@';
            prelude_start = false;
        }
        match c {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                pending_space = true;
            }
            '"' | '\'' => {
                flush_space(&mut out, &mut pending_space);
                out.push(c);
                let mut escaped = false;
                for s in chars.by_ref() {
                    out.push(s);
                    if escaped {
                        escaped = false;
                    } else if s == '\\' {
                        escaped = true;
                    } else if s == c {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => pending_space = true,
            // `a :hover` and `a:hover` differ, so in selectors and at-rule
            // preludes the space before ':' is significant.
            ':' if blocks.last() != Some(&true) => {
                flush_space(&mut out, &mut pending_space);
                out.push(c);
            }
            '{' | '}' | ';' | ':' | ',' | '>' => {
                pending_space = false;
                match c {
                    '{' => {
                        blocks.push(!at_rule);
                        prelude_start = true;
                    }
                    '}' => {
                        blocks.pop();
                        prelude_start = true;
                        if out.ends_with(';') {
                            out.pop();
                        }
                    }
                    ';' => prelude_start = true,
                    _ => {}
                }
                out.push(c);
                while chars.peek().is_some_and(|n| n.is_whitespace()) {
                    chars.next();
                }
            }
            _ => {
                flush_space(&mut out, &mut pending_space);
                out.push(c);
            }
        }
    }
    out
}

fn flush_space(out: &mut String, pending: &mut bool) {
    if *pending && !out.is_empty() && !out.ends_with(['{', '}', ';', ':', ',', '>']) {
        out.push(' ');
    }
    *pending = false;
}

/// Compact a script: trim every line and drop empty ones.
pub fn minify_js(js: &str) -> String {
    js.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_drops_comments_and_whitespace() {
        let css = "/* base */\nbody, p {\n    margin: 0;\n    padding: 0;\n}\n";
        assert_eq!(minify_css(css), "body,p{margin:0;padding:0}");
    }

    #[test]
    fn css_keeps_descendant_space() {
        assert_eq!(minify_css(".a   .b  { color : red }"), ".a .b{color:red}");
    }

    #[test]
    fn css_keeps_space_inside_values() {
        assert_eq!(
            minify_css("a { border: 1px   solid #ccc; }"),
            "a{border:1px solid #ccc}"
        );
    }

    #[test]
    fn css_keeps_quoted_strings() {
        assert_eq!(
            minify_css(r#"a::after { content: "  x ; y  "; }"#),
            r#"a::after{content:"  x ; y  "}"#
        );
    }

    #[test]
    fn css_keeps_space_before_pseudo_class_in_selector() {
        assert_eq!(minify_css("nav :hover { color: red }"), "nav :hover{color:red}");
        assert_eq!(minify_css("a:hover { color: red }"), "a:hover{color:red}");
    }

    #[test]
    fn css_keeps_space_before_pseudo_class_inside_media_block() {
        assert_eq!(
            minify_css("@media (max-width: 600px) { nav :hover { color: red } }"),
            "@media (max-width:600px){nav :hover{color:red}}"
        );
        assert_eq!(
            minify_css("@media print {\n    a:hover { color: red; }\n}\n"),
            "@media print{a:hover{color:red}}"
        );
    }

    #[test]
    fn css_nested_at_rules() {
        assert_eq!(
            minify_css("@supports (display: grid) { @media print { ul :first-child { margin : 0 } } }"),
            "@supports (display:grid){@media print{ul :first-child{margin:0}}}"
        );
    }

    #[test]
    fn css_rule_after_media_block_is_declarations_again() {
        assert_eq!(
            minify_css("@media print { a { b: c } } p { color : red }"),
            "@media print{a{b:c}}p{color:red}"
        );
    }

    #[test]
    fn css_child_combinator() {
        assert_eq!(minify_css("ul > li { margin: 0 }"), "ul>li{margin:0}");
    }

    #[test]
    fn css_empty() {
        assert_eq!(minify_css("  \n "), "");
    }

    #[test]
    fn js_trims_lines() {
        let js = "(function () {\n    var a = 1;\n\n    return a;\n})();\n";
        assert_eq!(minify_js(js), "(function () {\nvar a = 1;\nreturn a;\n})();");
    }
}
