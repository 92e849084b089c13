//! HTML minification.
//!
//! # Responsibilities
//! - Collapse inter-tag and in-text whitespace
//! - Collapse whitespace inside tags and drop removable attribute quotes
//! - Trim raw `<script>`/`<style>` content line-wise
//!
//! # Design Decisions
//! - Comments are preserved: the hydration scripts rely on IE
//!   conditional comments
//! - Attribute quotes are only removed when the value is a safe token
//!   and is not followed by a self-closing slash
//! - Pure function of its input, so rendered documents stay
//!   byte-identical across calls

/// Minify a composed HTML document.
pub fn minify(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    // Closing tag prefix we are scanning for while inside raw content.
    let mut raw_close: Option<&'static str> = None;

    while !rest.is_empty() {
        if let Some(close) = raw_close.take() {
            let end = rest
                .to_ascii_lowercase()
                .find(close)
                .unwrap_or(rest.len());
            let (content, after) = rest.split_at(end);
            push_raw(&mut out, content);
            rest = after;
            continue;
        }

        match rest.find('<') {
            Some(lt) => {
                let (text, after) = rest.split_at(lt);
                push_text(&mut out, text);

                if after.starts_with("<!--") {
                    let end = after.find("-->").map(|i| i + 3).unwrap_or(after.len());
                    out.push_str(&after[..end]);
                    rest = &after[end..];
                    continue;
                }

                let tag_end = find_tag_end(after);
                let tag = &after[..tag_end];
                out.push_str(&minify_tag(tag));
                rest = &after[tag_end..];

                let name = tag_name(tag);
                if name.eq_ignore_ascii_case("script") {
                    raw_close = Some("</script");
                } else if name.eq_ignore_ascii_case("style") {
                    raw_close = Some("</style");
                }
            }
            None => {
                push_text(&mut out, rest);
                rest = "";
            }
        }
    }

    out
}

/// Append a text node, collapsing whitespace. Runs adjacent to tags are
/// dropped entirely; inner runs collapse to a single space.
fn push_text(out: &mut String, text: &str) {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else { return };

    let leading_ws = text.starts_with(char::is_whitespace);
    if leading_ws && !out.is_empty() && !out.ends_with('>') {
        out.push(' ');
    }
    out.push_str(first);
    for word in words {
        out.push(' ');
        out.push_str(word);
    }
}

/// Append raw script/style content, trimming each line and dropping
/// blank ones. Newlines are kept so statement boundaries survive.
fn push_raw(out: &mut String, content: &str) {
    let mut first = true;
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !first {
            out.push('\n');
        }
        out.push_str(line);
        first = false;
    }
}

/// Index one past the closing `>` of the tag at the start of `s`,
/// respecting quoted attribute values.
fn find_tag_end(s: &str) -> usize {
    let mut in_quote: Option<u8> = None;
    for (i, b) in s.bytes().enumerate() {
        match in_quote {
            Some(q) => {
                if b == q {
                    in_quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => in_quote = Some(b),
                b'>' => return i + 1,
                _ => {}
            },
        }
    }
    s.len()
}

fn tag_name(tag: &str) -> &str {
    let inner = tag.trim_start_matches('<');
    let end = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Collapse whitespace inside a tag and drop removable attribute quotes.
fn minify_tag(tag: &str) -> String {
    let mut collapsed = String::with_capacity(tag.len());
    let mut in_quote: Option<char> = None;
    let mut pending_space = false;

    for c in tag.chars() {
        match in_quote {
            Some(q) => {
                collapsed.push(c);
                if c == q {
                    in_quote = None;
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    in_quote = Some(c);
                    collapsed.push(c);
                } else if c.is_whitespace() {
                    pending_space = true;
                } else {
                    if pending_space && c != '>' {
                        collapsed.push(' ');
                    }
                    pending_space = false;
                    collapsed.push(c);
                }
            }
        }
    }

    strip_attr_quotes(&collapsed)
}

fn strip_attr_quotes(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut i = 0;

    while i < tag.len() {
        let rest = &tag[i..];
        if rest.starts_with("=\"") {
            if let Some(close) = rest[2..].find('"') {
                let value = &rest[2..2 + close];
                let after = &rest[2 + close + 1..];
                let next_ok = after.is_empty() || after.starts_with('>') || after.starts_with(' ');
                if !value.is_empty() && value.chars().all(safe_unquoted_char) && next_ok {
                    out.push('=');
                    out.push_str(value);
                    i += 2 + close + 1;
                    continue;
                }
            }
        }
        let c = rest.chars().next().unwrap_or('\0');
        out.push(c);
        i += c.len_utf8().max(1);
    }

    out
}

fn safe_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '/' | '#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_inter_tag_whitespace() {
        assert_eq!(
            minify("<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>"),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn collapses_text_whitespace() {
        assert_eq!(minify("<p>hello   brave\n world</p>"), "<p>hello brave world</p>");
    }

    #[test]
    fn collapses_whitespace_inside_tags() {
        assert_eq!(
            minify("<a  class=\"promo-link\"\n href=\"https://x.test/a\" >x</a>"),
            "<a class=promo-link href=https://x.test/a>x</a>"
        );
    }

    #[test]
    fn removes_only_safe_attribute_quotes() {
        // Quoted value followed by the self-closing slash keeps quotes.
        assert!(minify(r#"<img src="https://x.test/a.png"/>"#).contains(r#"src="https://x.test/a.png"/>"#));
        // Value with spaces keeps quotes.
        assert!(minify(r#"<img alt="two words">"#).contains(r#"alt="two words""#));
        // Safe token followed by space or '>' is unquoted.
        assert_eq!(
            minify(r#"<script crossorigin="anonymous" defer src="https://x.test/m.js"></script>"#),
            r#"<script crossorigin=anonymous defer src=https://x.test/m.js></script>"#
        );
    }

    #[test]
    fn preserves_conditional_comments() {
        let html = "<!--[if !IE]><!--><script src=\"https://x.test/m.js\"></script><!--<![endif]-->";
        let out = minify(html);
        assert!(out.contains("<!--[if !IE]><!-->"));
        assert!(out.contains("<!--<![endif]-->"));
    }

    #[test]
    fn preserves_script_content() {
        let out = minify("<script>\n  window.__INITIAL_DATA__={\"a\":1};\n</script>");
        assert_eq!(out, "<script>window.__INITIAL_DATA__={\"a\":1};</script>");
    }

    #[test]
    fn trims_style_content() {
        let out = minify("<style>\n  .promo{color:red}\n\n  .other{color:blue}\n</style>");
        assert_eq!(out, "<style>.promo{color:red}\n.other{color:blue}</style>");
    }

    #[test]
    fn minification_is_stable() {
        let html = "<p>a  b</p>\n<script>x = 1</script>";
        let once = minify(html);
        assert_eq!(minify(&once), once);
    }
}
