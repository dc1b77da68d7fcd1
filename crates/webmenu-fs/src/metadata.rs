//! Page metadata extraction from rendered HTML.
//!
//! Title priority:
//! 1. `<meta name="menu:link.text" content="...">`
//! 2. `<title>` text, up to the first ` | `
//! 3. First `<h1>` text
//! 4. Title derived from the last URL segment (`Home` for the root)
//!
//! Excerpt priority: `<meta name="menu:excerpt">`, then `<meta name="description">`.

use std::sync::LazyLock;

use regex::Regex;
use webmenu_site::{Heading, PageSource, split_url_path, title_from_segment};

static META_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<meta\s[^>]*>").unwrap());

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

static HEADING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h([1-6])(\s[^>]*)?>(.*?)</h[1-6]\s*>").unwrap());

static INNER_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Metadata extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// Display title.
    pub title: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// Short description.
    pub excerpt: Option<String>,
}

/// Extract metadata from `html` of the page at `url_path`.
#[must_use]
pub fn extract_metadata(html: &str, url_path: &str) -> PageMetadata {
    let metas = meta_tags(html);
    let meta = |name: &str| {
        metas
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, content)| decode_entities(content).trim().to_owned())
            .filter(|content| !content.is_empty())
    };

    let headings = extract_headings(html);

    let title = meta("menu:link.text")
        .or_else(|| document_title(html))
        .or_else(|| {
            headings
                .iter()
                .find(|h| h.level == 1 && !h.text.is_empty())
                .map(|h| h.text.clone())
        })
        .unwrap_or_else(|| {
            split_url_path(url_path)
                .last()
                .map_or_else(|| "Home".to_owned(), |segment| title_from_segment(segment))
        });

    let excerpt = meta("menu:excerpt").or_else(|| meta("description"));

    PageMetadata {
        title,
        headings,
        excerpt,
    }
}

/// Build a [`PageSource`] from a page's URL path and rendered HTML.
#[must_use]
pub fn page_source(url_path: &str, html: String) -> PageSource {
    let metadata = extract_metadata(&html, url_path);
    let mut source = PageSource::new(url_path, &metadata.title)
        .with_headings(metadata.headings)
        .with_html(html);
    source.excerpt = metadata.excerpt;
    source
}

/// `(name, content)` of every `<meta>` tag carrying both attributes.
fn meta_tags(html: &str) -> Vec<(String, String)> {
    META_TAG
        .find_iter(html)
        .filter_map(|tag| {
            let attrs = attributes(tag.as_str());
            let name = attr_value(&attrs, "name")?;
            let content = attr_value(&attrs, "content")?;
            Some((name.to_owned(), content.to_owned()))
        })
        .collect()
}

fn attributes(tag: &str) -> Vec<(&str, &str)> {
    ATTR.captures_iter(tag)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let value = caps.get(2).or_else(|| caps.get(3))?.as_str();
            Some((name, value))
        })
        .collect()
}

fn attr_value<'a>(attrs: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| *v)
}

fn document_title(html: &str) -> Option<String> {
    let caps = TITLE_TAG.captures(html)?;
    let text = text_content(caps.get(1)?.as_str());
    let title = text.split(" | ").next().unwrap_or_default().trim();
    (!title.is_empty()).then(|| title.to_owned())
}

/// Extract `<h1>`..`<h6>` headings in document order.
#[must_use]
pub fn extract_headings(html: &str) -> Vec<Heading> {
    HEADING_TAG
        .captures_iter(html)
        .filter_map(|caps| {
            let level = caps.get(1)?.as_str().parse().ok()?;
            let id = caps
                .get(2)
                .and_then(|attrs| attr_value(&attributes(attrs.as_str()), "id").map(str::to_owned))
                .filter(|id| !id.is_empty());
            let text = text_content(caps.get(3)?.as_str());
            Some(Heading { id, level, text })
        })
        .collect()
}

/// Strip tags, decode entities and collapse whitespace.
fn text_content(html: &str) -> String {
    let stripped = INNER_TAG.replace_all(html, "");
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode the basic named and numeric character references.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_owned();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .and_then(|semi| Some((decode_entity(&tail[1..semi])?, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_from_link_text_meta() {
        let html = r#"<head><meta name="menu:link.text" content="Short"><title>Long title | Site</title></head>"#;

        assert_eq!(extract_metadata(html, "page").title, "Short");
    }

    #[test]
    fn test_title_from_title_tag() {
        let html = "<head><title>Button Blue | Design System</title></head><h1>Other</h1>";

        assert_eq!(extract_metadata(html, "page").title, "Button Blue");
    }

    #[test]
    fn test_title_from_first_h1() {
        let html = r#"<h2>Intro</h2><h1 id="main">Getting <em>Started</em></h1>"#;

        assert_eq!(extract_metadata(html, "page").title, "Getting Started");
    }

    #[test]
    fn test_title_from_segment() {
        assert_eq!(extract_metadata("<p>x</p>", "components/button-blue").title, "Button Blue");
        assert_eq!(extract_metadata("<p>x</p>", "").title, "Home");
    }

    #[test]
    fn test_headings_with_ids() {
        let html = concat!(
            r#"<h1>Title</h1>"#,
            r#"<h2 id="every-headline" class="x">Every headline</h2>"#,
            r#"<p>text</p>"#,
            r#"<h3 id='will-be'>Will <code>be</code></h3>"#,
            "<H4 id=\"upper\">\n  Multi\n  line\n</H4>",
        );

        assert_eq!(
            extract_headings(html),
            vec![
                Heading {
                    id: None,
                    level: 1,
                    text: "Title".to_owned(),
                },
                Heading::new(2, "every-headline", "Every headline"),
                Heading::new(3, "will-be", "Will be"),
                Heading::new(4, "upper", "Multi line"),
            ]
        );
    }

    #[test]
    fn test_heading_attribute_names_are_exact() {
        let html = r#"<h2 data-id="nope">Text</h2>"#;

        assert_eq!(extract_headings(html)[0].id, None);
    }

    #[test]
    fn test_excerpt_priority() {
        let both = r#"<meta name="description" content="Generic"><meta name="menu:excerpt" content="Specific">"#;
        let description = r#"<meta content="Generic" name="description">"#;

        assert_eq!(extract_metadata(both, "a").excerpt.as_deref(), Some("Specific"));
        assert_eq!(extract_metadata(description, "a").excerpt.as_deref(), Some("Generic"));
        assert_eq!(extract_metadata("<p></p>", "a").excerpt, None);
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = "<title>Q &amp; A &#8212; &#x41;</title><h2 id=\"a\">1 &lt; 2</h2>";
        let metadata = extract_metadata(html, "a");

        assert_eq!(metadata.title, "Q & A \u{2014} A");
        assert_eq!(metadata.headings[0].text, "1 < 2");
    }

    #[test]
    fn test_decode_unknown_entity_is_kept() {
        assert_eq!(decode_entities("a &unknown; b & c"), "a &unknown; b & c");
    }

    #[test]
    fn test_page_source_keeps_html() {
        let html = r#"<title>Guide</title><meta name="description" content="How to"><web-menu name="next"></web-menu>"#;

        let source = page_source("docs/guide", html.to_owned());

        assert_eq!(source.url_path, vec!["docs", "guide"]);
        assert_eq!(source.title, "Guide");
        assert_eq!(source.excerpt.as_deref(), Some("How to"));
        assert_eq!(source.html, html);
    }
}
