//! Menu insertion engine.
//!
//! Finds `<web-menu name="...">...</web-menu>` placeholders in every page and
//! replaces their inner content with the fragment rendered by the registered
//! menu. The outer tag and its attributes are kept. Tag names match without
//! regard to ASCII case and attribute values may be quoted or bare.
//!
//! Pages are processed in parallel on the global rayon pool. Each page only
//! reads the shared tree and produces its own new markup; nothing is written
//! back until every page has succeeded, so a failed pass leaves the tree
//! untouched.

use std::sync::LazyLock;
use std::time::Instant;

use rayon::prelude::*;
use regex::Regex;
use webmenu_site::{NodeId, SiteTree};

use crate::registry::MenuRegistry;

const OPEN_TAG: &str = "<web-menu";
const CLOSE_TAG: &str = "</web-menu>";

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`/]+)))?"#).unwrap()
});

/// Error aborting an insertion pass.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    /// A placeholder names a menu that is not registered.
    #[error("Unknown menu \"{name}\" on page {page}")]
    MissingMenu {
        /// Name from the placeholder.
        name: String,
        /// Absolute URL of the page.
        page: String,
    },
    /// A placeholder could not be parsed.
    #[error("Malformed menu placeholder on page {page} at byte {offset}: {reason}")]
    MalformedPlaceholder {
        /// Absolute URL of the page.
        page: String,
        /// Byte offset of the opening tag.
        offset: usize,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Result of a successful insertion pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertSummary {
    /// Number of placeholders filled across all pages.
    pub counter: usize,
}

/// Fill every placeholder in every page of `tree`.
///
/// # Errors
///
/// Returns [`InsertError::MissingMenu`] if a placeholder names a menu absent
/// from `registry`, or [`InsertError::MalformedPlaceholder`] if a placeholder
/// has no `name` attribute, no closing tag, or contains another placeholder.
/// On error no page is modified.
pub fn insert_menus(
    tree: &mut SiteTree,
    registry: &MenuRegistry,
) -> Result<InsertSummary, InsertError> {
    let start = Instant::now();

    let shared: &SiteTree = tree;
    let updates = shared
        .all()
        .par_iter()
        .map(|&id| fill_page(shared, id, registry).map(|filled| (id, filled)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut counter = 0;
    for (id, filled) in updates {
        if let Some(Filled { html, count }) = filled {
            tree.set_html(id, html);
            counter += count;
        }
    }

    tracing::info!(
        counter,
        page_count = tree.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Inserted menus"
    );
    Ok(InsertSummary { counter })
}

struct Filled {
    html: String,
    count: usize,
}

/// Fill the placeholders of one page. `None` if the page has none.
fn fill_page(
    tree: &SiteTree,
    id: NodeId,
    registry: &MenuRegistry,
) -> Result<Option<Filled>, InsertError> {
    let source = &tree.node(id).raw_html;
    let Some(first) = find_open_tag(source, 0) else {
        return Ok(None);
    };

    let malformed = |offset, reason| InsertError::MalformedPlaceholder {
        page: tree.node(id).absolute_url(),
        offset,
        reason,
    };

    let mut html = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut count = 0;
    let mut next = Some(first);

    while let Some(start) = next {
        let tag_end =
            find_tag_end(source, start).ok_or_else(|| malformed(start, "unterminated opening tag"))?;
        let attrs = &source[start + OPEN_TAG.len()..tag_end];
        if attrs.ends_with('/') {
            return Err(malformed(start, "self-closing placeholder"));
        }
        let name =
            placeholder_name(attrs).ok_or_else(|| malformed(start, "missing name attribute"))?;

        let content_start = tag_end + 1;
        let close = find_ignore_case(source, content_start, CLOSE_TAG)
            .ok_or_else(|| malformed(start, "missing closing tag"))?;
        if find_open_tag(&source[..close], content_start).is_some() {
            return Err(malformed(start, "nested placeholder"));
        }

        let menu = registry.get(name).ok_or_else(|| InsertError::MissingMenu {
            name: name.to_owned(),
            page: tree.node(id).absolute_url(),
        })?;

        html.push_str(&source[cursor..content_start]);
        html.push_str(&menu.render(id, tree));
        cursor = close + CLOSE_TAG.len();
        html.push_str(&source[close..cursor]);
        count += 1;
        next = find_open_tag(source, cursor);
    }
    html.push_str(&source[cursor..]);

    tracing::debug!(page = %tree.node(id).absolute_url(), count, "Filled placeholders");
    Ok(Some(Filled { html, count }))
}

/// Find the next `<web-menu` opening tag at or after `from`.
///
/// The tag name must end there, so `<web-menus>` does not match.
fn find_open_tag(html: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(start) = find_ignore_case(html, pos, OPEN_TAG) {
        let after = start + OPEN_TAG.len();
        match html[after..].chars().next() {
            Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/' => return Some(start),
            None => return Some(start),
            Some(_) => pos = after,
        }
    }
    None
}

/// Byte offset of the next ASCII-case-insensitive `needle` (starting with `<`).
fn find_ignore_case(html: &str, from: usize, needle: &str) -> Option<usize> {
    html[from..]
        .match_indices('<')
        .map(|(i, _)| from + i)
        .find(|&i| {
            html.get(i..i + needle.len())
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(needle))
        })
}

/// Offset of the `>` closing the tag opened at `start`.
///
/// A `>` inside a quoted attribute value does not end the tag.
fn find_tag_end(html: &str, start: usize) -> Option<usize> {
    let mut quote = None;
    let mut after_eq = false;
    for (i, b) in html.bytes().enumerate().skip(start) {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'>' => return Some(i),
            b'"' | b'\'' if after_eq => quote = Some(b),
            b'=' => {
                after_eq = true;
                continue;
            }
            _ if b.is_ascii_whitespace() => continue,
            _ => {}
        }
        after_eq = false;
    }
    None
}

fn placeholder_name(attrs: &str) -> Option<&str> {
    ATTR.captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case("name"))
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use webmenu_site::{PageSource, build_tree};

    use crate::menu::Menu;
    use crate::registry::{MenuOptions, MenuPlugin, MenuSettings, apply_plugins, default_menus};

    fn registry() -> MenuRegistry {
        apply_plugins(MenuOptions::new(), default_menus(&MenuSettings::default()))
    }

    fn html_of(tree: &SiteTree, path: &str) -> String {
        tree.node(tree.get(path).unwrap()).raw_html.clone()
    }

    #[test]
    fn test_counter_matches_placeholders() {
        let page = r#"<body><web-menu name="breadcrumb"></web-menu></body>"#;
        let mut tree = build_tree(vec![
            PageSource::new("", "Home").with_html(page),
            PageSource::new("first", "First").with_html(page),
            PageSource::new("second", "Second").with_html(page),
        ])
        .unwrap();

        let summary = insert_menus(&mut tree, &registry()).unwrap();

        assert_eq!(summary.counter, 3);
    }

    #[test]
    fn test_outer_tag_is_preserved() {
        let mut tree = build_tree(vec![
            PageSource::new("", "Home"),
            PageSource::new("first", "First").with_html(
                r#"<p>before</p><web-menu name="previous" class="x">stale</web-menu><p>after</p>"#,
            ),
        ])
        .unwrap();

        insert_menus(&mut tree, &registry()).unwrap();

        assert_eq!(
            html_of(&tree, "first"),
            concat!(
                "<p>before</p>",
                r#"<web-menu name="previous" class="x">"#,
                r#"<a href="/"><span>previous</span><span>Home</span></a>"#,
                "</web-menu>",
                "<p>after</p>"
            )
        );
    }

    #[test]
    fn test_empty_fragment_leaves_empty_placeholder() {
        let mut tree = build_tree(vec![
            PageSource::new("", "Home").with_html(r#"<web-menu name="previous"></web-menu>"#),
        ])
        .unwrap();

        let summary = insert_menus(&mut tree, &registry()).unwrap();

        assert_eq!(summary.counter, 1);
        assert_eq!(html_of(&tree, ""), r#"<web-menu name="previous"></web-menu>"#);
    }

    #[test]
    fn test_multiple_placeholders_on_one_page() {
        let mut tree = build_tree(vec![
            PageSource::new("", "Home").with_html(concat!(
                r#"<web-menu name='header'></web-menu>"#,
                r#"<main></main>"#,
                r#"<web-menu name="next"></web-menu>"#,
                r#"<web-menu name=breadcrumb></web-menu>"#,
            )),
            PageSource::new("about", "About"),
        ])
        .unwrap();

        let summary = insert_menus(&mut tree, &registry()).unwrap();
        let html = html_of(&tree, "");

        assert_eq!(summary.counter, 3);
        assert!(html.starts_with(r#"<web-menu name='header'><nav aria-label="Header">"#));
        assert!(html.contains(
            r#"<web-menu name="next"><a href="/about/"><span>next</span><span>About</span></a></web-menu>"#
        ));
        assert!(html.ends_with(concat!(
            r#"<web-menu name=breadcrumb><nav aria-label="Breadcrumb"><ol>"#,
            r#"<li class="web-menu-current"><a href="/" aria-current="page">Home</a></li>"#,
            "</ol></nav></web-menu>",
        )));
    }

    #[test]
    fn test_missing_menu_aborts_without_changes() {
        let good = r#"<web-menu name="breadcrumb"></web-menu>"#;
        let mut tree = build_tree(vec![
            PageSource::new("", "Home").with_html(good),
            PageSource::new("broken", "Broken").with_html(r#"<web-menu name="sidebar"></web-menu>"#),
        ])
        .unwrap();

        let err = insert_menus(&mut tree, &registry()).unwrap_err();

        assert!(matches!(
            &err,
            InsertError::MissingMenu { name, page } if name == "sidebar" && page == "/broken/"
        ));
        assert_eq!(html_of(&tree, ""), good);
    }

    #[test]
    fn test_malformed_placeholders() {
        let cases = [
            (r#"<web-menu name="header">"#, "missing closing tag"),
            (r#"<web-menu class="x"></web-menu>"#, "missing name attribute"),
            (r#"<web-menu name="header"/>"#, "self-closing placeholder"),
            (r#"<web-menu name="header""#, "unterminated opening tag"),
            (
                r#"<web-menu name="header"><web-menu name="main"></web-menu></web-menu>"#,
                "nested placeholder",
            ),
        ];

        for (html, expected) in cases {
            let mut tree = build_tree(vec![PageSource::new("", "Home").with_html(html)]).unwrap();

            let err = insert_menus(&mut tree, &registry()).unwrap_err();

            match err {
                InsertError::MalformedPlaceholder { page, offset, reason } => {
                    assert_eq!(page, "/");
                    assert_eq!(offset, 0);
                    assert_eq!(reason, expected);
                }
                InsertError::MissingMenu { .. } => panic!("expected malformed error for {html}"),
            }
        }
    }

    #[test]
    fn test_similar_tags_are_ignored() {
        let html = "<web-menus>not a placeholder</web-menus>";
        let mut tree = build_tree(vec![PageSource::new("", "Home").with_html(html)]).unwrap();

        let summary = insert_menus(&mut tree, &registry()).unwrap();

        assert_eq!(summary.counter, 0);
        assert_eq!(html_of(&tree, ""), html);
    }

    #[test]
    fn test_quoted_gt_and_tag_case() {
        let html = concat!(
            r#"<web-menu data-x="a>b" name="previous"></web-menu>"#,
            r#"<WEB-MENU Name="next"></Web-Menu>"#,
            r#"<web-menu data-x="name='main'" name="previous"></web-menu>"#,
        );
        let mut tree = build_tree(vec![
            PageSource::new("", "Home"),
            PageSource::new("first", "First").with_html(html),
            PageSource::new("second", "Second"),
        ])
        .unwrap();

        let summary = insert_menus(&mut tree, &registry()).unwrap();

        assert_eq!(summary.counter, 3);
        assert_eq!(
            html_of(&tree, "first"),
            concat!(
                r#"<web-menu data-x="a>b" name="previous">"#,
                r#"<a href="/"><span>previous</span><span>Home</span></a></web-menu>"#,
                r#"<WEB-MENU Name="next">"#,
                r#"<a href="/second/"><span>next</span><span>Second</span></a></Web-Menu>"#,
                r#"<web-menu data-x="name='main'" name="previous">"#,
                r#"<a href="/"><span>previous</span><span>Home</span></a></web-menu>"#,
            )
        );
    }

    #[test]
    fn test_custom_menu_receives_target() {
        struct Path;

        impl Menu for Path {
            fn name(&self) -> &str {
                "path"
            }

            fn render(&self, target: NodeId, tree: &SiteTree) -> String {
                tree.node(target).absolute_url()
            }
        }

        let options = MenuOptions::new().with_setup_plugin(MenuPlugin::new(Path));
        let registry = apply_plugins(options, default_menus(&MenuSettings::default()));
        let mut tree = build_tree(vec![
            PageSource::new("a/b", "B").with_html(r#"<web-menu name="path"></web-menu>"#),
        ])
        .unwrap();

        insert_menus(&mut tree, &registry).unwrap();

        assert_eq!(html_of(&tree, "a/b"), r#"<web-menu name="path">/a/b/</web-menu>"#);
    }
}
