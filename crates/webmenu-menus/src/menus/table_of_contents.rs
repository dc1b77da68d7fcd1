//! Table of contents built from the target page's headings.

use std::fmt::Write;

use webmenu_site::{Heading, NodeId, SiteTree};

use crate::html::escape_html;
use crate::menu::Menu;

/// Nested ordered list of the target page's headings.
///
/// List nesting follows heading levels rather than markup nesting: a jump from
/// `h2` to `h4` still opens an intermediate `lvl-3` list. Headings without an
/// `id` and headings above `min_level` are skipped.
#[derive(Debug)]
pub struct TableOfContents {
    heading: String,
    min_level: u8,
}

impl Default for TableOfContents {
    fn default() -> Self {
        Self {
            heading: "Contents".to_owned(),
            min_level: 2,
        }
    }
}

impl TableOfContents {
    /// Create a table of contents starting at `h2`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text of the `<h2>` above the list.
    #[must_use]
    pub fn with_heading(mut self, heading: &str) -> Self {
        heading.clone_into(&mut self.heading);
        self
    }

    /// Set the shallowest heading level included (1-6).
    #[must_use]
    pub fn with_min_level(mut self, level: u8) -> Self {
        self.min_level = level.clamp(1, 6);
        self
    }
}

impl Menu for TableOfContents {
    fn name(&self) -> &str {
        "table-of-contents"
    }

    fn render(&self, target: NodeId, tree: &SiteTree) -> String {
        let headings: Vec<(&str, &Heading)> = tree
            .node(target)
            .headings
            .iter()
            .filter(|h| h.level >= self.min_level)
            .filter_map(|h| h.id.as_deref().map(|id| (id, h)))
            .collect();
        if headings.is_empty() {
            return String::new();
        }

        let mut out = format!(
            r#"<aside><h2>{}</h2><nav aria-label="Table of Contents">"#,
            escape_html(&self.heading)
        );
        render_lists(&mut out, self.min_level, &headings);
        out.push_str("</nav></aside>");
        out
    }
}

/// An `<ol>` that is still open, and whether its last `<li>` is still open.
struct Frame {
    level: u8,
    item_open: bool,
}

fn close_frame(out: &mut String, frame: &Frame) {
    if frame.item_open {
        out.push_str("</li>");
    }
    out.push_str("</ol>");
}

fn render_lists(out: &mut String, min_level: u8, headings: &[(&str, &Heading)]) {
    write!(out, r#"<ol class="lvl-{min_level}">"#).unwrap();
    let mut stack = vec![Frame {
        level: min_level,
        item_open: false,
    }];

    for &(id, heading) in headings {
        while let Some(top) = stack.last()
            && top.level > heading.level
        {
            close_frame(out, top);
            stack.pop();
        }

        // Open nested lists, one per level, inside the current item
        while let Some(top) = stack.last_mut()
            && top.level < heading.level
        {
            if !top.item_open {
                out.push_str("<li>");
                top.item_open = true;
            }
            let level = top.level + 1;
            write!(out, r#"<ol class="lvl-{level}">"#).unwrap();
            stack.push(Frame {
                level,
                item_open: false,
            });
        }

        if let Some(top) = stack.last_mut() {
            if top.item_open {
                out.push_str("</li>");
            }
            write!(
                out,
                r##"<li><a href="#{}">{}</a>"##,
                escape_html(id),
                escape_html(&heading.text)
            )
            .unwrap();
            top.item_open = true;
        }
    }

    for frame in stack.iter().rev() {
        close_frame(out, frame);
    }
}
