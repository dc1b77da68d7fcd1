//! Page node data.
//!
//! A [`PageNode`] is one vertex of the site tree. Nodes never own each other:
//! parent and children are index lookups into the [`SiteTree`](crate::SiteTree)
//! arena, addressed by [`NodeId`].

use serde::{Deserialize, Serialize};

/// Stable index of a node inside a [`SiteTree`](crate::SiteTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Heading extracted from a page's rendered body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Anchor ID. Headings without one cannot be linked to.
    pub id: Option<String>,
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub text: String,
}

impl Heading {
    /// Create a heading with an anchor ID.
    #[must_use]
    pub fn new(level: u8, id: &str, text: &str) -> Self {
        Self {
            id: Some(id.to_owned()),
            level,
            text: text.to_owned(),
        }
    }
}

/// Page descriptor produced by discovery and rendering.
///
/// This is the hand-over format between the collaborators that find and
/// render pages and the tree builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSource {
    /// URL segments (e.g., `["components", "button-blue"]`, empty for root).
    pub url_path: Vec<String>,
    /// Display title.
    pub title: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// Short description used by listings.
    pub excerpt: Option<String>,
    /// Rendered markup, possibly containing menu placeholders.
    pub html: String,
}

impl PageSource {
    /// Create a source with only a path and a title.
    #[must_use]
    pub fn new(url_path: &str, title: &str) -> Self {
        Self {
            url_path: split_url_path(url_path),
            title: title.to_owned(),
            ..Self::default()
        }
    }

    /// Set the rendered markup.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    /// Set the headings.
    #[must_use]
    pub fn with_headings(mut self, headings: Vec<Heading>) -> Self {
        self.headings = headings;
        self
    }

    /// Set the excerpt.
    #[must_use]
    pub fn with_excerpt(mut self, excerpt: &str) -> Self {
        self.excerpt = Some(excerpt.to_owned());
        self
    }
}

/// One vertex of the site tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageNode {
    /// URL segments; unique across the tree.
    pub url_path: Vec<String>,
    /// Display title (from metadata, or derived from the folder name).
    pub title: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// Short description used by listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// True for pages backed by a source. False for synthetic section nodes.
    pub has_content: bool,
    /// Rendered markup, rewritten in place during menu insertion.
    #[serde(skip)]
    pub raw_html: String,
}

impl PageNode {
    pub(crate) fn synthetic(url_path: Vec<String>) -> Self {
        let title = url_path
            .last()
            .map_or_else(|| "Home".to_owned(), |segment| title_from_segment(segment));
        Self {
            url_path,
            title,
            headings: Vec::new(),
            excerpt: None,
            has_content: false,
            raw_html: String::new(),
        }
    }

    pub(crate) fn from_source(source: PageSource) -> Self {
        Self {
            url_path: source.url_path,
            title: source.title,
            headings: source.headings,
            excerpt: source.excerpt,
            has_content: true,
            raw_html: source.html,
        }
    }

    /// URL path without leading slash (`""` for root, `"a/b"` otherwise).
    #[must_use]
    pub fn path(&self) -> String {
        self.url_path.join("/")
    }

    /// Absolute URL: `/` for root, `/a/b/` otherwise.
    #[must_use]
    pub fn absolute_url(&self) -> String {
        if self.url_path.is_empty() {
            "/".to_owned()
        } else {
            format!("/{}/", self.url_path.join("/"))
        }
    }

    /// True if this is the tree root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.url_path.is_empty()
    }
}

/// Split a `/`-separated URL path into segments, dropping empty ones.
///
/// ```
/// use webmenu_site::split_url_path;
///
/// assert_eq!(split_url_path("/components/button/"), vec!["components", "button"]);
/// assert!(split_url_path("").is_empty());
/// ```
#[must_use]
pub fn split_url_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Derive a display title from a URL segment.
///
/// ```
/// use webmenu_site::title_from_segment;
///
/// assert_eq!(title_from_segment("button-blue"), "Button Blue");
/// assert_eq!(title_from_segment("getting_started"), "Getting Started");
/// ```
#[must_use]
pub fn title_from_segment(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
