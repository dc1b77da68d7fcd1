//! Shared link rendering and active-state computation.
//!
//! Every menu renders links through these helpers so that state classes are
//! applied the same way everywhere:
//! - `web-menu-current` and `aria-current="page"` on the target page itself
//! - `web-menu-active` on ancestors of the target (see [`Activation`])
//! - nothing on unrelated pages

use std::fmt::Write;

use webmenu_site::{NodeId, SiteTree};

use crate::html::escape_html;

/// Class for the page being rendered.
pub const CURRENT_CLASS: &str = "web-menu-current";

/// Class for ancestors of the page being rendered.
pub const ACTIVE_CLASS: &str = "web-menu-active";

/// How far up the ancestor chain the active state reaches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Activation {
    /// Every strict ancestor of the target is active.
    #[default]
    Ancestors,
    /// Only ancestors at most this many levels above the target are active.
    Within(usize),
}

impl Activation {
    /// Build from an optional depth limit (`None` means unlimited).
    #[must_use]
    pub fn from_depth(depth: Option<usize>) -> Self {
        depth.map_or(Self::Ancestors, Self::Within)
    }

    fn reaches(self, distance: usize) -> bool {
        match self {
            Self::Ancestors => true,
            Self::Within(limit) => distance <= limit,
        }
    }
}

/// State of a link relative to the page being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
    /// The link points at the target page.
    Current,
    /// The link points at an ancestor of the target page.
    Active,
    /// The link is unrelated to the target's ancestry.
    Plain,
}

impl LinkState {
    /// Compute the state of `node` relative to `target`.
    #[must_use]
    pub fn of(tree: &SiteTree, node: NodeId, target: NodeId, activation: Activation) -> Self {
        if node == target {
            return Self::Current;
        }
        if tree.is_ancestor(node, target)
            && activation.reaches(tree.depth(target) - tree.depth(node))
        {
            return Self::Active;
        }
        Self::Plain
    }

    /// CSS class for this state, if any.
    #[must_use]
    pub fn class(self) -> Option<&'static str> {
        match self {
            Self::Current => Some(CURRENT_CLASS),
            Self::Active => Some(ACTIVE_CLASS),
            Self::Plain => None,
        }
    }

    fn class_attr(self) -> String {
        self.class()
            .map(|class| format!(r#" class="{class}""#))
            .unwrap_or_default()
    }
}

/// Write `<a href>` for `node`, with `aria-current` when it is the current page.
///
/// Sections without a page of their own are never written, so they render as
/// a `<span>` instead of a link.
fn write_anchor(out: &mut String, tree: &SiteTree, node: NodeId, state: LinkState, class: &str) {
    let page = tree.node(node);
    let title = escape_html(&page.title);
    if !page.has_content {
        write!(out, "<span{class}>{title}</span>").unwrap();
        return;
    }
    let aria = if state == LinkState::Current {
        r#" aria-current="page""#
    } else {
        ""
    };
    write!(
        out,
        r#"<a href="{}"{class}{aria}>{title}</a>"#,
        escape_html(&page.absolute_url()),
    )
    .unwrap();
}

/// Render a bare link with the state class on the anchor.
///
/// Used by menus that emit links without a surrounding list item.
#[must_use]
pub fn link(tree: &SiteTree, node: NodeId, target: NodeId, activation: Activation) -> String {
    let state = LinkState::of(tree, node, target, activation);
    let mut out = String::new();
    write_anchor(&mut out, tree, node, state, &state.class_attr());
    out
}

/// Render `<li>` wrapping a link, with the state class on the list item.
#[must_use]
pub fn list_item(tree: &SiteTree, node: NodeId, target: NodeId, activation: Activation) -> String {
    let state = LinkState::of(tree, node, target, activation);
    let mut out = format!("<li{}>", state.class_attr());
    write_anchor(&mut out, tree, node, state, "");
    out.push_str("</li>");
    out
}
