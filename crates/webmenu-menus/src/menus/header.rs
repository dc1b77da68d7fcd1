//! Header menu: one link per top-level page.

use std::sync::Arc;

use webmenu_site::{NodeId, SiteTree};

use crate::html::escape_html;
use crate::link::{Activation, link};
use crate::menu::Menu;

/// Header navigation with one link per child of the root.
///
/// The top-level link whose subtree contains the target is marked active.
#[derive(Debug)]
pub struct Header {
    label: String,
    activation: Activation,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            label: "Header".to_owned(),
            activation: Activation::default(),
        }
    }
}

impl Header {
    /// Create a header menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how far up the ancestor chain links are marked active.
    #[must_use]
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }
}

impl Menu for Header {
    fn name(&self) -> &str {
        "header"
    }

    fn render(&self, target: NodeId, tree: &SiteTree) -> String {
        let children = tree.children(tree.root());
        if children.is_empty() {
            return String::new();
        }

        let links: String = children
            .iter()
            .map(|&child| link(tree, child, target, self.activation))
            .collect();
        format!(
            r#"<nav aria-label="{}">{links}</nav>"#,
            escape_html(&self.label)
        )
    }

    fn relabeled(&self, label: &str) -> Option<Arc<dyn Menu>> {
        Some(Arc::new(Self {
            label: label.to_owned(),
            activation: self.activation,
        }))
    }
}
