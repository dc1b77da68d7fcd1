//! Breadcrumb trail from the root down to the target.

use webmenu_site::{NodeId, SiteTree};

use crate::link::{Activation, list_item};
use crate::menu::Menu;

/// Ordered list with one entry per ancestor, root first, target last.
///
/// Ancestors are marked active, the target is marked current and still
/// rendered as a link.
#[derive(Debug, Default)]
pub struct Breadcrumb {
    activation: Activation,
}

impl Breadcrumb {
    /// Create a breadcrumb menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how far up the ancestor chain entries are marked active.
    #[must_use]
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }
}

impl Menu for Breadcrumb {
    fn name(&self) -> &str {
        "breadcrumb"
    }

    fn render(&self, target: NodeId, tree: &SiteTree) -> String {
        let items: String = tree
            .ancestors(target)
            .into_iter()
            .map(|node| list_item(tree, node, target, self.activation))
            .collect();
        format!(r#"<nav aria-label="Breadcrumb"><ol>{items}</ol></nav>"#)
    }
}
