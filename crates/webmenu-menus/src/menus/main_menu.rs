//! Site-wide main menu.

use std::sync::Arc;

use webmenu_site::{NodeId, SiteTree};

use crate::html::escape_html;
use crate::link::{Activation, list_item};
use crate::menu::Menu;

/// Flat site-wide navigation over the top-level pages.
///
/// Same link set and active-state rule as [`Header`](crate::Header), rendered
/// as a list so the state class sits on each `<li>`.
#[derive(Debug)]
pub struct Main {
    label: String,
    activation: Activation,
}

impl Default for Main {
    fn default() -> Self {
        Self {
            label: "Main".to_owned(),
            activation: Activation::default(),
        }
    }
}

impl Main {
    /// Create a main menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `aria-label` of the `<nav>` wrapper.
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        label.clone_into(&mut self.label);
        self
    }

    /// Set how far up the ancestor chain links are marked active.
    #[must_use]
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }
}

impl Menu for Main {
    fn name(&self) -> &str {
        "main"
    }

    fn render(&self, target: NodeId, tree: &SiteTree) -> String {
        let children = tree.children(tree.root());
        if children.is_empty() {
            return String::new();
        }

        let items: String = children
            .iter()
            .map(|&child| list_item(tree, child, target, self.activation))
            .collect();
        format!(
            r#"<nav aria-label="{}"><ul>{items}</ul></nav>"#,
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
