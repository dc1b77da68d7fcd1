//! Menu renderer trait.

use std::sync::Arc;

use webmenu_site::{NodeId, SiteTree};

/// Renderer for one kind of navigation fragment.
///
/// A menu is a pure function of the target node and the tree: it reads the
/// shared structure and returns the HTML that replaces the inner content of a
/// `<web-menu name="...">` placeholder on the target page. An empty string
/// leaves the placeholder empty.
///
/// # Thread Safety
///
/// Menus are `Send + Sync` because the insertion pass renders pages in
/// parallel against one shared registry.
///
/// # Example
///
/// ```
/// use webmenu_menus::Menu;
/// use webmenu_site::{NodeId, SiteTree};
///
/// struct PageTitle;
///
/// impl Menu for PageTitle {
///     fn name(&self) -> &str { "page-title" }
///
///     fn render(&self, target: NodeId, tree: &SiteTree) -> String {
///         format!("<span>{}</span>", tree.node(target).title)
///     }
/// }
/// ```
pub trait Menu: Send + Sync {
    /// Default registration name, matched against the placeholder's `name`.
    fn name(&self) -> &str;

    /// Render the fragment for `target`.
    fn render(&self, target: NodeId, tree: &SiteTree) -> String;

    /// Copy of this menu with its wrapper labelled `label`.
    ///
    /// Used when the menu is registered under an alias. `None` for menus
    /// without a label, which are then shared as is.
    fn relabeled(&self, _label: &str) -> Option<Arc<dyn Menu>> {
        None
    }
}
