//! Next and previous links along the flattened page order.
//!
//! The canonical order is [`SiteTree::all`]. Synthetic section nodes have no
//! page to link to and are stepped over.

use webmenu_site::{NodeId, SiteTree};

use crate::html::escape_html;
use crate::menu::Menu;

#[derive(Clone, Copy)]
enum Step {
    Forward,
    Backward,
}

impl Step {
    fn label(self) -> &'static str {
        match self {
            Self::Forward => "next",
            Self::Backward => "previous",
        }
    }
}

/// Find the closest page with content in the given direction.
fn neighbour(tree: &SiteTree, target: NodeId, step: Step) -> Option<NodeId> {
    let all = tree.all();
    let position = tree.position(target);
    let has_content = |id: &&NodeId| tree.node(**id).has_content;
    match step {
        Step::Forward => all[position + 1..].iter().find(has_content).copied(),
        Step::Backward => all[..position].iter().rev().find(has_content).copied(),
    }
}

fn render_step(tree: &SiteTree, target: NodeId, step: Step) -> String {
    let Some(id) = neighbour(tree, target, step) else {
        return String::new();
    };
    let node = tree.node(id);
    format!(
        r#"<a href="{}"><span>{}</span><span>{}</span></a>"#,
        escape_html(&node.absolute_url()),
        step.label(),
        escape_html(&node.title)
    )
}

/// Link to the following page. Empty on the last page.
#[derive(Debug, Default)]
pub struct Next;

impl Menu for Next {
    fn name(&self) -> &str {
        "next"
    }

    fn render(&self, target: NodeId, tree: &SiteTree) -> String {
        render_step(tree, target, Step::Forward)
    }
}

/// Link to the preceding page. Empty on the first page.
#[derive(Debug, Default)]
pub struct Previous;

impl Menu for Previous {
    fn name(&self) -> &str {
        "previous"
    }

    fn render(&self, target: NodeId, tree: &SiteTree) -> String {
        render_step(tree, target, Step::Backward)
    }
}
