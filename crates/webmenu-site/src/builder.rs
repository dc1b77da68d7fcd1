//! Tree construction from discovered pages.
//!
//! Each page path is read as a sequence of segments. Intermediate segments
//! without a page of their own become synthetic nodes titled after the folder
//! name. Children keep the order in which they were first seen; nothing is
//! re-sorted here, so the discovery order controls navigation order.

use std::collections::HashMap;

use crate::page::{NodeId, PageNode, PageSource};
use crate::tree::SiteTree;

/// Builder for constructing [`SiteTree`] instances.
pub struct SiteTreeBuilder {
    nodes: Vec<PageNode>,
    children: Vec<Vec<NodeId>>,
    parents: Vec<Option<NodeId>>,
    path_index: HashMap<Vec<String>, NodeId>,
}

impl Default for SiteTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteTreeBuilder {
    /// Create a builder holding only a synthetic root.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Self {
            nodes: Vec::new(),
            children: Vec::new(),
            parents: Vec::new(),
            path_index: HashMap::new(),
        };
        builder.push_node(PageNode::synthetic(Vec::new()), None);
        builder
    }

    /// Add a page to the tree.
    ///
    /// Missing ancestors are created as synthetic nodes. A synthetic node
    /// created earlier for the same path is filled in place, keeping its
    /// position among its siblings. A second page for an already filled path
    /// is ignored.
    ///
    /// # Returns
    ///
    /// ID of the node holding the page.
    pub fn add_page(&mut self, mut source: PageSource) -> NodeId {
        source.url_path.retain(|segment| !segment.is_empty());

        let id = self.ensure_node(&source.url_path);
        let node = &mut self.nodes[id.0];
        if node.has_content {
            tracing::warn!(
                path = %node.path(),
                "Duplicate page for the same URL path, keeping the first one"
            );
            return id;
        }
        *node = PageNode::from_source(source);
        id
    }

    /// Build the [`SiteTree`] instance.
    #[must_use]
    pub fn build(self) -> SiteTree {
        SiteTree::new(self.nodes, self.children, self.parents)
    }

    /// Get the node for `segments`, creating it and its ancestors as needed.
    fn ensure_node(&mut self, segments: &[String]) -> NodeId {
        if let Some(&id) = self.path_index.get(segments) {
            return id;
        }
        // The root is registered in `new`, so `segments` is non-empty here
        let parent = self.ensure_node(&segments[..segments.len() - 1]);
        self.push_node(PageNode::synthetic(segments.to_vec()), Some(parent))
    }

    fn push_node(&mut self, node: PageNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.path_index.insert(node.url_path.clone(), id);
        self.nodes.push(node);
        self.children.push(Vec::new());
        self.parents.push(parent);
        if let Some(parent) = parent {
            self.children[parent.0].push(id);
        }
        id
    }
}

/// Build a tree from pages in discovery order.
///
/// Returns `None` when there are no pages. That is a valid outcome which the
/// caller reports, not an error.
pub fn build_tree(sources: impl IntoIterator<Item = PageSource>) -> Option<SiteTree> {
    let mut builder = SiteTreeBuilder::new();
    let mut page_count = 0usize;
    for source in sources {
        builder.add_page(source);
        page_count += 1;
    }

    if page_count == 0 {
        return None;
    }

    let tree = builder.build();
    tracing::debug!(page_count, node_count = tree.len(), "Site tree built");
    Some(tree)
}
