//! Site tree for the page hierarchy.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<PageNode>` with parent/children relationships
//! tracked by indices. This provides:
//! - O(1) URL path lookups via `path_index` `HashMap`
//! - O(1) position lookups in the flattened pre-order sequence
//! - O(d) ancestor chains where d is the page depth
//!
//! The structure is fixed once built. Only a node's `raw_html` can change,
//! through [`SiteTree::set_html`].

use std::collections::HashMap;

use serde::Serialize;

use crate::page::{NodeId, PageNode};

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Absolute link target.
    pub path: String,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Rooted page tree.
///
/// The root is always [`SiteTree::root`]. [`SiteTree::all`] lists every node in
/// depth-first pre-order, which is the canonical linear page order.
pub struct SiteTree {
    nodes: Vec<PageNode>,
    children: Vec<Vec<NodeId>>,
    parents: Vec<Option<NodeId>>,
    order: Vec<NodeId>,
    positions: Vec<usize>,
    path_index: HashMap<String, NodeId>,
}

/// Compute the depth-first pre-order sequence starting at the root.
fn compute_preorder(children: &[Vec<NodeId>]) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(children.len());
    let mut stack = vec![NodeId(0)];
    while let Some(id) = stack.pop() {
        order.push(id);
        // Reversed so the first child is popped first
        stack.extend(children[id.0].iter().rev().copied());
    }
    order
}

impl SiteTree {
    /// Create a tree from arena components. Index 0 must be the root.
    pub(crate) fn new(
        nodes: Vec<PageNode>,
        children: Vec<Vec<NodeId>>,
        parents: Vec<Option<NodeId>>,
    ) -> Self {
        let order = compute_preorder(&children);
        let mut positions = vec![0; nodes.len()];
        for (position, id) in order.iter().enumerate() {
            positions[id.0] = position;
        }
        let path_index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.path(), NodeId(i)))
            .collect();

        Self {
            nodes,
            children,
            parents,
            order,
            positions,
            path_index,
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &PageNode {
        &self.nodes[id.0]
    }

    /// Children of a node in discovery order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id.0]
    }

    /// Parent of a node, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    /// Every node in depth-first pre-order.
    #[must_use]
    pub fn all(&self) -> &[NodeId] {
        &self.order
    }

    /// Position of a node in [`SiteTree::all`].
    #[must_use]
    pub fn position(&self, id: NodeId) -> usize {
        self.positions[id.0]
    }

    /// Number of nodes, synthetic ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a built tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by URL path without leading slash (`""` for root).
    #[must_use]
    pub fn get(&self, path: &str) -> Option<NodeId> {
        let normalized = path.trim_matches('/');
        self.path_index.get(normalized).copied()
    }

    /// Ancestor chain from the root down to `id`, both included.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parents[node.0];
        }
        chain.reverse();
        chain
    }

    /// Number of edges between the root and `id`.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes[id.0].url_path.len()
    }

    /// True if `ancestor` is a strict ancestor of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parents[node.0];
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parents[parent.0];
        }
        false
    }

    /// Replace a node's rendered markup.
    pub fn set_html(&mut self, id: NodeId, html: String) {
        self.nodes[id.0].raw_html = html;
    }

    /// Count of nodes backed by a page source.
    #[must_use]
    pub fn content_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.has_content).count()
    }

    /// Build the navigation tree from the root.
    #[must_use]
    pub fn navigation(&self) -> NavItem {
        self.build_nav_item(self.root())
    }

    fn build_nav_item(&self, id: NodeId) -> NavItem {
        let node = self.node(id);
        NavItem {
            title: node.title.clone(),
            path: node.absolute_url(),
            children: self
                .children(id)
                .iter()
                .map(|&child| self.build_nav_item(child))
                .collect(),
        }
    }
}
