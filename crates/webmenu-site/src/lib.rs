//! Page tree construction for webmenu.
//!
//! This crate provides:
//! - [`SiteTree`]: Arena-backed page hierarchy with a flattened pre-order view
//! - [`SiteTreeBuilder`] and [`build_tree`]: Tree construction from discovered pages
//!
//! # Quick Start
//!
//! ```
//! use webmenu_site::{PageSource, build_tree};
//!
//! let tree = build_tree(vec![
//!     PageSource::new("", "Home"),
//!     PageSource::new("components/button", "Button"),
//! ])
//! .unwrap();
//!
//! // "components" has no page of its own and becomes a synthetic node
//! let components = tree.get("components").unwrap();
//! assert_eq!(tree.node(components).title, "Components");
//! assert_eq!(tree.all().len(), 3);
//! ```

mod builder;
mod page;
mod tree;

pub use builder::{SiteTreeBuilder, build_tree};
pub use page::{Heading, NodeId, PageNode, PageSource, split_url_path, title_from_segment};
pub use tree::{NavItem, SiteTree};
