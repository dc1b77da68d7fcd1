//! Navigation menus for webmenu.
//!
//! This crate renders navigation fragments against a [`SiteTree`] and inserts
//! them into `<web-menu name="...">` placeholders:
//! - [`Menu`]: Renderer trait, one implementation per kind of menu
//! - [`MenuRegistry`] and [`apply_plugins`]: Name lookup with override-by-name
//! - [`insert_menus`]: Parallel insertion pass over every page
//!
//! Built-in menus: [`Header`], [`Breadcrumb`], [`Next`], [`Main`],
//! [`Previous`], [`ArticleOverview`] and [`TableOfContents`].
//!
//! # Quick Start
//!
//! ```
//! use webmenu_menus::{MenuOptions, MenuSettings, apply_plugins, default_menus, insert_menus};
//! use webmenu_site::{PageSource, build_tree};
//!
//! let mut tree = build_tree(vec![
//!     PageSource::new("", "Home"),
//!     PageSource::new("about", "About")
//!         .with_html(r#"<web-menu name="breadcrumb"></web-menu>"#),
//! ])
//! .unwrap();
//!
//! let registry = apply_plugins(MenuOptions::new(), default_menus(&MenuSettings::default()));
//! let summary = insert_menus(&mut tree, &registry).unwrap();
//!
//! assert_eq!(summary.counter, 1);
//! let about = tree.node(tree.get("about").unwrap());
//! assert!(about.raw_html.contains(r#"<nav aria-label="Breadcrumb">"#));
//! ```
//!
//! [`SiteTree`]: webmenu_site::SiteTree

mod html;
mod insert;
mod link;
mod menu;
mod menus;
mod registry;

pub use html::escape_html;
pub use insert::{InsertError, InsertSummary, insert_menus};
pub use link::{ACTIVE_CLASS, Activation, CURRENT_CLASS, LinkState, link, list_item};
pub use menu::Menu;
pub use menus::{ArticleOverview, Breadcrumb, Header, Main, Next, Previous, TableOfContents};
pub use registry::{
    DEFAULT_MENU_NAMES, MenuOptions, MenuPlugin, MenuRegistry, MenuSettings, apply_plugins,
    default_menus,
};
