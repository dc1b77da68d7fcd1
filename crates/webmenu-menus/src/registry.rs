//! Menu registry and plugin merging.
//!
//! The registry is assembled once per build from the default menus, caller
//! overrides (`plugins`) and caller additions (`setup_plugins`), then passed
//! to [`insert_menus`](crate::insert_menus). There is no process-wide state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::link::Activation;
use crate::menu::Menu;
use crate::menus::{
    ArticleOverview, Breadcrumb, Header, Main, Next, Previous, TableOfContents,
};

/// A menu registered under a name.
///
/// The name defaults to [`Menu::name`] but can differ, which lets one renderer
/// serve several placeholder names.
#[derive(Clone)]
pub struct MenuPlugin {
    name: String,
    menu: Arc<dyn Menu>,
}

impl MenuPlugin {
    /// Register `menu` under its own name.
    pub fn new<M: Menu + 'static>(menu: M) -> Self {
        Self {
            name: menu.name().to_owned(),
            menu: Arc::new(menu),
        }
    }

    /// Register `menu` under `name`.
    pub fn named<M: Menu + 'static>(name: &str, menu: M) -> Self {
        Self {
            name: name.to_owned(),
            menu: Arc::new(menu),
        }
    }

    /// Registration name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The renderer.
    #[must_use]
    pub fn menu(&self) -> &dyn Menu {
        self.menu.as_ref()
    }
}

impl fmt::Debug for MenuPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuPlugin")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Caller-supplied menus merged over the defaults.
#[derive(Clone, Debug, Default)]
pub struct MenuOptions {
    /// Replace default menus sharing a name, or add new ones.
    pub plugins: Vec<MenuPlugin>,
    /// Registered after defaults and `plugins`; wins on name clashes.
    pub setup_plugins: Vec<MenuPlugin>,
}

impl MenuOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override.
    #[must_use]
    pub fn with_plugin(mut self, plugin: MenuPlugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Add a setup plugin.
    #[must_use]
    pub fn with_setup_plugin(mut self, plugin: MenuPlugin) -> Self {
        self.setup_plugins.push(plugin);
        self
    }
}

/// Names of the default menus, in registration order.
pub const DEFAULT_MENU_NAMES: [&str; 7] = [
    "header",
    "breadcrumb",
    "next",
    "main",
    "previous",
    "article-overview",
    "table-of-contents",
];

/// Settings for the default menus.
#[derive(Clone, Debug)]
pub struct MenuSettings {
    /// Text of the table-of-contents heading.
    pub toc_heading: String,
    /// Shallowest heading level listed in the table of contents.
    pub toc_min_level: u8,
    /// Ancestor-activation depth per menu name. Missing means unlimited.
    pub active_depth: HashMap<String, usize>,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            toc_heading: "Contents".to_owned(),
            toc_min_level: 2,
            active_depth: HashMap::new(),
        }
    }
}

impl MenuSettings {
    fn activation(&self, name: &str) -> Activation {
        Activation::from_depth(self.active_depth.get(name).copied())
    }
}

/// Build the default menus in registration order.
#[must_use]
pub fn default_menus(settings: &MenuSettings) -> Vec<MenuPlugin> {
    vec![
        MenuPlugin::new(Header::new().with_activation(settings.activation("header"))),
        MenuPlugin::new(Breadcrumb::new().with_activation(settings.activation("breadcrumb"))),
        MenuPlugin::new(Next),
        MenuPlugin::new(Main::new().with_activation(settings.activation("main"))),
        MenuPlugin::new(Previous),
        MenuPlugin::new(ArticleOverview),
        MenuPlugin::new(
            TableOfContents::new()
                .with_heading(&settings.toc_heading)
                .with_min_level(settings.toc_min_level),
        ),
    ]
}

/// Name-to-menu lookup used during insertion.
///
/// Registering a name that already exists replaces the earlier entry in place,
/// so the last registration for a name wins while registration order is kept.
#[derive(Clone, Debug, Default)]
pub struct MenuRegistry {
    entries: Vec<MenuPlugin>,
}

impl MenuRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin, replacing any entry with the same name.
    pub fn register(&mut self, plugin: MenuPlugin) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == plugin.name) {
            *existing = plugin;
        } else {
            self.entries.push(plugin);
        }
    }

    /// Register `alias` as another name for the menu registered as `target`.
    ///
    /// Menus with a labelled wrapper are copied with `alias` as the label.
    /// Returns `false` if `target` is not registered.
    pub fn alias(&mut self, alias: &str, target: &str) -> bool {
        let Some(menu) = self
            .entries
            .iter()
            .find(|e| e.name == target)
            .map(|e| e.menu.relabeled(alias).unwrap_or_else(|| Arc::clone(&e.menu)))
        else {
            return false;
        };
        self.register(MenuPlugin {
            name: alias.to_owned(),
            menu,
        });
        true
    }

    /// Look up a menu by exact, case-sensitive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Menu> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(MenuPlugin::menu)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(MenuPlugin::name)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merge `defaults`, then `options.plugins`, then `options.setup_plugins`.
#[must_use]
pub fn apply_plugins(options: MenuOptions, defaults: Vec<MenuPlugin>) -> MenuRegistry {
    let mut registry = MenuRegistry::new();
    for plugin in defaults
        .into_iter()
        .chain(options.plugins)
        .chain(options.setup_plugins)
    {
        registry.register(plugin);
    }
    registry
}
