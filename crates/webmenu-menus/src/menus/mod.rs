//! Built-in menu renderers.

mod article_overview;
mod breadcrumb;
mod header;
mod main_menu;
mod sequence;
mod table_of_contents;

pub use article_overview::ArticleOverview;
pub use breadcrumb::Breadcrumb;
pub use header::Header;
pub use main_menu::Main;
pub use sequence::{Next, Previous};
pub use table_of_contents::TableOfContents;
