//! Article listing of a page's children.

use std::fmt::Write;

use webmenu_site::{NodeId, SiteTree};

use crate::html::escape_html;
use crate::menu::Menu;

/// One `<article class="post">` per child of the target, in child order.
///
/// Children with an excerpt get a description block linking to the article.
/// Sections without a page of their own are listed by title only.
#[derive(Debug, Default)]
pub struct ArticleOverview;

impl Menu for ArticleOverview {
    fn name(&self) -> &str {
        "article-overview"
    }

    fn render(&self, target: NodeId, tree: &SiteTree) -> String {
        let children = tree.children(target);
        if children.is_empty() {
            return String::new();
        }

        let mut out = String::from("<div>");
        for &child in children {
            let node = tree.node(child);
            if !node.has_content {
                write!(
                    out,
                    r#"<article class="post"><h2>{}</h2></article>"#,
                    escape_html(&node.title)
                )
                .unwrap();
                continue;
            }
            let href = escape_html(&node.absolute_url());
            write!(
                out,
                r#"<article class="post"><a href="{href}"><h2>{}</h2></a>"#,
                escape_html(&node.title)
            )
            .unwrap();
            if let Some(excerpt) = &node.excerpt {
                write!(
                    out,
                    r#"<div class="description"><a href="{href}" tabindex="-1"><p>{}</p></a></div>"#,
                    escape_html(excerpt)
                )
                .unwrap();
            }
            out.push_str("</article>");
        }
        out.push_str("</div>");
        out
    }
}
