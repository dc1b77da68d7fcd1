//! Tree writer.

use std::fs;
use std::path::{Path, PathBuf};

use webmenu_site::{PageNode, SiteTree};

use crate::error::WriteError;

/// Output file for a node: `<output_dir>/<segments>/index.html`.
#[must_use]
pub fn output_path(output_dir: &Path, node: &PageNode) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    path.extend(&node.url_path);
    path.push("index.html");
    path
}

/// Write every page with content under `output_dir`.
///
/// Synthetic section nodes have no markup and are skipped. Directories are
/// created as needed. Returns the number of files written.
///
/// # Errors
///
/// Returns [`WriteError::Io`] if a directory or file cannot be written.
pub fn write_tree(tree: &SiteTree, output_dir: &Path) -> Result<usize, WriteError> {
    let mut written = 0;
    for &id in tree.all() {
        let node = tree.node(id);
        if !node.has_content {
            continue;
        }

        let path = output_path(output_dir, node);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| WriteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &node.raw_html).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Wrote page");
        written += 1;
    }

    tracing::info!(written, output_dir = %output_dir.display(), "Wrote site");
    Ok(written)
}
