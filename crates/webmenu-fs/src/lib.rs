//! Filesystem collaborators for webmenu.
//!
//! This crate handles everything on either side of the in-memory tree:
//!
//! - Recursive discovery of rendered `*.html` pages
//! - Title, heading and excerpt extraction from the rendered markup
//! - Writing the finished tree back out, one `index.html` per page
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use webmenu_fs::{discover_pages, write_tree};
//! use webmenu_site::build_tree;
//!
//! let sources = discover_pages(Path::new("docs"))?;
//! if let Some(tree) = build_tree(sources) {
//!     write_tree(&tree, Path::new("_site"))?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod metadata;
mod scanner;
mod writer;

use std::fs;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use webmenu_site::PageSource;

pub use error::{ScanError, WriteError};
pub use metadata::{PageMetadata, extract_headings, extract_metadata, page_source};
pub use writer::{output_path, write_tree};

use scanner::Scanner;

/// Discover every page under `source_dir` and extract its metadata.
///
/// Pages are returned in navigation order: a directory's `index.html` first,
/// then entries with an `NN--` ordering prefix by number, then the rest by
/// name. A missing `source_dir` yields no pages.
///
/// # Errors
///
/// Returns [`ScanError::Read`] if a discovered page cannot be read.
pub fn discover_pages(source_dir: &Path) -> Result<Vec<PageSource>, ScanError> {
    let start = Instant::now();
    let refs = Scanner::new(source_dir.to_path_buf()).scan();

    let sources = refs
        .par_iter()
        .map(|page| {
            let html = fs::read_to_string(&page.file).map_err(|source| ScanError::Read {
                path: page.file.clone(),
                source,
            })?;
            Ok(page_source(&page.url_path, html))
        })
        .collect::<Result<Vec<_>, ScanError>>()?;

    tracing::info!(
        page_count = sources.len(),
        source_dir = %source_dir.display(),
        elapsed_ms = start.elapsed().as_millis(),
        "Discovered pages"
    );
    Ok(sources)
}
