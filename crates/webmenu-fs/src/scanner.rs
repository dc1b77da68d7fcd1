//! Page discovery by filesystem walking.
//!
//! Discovery only finds files; reading and metadata extraction happen later
//! in [`discover_pages`](crate::discover_pages).

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Reference to a page's source file.
#[derive(Debug, Clone)]
pub(crate) struct PageRef {
    /// URL path (e.g., "", "components", "components/button-blue")
    pub url_path: String,
    /// Path to the HTML file
    pub file: PathBuf,
}

/// Discovers pages by walking the filesystem.
///
/// Each `*.html` file is a page. `index.html` is the page of its directory and
/// is emitted before the directory's other entries, so parents always precede
/// their children in the output.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the filesystem and return page references in navigation order.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub fn scan(&self) -> Vec<PageRef> {
        let mut refs = Vec::new();
        if self.source_dir.exists() {
            scan_directory(&self.source_dir, "", &mut refs);
        }
        refs
    }
}

/// A directory entry with its ordering key computed once.
struct Entry {
    path: PathBuf,
    is_dir: bool,
    order: Option<u64>,
    /// File name with the ordering prefix and `.html` extension removed.
    segment: String,
    name: String,
}

impl Entry {
    fn cmp_order(&self, other: &Self) -> Ordering {
        match (self.order, other.order) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.name.cmp(&other.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.name.cmp(&other.name),
        }
    }
}

fn scan_directory(dir_path: &Path, url_prefix: &str, refs: &mut Vec<PageRef>) {
    let Ok(read_dir) = fs::read_dir(dir_path) else {
        tracing::warn!(path = %dir_path.display(), "Failed to read directory, skipping");
        return;
    };

    let mut index: Option<PathBuf> = None;
    let mut entries: Vec<Entry> = Vec::new();

    for entry in read_dir.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        // Skip hidden files/dirs
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if !is_dir {
            if path.extension().is_none_or(|e| !e.eq_ignore_ascii_case("html")) {
                continue;
            }
            if name.eq_ignore_ascii_case("index.html") {
                index = Some(path);
                continue;
            }
        }

        let stem = if is_dir {
            name.as_str()
        } else {
            &name[..name.len() - ".html".len()]
        };
        let (order, segment) = split_order_prefix(stem);
        let segment = segment.to_owned();
        entries.push(Entry {
            path,
            is_dir,
            order,
            segment,
            name,
        });
    }

    if let Some(file) = index {
        refs.push(PageRef {
            url_path: url_prefix.to_owned(),
            file,
        });
    }

    entries.sort_by(Entry::cmp_order);

    for entry in entries {
        let url_path = join_url(url_prefix, &entry.segment);
        if entry.is_dir {
            scan_directory(&entry.path, &url_path, refs);
        } else {
            refs.push(PageRef {
                url_path,
                file: entry.path,
            });
        }
    }
}

/// Split an `NN--name` ordering prefix from a file or directory name.
///
/// Examples:
/// - `10--first` -> `(Some(10), "first")`
/// - `first` -> `(None, "first")`
/// - `10-first` -> `(None, "10-first")`
pub(crate) fn split_order_prefix(name: &str) -> (Option<u64>, &str) {
    if let Some((prefix, rest)) = name.split_once("--")
        && !prefix.is_empty()
        && !rest.is_empty()
        && let Ok(order) = prefix.parse::<u64>()
    {
        return (Some(order), rest);
    }
    (None, name)
}

fn join_url(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_owned()
    } else {
        format!("{base}/{segment}")
    }
}
