//! CLI error types.

use std::path::PathBuf;

use webmenu_config::ConfigError;
use webmenu_fs::{ScanError, WriteError};
use webmenu_menus::InsertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Insert(#[from] InsertError),

    #[error("{0}")]
    Write(#[from] WriteError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Could not find any pages at {}", .0.display())]
    NoPages(PathBuf),

    #[error("{0}")]
    Validation(String),
}
