//! Configuration management for webmenu.
//!
//! Parses `webmenu.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.output_dir`
//! - `menus.toc_heading`

mod expand;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override source directory of rendered pages.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "webmenu.toml";

/// Menu names an alias may point at.
const BUILT_IN_MENUS: [&str; 7] = [
    "header",
    "breadcrumb",
    "next",
    "main",
    "previous",
    "article-overview",
    "table-of-contents",
];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Menu configuration.
    pub menus: MenusConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved directory configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory of rendered pages to read.
    pub source_dir: PathBuf,
    /// Directory the finished site is written to.
    pub output_dir: PathBuf,
}

/// Menu configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MenusConfig {
    /// Heading text inside the table-of-contents aside.
    pub toc_heading: String,
    /// Shallowest heading level listed in the table of contents.
    pub toc_min_level: u8,
    /// Extra menu names mapped to built-in menus (e.g., `site = "main"`).
    pub aliases: BTreeMap<String, String>,
    /// Per-menu ancestor-activation depth. Missing means unlimited.
    pub active_depth: BTreeMap<String, usize>,
}

impl Default for MenusConfig {
    fn default() -> Self {
        Self {
            toc_heading: "Contents".to_owned(),
            toc_min_level: 2,
            aliases: BTreeMap::new(),
            active_depth: BTreeMap::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Default output directory: `_site` next to the source directory.
fn default_output_dir(source_dir: &Path) -> PathBuf {
    source_dir
        .parent()
        .unwrap_or(source_dir)
        .join("_site")
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `webmenu.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Overriding the source directory also moves the default output directory
    /// along with it, unless an output directory was set explicitly.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
            if self.docs.output_dir.is_none() {
                self.docs_resolved.output_dir = default_output_dir(source_dir);
            }
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            menus: MenusConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("_site"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_toc()?;
        self.validate_aliases()?;
        self.validate_active_depth()?;
        Ok(())
    }

    fn validate_toc(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.menus.toc_heading, "menus.toc_heading")?;
        if !(1..=6).contains(&self.menus.toc_min_level) {
            return Err(ConfigError::Validation(
                "menus.toc_min_level must be between 1 and 6".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_aliases(&self) -> Result<(), ConfigError> {
        for (alias, target) in &self.menus.aliases {
            require_non_empty(alias.trim(), "menus.aliases key")?;
            if !BUILT_IN_MENUS.contains(&target.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "menus.aliases.{alias} must name a built-in menu ({}), got \"{target}\"",
                    BUILT_IN_MENUS.join(", ")
                )));
            }
        }
        Ok(())
    }

    fn validate_active_depth(&self) -> Result<(), ConfigError> {
        for (menu, depth) in &self.menus.active_depth {
            if *depth == 0 {
                return Err(ConfigError::Validation(format!(
                    "menus.active_depth.{menu} must be greater than 0"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref dir) = self.docs.output_dir {
            self.docs.output_dir = Some(expand::expand_env(dir, "docs.output_dir")?);
        }
        self.menus.toc_heading = expand::expand_env(&self.menus.toc_heading, "menus.toc_heading")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs"));
        let output_dir = match self.docs.output_dir.as_deref() {
            Some(dir) => config_dir.join(dir),
            None => default_output_dir(&source_dir),
        };
        self.docs_resolved = DocsConfig {
            source_dir,
            output_dir,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/test/_site"));
        assert_eq!(config.menus.toc_heading, "Contents");
        assert_eq!(config.menus.toc_min_level, 2);
        assert!(config.menus.aliases.is_empty());
        assert!(config.menus.active_depth.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.menus.toc_min_level, 2);
        assert!(config.docs.source_dir.is_none());
    }

    #[test]
    fn test_parse_menus_config() {
        let toml = r#"
[menus]
toc_heading = "On this page"
toc_min_level = 3

[menus.aliases]
site = "main"

[menus.active_depth]
header = 1
breadcrumb = 2
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.menus.toc_heading, "On this page");
        assert_eq!(config.menus.toc_min_level, 3);
        assert_eq!(config.menus.aliases.get("site").map(String::as_str), Some("main"));
        assert_eq!(config.menus.active_depth.get("header"), Some(&1));
        assert_eq!(config.menus.active_depth.get("breadcrumb"), Some(&2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "site/pages"
output_dir = "public"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/site/pages")
        );
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/project/public"));
    }

    #[test]
    fn test_resolve_paths_default_output_next_to_source() {
        let toml = r#"
[docs]
source_dir = "site/pages"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/project/site/_site"));
    }

    #[test]
    fn test_apply_cli_settings_source_dir_moves_default_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/custom/_site"));
    }

    #[test]
    fn test_apply_cli_settings_keeps_explicit_output() {
        let toml = r#"
[docs]
output_dir = "public"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/project/public"));
    }

    #[test]
    fn test_apply_cli_settings_output_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            output_dir: Some(PathBuf::from("/out")),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/out"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/test/_site"));
    }

    #[test]
    fn test_expand_env_vars_source_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WEBMENU_TEST_DOCS", "rendered");
        }

        let toml = r#"
[docs]
source_dir = "${WEBMENU_TEST_DOCS}"
output_dir = "${WEBMENU_TEST_OUT:-public}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.docs.source_dir.as_deref(), Some("rendered"));
        assert_eq!(config.docs.output_dir.as_deref(), Some("public"));

        unsafe {
            std::env::remove_var("WEBMENU_TEST_DOCS");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WEBMENU_MISSING_CONFIG_TEST");
        }

        let toml = r#"
[menus]
toc_heading = "${WEBMENU_MISSING_CONFIG_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("menus.toc_heading"));
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_toc_min_level_range() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.menus.toc_min_level = 0;
        assert_validation_error(&config, &["toc_min_level"]);

        config.menus.toc_min_level = 7;
        assert_validation_error(&config, &["toc_min_level"]);

        config.menus.toc_min_level = 6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_toc_heading_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.menus.toc_heading = String::new();
        assert_validation_error(&config, &["menus.toc_heading", "empty"]);
    }

    #[test]
    fn test_validate_alias_target_unknown() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config
            .menus
            .aliases
            .insert("site".to_owned(), "sidebar".to_owned());
        assert_validation_error(&config, &["menus.aliases.site", "sidebar"]);
    }

    #[test]
    fn test_validate_alias_name_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.menus.aliases.insert(" ".to_owned(), "main".to_owned());
        assert_validation_error(&config, &["menus.aliases", "empty"]);
    }

    #[test]
    fn test_validate_active_depth_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.menus.active_depth.insert("header".to_owned(), 0);
        assert_validation_error(&config, &["menus.active_depth.header"]);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("webmenu.toml");
        std::fs::write(
            &path,
            r#"
[docs]
source_dir = "pages"

[menus.aliases]
site = "main"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, temp_dir.path().join("pages"));
        assert_eq!(config.docs_resolved.output_dir, temp_dir.path().join("_site"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("webmenu.toml");
        std::fs::write(&path, "[menus]\ntoc_min_level = 9\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/webmenu.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
