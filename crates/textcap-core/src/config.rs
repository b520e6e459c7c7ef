//! Configuration loading and discovery.
//!
//! This module provides configuration file discovery by:
//! 1. Walking up from the current directory to find project config
//! 2. Loading user config from XDG config directory
//! 3. Merging with sensible defaults
//!
//! # Supported formats
//!
//! The following configuration file formats are supported:
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - `textcap.<ext>` in current directory or any parent
//! - `.textcap.<ext>` in current directory or any parent
//! - `~/.config/textcap/config.<ext>` (user config)
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`
//!
//! When multiple files exist in the same directory, all are merged via figment.
//! Later extensions override earlier: toml < yaml < yml < json.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use textcap_core::config::{Config, ConfigLoader};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("limit: {} {}", config.limits.active_max(), config.limits.limit_type);
//! ```

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::count::LimitType;
use crate::error::{ConfigError, ConfigResult};

/// Limit settings for one document.
///
/// The loaded [`Config`] carries the global defaults; every session takes
/// its own copy, so profile and mode changes never leak between documents.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LimitConfig {
    /// Which unit the limit is enforced in.
    pub limit_type: LimitType,
    /// Maximum characters when counting characters.
    pub max_chars: usize,
    /// Maximum words when counting words.
    pub max_words: usize,
    /// Percentage of the limit at which feedback turns to warning.
    pub warning_threshold_pct: u8,
    /// Percentage of the limit at which feedback turns critical.
    pub critical_threshold_pct: u8,
    /// Line width hint for hosts that wrap limited documents.
    pub fill_column: usize,
    /// Named character limits selectable per document.
    pub profiles: BTreeMap<String, usize>,
    /// Glob deciding which documents are subject to the limit.
    pub file_pattern: String,
}

impl Default for LimitConfig {
    fn default() -> Self {
        let profiles = [("tweet", 280), ("micro", 500), ("short", 1000), ("article", 5000)]
            .into_iter()
            .map(|(name, limit)| (name.to_string(), limit))
            .collect();
        Self {
            limit_type: LimitType::Characters,
            max_chars: 280,
            max_words: 50,
            warning_threshold_pct: 80,
            critical_threshold_pct: 95,
            fill_column: 70,
            profiles,
            file_pattern: "*.{txt,md}".to_string(),
        }
    }
}

impl LimitConfig {
    /// The maximum for `mode`.
    pub const fn max_for(&self, mode: LimitType) -> usize {
        match mode {
            LimitType::Characters => self.max_chars,
            LimitType::Words => self.max_words,
        }
    }

    /// The maximum for the active mode.
    pub const fn active_max(&self) -> usize {
        self.max_for(self.limit_type)
    }

    /// Overwrite the maximum for the active mode.
    pub const fn set_active_max(&mut self, max: usize) {
        match self.limit_type {
            LimitType::Characters => self.max_chars = max,
            LimitType::Words => self.max_words = max,
        }
    }

    /// Comma-separated profile names, sorted.
    pub fn profile_names(&self) -> String {
        self.profiles
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        let warning = self.warning_threshold_pct;
        let critical = self.critical_threshold_pct;
        if warning == 0 || critical > 100 || warning >= critical {
            return Err(ConfigError::InvalidThresholds { warning, critical });
        }
        if self.fill_column == 0 {
            return Err(ConfigError::InvalidFillColumn);
        }
        globset::Glob::new(&self.file_pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: self.file_pattern.clone(),
            source,
        })?;
        Ok(())
    }
}

/// The configuration for textcap.
///
/// Limit settings sit at the top level of the file alongside logging
/// options. This struct is deserialized from config files found during
/// discovery (TOML, YAML, or JSON).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. No file logging when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Default limit settings copied into every document session.
    #[serde(flatten)]
    pub limits: LimitConfig,
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "textcap";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from XDG directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader will walk up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/textcap/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Set a boundary marker to stop directory traversal.
    ///
    /// When walking up directories, stop if we find a directory containing
    /// this file or directory name. Default is `.git`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable boundary marker (search all the way to filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Returns the merged config alongside metadata about which files
    /// were loaded. The merged limit settings are validated before
    /// returning.
    ///
    /// Precedence (highest to lowest):
    /// 1. `TEXTCAP_*` environment variables
    /// 2. Explicit files (in order added via `with_file`)
    /// 3. Project config (closest to search root)
    /// 4. User config (`~/.config/textcap/config.<ext>`)
    /// 5. Default values
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        // Start with user config (lowest precedence of file sources)
        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        // Add project configs (ordered low→high precedence)
        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        // Add explicit files
        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // Environment variables (highest precedence)
        // TEXTCAP_MAX_CHARS=500, TEXTCAP_LIMIT_TYPE=words, etc.
        figment = figment.merge(Env::prefixed("TEXTCAP_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        config.limits.validate()?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            limit_type = config.limits.limit_type.as_str(),
            max = config.limits.active_max(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching config files from the closest directory that has
    /// any match, ordered low-to-high precedence: dotfiles before regular
    /// files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            // Dotfiles first (lower precedence)
            for ext in CONFIG_EXTENSIONS {
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    found.push(dotfile);
                }
            }
            for ext in CONFIG_EXTENSIONS {
                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    found.push(regular);
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Check for boundary marker AFTER checking config files,
            // so a config in the same directory as the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in XDG config directory.
    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;

        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the user config directory path.
///
/// Returns `~/.config/textcap/` on Linux, `~/Library/Application Support/textcap/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn load_file(contents: &str, name: &str) -> ConfigResult<Config> {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(name);
        fs::write(&config_path, contents).unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .map(|(config, _)| config)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert_eq!(config.limits.limit_type, LimitType::Characters);
        assert_eq!(config.limits.profiles.get("micro"), Some(&500));
        assert!(config.limits.validate().is_ok());
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let loader = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker();

        // Should succeed with defaults even if no files found
        let (config, sources) = loader.load().unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.limits, LimitConfig::default());
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn test_single_file_overrides_default() {
        let config = load_file(
            r#"log_level = "debug"
log_dir = "/tmp/textcap"
limit_type = "words"
max_words = 120
"#,
            "config.toml",
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.log_dir.as_ref().map(|dir| dir.as_str()),
            Some("/tmp/textcap")
        );
        assert_eq!(config.limits.limit_type, LimitType::Words);
        assert_eq!(config.limits.active_max(), 120);
        // Untouched fields keep their defaults
        assert_eq!(config.limits.max_chars, 280);
    }

    #[test]
    fn test_profiles_merge_with_defaults() {
        let config = load_file("[profiles]\nhaiku = 90\nmicro = 450\n", "config.toml").unwrap();

        let profiles = &config.limits.profiles;
        assert_eq!(profiles.get("haiku"), Some(&90));
        assert_eq!(profiles.get("micro"), Some(&450));
        assert_eq!(profiles.get("tweet"), Some(&280));
    }

    #[test]
    fn test_yaml_and_json_formats() {
        let yaml = load_file("max_chars: 42\nfill_column: 60\n", "config.yaml").unwrap();
        assert_eq!(yaml.limits.max_chars, 42);
        assert_eq!(yaml.limits.fill_column, 60);

        let json = load_file(r#"{"critical_threshold_pct": 99}"#, "config.json").unwrap();
        assert_eq!(json.limits.critical_threshold_pct, 99);
    }

    #[test]
    fn test_thresholds_out_of_order_rejected() {
        let result = load_file(
            "warning_threshold_pct = 95\ncritical_threshold_pct = 80\n",
            "config.toml",
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidThresholds {
                warning: 95,
                critical: 80
            })
        ));
    }

    #[test]
    fn test_threshold_above_hundred_rejected() {
        let limits = LimitConfig {
            critical_threshold_pct: 101,
            ..LimitConfig::default()
        };
        assert!(matches!(
            limits.validate(),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn test_zero_fill_column_rejected() {
        let limits = LimitConfig {
            fill_column: 0,
            ..LimitConfig::default()
        };
        assert!(matches!(
            limits.validate(),
            Err(ConfigError::InvalidFillColumn)
        ));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let result = load_file("file_pattern = \"notes/[a\"\n", "config.toml");
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();

        let base_config = tmp.path().join("base.toml");
        fs::write(&base_config, "max_chars = 100\n").unwrap();

        let override_config = tmp.path().join("override.toml");
        fs::write(&override_config, "max_chars = 200\n").unwrap();

        let base_config = Utf8PathBuf::try_from(base_config).unwrap();
        let override_config = Utf8PathBuf::try_from(override_config).unwrap();

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base_config)
            .with_file(&override_config)
            .load()
            .unwrap();

        // Later file wins
        assert_eq!(config.limits.max_chars, 200);
    }

    #[test]
    fn test_project_config_discovery() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("project");
        let sub_dir = project_dir.join("drafts").join("deep");
        fs::create_dir_all(&sub_dir).unwrap();

        fs::write(project_dir.join(".textcap.toml"), r#"log_level = "debug""#).unwrap();

        let sub_dir = Utf8PathBuf::try_from(sub_dir).unwrap();

        // Search from deep subdirectory
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&sub_dir)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!sources.project_files.is_empty());
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();

        // Create structure: /parent/.textcap.toml, /parent/child/.git/, /parent/child/work/
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();

        // Config in parent (should NOT be found due to .git boundary)
        fs::write(parent.join(".textcap.toml"), "max_chars = 9\n").unwrap();

        // .git marker in child
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(&work)
            .load()
            .unwrap();

        // Should get default since config is beyond boundary
        assert_eq!(config.limits.max_chars, 280);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn test_regular_file_overrides_dotfile() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".textcap.toml"), "max_chars = 10\n").unwrap();
        fs::write(tmp.path().join("textcap.toml"), "max_chars = 20\n").unwrap();

        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&tmp_path)
            .load()
            .unwrap();

        assert_eq!(config.limits.max_chars, 20);
        assert_eq!(sources.project_files.len(), 2);
        assert!(sources.primary_file().unwrap().as_str().ends_with("textcap.toml"));
    }

    #[test]
    fn test_only_closest_directory_contributes() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();

        fs::write(parent.join(".textcap.toml"), "max_words = 5\n").unwrap();
        fs::write(child.join(".textcap.toml"), "max_chars = 15\n").unwrap();

        let child_path = Utf8PathBuf::try_from(child).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&child_path)
            .load()
            .unwrap();

        assert_eq!(config.limits.max_chars, 15);
        assert_eq!(config.limits.max_words, 50);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn test_user_config_dir() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("textcap"));
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "limit_type = \"characters\"\n").unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        // SAFETY: Test environment; the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("TEXTCAP_LIMIT_TYPE", "words");
        }

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load();

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("TEXTCAP_LIMIT_TYPE");
        }

        let (config, _sources) = result.unwrap();
        assert_eq!(config.limits.limit_type, LimitType::Words);
    }

    #[test]
    fn limits_deserialize_from_yaml() {
        let yaml = r#"
limit_type: words
max_words: 300
profiles:
  abstract: 1500
file_pattern: "drafts/**/*.md"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.limits.limit_type, LimitType::Words);
        assert_eq!(config.limits.max_words, 300);
        assert_eq!(config.limits.profiles.get("abstract"), Some(&1500));
        assert_eq!(config.limits.file_pattern, "drafts/**/*.md");
    }

    #[test]
    fn set_active_max_follows_mode() {
        let mut limits = LimitConfig::default();
        limits.set_active_max(12);
        assert_eq!(limits.max_chars, 12);

        limits.limit_type = LimitType::Words;
        limits.set_active_max(3);
        assert_eq!(limits.max_words, 3);
        assert_eq!(limits.max_chars, 12);
    }

    #[test]
    fn profile_names_are_sorted() {
        assert_eq!(
            LimitConfig::default().profile_names(),
            "article, micro, short, tweet"
        );
    }
}
