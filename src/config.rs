//! Configuration management for the portfolio site using the prefer crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::carousel::DEFAULT_INTERVAL;

/// Default directory holding the CV and gallery resources.
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Default CV filename inside the public directory.
pub const DEFAULT_CV_FILENAME: &str = "cv-michelle.pdf";

/// Default bind address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Subdirectory of the public directory that holds gallery images.
const RESOURCES_SUBDIR: &str = "resources";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Directory holding static assets (CV, gallery images).
    pub public_dir: PathBuf,
    /// CV filename inside `public_dir`.
    pub cv_filename: String,
    /// Address the web server binds to.
    pub bind: String,
    /// Milliseconds between automatic carousel advances.
    pub slide_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            cv_filename: DEFAULT_CV_FILENAME.to_string(),
            bind: DEFAULT_BIND.to_string(),
            slide_interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

impl Settings {
    /// Create settings rooted at a custom public directory.
    pub fn with_public_dir(public_dir: PathBuf) -> Self {
        Self {
            public_dir,
            ..Default::default()
        }
    }

    /// Full path of the CV file.
    pub fn cv_path(&self) -> PathBuf {
        self.public_dir.join(&self.cv_filename)
    }

    /// Directory served under `/resources`.
    pub fn resources_dir(&self) -> PathBuf {
        self.public_dir.join(RESOURCES_SUBDIR)
    }

    pub fn slide_interval(&self) -> Duration {
        Duration::from_millis(self.slide_interval_ms)
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Public asset directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<String>,
    /// CV filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_filename: Option<String>,
    /// Bind address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Carousel interval in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_interval_ms: Option<u64>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when no config file is found.
    pub async fn load() -> Self {
        match prefer::load("portfolio").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let mut config = Self::parse(path, &contents)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, String> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        match ext {
            "toml" => {
                toml::from_str(contents).map_err(|e| format!("Failed to parse TOML config: {}", e))
            }
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    /// Directory of the config file, if it came from one.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved against `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref public_dir) = self.public_dir {
            settings.public_dir = self.resolve_path(public_dir, base_dir);
        }
        if let Some(ref cv_filename) = self.cv_filename {
            settings.cv_filename = cv_filename.clone();
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
        if let Some(interval) = self.slide_interval_ms {
            settings.slide_interval_ms = interval.max(1);
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
}

/// Read a non-empty environment variable.
fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await.unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            Config::default()
        }),
        None => Config::load().await,
    };

    let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base_dir = if options.use_cwd {
        cwd()
    } else {
        config.base_dir().unwrap_or_else(cwd)
    };

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings, &base_dir);

    if let Some(public_dir) = env_override("PORTFOLIO_PUBLIC_DIR") {
        tracing::debug!("Using PORTFOLIO_PUBLIC_DIR from environment: {}", public_dir);
        settings.public_dir = config.resolve_path(&public_dir, &cwd());
    }
    if let Some(bind) = env_override("PORTFOLIO_BIND") {
        tracing::debug!("Using PORTFOLIO_BIND from environment: {}", bind);
        settings.bind = bind;
    }

    (settings, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.cv_path(), PathBuf::from("public/cv-michelle.pdf"));
        assert_eq!(settings.resources_dir(), PathBuf::from("public/resources"));
        assert_eq!(settings.slide_interval(), Duration::from_millis(3000));
    }

    #[test]
    fn test_parse_by_extension() {
        let toml = Config::parse(Path::new("portfolio.toml"), "cv_filename = \"cv.pdf\"").unwrap();
        assert_eq!(toml.cv_filename.as_deref(), Some("cv.pdf"));

        let yaml = Config::parse(Path::new("portfolio.yml"), "bind: \"0.0.0.0:80\"\n").unwrap();
        assert_eq!(yaml.bind.as_deref(), Some("0.0.0.0:80"));

        let json = Config::parse(Path::new("portfolio.json"), r#"{"slide_interval_ms": 500}"#)
            .unwrap();
        assert_eq!(json.slide_interval_ms, Some(500));

        assert!(Config::parse(Path::new("portfolio.toml"), "= nope").is_err());
    }

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let config = Config {
            public_dir: Some("assets".to_string()),
            slide_interval_ms: Some(0),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/srv/site"));

        assert_eq!(settings.public_dir, PathBuf::from("/srv/site/assets"));
        assert_eq!(settings.slide_interval_ms, 1);
    }

    #[test]
    fn test_absolute_path_kept() {
        let config = Config::default();
        assert_eq!(
            config.resolve_path("/var/www", Path::new("/srv")),
            PathBuf::from("/var/www")
        );
    }

    #[tokio::test]
    async fn test_explicit_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        std::fs::write(&path, "public_dir = \"static\"\nbind = \"0.0.0.0:8080\"\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.base_dir().as_deref(), Some(dir.path()));

        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, &config.base_dir().unwrap());
        assert_eq!(settings.public_dir, dir.path().join("static"));
        assert_eq!(settings.bind, "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_missing_config_file_is_error() {
        let dir = tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("absent.toml"))
            .await
            .unwrap_err();
        assert!(err.contains("Failed to read config file"));
    }
}
