//! Configuration management.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "seoforge.toml";

/// Main configuration structure for seoforge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content provider settings.
    pub provider: ProviderConfig,

    /// Auto-post scheduler settings.
    pub autopost: AutopostConfig,

    /// Static export settings.
    pub export: ExportConfig,

    /// Preview server settings.
    pub serve: ServeConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL used in sitemap.xml and robots.txt.
    pub base_url: String,
}

/// Content provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Model identifier.
    pub model: String,

    /// API base URL.
    pub api_base: String,

    /// API key; falls back to the `GEMINI_API_KEY` environment variable.
    pub api_key: Option<String>,
}

/// Auto-post scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopostConfig {
    /// Hours between auto-post cycles.
    pub interval_hours: u64,
}

impl AutopostConfig {
    /// The cycle period as a [`Duration`].
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.max(1) * 60 * 60)
    }
}

/// Static export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory for the exported file set.
    pub output_dir: String,
}

/// Preview server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Port the preview server listens on.
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://example.com".to_string(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
        }
    }
}

impl Default for AutopostConfig {
    fn default() -> Self {
        Self { interval_hours: 8 }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "public".to_string(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from an explicit path, from [`DEFAULT_CONFIG_FILE`] if present,
    /// or fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.site.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.provider.model, "gemini-2.5-flash");
        assert_eq!(config.autopost.interval_hours, 8);
        assert_eq!(config.export.output_dir, "public");
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_interval_duration() {
        let autopost = AutopostConfig { interval_hours: 8 };
        assert_eq!(autopost.interval(), Duration::from_secs(8 * 60 * 60));
        // Zero is clamped up rather than producing a busy loop.
        let zero = AutopostConfig { interval_hours: 0 };
        assert_eq!(zero.interval(), Duration::from_secs(60 * 60));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[site]\nbase_url = \"https://eco.example\"\n\n[autopost]\ninterval_hours = 2"
        )
        .expect("write config");

        let config = Config::load(file.path()).expect("load config");
        assert_eq!(config.site.base_url, "https://eco.example");
        assert_eq!(config.autopost.interval_hours, 2);
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = Config::load(Path::new("does-not-exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.toml"));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = Config {
            site: SiteConfig {
                base_url: "https://eco.example/".to_string(),
            },
            ..Config::default()
        };
        assert_eq!(config.base_url(), "https://eco.example");
    }
}
