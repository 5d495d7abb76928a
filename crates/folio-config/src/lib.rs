//! Configuration management for Folio.
//!
//! Reads `folio.toml`, looked up from the working directory upward when no
//! explicit path is given.
//!
//! ```toml
//! [content]
//! source_dir = "posts"
//!
//! [render]
//! escape_html = false
//! dedupe_section_ids = false
//! base_path = "/blog"
//! ```
//!
//! Command-line flags are layered on top through [`CliSettings`].
//!
//! ## `${VAR}` references
//!
//! `${VAR}` must be set; `${VAR:-fallback}` uses the fallback when unset.
//! Only these fields are expanded:
//! - `content.source_dir`
//! - `render.base_path`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Flag values that win over `folio.toml`. `None` leaves the file value.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override HTML escaping.
    pub escape_html: Option<bool>,
    /// Override section id deduplication.
    pub dedupe_section_ids: Option<bool>,
    /// Override link base path.
    pub base_path: Option<String>,
}

/// File name looked up during discovery.
const CONFIG_FILENAME: &str = "folio.toml";

/// Default content directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "content";

/// Loaded `folio.toml`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// File the config came from, `None` for built-in defaults.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding `<slug>.md` post files.
    pub source_dir: PathBuf,
}

/// Rendering configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Escape text and raw HTML for untrusted sources.
    pub escape_html: bool,
    /// Suffix repeated section ids (`faq`, `faq-1`).
    pub dedupe_section_ids: bool,
    /// URL prefix for resolving relative `.md` links (e.g. `/blog`).
    pub base_path: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("invalid folio.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A `${VAR}` reference could not be expanded.
    #[error("cannot expand {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.source_dir`").
        field: String,
        /// Error message (e.g., "${`POSTS_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load `config_path`, or the discovered `folio.toml`, or defaults
    /// rooted at the working directory, then layer `cli_settings` on top.
    ///
    /// # Errors
    ///
    /// Fails when an explicit `config_path` is missing, or when the file
    /// cannot be read, parsed, expanded or validated.
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
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Overwrite file values with the flags that were given.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(escape_html) = settings.escape_html {
            self.render.escape_html = escape_html;
        }
        if let Some(dedupe) = settings.dedupe_section_ids {
            self.render.dedupe_section_ids = dedupe;
        }
        if let Some(base_path) = &settings.base_path {
            self.render.base_path = Some(base_path.clone());
        }
    }

    /// Walk from the working directory to the root looking for `folio.toml`.
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Defaults with the content directory under `base`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            render: RenderConfig::default(),
            content_resolved: ContentConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
            },
            config_path: None,
        }
    }

    /// Parse, expand, resolve and validate one file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Check values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `render.base_path` is set but does
    /// not start with `/`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base_path) = &self.render.base_path
            && !base_path.starts_with('/')
        {
            return Err(ConfigError::Validation(format!(
                "render.base_path must start with '/', got '{base_path}'"
            )));
        }
        Ok(())
    }

    /// Replace `${VAR}` references in the expandable fields.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.content.source_dir {
            self.content.source_dir = Some(expand::expand_env(source_dir, "content.source_dir")?);
        }
        if let Some(ref base_path) = self.render.base_path {
            self.render.base_path = Some(expand::expand_env(base_path, "render.base_path")?);
        }
        Ok(())
    }

    /// Anchor `content.source_dir` at the directory holding the file.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = self
            .content
            .source_dir
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_DIR);
        self.content_resolved = ContentConfig {
            source_dir: config_dir.join(source_dir),
        };
    }
}
