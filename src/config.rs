//! Configuration system for Rivals Insights
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (RIVALS_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::media::cdn;
use crate::types::ROSTER_CAPACITY;

/// File name searched for in the working directory
pub const CONFIG_FILE_NAME: &str = "rivals-insights.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Media URL resolution
    pub media: MediaSettings,

    /// Roster analysis
    pub analysis: AnalysisSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Media URL resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Origin that relative media paths are resolved against
    pub root_origin: String,

    /// Image CDN hosts whose URLs get version stripping and transforms
    pub cdn_hosts: Vec<String>,

    /// Path segment after which CDN transforms are placed
    pub upload_marker: String,

    /// Transform directive per image kind
    pub transforms: TransformSettings,
}

/// CDN transform directives; an empty string disables injection for that kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Square face crop for user avatars
    pub avatar: String,

    /// Character portraits
    pub portrait: String,

    /// Wide banner artwork
    pub banner: String,
}

/// Roster analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Emit the roster-detail diagnostics (single frontline/support, damage overload)
    pub extended_diagnostics: bool,

    /// Number of synergies shown in text output
    pub synergy_preview: usize,

    /// Roster size the builder allows; larger rosters are analyzed with a warning
    pub roster_capacity: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            root_origin: "http://127.0.0.1:8000".to_string(),
            cdn_hosts: vec!["res.cloudinary.com".to_string()],
            upload_marker: "upload".to_string(),
            transforms: TransformSettings::default(),
        }
    }
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            avatar: "c_fill,g_face,h_256,w_256,f_auto,q_auto".to_string(),
            portrait: "c_fill,g_auto,h_560,w_400,f_auto,q_auto".to_string(),
            banner: "c_fill,g_auto,h_400,w_1200,f_auto,q_auto".to_string(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            extended_diagnostics: false,
            synergy_preview: 3,
            roster_capacity: ROSTER_CAPACITY,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_files: 5,
            json_format: false,
        }
    }
}

impl InsightsConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            return if path.exists() {
                Ok(Some(path))
            } else {
                Err(Error::config_not_found(path))
            };
        }

        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            dirs::config_dir()
                .map(|p| p.join("rivals").join("insights.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".rivals").join("insights.toml"))
                .unwrap_or_default(),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Media settings
        if let Ok(val) = std::env::var("RIVALS_MEDIA_ROOT") {
            self.media.root_origin = val;
        }
        if let Ok(val) = std::env::var("RIVALS_CDN_HOSTS") {
            self.media.cdn_hosts = val
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(val) = std::env::var("RIVALS_AVATAR_TRANSFORM") {
            self.media.transforms.avatar = val;
        }
        if let Ok(val) = std::env::var("RIVALS_PORTRAIT_TRANSFORM") {
            self.media.transforms.portrait = val;
        }
        if let Ok(val) = std::env::var("RIVALS_BANNER_TRANSFORM") {
            self.media.transforms.banner = val;
        }

        // Analysis settings
        if let Ok(val) = std::env::var("RIVALS_EXTENDED_DIAGNOSTICS") {
            self.analysis.extended_diagnostics = parse_bool(&val);
        }
        if let Ok(val) = std::env::var("RIVALS_SYNERGY_PREVIEW") {
            if let Ok(n) = val.parse() {
                self.analysis.synergy_preview = n;
            }
        }
        if let Ok(val) = std::env::var("RIVALS_ROSTER_CAPACITY") {
            if let Ok(n) = val.parse() {
                self.analysis.roster_capacity = n;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("RIVALS_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("RIVALS_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("RIVALS_LOG_JSON") {
            self.logging.json_format = parse_bool(&val);
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let root = self.media.root_origin.trim();
        if root.is_empty() {
            return Err(Error::config_field_invalid(
                "media.root_origin",
                "Media root origin cannot be empty",
            ));
        }
        if !root.starts_with("http://") && !root.starts_with("https://") {
            return Err(Error::config_field_invalid(
                "media.root_origin",
                "Media root origin must start with http:// or https://",
            ));
        }

        if self.media.cdn_hosts.iter().any(|h| h.trim().is_empty()) {
            return Err(Error::config_field_invalid(
                "media.cdn_hosts",
                "CDN host entries cannot be empty",
            ));
        }

        if self.media.upload_marker.trim().is_empty() || self.media.upload_marker.contains('/') {
            return Err(Error::config_field_invalid(
                "media.upload_marker",
                "Upload marker must be a single non-empty path segment",
            ));
        }

        let transforms = [
            ("media.transforms.avatar", &self.media.transforms.avatar),
            ("media.transforms.portrait", &self.media.transforms.portrait),
            ("media.transforms.banner", &self.media.transforms.banner),
        ];
        for (field, transform) in transforms {
            let transform = transform.trim().trim_matches('/');
            if !transform.is_empty() && !transform.split('/').all(cdn::is_transform_segment) {
                return Err(Error::config_field_invalid(
                    field,
                    format!(
                        "Transform '{}' is not recognizable as a transform segment \
                         (expected comma-separated <1-3 lowercase letters>_<value> parameters)",
                        transform
                    ),
                ));
            }
        }

        if self.analysis.roster_capacity == 0 {
            return Err(Error::config_field_invalid(
                "analysis.roster_capacity",
                "roster_capacity must be at least 1",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

fn parse_bool(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file, returning where it was written
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(default_config_path);

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rivals")
        .join("insights.toml")
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# Rivals Insights Configuration

[media]
# Origin that relative media paths (e.g. "heroes/thor.png") resolve against
root_origin = "http://127.0.0.1:8000"

# Image CDN hosts; matching URLs get version segments stripped and a
# transform directive injected after the upload marker
cdn_hosts = ["res.cloudinary.com"]

# Path segment that precedes CDN transforms
upload_marker = "upload"

[media.transforms]
# Leave a kind empty to disable transform injection for it
avatar = "c_fill,g_face,h_256,w_256,f_auto,q_auto"
portrait = "c_fill,g_auto,h_560,w_400,f_auto,q_auto"
banner = "c_fill,g_auto,h_400,w_1200,f_auto,q_auto"

[analysis]
# Flag single frontline/support and damage-heavy rosters
extended_diagnostics = false

# Synergies listed in text output
synergy_preview = 3

# Team builder roster cap
roster_capacity = 6

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.rivals/logs/insights.log"

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}
