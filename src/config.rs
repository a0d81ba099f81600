//! Configuration file parser for ~/.config/reel/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as a warning, since they are
//! usually typos.
use crate::profile::Profile;
use crate::session::DEFAULT_INITIAL_BATCH;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// Every field has a default, so any subset of keys can be given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Posts marked visible when a feed screen first opens.
    pub initial_render_batch: usize,

    /// Post file to load instead of the built-in sample feed.
    pub posts_file: Option<PathBuf>,

    /// Keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,

    /// Starting values for the profile form.
    pub profile: Profile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            initial_render_batch: DEFAULT_INITIAL_BATCH,
            posts_file: None,
            keybindings: HashMap::new(),
            profile: Profile::default(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = [
        "theme",
        "initial_render_batch",
        "posts_file",
        "keybindings",
        "profile",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing or empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line info
    /// - Unknown keys → accepted, logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content)
    }

    /// Parse config file contents.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            theme = %config.theme,
            initial_render_batch = config.initial_render_batch,
            posts_file = ?config.posts_file,
            "Loaded configuration"
        );
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.initial_render_batch, 3);
        assert!(config.posts_file.is_none());
        assert!(config.keybindings.is_empty());
        assert_eq!(config.profile.name, "Prince Kumar");
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/reel_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_empty_and_whitespace_return_default() {
        assert_eq!(Config::parse("").unwrap().initial_render_batch, 3);
        assert_eq!(Config::parse("   \n  \n").unwrap().theme, "dark");
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::parse("theme = \"light\"\n").unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.initial_render_batch, 3);
        assert_eq!(config.profile, Profile::default());
    }

    #[test]
    fn test_full_config() {
        let content = r#"
theme = "light"
initial_render_batch = 5
posts_file = "/srv/reel/posts.json"

[keybindings]
quit = "Ctrl+q"
toggle_play = "p"

[profile]
name = "Nidhi Gupta"
location = "Mumbai, India"
"#;
        let config = Config::parse(content).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.initial_render_batch, 5);
        assert_eq!(
            config.posts_file.as_deref(),
            Some(Path::new("/srv/reel/posts.json"))
        );
        assert_eq!(
            config.keybindings.get("toggle_play").map(String::as_str),
            Some("p")
        );
        assert_eq!(config.profile.name, "Nidhi Gupta");
        assert_eq!(config.profile.location, "Mumbai, India");
        // Fields not given keep their defaults
        assert_eq!(config.profile.profession, "Software Developer");
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::parse("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let content = r#"
theme = "dark"
refresh_interval_minutes = 30
"#;
        assert_eq!(Config::parse(content).unwrap().theme, "dark");
    }

    #[test]
    fn test_wrong_type_returns_error() {
        assert!(Config::parse("initial_render_batch = \"three\"\n").is_err());
        assert!(Config::parse("theme = 42\n").is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = std::env::temp_dir().join("reel_config_test_disk");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "initial_render_batch = 1\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.initial_render_batch, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("reel_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
