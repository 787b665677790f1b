//! TOML configuration for `coax-keytool`.
//!
//! The config file is optional.  When `--config` is not given it is looked up
//! in the platform config directory:
//! - Linux:    `$XDG_CONFIG_HOME/coax-keytool/config.toml` or
//!   `~/.config/coax-keytool/config.toml`
//! - Windows:  `%APPDATA%\CoaxKeytool\config.toml`
//! - macOS:    `~/Library/Application Support/CoaxKeytool/config.toml`
//!
//! Example:
//!
//! ```toml
//! [tool]
//! log_level = "debug"
//!
//! [keyboard]
//! keymap = "/etc/coax/keymaps/3278-us.toml"
//!
//! [encoding]
//! errors = "strict"
//! ```
//!
//! Every field has a serde default, so a partial file (or none at all) is
//! valid.  Command-line flags override whatever the file says.

use std::path::{Path, PathBuf};

use coax_core::ErrorPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File name looked up inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolConfig {
    #[serde(default)]
    pub tool: ToolSection,
    #[serde(default)]
    pub keyboard: KeyboardSection,
    #[serde(default)]
    pub encoding: EncodingSection,
}

/// General tool behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSection {
    /// `tracing` log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Keyboard settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyboardSection {
    /// Keymap used by `decode` when `--keymap` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keymap: Option<PathBuf>,
}

/// Glyph encoding settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EncodingSection {
    /// Policy for non-ASCII text when `--errors` is not given.
    #[serde(default)]
    pub errors: ErrorPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ToolSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parses a config document.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed or a value has the
/// wrong type.
pub fn parse_config(text: &str) -> Result<ToolConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Loads the configuration.
///
/// With an explicit path the file must exist.  Without one the platform
/// config file is used if present, and defaults otherwise.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if an explicit file cannot be read or the
/// platform file exists but cannot be read, and [`ConfigError::Parse`] if the
/// TOML is malformed.
pub fn load_config(explicit: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let Some(path) = config_file_path() else {
        debug!("no platform config directory; using default configuration");
        return Ok(ToolConfig::default());
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            debug!("loaded configuration from {}", path.display());
            parse_config(&content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ToolConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Loads the configuration from `path`, which must exist.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_from(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded configuration from {}", path.display());
    parse_config(&content)
}

/// Resolves the full path to the platform config file, if the platform has a
/// config directory.
pub fn config_file_path() -> Option<PathBuf> {
    platform_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("CoaxKeytool"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("CoaxKeytool")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("coax-keytool"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        // Arrange / Act
        let cfg = ToolConfig::default();

        // Assert
        assert_eq!(cfg.tool.log_level, "info");
        assert_eq!(cfg.keyboard.keymap, None);
        assert_eq!(cfg.encoding.errors, ErrorPolicy::Replace);
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let cfg = parse_config("").expect("parse");
        assert_eq!(cfg, ToolConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        // Arrange
        let text = "[encoding]\nerrors = \"strict\"\n";

        // Act
        let cfg = parse_config(text).expect("parse");

        // Assert
        assert_eq!(cfg.encoding.errors, ErrorPolicy::Strict);
        assert_eq!(cfg.tool.log_level, "info");
        assert_eq!(cfg.keyboard.keymap, None);
    }

    #[test]
    fn test_full_document_is_parsed() {
        let text = r#"
            [tool]
            log_level = "trace"

            [keyboard]
            keymap = "layouts/us.toml"

            [encoding]
            errors = "ignore"
        "#;

        let cfg = parse_config(text).expect("parse");

        assert_eq!(cfg.tool.log_level, "trace");
        assert_eq!(cfg.keyboard.keymap, Some(PathBuf::from("layouts/us.toml")));
        assert_eq!(cfg.encoding.errors, ErrorPolicy::Ignore);
    }

    #[test]
    fn test_unknown_error_policy_is_a_parse_error() {
        let result = parse_config("[encoding]\nerrors = \"lenient\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_serializes_and_deserializes_round_trip() {
        // Arrange
        let mut cfg = ToolConfig::default();
        cfg.keyboard.keymap = Some(PathBuf::from("demo.toml"));
        cfg.encoding.errors = ErrorPolicy::Strict;

        // Act
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let restored = parse_config(&text).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[tool]\nlog_level = \"warn\"\n").expect("write");

        let cfg = load_config(Some(&path)).expect("load");

        assert_eq!(cfg.tool.log_level, "warn");
    }

    #[test]
    fn test_missing_explicit_path_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();

        match err {
            ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_file_path_ends_with_file_name() {
        if let Some(path) = config_file_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }
}
