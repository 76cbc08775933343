//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.medchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::state::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MedchatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<Theme>,
    pub disclaimer_threshold: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub endpoint: Option<String>,
    pub field: Option<String>,
    pub timeout_secs: Option<u64>,
    pub strict_status: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/get";
pub const DEFAULT_FIELD: &str = "msg";
pub const DEFAULT_DISCLAIMER_THRESHOLD: usize = 100;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub field: String,
    /// `None` waits forever for the backend.
    pub timeout: Option<Duration>,
    /// Treat non-2xx statuses as failures instead of showing the body.
    pub strict_status: bool,
    pub theme: Theme,
    pub disclaimer_threshold: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with_env(&MedchatConfig::default(), &CliOverrides::default(), |_| None)
    }
}

/// Values supplied on the command line. `None`/`false` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub dark: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.medchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".medchat").join("config.toml"))
}

/// Load config from `~/.medchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MedchatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MedchatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MedchatConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<MedchatConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MedchatConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MedchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# medchat configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "light"                    # "light" or "dark" (or MEDCHAT_THEME)
# disclaimer_threshold = 100         # replies longer than this get a disclaimer line

# [backend]
# endpoint = "http://localhost:8000/get"   # Or set MEDCHAT_ENDPOINT
# field = "msg"                      # form field carrying the question
# timeout_secs = 60                  # unset = wait indefinitely
# strict_status = false              # true = non-2xx responses count as failures
"#;

fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config from the file, process environment and CLI flags.
pub fn resolve(config: &MedchatConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &MedchatConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| env("MEDCHAT_ENDPOINT"))
        .or_else(|| config.backend.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Theme: --dark → env → config → light
    let theme = if cli.dark {
        Theme::Dark
    } else {
        env("MEDCHAT_THEME")
            .and_then(|value| parse_theme(&value))
            .or(config.general.theme)
            .unwrap_or_default()
    };

    ResolvedConfig {
        endpoint,
        field: config
            .backend
            .field
            .clone()
            .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
        timeout: config.backend.timeout_secs.map(Duration::from_secs),
        strict_status: config.backend.strict_status.unwrap_or(false),
        theme,
        disclaimer_threshold: config
            .general
            .disclaimer_threshold
            .unwrap_or(DEFAULT_DISCLAIMER_THRESHOLD),
    }
}

fn parse_theme(value: &str) -> Option<Theme> {
    match value.trim().to_ascii_lowercase().as_str() {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        other => {
            warn!("Ignoring unknown theme '{}'", other);
            None
        }
    }
}
