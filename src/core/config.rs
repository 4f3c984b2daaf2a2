//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navstack/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavstackConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub screens: Vec<ScreenEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub title: Option<String>,
    pub centre_text: Option<String>,
    pub right_text: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

/// One screen of the catalog. `links` are keys of other screens.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScreenEntry {
    pub key: String,
    pub title: Option<String>,
    pub body: Option<String>,
    /// Replaces `[general] right_text` while this screen is active.
    pub right_text: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "navstack";
pub const DEFAULT_LOG_FILE: &str = "navstack.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

fn screen(key: &str, title: &str, body: &str, links: &[&str]) -> ScreenEntry {
    ScreenEntry {
        key: key.to_string(),
        title: Some(title.to_string()),
        body: Some(body.to_string()),
        right_text: None,
        links: links.iter().map(|l| l.to_string()).collect(),
    }
}

/// Catalog used when the config file defines no screens.
pub fn default_screens() -> Vec<ScreenEntry> {
    let mut stocktake = screen(
        "stocktake",
        "Stocktake",
        "Count and adjust stock levels.",
        &["stock", "customers"],
    );
    stocktake.right_text = Some("Finalise".to_string());

    vec![
        screen(
            "root",
            "Menu",
            "Pick a section to open it on top of the stack.",
            &["customers", "suppliers", "stock"],
        ),
        screen(
            "customers",
            "Customers",
            "Customer invoices and requisitions.",
            &["invoice", "stock"],
        ),
        screen(
            "suppliers",
            "Suppliers",
            "Goods received and supplier invoices.",
            &["invoice", "customers"],
        ),
        screen(
            "stock",
            "Current Stock",
            "Item quantities across all locations.",
            &["stocktake"],
        ),
        screen(
            "invoice",
            "Invoice",
            "A single invoice. Opening it again from here does nothing.",
            &["invoice", "stock"],
        ),
        stocktake,
    ]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub title: String,
    pub centre_text: Option<String>,
    pub right_text: Option<String>,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub screens: Vec<ScreenEntry>,
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

/// Returns the path to `~/.navstack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navstack").join("config.toml"))
}

/// Where the loaded config came from.
///
/// `load_config` runs before the file logger exists, so it reports what it
/// did through this value and the caller logs it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file existed; a commented default was written here.
    Generated(PathBuf),
    GenerateFailed { path: PathBuf, reason: String },
    NoHomeDir,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigSource::GenerateFailed { path, reason } => {
                warn!("Failed to write default config to {}: {reason}", path.display())
            }
            ConfigSource::NoHomeDir => {
                warn!("Could not determine home directory, using default config")
            }
        }
    }
}

/// Load config from `explicit` if given, otherwise `~/.navstack/config.toml`.
///
/// A missing default file is generated and `NavstackConfig::default()` is
/// returned. A missing explicit file is an error.
pub fn load_config(
    explicit: Option<&Path>,
) -> Result<(NavstackConfig, ConfigSource), ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => return Ok((NavstackConfig::default(), ConfigSource::NoHomeDir)),
        },
    };

    if explicit.is_none() && !path.exists() {
        let source = match generate_default_config(&path) {
            Ok(()) => ConfigSource::Generated(path),
            Err(e) => ConfigSource::GenerateFailed {
                path,
                reason: e.to_string(),
            },
        };
        return Ok((NavstackConfig::default(), source));
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    Ok((config, ConfigSource::File(path)))
}

pub fn parse_config(contents: &str) -> Result<NavstackConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# navstack configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# title = "navstack"             # Header title when a screen has none (NAVSTACK_TITLE)
# centre_text = "Main store"     # Shown in the middle of the header
# right_text = "Online"          # Trailing header text unless a screen overrides it
# log_level = "info"             # off, error, warn, info, debug, trace (NAVSTACK_LOG_LEVEL)
# log_file = "navstack.log"      # (NAVSTACK_LOG_FILE)

# The screen with key "root" is shown first. Without any [[screens]]
# a built-in demo catalog is used.

# [[screens]]
# key = "root"
# title = "Menu"
# body = "Pick a section."
# links = ["customers"]
# right_text = "Help"            # Overrides the general right_text on this screen

# [[screens]]
# key = "customers"
# title = "Customers"
# body = "Customer invoices and requisitions."
# links = []
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_title` and `cli_log_level` are from CLI flags (None = not specified).
pub fn resolve(
    config: &NavstackConfig,
    cli_title: Option<&str>,
    cli_log_level: Option<&str>,
) -> ResolvedConfig {
    // Title: CLI → env → config → default
    let title = cli_title
        .map(|s| s.to_string())
        .or_else(|| std::env::var("NAVSTACK_TITLE").ok())
        .or_else(|| config.general.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("NAVSTACK_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .and_then(|s| LevelFilter::from_str(&s).ok())
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = std::env::var("NAVSTACK_LOG_FILE")
        .ok()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let screens = if config.screens.is_empty() {
        default_screens()
    } else {
        config.screens.clone()
    };

    ResolvedConfig {
        title,
        centre_text: config.general.centre_text.clone(),
        right_text: config.general.right_text.clone(),
        log_level,
        log_file: PathBuf::from(log_file),
        screens,
    }
}
