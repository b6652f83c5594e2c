// SettingsVault - platform/config.rs
//
// Platform data directory resolution and config.toml loading with startup
// validation. Uses the `directories` crate for XDG (Linux), AppData
// (Windows), Library (macOS) compliance.

use crate::core::codec::Codec;
use crate::core::name::CategoryName;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SettingsVault data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/settingsvault/).
    pub config_dir: PathBuf,

    /// Data directory (e.g. ~/.local/share/settingsvault/).
    pub data_dir: PathBuf,

    /// Root of the profile store, one sub-directory per category.
    pub profiles_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();
            let profiles_dir = data_dir.join(constants::PROFILES_DIR_NAME);

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                profiles = %profiles_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
                profiles_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                profiles_dir: fallback.join(constants::PROFILES_DIR_NAME),
                data_dir: fallback,
            }
        }
    }

    /// Location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[storage]` section.
    pub storage: StorageSection,
    /// `[codecs]` table: category name → codec name.
    pub codecs: BTreeMap<String, String>,
    /// `[names]` section.
    pub names: NamesSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[storage]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Profile root directory override.
    pub root: Option<String>,
    /// Codec for categories without an entry in `[codecs]`.
    pub default_codec: Option<String>,
}

/// `[names]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct NamesSection {
    /// Maximum profile/category name length in characters.
    pub max_length: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Profile root override. `None` = platform default.
    pub profiles_root: Option<PathBuf>,
    /// Codec for categories not listed in `codecs`.
    pub default_codec: Codec,
    /// Per-category codec overrides.
    pub codecs: BTreeMap<CategoryName, Codec>,
    /// Maximum profile name length in characters.
    pub max_name_length: usize,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profiles_root: None,
            default_codec: Codec::default(),
            codecs: BTreeMap::new(),
            max_name_length: constants::DEFAULT_MAX_NAME_LENGTH,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal problems.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with one warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);
    (config, warnings)
}

/// Validate each field against named constants, accumulating all problems.
pub fn validate(raw: RawConfig, warnings: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Storage: root --
    if let Some(root) = raw.storage.root.filter(|r| !r.is_empty()) {
        config.profiles_root = Some(PathBuf::from(root));
    }

    // -- Storage: default_codec --
    if let Some(ref name) = raw.storage.default_codec {
        match name.parse::<Codec>() {
            Ok(codec) => config.default_codec = codec,
            Err(_) => warnings.push(unknown_codec("storage.default_codec", name)),
        }
    }

    // -- Names: max_length (profile names only) --
    if let Some(len) = raw.names.max_length {
        if (constants::MIN_MAX_NAME_LENGTH..=constants::ABSOLUTE_MAX_NAME_LENGTH).contains(&len) {
            config.max_name_length = len;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "names.max_length".to_string(),
                value: len.to_string(),
                expected: format!(
                    "{}-{} (using default {})",
                    constants::MIN_MAX_NAME_LENGTH,
                    constants::ABSOLUTE_MAX_NAME_LENGTH,
                    constants::DEFAULT_MAX_NAME_LENGTH
                ),
            });
        }
    }

    // -- Codecs --
    for (category, codec_name) in &raw.codecs {
        let field = format!("codecs.{category}");
        let Ok(category) =
            CategoryName::parse_with_limit(category, constants::MAX_CATEGORY_NAME_LENGTH)
        else {
            warnings.push(ConfigError::ValueOutOfRange {
                field,
                value: category.clone(),
                expected: "a valid category name".to_string(),
            });
            continue;
        };
        match codec_name.parse::<Codec>() {
            Ok(codec) => {
                config.codecs.insert(category, codec);
            }
            Err(_) => warnings.push(unknown_codec(&field, codec_name)),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level.clone(),
                expected: format!("one of {} (using default info)", constants::VALID_LOG_LEVELS.join(", ")),
            });
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file.filter(|f| !f.is_empty()) {
        config.log_file = Some(file);
    }

    config
}

fn unknown_codec(field: &str, value: &str) -> ConfigError {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected: "\"json\" or \"toml\" (using default json)".to_string(),
    }
}
