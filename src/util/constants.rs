// SettingsVault - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SettingsVault";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "SettingsVault";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Profile names
// =============================================================================

/// Default maximum length (in characters) of a profile name.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 64;

/// Maximum length of a category name. Fixed: `[names] max_length` only
/// limits profile names, so built-in categories stay reachable.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 64;

/// Smallest value accepted for `[names] max_length`.
pub const MIN_MAX_NAME_LENGTH: usize = 8;

/// Hard upper bound on `[names] max_length`. Keeps the full profile path well
/// under the legacy 260-character Windows path limit.
pub const ABSOLUTE_MAX_NAME_LENGTH: usize = 128;

/// Characters that may never appear in a profile or category name.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Device names reserved by Windows, compared case-insensitively and
/// regardless of any extension (`CON.txt` is just as invalid as `CON`).
pub const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Replacement used by `suggest_name` for forbidden characters.
pub const NAME_REPLACEMENT_CHAR: char = '_';

/// Suggested name when the caller has nothing usable to offer.
pub const DEFAULT_PROFILE_NAME: &str = "Profile";

// =============================================================================
// Profile storage
// =============================================================================

/// On-disk document schema version. Documents with any other version are
/// reported as corrupt rather than guessed at.
pub const PROFILE_FORMAT_VERSION: u32 = 1;

/// Maximum size of a single profile document in bytes.
pub const MAX_PROFILE_FILE_SIZE: u64 = 4 * 1024 * 1024; // 4 MB

/// Suffix appended to a profile path while its replacement is being written.
pub const TEMP_FILE_SUFFIX: &str = "tmp";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when no override is specified.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// File names
// =============================================================================

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory (under the platform data dir) holding one sub-directory per category.
pub const PROFILES_DIR_NAME: &str = "profiles";
