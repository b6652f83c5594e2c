// SettingsVault - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error names the category,
// profile, or path it concerns and keeps its causal chain for logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all SettingsVault operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum VaultError {
    /// A profile store operation failed.
    Store(StoreError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// A payload file handed over by the host could not be decoded.
    Payload {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// The command line asked for something that cannot be done as given.
    Usage { message: &'static str },
}

impl VaultError {
    /// Process exit code for this failure: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Payload { path, source } => {
                write!(f, "Invalid settings file '{}': {source}", path.display())
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Usage { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Payload { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Usage { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Name errors
// ---------------------------------------------------------------------------

/// Reasons a profile or category name fails sanitisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Nothing left after trimming whitespace.
    Empty,

    /// Longer than the configured maximum (in characters).
    TooLong { length: usize, max: usize },

    /// Contains a path separator or another character the filesystem rejects.
    ForbiddenChar { ch: char },

    /// Contains a control character (newline, tab, NUL, ...).
    ControlChar,

    /// `.` or `..`, which would address a directory rather than a file.
    DotName,

    /// Starts with `.`; such files are hidden on Unix and skipped by listing.
    LeadingDot,

    /// Ends with `.` or a space, which Windows silently strips.
    TrailingDotOrSpace,

    /// A Windows reserved device name such as `CON` or `LPT1`.
    Reserved { name: String },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name is empty"),
            Self::TooLong { length, max } => {
                write!(f, "name is {length} characters, maximum is {max}")
            }
            Self::ForbiddenChar { ch } => write!(f, "name contains forbidden character '{ch}'"),
            Self::ControlChar => write!(f, "name contains a control character"),
            Self::DotName => write!(f, "'.' and '..' are not valid names"),
            Self::LeadingDot => write!(f, "name must not start with '.'"),
            Self::TrailingDotOrSpace => write!(f, "name must not end with '.' or a space"),
            Self::Reserved { name } => write!(f, "'{name}' is a reserved device name"),
        }
    }
}

impl std::error::Error for NameError {}

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

/// Serialisation failures from the profile document codecs.
#[derive(Debug)]
pub enum CodecError {
    /// JSON encode or decode failed.
    Json(serde_json::Error),

    /// TOML document could not be decoded.
    TomlDecode(toml::de::Error),

    /// Value could not be represented as TOML.
    TomlEncode(toml::ser::Error),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON: {e}"),
            Self::TomlDecode(e) => write!(f, "TOML: {e}"),
            Self::TomlEncode(e) => write!(f, "TOML: {e}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::TomlDecode(e) => Some(e),
            Self::TomlEncode(e) => Some(e),
        }
    }
}

/// A codec name that matches no known codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCodec {
    pub name: String,
}

impl fmt::Display for UnknownCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown codec '{}' (expected \"json\" or \"toml\")",
            self.name
        )
    }
}

impl std::error::Error for UnknownCodec {}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Fieldless tag for the failure kinds a host has to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidName,
    ProfileExists,
    ProfileNotFound,
    ProfileCorrupt,
    StorageUnavailable,
    Encode,
}

/// Why a stored profile document was rejected on load.
#[derive(Debug)]
pub enum CorruptDetail {
    /// The document could not be decoded into the expected payload shape.
    Decode(CodecError),

    /// File content is not valid UTF-8.
    InvalidEncoding,

    /// Written by an incompatible schema version.
    VersionMismatch { found: u32, expected: u32 },

    /// The document names a different category/profile than its location.
    IdentityMismatch { category: String, name: String },

    /// The file exceeds `MAX_PROFILE_FILE_SIZE`.
    TooLarge { size: u64, max_size: u64 },
}

impl fmt::Display for CorruptDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "cannot decode: {e}"),
            Self::InvalidEncoding => write!(f, "content is not valid UTF-8"),
            Self::VersionMismatch { found, expected } => {
                write!(f, "format version {found}, expected {expected}")
            }
            Self::IdentityMismatch { category, name } => {
                write!(f, "document belongs to '{category}/{name}'")
            }
            Self::TooLarge { size, max_size } => {
                write!(f, "{size} bytes exceeds maximum of {max_size} bytes")
            }
        }
    }
}

/// Failures of a single profile store operation.
///
/// Every variant is recoverable at the call site. The store never logs or
/// presents these; the host decides how to render them.
#[derive(Debug)]
pub enum StoreError {
    /// A category or profile name failed sanitisation. No file was touched.
    InvalidName { value: String, reason: NameError },

    /// Save without overwrite targeted an existing profile.
    ProfileExists { category: String, name: String },

    /// Load or delete targeted a profile that does not exist.
    ProfileNotFound { category: String, name: String },

    /// Stored content could not be turned back into the expected payload.
    ProfileCorrupt { path: PathBuf, detail: CorruptDetail },

    /// Filesystem-level failure (permission denied, disk full, path too long).
    StorageUnavailable {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// The payload could not be serialised with the category's codec.
    Encode {
        category: String,
        name: String,
        source: CodecError,
    },
}

impl StoreError {
    /// The failure kind, for hosts that branch without inspecting fields.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName { .. } => ErrorKind::InvalidName,
            Self::ProfileExists { .. } => ErrorKind::ProfileExists,
            Self::ProfileNotFound { .. } => ErrorKind::ProfileNotFound,
            Self::ProfileCorrupt { .. } => ErrorKind::ProfileCorrupt,
            Self::StorageUnavailable { .. } => ErrorKind::StorageUnavailable,
            Self::Encode { .. } => ErrorKind::Encode,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, operation: &'static str, source: io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            operation,
            source,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { value, reason } => {
                write!(f, "Invalid name '{value}': {reason}")
            }
            Self::ProfileExists { category, name } => {
                write!(f, "Profile '{name}' already exists in '{category}'")
            }
            Self::ProfileNotFound { category, name } => {
                write!(f, "Profile '{name}' not found in '{category}'")
            }
            Self::ProfileCorrupt { path, detail } => {
                write!(f, "Profile '{}' is corrupt: {detail}", path.display())
            }
            Self::StorageUnavailable {
                path,
                operation,
                source,
            } => write!(
                f,
                "Storage unavailable during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Encode {
                category,
                name,
                source,
            } => write!(
                f,
                "Cannot serialise profile '{name}' in '{category}': {source}"
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidName { reason, .. } => Some(reason),
            Self::ProfileCorrupt {
                detail: CorruptDetail::Decode(e),
                ..
            } => Some(e),
            Self::StorageUnavailable { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for VaultError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading. All are non-fatal: the loader
/// reports them as warnings and falls back to defaults.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range or not recognised.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for VaultError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for SettingsVault results.
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_store_error_kind_tags() {
        let exists = StoreError::ProfileExists {
            category: "shelf".to_string(),
            name: "Clothing".to_string(),
        };
        assert_eq!(exists.kind(), ErrorKind::ProfileExists);

        let io = StoreError::io("/x", "write", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(io.kind(), ErrorKind::StorageUnavailable);
        assert!(io.source().is_some(), "I/O cause must be preserved");
    }

    #[test]
    fn test_invalid_name_display_includes_reason() {
        let e = StoreError::InvalidName {
            value: "../x".to_string(),
            reason: NameError::ForbiddenChar { ch: '/' },
        };
        let msg = e.to_string();
        assert!(msg.contains("../x"), "{msg}");
        assert!(msg.contains("'/'"), "{msg}");
    }

    #[test]
    fn test_vault_error_wraps_store_error_message() {
        let e: VaultError = StoreError::ProfileNotFound {
            category: "DrugPolicy".to_string(),
            name: "Social".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "Profile 'Social' not found in 'DrugPolicy'");
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn test_usage_error_exit_code() {
        let e = VaultError::Usage {
            message: "No profile name given",
        };
        assert_eq!(e.exit_code(), 2);
        assert_eq!(e.to_string(), "No profile name given");
        assert!(e.source().is_none());
    }
}
