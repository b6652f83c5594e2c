// SettingsVault - core/name.rs
//
// Validated profile and category names. A name that passes validation is
// safe to use as a single path component on every supported platform;
// nothing else ever reaches the filesystem.

use crate::util::constants;
use crate::util::error::NameError;
use std::fmt;

/// Check `raw` against the naming rules and return the trimmed form.
pub fn validate(raw: &str, max_length: usize) -> Result<&str, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let length = name.chars().count();
    if length > max_length {
        return Err(NameError::TooLong {
            length,
            max: max_length,
        });
    }

    if let Some(ch) = name
        .chars()
        .find(|c| constants::FORBIDDEN_NAME_CHARS.contains(c))
    {
        return Err(NameError::ForbiddenChar { ch });
    }
    if name.chars().any(char::is_control) {
        return Err(NameError::ControlChar);
    }

    if name == "." || name == ".." {
        return Err(NameError::DotName);
    }
    if name.starts_with('.') {
        return Err(NameError::LeadingDot);
    }
    if name.ends_with('.') || name.ends_with(' ') {
        return Err(NameError::TrailingDotOrSpace);
    }

    let stem = name.split('.').next().unwrap_or(name);
    if constants::RESERVED_NAMES
        .iter()
        .any(|r| r.eq_ignore_ascii_case(stem))
    {
        return Err(NameError::Reserved {
            name: name.to_string(),
        });
    }

    Ok(name)
}

/// Turn arbitrary user text into a name that passes `validate`.
///
/// Used to pre-fill naming prompts (e.g. from an outfit or policy label).
/// Forbidden and control characters become `_`, leading dots and trailing
/// dots/spaces are dropped, reserved names get a `_` suffix, and the
/// result is truncated to `max_length`.
pub fn suggest_name(raw: &str, max_length: usize) -> String {
    let replaced: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || constants::FORBIDDEN_NAME_CHARS.contains(&c) {
                constants::NAME_REPLACEMENT_CHAR
            } else {
                c
            }
        })
        .take(max_length)
        .collect();

    let mut name = replaced
        .trim_start_matches('.')
        .trim_end_matches(['.', ' '])
        .to_string();

    if matches!(validate(&name, max_length), Err(NameError::Reserved { .. })) {
        name.push(constants::NAME_REPLACEMENT_CHAR);
    }

    match validate(&name, max_length) {
        Ok(valid) => valid.to_string(),
        Err(_) => constants::DEFAULT_PROFILE_NAME.to_string(),
    }
}

macro_rules! validated_name {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $ty(String);

        impl $ty {
            /// Validate with the default length limit.
            pub fn parse(raw: &str) -> Result<Self, NameError> {
                Self::parse_with_limit(raw, constants::DEFAULT_MAX_NAME_LENGTH)
            }

            /// Validate with an explicit length limit (from `[names] max_length`).
            pub fn parse_with_limit(raw: &str, max_length: usize) -> Result<Self, NameError> {
                validate(raw, max_length).map(|n| Self(n.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

validated_name!(
    /// A user-chosen profile name, unique within its category.
    ProfileName
);

validated_name!(
    /// The kind of settings a profile holds; one storage directory each.
    CategoryName
);
