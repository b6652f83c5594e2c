// SettingsVault - core/codec.rs
//
// Text codecs for profile documents. Each category is stored with one codec;
// the codec decides the file extension and the wire format.

use crate::util::error::{CodecError, UnknownCodec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serialisation format of a category's profile files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// Pretty-printed JSON, `.json` files.
    #[default]
    Json,
    /// TOML, `.toml` files. Easier to hand-edit; payloads must be table-shaped.
    Toml,
}

impl Codec {
    pub const ALL: [Codec; 2] = [Codec::Json, Codec::Toml];

    /// File extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    /// The codec owning a file extension, if any.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.extension() == ext)
    }

    pub fn encode<T: Serialize>(self, value: &T) -> Result<String, CodecError> {
        match self {
            Self::Json => serde_json::to_string_pretty(value).map_err(CodecError::Json),
            Self::Toml => toml::to_string_pretty(value).map_err(CodecError::TomlEncode),
        }
    }

    pub fn decode<T: DeserializeOwned>(self, text: &str) -> Result<T, CodecError> {
        match self {
            Self::Json => serde_json::from_str(text).map_err(CodecError::Json),
            Self::Toml => toml::from_str(text).map_err(CodecError::TomlDecode),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Codec {
    type Err = UnknownCodec;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(&s.to_ascii_lowercase()).ok_or_else(|| UnknownCodec {
            name: s.to_string(),
        })
    }
}
