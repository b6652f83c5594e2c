// SettingsVault - lib.rs
//
// Library entry point. Everything a host needs to persist named settings
// profiles lives here; the `settingsvault` binary is a thin terminal host
// on top of it.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::app::dialog::{HostPrompts, LoadChoice};
pub use crate::app::store::{ProfileListing, ProfileStore};
pub use crate::core::merge::{merge_payload, MergeMode};
pub use crate::util::error::{ErrorKind, StoreError};
