// SettingsVault - app/mod.rs
//
// Application layer: the profile store and the save/load interactions
// that hosts drive.
// Dependencies: core, platform, util.

pub mod dialog;
pub mod store;
