// SettingsVault - core/mod.rs
//
// Core business logic layer.
// Dependencies: serde, chrono, and the util layer.
// Must NOT depend on: platform, app, or perform file I/O.

pub mod category;
pub mod codec;
pub mod merge;
pub mod model;
pub mod name;
pub mod settings;
