// SettingsVault - app/dialog.rs
//
// Save and load interactions as explicit state machines.
//
// The host supplies the prompts (naming, overwrite confirmation, profile
// selection) and renders reported failures; the flows decide what happens
// next. Each `step` performs at most one prompt or one store operation, so
// a host with an immediate-mode UI can drive the flow one frame at a time,
// while `run` drives it to completion for blocking hosts such as the CLI.
//
// Save:  Idle → NameEntryPending → CollisionCheck → Confirmed → Committed
//                      ↑                 ↓
//                      └─ (declined) ─ ConfirmOverwrite ─ (accepted) → Confirmed
// Load:  Idle → NameSelectionPending → Loaded

use crate::app::store::{ProfileListing, ProfileStore};
use crate::core::merge::{merge_payload, MergeMode, Mergeable};
use crate::core::model::ProfileSummary;
use crate::core::name::{self, CategoryName, ProfileName};
use crate::util::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Prompts and feedback provided by the host UI.
pub trait HostPrompts {
    /// Ask for a profile name, pre-filled with `suggestion`. `None` = cancelled.
    fn prompt_name(&mut self, category: &CategoryName, suggestion: &str) -> Option<String>;

    /// Ask whether the existing profile `name` may be replaced.
    fn confirm_overwrite(&mut self, category: &CategoryName, name: &ProfileName) -> bool;

    /// Let the user pick from the category's profiles.
    fn choose_profile(&mut self, listing: &ProfileListing) -> LoadChoice;

    /// Show a recoverable failure; the flow continues afterwards.
    fn report(&mut self, error: &StoreError);
}

/// The user's decision in the profile selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadChoice {
    Load(String),
    Delete(String),
    Cancel,
}

// =============================================================================
// Save
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    NameEntryPending,
    /// The entered name is validated and checked against stored profiles.
    CollisionCheck { name: String },
    /// The name collides; waiting for the user to allow replacing it.
    ConfirmOverwrite { name: ProfileName },
    /// Ready to write. `overwrite` is true only after explicit confirmation.
    Confirmed { name: ProfileName, overwrite: bool },
    Committed { summary: ProfileSummary },
    Cancelled,
}

impl SaveState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Committed { .. } | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(ProfileSummary),
    Cancelled,
}

/// One "save current settings as a named profile" interaction.
pub struct SaveFlow<'a, P> {
    store: &'a ProfileStore,
    category: CategoryName,
    payload: &'a P,
    suggestion: String,
    state: SaveState,
}

impl<'a, P: Serialize> SaveFlow<'a, P> {
    /// Start a save of `payload` into `category`.
    ///
    /// `suggestion` pre-fills the naming prompt (e.g. the outfit label); it is
    /// sanitised first so the pre-filled value is always acceptable.
    pub fn new(
        store: &'a ProfileStore,
        category: &str,
        payload: &'a P,
        suggestion: &str,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            category: store.category(category)?,
            suggestion: name::suggest_name(suggestion, store.max_name_length()),
            store,
            payload,
            state: SaveState::Idle,
        })
    }

    pub fn state(&self) -> &SaveState {
        &self.state
    }

    /// Advance by one transition. Finished flows stay where they are.
    ///
    /// Invalid names are reported to the host and re-prompted; only storage
    /// and encoding failures end the flow with an error.
    pub fn step<H: HostPrompts>(&mut self, host: &mut H) -> Result<&SaveState, StoreError> {
        let state = std::mem::replace(&mut self.state, SaveState::Idle);
        self.state = match state {
            SaveState::Idle => SaveState::NameEntryPending,

            SaveState::NameEntryPending => {
                match host.prompt_name(&self.category, &self.suggestion) {
                    Some(name) => SaveState::CollisionCheck { name },
                    None => SaveState::Cancelled,
                }
            }

            SaveState::CollisionCheck { name: raw } => match self.store.profile_name(&raw) {
                Err(e) => {
                    host.report(&e);
                    self.suggestion = name::suggest_name(&raw, self.store.max_name_length());
                    SaveState::NameEntryPending
                }
                Ok(name) => {
                    if self
                        .store
                        .profile_exists(self.category.as_str(), name.as_str())?
                    {
                        SaveState::ConfirmOverwrite { name }
                    } else {
                        SaveState::Confirmed {
                            name,
                            overwrite: false,
                        }
                    }
                }
            },

            SaveState::ConfirmOverwrite { name } => {
                if host.confirm_overwrite(&self.category, &name) {
                    SaveState::Confirmed {
                        name,
                        overwrite: true,
                    }
                } else {
                    self.suggestion = name.to_string();
                    SaveState::NameEntryPending
                }
            }

            SaveState::Confirmed { name, overwrite } => {
                match self.store.save_profile(
                    self.category.as_str(),
                    name.as_str(),
                    self.payload,
                    overwrite,
                ) {
                    Ok(summary) => SaveState::Committed { summary },
                    // Appeared after the collision check.
                    Err(StoreError::ProfileExists { .. }) => SaveState::ConfirmOverwrite { name },
                    Err(e) => return Err(e),
                }
            }

            finished @ (SaveState::Committed { .. } | SaveState::Cancelled) => finished,
        };
        Ok(&self.state)
    }

    /// Drive the flow to completion.
    pub fn run<H: HostPrompts>(mut self, host: &mut H) -> Result<SaveOutcome, StoreError> {
        while !self.state.is_finished() {
            self.step(host)?;
        }
        Ok(match self.state {
            SaveState::Committed { summary } => SaveOutcome::Saved(summary),
            _ => SaveOutcome::Cancelled,
        })
    }
}

/// Run a complete save interaction for `payload`.
pub fn run_save_flow<P: Serialize, H: HostPrompts>(
    store: &ProfileStore,
    host: &mut H,
    category: &str,
    payload: &P,
    suggestion: &str,
) -> Result<SaveOutcome, StoreError> {
    SaveFlow::new(store, category, payload, suggestion)?.run(host)
}

// =============================================================================
// Load
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    NameSelectionPending,
    Loaded { name: ProfileName },
    Cancelled,
}

impl LoadState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(ProfileName),
    Cancelled,
}

/// One "load a profile into the current settings" interaction.
pub struct LoadFlow<'a, P> {
    store: &'a ProfileStore,
    category: CategoryName,
    live: &'a mut P,
    mode: MergeMode,
    state: LoadState,
}

impl<'a, P> LoadFlow<'a, P>
where
    P: Mergeable + Default + DeserializeOwned,
{
    /// Start loading into `live`, the host's own settings object.
    pub fn new(
        store: &'a ProfileStore,
        category: &str,
        live: &'a mut P,
        mode: MergeMode,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            category: store.category(category)?,
            store,
            live,
            mode,
            state: LoadState::Idle,
        })
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Advance by one transition. Finished flows stay where they are.
    ///
    /// Missing, corrupt, or invalidly named selections are reported and the
    /// list is shown again; the live settings are only touched on success.
    pub fn step<H: HostPrompts>(&mut self, host: &mut H) -> Result<&LoadState, StoreError> {
        let state = std::mem::replace(&mut self.state, LoadState::Idle);
        self.state = match state {
            LoadState::Idle => LoadState::NameSelectionPending,

            LoadState::NameSelectionPending => {
                let listing = self.store.list_profiles(self.category.as_str())?;
                match host.choose_profile(&listing) {
                    LoadChoice::Cancel => LoadState::Cancelled,
                    LoadChoice::Delete(name) => {
                        match self.store.delete_profile(self.category.as_str(), &name) {
                            Ok(()) => {}
                            Err(e @ StoreError::StorageUnavailable { .. }) => return Err(e),
                            Err(e) => host.report(&e),
                        }
                        LoadState::NameSelectionPending
                    }
                    LoadChoice::Load(name) => {
                        match self.store.load_profile::<P>(self.category.as_str(), &name) {
                            Ok(profile) => {
                                let loaded_name = profile.name().clone();
                                let current = std::mem::take(&mut *self.live);
                                *self.live =
                                    merge_payload(current, profile.into_payload(), self.mode);
                                LoadState::Loaded { name: loaded_name }
                            }
                            Err(e @ StoreError::StorageUnavailable { .. }) => return Err(e),
                            Err(e) => {
                                host.report(&e);
                                LoadState::NameSelectionPending
                            }
                        }
                    }
                }
            }

            finished @ (LoadState::Loaded { .. } | LoadState::Cancelled) => finished,
        };
        Ok(&self.state)
    }

    /// Drive the flow to completion.
    pub fn run<H: HostPrompts>(mut self, host: &mut H) -> Result<LoadOutcome, StoreError> {
        while !self.state.is_finished() {
            self.step(host)?;
        }
        Ok(match self.state {
            LoadState::Loaded { name } => LoadOutcome::Loaded(name),
            _ => LoadOutcome::Cancelled,
        })
    }
}

/// Run a complete load interaction, merging the chosen profile into `live`.
pub fn run_load_flow<P, H>(
    store: &ProfileStore,
    host: &mut H,
    category: &str,
    live: &mut P,
    mode: MergeMode,
) -> Result<LoadOutcome, StoreError>
where
    P: Mergeable + Default + DeserializeOwned,
    H: HostPrompts,
{
    LoadFlow::new(store, category, live, mode)?.run(host)
}
