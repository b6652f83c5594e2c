// SettingsVault - core/model.rs
//
// Profile data model types. Pure data definitions with no I/O.
// These types are the shared vocabulary between the store and its hosts.

use crate::core::name::{CategoryName, ProfileName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Profile (what a load hands back to the host)
// =============================================================================

/// A named, persisted snapshot of one settings category.
///
/// Returned by value from a load; the fields are read-only so the host
/// applies the payload to its own live settings rather than editing the
/// stored snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile<P> {
    category: CategoryName,
    name: ProfileName,
    last_modified: DateTime<Utc>,
    payload: P,
}

impl<P> Profile<P> {
    pub(crate) fn new(
        category: CategoryName,
        name: ProfileName,
        last_modified: DateTime<Utc>,
        payload: P,
    ) -> Self {
        Self {
            category,
            name,
            last_modified,
            payload,
        }
    }

    pub fn category(&self) -> &CategoryName {
        &self.category
    }

    pub fn name(&self) -> &ProfileName {
        &self.name
    }

    /// When the profile was last saved.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Take the payload, typically to merge it into live settings.
    pub fn into_payload(self) -> P {
        self.payload
    }
}

// =============================================================================
// Listing entries
// =============================================================================

/// One row of a category listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: ProfileName,
    pub last_modified: DateTime<Utc>,
}

// =============================================================================
// On-disk document
// =============================================================================

/// The serialised form of a profile file.
///
/// Category and name are repeated inside the document so a file copied to
/// the wrong place is detected on load instead of silently applied.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileDocument<P> {
    /// Schema version, must equal `PROFILE_FORMAT_VERSION`.
    pub format_version: u32,
    pub category: String,
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub payload: P,
}

/// Borrowing variant used when writing.
#[derive(Debug, Serialize)]
pub struct ProfileDocumentRef<'a, P> {
    pub format_version: u32,
    pub category: &'a str,
    pub name: &'a str,
    pub last_modified: DateTime<Utc>,
    pub payload: &'a P,
}
