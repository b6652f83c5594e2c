// SettingsVault - app/store.rs
//
// ProfileStore: durable CRUD over named settings profiles, scoped by category.
//
// Layout: <root>/<category>/<name>.<ext>, where <ext> is the extension of
// the category's codec. Each file holds one `ProfileDocument`.
//
// Design principles:
// - Names are validated before any path is built; nothing unvalidated ever
//   reaches the filesystem.
// - Writes are whole-file replacements (write temp → rename) so an
//   interrupted save never corrupts the previous profile.
// - A save that would replace an existing profile fails with
//   `ProfileExists` unless the caller explicitly passes `overwrite`.
// - Failures are returned, never logged or displayed here. Successful
//   operations emit debug events only.
// - No retries: every failure is scoped to the single call that produced it.

use crate::core::codec::Codec;
use crate::core::model::{Profile, ProfileDocument, ProfileDocumentRef, ProfileSummary};
use crate::core::name::{CategoryName, ProfileName};
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{CorruptDetail, StoreError};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Only the schema version, decoded first so an incompatible document is
/// reported as a version mismatch rather than as a confusing shape error.
#[derive(Deserialize)]
struct DocumentHeader {
    format_version: u32,
}

/// File-backed store of named profiles.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
    default_codec: Codec,
    codecs: HashMap<CategoryName, Codec>,
    max_name_length: usize,
}

impl ProfileStore {
    /// A store rooted at `root` with default settings (JSON, default name limit).
    ///
    /// The root directory is not created until the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_codec: Codec::default(),
            codecs: HashMap::new(),
            max_name_length: constants::DEFAULT_MAX_NAME_LENGTH,
        }
    }

    /// A store rooted at `root` using the validated codec table and name
    /// limit from `config.toml`.
    pub fn from_config(root: impl Into<PathBuf>, config: &AppConfig) -> Self {
        Self {
            root: root.into(),
            default_codec: config.default_codec,
            codecs: config
                .codecs
                .iter()
                .map(|(c, codec)| (c.clone(), *codec))
                .collect(),
            max_name_length: config.max_name_length,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    /// Use `codec` for every category without an explicit registration.
    pub fn with_default_codec(mut self, codec: Codec) -> Self {
        self.default_codec = codec;
        self
    }

    /// Store `category` with `codec` from now on.
    ///
    /// Profiles already saved with another codec are not converted and stop
    /// appearing in listings for this category.
    pub fn register_codec(&mut self, category: &str, codec: Codec) -> Result<(), StoreError> {
        let category = self.category(category)?;
        self.codecs.insert(category, codec);
        Ok(())
    }

    pub fn codec_for(&self, category: &CategoryName) -> Codec {
        self.codecs
            .get(category)
            .copied()
            .unwrap_or(self.default_codec)
    }

    // -------------------------------------------------------------------------
    // Name validation and path resolution
    // -------------------------------------------------------------------------

    /// Validate a category name. Categories use a fixed length limit.
    pub fn category(&self, raw: &str) -> Result<CategoryName, StoreError> {
        CategoryName::parse_with_limit(raw, constants::MAX_CATEGORY_NAME_LENGTH).map_err(
            |reason| StoreError::InvalidName {
                value: raw.to_string(),
                reason,
            },
        )
    }

    /// Validate a profile name against this store's limits.
    pub fn profile_name(&self, raw: &str) -> Result<ProfileName, StoreError> {
        ProfileName::parse_with_limit(raw, self.max_name_length).map_err(|reason| {
            StoreError::InvalidName {
                value: raw.to_string(),
                reason,
            }
        })
    }

    fn category_dir(&self, category: &CategoryName) -> PathBuf {
        self.root.join(category.as_str())
    }

    fn path_for(&self, category: &CategoryName, name: &ProfileName) -> PathBuf {
        let file = format!("{}.{}", name, self.codec_for(category).extension());
        self.category_dir(category).join(file)
    }

    /// Where the profile `(category, name)` is (or would be) stored.
    pub fn profile_path(&self, category: &str, name: &str) -> Result<PathBuf, StoreError> {
        let category = self.category(category)?;
        let name = self.profile_name(name)?;
        Ok(self.path_for(&category, &name))
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// All categories that currently have a storage directory, sorted.
    ///
    /// A missing root means nothing has been saved yet: empty, not an error.
    pub fn list_categories(&self) -> Result<Vec<CategoryName>, StoreError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.root, "list categories", e)),
        };

        let mut categories = Vec::new();
        for entry_result in entries {
            let entry =
                entry_result.map_err(|e| StoreError::io(&self.root, "list categories", e))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            let file_name = entry.file_name();
            let Some(raw) = file_name.to_str() else {
                continue;
            };
            if let Ok(category) = self.category(raw) {
                categories.push(category);
            }
        }

        categories.sort();
        Ok(categories)
    }

    /// The profiles stored for `category`, sorted by name.
    ///
    /// A category that has never been saved to yields an empty listing.
    /// Files that are not profiles of this category's codec (temp files,
    /// hidden files, other extensions) are ignored.
    pub fn list_profiles(&self, category: &str) -> Result<ProfileListing, StoreError> {
        let category = self.category(category)?;
        let dir = self.category_dir(&category);
        let extension = self.codec_for(&category).extension();

        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(ProfileListing::empty(category));
            }
            Err(e) => return Err(StoreError::io(dir, "list profiles", e)),
        };

        let mut summaries = Vec::new();
        for entry_result in entries {
            let entry = entry_result.map_err(|e| StoreError::io(&dir, "list profiles", e))?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Only names that round-trip through validation can be loaded.
            let Ok(name) = ProfileName::parse_with_limit(stem, self.max_name_length) else {
                continue;
            };
            if name.as_str() != stem {
                continue;
            }

            let last_modified = match fs::modified_utc(&path) {
                Ok(t) => t,
                // Deleted between read_dir and stat.
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::io(path, "read profile metadata", e)),
            };
            if !path.is_file() {
                continue;
            }

            summaries.push(ProfileSummary {
                name,
                last_modified,
            });
        }

        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ProfileListing {
            category,
            entries: summaries,
        })
    }

    /// Whether `(category, name)` is currently stored.
    pub fn profile_exists(&self, category: &str, name: &str) -> Result<bool, StoreError> {
        let path = self.profile_path(category, name)?;
        path.try_exists()
            .map_err(|e| StoreError::io(path, "check profile", e))
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Save `payload` as `(category, name)`.
    ///
    /// If the profile exists and `overwrite` is false, fails with
    /// `ProfileExists` and leaves the stored profile untouched; the caller is
    /// expected to confirm with the user and call again with `overwrite`.
    /// Creates the category directory if needed.
    pub fn save_profile<P: Serialize>(
        &self,
        category: &str,
        name: &str,
        payload: &P,
        overwrite: bool,
    ) -> Result<ProfileSummary, StoreError> {
        let category = self.category(category)?;
        let name = self.profile_name(name)?;
        let path = self.path_for(&category, &name);

        let exists = path
            .try_exists()
            .map_err(|e| StoreError::io(&path, "check profile", e))?;
        if exists && !overwrite {
            return Err(StoreError::ProfileExists {
                category: category.to_string(),
                name: name.to_string(),
            });
        }

        let last_modified = Utc::now();
        let document = ProfileDocumentRef {
            format_version: constants::PROFILE_FORMAT_VERSION,
            category: category.as_str(),
            name: name.as_str(),
            last_modified,
            payload,
        };
        let text = self
            .codec_for(&category)
            .encode(&document)
            .map_err(|source| StoreError::Encode {
                category: category.to_string(),
                name: name.to_string(),
                source,
            })?;

        let dir = self.category_dir(&category);
        std::fs::create_dir_all(&dir)
            .map_err(|e| StoreError::io(&dir, "create category directory", e))?;
        fs::write_atomic(&path, text.as_bytes())
            .map_err(|e| StoreError::io(&path, "write profile", e))?;

        tracing::debug!(
            category = %category,
            profile = %name,
            replaced = exists,
            path = %path.display(),
            "Profile saved"
        );

        Ok(ProfileSummary {
            name,
            last_modified,
        })
    }

    /// Load `(category, name)` and decode its payload as `P`.
    ///
    /// Content that does not decode to `P`, was written by another schema
    /// version, or belongs to a different profile is reported as
    /// `ProfileCorrupt`; it is never replaced by default settings.
    pub fn load_profile<P: DeserializeOwned>(
        &self,
        category: &str,
        name: &str,
    ) -> Result<Profile<P>, StoreError> {
        let category = self.category(category)?;
        let name = self.profile_name(name)?;
        let path = self.path_for(&category, &name);
        let not_found = || StoreError::ProfileNotFound {
            category: category.to_string(),
            name: name.to_string(),
        };

        let metadata = match std::fs::metadata(&path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(not_found()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(StoreError::io(path, "read profile metadata", e)),
        };
        if metadata.len() > constants::MAX_PROFILE_FILE_SIZE {
            return Err(StoreError::ProfileCorrupt {
                path,
                detail: CorruptDetail::TooLarge {
                    size: metadata.len(),
                    max_size: constants::MAX_PROFILE_FILE_SIZE,
                },
            });
        }

        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(StoreError::io(path, "read profile", e)),
        };
        let Ok(text) = String::from_utf8(bytes) else {
            return Err(StoreError::ProfileCorrupt {
                path,
                detail: CorruptDetail::InvalidEncoding,
            });
        };

        let codec = self.codec_for(&category);
        let corrupt = |detail| StoreError::ProfileCorrupt {
            path: path.clone(),
            detail,
        };

        let header: DocumentHeader = codec
            .decode(&text)
            .map_err(|e| corrupt(CorruptDetail::Decode(e)))?;
        if header.format_version != constants::PROFILE_FORMAT_VERSION {
            return Err(corrupt(CorruptDetail::VersionMismatch {
                found: header.format_version,
                expected: constants::PROFILE_FORMAT_VERSION,
            }));
        }

        let document: ProfileDocument<P> = codec
            .decode(&text)
            .map_err(|e| corrupt(CorruptDetail::Decode(e)))?;

        // Case-insensitive filesystems resolve "clothing" to Clothing.json,
        // so identity is compared without regard to case.
        if document.category.to_lowercase() != category.as_str().to_lowercase()
            || document.name.to_lowercase() != name.as_str().to_lowercase()
        {
            return Err(corrupt(CorruptDetail::IdentityMismatch {
                category: document.category,
                name: document.name,
            }));
        }

        tracing::debug!(
            category = %category,
            profile = %name,
            path = %path.display(),
            "Profile loaded"
        );

        Ok(Profile::new(
            category,
            name,
            document.last_modified,
            document.payload,
        ))
    }

    /// Delete `(category, name)`.
    ///
    /// Not idempotent: deleting a profile that does not exist (including one
    /// just deleted) fails with `ProfileNotFound`.
    pub fn delete_profile(&self, category: &str, name: &str) -> Result<(), StoreError> {
        let category = self.category(category)?;
        let name = self.profile_name(name)?;
        let path = self.path_for(&category, &name);

        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(
                    category = %category,
                    profile = %name,
                    "Profile deleted"
                );
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::ProfileNotFound {
                category: category.to_string(),
                name: name.to_string(),
            }),
            Err(e) => Err(StoreError::io(path, "delete profile", e)),
        }
    }
}

// =============================================================================
// Listing
// =============================================================================

/// Sorted snapshot of a category's profiles.
///
/// Iteration does not consume the listing and can be restarted any number of
/// times; the listing does not change if the store does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileListing {
    category: CategoryName,
    entries: Vec<ProfileSummary>,
}

impl ProfileListing {
    fn empty(category: CategoryName) -> Self {
        Self {
            category,
            entries: Vec::new(),
        }
    }

    pub fn category(&self) -> &CategoryName {
        &self.category
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProfileSummary> {
        self.entries.iter()
    }

    /// Profile names in listing order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|s| s.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProfileListing {
    type Item = &'a ProfileSummary;
    type IntoIter = std::slice::Iter<'a, ProfileSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ProfileListing {
    type Item = ProfileSummary;
    type IntoIter = std::vec::IntoIter<ProfileSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category;
    use crate::core::settings::{Bill, BillList, ItemFilter};
    use crate::platform::config::{self, RawConfig};
    use crate::util::error::ErrorKind;
    use tempfile::TempDir;

    fn store() -> (TempDir, ProfileStore) {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("profiles"));
        (dir, store)
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, store) = store();
        let payload = BillList {
            bills: vec![Bill::new("CookMealSimple"), Bill::new("MakePemmican")],
        };

        store.save_profile("Stove", "Kitchen", &payload, false).unwrap();
        let loaded: Profile<BillList> = store.load_profile("Stove", "Kitchen").unwrap();

        assert_eq!(loaded.payload(), &payload);
        assert_eq!(loaded.category().as_str(), "Stove");
        assert_eq!(loaded.name().as_str(), "Kitchen");
    }

    #[test]
    fn test_save_creates_category_directory() {
        let (_dir, store) = store();
        assert!(!store.root().exists());
        store
            .save_profile(category::SHELF, "Meds", &ItemFilter::allowing(["Medicine"]), false)
            .unwrap();
        assert!(store.root().join("shelf").join("Meds.json").is_file());
    }

    #[test]
    fn test_save_without_overwrite_keeps_existing() {
        let (_dir, store) = store();
        store
            .save_profile("shelf", "Clothing", &ItemFilter::allowing(["Apparel"]), false)
            .unwrap();

        let err = store
            .save_profile("shelf", "Clothing", &ItemFilter::allowing(["Weapons"]), false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProfileExists);

        let loaded: Profile<ItemFilter> = store.load_profile("shelf", "Clothing").unwrap();
        assert_eq!(loaded.payload().allow, ["Apparel"]);
    }

    #[test]
    fn test_overwrite_replaces_payload_and_timestamp() {
        let (_dir, store) = store();
        let first = store
            .save_profile("shelf", "Clothing", &ItemFilter::allowing(["Apparel"]), false)
            .unwrap();
        let second = store
            .save_profile("shelf", "Clothing", &ItemFilter::allowing(["Weapons"]), true)
            .unwrap();
        assert!(second.last_modified >= first.last_modified);

        let loaded: Profile<ItemFilter> = store.load_profile("shelf", "Clothing").unwrap();
        assert_eq!(loaded.payload().allow, ["Weapons"]);
        assert_eq!(loaded.last_modified(), second.last_modified);
    }

    #[test]
    fn test_invalid_names_rejected_before_io() {
        let (_dir, store) = store();
        let filter = ItemFilter::default();

        for (category, name) in [("shelf", "../escape"), ("..", "x"), ("shelf", ""), ("a/b", "x")] {
            let err = store.save_profile(category, name, &filter, true).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidName, "{category}/{name}");
        }
        assert!(!store.root().exists(), "no directory may be created");
    }

    #[test]
    fn test_list_missing_category_is_empty() {
        let (_dir, store) = store();
        let listing = store.list_profiles("DrugPolicy").unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing.category().as_str(), "DrugPolicy");
    }

    #[test]
    fn test_list_is_sorted_and_restartable() {
        let (_dir, store) = store();
        for name in ["Weapons", "Apparel", "Medicine"] {
            store
                .save_profile("Zone_Stockpile", name, &ItemFilter::default(), false)
                .unwrap();
        }

        let listing = store.list_profiles("Zone_Stockpile").unwrap();
        let first: Vec<_> = listing.names().collect();
        let second: Vec<_> = listing.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(first, ["Apparel", "Medicine", "Weapons"]);
        assert_eq!(first, second);
        assert!(listing.contains("Medicine"));
    }

    #[test]
    fn test_list_ignores_temp_and_foreign_files() {
        let (_dir, store) = store();
        store.save_profile("shelf", "Real", &ItemFilter::default(), false).unwrap();
        let dir = store.root().join("shelf");
        std::fs::write(dir.join("Real.json.tmp"), b"partial").unwrap();
        std::fs::write(dir.join(".hidden.json"), b"{}").unwrap();
        std::fs::write(dir.join("notes.txt"), b"hi").unwrap();
        std::fs::create_dir(dir.join("Folder.json")).unwrap();

        let listing = store.list_profiles("shelf").unwrap();
        assert_eq!(listing.names().collect::<Vec<_>>(), ["Real"]);
    }

    #[test]
    fn test_categories_partition_names() {
        let (_dir, store) = store();
        store
            .save_profile("shelf", "Default", &ItemFilter::allowing(["Apparel"]), false)
            .unwrap();
        store
            .save_profile("DrugPolicy", "Default", &ItemFilter::allowing(["Beer"]), false)
            .unwrap();

        let shelf: Profile<ItemFilter> = store.load_profile("shelf", "Default").unwrap();
        let drugs: Profile<ItemFilter> = store.load_profile("DrugPolicy", "Default").unwrap();
        assert_eq!(shelf.payload().allow, ["Apparel"]);
        assert_eq!(drugs.payload().allow, ["Beer"]);

        let categories: Vec<_> = store
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(categories, ["DrugPolicy", "shelf"]);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store.load_profile::<ItemFilter>("shelf", "Nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProfileNotFound);
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let (_dir, store) = store();
        store
            .save_profile("Stove", "Meals", &ItemFilter::allowing(["Meat"]), false)
            .unwrap();
        std::fs::write(
            store.profile_path("Stove", "Meals").unwrap(),
            br#"{"format_version":1,"category":"Stove","name":"Meals","last_modified":"2024-01-01T00:00:00Z","payload":{"bills":"oops"}}"#,
        )
        .unwrap();

        let err = store.load_profile::<BillList>("Stove", "Meals").unwrap_err();
        assert!(
            matches!(
                err,
                StoreError::ProfileCorrupt {
                    detail: CorruptDetail::Decode(_),
                    ..
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn test_load_garbage_and_binary_is_corrupt() {
        let (_dir, store) = store();
        let path = store.profile_path("shelf", "Broken").unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        std::fs::write(&path, b"not json {{{").unwrap();
        let err = store.load_profile::<ItemFilter>("shelf", "Broken").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProfileCorrupt);

        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = store.load_profile::<ItemFilter>("shelf", "Broken").unwrap_err();
        assert!(matches!(
            err,
            StoreError::ProfileCorrupt {
                detail: CorruptDetail::InvalidEncoding,
                ..
            }
        ));
    }

    #[test]
    fn test_load_future_version_is_corrupt() {
        let (_dir, store) = store();
        let path = store.profile_path("shelf", "Future").unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, br#"{"format_version":99,"payload":{}}"#).unwrap();

        let err = store.load_profile::<ItemFilter>("shelf", "Future").unwrap_err();
        assert!(matches!(
            err,
            StoreError::ProfileCorrupt {
                detail: CorruptDetail::VersionMismatch { found: 99, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_load_copied_file_is_identity_mismatch() {
        let (_dir, store) = store();
        store.save_profile("shelf", "A", &ItemFilter::default(), false).unwrap();
        let a = store.profile_path("shelf", "A").unwrap();
        let b = store.profile_path("shelf", "B").unwrap();
        std::fs::copy(a, b).unwrap();

        let err = store.load_profile::<ItemFilter>("shelf", "B").unwrap_err();
        assert!(matches!(
            err,
            StoreError::ProfileCorrupt {
                detail: CorruptDetail::IdentityMismatch { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_delete_twice_reports_not_found() {
        let (_dir, store) = store();
        store.save_profile("shelf", "Gone", &ItemFilter::default(), false).unwrap();

        store.delete_profile("shelf", "Gone").unwrap();
        let err = store.delete_profile("shelf", "Gone").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProfileNotFound);

        let err = store.load_profile::<ItemFilter>("shelf", "Gone").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProfileNotFound);
        assert!(!store.profile_exists("shelf", "Gone").unwrap());
    }

    #[test]
    fn test_toml_codec_category() {
        let (_dir, mut store) = store();
        store.register_codec("Smithy", Codec::Toml).unwrap();
        let payload = BillList {
            bills: vec![Bill::new("MakeLongsword")],
        };

        store.save_profile("Smithy", "Blades", &payload, false).unwrap();
        let path = store.profile_path("Smithy", "Blades").unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("toml"));

        let loaded: Profile<BillList> = store.load_profile("Smithy", "Blades").unwrap();
        assert_eq!(loaded.into_payload(), payload);
        assert_eq!(store.list_profiles("Smithy").unwrap().len(), 1);
    }

    #[test]
    fn test_encode_failure_reported_without_writing() {
        let (_dir, store) = store();
        let store = store.with_default_codec(Codec::Toml);
        // TOML keys must be strings.
        let mut bad = std::collections::BTreeMap::new();
        bad.insert(1u32, "x");

        let err = store.save_profile("shelf", "Bad", &bad, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encode);
        assert!(!store.profile_exists("shelf", "Bad").unwrap());
    }

    #[test]
    fn test_name_limit_from_config() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            max_name_length: 8,
            ..AppConfig::default()
        };
        let store = ProfileStore::from_config(dir.path(), &config);
        let err = store
            .save_profile("shelf", "VeryLongName", &ItemFilter::default(), false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
        assert_eq!(store.max_name_length(), 8);
    }

    #[test]
    fn test_short_name_limit_still_reaches_builtin_categories() {
        let dir = TempDir::new().unwrap();
        let raw: RawConfig = toml::from_str("[names]\nmax_length = 10\n").unwrap();
        let mut warnings = Vec::new();
        let config = config::validate(raw, &mut warnings);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.max_name_length, 10);

        let store = ProfileStore::from_config(dir.path(), &config);
        for cat in [category::APPAREL, category::STOCKPILE, category::OPERATION_HUMAN] {
            store
                .save_profile(cat, "Work", &ItemFilter::default(), false)
                .unwrap();
            assert_eq!(store.list_profiles(cat).unwrap().len(), 1);
        }
        // The profile-name limit still applies.
        let err = store
            .save_profile(category::APPAREL, "Eleven char", &ItemFilter::default(), false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
    }

    #[test]
    fn test_root_that_is_a_file_is_storage_unavailable() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("not_a_dir");
        std::fs::write(&root, b"occupied").unwrap();
        let store = ProfileStore::new(&root);

        let err = store
            .save_profile("shelf", "Clothing", &ItemFilter::default(), false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);

        let err = store.list_profiles("shelf").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);

        let err = store.list_categories().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    }
}
