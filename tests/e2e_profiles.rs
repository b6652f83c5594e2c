// SettingsVault - tests/e2e_profiles.rs
//
// End-to-end tests for the profile store.
//
// These tests exercise the real filesystem through the public library API:
// real directories, real atomic writes, real JSON/TOML documents. No mocks.

use settingsvault::app::store::ProfileStore;
use settingsvault::core::category;
use settingsvault::core::codec::Codec;
use settingsvault::core::merge::{merge_payload, MergeMode};
use settingsvault::core::model::Profile;
use settingsvault::core::settings::{
    Bill, BillList, DrugPolicy, DrugPolicyEntry, ItemFilter, Operation, OperationQueue, Outfit,
    RepeatMode,
};
use settingsvault::platform::config;
use settingsvault::util::error::ErrorKind;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// The minimal filter shape used by the shelf scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Allow {
    allow: Vec<String>,
}

fn allow(defs: &[&str]) -> Allow {
    Allow {
        allow: defs.iter().map(|d| d.to_string()).collect(),
    }
}

fn temp_store() -> (TempDir, ProfileStore) {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::new(dir.path().join("SaveStorageSettings"));
    (dir, store)
}

// =============================================================================
// Scenario
// =============================================================================

/// Save, collide, confirm, reload: the full overwrite cycle for a shelf filter.
#[test]
fn e2e_shelf_overwrite_cycle() {
    let (_dir, store) = temp_store();

    store
        .save_profile(category::SHELF, "Clothing", &allow(&["Apparel"]), false)
        .expect("first save succeeds");

    let err = store
        .save_profile(category::SHELF, "Clothing", &allow(&["Weapons"]), false)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProfileExists);

    let stored: Profile<Allow> = store.load_profile(category::SHELF, "Clothing").unwrap();
    assert_eq!(stored.payload(), &allow(&["Apparel"]));

    store
        .save_profile(category::SHELF, "Clothing", &allow(&["Weapons"]), true)
        .expect("confirmed overwrite succeeds");

    let stored: Profile<Allow> = store.load_profile(category::SHELF, "Clothing").unwrap();
    assert_eq!(stored.payload(), &allow(&["Weapons"]));
}

// =============================================================================
// Properties
// =============================================================================

/// Every settings kind survives a save/load through both codecs.
#[test]
fn e2e_all_settings_kinds_round_trip() {
    for codec in Codec::ALL {
        let (_dir, store) = temp_store();
        let store = store.with_default_codec(codec);

        let mut bill = Bill::new("CookMealFine");
        bill.repeat = RepeatMode::RepeatCount(5);
        bill.ingredient_radius = Some(25.0);
        let bills = BillList {
            bills: vec![bill, Bill::new("MakePemmican")],
        };

        let mut beer = DrugPolicyEntry::new("Beer");
        beer.allow_for_joy = true;
        beer.only_if_mood_below = Some(0.3);
        let policy = DrugPolicy {
            label: "Social".to_string(),
            entries: vec![beer],
        };

        let ops = OperationQueue {
            operations: vec![
                Operation::new("InstallPeg", Some("LeftLeg")),
                Operation::new("Euthanize", None),
            ],
        };

        let outfit = Outfit {
            label: "Soldier".to_string(),
            filter: ItemFilter::allowing(["Apparel_FlakVest", "Apparel_AdvancedHelmet"]),
        };

        store.save_profile("Stove", "Meals", &bills, false).unwrap();
        store
            .save_profile(category::DRUG_POLICY, "Social", &policy, false)
            .unwrap();
        store
            .save_profile(category::OPERATION_HUMAN, "Bionics", &ops, false)
            .unwrap();
        store
            .save_profile(category::APPAREL, "Soldier", &outfit, false)
            .unwrap();

        let b: Profile<BillList> = store.load_profile("Stove", "Meals").unwrap();
        let p: Profile<DrugPolicy> = store.load_profile(category::DRUG_POLICY, "Social").unwrap();
        let o: Profile<OperationQueue> =
            store.load_profile(category::OPERATION_HUMAN, "Bionics").unwrap();
        let a: Profile<Outfit> = store.load_profile(category::APPAREL, "Soldier").unwrap();

        assert_eq!(b.payload(), &bills, "{codec}");
        assert_eq!(p.payload(), &policy, "{codec}");
        assert_eq!(o.payload(), &ops, "{codec}");
        assert_eq!(a.payload(), &outfit, "{codec}");
    }
}

/// An empty store lists no profiles and no categories.
#[test]
fn e2e_empty_store_lists_nothing() {
    let (_dir, store) = temp_store();
    assert!(store.list_profiles(category::STOCKPILE).unwrap().is_empty());
    assert!(store.list_categories().unwrap().is_empty());
}

/// Delete followed by load reports the profile as missing.
#[test]
fn e2e_delete_then_load_not_found() {
    let (_dir, store) = temp_store();
    store
        .save_profile(category::STOCKPILE, "Food", &allow(&["Foods"]), false)
        .unwrap();
    store.delete_profile(category::STOCKPILE, "Food").unwrap();

    let err = store
        .load_profile::<Allow>(category::STOCKPILE, "Food")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProfileNotFound);
    assert!(store.list_profiles(category::STOCKPILE).unwrap().is_empty());
}

/// Appending a saved bill list to a station's bills keeps existing bills
/// first and skips recipes already present.
#[test]
fn e2e_append_bills_from_profile() {
    let (_dir, store) = temp_store();
    let station = category::workbench_category("ElectricStove").unwrap();

    let saved = BillList {
        bills: vec![Bill::new("B"), Bill::new("C")],
    };
    store
        .save_profile(station.as_str(), "Dinner", &saved, false)
        .unwrap();

    // Saved on an electric stove, loaded on a fueled one.
    let fueled = category::workbench_category("FueledStove").unwrap();
    let loaded: BillList = store
        .load_profile::<BillList>(fueled.as_str(), "Dinner")
        .unwrap()
        .into_payload();

    let live = BillList {
        bills: vec![Bill::new("A"), Bill::new("B")],
    };
    let merged = merge_payload(live, loaded, MergeMode::Append);
    let recipes: Vec<_> = merged.bills.iter().map(|b| b.recipe.as_str()).collect();
    assert_eq!(recipes, ["A", "B", "C"]);
}

/// A store built from config.toml uses the configured codec per category.
#[test]
fn e2e_store_from_config_uses_codec_table() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[storage]\ndefault_codec = \"json\"\n\n[codecs]\nDrugPolicy = \"toml\"\n",
    )
    .unwrap();

    let (app_config, warnings) = config::load_config(&config_path);
    assert!(warnings.is_empty(), "{warnings:?}");

    let store = ProfileStore::from_config(dir.path().join("profiles"), &app_config);
    let policy = DrugPolicy {
        label: "None".to_string(),
        entries: vec![],
    };
    store
        .save_profile(category::DRUG_POLICY, "Sober", &policy, false)
        .unwrap();
    store
        .save_profile(category::SHELF, "Sober", &allow(&["Beer"]), false)
        .unwrap();

    let toml_path = store.profile_path(category::DRUG_POLICY, "Sober").unwrap();
    let json_path = store.profile_path(category::SHELF, "Sober").unwrap();
    assert!(toml_path.ends_with("DrugPolicy/Sober.toml"));
    assert!(json_path.ends_with("shelf/Sober.json"));
    assert!(toml_path.is_file() && json_path.is_file());

    let text = std::fs::read_to_string(&toml_path).unwrap();
    assert!(text.contains("format_version = 1"), "{text}");
}

/// A leftover temp file from an interrupted save neither shows up in the
/// listing nor blocks the next save.
#[test]
fn e2e_interrupted_write_leaves_previous_profile_intact() {
    let (_dir, store) = temp_store();
    store
        .save_profile(category::SHELF, "Meds", &allow(&["Medicine"]), false)
        .unwrap();

    let path = store.profile_path(category::SHELF, "Meds").unwrap();
    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    std::fs::write(&tmp, b"{\"format_version\":1,\"payl").unwrap();

    let listing = store.list_profiles(category::SHELF).unwrap();
    assert_eq!(listing.names().collect::<Vec<_>>(), ["Meds"]);
    let stored: Profile<Allow> = store.load_profile(category::SHELF, "Meds").unwrap();
    assert_eq!(stored.payload(), &allow(&["Medicine"]));

    store
        .save_profile(category::SHELF, "Meds", &allow(&["Medicine", "Drugs"]), true)
        .unwrap();
    let stored: Profile<Allow> = store.load_profile(category::SHELF, "Meds").unwrap();
    assert_eq!(stored.payload(), &allow(&["Medicine", "Drugs"]));
}
