// SettingsVault - core/category.rs
//
// Well-known settings categories and the mapping from host objects
// (crafting stations, pawns) to the category their profiles live in.

use crate::core::name::CategoryName;

/// Stockpile zone storage filters.
pub const STOCKPILE: &str = "Zone_Stockpile";

/// Shelf storage filters.
pub const SHELF: &str = "shelf";

/// Outfit apparel filters.
pub const APPAREL: &str = "Apparel_Management";

/// Drug policies.
pub const DRUG_POLICY: &str = "DrugPolicy";

/// Surgical operation queues for humanlike pawns.
pub const OPERATION_HUMAN: &str = "OperationHuman";

/// Surgical operation queues for animals.
pub const OPERATION_ANIMAL: &str = "OperationAnimal";

/// Crafting stations that share one bill category with another station.
const WORKBENCH_ALIASES: &[(&str, &str)] = &[
    ("ButcherSpot", "Butcher"),
    ("TableButcher", "Butcher"),
    ("HandTailoringBench", "TailoringBench"),
    ("ElectricTailoringBench", "TailoringBench"),
    ("FueledSmithy", "Smithy"),
    ("ElectricSmithy", "Smithy"),
    ("FueledStove", "Stove"),
    ("ElectricStove", "Stove"),
];

/// Stations that take no saveable bills.
const WORKBENCHES_WITHOUT_BILLS: &[&str] = &["SimpleResearchBench", "HiTechResearchBench"];

/// The bill category for a crafting station definition.
///
/// Upgraded variants of a station share the category of their basic form so
/// that bills saved on a hand tailoring bench load on an electric one.
/// Returns `None` for stations without bills and for def names that are not
/// valid category names.
pub fn workbench_category(def_name: &str) -> Option<CategoryName> {
    if WORKBENCHES_WITHOUT_BILLS.contains(&def_name) {
        return None;
    }
    let category = WORKBENCH_ALIASES
        .iter()
        .find(|(def, _)| *def == def_name)
        .map_or(def_name, |(_, alias)| *alias);

    match CategoryName::parse(category) {
        Ok(c) => Some(c),
        Err(e) => {
            tracing::debug!(def_name, error = %e, "Workbench def name is not a valid category");
            None
        }
    }
}

/// The operation queue category for a pawn.
pub fn operation_category(is_animal: bool) -> &'static str {
    if is_animal {
        OPERATION_ANIMAL
    } else {
        OPERATION_HUMAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(def: &str) -> Option<String> {
        workbench_category(def).map(|c| c.to_string())
    }

    #[test]
    fn test_station_variants_share_a_category() {
        assert_eq!(cat("ButcherSpot").as_deref(), Some("Butcher"));
        assert_eq!(cat("TableButcher").as_deref(), Some("Butcher"));
        assert_eq!(cat("HandTailoringBench"), cat("ElectricTailoringBench"));
        assert_eq!(cat("FueledSmithy").as_deref(), Some("Smithy"));
        assert_eq!(cat("ElectricStove").as_deref(), Some("Stove"));
    }

    #[test]
    fn test_research_benches_have_no_category() {
        assert_eq!(cat("SimpleResearchBench"), None);
        assert_eq!(cat("HiTechResearchBench"), None);
    }

    #[test]
    fn test_unknown_station_is_its_own_category() {
        assert_eq!(cat("DrugLab").as_deref(), Some("DrugLab"));
        assert_eq!(cat("BiofuelRefinery").as_deref(), Some("BiofuelRefinery"));
    }

    #[test]
    fn test_invalid_def_name_yields_none() {
        assert_eq!(cat(""), None);
        assert_eq!(cat("../Stove"), None);
    }

    #[test]
    fn test_well_known_categories_are_valid_names() {
        for c in [STOCKPILE, SHELF, APPAREL, DRUG_POLICY, OPERATION_HUMAN, OPERATION_ANIMAL] {
            assert!(CategoryName::parse(c).is_ok(), "{c}");
        }
        assert_eq!(operation_category(true), OPERATION_ANIMAL);
        assert_eq!(operation_category(false), OPERATION_HUMAN);
    }
}
