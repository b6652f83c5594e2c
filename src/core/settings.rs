// SettingsVault - core/settings.rs
//
// Serialisable models of the settings kinds that can be stored as profiles.
// Pure data definitions plus their merge rules; no I/O.
//
// Item and recipe identifiers are the host's definition names (e.g.
// "Apparel_Parka", "CookMealSimple"). They are opaque strings here.

use crate::core::merge::{append_by_key, Mergeable, NaturalKey};
use serde::{Deserialize, Serialize};

// =============================================================================
// Item filters (stockpiles, shelves, outfits, bill ingredients)
// =============================================================================

/// Item quality tiers, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quality {
    Awful,
    Poor,
    Normal,
    Good,
    Excellent,
    Masterwork,
    Legendary,
}

/// Inclusive quality range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRange {
    pub min: Quality,
    pub max: Quality,
}

impl Default for QualityRange {
    fn default() -> Self {
        Self {
            min: Quality::Awful,
            max: Quality::Legendary,
        }
    }
}

/// Inclusive percentage range, 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRange {
    pub min: f32,
    pub max: f32,
}

impl Default for PercentRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Which items a storage area, outfit, or bill accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Allowed item or category definitions.
    #[serde(default)]
    pub allow: Vec<String>,

    /// Special filters switched off (e.g. "AllowRotten", "AllowCorpsesStranger").
    #[serde(default)]
    pub disallowed_special: Vec<String>,

    /// Allowed hit points as a fraction of maximum.
    #[serde(default)]
    pub hit_points: PercentRange,

    /// Allowed quality range.
    #[serde(default)]
    pub quality: QualityRange,
}

impl ItemFilter {
    pub fn allowing<I, S>(defs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow: defs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Appending a filter widens it: allowed and disallowed-special lists are
/// unioned, while hit-point and quality ranges stay as they were.
impl Mergeable for ItemFilter {
    fn append(self, incoming: Self) -> Self {
        Self {
            allow: append_by_key(self.allow, incoming.allow, Clone::clone),
            disallowed_special: append_by_key(
                self.disallowed_special,
                incoming.disallowed_special,
                Clone::clone,
            ),
            hit_points: self.hit_points,
            quality: self.quality,
        }
    }
}

/// A named apparel policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub label: String,
    pub filter: ItemFilter,
}

/// Loading into an outfit keeps the target's label and merges the filter.
impl Mergeable for Outfit {
    fn append(self, incoming: Self) -> Self {
        Self {
            label: self.label,
            filter: self.filter.append(incoming.filter),
        }
    }

    fn replace(self, incoming: Self) -> Self {
        Self {
            label: self.label,
            filter: incoming.filter,
        }
    }
}

// =============================================================================
// Crafting bills
// =============================================================================

/// When a bill stops producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "count", rename_all = "snake_case")]
pub enum RepeatMode {
    /// Produce this many more, then stop.
    RepeatCount(u32),
    /// Produce until this many exist in storage.
    TargetCount(u32),
    #[default]
    Forever,
}

/// Where finished products go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreMode {
    DropOnFloor,
    #[default]
    BestStockpile,
}

/// Inclusive worker skill range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRange {
    pub min: u8,
    pub max: u8,
}

impl Default for SkillRange {
    fn default() -> Self {
        Self { min: 0, max: 20 }
    }
}

/// One production order on a crafting station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Recipe definition name.
    pub recipe: String,

    #[serde(default)]
    pub suspended: bool,

    #[serde(default)]
    pub repeat: RepeatMode,

    /// Ingredients the worker may use.
    #[serde(default)]
    pub ingredient_filter: ItemFilter,

    /// Ingredient search radius in cells. `None` = unlimited.
    #[serde(default)]
    pub ingredient_radius: Option<f32>,

    #[serde(default)]
    pub skill_range: SkillRange,

    #[serde(default)]
    pub store_mode: StoreMode,
}

impl Bill {
    pub fn new(recipe: impl Into<String>) -> Self {
        Self {
            recipe: recipe.into(),
            suspended: false,
            repeat: RepeatMode::default(),
            ingredient_filter: ItemFilter::default(),
            ingredient_radius: None,
            skill_range: SkillRange::default(),
            store_mode: StoreMode::default(),
        }
    }
}

impl NaturalKey for Bill {
    type Key = String;

    fn natural_key(&self) -> String {
        self.recipe.clone()
    }
}

/// The bill stack of one crafting station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillList {
    #[serde(default)]
    pub bills: Vec<Bill>,
}

impl Mergeable for BillList {
    fn append(self, incoming: Self) -> Self {
        Self {
            bills: Mergeable::append(self.bills, incoming.bills),
        }
    }
}

// =============================================================================
// Drug policies
// =============================================================================

/// Scheduling rules for one drug within a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugPolicyEntry {
    /// Drug definition name.
    pub drug: String,

    #[serde(default)]
    pub allow_for_addiction: bool,

    #[serde(default)]
    pub allow_for_joy: bool,

    #[serde(default)]
    pub allow_scheduled: bool,

    /// Days between scheduled doses.
    #[serde(default = "default_days_frequency")]
    pub days_frequency: f32,

    /// Take only when mood is below this fraction. `None` = any mood.
    #[serde(default)]
    pub only_if_mood_below: Option<f32>,

    /// Take only when recreation is below this fraction. `None` = any level.
    #[serde(default)]
    pub only_if_joy_below: Option<f32>,

    /// How many doses to carry in inventory.
    #[serde(default)]
    pub take_to_inventory: u32,
}

fn default_days_frequency() -> f32 {
    1.0
}

impl DrugPolicyEntry {
    pub fn new(drug: impl Into<String>) -> Self {
        Self {
            drug: drug.into(),
            allow_for_addiction: false,
            allow_for_joy: false,
            allow_scheduled: false,
            days_frequency: default_days_frequency(),
            only_if_mood_below: None,
            only_if_joy_below: None,
            take_to_inventory: 0,
        }
    }
}

impl NaturalKey for DrugPolicyEntry {
    type Key = String;

    fn natural_key(&self) -> String {
        self.drug.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugPolicy {
    pub label: String,

    #[serde(default)]
    pub entries: Vec<DrugPolicyEntry>,
}

impl Mergeable for DrugPolicy {
    fn append(self, incoming: Self) -> Self {
        Self {
            label: self.label,
            entries: Mergeable::append(self.entries, incoming.entries),
        }
    }

    /// The loaded entries win; the policy keeps its own label.
    fn replace(self, incoming: Self) -> Self {
        Self {
            label: self.label,
            entries: incoming.entries,
        }
    }
}

// =============================================================================
// Surgical operations
// =============================================================================

/// A queued surgery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Recipe definition name (e.g. "InstallBionicArm").
    pub recipe: String,

    /// Body part definition the operation targets, when it targets one.
    #[serde(default)]
    pub body_part: Option<String>,
}

impl Operation {
    pub fn new(recipe: impl Into<String>, body_part: Option<&str>) -> Self {
        Self {
            recipe: recipe.into(),
            body_part: body_part.map(str::to_string),
        }
    }
}

impl NaturalKey for Operation {
    type Key = (String, Option<String>);

    fn natural_key(&self) -> Self::Key {
        (self.recipe.clone(), self.body_part.clone())
    }
}

/// A pawn's pending surgeries, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationQueue {
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Mergeable for OperationQueue {
    fn append(self, incoming: Self) -> Self {
        Self {
            operations: Mergeable::append(self.operations, incoming.operations),
        }
    }
}
