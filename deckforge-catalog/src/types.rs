//! Data model types for the card catalog.
//!
//! These types represent the ingested records (characters, specials,
//! powers, missions) and the versioned configuration schema: asset
//! pools and human-curated overrides.

use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────────────

/// A record category. Every ingested record belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Character,
    Special,
    Power,
    Mission,
}

impl Category {
    /// All categories in ingestion order.
    pub const ALL: [Category; 4] = [
        Category::Character,
        Category::Special,
        Category::Power,
        Category::Mission,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Special => "special",
            Self::Power => "power",
            Self::Mission => "mission",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "character" | "characters" | "char" => Some(Self::Character),
            "special" | "specials" => Some(Self::Special),
            "power" | "powers" => Some(Self::Power),
            "mission" | "missions" => Some(Self::Mission),
            _ => None,
        }
    }

    /// Prefix used for sequential record ids: `character_1`, `special_1`, ...
    pub fn id_prefix(&self) -> &'static str {
        self.as_str()
    }

    /// The fixed fallback asset identifier for this category.
    ///
    /// Returned when no resolution tier matches; never absent from a
    /// built record.
    pub fn sentinel_asset(&self) -> String {
        format!("unknown_{}", self.as_str())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Records ─────────────────────────────────────────────────────────────────

/// One ingested catalog record with its resolved asset identifier.
///
/// Records are constructed once during startup ingestion and never
/// mutated afterward. `resolved_asset` is always non-empty: a pool
/// member, an override value, or the category sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct CardRecord {
    /// Sequential id scoped to the category: `"<category>_<n>"`.
    pub id: String,
    pub category: Category,
    #[serde(flatten)]
    pub attributes: CardAttributes,
    pub resolved_asset: String,
    /// Other pool identifiers that also cleared the winning tier,
    /// in pool order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternate_assets: Vec<String>,
}

impl CardRecord {
    /// Display name for listings.
    pub fn display_name(&self) -> String {
        match &self.attributes {
            CardAttributes::Character(c) => c.name.clone(),
            CardAttributes::Special(s) => s.name.clone(),
            CardAttributes::Power(p) => format!("{} {}", p.power_type, p.value),
            CardAttributes::Mission(m) => format!("{}: {}", m.set_name, m.name),
        }
    }
}

/// Per-category attribute set.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CardAttributes {
    Character(CharacterCard),
    Special(SpecialCard),
    Power(PowerCard),
    Mission(MissionCard),
}

/// A character card: combat stats plus free-text abilities.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterCard {
    pub name: String,
    pub energy: i32,
    pub combat: i32,
    pub brute_force: i32,
    pub intelligence: i32,
    pub threat_level: i32,
    pub special_abilities: String,
    pub rarity: Rarity,
}

/// A special card tied to an owning character.
#[derive(Debug, Clone, Serialize)]
pub struct SpecialCard {
    pub name: String,
    pub card_type: String,
    /// Owning character, or "Any Character" for unrestricted cards.
    pub character: String,
    pub effect: String,
    pub one_per_deck: bool,
    pub fortification: bool,
}

/// A power card, keyed by stat type and value rather than a name.
#[derive(Debug, Clone, Serialize)]
pub struct PowerCard {
    pub power_type: String,
    pub value: i32,
    pub notes: String,
}

/// A mission card, scoped to its mission set.
#[derive(Debug, Clone, Serialize)]
pub struct MissionCard {
    /// Owning mission set, taken from the table's section header.
    pub set_name: String,
    pub name: String,
    pub number: i32,
    pub briefing: String,
}

// ── Rarity ──────────────────────────────────────────────────────────────────

/// Card rarity, derived from a character's threat level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Threat-level bands: ≥25 legendary, ≥20 epic, ≥15 rare,
    /// ≥10 uncommon, else common.
    pub fn from_threat_level(threat_level: i32) -> Self {
        if threat_level >= 25 {
            Self::Legendary
        } else if threat_level >= 20 {
            Self::Epic
        } else if threat_level >= 15 {
            Self::Rare
        } else if threat_level >= 10 {
            Self::Uncommon
        } else {
            Self::Common
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

// ── Asset pool configuration ────────────────────────────────────────────────

/// A category's asset pool and source-table shape, loaded from YAML.
///
/// The pool is an ordered, append-only sequence; its order is part of
/// the resolution contract (first pool entry within a tier wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPool {
    pub category: Category,
    /// Source table file name, resolved relative to the data directory.
    pub source: String,
    /// Label appearing in the header row's first cell (e.g. "Name").
    pub header_label: String,
    /// Rows with fewer cells than this are skipped as malformed.
    pub min_columns: usize,
    /// Known asset identifiers, in resolution order.
    #[serde(default)]
    pub assets: Vec<String>,
    /// Curated composite-key table for stat-keyed categories.
    #[serde(default)]
    pub stat_table: Vec<StatAsset>,
    /// Numeric-range fallbacks for stat-keyed categories.
    #[serde(default)]
    pub stat_ranges: Vec<StatRange>,
}

/// One curated "type + value" → asset entry for stat-keyed cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatAsset {
    /// Composite key, e.g. "Energy 5".
    pub key: String,
    pub asset: String,
}

/// A numeric fallback range: for a matching power type, the pool index
/// is derived as `base + (max_value - value)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatRange {
    pub power_type: String,
    pub base: usize,
    pub max_value: i32,
}

// ── Overrides ───────────────────────────────────────────────────────────────

/// A human-curated asset correction, loaded from YAML.
///
/// Overrides are consulted before any heuristic tier and win
/// unconditionally, even when the mapped asset is not in the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetOverride {
    pub category: Category,
    /// Entity name as it appears in the source table.
    pub name: String,
    pub asset: String,
    pub reason: String,
}
