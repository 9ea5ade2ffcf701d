//! Record construction from parsed table rows.
//!
//! Column layouts follow the source tables; numeric cells coerce with
//! a zero default, and boolean flags derive from bolded marker
//! substrings in the free-text columns. Callers are responsible for
//! checking the category's minimum column count first.

use deckforge_catalog::types::{
    Category, CharacterCard, MissionCard, PowerCard, Rarity, SpecialCard,
};

/// Marker substring that flags a special card as one-per-deck.
pub const ONE_PER_DECK_MARKER: &str = "**One Per Deck**";

/// Marker substring that flags a special card as a fortification.
pub const FORTIFICATION_MARKER: &str = "**Fortification**";

/// Owning-character value for specials usable by anyone.
pub const ANY_CHARACTER: &str = "Any Character";

/// Sequential id allocator scoped to one category.
#[derive(Debug)]
pub struct IdSequence {
    category: Category,
    next: usize,
}

impl IdSequence {
    pub fn new(category: Category) -> Self {
        Self { category, next: 1 }
    }

    /// The next id in the sequence: `"<category>_<n>"`, starting at 1.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}_{}", self.category.id_prefix(), self.next);
        self.next += 1;
        id
    }
}

/// Integer coercion with a zero default on parse failure.
fn coerce_int(cell: &str) -> i32 {
    cell.trim().parse().unwrap_or(0)
}

/// Build a character from `Name | Energy | Combat | Brute Force |
/// Intelligence | Threat Level | Special Abilities`.
pub fn build_character(cells: &[String]) -> CharacterCard {
    let get = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
    let threat_level = coerce_int(get(5));
    CharacterCard {
        name: get(0).to_string(),
        energy: coerce_int(get(1)),
        combat: coerce_int(get(2)),
        brute_force: coerce_int(get(3)),
        intelligence: coerce_int(get(4)),
        threat_level,
        special_abilities: get(6).to_string(),
        rarity: Rarity::from_threat_level(threat_level),
    }
}

/// Build a special card from `Card Name | Card Type | Character |
/// Card Effect`.
pub fn build_special(cells: &[String]) -> SpecialCard {
    let get = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
    let effect = get(3).to_string();
    SpecialCard {
        name: get(0).to_string(),
        card_type: get(1).to_string(),
        character: get(2).to_string(),
        one_per_deck: effect.contains(ONE_PER_DECK_MARKER),
        fortification: effect.contains(FORTIFICATION_MARKER),
        effect,
    }
}

/// Build a power card from `Power Type | Value | Notes`.
pub fn build_power(cells: &[String]) -> PowerCard {
    let get = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
    PowerCard {
        power_type: get(0).to_string(),
        value: coerce_int(get(1)),
        notes: get(2).to_string(),
    }
}

/// Build a mission card from `Mission | Number | Briefing`, scoped to
/// the section header's mission set.
pub fn build_mission(cells: &[String], group: Option<&str>) -> MissionCard {
    let get = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
    MissionCard {
        set_name: group.unwrap_or_default().to_string(),
        name: get(0).to_string(),
        number: coerce_int(get(1)),
        briefing: get(2).to_string(),
    }
}
