//! The cascading asset resolver.
//!
//! A [`PoolIndex`] is built once per category from its configured
//! [`AssetPool`] and answers name queries through a fixed tier order.
//! The first tier producing a match wins, and within a tier the first
//! pool entry (in pool order) wins; both orderings are part of the
//! resolution contract. Every query returns an identifier, falling
//! back to the category sentinel when nothing matches.

use deckforge_catalog::types::{AssetOverride, AssetPool, Category};
use serde::Serialize;

use crate::normalize::{asset_key, normalize_name, strip_index_prefix};
use crate::similarity::{
    edit_distance, token_overlap, TOKEN_OVERLAP_THRESHOLD, WHOLE_NAME_EDIT_DISTANCE,
};

/// How a resolution was determined, in tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Curated override entry (takes precedence over pool contents)
    Override,
    /// Normalized name contained in a stripped pool key
    Containment,
    /// Equality after stripping the numeric index prefix from both sides
    PrefixStripped,
    /// Singular/plural variant contained in a stripped pool key
    Variant,
    /// Token-overlap score cleared the threshold
    TokenOverlap,
    /// Whole-key edit distance within tolerance
    EditDistance,
    /// Curated stat-table entry (stat-keyed categories)
    StatTable,
    /// Numeric range fallback (stat-keyed categories)
    StatRange,
    /// No tier matched; the category sentinel was assigned
    Sentinel,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Containment => "containment",
            Self::PrefixStripped => "prefix-stripped",
            Self::Variant => "variant",
            Self::TokenOverlap => "token-overlap",
            Self::EditDistance => "edit-distance",
            Self::StatTable => "stat-table",
            Self::StatRange => "stat-range",
            Self::Sentinel => "sentinel",
        }
    }
}

/// Result of resolving one entity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The winning asset identifier; never empty.
    pub asset: String,
    /// Which tier produced the match.
    pub tier: MatchTier,
    /// Later pool entries that also cleared the winning tier, in pool
    /// order.
    pub alternates: Vec<String>,
}

impl Resolution {
    fn single(asset: String, tier: MatchTier) -> Self {
        Self {
            asset,
            tier,
            alternates: Vec::new(),
        }
    }
}

/// Curated normalized-key → asset corrections for one category.
///
/// Entry order is preserved; on duplicate keys the first entry wins.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: Vec<(String, String)>,
}

impl OverrideTable {
    /// Build a table from configuration entries, normalizing names.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a AssetOverride>,
    {
        let mut table = Self::default();
        for entry in entries {
            table.insert(&entry.name, &entry.asset);
        }
        table
    }

    /// Add one correction. The name is normalized; a key already
    /// present is left untouched.
    pub fn insert(&mut self, name: &str, asset: &str) {
        let key = normalize_name(name);
        if self.get(&key).is_none() {
            self.entries.push((key, asset.to_string()));
        }
    }

    /// Look up an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One pool identifier with its precomputed comparison key.
#[derive(Debug, Clone)]
struct PoolEntry {
    id: String,
    key: String,
}

/// An indexed view of a category's asset pool for cascade resolution.
pub struct PoolIndex {
    category: Category,
    sentinel: String,
    entries: Vec<PoolEntry>,
}

impl PoolIndex {
    /// Build an index from a pool definition.
    pub fn from_pool(pool: &AssetPool) -> Self {
        Self::new(pool.category, pool.assets.iter().cloned())
    }

    /// Build an index from raw identifiers, in pool order.
    pub fn new<I>(category: Category, assets: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let entries = assets
            .into_iter()
            .map(|id| {
                let key = asset_key(&id);
                PoolEntry { id, key }
            })
            .collect();
        Self {
            category,
            sentinel: category.sentinel_asset(),
            entries,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an entity name to exactly one asset identifier.
    ///
    /// Tier order: override lookup, containment, prefix-stripped
    /// equality, morphological variants, token overlap, whole-key edit
    /// distance, sentinel.
    pub fn resolve(&self, overrides: &OverrideTable, name: &str) -> Resolution {
        let key = normalize_name(name);

        if let Some(asset) = overrides.get(&key) {
            return Resolution::single(asset.to_string(), MatchTier::Override);
        }

        if !key.is_empty() {
            if let Some(r) = self.first_match(MatchTier::Containment, |e| e.key.contains(&key)) {
                return r;
            }

            let stripped = strip_index_prefix(&key);
            if let Some(r) = self.first_match(MatchTier::PrefixStripped, |e| e.key == stripped) {
                return r;
            }

            let variants = name_variants(&key);
            if !variants.is_empty() {
                if let Some(r) = self.first_match(MatchTier::Variant, |e| {
                    variants.iter().any(|v| e.key.contains(v.as_str()))
                }) {
                    return r;
                }
            }

            if let Some(r) = self.first_match(MatchTier::TokenOverlap, |e| {
                token_overlap(&key, &e.key) >= TOKEN_OVERLAP_THRESHOLD
            }) {
                return r;
            }

            if let Some(r) = self.first_match(MatchTier::EditDistance, |e| {
                edit_distance(&key, &e.key) <= WHOLE_NAME_EDIT_DISTANCE
            }) {
                return r;
            }
        }

        Resolution::single(self.sentinel.clone(), MatchTier::Sentinel)
    }

    /// Resolve a name scoped to an owning group (mission set, owning
    /// character). The group qualifies the lookup name so that
    /// same-named entities in different groups resolve independently.
    pub fn resolve_scoped(
        &self,
        overrides: &OverrideTable,
        group: Option<&str>,
        name: &str,
    ) -> Resolution {
        match group {
            Some(g) if !g.trim().is_empty() => {
                self.resolve(overrides, &format!("{g} {name}"))
            }
            _ => self.resolve(overrides, name),
        }
    }

    /// First pool entry satisfying the tier predicate, plus the later
    /// entries that also satisfy it (the alternates).
    fn first_match<F>(&self, tier: MatchTier, pred: F) -> Option<Resolution>
    where
        F: Fn(&PoolEntry) -> bool,
    {
        let mut hits = self.entries.iter().filter(|e| pred(e));
        let winner = hits.next()?;
        Some(Resolution {
            asset: winner.id.clone(),
            tier,
            alternates: hits.map(|e| e.id.clone()).collect(),
        })
    }
}

/// Irregular singular/plural pairs the trailing-`s` rule misses.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("hero", "heroes"),
    ("knight", "knights"),
    ("champion", "champions"),
    ("wolf", "wolves"),
    ("man", "men"),
    ("woman", "women"),
];

/// Generate morphological variants of a normalized key.
///
/// Applies to the final token: drop a trailing `s` when the token is
/// long enough, add one otherwise, and swap through the curated
/// irregular pairs in both directions. The key itself is not included.
fn name_variants(key: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    let (stem, last) = match key.rsplit_once('_') {
        Some((stem, last)) => (Some(stem), last),
        None => (None, key),
    };
    if last.is_empty() {
        return variants;
    }

    let mut push = |new_last: String| {
        let variant = match stem {
            Some(stem) => format!("{stem}_{new_last}"),
            None => new_last,
        };
        if variant != key && !variants.contains(&variant) {
            variants.push(variant);
        }
    };

    match last.strip_suffix('s') {
        Some(singular) if last.len() > 3 => push(singular.to_string()),
        _ => push(format!("{last}s")),
    }

    for (singular, plural) in IRREGULAR_PLURALS {
        if last == *singular {
            push((*plural).to_string());
        } else if last == *plural {
            push((*singular).to_string());
        }
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pool(ids: &[&str]) -> PoolIndex {
        PoolIndex::new(
            Category::Character,
            ids.iter().map(|s| s.to_string()),
        )
    }

    #[test]
    fn override_wins_even_with_empty_pool() {
        let index = make_pool(&[]);
        let mut overrides = OverrideTable::default();
        overrides.insert("Angry Mob (Middle Ages)", "angry-mob--middle-ages.webp");

        let r = index.resolve(&overrides, "Angry Mob (Middle Ages)");
        assert_eq!(r.asset, "angry-mob--middle-ages.webp");
        assert_eq!(r.tier, MatchTier::Override);
    }

    #[test]
    fn override_value_need_not_be_in_pool() {
        let index = make_pool(&["014_anubis.webp"]);
        let mut overrides = OverrideTable::default();
        overrides.insert("Anubis", "hand_corrected.webp");

        let r = index.resolve(&overrides, "Anubis");
        assert_eq!(r.asset, "hand_corrected.webp");
        assert_eq!(r.tier, MatchTier::Override);
    }

    #[test]
    fn containment_matches_exact_name() {
        let index = make_pool(&["test_hero.ext"]);
        let r = index.resolve(&OverrideTable::default(), "Test Hero");
        assert_eq!(r.asset, "test_hero.ext");
        assert_eq!(r.tier, MatchTier::Containment);
    }

    #[test]
    fn containment_sees_through_index_prefix() {
        let index = make_pool(&["021_billy_the_kid.webp"]);
        let r = index.resolve(&OverrideTable::default(), "Billy the Kid");
        assert_eq!(r.asset, "021_billy_the_kid.webp");
        assert_eq!(r.tier, MatchTier::Containment);
    }

    #[test]
    fn prefix_stripped_equality() {
        // The name itself carries a numeric prefix; containment fails
        // because the pool key no longer has one.
        let index = make_pool(&["028_captain_nemo.webp"]);
        let r = index.resolve(&OverrideTable::default(), "17 Captain Nemo");
        assert_eq!(r.asset, "028_captain_nemo.webp");
        assert_eq!(r.tier, MatchTier::PrefixStripped);
    }

    #[test]
    fn plural_variant_matches_singular_pool_entry() {
        let index = make_pool(&["test_hero.ext"]);
        let r = index.resolve(&OverrideTable::default(), "Test Heroes");
        assert_eq!(r.asset, "test_hero.ext");
        assert_eq!(r.tier, MatchTier::Variant);
    }

    #[test]
    fn trailing_s_dropped_for_long_words() {
        let index = make_pool(&["knight.webp"]);
        let r = index.resolve(&OverrideTable::default(), "Knights");
        assert_eq!(r.asset, "knight.webp");
        assert_eq!(r.tier, MatchTier::Variant);
    }

    #[test]
    fn token_overlap_tier() {
        // Two of two usable tokens present, but neither containment
        // nor variants line up with the reordered key.
        let index = make_pool(&["monte_cristo_count.webp"]);
        let r = index.resolve(&OverrideTable::default(), "Count of Monte Cristo");
        assert_eq!(r.asset, "monte_cristo_count.webp");
        assert_eq!(r.tier, MatchTier::TokenOverlap);
    }

    #[test]
    fn edit_distance_fallback() {
        // Three edits: too far for per-token scoring (distance > 2),
        // still within the whole-key tolerance.
        let index = make_pool(&["moglee.webp"]);
        let r = index.resolve(&OverrideTable::default(), "Mowgli");
        assert_eq!(r.asset, "moglee.webp");
        assert_eq!(r.tier, MatchTier::EditDistance);
    }

    #[test]
    fn sentinel_when_nothing_matches() {
        let index = make_pool(&["dejah_thoris.webp"]);
        let r = index.resolve(&OverrideTable::default(), "Completely Unrelated Entity");
        assert_eq!(r.asset, "unknown_character");
        assert_eq!(r.tier, MatchTier::Sentinel);
        assert!(r.alternates.is_empty());
    }

    #[test]
    fn empty_name_resolves_to_sentinel() {
        let index = make_pool(&["dejah_thoris.webp"]);
        let r = index.resolve(&OverrideTable::default(), "  !!  ");
        assert_eq!(r.tier, MatchTier::Sentinel);
    }

    #[test]
    fn first_pool_entry_wins_within_a_tier() {
        let index = make_pool(&["tarzan_of_the_apes.webp", "tarzan_the_untamed.webp"]);
        let r = index.resolve(&OverrideTable::default(), "Tarzan");
        assert_eq!(r.asset, "tarzan_of_the_apes.webp");
        assert_eq!(r.tier, MatchTier::Containment);
        assert_eq!(r.alternates, vec!["tarzan_the_untamed.webp".to_string()]);
    }

    #[test]
    fn scoped_resolution_qualifies_with_group() {
        let index = make_pool(&["barsoom_red_planet.webp", "amtor_red_planet.webp"]);
        let overrides = OverrideTable::default();

        let r = index.resolve_scoped(&overrides, Some("Barsoom"), "Red Planet");
        assert_eq!(r.asset, "barsoom_red_planet.webp");

        let r = index.resolve_scoped(&overrides, Some("Amtor"), "Red Planet");
        assert_eq!(r.asset, "amtor_red_planet.webp");
    }

    #[test]
    fn duplicate_override_keys_keep_first_entry() {
        let mut overrides = OverrideTable::default();
        overrides.insert("Dracula", "first.webp");
        overrides.insert("DRACULA!", "second.webp");
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("dracula"), Some("first.webp"));
    }

    #[test]
    fn irregular_pair_both_directions() {
        let heroes = make_pool(&["heroes_of_mars.webp"]);
        let r = heroes.resolve(&OverrideTable::default(), "Hero of Mars");
        // "hero_of_mars" -> variant "heroes" applies to the final
        // token, so this falls through to token overlap instead.
        assert_eq!(r.asset, "heroes_of_mars.webp");

        let hero = make_pool(&["hero.webp"]);
        let r = hero.resolve(&OverrideTable::default(), "Heroes");
        assert_eq!(r.asset, "hero.webp");
        assert_eq!(r.tier, MatchTier::Variant);
    }
}
