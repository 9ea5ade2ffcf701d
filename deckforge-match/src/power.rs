//! Stat-keyed asset resolution for power cards.
//!
//! Power cards are identified by "type + value" rather than a free-text
//! name, so instead of the cascade they use a curated composite-key
//! table with a numeric range fallback: the same precise-lookup-then-
//! fallback shape, table-driven and purely deterministic.

use deckforge_catalog::types::AssetPool;

use crate::normalize::normalize_name;
use crate::resolver::{MatchTier, Resolution};

/// Resolve a power card to exactly one asset identifier.
///
/// Consults the pool's curated stat table first (first entry in table
/// order wins), then the per-type numeric ranges: a range matching the
/// power type maps the card to pool index `base + (max_value - value)`.
/// The range computation assumes the pool numbers those assets
/// contiguously, descending by value; an index outside the pool falls
/// through to the sentinel.
pub fn resolve_stat_asset(pool: &AssetPool, power_type: &str, value: i32) -> Resolution {
    let key = normalize_name(&format!("{power_type} {value}"));

    for entry in &pool.stat_table {
        if normalize_name(&entry.key) == key {
            return Resolution {
                asset: entry.asset.clone(),
                tier: MatchTier::StatTable,
                alternates: Vec::new(),
            };
        }
    }

    let type_key = normalize_name(power_type);
    for range in &pool.stat_ranges {
        if normalize_name(&range.power_type) != type_key {
            continue;
        }
        let offset = range.max_value - value;
        if offset < 0 {
            continue;
        }
        if let Some(asset) = pool.assets.get(range.base + offset as usize) {
            return Resolution {
                asset: asset.clone(),
                tier: MatchTier::StatRange,
                alternates: Vec::new(),
            };
        }
    }

    Resolution {
        asset: pool.category.sentinel_asset(),
        tier: MatchTier::Sentinel,
        alternates: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckforge_catalog::types::{Category, StatAsset, StatRange};

    fn make_pool() -> AssetPool {
        AssetPool {
            category: Category::Power,
            source: "powers.md".into(),
            header_label: "Power Type".into(),
            min_columns: 3,
            assets: vec![
                "energy_8.webp".into(),
                "energy_7.webp".into(),
                "energy_6.webp".into(),
                "energy_5.webp".into(),
            ],
            stat_table: vec![
                StatAsset {
                    key: "Energy 8".into(),
                    asset: "energy_8.webp".into(),
                },
                StatAsset {
                    key: "Any-Power 5".into(),
                    asset: "any_power_5.webp".into(),
                },
            ],
            stat_ranges: vec![StatRange {
                power_type: "Energy".into(),
                base: 0,
                max_value: 8,
            }],
        }
    }

    #[test]
    fn table_lookup_wins() {
        let r = resolve_stat_asset(&make_pool(), "Energy", 8);
        assert_eq!(r.asset, "energy_8.webp");
        assert_eq!(r.tier, MatchTier::StatTable);
    }

    #[test]
    fn composite_key_survives_punctuation() {
        let r = resolve_stat_asset(&make_pool(), "Any-Power", 5);
        assert_eq!(r.asset, "any_power_5.webp");
        assert_eq!(r.tier, MatchTier::StatTable);
    }

    #[test]
    fn range_fallback_indexes_descending() {
        // Energy 6 is not in the table; base 0 + (8 - 6) = index 2.
        let r = resolve_stat_asset(&make_pool(), "Energy", 6);
        assert_eq!(r.asset, "energy_6.webp");
        assert_eq!(r.tier, MatchTier::StatRange);
    }

    #[test]
    fn value_above_range_maximum_is_sentinel() {
        let r = resolve_stat_asset(&make_pool(), "Energy", 9);
        assert_eq!(r.asset, "unknown_power");
        assert_eq!(r.tier, MatchTier::Sentinel);
    }

    #[test]
    fn index_past_pool_end_is_sentinel() {
        // 8 - 1 = offset 7, past the four pooled identifiers.
        let r = resolve_stat_asset(&make_pool(), "Energy", 1);
        assert_eq!(r.tier, MatchTier::Sentinel);
    }

    #[test]
    fn unknown_type_is_sentinel() {
        let r = resolve_stat_asset(&make_pool(), "Luck", 3);
        assert_eq!(r.tier, MatchTier::Sentinel);
    }
}
