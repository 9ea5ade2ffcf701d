//! The per-category ingestion pipeline.
//!
//! For each configured category: read the source table, parse rows,
//! build typed records, resolve every record's asset identifier, and
//! insert into the store. Each category is isolated: a missing source
//! or pool skips that category without touching the others, and the
//! run is summarized once, in a typed report.

use std::fmt;
use std::path::Path;

use deckforge_catalog::store::{CatalogStore, StoreError};
use deckforge_catalog::types::{AssetPool, CardAttributes, CardRecord, Category};
use deckforge_catalog::yaml::CatalogConfig;
use deckforge_match::power::resolve_stat_asset;
use deckforge_match::resolver::{MatchTier, OverrideTable, PoolIndex, Resolution};
use serde::Serialize;
use thiserror::Error;

use crate::builder::{
    build_character, build_mission, build_power, build_special, IdSequence, ANY_CHARACTER,
};
use crate::progress::IngestProgress;
use crate::table::parse_table;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Why a category produced no records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The source table file was absent.
    MissingSource { path: String },
    /// No pool definition was configured for the category.
    MissingPool,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource { path } => write!(f, "source file not found: {path}"),
            Self::MissingPool => write!(f, "no pool configured"),
        }
    }
}

/// Result of one category's ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CategoryOutcome {
    /// Records were loaded; counts cover skips and sentinel fallbacks.
    Loaded {
        count: usize,
        skipped_rows: usize,
        unmatched: usize,
    },
    /// The category was skipped entirely and its collection is empty.
    Skipped { reason: SkipReason },
}

/// One category's entry in the run report.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    #[serde(flatten)]
    pub outcome: CategoryOutcome,
}

/// Aggregated summary of a full ingestion run.
#[derive(Debug, Serialize)]
pub struct IngestReport {
    /// RFC3339 completion timestamp.
    pub finished_at: String,
    pub categories: Vec<CategoryReport>,
}

impl IngestReport {
    pub fn total_loaded(&self) -> usize {
        self.sum(|o| match o {
            CategoryOutcome::Loaded { count, .. } => *count,
            CategoryOutcome::Skipped { .. } => 0,
        })
    }

    pub fn total_skipped_rows(&self) -> usize {
        self.sum(|o| match o {
            CategoryOutcome::Loaded { skipped_rows, .. } => *skipped_rows,
            CategoryOutcome::Skipped { .. } => 0,
        })
    }

    pub fn total_unmatched(&self) -> usize {
        self.sum(|o| match o {
            CategoryOutcome::Loaded { unmatched, .. } => *unmatched,
            CategoryOutcome::Skipped { .. } => 0,
        })
    }

    fn sum<F: Fn(&CategoryOutcome) -> usize>(&self, f: F) -> usize {
        self.categories.iter().map(|c| f(&c.outcome)).sum()
    }
}

/// Run the full ingestion pass and build the catalog store.
///
/// Source tables are read from `data_dir` using each pool's configured
/// file name. The returned store is complete and read-only from the
/// caller's perspective; the report carries per-category outcomes.
pub fn ingest_catalog(
    data_dir: &Path,
    config: &CatalogConfig,
    progress: Option<&dyn IngestProgress>,
) -> Result<(CatalogStore, IngestReport), IngestError> {
    let mut store = CatalogStore::new();
    let mut categories = Vec::new();

    for category in Category::ALL {
        let outcome = match config.pool(category) {
            Some(pool) => {
                let overrides = OverrideTable::from_entries(config.overrides_for(category));
                ingest_category(&mut store, pool, &overrides, data_dir, progress)?
            }
            None => {
                log::warn!("No pool configured for {category}; skipping");
                CategoryOutcome::Skipped {
                    reason: SkipReason::MissingPool,
                }
            }
        };
        categories.push(CategoryReport { category, outcome });
    }

    let report = IngestReport {
        finished_at: chrono::Utc::now().to_rfc3339(),
        categories,
    };

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Ingestion complete: {} records, {} rows skipped, {} unmatched",
            report.total_loaded(),
            report.total_skipped_rows(),
            report.total_unmatched()
        ));
    }

    Ok((store, report))
}

/// Ingest one category's source table into the store.
fn ingest_category(
    store: &mut CatalogStore,
    pool: &AssetPool,
    overrides: &OverrideTable,
    data_dir: &Path,
    progress: Option<&dyn IngestProgress>,
) -> Result<CategoryOutcome, IngestError> {
    let category = pool.category;
    let path = data_dir.join(&pool.source);

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!(
                "Missing source for {category}: {} ({e}); collection stays empty",
                path.display()
            );
            return Ok(CategoryOutcome::Skipped {
                reason: SkipReason::MissingSource {
                    path: path.display().to_string(),
                },
            });
        }
    };

    let rows = parse_table(&text, &pool.header_label);
    if let Some(p) = progress {
        p.on_category(category.as_str(), rows.len());
    }

    let index = PoolIndex::from_pool(pool);
    let mut seq = IdSequence::new(category);
    let mut count = 0;
    let mut skipped_rows = 0;
    let mut unmatched = 0;
    let total = rows.len();

    for (i, row) in rows.iter().enumerate() {
        if row.cells.len() < pool.min_columns {
            skipped_rows += 1;
            log::warn!(
                "Skipping malformed {category} row at line {}: {} of {} columns",
                row.line,
                row.cells.len(),
                pool.min_columns
            );
            continue;
        }

        let (attributes, resolution) = build_and_resolve(pool, &index, overrides, row);
        if resolution.tier == MatchTier::Sentinel {
            unmatched += 1;
        }

        let record = CardRecord {
            id: seq.next_id(),
            category,
            attributes,
            resolved_asset: resolution.asset,
            alternate_assets: resolution.alternates,
        };
        let name = record.display_name();
        store.insert(category, record)?;
        count += 1;

        if let Some(p) = progress {
            p.on_record(i + 1, total, &name);
        }
    }

    Ok(CategoryOutcome::Loaded {
        count,
        skipped_rows,
        unmatched,
    })
}

/// Build one row's typed record and resolve its asset.
fn build_and_resolve(
    pool: &AssetPool,
    index: &PoolIndex,
    overrides: &OverrideTable,
    row: &crate::table::TableRow,
) -> (CardAttributes, Resolution) {
    match pool.category {
        Category::Character => {
            let card = build_character(&row.cells);
            let resolution = index.resolve(overrides, &card.name);
            (CardAttributes::Character(card), resolution)
        }
        Category::Special => {
            let card = build_special(&row.cells);
            // Character-specific art is keyed by owner + card name;
            // unrestricted cards resolve on the card name alone.
            let group = (!card.character.eq_ignore_ascii_case(ANY_CHARACTER))
                .then_some(card.character.as_str());
            let resolution = index.resolve_scoped(overrides, group, &card.name);
            (CardAttributes::Special(card), resolution)
        }
        Category::Power => {
            let card = build_power(&row.cells);
            let resolution = resolve_stat_asset(pool, &card.power_type, card.value);
            (CardAttributes::Power(card), resolution)
        }
        Category::Mission => {
            let card = build_mission(&row.cells, row.group.as_deref());
            let resolution = index.resolve_scoped(overrides, row.group.as_deref(), &card.name);
            (CardAttributes::Mission(card), resolution)
        }
    }
}
