//! Name normalization, similarity scoring, and the tiered asset resolver.
//!
//! Everything in this crate is deterministic and free of I/O: the
//! resolver is built once from a category's pool and override
//! configuration, then answers name → asset-identifier queries for the
//! ingestion pipeline. It always answers; "no match" is the category
//! sentinel, never an error.

pub mod normalize;
pub mod power;
pub mod resolver;
pub mod similarity;

pub use normalize::{asset_key, normalize_name, strip_index_prefix};
pub use power::resolve_stat_asset;
pub use resolver::{MatchTier, OverrideTable, PoolIndex, Resolution};
pub use similarity::{
    edit_distance, token_overlap, TOKEN_EDIT_DISTANCE, TOKEN_OVERLAP_THRESHOLD,
    WHOLE_NAME_EDIT_DISTANCE,
};
