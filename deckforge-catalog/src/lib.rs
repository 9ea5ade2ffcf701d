//! Card catalog data model types, YAML configuration I/O, and the
//! in-memory catalog store.
//!
//! This crate defines the record types produced by ingestion and the
//! versioned configuration data (asset pools, override tables) they are
//! resolved against, without any knowledge of parsing or matching.
//! Consumers use these types directly for serialization, display, or
//! passing to `deckforge-ingest` for catalog construction.

pub mod store;
pub mod types;
pub mod yaml;

pub use store::{CardCollection, CatalogStore, StoreError, StoreStats};
pub use types::*;
pub use yaml::{load_catalog, load_overrides, load_pools, CatalogConfig, YamlError};
