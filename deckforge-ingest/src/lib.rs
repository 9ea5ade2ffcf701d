//! Catalog ingestion: pseudo-table parsing, record building, and the
//! per-category pipeline that fills the catalog store.
//!
//! Ingestion runs once at process start, synchronously: for each
//! category, parse the source table, build typed records, resolve an
//! asset identifier per record, and insert into the store. Categories
//! are isolated, so a missing source skips that category while the
//! rest continue, and the whole run is summarized in a single report.

pub mod builder;
pub mod pipeline;
pub mod progress;
pub mod table;

pub use builder::{
    build_character, build_mission, build_power, build_special, IdSequence, ANY_CHARACTER,
    FORTIFICATION_MARKER, ONE_PER_DECK_MARKER,
};
pub use pipeline::{
    ingest_catalog, CategoryOutcome, CategoryReport, IngestError, IngestReport, SkipReason,
};
pub use progress::{IngestProgress, LogProgress, SilentProgress};
pub use table::{parse_table, TableRow, ROW_DELIMITER};
