//! The in-memory catalog store.
//!
//! Holds one keyed, insertion-ordered collection per record category.
//! The store is filled once by the ingestion pipeline and read-only
//! afterward; concurrent readers need no locking.

use crate::types::{CardRecord, Category};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),
    #[error("Record {id} belongs to {actual}, not {expected}")]
    CategoryMismatch {
        id: String,
        expected: Category,
        actual: Category,
    },
}

/// An insertion-ordered collection of records, keyed by id.
#[derive(Debug, Default)]
pub struct CardCollection {
    records: Vec<CardRecord>,
    by_id: HashMap<String, usize>,
}

impl CardCollection {
    pub fn insert(&mut self, record: CardRecord) -> Result<(), StoreError> {
        if self.by_id.contains_key(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        self.by_id.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&CardRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// All records, in insertion order.
    pub fn all(&self) -> &[CardRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-category record counts.
#[derive(Debug, Default, Serialize)]
pub struct StoreStats {
    pub characters: usize,
    pub specials: usize,
    pub powers: usize,
    pub missions: usize,
}

impl StoreStats {
    pub fn total(&self) -> usize {
        self.characters + self.specials + self.powers + self.missions
    }
}

/// The catalog store: one collection per category.
///
/// Built by value during startup ingestion and then passed by reference
/// to collaborators; there is no global instance.
#[derive(Debug, Default)]
pub struct CatalogStore {
    characters: CardCollection,
    specials: CardCollection,
    powers: CardCollection,
    missions: CardCollection,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record into its category's collection.
    ///
    /// Rejects ids already present and records routed to the wrong
    /// category collection.
    pub fn insert(&mut self, category: Category, record: CardRecord) -> Result<(), StoreError> {
        if record.category != category {
            return Err(StoreError::CategoryMismatch {
                id: record.id,
                expected: category,
                actual: record.category,
            });
        }
        self.collection_mut(category).insert(record)
    }

    pub fn get(&self, category: Category, id: &str) -> Option<&CardRecord> {
        self.collection(category).get(id)
    }

    /// All records for a category, in insertion order.
    pub fn get_all(&self, category: Category) -> &[CardRecord] {
        self.collection(category).all()
    }

    pub fn collection(&self, category: Category) -> &CardCollection {
        match category {
            Category::Character => &self.characters,
            Category::Special => &self.specials,
            Category::Power => &self.powers,
            Category::Mission => &self.missions,
        }
    }

    fn collection_mut(&mut self, category: Category) -> &mut CardCollection {
        match category {
            Category::Character => &mut self.characters,
            Category::Special => &mut self.specials,
            Category::Power => &mut self.powers,
            Category::Mission => &mut self.missions,
        }
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            characters: self.characters.len(),
            specials: self.specials.len(),
            powers: self.powers.len(),
            missions: self.missions.len(),
        }
    }
}
