use deckforge_catalog::store::{CatalogStore, StoreError};
use deckforge_catalog::types::{
    CardAttributes, CardRecord, Category, CharacterCard, Rarity,
};

fn make_character(id: &str, name: &str) -> CardRecord {
    CardRecord {
        id: id.to_string(),
        category: Category::Character,
        attributes: CardAttributes::Character(CharacterCard {
            name: name.to_string(),
            energy: 5,
            combat: 6,
            brute_force: 4,
            intelligence: 3,
            threat_level: 18,
            special_abilities: String::new(),
            rarity: Rarity::from_threat_level(18),
        }),
        resolved_asset: "test_hero.ext".to_string(),
        alternate_assets: Vec::new(),
    }
}

#[test]
fn get_by_id() {
    let mut store = CatalogStore::new();
    store
        .insert(Category::Character, make_character("character_1", "Tarzan"))
        .unwrap();

    let record = store.get(Category::Character, "character_1").unwrap();
    assert_eq!(record.display_name(), "Tarzan");
    assert!(store.get(Category::Character, "character_2").is_none());
    assert!(store.get(Category::Special, "character_1").is_none());
}

#[test]
fn get_all_preserves_insertion_order() {
    let mut store = CatalogStore::new();
    for (i, name) in ["Tarzan", "John Carter", "Dejah Thoris"].iter().enumerate() {
        store
            .insert(
                Category::Character,
                make_character(&format!("character_{}", i + 1), name),
            )
            .unwrap();
    }

    let names: Vec<String> = store
        .get_all(Category::Character)
        .iter()
        .map(|r| r.display_name())
        .collect();
    assert_eq!(names, vec!["Tarzan", "John Carter", "Dejah Thoris"]);
}

#[test]
fn duplicate_id_is_rejected() {
    let mut store = CatalogStore::new();
    store
        .insert(Category::Character, make_character("character_1", "Tarzan"))
        .unwrap();

    let err = store
        .insert(Category::Character, make_character("character_1", "Mowgli"))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(_)));
    assert_eq!(store.get_all(Category::Character).len(), 1);
}

#[test]
fn category_mismatch_is_rejected() {
    let mut store = CatalogStore::new();
    let err = store
        .insert(Category::Special, make_character("character_1", "Tarzan"))
        .unwrap_err();
    assert!(matches!(err, StoreError::CategoryMismatch { .. }));
}

#[test]
fn stats_count_per_category() {
    let mut store = CatalogStore::new();
    store
        .insert(Category::Character, make_character("character_1", "Tarzan"))
        .unwrap();
    store
        .insert(Category::Character, make_character("character_2", "Korak"))
        .unwrap();

    let stats = store.stats();
    assert_eq!(stats.characters, 2);
    assert_eq!(stats.specials, 0);
    assert_eq!(stats.total(), 2);
}

#[test]
fn empty_store_reads_cleanly() {
    let store = CatalogStore::new();
    for category in Category::ALL {
        assert!(store.get_all(category).is_empty());
        assert!(store.collection(category).is_empty());
    }
}
