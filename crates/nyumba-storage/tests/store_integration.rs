//! Chat-extracted filters applied to the listing store, plus favorites
//! persisted in SQLite.

use nyumba_core::types::FilterRecord;
use nyumba_storage::{
    FavoritesStore, KeyValueStore, PropertyQuery, PropertyStore, SqliteKeyValueStore,
    FAVORITES_KEY,
};

fn titles(store: &PropertyStore, filters: FilterRecord) -> Vec<String> {
    store
        .search(&PropertyQuery::from_filters(filters))
        .iter()
        .map(|p| p.title.clone())
        .collect()
}

#[test]
fn test_chat_style_filters_find_listings() {
    let store = PropertyStore::seeded();

    let karen = FilterRecord {
        location: Some("Karen".into()),
        bedrooms: Some(3),
        ..Default::default()
    };
    assert_eq!(titles(&store, karen), ["Spacious 3BR House in Karen"]);

    let studio = FilterRecord {
        property_type: Some("studio".into()),
        max_price: Some(30_000),
        ..Default::default()
    };
    assert_eq!(titles(&store, studio), ["Cozy Studio in Kilimani"]);

    let pool = FilterRecord {
        amenities: vec!["swimming pool".into()],
        ..Default::default()
    };
    assert_eq!(titles(&store, pool), ["Modern 2BR Apartment in Westlands"]);
}

#[test]
fn test_favorites_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("favorites.db");

    {
        let kv = SqliteKeyValueStore::open(&path).unwrap();
        let mut favorites = FavoritesStore::load(kv).unwrap();
        assert!(favorites.toggle("1").unwrap());
        assert!(favorites.toggle("3").unwrap());
        assert!(!favorites.toggle("1").unwrap());
    }

    let kv = SqliteKeyValueStore::open(&path).unwrap();
    assert_eq!(kv.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["3"]"#));
    let favorites = FavoritesStore::load(kv).unwrap();
    assert!(favorites.contains("3"));
    assert!(!favorites.contains("1"));
}
