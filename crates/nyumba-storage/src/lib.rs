//! Nyumba storage: the property store, listing filters, and the
//! key-value backed favorites list.
//!
//! Listings live in memory behind [`PropertyStore`]. Favorites persist
//! through any [`KeyValueStore`], with a WAL-mode SQLite implementation
//! for the CLI.

pub mod db;
pub mod favorites;
pub mod kv;
pub mod migrations;
pub mod properties;
pub mod query;
pub mod seed;

pub use db::Database;
pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use properties::PropertyStore;
pub use query::{PropertyQuery, BEDROOM_THRESHOLD};
pub use seed::{seed_properties, seed_users};
