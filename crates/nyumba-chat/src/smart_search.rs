//! Keyword "smart search" for the browse page search box.
//!
//! A coarser cousin of [`crate::FilterExtractor`]: a handful of intent
//! words map to fixed criteria, layered on top of the current filters.

use tracing::debug;

use nyumba_core::types::FilterRecord;

pub const BUDGET_MAX_PRICE: u64 = 30_000;
pub const LUXURY_MIN_PRICE: u64 = 50_000;
pub const FAMILY_BEDROOMS: u32 = 3;
pub const FAMILY_AMENITIES: &[&str] = &["garden", "security"];

#[derive(Debug, Clone, Copy, Default)]
pub struct SmartSearch;

impl SmartSearch {
    pub fn new() -> Self {
        Self
    }

    /// Apply every matching keyword rule to `current` and return the
    /// merged record. `current` is left untouched.
    pub fn apply(&self, query: &str, current: &FilterRecord) -> FilterRecord {
        let lowered = query.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lowered.contains(w));
        let mut patch = FilterRecord::default();

        if has(&["cheap", "affordable"]) {
            patch.max_price = Some(BUDGET_MAX_PRICE);
        }
        if has(&["luxury", "expensive"]) {
            patch.min_price = Some(LUXURY_MIN_PRICE);
        }
        if has(&["family"]) {
            patch.bedrooms = Some(FAMILY_BEDROOMS);
            patch.amenities = current.amenities.clone();
            for amenity in FAMILY_AMENITIES {
                patch.add_amenity(amenity);
            }
        }
        if has(&["studio", "single"]) {
            patch.property_type = Some("studio".to_string());
        }
        if has(&["westlands"]) {
            patch.location = Some("Westlands, Nairobi".to_string());
        }

        let merged = current.merge(&patch);
        debug!(query, filters = ?merged, "Smart search applied");
        merged
    }
}
