//! Listing filters applied to the property collection.

use nyumba_core::types::{FilterRecord, Property};

/// A bedroom filter of exactly this value means "this many or more".
/// Every other count must match exactly.
pub const BEDROOM_THRESHOLD: u32 = 4;

/// Criteria for narrowing the listing collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyQuery {
    pub filters: FilterRecord,
    /// Case-insensitive substring over title, location and description.
    pub search: Option<String>,
    pub available_only: bool,
}

impl PropertyQuery {
    pub fn from_filters(filters: FilterRecord) -> Self {
        Self {
            filters,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn only_available(mut self) -> Self {
        self.available_only = true;
        self
    }

    /// True when `property` satisfies every present criterion.
    pub fn matches(&self, property: &Property) -> bool {
        let f = &self.filters;

        if self.available_only && !property.is_available {
            return false;
        }
        if let Some(ref text) = self.search {
            if !matches_search(property, text) {
                return false;
            }
        }
        if let Some(ref location) = f.location {
            if !location_matches(&property.location, location) {
                return false;
            }
        }
        if f.min_price.is_some_and(|min| property.price < min) {
            return false;
        }
        if f.max_price.is_some_and(|max| property.price > max) {
            return false;
        }
        if let Some(ref kind) = f.property_type {
            if !property.property_type.as_str().eq_ignore_ascii_case(kind.trim()) {
                return false;
            }
        }
        if let Some(bedrooms) = f.bedrooms {
            let ok = if bedrooms == BEDROOM_THRESHOLD {
                property.bedrooms >= bedrooms
            } else {
                property.bedrooms == bedrooms
            };
            if !ok {
                return false;
            }
        }
        f.amenities.iter().all(|wanted| {
            property
                .amenities
                .iter()
                .any(|have| have.eq_ignore_ascii_case(wanted))
        })
    }

    /// Listings that match, in collection order.
    pub fn apply<'a>(&self, properties: &'a [Property]) -> Vec<&'a Property> {
        properties.iter().filter(|p| self.matches(p)).collect()
    }
}

fn matches_search(property: &Property, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&property.title, &property.location, &property.description]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Exact, case-insensitive match on the whole location or on any of its
/// comma-separated parts, so "Karen" matches "Karen, Nairobi".
fn location_matches(property_location: &str, wanted: &str) -> bool {
    let wanted = wanted.trim();
    property_location.trim().eq_ignore_ascii_case(wanted)
        || property_location
            .split(',')
            .any(|part| part.trim().eq_ignore_ascii_case(wanted))
}
