//! In-memory property store.
//!
//! Owns the listing collection and hands out generated ids. Ids are
//! never reused, even after deletes.

use chrono::Utc;
use tracing::{debug, info};

use nyumba_core::types::{NewProperty, Property, PropertyUpdate};

use crate::query::PropertyQuery;
use crate::seed::seed_properties;

#[derive(Debug, Clone)]
pub struct PropertyStore {
    properties: Vec<Property>,
    next_id: u64,
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            next_id: 1,
        }
    }

    /// Store preloaded with the demo listings.
    pub fn seeded() -> Self {
        Self::from_properties(seed_properties())
    }

    /// Store over existing listings. New ids continue after the highest
    /// numeric id present.
    pub fn from_properties(properties: Vec<Property>) -> Self {
        let next_id = properties
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self {
            properties,
            next_id,
        }
    }

    pub fn all(&self) -> &[Property] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn by_landlord(&self, landlord_id: &str) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| p.landlord_id == landlord_id)
            .collect()
    }

    pub fn search(&self, query: &PropertyQuery) -> Vec<&Property> {
        query.apply(&self.properties)
    }

    /// Insert a listing with a fresh id and timestamps.
    pub fn add(&mut self, new: NewProperty) -> Property {
        let id = self.next_id.to_string();
        self.next_id += 1;

        let property = new.into_property(id, Utc::now());
        info!(id = %property.id, title = %property.title, "Property added");
        self.properties.push(property.clone());
        property
    }

    /// Apply a partial update. `None` if no listing has `id`.
    pub fn update(&mut self, id: &str, update: &PropertyUpdate) -> Option<Property> {
        let property = self.properties.iter_mut().find(|p| p.id == id)?;
        update.apply_to(property);
        property.updated_at = Utc::now();
        debug!(id, "Property updated");
        Some(property.clone())
    }

    /// Remove a listing. Returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.properties.iter().position(|p| p.id == id) {
            Some(index) => {
                self.properties.remove(index);
                info!(id, "Property deleted");
                true
            }
            None => false,
        }
    }
}
