use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Search filters
// =============================================================================

/// Structured search criteria derived from free text.
///
/// Every field is optional; an empty record means no criteria were
/// recognized. `amenities` holds canonical names, unique, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
}

impl FilterRecord {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.bedrooms.is_none()
            && self.property_type.is_none()
            && self.amenities.is_empty()
    }

    /// Returns a new record where every field present in `overrides`
    /// replaces the corresponding field of `self`.
    ///
    /// A non-empty amenity list in `overrides` replaces the base list.
    pub fn merge(&self, overrides: &FilterRecord) -> FilterRecord {
        FilterRecord {
            location: overrides.location.clone().or_else(|| self.location.clone()),
            min_price: overrides.min_price.or(self.min_price),
            max_price: overrides.max_price.or(self.max_price),
            bedrooms: overrides.bedrooms.or(self.bedrooms),
            property_type: overrides
                .property_type
                .clone()
                .or_else(|| self.property_type.clone()),
            amenities: if overrides.amenities.is_empty() {
                self.amenities.clone()
            } else {
                overrides.amenities.clone()
            },
        }
    }

    /// Append an amenity unless it is already present.
    pub fn add_amenity(&mut self, amenity: &str) {
        if !self.amenities.iter().any(|a| a == amenity) {
            self.amenities.push(amenity.to_string());
        }
    }
}

// =============================================================================
// Properties
// =============================================================================

/// Kind of rental unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
    Bedsitter,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Studio,
        PropertyType::Bedsitter,
    ];

    /// Lowercase identifier, as used in filter records.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Studio => "studio",
            PropertyType::Bedsitter => "bedsitter",
        }
    }

    /// Parse a case-insensitive type name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Apartment => write!(f, "Apartment"),
            PropertyType::House => write!(f, "House"),
            PropertyType::Studio => write!(f, "Studio"),
            PropertyType::Bedsitter => write!(f, "Bedsitter"),
        }
    }
}

/// A tenant's review of a listing. Ratings are on a 1-5 scale; the
/// overall rating is the tenant's averaged score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyReview {
    pub id: String,
    pub tenant_id: String,
    pub tenant_name: String,
    pub house_condition: u8,
    pub landlord_rating: u8,
    pub neighborhood_rating: u8,
    pub overall_rating: f32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A rental listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Monthly rent in Kenyan shillings.
    pub price: u64,
    pub location: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Floor area in square metres.
    pub area: u32,
    pub property_type: PropertyType,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub landlord_id: String,
    pub is_available: bool,
    pub service_charge_inclusive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_charge_amount: Option<u64>,
    #[serde(default)]
    pub reviews: Vec<PropertyReview>,
    /// 1-5 scale.
    pub tenant_friendliness_score: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Mean overall rating across reviews, `None` when unreviewed.
    pub fn average_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: f32 = self.reviews.iter().map(|r| r.overall_rating).sum();
        Some(total / self.reviews.len() as f32)
    }
}

/// Fields supplied when creating a listing. The store assigns the id and
/// timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: u64,
    pub location: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: u32,
    pub property_type: PropertyType,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub landlord_id: String,
    pub is_available: bool,
    pub service_charge_inclusive: bool,
    #[serde(default)]
    pub service_charge_amount: Option<u64>,
    #[serde(default)]
    pub tenant_friendliness_score: f32,
}

impl NewProperty {
    /// Materialize into a full listing.
    pub fn into_property(self, id: String, now: DateTime<Utc>) -> Property {
        Property {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            location: self.location,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area: self.area,
            property_type: self.property_type,
            amenities: self.amenities,
            images: self.images,
            landlord_id: self.landlord_id,
            is_available: self.is_available,
            service_charge_inclusive: self.service_charge_inclusive,
            service_charge_amount: self.service_charge_amount,
            reviews: Vec::new(),
            tenant_friendliness_score: self.tenant_friendliness_score,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; only `Some` fields are written.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub location: Option<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<u32>,
    pub property_type: Option<PropertyType>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
    pub service_charge_inclusive: Option<bool>,
    pub service_charge_amount: Option<u64>,
    pub tenant_friendliness_score: Option<f32>,
}

impl PropertyUpdate {
    /// Write the provided fields onto `property`.
    pub fn apply_to(&self, property: &mut Property) {
        if let Some(ref v) = self.title {
            property.title = v.clone();
        }
        if let Some(ref v) = self.description {
            property.description = v.clone();
        }
        if let Some(v) = self.price {
            property.price = v;
        }
        if let Some(ref v) = self.location {
            property.location = v.clone();
        }
        if let Some(v) = self.bedrooms {
            property.bedrooms = v;
        }
        if let Some(v) = self.bathrooms {
            property.bathrooms = v;
        }
        if let Some(v) = self.area {
            property.area = v;
        }
        if let Some(v) = self.property_type {
            property.property_type = v;
        }
        if let Some(ref v) = self.amenities {
            property.amenities = v.clone();
        }
        if let Some(ref v) = self.images {
            property.images = v.clone();
        }
        if let Some(v) = self.is_available {
            property.is_available = v;
        }
        if let Some(v) = self.service_charge_inclusive {
            property.service_charge_inclusive = v;
        }
        if let Some(v) = self.service_charge_amount {
            property.service_charge_amount = Some(v);
        }
        if let Some(v) = self.tenant_friendliness_score {
            property.tenant_friendliness_score = v;
        }
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Landlord,
    Tenant,
}

/// A marketplace participant. Used for listing ownership only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
