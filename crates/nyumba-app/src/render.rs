//! Plain-text rendering of listings and filters for the terminal.

use nyumba_core::types::{FilterRecord, Property, User};
use nyumba_core::format_ksh;

/// One-line summary of a listing.
pub fn listing_line(property: &Property) -> String {
    let mut line = format!(
        "[{}] {} | {} | {} bd / {} ba | {} {}/month",
        property.id,
        property.title,
        property.location,
        property.bedrooms,
        property.bathrooms,
        property.property_type,
        format_ksh(property.price),
    );
    if !property.service_charge_inclusive {
        if let Some(charge) = property.service_charge_amount {
            line.push_str(&format!(" + {} service charge", format_ksh(charge)));
        }
    }
    if let Some(rating) = property.average_rating() {
        line.push_str(&format!(" | rated {:.1}", rating));
    }
    if !property.is_available {
        line.push_str(" | unavailable");
    }
    line
}

/// Heading for a landlord's listings, named when the owner is known.
pub fn owner_heading(users: &[User], landlord_id: &str) -> String {
    match users.iter().find(|u| u.id == landlord_id) {
        Some(user) => format!("Listings by {} (landlord {})", user.name, user.id),
        None => format!("Listings by landlord {}", landlord_id),
    }
}

/// Filters as compact JSON, or `None` when nothing was extracted.
pub fn filters_summary(filters: &FilterRecord) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    serde_json::to_string(filters).ok()
}

pub fn listing_block(properties: &[&Property]) -> String {
    if properties.is_empty() {
        return "No matching properties.".to_string();
    }
    properties
        .iter()
        .map(|p| listing_line(p))
        .collect::<Vec<_>>()
        .join("\n")
}
