//! Local response synthesis.
//!
//! Turns an assembled [`FilterRecord`] into a confirmation sentence, or
//! picks a canned reply when nothing was recognized. Needs no remote
//! service.

use nyumba_core::money::group_thousands;
use nyumba_core::types::FilterRecord;

pub const HELP_RESPONSE: &str = "I can help you find the perfect rental property! Try asking me about specific locations like 'Show me apartments in Nairobi', price ranges like 'under 50k', or amenities like 'with parking and security'.";

pub const GREETING_RESPONSE: &str = "Hello! I'm here to help you find rental properties in Kenya. What kind of place are you looking for?";

pub const GENERIC_RESPONSE: &str = "I understand you're looking for rental properties. Try being more specific about location, price range, number of bedrooms, or amenities you'd like. For example: 'Show me 2-bedroom apartments in Nairobi under 60k with parking'.";

const CONFIRMATION_OPENING: &str =
    "Great! I've updated your search filters based on your request. ";
const CONFIRMATION_CLOSING: &str =
    "The property list will update automatically with matching properties!";

/// Canned reply categories for utterances with no recognized criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedReply {
    Help,
    Greeting,
    Generic,
}

impl CannedReply {
    pub fn text(&self) -> &'static str {
        match self {
            CannedReply::Help => HELP_RESPONSE,
            CannedReply::Greeting => GREETING_RESPONSE,
            CannedReply::Generic => GENERIC_RESPONSE,
        }
    }
}

/// Builds human-readable replies from filter records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSynthesizer;

impl ResponseSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Confirmation for a non-empty record, canned reply otherwise.
    pub fn synthesize(&self, filters: &FilterRecord, utterance: &str) -> String {
        if filters.is_empty() {
            self.classify_canned(utterance).text().to_string()
        } else {
            self.compose_confirmation(filters)
        }
    }

    /// Pick the canned category by keyword. Help wording beats greetings.
    pub fn classify_canned(&self, utterance: &str) -> CannedReply {
        let lowered = utterance.to_lowercase();
        if lowered.contains("help") || lowered.contains("how") {
            CannedReply::Help
        } else if lowered.contains("hello") || lowered.contains("hi") {
            CannedReply::Greeting
        } else {
            CannedReply::Generic
        }
    }

    /// Acknowledge each present field in a fixed order: location, price,
    /// bedrooms, type, amenities. Zero amounts and counts are not mentioned.
    pub fn compose_confirmation(&self, filters: &FilterRecord) -> String {
        let mut out = String::from(CONFIRMATION_OPENING);

        if let Some(ref location) = filters.location {
            out.push_str(&format!("Looking for properties in {}. ", location));
        }
        let nonzero = |v: Option<u64>| v.filter(|&amount| amount > 0);
        if let Some(range) = describe_price(nonzero(filters.min_price), nonzero(filters.max_price)) {
            out.push_str(&format!("Price range: {}. ", range));
        }
        if let Some(bedrooms) = filters.bedrooms.filter(|&n| n > 0) {
            let plural = if bedrooms > 1 { "s" } else { "" };
            out.push_str(&format!("{} bedroom{}. ", bedrooms, plural));
        }
        if let Some(ref property_type) = filters.property_type {
            out.push_str(&format!("Looking for {}s. ", property_type));
        }
        if !filters.amenities.is_empty() {
            out.push_str(&format!(
                "With amenities: {}. ",
                filters.amenities.join(", ")
            ));
        }

        out.push_str(CONFIRMATION_CLOSING);
        out
    }
}

fn describe_price(min: Option<u64>, max: Option<u64>) -> Option<String> {
    match (min, max) {
        (Some(lo), Some(hi)) => Some(format!(
            "between KSh {} and KSh {}",
            group_thousands(lo),
            group_thousands(hi)
        )),
        (Some(lo), None) => Some(format!("above KSh {}", group_thousands(lo))),
        (None, Some(hi)) => Some(format!("under KSh {}", group_thousands(hi))),
        (None, None) => None,
    }
}
