//! Static vocabulary tables shared by every extractor rule.
//!
//! Tables are ordered: extractors that stop at the first hit walk them in
//! declaration order.

use nyumba_core::types::PropertyType;

/// A canonical, display-ready term and the lowercase keywords that select it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub canonical: &'static str,
    pub keywords: &'static [&'static str],
}

impl VocabularyEntry {
    /// True when any keyword occurs as a substring of `lowered`.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

const fn entry(
    canonical: &'static str,
    keywords: &'static [&'static str],
) -> VocabularyEntry {
    VocabularyEntry {
        canonical,
        keywords,
    }
}

pub static LOCATIONS: &[VocabularyEntry] = &[
    entry("Karen", &["karen"]),
    entry("Westlands", &["westlands"]),
    entry("Kilimani", &["kilimani"]),
    entry("Kasarani", &["kasarani"]),
    entry("Nairobi", &["nairobi"]),
    entry("Mombasa", &["mombasa"]),
    entry("Kisumu", &["kisumu"]),
    entry("Nakuru", &["nakuru"]),
    entry("Eldoret", &["eldoret"]),
];

pub static AMENITIES: &[VocabularyEntry] = &[
    entry("parking", &["parking", "garage", "car park"]),
    entry("swimming pool", &["swimming pool", "pool", "swimming"]),
    entry("gym", &["gym", "fitness", "exercise"]),
    entry("security", &["security", "guard", "secure"]),
    entry("garden", &["garden", "yard", "compound"]),
    entry("balcony", &["balcony", "terrace"]),
    entry("wifi", &["wifi", "internet", "wi-fi"]),
];

/// Only the two unambiguous sub-types. "house" and "apartment" are too
/// common in casual phrasing to force a type filter.
pub static PROPERTY_SUB_TYPES: &[VocabularyEntry] = &[
    entry("studio", &["studio apartment", "studio"]),
    entry("bedsitter", &["bedsitter", "bed sitter"]),
];

/// Title-case an amenity name for display: "swimming pool" -> "Swimming Pool".
fn display_amenity(name: &str) -> String {
    match name {
        "wifi" => "WiFi".to_string(),
        _ => name
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" "),
    }
}

/// System prompt for the remote chat-completion service, built from the
/// tables above.
pub fn system_prompt() -> String {
    let locations: Vec<&str> = LOCATIONS.iter().map(|e| e.canonical).collect();
    let types: Vec<String> = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Bedsitter,
        PropertyType::Studio,
    ]
    .iter()
    .map(|t| t.to_string())
    .collect();
    let amenities: Vec<String> = AMENITIES
        .iter()
        .map(|e| display_amenity(e.canonical))
        .collect();

    format!(
        "You are a helpful AI assistant for a house hunting platform in Kenya. \
         Help users filter and find rental properties based on their preferences. \
         When users mention specific criteria like location, price range, number of bedrooms, \
         or amenities, acknowledge them; the property list updates automatically.\n\n\
         Available locations: {}\n\
         Property types: {}\n\
         Common amenities: {}\n\n\
         Always be helpful and conversational.",
        locations.join(", "),
        types.join(", "),
        amenities.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(LOCATIONS.len(), 9);
        assert_eq!(AMENITIES.len(), 7);
        assert_eq!(PROPERTY_SUB_TYPES.len(), 2);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for e in LOCATIONS.iter().chain(AMENITIES).chain(PROPERTY_SUB_TYPES) {
            for k in e.keywords {
                assert_eq!(*k, k.to_lowercase(), "keyword {:?} must be lowercase", k);
            }
        }
    }

    #[test]
    fn test_entry_matches_substring() {
        let parking = AMENITIES[0];
        assert!(parking.matches("need a garage please"));
        assert!(parking.matches("car park"));
        assert!(!parking.matches("a quiet place"));
    }

    #[test]
    fn test_display_amenity() {
        assert_eq!(display_amenity("swimming pool"), "Swimming Pool");
        assert_eq!(display_amenity("gym"), "Gym");
        assert_eq!(display_amenity("wifi"), "WiFi");
    }

    #[test]
    fn test_system_prompt_lists_vocabulary() {
        let prompt = system_prompt();
        assert!(prompt.contains("house hunting platform in Kenya"));
        assert!(prompt.contains(
            "Available locations: Karen, Westlands, Kilimani, Kasarani, Nairobi, Mombasa, Kisumu, Nakuru, Eldoret"
        ));
        assert!(prompt.contains("Property types: Apartment, House, Bedsitter, Studio"));
        assert!(prompt.contains(
            "Common amenities: Parking, Swimming Pool, Gym, Security, Garden, Balcony, WiFi"
        ));
    }
}
