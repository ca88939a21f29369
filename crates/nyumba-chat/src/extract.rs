//! Rule-based filter extraction.
//!
//! Each field has its own ordered rule list applied to the lowercased
//! utterance; the first matching rule wins unless a field collects
//! several values (price, amenities). [`FilterExtractor::extract`] runs
//! every field and assembles the results into one [`FilterRecord`].

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use nyumba_core::types::FilterRecord;

use crate::vocabulary::{AMENITIES, LOCATIONS, PROPERTY_SUB_TYPES};

// =============================================================================
// Compiled patterns (compiled once, reused across calls)
// =============================================================================

/// Bedroom rules in priority order: the generic numeral rule first, then
/// number words one through five.
static BEDROOM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+)\s*(?:bed|bedroom|br)",
        r"(?i)(?:one|1)\s*(?:bed|bedroom)",
        r"(?i)(?:two|2)\s*(?:bed|bedroom)",
        r"(?i)(?:three|3)\s*(?:bed|bedroom)",
        r"(?i)(?:four|4)\s*(?:bed|bedroom)",
        r"(?i)(?:five|5)\s*(?:bed|bedroom)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Word-number rescan used when a word rule matched. Checked in order;
/// no hit means one bedroom.
const BEDROOM_WORDS: &[(&[&str], u32)] = &[
    (&["two", "2"], 2),
    (&["three", "3"], 3),
    (&["four", "4"], 4),
    (&["five", "5"], 5),
];

/// Every price token pattern captures a digit group worth thousands.
static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(\d+)k", r"(\d+),000", r"(\d+)\s*thousand"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

const UPPER_BOUND_WORDS: &[&str] = &["under", "below", "max", "up to"];
const LOWER_BOUND_WORDS: &[&str] = &["above", "over", "min", "from"];

// =============================================================================
// PriceRange
// =============================================================================

/// Price bounds recognized in one utterance, in shillings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

// =============================================================================
// FilterExtractor
// =============================================================================

/// Stateless extractor: the same utterance always yields the same record.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterExtractor;

impl FilterExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run every field extractor over `utterance` and assemble the results.
    pub fn extract(&self, utterance: &str) -> FilterRecord {
        let lowered = utterance.to_lowercase();
        let price = self.extract_price_range(&lowered);

        let filters = FilterRecord {
            location: self.extract_location(&lowered),
            min_price: price.min,
            max_price: price.max,
            bedrooms: self.extract_bedrooms(&lowered),
            property_type: self.extract_property_sub_type(&lowered),
            amenities: self.extract_amenities(&lowered),
        };

        if !filters.is_empty() {
            debug!(?filters, "Extracted filters from message");
        }
        filters
    }

    /// Bedroom count from the first matching rule.
    ///
    /// A numeral captured by the generic rule is trusted as-is, even if a
    /// different number word appears elsewhere. Word rules rescan the
    /// whole utterance for the first known number word.
    pub fn extract_bedrooms(&self, lowered: &str) -> Option<u32> {
        let caps = BEDROOM_PATTERNS
            .iter()
            .find_map(|re| re.captures(lowered))?;

        if let Some(digits) = caps.get(1) {
            return match digits.as_str().parse::<u32>() {
                Ok(n) => Some(n),
                Err(e) => {
                    debug!(digits = digits.as_str(), error = %e, "Bedroom count out of range");
                    None
                }
            };
        }

        let count = BEDROOM_WORDS
            .iter()
            .find(|(words, _)| words.iter().any(|w| lowered.contains(w)))
            .map(|(_, n)| *n)
            .unwrap_or(1);
        Some(count)
    }

    /// Canonical name of the first known location found as a substring.
    pub fn extract_location(&self, lowered: &str) -> Option<String> {
        LOCATIONS
            .iter()
            .find(|e| e.matches(lowered))
            .map(|e| e.canonical.to_string())
    }

    /// Price bounds from `<n>k`, `<n>,000` and `<n> thousand` tokens.
    ///
    /// Two or more distinct amounts give a min/max range. A single amount
    /// is an upper bound unless lower-bound wording is present.
    pub fn extract_price_range(&self, lowered: &str) -> PriceRange {
        let mut amounts: Vec<u64> = PRICE_PATTERNS
            .iter()
            .flat_map(|re| re.captures_iter(lowered))
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok()?.checked_mul(1000))
            .collect();
        amounts.sort_unstable();
        amounts.dedup();

        match amounts.as_slice() {
            [] => PriceRange::default(),
            [single] => {
                let single = Some(*single);
                if contains_any(lowered, UPPER_BOUND_WORDS) {
                    PriceRange { min: None, max: single }
                } else if contains_any(lowered, LOWER_BOUND_WORDS) {
                    PriceRange { min: single, max: None }
                } else {
                    PriceRange { min: None, max: single }
                }
            }
            [first, .., last] => PriceRange {
                min: Some(*first),
                max: Some(*last),
            },
        }
    }

    /// Canonical amenities whose synonyms occur, in table order.
    pub fn extract_amenities(&self, lowered: &str) -> Vec<String> {
        AMENITIES
            .iter()
            .filter(|e| e.matches(lowered))
            .map(|e| e.canonical.to_string())
            .collect()
    }

    /// Studio or bedsitter, whichever comes first in the table.
    pub fn extract_property_sub_type(&self, lowered: &str) -> Option<String> {
        PROPERTY_SUB_TYPES
            .iter()
            .find(|e| e.matches(lowered))
            .map(|e| e.canonical.to_string())
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
