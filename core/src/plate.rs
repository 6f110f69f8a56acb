//! Pipeline output types.

use serde::{Deserialize, Serialize};

use crate::candidate::PlateCandidate;

/// Flags describing the raw input as a whole, plus the overall validity of
/// the derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateMetadata {
    pub contains_diacritics: bool,
    pub contains_whitespace: bool,
    pub contains_symbols: bool,
    pub contains_non_latin: bool,
    pub is_valid: bool,
    /// Error message or message key; present only when `is_valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Monotonic edit counter, bumped by the editor on manual changes.
    pub last_change_counter: u64,
}

impl PlateMetadata {
    pub fn new() -> Self {
        PlateMetadata {
            contains_diacritics: false,
            contains_whitespace: false,
            contains_symbols: false,
            contains_non_latin: false,
            is_valid: true,
            error_message: None,
            last_change_counter: 0,
        }
    }
}

impl Default for PlateMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// The full result of deriving a plate from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateData {
    /// The raw input the plate was derived from.
    pub input: String,
    pub candidates: Vec<PlateCandidate>,
    pub metadata: PlateMetadata,
}

/// The plate number as a string: the selected characters of every candidate
/// that is not a skipped vowel, in order.
pub fn plate_number(candidates: &[PlateCandidate]) -> String {
    candidates
        .iter()
        .filter(|c| !c.is_skipped_vowel)
        .map(|c| c.selected.as_str())
        .collect()
}

/// The elided vowels as a string, in order of appearance.
pub fn skipped_vowels(candidates: &[PlateCandidate]) -> String {
    candidates
        .iter()
        .filter(|c| c.is_skipped_vowel)
        .map(|c| c.selected.as_str())
        .collect()
}
