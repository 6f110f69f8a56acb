//! Per-character classification of raw input.
//!
//! Each typed character is normalized once, up front, into an
//! [`InputCharacter`] carrying every derived form and flag the rest of the
//! pipeline needs. Diacritics are stripped via canonical decomposition
//! (combining marks U+0300..=U+036F removed after NFKD); the Latin check
//! runs on the recomposed (NFKC) form so that a precomposed 'á' and a
//! decomposed 'a' + U+0301 classify identically.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::charset;

/// ASCII punctuation treated as a word separator.
const SYMBOL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

/// Last code point of the Latin Extended blocks accepted as input.
const LATIN_BLOCK_END: u32 = 0x017F;

/// One raw input character with its normalized forms and classification
/// flags. Immutable once built; the flags are purely descriptive and never
/// raise errors on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCharacter {
    /// The character exactly as typed.
    pub original: String,
    /// Uppercased form, diacritics preserved.
    pub uppercase: String,
    /// Uppercased form with combining marks stripped.
    pub uppercase_without_diacritics: String,
    /// `uppercase_without_diacritics`, or the mandatory digit for G/Q/W/O.
    pub transformed: String,

    /// A, E, I, O, U or Y after normalization.
    pub is_vowel: bool,
    pub is_whitespace: bool,
    /// Within the ASCII punctuation set.
    pub is_symbol: bool,
    /// Normalization changed the character (a diacritic was stripped).
    pub is_diacritic: bool,
    /// Within the Latin, Latin-1 or Latin Extended-A/B blocks.
    pub is_latin: bool,
}

impl InputCharacter {
    /// Classify a single raw character.
    pub fn classify(ch: char) -> Self {
        let original: String = ch.to_string();
        let decomposed: String = original.nfkd().collect();
        let without_diacritics: String = decomposed
            .chars()
            .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
            .collect();
        let uppercase = original.to_uppercase();
        let uppercase_without_diacritics = without_diacritics.to_uppercase();
        let composed: String = original.nfkc().collect();

        let transformed = match charset::required_mapping_for(&uppercase_without_diacritics) {
            Some(digit) => digit.to_string(),
            None => uppercase_without_diacritics.clone(),
        };

        let is_vowel = uppercase_without_diacritics
            .chars()
            .any(|c| matches!(c, 'A' | 'E' | 'I' | 'O' | 'U' | 'Y'));
        let is_whitespace = decomposed.chars().any(char::is_whitespace);
        let is_symbol = decomposed.chars().any(|c| SYMBOL_CHARS.contains(c));
        let is_diacritic = uppercase != uppercase_without_diacritics;
        let is_latin = composed.chars().all(|c| (c as u32) <= LATIN_BLOCK_END);

        InputCharacter {
            original,
            uppercase,
            uppercase_without_diacritics,
            transformed,
            is_vowel,
            is_whitespace,
            is_symbol,
            is_diacritic,
            is_latin,
        }
    }

    /// Synthetic input backing a padding candidate. The padding character
    /// comes from the plate alphabet, so no flag applies.
    pub fn synthetic(padding_char: char) -> Self {
        let s = padding_char.to_string();
        InputCharacter {
            original: s.clone(),
            uppercase: s.clone(),
            uppercase_without_diacritics: s.clone(),
            transformed: s,
            is_vowel: false,
            is_whitespace: false,
            is_symbol: false,
            is_diacritic: false,
            is_latin: true,
        }
    }
}
