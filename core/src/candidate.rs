//! Plate candidate cells and their shift affordances.
//!
//! A [`PlateCandidate`] is one editable cell of the eight-character plate:
//! the selected character, the alternatives the editor may switch to, and
//! the flags the pipeline attaches (padding, skipped vowel, word group and
//! its boundaries). Shift states describe whether the cell may swap with
//! its immediate neighbor.

use serde::{Deserialize, Serialize};

use crate::charset::{self, VALID_CHARS};
use crate::classifier::InputCharacter;

/// Why a candidate cannot shift in a given direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShiftDisabledReason {
    /// The candidate sits at the edge of the plate.
    BoundaryReached,
    /// The neighboring cell holds a non-padding character.
    NonPaddingCharFound,
}

/// Whether a candidate may swap with its neighbor on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftState {
    pub can_be_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<ShiftDisabledReason>,
}

impl Default for ShiftState {
    /// Disabled without a reason; the pipeline fills in real states late.
    fn default() -> Self {
        ShiftState {
            can_be_enabled: false,
            disabled_reason: None,
        }
    }
}

impl ShiftState {
    pub fn enabled() -> Self {
        ShiftState {
            can_be_enabled: true,
            disabled_reason: None,
        }
    }

    pub fn disabled(reason: ShiftDisabledReason) -> Self {
        ShiftState {
            can_be_enabled: false,
            disabled_reason: Some(reason),
        }
    }
}

/// One cell of the derived plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateCandidate {
    /// The classified input character this cell came from. Padding cells
    /// carry a synthetic input.
    pub input: InputCharacter,
    /// True for cells inserted by the pipeline rather than typed.
    pub is_padding: bool,
    /// Characters the editor may select for this cell.
    pub alternatives: Vec<String>,
    /// The character currently shown on the plate.
    pub selected: String,
    /// Vowel removed by elision; kept in the candidate list but not shown
    /// on the plate row.
    pub is_skipped_vowel: bool,
    /// Index of the input word this cell belongs to.
    pub word_group: usize,
    pub word_group_boundary_left: bool,
    pub word_group_boundary_right: bool,
    pub left_shift_state: ShiftState,
    pub right_shift_state: ShiftState,
    /// Monotonic edit counter, bumped by the editor on manual changes.
    pub last_changed: u64,
}

impl PlateCandidate {
    /// Build a candidate from a typed character. The alternatives list
    /// starts with the transformed character and adds the optional digit
    /// mapping when one exists.
    pub fn from_input(input: InputCharacter, word_group: usize) -> Self {
        let mut alternatives = vec![input.transformed.clone()];
        if let Some(digit) = charset::optional_mapping_for(&input.transformed) {
            let digit = digit.to_string();
            if digit != input.transformed {
                alternatives.push(digit);
            }
        }
        let selected = input.transformed.clone();
        PlateCandidate {
            input,
            is_padding: false,
            alternatives,
            selected,
            is_skipped_vowel: false,
            word_group,
            word_group_boundary_left: false,
            word_group_boundary_right: false,
            left_shift_state: ShiftState::default(),
            right_shift_state: ShiftState::default(),
            last_changed: 0,
        }
    }

    /// Build a padding candidate. Padding may be switched to any character
    /// of the plate alphabet.
    pub fn padding(padding_char: char) -> Self {
        PlateCandidate {
            input: InputCharacter::synthetic(padding_char),
            is_padding: true,
            alternatives: VALID_CHARS.iter().map(|c| c.to_string()).collect(),
            selected: padding_char.to_string(),
            is_skipped_vowel: false,
            word_group: 0,
            word_group_boundary_left: false,
            word_group_boundary_right: false,
            left_shift_state: ShiftState::default(),
            right_shift_state: ShiftState::default(),
            last_changed: 0,
        }
    }

    /// Whether the selected character is a digit.
    pub fn has_digit_selected(&self) -> bool {
        self.selected.chars().all(|c| c.is_ascii_digit()) && !self.selected.is_empty()
    }

    /// The digit this cell could show, if any. Checks the selection first,
    /// then the alternatives, then the mapping tables for typed characters.
    pub fn digit_alternative(&self) -> Option<String> {
        if self.has_digit_selected() {
            return Some(self.selected.clone());
        }
        if let Some(alt) = self
            .alternatives
            .iter()
            .find(|a| !a.is_empty() && a.chars().all(|c| c.is_ascii_digit()))
        {
            return Some(alt.clone());
        }
        if self.is_padding {
            return None;
        }
        charset::required_mapping_for(&self.input.uppercase_without_diacritics)
            .or_else(|| charset::optional_mapping_for(&self.input.uppercase_without_diacritics))
            .map(|c| c.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(ch: char) -> PlateCandidate {
        PlateCandidate::from_input(InputCharacter::classify(ch), 0)
    }

    #[test]
    fn plain_consonant_has_single_alternative() {
        let c = candidate('k');
        assert_eq!(c.selected, "K");
        assert_eq!(c.alternatives, vec!["K"]);
        assert!(!c.is_padding);
    }

    #[test]
    fn optional_mapping_adds_digit_alternative() {
        let c = candidate('s');
        assert_eq!(c.selected, "S");
        assert_eq!(c.alternatives, vec!["S", "5"]);
    }

    #[test]
    fn mandatory_letter_selects_digit_without_duplicate() {
        let c = candidate('o');
        assert_eq!(c.selected, "0");
        assert_eq!(c.alternatives, vec!["0"]);
    }

    #[test]
    fn padding_offers_whole_alphabet() {
        let p = PlateCandidate::padding('A');
        assert!(p.is_padding);
        assert_eq!(p.selected, "A");
        assert_eq!(p.alternatives.len(), 32);
        assert_eq!(p.alternatives[0], "A");
        assert_eq!(p.alternatives[31], "9");
    }

    #[test]
    fn digit_detection() {
        assert!(candidate('7').has_digit_selected());
        assert!(!candidate('k').has_digit_selected());
        assert!(candidate('o').has_digit_selected());
    }

    #[test]
    fn digit_alternative_prefers_selection() {
        let c = candidate('3');
        assert_eq!(c.digit_alternative(), Some("3".to_string()));
    }

    #[test]
    fn digit_alternative_from_alternatives() {
        let c = candidate('b');
        assert_eq!(c.digit_alternative(), Some("8".to_string()));
    }

    #[test]
    fn consonant_without_mapping_has_no_digit_alternative() {
        assert_eq!(candidate('d').digit_alternative(), None);
    }

    #[test]
    fn padding_digit_alternative_comes_from_alphabet() {
        let p = PlateCandidate::padding('A');
        assert_eq!(p.digit_alternative(), Some("0".to_string()));
    }

    #[test]
    fn shift_states_serialize_camel_case() {
        let s = ShiftState::disabled(ShiftDisabledReason::NonPaddingCharFound);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("canBeEnabled"));
        assert!(json.contains("nonPaddingCharFound"));
    }
}
