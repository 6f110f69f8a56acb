//! Two-row display layout.
//!
//! The editor shows the plate as two interleaved rows: a vowel row above
//! with the elided vowels, and the plate row with the visible cells. The
//! rows alternate strictly, one slot of the vowel row between every two
//! plate cells, so an elided vowel always renders above the gap it was
//! removed from.

use serde::{Deserialize, Serialize};

use crate::candidate::PlateCandidate;

/// Slots in the vowel row. Eight plate cells leave nine gaps.
pub const VOWEL_ROW_SLOTS: usize = 9;

pub const ERR_CONSECUTIVE_VOWELS: &str = "vowelIndicator.errors.consecutiveVowels";
pub const ERR_TOO_MANY_VOWELS: &str = "vowelIndicator.errors.tooManyVowels";
pub const ERR_PLATE_ROW_OVERFLOW: &str = "plateDisplay.errors.tooManyConsonants";

/// The vowel row: one optional elided vowel per gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VowelRow {
    pub vowels: Vec<Option<PlateCandidate>>,
    pub errors: Vec<String>,
}

/// The plate row: the visible cells in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateRow {
    pub candidates: Vec<PlateCandidate>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLayout {
    pub vowel_row: VowelRow,
    pub plate_row: PlateRow,
}

/// Split a candidate list into the two display rows.
///
/// Walks the candidates with a strictly alternating turn: on a vowel
/// turn a skipped vowel is consumed into the current gap, otherwise the
/// gap stays empty; on a plate turn a visible candidate is consumed into
/// the plate row. A skipped vowel encountered on a plate turn means two
/// vowels were elided back to back; it is dropped and reported.
pub fn derive_display_layout(candidates: &[PlateCandidate]) -> DisplayLayout {
    let mut vowels: Vec<Option<PlateCandidate>> = vec![None; VOWEL_ROW_SLOTS];
    let mut vowel_errors: Vec<String> = Vec::new();
    let mut plate_candidates: Vec<PlateCandidate> = Vec::new();
    let mut plate_errors: Vec<String> = Vec::new();

    let mut candidate_index = 0;
    let mut vowel_slot = 0;
    let mut vowel_turn = true;

    while candidate_index < candidates.len() {
        let candidate = &candidates[candidate_index];

        if vowel_turn {
            if candidate.is_skipped_vowel {
                if vowel_slot < vowels.len() {
                    vowels[vowel_slot] = Some(candidate.clone());
                } else {
                    vowels.push(Some(candidate.clone()));
                }
                candidate_index += 1;
            } else if vowel_slot >= vowels.len() {
                vowels.push(None);
            }
            vowel_slot += 1;
        } else {
            if candidate.is_skipped_vowel {
                vowel_errors.push(ERR_CONSECUTIVE_VOWELS.to_string());
            } else {
                plate_candidates.push(candidate.clone());
            }
            candidate_index += 1;
        }

        vowel_turn = !vowel_turn;
    }

    let visible = plate_candidates
        .iter()
        .filter(|c| !c.selected.is_empty())
        .count();
    if visible > 8 {
        plate_errors.push(ERR_PLATE_ROW_OVERFLOW.to_string());
    }

    if vowels.len() > VOWEL_ROW_SLOTS
        && vowels[VOWEL_ROW_SLOTS..].iter().any(|v| v.is_some())
    {
        vowel_errors.push(ERR_TOO_MANY_VOWELS.to_string());
    }

    DisplayLayout {
        vowel_row: VowelRow {
            vowels,
            errors: vowel_errors,
        },
        plate_row: PlateRow {
            candidates: plate_candidates,
            errors: plate_errors,
        },
    }
}
