//! The derivation pipeline: raw input in, plate candidates out.
//!
//! Stages run in a fixed order: classification, word grouping, the EL
//! prefix rule, vowel elision, the five-character layout rule, padding,
//! boundary and shift-state bookkeeping, and finally the digit guarantee.
//! Each stage mutates the candidate list in place; stages that can fail
//! return a [`ProcessError`] which [`process`] folds into the metadata.

use std::fmt;

use tracing::debug;

use crate::candidate::{PlateCandidate, ShiftDisabledReason, ShiftState};
use crate::charset::{self, PLATE_LENGTH};
use crate::classifier::InputCharacter;
use crate::plate::{plate_number, PlateData, PlateMetadata};

/// A pipeline stage failure. Carried to the UI as a message string; all
/// but the non-Latin case are localization keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    /// Input contains characters outside the Latin blocks.
    NonLatinInput,
    /// Vowel elision could not shorten the input to eight characters.
    TooManyConsonants,
    /// No cell can show a digit, not even through a mapping.
    NoPositionForNumber,
}

impl ProcessError {
    pub fn message(&self) -> &'static str {
        match self {
            ProcessError::NonLatinInput => "Non-Latin script characters are not allowed",
            ProcessError::TooManyConsonants => "inputSection.errors.tooManyConsonants",
            ProcessError::NoPositionForNumber => "inputSection.errors.noPositionForNumber",
        }
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ProcessError {}

/// Build the initial candidate list from classified characters.
///
/// Separators (whitespace and symbols) never become candidates; a run of
/// them closes the current word group. Leading separators are dropped
/// without opening a group.
pub fn build_candidates(characters: &[InputCharacter]) -> Vec<PlateCandidate> {
    let mut candidates = Vec::new();
    let mut word_group = 0usize;
    let mut previous_was_letter = false;

    for ch in characters {
        if ch.is_whitespace || ch.is_symbol {
            if previous_was_letter {
                word_group += 1;
            }
            previous_was_letter = false;
            continue;
        }
        previous_was_letter = true;
        candidates.push(PlateCandidate::from_input(ch.clone(), word_group));
    }

    candidates
}

/// Keep plates from starting with the reserved "EL" prefix.
///
/// At exactly eight characters the leading E is forced to 3; at seven a
/// '0' padding cell is prepended; anything shorter (or longer) gets a
/// plain padding cell in front and the regular stages take it from there.
pub fn handle_el_prefix(candidates: &mut Vec<PlateCandidate>, padding_char: char) {
    if candidates.len() < 2 {
        return;
    }
    if !(candidates[0].selected == "E" && candidates[1].selected == "L") {
        return;
    }

    if candidates.len() == PLATE_LENGTH {
        candidates[0].selected = "3".to_string();
        candidates[0].alternatives = vec!["3".to_string()];
    } else if candidates.len() == PLATE_LENGTH - 1 {
        let mut padding = PlateCandidate::padding(padding_char);
        padding.selected = "0".to_string();
        candidates.insert(0, padding);
    } else {
        candidates.insert(0, PlateCandidate::padding(padding_char));
    }
}

/// Mark vowels as skipped until at most eight candidates remain visible.
///
/// The first pass walks right to left and skips a vowel only when its
/// right neighbor is still visible, so that every other vowel of a vowel
/// run survives. The second pass drops that restriction. Skipped vowels
/// stay in the list; they are filtered out at display time.
fn elide_vowels(candidates: &mut [PlateCandidate]) -> Result<(), ProcessError> {
    if candidates.len() <= PLATE_LENGTH {
        return Ok(());
    }
    let mut remaining = candidates.len() - PLATE_LENGTH;

    for i in (0..candidates.len()).rev() {
        if remaining == 0 {
            break;
        }
        if candidates[i].input.is_vowel {
            let right_skipped = i + 1 < candidates.len() && candidates[i + 1].is_skipped_vowel;
            if !right_skipped {
                candidates[i].is_skipped_vowel = true;
                remaining -= 1;
            }
        }
    }

    if remaining > 0 {
        for i in (0..candidates.len()).rev() {
            if remaining == 0 {
                break;
            }
            if candidates[i].input.is_vowel && !candidates[i].is_skipped_vowel {
                candidates[i].is_skipped_vowel = true;
                remaining -= 1;
            }
        }
    }

    if remaining > 0 {
        return Err(ProcessError::TooManyConsonants);
    }
    Ok(())
}

/// Special layout for a five-character word.
///
/// A standalone five-character group is pushed to the right by front
/// padding. A five-character group next to a single character moves to
/// the end of the plate, with two padding cells separating it from the
/// single character. Any other arrangement is left for regular padding.
pub fn handle_five_char_group(candidates: &mut Vec<PlateCandidate>, padding_char: char) {
    // Visible, typed candidates per word group, in first-seen order.
    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
    for (i, c) in candidates.iter().enumerate() {
        if c.is_padding || c.is_skipped_vowel {
            continue;
        }
        match groups.iter_mut().find(|(g, _)| *g == c.word_group) {
            Some((_, indices)) => indices.push(i),
            None => groups.push((c.word_group, vec![i])),
        }
    }

    for (group, positions) in &groups {
        if positions.len() != 5 {
            continue;
        }
        let others: Vec<&(usize, Vec<usize>)> =
            groups.iter().filter(|(g, _)| g != group).collect();

        if others.is_empty() {
            while candidates.len() < PLATE_LENGTH {
                candidates.insert(0, PlateCandidate::padding(padding_char));
            }
        } else if others.len() == 1 && others[0].1.len() == 1 {
            let single_group = others[0].0;
            let mut removed: Vec<PlateCandidate> = Vec::with_capacity(5);
            for &idx in positions.iter().rev() {
                removed.push(candidates.remove(idx));
            }
            removed.reverse();

            if let Some(pos) = candidates.iter().position(|c| c.word_group == single_group) {
                candidates.insert(pos + 1, PlateCandidate::padding(padding_char));
                candidates.insert(pos + 2, PlateCandidate::padding(padding_char));
            }
            candidates.extend(removed);
        }
        break;
    }
}

/// Pad the plate to eight cells: first between word groups, then at the
/// end.
pub fn add_padding(candidates: &mut Vec<PlateCandidate>, padding_char: char) {
    if candidates.len() >= PLATE_LENGTH {
        return;
    }

    let mut last_group = 0usize;
    let mut i = 0usize;
    while i < candidates.len() && candidates.len() < PLATE_LENGTH {
        if candidates[i].is_padding {
            // Padding ahead of the first group, e.g. from the EL prefix.
            i += 1;
            continue;
        }
        let group = candidates[i].word_group;
        if i > 0 && group != last_group {
            candidates.insert(i, PlateCandidate::padding(padding_char));
            i += 1;
        }
        last_group = group;
        i += 1;
    }

    while candidates.len() < PLATE_LENGTH {
        candidates.push(PlateCandidate::padding(padding_char));
    }
}

/// Mark the outer edges of each word group on its visible candidates.
/// Padding and skipped vowels carry no boundaries.
pub fn set_word_group_boundaries(candidates: &mut [PlateCandidate]) {
    for c in candidates.iter_mut() {
        c.word_group_boundary_left = false;
        c.word_group_boundary_right = false;
    }

    let mut current_group: Option<usize> = None;
    let mut last_visible: Option<usize> = None;

    for i in 0..candidates.len() {
        if candidates[i].is_padding || candidates[i].is_skipped_vowel {
            continue;
        }
        match current_group {
            None => candidates[i].word_group_boundary_left = true,
            Some(g) if candidates[i].word_group != g => {
                if let Some(prev) = last_visible {
                    candidates[prev].word_group_boundary_right = true;
                }
                candidates[i].word_group_boundary_left = true;
            }
            _ => {}
        }
        current_group = Some(candidates[i].word_group);
        last_visible = Some(i);
    }

    if let Some(last) = last_visible {
        candidates[last].word_group_boundary_right = true;
    }
}

fn apply_required_mappings(candidates: &mut [PlateCandidate]) {
    for c in candidates.iter_mut() {
        if let Some(digit) = charset::required_mapping_for(&c.input.uppercase_without_diacritics) {
            c.selected = digit.to_string();
            c.alternatives = vec![digit.to_string()];
        }
    }
}

/// Decide for every typed cell whether it may swap with its neighbor.
/// Only an adjacent padding cell enables a shift; the plate edge and
/// adjacent typed cells disable it, each with its own reason.
pub fn set_shift_states(candidates: &mut [PlateCandidate]) {
    let len = candidates.len();
    for index in 0..len {
        candidates[index].left_shift_state = ShiftState::default();
        candidates[index].right_shift_state = ShiftState::default();
        if candidates[index].is_padding {
            continue;
        }

        candidates[index].left_shift_state = if index == 0 {
            ShiftState::disabled(ShiftDisabledReason::BoundaryReached)
        } else if candidates[index - 1].is_padding {
            ShiftState::enabled()
        } else {
            ShiftState::disabled(ShiftDisabledReason::NonPaddingCharFound)
        };

        candidates[index].right_shift_state = if index + 1 == len {
            ShiftState::disabled(ShiftDisabledReason::BoundaryReached)
        } else if candidates[index + 1].is_padding {
            ShiftState::enabled()
        } else {
            ShiftState::disabled(ShiftDisabledReason::NonPaddingCharFound)
        };
    }
}

/// Make sure at least one cell shows a digit.
///
/// Padding cells are repurposed first, rightmost wins; failing that, the
/// leftmost cell with any digit route (selection, alternative or mapping)
/// is switched.
pub fn ensure_digit(candidates: &mut [PlateCandidate]) -> Result<(), ProcessError> {
    let indices: Vec<usize> = (0..candidates.len()).collect();
    ensure_digit_at(candidates, &indices)
}

fn ensure_digit_at(
    candidates: &mut [PlateCandidate],
    indices: &[usize],
) -> Result<(), ProcessError> {
    for &i in indices.iter().rev() {
        if candidates[i].is_padding {
            if let Some(digit) = candidates[i].digit_alternative() {
                candidates[i].selected = digit;
                return Ok(());
            }
        }
    }

    for &i in indices {
        if let Some(digit) = candidates[i].digit_alternative() {
            candidates[i].selected = digit;
            return Ok(());
        }
    }

    Err(ProcessError::NoPositionForNumber)
}

/// Run the whole pipeline with the default padding character.
pub fn process(input: &str) -> PlateData {
    process_with_padding(input, charset::PADDING_CHAR)
}

/// Run the whole pipeline.
///
/// Never returns `Err`: stage failures land in `metadata.error_message`
/// with `is_valid` cleared. Elision failures and non-Latin input empty
/// the candidate list; a failed digit guarantee keeps it.
pub fn process_with_padding(input: &str, padding_char: char) -> PlateData {
    let mut metadata = PlateMetadata::new();
    let characters: Vec<InputCharacter> =
        input.trim().chars().map(InputCharacter::classify).collect();

    metadata.contains_diacritics = characters.iter().any(|c| c.is_diacritic);
    metadata.contains_whitespace = characters.iter().any(|c| c.is_whitespace);
    metadata.contains_symbols = characters.iter().any(|c| c.is_symbol);
    metadata.contains_non_latin = characters.iter().any(|c| !c.is_latin);

    if metadata.contains_non_latin {
        metadata.is_valid = false;
        metadata.error_message = Some(ProcessError::NonLatinInput.message().to_string());
        return PlateData {
            input: input.to_string(),
            candidates: Vec::new(),
            metadata,
        };
    }

    // Nothing but separators (or nothing at all) derives an empty plate.
    if characters.iter().all(|c| c.is_whitespace || c.is_symbol) {
        return PlateData {
            input: input.to_string(),
            candidates: Vec::new(),
            metadata,
        };
    }

    let mut candidates = build_candidates(&characters);

    handle_el_prefix(&mut candidates, padding_char);

    if let Err(err) = elide_vowels(&mut candidates) {
        metadata.is_valid = false;
        metadata.error_message = Some(err.message().to_string());
        return PlateData {
            input: input.to_string(),
            candidates: Vec::new(),
            metadata,
        };
    }

    handle_five_char_group(&mut candidates, padding_char);
    add_padding(&mut candidates, padding_char);
    set_word_group_boundaries(&mut candidates);
    apply_required_mappings(&mut candidates);
    set_shift_states(&mut candidates);

    let visible: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_skipped_vowel)
        .map(|(i, _)| i)
        .collect();
    let has_digit = visible
        .iter()
        .any(|&i| candidates[i].selected.chars().any(|ch| ch.is_ascii_digit()));
    if !has_digit {
        if let Err(err) = ensure_digit_at(&mut candidates, &visible) {
            metadata.is_valid = false;
            metadata.error_message = Some(err.message().to_string());
        }
    }

    debug!(
        input,
        plate = %plate_number(&candidates),
        valid = metadata.is_valid,
        "derived plate"
    );

    PlateData {
        input: input.to_string(),
        candidates,
        metadata,
    }
}
