//! End-to-end derivation vectors through the public API.

use libspz_core::pipeline::{process, process_with_padding};
use libspz_core::plate::{plate_number, skipped_vowels};
use libspz_core::{ShiftDisabledReason, ShiftState};

fn plate(input: &str) -> String {
    plate_number(&process(input).candidates)
}

#[test]
fn five_char_word_is_pushed_right() {
    assert_eq!(plate("skoda"), "AAASK0DA");
    assert_eq!(plate("plzen"), "AA0PLZEN");
}

#[test]
fn five_char_word_after_single_char_moves_to_end() {
    assert_eq!(plate("praha 1"), "1AAPRAHA");
    assert_eq!(plate("k 12345"), "KAA12345");
}

#[test]
fn short_input_pads_at_end() {
    assert_eq!(plate("brno"), "BRN0AAAA");
}

#[test]
fn diacritics_are_stripped_and_flagged() {
    let data = process("škoda");
    assert_eq!(plate_number(&data.candidates), "AAASK0DA");
    assert!(data.metadata.contains_diacritics);
    assert!(data.metadata.is_valid);
}

#[test]
fn single_char_groups_alternate_with_padding() {
    let data = process("a b c d e");
    assert_eq!(plate_number(&data.candidates), "AABAC0DE");
    assert!(data.metadata.contains_whitespace);
}

#[test]
fn two_groups_share_the_plate() {
    let data = process("dobry den");
    assert_eq!(plate_number(&data.candidates), "D0BRYDEN");
    let cands = &data.candidates;
    assert!(cands[0].word_group_boundary_left);
    assert!(cands[4].word_group_boundary_right);
    assert!(cands[5].word_group_boundary_left);
    assert!(cands[7].word_group_boundary_right);
}

#[test]
fn el_prefix_interacts_with_elision() {
    // The EL rule runs before elision, so the front padding it adds raises
    // the number of vowels that have to go.
    let data = process("elektromobil");
    assert_eq!(plate_number(&data.candidates), "0LKTRMBL");
    assert_eq!(skipped_vowels(&data.candidates), "EEOOI");
}

#[test]
fn el_prefix_cases() {
    assert_eq!(plate("elllllll"), "3LLLLLLL");
    assert_eq!(plate("ellllll"), "0ELLLLLL");
    assert_eq!(plate("elllll"), "AELLLLL0");
}

#[test]
fn shift_states_after_el_padding() {
    let data = process("ellllll");
    let cands = &data.candidates;
    assert!(cands[0].is_padding);
    assert_eq!(cands[1].selected, "E");
    assert_eq!(cands[1].left_shift_state, ShiftState::enabled());
    assert_eq!(
        cands[1].right_shift_state,
        ShiftState::disabled(ShiftDisabledReason::NonPaddingCharFound)
    );
}

#[test]
fn consonant_overflow_reports_and_empties() {
    let data = process("krkvrhcld");
    assert!(!data.metadata.is_valid);
    assert_eq!(
        data.metadata.error_message.as_deref(),
        Some("inputSection.errors.tooManyConsonants")
    );
    assert!(data.candidates.is_empty());
}

#[test]
fn mixed_scripts_are_rejected() {
    let data = process("abcдef");
    assert!(!data.metadata.is_valid);
    assert!(data.metadata.contains_non_latin);
    assert_eq!(
        data.metadata.error_message.as_deref(),
        Some("Non-Latin script characters are not allowed")
    );
    assert!(data.candidates.is_empty());
}

#[test]
fn digit_guarantee_failure_keeps_the_plate_editable() {
    let data = process("DDDDDDDD");
    assert!(!data.metadata.is_valid);
    assert_eq!(data.candidates.len(), 8);
    assert_eq!(plate_number(&data.candidates), "DDDDDDDD");
}

#[test]
fn custom_padding_char_flows_through() {
    let data = process_with_padding("brno", 'X');
    assert_eq!(plate_number(&data.candidates), "BRN0XXXX");
}

#[test]
fn input_is_trimmed_and_preserved() {
    let data = process("  brno  ");
    assert_eq!(data.input, "  brno  ");
    assert_eq!(plate_number(&data.candidates), "BRN0AAAA");
}
