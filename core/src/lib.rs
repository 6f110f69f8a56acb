//! libspz-core: Czech vehicle registration plate derivation.
//!
//! Turns free-form text into candidates for a custom eight-character
//! registration plate: letters that cannot appear on a plate are mapped to
//! look-alike digits, vowels are elided when the input is too long, short
//! inputs are padded with word-group-aware placement, and the result is
//! guaranteed to contain at least one digit. The editor-facing types carry
//! everything a UI needs: per-cell alternatives, shift affordances, word
//! group boundaries and the two-row display layout.
//!
//! The usual entry point is [`pipeline::process`]:
//!
//! ```rust
//! use libspz_core::{pipeline, plate};
//!
//! let data = pipeline::process("praha 1");
//! assert_eq!(plate::plate_number(&data.candidates), "1AAPRAHA");
//! ```

pub mod candidate;
pub mod charset;
pub mod classifier;
pub mod layout;
pub mod pipeline;
pub mod plate;
pub mod prefs;
pub mod saved;

pub use candidate::{PlateCandidate, ShiftDisabledReason, ShiftState};
pub use charset::{PADDING_CHAR, PLATE_LENGTH, VALID_CHARS};
pub use classifier::InputCharacter;
pub use layout::{derive_display_layout, DisplayLayout, PlateRow, VowelRow};
pub use pipeline::{process, process_with_padding, ProcessError};
pub use plate::{plate_number, skipped_vowels, PlateData, PlateMetadata};
pub use prefs::{Preferences, Theme};
pub use saved::{SavedPlateEntry, SavedPlates, StoreError};
