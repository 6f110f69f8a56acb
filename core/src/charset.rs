//! Plate alphabet and letter-to-digit mapping tables.
//!
//! Czech registration plates draw from a restricted alphabet: the Latin
//! letters minus G, O, Q and W (too easy to confuse with digits on a stamped
//! plate) plus the ten digits. Letters that are excluded from the alphabet
//! map mandatorily to their look-alike digit; a handful of other letters
//! carry an optional digit alternative the editor can switch to.

/// The ordered plate alphabet: 22 letters followed by the 10 digits.
///
/// Order matters in two places: the first entry is the default padding
/// character, and the digit-guarantee pass picks the first digit alternative
/// it finds when repurposing a padding slot.
pub const VALID_CHARS: [char; 32] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'P', 'R',
    'S', 'T', 'U', 'V', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7',
    '8', '9',
];

/// Number of visible characters on a plate.
pub const PLATE_LENGTH: usize = 8;

/// Default padding character (first entry of the alphabet).
pub const PADDING_CHAR: char = VALID_CHARS[0];

/// Mandatory letter-to-digit mapping. These letters cannot appear on a
/// plate and are always replaced.
pub fn required_mapping(ch: char) -> Option<char> {
    match ch {
        'G' | 'Q' => Some('6'),
        'W' => Some('3'),
        'O' => Some('0'),
        _ => None,
    }
}

/// Optional letter-to-digit mapping, offered as an alternative only when a
/// digit is needed somewhere on the plate.
pub fn optional_mapping(ch: char) -> Option<char> {
    match ch {
        'I' => Some('1'),
        'S' => Some('5'),
        'A' => Some('4'),
        'B' => Some('8'),
        'E' => Some('3'),
        _ => None,
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Mandatory mapping keyed by a normalized one-character string.
pub fn required_mapping_for(s: &str) -> Option<char> {
    single_char(s).and_then(required_mapping)
}

/// Optional mapping keyed by a normalized one-character string.
pub fn optional_mapping_for(s: &str) -> Option<char> {
    single_char(s).and_then(optional_mapping)
}

/// Whether `ch` may appear on a plate.
pub fn is_valid_char(ch: char) -> bool {
    VALID_CHARS.contains(&ch)
}

/// Split a list of alternatives into digits and letters, preserving order.
/// Used by the editor's character dropdown.
pub fn split_alternatives(alternatives: &[String]) -> (Vec<String>, Vec<String>) {
    let mut digits = Vec::new();
    let mut letters = Vec::new();
    for alt in alternatives {
        if !alt.is_empty() && alt.chars().all(|c| c.is_ascii_digit()) {
            digits.push(alt.clone());
        } else {
            letters.push(alt.clone());
        }
    }
    (digits, letters)
}
