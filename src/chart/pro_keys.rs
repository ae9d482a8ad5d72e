//! Notes of pro keys.

/// Number of keys on the keyboard.
pub const KEY_COUNT: u8 = 25;

/// Number of keys visible at once.
pub const VISIBLE_KEY_COUNT: u8 = 17;

/// A pro keys note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProKeysNote {
    /// The key, from 0 (lowest C) to 24 (highest C).
    pub key: u8,
    /// The sustain continues past the start of the next note.
    pub extended_sustain: bool,
    /// The notes of the chord do not all end together.
    pub disjoint: bool,
    /// Inside a glissando section.
    pub glissando: bool,
}

/// The lowest key of a range shift phrase value, from 0 (C) to 5 (A).
#[must_use]
pub const fn range_shift_lowest_key(range: u8) -> Option<u8> {
    match range {
        0 => Some(0),
        1 => Some(2),
        2 => Some(4),
        3 => Some(5),
        4 => Some(7),
        5 => Some(9),
        _ => None,
    }
}
