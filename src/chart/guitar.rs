//! Notes of five- and six-fret guitars.

use super::GameMode;

/// A fret of a five-fret guitar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FiveFretGuitarFret {
    /// Open strum.
    Open,
    /// Green.
    Green,
    /// Red.
    Red,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Orange.
    Orange,
}

/// A fret of a six-fret guitar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SixFretGuitarFret {
    /// Open strum.
    Open,
    /// Lower row, first fret.
    Black1,
    /// Lower row, second fret.
    Black2,
    /// Lower row, third fret.
    Black3,
    /// Upper row, first fret.
    White1,
    /// Upper row, second fret.
    White2,
    /// Upper row, third fret.
    White3,
}

/// Frets which can be decoded from a raw source value.
pub trait GuitarFret: Copy + Eq + Send + std::fmt::Debug {
    /// The game mode of instruments with these frets.
    const GAME_MODE: GameMode;

    /// Decodes a raw source value.
    ///
    /// # Panics
    ///
    /// Panics on values which do not name a fret; they can only come from a broken reader.
    fn from_raw(raw: u8) -> Self;

    /// Checks whether this is the open note.
    fn is_open(self) -> bool;
}

impl GuitarFret for FiveFretGuitarFret {
    const GAME_MODE: GameMode = GameMode::FiveFretGuitar;

    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Green,
            1 => Self::Red,
            2 => Self::Yellow,
            3 => Self::Blue,
            4 => Self::Orange,
            5 => Self::Open,
            _ => panic!("invalid five-fret guitar fret {raw}"),
        }
    }

    fn is_open(self) -> bool {
        self == Self::Open
    }
}

impl GuitarFret for SixFretGuitarFret {
    const GAME_MODE: GameMode = GameMode::SixFretGuitar;

    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Black1,
            1 => Self::Black2,
            2 => Self::Black3,
            3 => Self::White1,
            4 => Self::White2,
            5 => Self::White3,
            6 => Self::Open,
            _ => panic!("invalid six-fret guitar fret {raw}"),
        }
    }

    fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// How a guitar note is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuitarNoteType {
    /// Has to be strummed.
    Strum,
    /// Can be played without strumming if the previous note was hit.
    Hopo,
    /// Can always be played without strumming.
    Tap,
}

/// A guitar note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuitarNote<F> {
    /// The fret.
    pub fret: F,
    /// How the note is played.
    pub note_type: GuitarNoteType,
    /// The sustain continues past the start of the next note.
    pub extended_sustain: bool,
    /// The notes of the chord do not all end together.
    pub disjoint: bool,
}
