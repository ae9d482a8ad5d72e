//! Vocals parts, phrases and notes.

use super::{Instrument, Notes, TextEvent, lyrics::LyricEvent};

/// What a vocals note asks the singer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocalNoteType {
    /// Sing a syllable.
    Lyric,
    /// Hit the microphone.
    Percussion,
}

/// A vocals note.
///
/// A note which slides from the pitch of a previous note is a child of that note in the [`Notes`] arena of its
/// phrase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VocalNote {
    /// The MIDI pitch, or `None` for spoken and percussion notes.
    pub pitch: Option<f32>,
    /// What the note asks the singer to do.
    pub note_type: VocalNoteType,
    /// Harmony part from 0 to 2. Always 0 for solo vocals.
    pub harmony_part: u8,
}

impl VocalNote {
    /// Checks whether the pitch of the note is ignored.
    #[must_use]
    pub const fn is_non_pitched(&self) -> bool {
        self.pitch.is_none()
    }
}

/// A vocals phrase: one line of lyrics on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct VocalsPhrase {
    /// Start in seconds.
    pub time: f64,
    /// Length in seconds.
    pub time_length: f64,
    /// Start in ticks.
    pub tick: u32,
    /// Length in ticks.
    pub tick_length: u32,
    /// The phrase is a star power phrase.
    pub star_power: bool,
    /// The notes, with pitch slides chained as children.
    pub notes: Notes<VocalNote>,
    /// The syllables to display.
    pub lyrics: Vec<LyricEvent>,
}

/// One singer's part.
#[derive(Debug, Clone, PartialEq)]
pub struct VocalsPart {
    /// Harmony part from 0 to 2. Always 0 for solo vocals.
    pub harmony_part: u8,
    /// Phrases ordered by tick. Phrases without notes are left out.
    pub phrases: Vec<VocalsPhrase>,
}

/// The range of pitches to display during a part of the song.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VocalsRangeShift {
    /// Start in seconds.
    pub time: f64,
    /// Length in seconds.
    pub time_length: f64,
    /// Start in ticks.
    pub tick: u32,
    /// Length in ticks.
    pub tick_length: u32,
    /// The lowest pitch of the range.
    pub minimum_pitch: f32,
    /// The highest pitch of the range.
    pub maximum_pitch: f32,
}

/// All parts of a vocals instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct VocalsTrack {
    /// [`Instrument::Vocals`] or [`Instrument::Harmony`].
    pub instrument: Instrument,
    /// One part for solo vocals, three for harmony.
    pub parts: Vec<VocalsPart>,
    /// Pitch ranges ordered by tick.
    pub range_shifts: Vec<VocalsRangeShift>,
    /// Text events of the first part.
    pub text_events: Vec<TextEvent>,
}

impl VocalsTrack {
    /// Checks whether no part has any phrase.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| part.phrases.is_empty())
    }
}
