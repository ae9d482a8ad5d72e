//! Derived, playable tracks.
//!
//! A track is keyed by [`Instrument`] and holds one [`InstrumentDifficulty`] per [`Difficulty`]. Notes of a
//! difficulty live in a [`Notes`] arena which groups them into chords; the payload type of a note depends on the
//! instrument family:
//!
//! - [`guitar::GuitarNote`] for five- and six-fret guitars and five-fret keys,
//! - [`drums::DrumNote`] for four- and five-lane drums,
//! - [`elite_drums::EliteDrumNote`] for elite drums,
//! - [`pro_keys::ProKeysNote`] for pro keys.
//!
//! Vocals and lyrics have their own phrase-based containers in [`vocals`] and [`lyrics`].

pub mod drums;
pub mod elite_drums;
pub mod guitar;
pub mod lyrics;
pub mod note;
pub mod pro_keys;
pub mod vocals;

use std::collections::BTreeMap;

pub use self::note::{Note, NoteFlags, NoteIndex, Notes};
pub use crate::source::PhraseType;
use crate::source::{SourceDifficulty, SourceInstrument};

/// A playable difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    Medium,
    /// Hard.
    Hard,
    /// Expert.
    Expert,
    /// Expert with double kick notes. Only drum instruments have it.
    ExpertPlus,
}

impl Difficulty {
    /// Difficulties of instruments without an Expert+ chart.
    pub const STANDARD: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];
    /// Difficulties of drum instruments.
    pub const WITH_EXPERT_PLUS: [Self; 5] = [
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::Expert,
        Self::ExpertPlus,
    ];

    /// The source difficulty this difficulty is read from.
    #[must_use]
    pub const fn source(self) -> SourceDifficulty {
        match self {
            Self::Easy => SourceDifficulty::Easy,
            Self::Medium => SourceDifficulty::Medium,
            Self::Hard => SourceDifficulty::Hard,
            Self::Expert | Self::ExpertPlus => SourceDifficulty::Expert,
        }
    }
}

impl Difficulty {
    /// The difficulty numbered from 0 (Easy) to 3 (Expert) in text events.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Easy),
            1 => Some(Self::Medium),
            2 => Some(Self::Hard),
            3 => Some(Self::Expert),
            _ => None,
        }
    }
}

impl From<SourceDifficulty> for Difficulty {
    fn from(value: SourceDifficulty) -> Self {
        match value {
            SourceDifficulty::Easy => Self::Easy,
            SourceDifficulty::Medium => Self::Medium,
            SourceDifficulty::Hard => Self::Hard,
            SourceDifficulty::Expert => Self::Expert,
        }
    }
}

/// The way an instrument is played.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    /// Five frets plus open notes.
    FiveFretGuitar,
    /// Two rows of three frets plus open notes.
    SixFretGuitar,
    /// Kick plus four lanes, with or without cymbals.
    FourLaneDrums,
    /// Kick plus five lanes.
    FiveLaneDrums,
    /// Full drum kit.
    EliteDrums,
    /// 25-key keyboard.
    ProKeys,
    /// Singing.
    Vocals,
}

/// A playable instrument.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instrument {
    /// Five-fret lead guitar.
    FiveFretGuitar,
    /// Five-fret bass.
    FiveFretBass,
    /// Five-fret rhythm guitar.
    FiveFretRhythm,
    /// Five-fret co-op guitar.
    FiveFretCoopGuitar,
    /// Keys played with five-fret rules.
    Keys,
    /// Six-fret lead guitar.
    SixFretGuitar,
    /// Six-fret bass.
    SixFretBass,
    /// Six-fret rhythm guitar.
    SixFretRhythm,
    /// Six-fret co-op guitar.
    SixFretCoopGuitar,
    /// Four-lane drums without cymbals.
    FourLaneDrums,
    /// Four-lane drums with cymbals.
    ProDrums,
    /// Five-lane drums.
    FiveLaneDrums,
    /// Elite drums.
    EliteDrums,
    /// Pro keys.
    ProKeys,
    /// Solo vocals.
    Vocals,
    /// Three-part harmony vocals.
    Harmony,
}

impl Instrument {
    /// The way this instrument is played.
    #[must_use]
    pub const fn game_mode(self) -> GameMode {
        match self {
            Self::FiveFretGuitar
            | Self::FiveFretBass
            | Self::FiveFretRhythm
            | Self::FiveFretCoopGuitar
            | Self::Keys => GameMode::FiveFretGuitar,
            Self::SixFretGuitar
            | Self::SixFretBass
            | Self::SixFretRhythm
            | Self::SixFretCoopGuitar => GameMode::SixFretGuitar,
            Self::FourLaneDrums | Self::ProDrums => GameMode::FourLaneDrums,
            Self::FiveLaneDrums => GameMode::FiveLaneDrums,
            Self::EliteDrums => GameMode::EliteDrums,
            Self::ProKeys => GameMode::ProKeys,
            Self::Vocals | Self::Harmony => GameMode::Vocals,
        }
    }

    /// The source track this instrument is read from. Harmony is read from three source tracks and returns its
    /// first part here.
    #[must_use]
    pub const fn source(self) -> SourceInstrument {
        match self {
            Self::FiveFretGuitar => SourceInstrument::Guitar,
            Self::FiveFretBass => SourceInstrument::Bass,
            Self::FiveFretRhythm => SourceInstrument::Rhythm,
            Self::FiveFretCoopGuitar => SourceInstrument::GuitarCoop,
            Self::Keys => SourceInstrument::Keys,
            Self::SixFretGuitar => SourceInstrument::SixFretGuitar,
            Self::SixFretBass => SourceInstrument::SixFretBass,
            Self::SixFretRhythm => SourceInstrument::SixFretRhythm,
            Self::SixFretCoopGuitar => SourceInstrument::SixFretCoop,
            Self::FourLaneDrums | Self::ProDrums | Self::FiveLaneDrums => SourceInstrument::Drums,
            Self::EliteDrums => SourceInstrument::EliteDrums,
            Self::ProKeys => SourceInstrument::ProKeys,
            Self::Vocals => SourceInstrument::Vocals,
            Self::Harmony => SourceInstrument::Harmony1,
        }
    }

    /// Difficulties a track of this instrument can have.
    #[must_use]
    pub const fn difficulties(self) -> &'static [Difficulty] {
        match self.game_mode() {
            GameMode::FourLaneDrums | GameMode::FiveLaneDrums | GameMode::EliteDrums => {
                &Difficulty::WITH_EXPERT_PLUS
            }
            _ => &Difficulty::STANDARD,
        }
    }
}

/// A phrase of a derived track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phrase {
    /// Kind of the phrase.
    pub phrase_type: PhraseType,
    /// Start in seconds.
    pub time: f64,
    /// Length in seconds.
    pub time_length: f64,
    /// Start in ticks.
    pub tick: u32,
    /// Length in ticks.
    pub tick_length: u32,
}

/// A text event of a derived track.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEvent {
    /// The text.
    pub text: String,
    /// Position in seconds.
    pub time: f64,
    /// Position in ticks.
    pub tick: u32,
}

/// A window of the lanes or keys which is visible during a part of the song.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeShift {
    /// The lowest visible lane or key.
    pub position: u8,
    /// The number of visible lanes or keys.
    pub size: u8,
    /// Start in seconds.
    pub time: f64,
    /// Length in seconds.
    pub time_length: f64,
    /// Start in ticks.
    pub tick: u32,
    /// Length in ticks.
    pub tick_length: u32,
}

/// Notes, phrases and events of one instrument at one difficulty.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentDifficulty<T> {
    /// The instrument.
    pub instrument: Instrument,
    /// The difficulty.
    pub difficulty: Difficulty,
    /// The notes, grouped into chords.
    pub notes: Notes<T>,
    /// Phrases ordered by tick.
    pub phrases: Vec<Phrase>,
    /// Text events ordered by tick.
    pub text_events: Vec<TextEvent>,
    /// Range shifts ordered by tick.
    pub range_shifts: Vec<RangeShift>,
}

impl<T> InstrumentDifficulty<T> {
    /// Creates an empty difficulty.
    #[must_use]
    pub const fn new(instrument: Instrument, difficulty: Difficulty) -> Self {
        Self {
            instrument,
            difficulty,
            notes: Notes::new(),
            phrases: Vec::new(),
            text_events: Vec::new(),
            range_shifts: Vec::new(),
        }
    }

    /// Phrases of a kind, ordered by tick.
    pub fn phrases_of(&self, phrase_type: PhraseType) -> impl Iterator<Item = &Phrase> + '_ {
        self.phrases
            .iter()
            .filter(move |phrase| phrase.phrase_type == phrase_type)
    }
}

/// All difficulties of one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentTrack<T> {
    /// The instrument.
    pub instrument: Instrument,
    difficulties: BTreeMap<Difficulty, InstrumentDifficulty<T>>,
}

impl<T> InstrumentTrack<T> {
    /// Creates a track without difficulties.
    #[must_use]
    pub const fn new(instrument: Instrument) -> Self {
        Self {
            instrument,
            difficulties: BTreeMap::new(),
        }
    }

    /// Gets the chart of a difficulty.
    #[must_use]
    pub fn get_difficulty(&self, difficulty: Difficulty) -> Option<&InstrumentDifficulty<T>> {
        self.difficulties.get(&difficulty)
    }

    /// Gets the mutable chart of a difficulty.
    pub fn get_difficulty_mut(
        &mut self,
        difficulty: Difficulty,
    ) -> Option<&mut InstrumentDifficulty<T>> {
        self.difficulties.get_mut(&difficulty)
    }

    /// Adds or replaces the chart of a difficulty.
    pub fn insert(&mut self, chart: InstrumentDifficulty<T>) {
        self.difficulties.insert(chart.difficulty, chart);
    }

    /// All difficulties in ascending order.
    pub fn difficulties(&self) -> impl Iterator<Item = &InstrumentDifficulty<T>> + '_ {
        self.difficulties.values()
    }

    /// Checks whether no difficulty has any note.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.difficulties
            .values()
            .all(|difficulty| difficulty.notes.is_empty())
    }
}
