//! The generic chart representation which the loaders read from.
//!
//! A chart reader (MIDI, `.chart` or anything else) tokenizes a song into [`SourceTrack`]s: per instrument and
//! difficulty a tick-ordered list of [`GenericNote`]s, [`SourcePhrase`]s and [`SourceText`] events. This crate never
//! reads files itself; it only consumes something implementing [`ChartSource`]. [`GenericChart`] is the
//! in-memory implementation used by tests and by readers that do not need their own storage.

pub mod note;
pub mod phrase;
pub(crate) mod stream;
pub mod tempo;

pub use self::{
    note::{GenericNote, SourceNoteFlags, SourceText},
    phrase::{PhraseType, SourcePhrase},
    tempo::{TempoChange, TempoMap},
};

/// An instrument as it is stored in the source chart.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceInstrument {
    /// Five-fret lead guitar.
    Guitar,
    /// Five-fret co-op guitar.
    GuitarCoop,
    /// Five-fret rhythm guitar.
    Rhythm,
    /// Five-fret bass.
    Bass,
    /// Five-fret keys.
    Keys,
    /// Six-fret lead guitar.
    SixFretGuitar,
    /// Six-fret co-op guitar.
    SixFretCoop,
    /// Six-fret rhythm guitar.
    SixFretRhythm,
    /// Six-fret bass.
    SixFretBass,
    /// Four- or five-lane drums.
    Drums,
    /// Elite drums.
    EliteDrums,
    /// Pro keys.
    ProKeys,
    /// Solo vocals.
    Vocals,
    /// First harmony part.
    Harmony1,
    /// Second harmony part.
    Harmony2,
    /// Third harmony part.
    Harmony3,
}

/// A difficulty as it is stored in the source chart. Expert+ content lives in the Expert track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceDifficulty {
    /// Easy.
    Easy,
    /// Medium.
    Medium,
    /// Hard.
    Hard,
    /// Expert, including the instrument-plus notes of Expert+.
    Expert,
}

impl SourceDifficulty {
    /// All difficulties in ascending order.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// The number used for this difficulty by `mix` and `ld_range_shift` text events.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
            Self::Expert => 3,
        }
    }
}

/// Notes, phrases and text events of one instrument at one difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceTrack {
    /// The instrument.
    pub instrument: SourceInstrument,
    /// The difficulty.
    pub difficulty: SourceDifficulty,
    /// Notes ordered by tick.
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: Vec<GenericNote>,
    /// Phrases ordered by tick.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phrases: Vec<SourcePhrase>,
    /// Text events ordered by tick.
    #[cfg_attr(feature = "serde", serde(default))]
    pub text_events: Vec<SourceText>,
}

impl SourceTrack {
    /// Creates an empty track.
    #[must_use]
    pub const fn new(instrument: SourceInstrument, difficulty: SourceDifficulty) -> Self {
        Self {
            instrument,
            difficulty,
            notes: Vec::new(),
            phrases: Vec::new(),
            text_events: Vec::new(),
        }
    }

    /// Adds notes, keeping the track ordered by tick.
    #[must_use]
    pub fn with_notes(mut self, notes: impl IntoIterator<Item = GenericNote>) -> Self {
        self.notes.extend(notes);
        self.notes.sort_by_key(|note| note.tick);
        self
    }

    /// Adds phrases, keeping the track ordered by tick.
    #[must_use]
    pub fn with_phrases(mut self, phrases: impl IntoIterator<Item = SourcePhrase>) -> Self {
        self.phrases.extend(phrases);
        self.phrases.sort_by_key(|phrase| phrase.tick);
        self
    }

    /// Adds text events, keeping the track ordered by tick.
    #[must_use]
    pub fn with_text_events(mut self, events: impl IntoIterator<Item = SourceText>) -> Self {
        self.text_events.extend(events);
        self.text_events.sort_by_key(|event| event.tick);
        self
    }
}

/// `Sync` when the `rayon` feature is enabled, since difficulties are then loaded from several threads.
#[cfg(feature = "rayon")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "rayon")]
impl<T: Sync + ?Sized> MaybeSync for T {}
/// `Sync` when the `rayon` feature is enabled, since difficulties are then loaded from several threads.
#[cfg(not(feature = "rayon"))]
pub trait MaybeSync {}
#[cfg(not(feature = "rayon"))]
impl<T: ?Sized> MaybeSync for T {}

/// Read access to a tokenized chart.
pub trait ChartSource: MaybeSync {
    /// Ticks per beat.
    fn resolution(&self) -> u32;

    /// Converts a tick position into seconds.
    fn tick_to_time(&self, tick: u32) -> f64;

    /// The track of an instrument at a difficulty, if the chart has one.
    fn track(
        &self,
        instrument: SourceInstrument,
        difficulty: SourceDifficulty,
    ) -> Option<&SourceTrack>;

    /// Song-wide text events, such as `phrase_start`, `phrase_end` and lyrics, ordered by tick.
    fn global_events(&self) -> &[SourceText];
}

/// An in-memory [`ChartSource`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericChart {
    /// Resolution and tempo changes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tempo: TempoMap,
    /// All tracks of the chart. At most one track per instrument and difficulty is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tracks: Vec<SourceTrack>,
    /// Song-wide text events.
    #[cfg_attr(feature = "serde", serde(default))]
    pub global_events: Vec<SourceText>,
}

impl GenericChart {
    /// Creates an empty chart.
    #[must_use]
    pub const fn new(tempo: TempoMap) -> Self {
        Self {
            tempo,
            tracks: Vec::new(),
            global_events: Vec::new(),
        }
    }

    /// Adds a track, replacing any existing track of the same instrument and difficulty.
    #[must_use]
    pub fn with_track(mut self, track: SourceTrack) -> Self {
        self.tracks
            .retain(|t| (t.instrument, t.difficulty) != (track.instrument, track.difficulty));
        self.tracks.push(track);
        self
    }

    /// Adds song-wide text events.
    #[must_use]
    pub fn with_global_events(mut self, events: impl IntoIterator<Item = SourceText>) -> Self {
        self.global_events.extend(events);
        self.global_events.sort_by_key(|event| event.tick);
        self
    }
}

impl ChartSource for GenericChart {
    fn resolution(&self) -> u32 {
        self.tempo.resolution()
    }

    fn tick_to_time(&self, tick: u32) -> f64 {
        self.tempo.tick_to_time(tick)
    }

    fn track(
        &self,
        instrument: SourceInstrument,
        difficulty: SourceDifficulty,
    ) -> Option<&SourceTrack> {
        self.tracks
            .iter()
            .find(|track| track.instrument == instrument && track.difficulty == difficulty)
    }

    fn global_events(&self) -> &[SourceText] {
        &self.global_events
    }
}
