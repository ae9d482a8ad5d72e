//! Derivation of playable tracks from a [`ChartSource`].
//!
//! [`ChartLoader`] reads the generic source tracks of a chart and derives one [`InstrumentTrack`] per instrument.
//! Every difficulty goes through the same two passes:
//!
//! 1. Walk the source notes in tick order, derive the instrument-specific payload of every note and chain it into
//!    chords with [`Notes::push_chained`](crate::chart::Notes::push_chained).
//! 2. Walk the finished chords and derive star power and solo flags from the phrases around them.
//!
//! Loading never fails on malformed content; irregularities are reported as [`LoadWarning`]s in the
//! [`LoadOutput`] and through the `log` facade. Only asking for a track with the wrong kind of instrument is an
//! error.

pub mod drums;
pub mod elite_drums;
pub mod guitar;
pub mod lyrics;
pub(crate) mod phrases;
pub mod pro_keys;
pub(crate) mod text_events;
pub mod vocals;

use thiserror::Error;

use crate::{
    chart::{
        Difficulty, GameMode, Instrument, InstrumentDifficulty, InstrumentTrack, Note, Notes, Phrase,
        PhraseType, RangeShift, TextEvent,
    },
    settings::LoadSettings,
    source::{
        ChartSource, GenericNote, SourceNoteFlags, SourcePhrase, SourceText, SourceTrack,
        stream::NoteStream,
    },
};

use self::phrases::{PhraseTracker, apply_general_flags, effective_phrases, is_closest_to_end};

/// An error occurred when calling a loader with an unsuitable instrument.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadError {
    /// The instrument is not played the way the loader expects.
    #[error("instrument {instrument:?} is not a {expected:?} instrument")]
    InstrumentMismatch {
        /// The requested instrument.
        instrument: Instrument,
        /// The game mode the loader handles.
        expected: GameMode,
    },
}

/// A content irregularity which was tolerated while loading.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadWarning {
    /// A vocals note starts before the phrase it would belong to, so it was skipped.
    #[error("vocals note at tick {tick} starts before its phrase at tick {phrase_tick}")]
    VocalNoteBeforePhrase {
        /// Tick of the note.
        tick: u32,
        /// Tick of the phrase.
        phrase_tick: u32,
    },
    /// A lyrics phrase was started while another one was still open.
    #[error("duplicate phrase start at tick {tick}")]
    DuplicatePhraseStart {
        /// Tick of the marker.
        tick: u32,
    },
    /// A lyrics phrase was ended while none was open.
    #[error("duplicate phrase end at tick {tick}")]
    DuplicatePhraseEnd {
        /// Tick of the marker.
        tick: u32,
    },
    /// A range shift event or phrase could not be used.
    #[error("invalid range shift at tick {tick}: {reason}")]
    InvalidRangeShift {
        /// Tick of the event.
        tick: u32,
        /// What is wrong with it.
        reason: String,
    },
}

/// A loaded track and the warnings collected while loading it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutput<T> {
    /// The loaded track.
    pub track: T,
    /// Warnings that occurred during loading.
    pub warnings: Vec<LoadWarning>,
}

impl<T> LoadOutput<T> {
    pub(crate) const fn new(track: T) -> Self {
        Self {
            track,
            warnings: Vec::new(),
        }
    }

    /// Records and logs a warning.
    pub(crate) fn warn(&mut self, warning: LoadWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// Derives playable tracks from a chart.
///
/// The loader holds no state between calls; loading the same track twice gives equal results.
#[derive(Debug, Clone, Copy)]
pub struct ChartLoader<'a, S: ?Sized> {
    source: &'a S,
    settings: LoadSettings,
}

impl<'a, S: ChartSource + ?Sized> ChartLoader<'a, S> {
    /// Creates a loader reading from `source`.
    #[must_use]
    pub const fn new(source: &'a S, settings: LoadSettings) -> Self {
        Self { source, settings }
    }

    /// The chart this loader reads from.
    #[must_use]
    pub const fn source(&self) -> &'a S {
        self.source
    }

    /// The settings in use.
    #[must_use]
    pub const fn settings(&self) -> &LoadSettings {
        &self.settings
    }
}

/// Fails unless `instrument` is played in the `expected` game mode.
pub(crate) fn expect_game_mode(instrument: Instrument, expected: GameMode) -> Result<(), LoadError> {
    if instrument.game_mode() == expected {
        Ok(())
    } else {
        Err(LoadError::InstrumentMismatch {
            instrument,
            expected,
        })
    }
}

/// A note being derived, together with its neighbourhood in the source track.
pub(crate) struct NoteContext<'a> {
    pub(crate) note: &'a GenericNote,
    pub(crate) index: usize,
    pub(crate) stream: &'a NoteStream<'a>,
    pub(crate) phrases: &'a PhraseTracker<'a>,
    pub(crate) resolution: u32,
}

impl<'a> NoteContext<'a> {
    /// The first note of the previous chord.
    pub(crate) fn previous(&self) -> Option<&'a GenericNote> {
        self.stream
            .previous_separate(self.index)
            .and_then(|index| self.stream.get(index))
    }

    /// The first note of the next chord.
    pub(crate) fn next(&self) -> Option<&'a GenericNote> {
        self.stream
            .next_separate(self.index)
            .and_then(|index| self.stream.get(index))
    }

    pub(crate) fn is_chord(&self) -> bool {
        self.stream.is_chord(self.index)
    }

    /// The tick of the chord, which a snapped note takes over.
    pub(crate) fn chord_tick(&self) -> u32 {
        self.chord().next().map_or(self.note.tick, |first| first.tick)
    }

    /// All notes of the chord, this one included.
    pub(crate) fn chord(&self) -> impl Iterator<Item = &'a GenericNote> + '_ {
        self.stream.chord(self.index)
    }

    /// Notes of the chord, this one excluded.
    pub(crate) fn chord_others(&self) -> impl Iterator<Item = &'a GenericNote> + '_ {
        let range = self.stream.chord_range(self.index);
        range
            .filter(move |&index| index != self.index)
            .filter_map(|index| self.stream.get(index))
    }

    /// The previous chord, as all of its notes.
    pub(crate) fn previous_chord(&self) -> impl Iterator<Item = &'a GenericNote> + '_ {
        self.stream
            .previous_separate(self.index)
            .into_iter()
            .flat_map(|index| self.stream.chord(index))
    }

    /// Checks whether this note is the one closest to the end of the current drum fill.
    pub(crate) fn is_star_power_activator(&self) -> bool {
        self.phrases
            .current(PhraseType::DrumFill)
            .is_some_and(|fill| {
                is_closest_to_end(
                    fill,
                    self.note.tick,
                    self.previous().map(|note| note.tick),
                    self.next().map(|note| note.tick),
                    self.resolution,
                )
            })
    }
}

/// Whether the notes of an instrument keep their sustains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sustains {
    Keep,
    Drop,
}

/// The effective sustain length of a source note.
pub(crate) const fn sustain_length(note: &GenericNote, settings: &LoadSettings) -> u32 {
    if note.length <= settings.sustain_cutoff_threshold {
        0
    } else {
        note.length
    }
}

/// Runs both derivation passes over one source track.
pub(crate) fn load_difficulty<S, T>(
    source: &S,
    settings: &LoadSettings,
    instrument: Instrument,
    difficulty: Difficulty,
    track: &SourceTrack,
    sustains: Sustains,
    mut derive: impl FnMut(&NoteContext<'_>) -> T,
) -> InstrumentDifficulty<T>
where
    S: ChartSource + ?Sized,
{
    let phrases = effective_phrases(&track.phrases, settings);
    let expert_plus = difficulty == Difficulty::ExpertPlus;
    let stream = NoteStream::new(
        track
            .notes
            .iter()
            .filter(|note| expert_plus || !note.has(SourceNoteFlags::INSTRUMENT_PLUS)),
        settings.note_snap_threshold,
    );

    let mut chart = InstrumentDifficulty::new(instrument, difficulty);
    let mut tracker = PhraseTracker::new(&phrases);
    for (index, note) in stream.iter() {
        tracker.update(note.tick);
        let context = NoteContext {
            note,
            index,
            stream: &stream,
            phrases: &tracker,
            resolution: source.resolution(),
        };
        let data = derive(&context);
        let length = match sustains {
            Sustains::Keep => sustain_length(note, settings),
            Sustains::Drop => 0,
        };
        chart
            .notes
            .push_chained(new_note(source, data, note.tick, length), settings.note_snap_threshold);
    }
    apply_general_flags(&mut chart.notes, &phrases);

    chart.phrases = phrases
        .iter()
        .map(|phrase| convert_phrase(source, phrase))
        .collect();
    chart.text_events = convert_text_events(source, &track.text_events);
    chart
}

/// Creates an unlinked note with times taken from the tempo map.
pub(crate) fn new_note<S: ChartSource + ?Sized, T>(
    source: &S,
    data: T,
    tick: u32,
    tick_length: u32,
) -> Note<T> {
    let time = source.tick_to_time(tick);
    let time_length = source.tick_to_time(tick.saturating_add(tick_length)) - time;
    Note::new(data, tick, tick_length, time, time_length)
}

pub(crate) fn convert_phrase<S: ChartSource + ?Sized>(source: &S, phrase: &SourcePhrase) -> Phrase {
    let time = source.tick_to_time(phrase.tick);
    Phrase {
        phrase_type: phrase.phrase_type,
        time,
        time_length: source.tick_to_time(phrase.end()) - time,
        tick: phrase.tick,
        tick_length: phrase.length,
    }
}

pub(crate) fn convert_text_events<S: ChartSource + ?Sized>(
    source: &S,
    events: &[SourceText],
) -> Vec<TextEvent> {
    events
        .iter()
        .map(|event| TextEvent {
            text: event.text.clone(),
            time: source.tick_to_time(event.tick),
            tick: event.tick,
        })
        .collect()
}

/// Turns range shift starts `(tick, position, size)` into range shifts. Each one ends a tick before the next one
/// starts; the last one ends with the last note.
pub(crate) fn close_range_shifts<S: ChartSource + ?Sized, T>(
    source: &S,
    starts: &[(u32, u8, u8)],
    notes: &Notes<T>,
) -> Vec<RangeShift> {
    let last_end = notes.last().map_or(0, Note::tick_end);
    starts
        .iter()
        .enumerate()
        .map(|(i, &(tick, position, size))| {
            let end = starts
                .get(i + 1)
                .map_or(last_end, |&(next, _, _)| next.saturating_sub(1));
            let end = end.max(tick);
            let time = source.tick_to_time(tick);
            RangeShift {
                position,
                size,
                time,
                time_length: source.tick_to_time(end) - time,
                tick,
                tick_length: end - tick,
            }
        })
        .collect()
}

/// Loads every difficulty of an instrument which has a source track.
///
/// With the `rayon` feature the difficulties are loaded in parallel.
pub(crate) fn load_difficulties<S, T>(
    source: &S,
    instrument: Instrument,
    load: &DifficultyLoader<'_, T>,
) -> LoadOutput<InstrumentTrack<T>>
where
    S: ChartSource + ?Sized,
    T: Send,
{
    let jobs: Vec<_> = instrument
        .difficulties()
        .iter()
        .filter_map(|&difficulty| {
            source
                .track(instrument.source(), difficulty.source())
                .map(|track| (difficulty, track))
        })
        .collect();

    #[cfg(feature = "rayon")]
    let outputs: Vec<_> = {
        use rayon::prelude::*;
        jobs.into_par_iter()
            .map(|(difficulty, track)| load(difficulty, track))
            .collect()
    };
    #[cfg(not(feature = "rayon"))]
    let outputs: Vec<_> = jobs
        .into_iter()
        .map(|(difficulty, track)| load(difficulty, track))
        .collect();

    let mut output = LoadOutput::new(InstrumentTrack::new(instrument));
    for difficulty in outputs {
        output.warnings.extend(difficulty.warnings);
        output.track.insert(difficulty.track);
    }
    output
}

/// Loads one difficulty from its source track.
#[cfg(feature = "rayon")]
pub(crate) type DifficultyLoader<'f, T> =
    dyn Fn(Difficulty, &SourceTrack) -> LoadOutput<InstrumentDifficulty<T>> + Sync + 'f;
/// Loads one difficulty from its source track.
#[cfg(not(feature = "rayon"))]
pub(crate) type DifficultyLoader<'f, T> =
    dyn Fn(Difficulty, &SourceTrack) -> LoadOutput<InstrumentDifficulty<T>> + 'f;
