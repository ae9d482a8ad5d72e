//! Prelude module for this crate.
//!
//! You can use `use chart_tracks::prelude::*;` to import the commonly used types at once.

pub use crate::{
    chart::{
        Difficulty, GameMode, Instrument, InstrumentDifficulty, InstrumentTrack, Note, NoteFlags, NoteIndex,
        Notes, Phrase, PhraseType, RangeShift, TextEvent,
        drums::{
            DrumColor, DrumNote, DrumNoteType, DrumsTrack, DrumsType, FiveLaneDrumPad, FourLaneDrumPad,
        },
        elite_drums::{
            EliteDrumNote, EliteDrumPad, EliteDrumsChannelFlag, EliteDrumsHatPedalType, EliteDrumsHatState,
        },
        guitar::{FiveFretGuitarFret, GuitarFret, GuitarNote, GuitarNoteType, SixFretGuitarFret},
        lyrics::{LyricEvent, LyricsPhrase, LyricsTrack},
        pro_keys::ProKeysNote,
        vocals::{VocalNote, VocalNoteType, VocalsPart, VocalsPhrase, VocalsRangeShift, VocalsTrack},
    },
    downchart::{DrumsLayout, downchart_to_source, downchart_track},
    load::{ChartLoader, LoadError, LoadOutput, LoadWarning},
    settings::{LoadSettings, StarPowerSource},
    source::{
        ChartSource, GenericChart, GenericNote, SourceDifficulty, SourceInstrument, SourceNoteFlags,
        SourcePhrase, SourceText, SourceTrack, TempoChange, TempoMap,
    },
};
