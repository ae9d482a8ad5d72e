//! Elite drums tracks.

use crate::{
    chart::{
        GameMode, Instrument, InstrumentTrack,
        elite_drums::{
            EliteDrumNote, EliteDrumPad, EliteDrumsChannelFlag, EliteDrumsHatPedalType,
            EliteDrumsHatState,
        },
    },
    source::{ChartSource, GenericNote, SourceNoteFlags},
};

use super::{
    ChartLoader, LoadError, LoadOutput, NoteContext, Sustains, drums::note_type, expect_game_mode,
    load_difficulties, load_difficulty,
};

impl<S: ChartSource + ?Sized> ChartLoader<'_, S> {
    /// Loads an elite drums track. Double kick notes are only present at Expert+.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InstrumentMismatch`] if `instrument` is not an elite drums instrument.
    pub fn load_elite_drums_track(
        &self,
        instrument: Instrument,
    ) -> Result<LoadOutput<InstrumentTrack<EliteDrumNote>>, LoadError> {
        expect_game_mode(instrument, GameMode::EliteDrums)?;
        let settings = &self.settings;
        Ok(load_difficulties(
            self.source,
            instrument,
            &|difficulty, track| {
                LoadOutput::new(load_difficulty(
                    self.source,
                    settings,
                    instrument,
                    difficulty,
                    track,
                    Sustains::Drop,
                    derive_elite_drum_note,
                ))
            },
        ))
    }
}

fn derive_elite_drum_note(context: &NoteContext<'_>) -> EliteDrumNote {
    let note = context.note;
    let pad = EliteDrumPad::from_raw(note.raw);
    EliteDrumNote {
        pad,
        dynamics: note_type(note),
        hat_state: hat_state(note, pad),
        hat_pedal_type: hat_pedal_type(note, pad),
        channel: channel(note, pad),
        flam: note.has(SourceNoteFlags::FLAM),
        double_kick: pad == EliteDrumPad::Kick && note.has(SourceNoteFlags::INSTRUMENT_PLUS),
        star_power_activator: context.is_star_power_activator(),
    }
}

const fn hat_state(note: &GenericNote, pad: EliteDrumPad) -> EliteDrumsHatState {
    if !matches!(pad, EliteDrumPad::HiHat) {
        EliteDrumsHatState::Indifferent
    } else if note.has(SourceNoteFlags::HAT_CLOSED) {
        EliteDrumsHatState::Closed
    } else if note.has(SourceNoteFlags::HAT_INDIFFERENT) {
        EliteDrumsHatState::Indifferent
    } else {
        EliteDrumsHatState::Open
    }
}

const fn hat_pedal_type(note: &GenericNote, pad: EliteDrumPad) -> Option<EliteDrumsHatPedalType> {
    if !matches!(pad, EliteDrumPad::HatPedal) {
        None
    } else if note.has(SourceNoteFlags::INVISIBLE_TERMINATOR) {
        Some(EliteDrumsHatPedalType::InvisibleTerminator)
    } else if note.has(SourceNoteFlags::SPLASH) {
        Some(EliteDrumsHatPedalType::Splash)
    } else {
        Some(EliteDrumsHatPedalType::Stomp)
    }
}

/// The channel flag of a note, or [`EliteDrumsChannelFlag::None`] if the pad can not be forced to that lane.
fn channel(note: &GenericNote, pad: EliteDrumPad) -> EliteDrumsChannelFlag {
    let flag = [
        (SourceNoteFlags::CHANNEL_RED, EliteDrumsChannelFlag::Red),
        (SourceNoteFlags::CHANNEL_YELLOW, EliteDrumsChannelFlag::Yellow),
        (SourceNoteFlags::CHANNEL_BLUE, EliteDrumsChannelFlag::Blue),
        (SourceNoteFlags::CHANNEL_GREEN, EliteDrumsChannelFlag::Green),
    ]
    .into_iter()
    .find_map(|(source, flag)| note.has(source).then_some(flag))
    .unwrap_or_default();

    let legal = match (pad, flag) {
        (EliteDrumPad::Kick, _) => false,
        (
            EliteDrumPad::Snare | EliteDrumPad::Tom1 | EliteDrumPad::Tom2 | EliteDrumPad::Tom3,
            EliteDrumsChannelFlag::Red,
        ) => true,
        (_, EliteDrumsChannelFlag::Red) => false,
        _ => true,
    };
    if legal {
        flag
    } else {
        log::debug!("ignoring channel {flag:?} on {pad:?} at tick {}", note.tick);
        EliteDrumsChannelFlag::None
    }
}
