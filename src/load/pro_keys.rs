//! Pro keys tracks.

use crate::{
    chart::{
        GameMode, Instrument, InstrumentTrack, PhraseType,
        pro_keys::{KEY_COUNT, ProKeysNote, VISIBLE_KEY_COUNT, range_shift_lowest_key},
    },
    settings::LoadSettings,
    source::{ChartSource, SourceTrack},
};

use super::{
    ChartLoader, LoadError, LoadOutput, LoadWarning, NoteContext, Sustains, close_range_shifts,
    expect_game_mode,
    guitar::{is_disjoint, is_extended_sustain},
    load_difficulties, load_difficulty,
};

impl<S: ChartSource + ?Sized> ChartLoader<'_, S> {
    /// Loads a pro keys track, including its range shifts.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InstrumentMismatch`] if `instrument` is not a pro keys instrument.
    pub fn load_pro_keys_track(
        &self,
        instrument: Instrument,
    ) -> Result<LoadOutput<InstrumentTrack<ProKeysNote>>, LoadError> {
        expect_game_mode(instrument, GameMode::ProKeys)?;
        let settings = &self.settings;
        Ok(load_difficulties(
            self.source,
            instrument,
            &|difficulty, track| {
                let chart = load_difficulty(
                    self.source,
                    settings,
                    instrument,
                    difficulty,
                    track,
                    Sustains::Keep,
                    |context| derive_pro_keys_note(context, settings),
                );
                let mut output = LoadOutput::new(chart);
                let starts = range_shift_starts(track, &mut output);
                output.track.range_shifts =
                    close_range_shifts(self.source, &starts, &output.track.notes);
                output
            },
        ))
    }
}

fn derive_pro_keys_note(context: &NoteContext<'_>, settings: &LoadSettings) -> ProKeysNote {
    let key = context.note.raw;
    assert!(key < KEY_COUNT, "invalid pro keys key {key}");
    ProKeysNote {
        key,
        extended_sustain: is_extended_sustain(context, settings),
        disjoint: is_disjoint(context, settings),
        glissando: context
            .phrases
            .active(PhraseType::ProKeysGlissando, context.note.tick)
            .is_some(),
    }
}

fn range_shift_starts<T>(track: &SourceTrack, output: &mut LoadOutput<T>) -> Vec<(u32, u8, u8)> {
    let mut starts = Vec::new();
    for phrase in &track.phrases {
        let PhraseType::ProKeysRangeShift(range) = phrase.phrase_type else {
            continue;
        };
        let Some(lowest) = range_shift_lowest_key(range) else {
            output.warn(LoadWarning::InvalidRangeShift {
                tick: phrase.tick,
                reason: format!("unknown pro keys range {range}"),
            });
            continue;
        };
        starts.push((phrase.tick, lowest, VISIBLE_KEY_COUNT));
    }
    starts
}
