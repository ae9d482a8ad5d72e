//! Five- and six-fret guitar tracks.

use crate::{
    chart::{
        Difficulty, GameMode, Instrument, InstrumentDifficulty, InstrumentTrack,
        guitar::{GuitarFret, GuitarNote, GuitarNoteType},
    },
    settings::LoadSettings,
    source::{ChartSource, SourceNoteFlags, SourceTrack},
};

use super::{
    ChartLoader, LoadError, LoadOutput, LoadWarning, NoteContext, Sustains, close_range_shifts,
    expect_game_mode, load_difficulties, load_difficulty, sustain_length,
    text_events::{FIVE_FRET_RANGE_SHIFT, parse_five_fret_range_shift},
};

impl<S: ChartSource + ?Sized> ChartLoader<'_, S> {
    /// Loads a five- or six-fret guitar track. The fret type `F` selects which.
    ///
    /// ```
    /// use chart_tracks::prelude::*;
    ///
    /// let chart = GenericChart::default().with_track(
    ///     SourceTrack::new(SourceInstrument::Guitar, SourceDifficulty::Expert)
    ///         .with_notes([GenericNote::new(0, 0), GenericNote::new(480, 1)]),
    /// );
    /// let loader = ChartLoader::new(&chart, LoadSettings::default());
    /// let output = loader
    ///     .load_guitar_track::<FiveFretGuitarFret>(Instrument::FiveFretGuitar)
    ///     .unwrap();
    /// let expert = output.track.get_difficulty(Difficulty::Expert).unwrap();
    /// assert_eq!(expert.notes.len(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InstrumentMismatch`] if `instrument` is not played with frets of type `F`.
    pub fn load_guitar_track<F: GuitarFret>(
        &self,
        instrument: Instrument,
    ) -> Result<LoadOutput<InstrumentTrack<GuitarNote<F>>>, LoadError> {
        expect_game_mode(instrument, F::GAME_MODE)?;
        let settings = &self.settings;
        let hopo_threshold = settings.resolved_hopo_threshold(self.source.resolution());
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
                    |context| derive_guitar_note::<F>(context, settings, hopo_threshold),
                );
                let mut output = LoadOutput::new(chart);
                if F::GAME_MODE == GameMode::FiveFretGuitar {
                    add_five_fret_range_shifts(self.source, track, &mut output);
                }
                output
            },
        ))
    }
}

fn derive_guitar_note<F: GuitarFret>(
    context: &NoteContext<'_>,
    settings: &LoadSettings,
    hopo_threshold: u32,
) -> GuitarNote<F> {
    let fret = F::from_raw(context.note.raw);
    GuitarNote {
        fret,
        note_type: note_type(context, fret, settings, hopo_threshold),
        extended_sustain: is_extended_sustain(context, settings),
        disjoint: is_disjoint(context, settings),
    }
}

fn note_type<F: GuitarFret>(
    context: &NoteContext<'_>,
    fret: F,
    settings: &LoadSettings,
    hopo_threshold: u32,
) -> GuitarNoteType {
    let note = context.note;
    if note.has(SourceNoteFlags::TAP) && !fret.is_open() {
        return GuitarNoteType::Tap;
    }
    if note.has(SourceNoteFlags::FORCE_HOPO) {
        return GuitarNoteType::Hopo;
    }
    if note.has(SourceNoteFlags::FORCE_STRUM) {
        return GuitarNoteType::Strum;
    }

    let natural = is_natural_hopo(context, hopo_threshold);
    let forced = note.has(SourceNoteFlags::FORCED);
    if natural == forced {
        return GuitarNoteType::Strum;
    }
    // A natural HOPO onto a fret the previous chord already holds can not be played without strumming.
    if natural
        && settings.chord_hopo_cancellation
        && context
            .previous_chord()
            .any(|previous| previous.raw == note.raw)
    {
        return GuitarNoteType::Strum;
    }
    GuitarNoteType::Hopo
}

fn is_natural_hopo(context: &NoteContext<'_>, hopo_threshold: u32) -> bool {
    if context.is_chord() {
        return false;
    }
    let Some(previous) = context.previous() else {
        return false;
    };
    let previous_is_chord = context.previous_chord().nth(1).is_some();
    (previous_is_chord || previous.raw != context.note.raw)
        && context.chord_tick() - previous.tick <= hopo_threshold
}

/// The longest sustain of the chord overruns the next chord by more than the snap threshold. Every member of a
/// disjoint chord is flagged once its longest sustain does.
pub(crate) fn is_extended_sustain(context: &NoteContext<'_>, settings: &LoadSettings) -> bool {
    let longest = context
        .chord()
        .map(|member| sustain_length(member, settings))
        .max()
        .unwrap_or_else(|| sustain_length(context.note, settings));
    let end = context.chord_tick().saturating_add(longest);
    context
        .next()
        .is_some_and(|next| end > next.tick.saturating_add(settings.note_snap_threshold))
}

/// Some other note of the chord has a different sustain.
pub(crate) fn is_disjoint(context: &NoteContext<'_>, settings: &LoadSettings) -> bool {
    let length = sustain_length(context.note, settings);
    context
        .chord_others()
        .any(|other| sustain_length(other, settings) != length)
}

fn add_five_fret_range_shifts<S: ChartSource + ?Sized, F>(
    source: &S,
    track: &SourceTrack,
    output: &mut LoadOutput<InstrumentDifficulty<GuitarNote<F>>>,
) {
    let difficulty = output.track.difficulty;
    let mut starts = Vec::new();
    for event in &track.text_events {
        if !event.text.starts_with(FIVE_FRET_RANGE_SHIFT) {
            continue;
        }
        let Some(shift) = parse_five_fret_range_shift(&event.text) else {
            output.warn(LoadWarning::InvalidRangeShift {
                tick: event.tick,
                reason: format!("malformed event `{}`", event.text),
            });
            continue;
        };
        if Difficulty::from_index(shift.difficulty) != Some(difficulty) {
            continue;
        }
        let size = shift.size.unwrap_or(match difficulty {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            _ => 5,
        });
        if !(1..=5).contains(&shift.range) || u16::from(shift.range) + u16::from(size) > 6 {
            output.warn(LoadWarning::InvalidRangeShift {
                tick: event.tick,
                reason: format!("{size} lanes from lane {} do not fit", shift.range),
            });
            continue;
        }
        starts.push((event.tick, shift.range, size));
    }
    output.track.range_shifts = close_range_shifts(source, &starts, &output.track.notes);
}
