//! Vocals and harmony tracks.
//!
//! Notes are grouped by the lyric phrases of their part. Lyric events on the same tick as a note can change it:
//! a trailing `+` makes the note slide from the previous one and `#`, `^` or `*` make it unpitched.

use crate::{
    chart::{
        GameMode, Instrument, Note, NoteIndex, Notes, PhraseType,
        lyrics::LyricEvent,
        vocals::{VocalNote, VocalNoteType, VocalsPart, VocalsPhrase, VocalsRangeShift, VocalsTrack},
    },
    source::{
        ChartSource, GenericNote, SourceDifficulty, SourceInstrument, SourceNoteFlags, SourcePhrase,
        SourceText, SourceTrack,
    },
};

use super::{
    ChartLoader, LoadError, LoadOutput, LoadWarning, convert_text_events, expect_game_mode,
    lyrics::{
        NON_PITCHED_SYMBOLS, PITCH_SLIDE_SYMBOL, RANGE_SHIFT_SYMBOL, is_lyric_symbol, lyric_text,
        strip_for_vocals,
    },
    new_note,
    phrases::PhraseTracker,
    text_events::VOCALS_RANGE_SHIFT,
};

impl<S: ChartSource + ?Sized> ChartLoader<'_, S> {
    /// Loads solo vocals (one part) or harmony (three parts). Vocals are only charted on Expert.
    ///
    /// Harmony parts without lyric phrases of their own use the phrases of the first part.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InstrumentMismatch`] if `instrument` is not a vocals instrument.
    pub fn load_vocals_track(&self, instrument: Instrument) -> Result<LoadOutput<VocalsTrack>, LoadError> {
        expect_game_mode(instrument, GameMode::Vocals)?;
        let sources: &[SourceInstrument] = match instrument {
            Instrument::Harmony => &[
                SourceInstrument::Harmony1,
                SourceInstrument::Harmony2,
                SourceInstrument::Harmony3,
            ],
            _ => &[SourceInstrument::Vocals],
        };
        let tracks: Vec<_> = sources
            .iter()
            .map(|&part| self.source.track(part, SourceDifficulty::Expert))
            .collect();
        let main = tracks.first().copied().flatten();

        let mut warnings = Vec::new();
        let mut parts = Vec::with_capacity(tracks.len());
        for (harmony_part, track) in (0..).zip(&tracks) {
            let Some(track) = *track else {
                parts.push(VocalsPart {
                    harmony_part,
                    phrases: Vec::new(),
                });
                continue;
            };
            let lyric_phrases = lyric_phrases(track, main);
            let loader = PartLoader {
                source: self.source,
                track,
                harmony_part,
                warnings: &mut warnings,
            };
            parts.push(loader.load(&lyric_phrases));
        }

        let track = VocalsTrack {
            instrument,
            range_shifts: main.map_or_else(Vec::new, |main| range_shifts(self.source, main, &parts)),
            text_events: main.map_or_else(Vec::new, |main| {
                convert_text_events(self.source, &main.text_events)
            }),
            parts,
        };
        Ok(LoadOutput { track, warnings })
    }
}

fn lyric_phrases(track: &SourceTrack, main: Option<&SourceTrack>) -> Vec<SourcePhrase> {
    let own = |track: &SourceTrack| {
        track
            .phrases
            .iter()
            .filter(|phrase| phrase.phrase_type == PhraseType::LyricPhrase)
            .copied()
            .collect::<Vec<_>>()
    };
    let phrases = own(track);
    match main {
        Some(main) if phrases.is_empty() => own(main),
        _ => phrases,
    }
}

/// What the lyric on the tick of a note does to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LyricModifier {
    #[default]
    None,
    NonPitched,
    PitchSlide,
}

struct PartLoader<'a, S: ?Sized> {
    source: &'a S,
    track: &'a SourceTrack,
    harmony_part: u8,
    warnings: &'a mut Vec<LoadWarning>,
}

impl<S: ChartSource + ?Sized> PartLoader<'_, S> {
    fn load(mut self, lyric_phrases: &[SourcePhrase]) -> VocalsPart {
        let track = self.track;
        let mut tracker = PhraseTracker::new(&track.phrases);
        let mut note_cursor = 0;
        let mut text_cursor = 0;
        let mut phrases = Vec::new();

        for phrase in lyric_phrases {
            tracker.update(phrase.tick);
            let end = phrase.end();
            let mut notes = Notes::new();
            let mut lyrics: Vec<LyricEvent> = Vec::new();
            let mut previous: Option<NoteIndex> = None;

            while let Some(source_note) = track.notes.get(note_cursor) {
                if source_note.tick >= end {
                    break;
                }
                note_cursor += 1;
                if source_note.tick < phrase.tick {
                    self.warn(LoadWarning::VocalNoteBeforePhrase {
                        tick: source_note.tick,
                        phrase_tick: phrase.tick,
                    });
                    continue;
                }

                let modifier = self.collect_lyrics(source_note.tick, &mut text_cursor, &mut lyrics);
                let note = self.vocal_note(source_note, modifier);
                match previous {
                    Some(parent) if modifier == LyricModifier::PitchSlide => {
                        notes.push_child(parent, note);
                    }
                    _ => previous = Some(notes.push_chained(note, 0)),
                }
            }

            if notes.is_empty() {
                continue;
            }
            let time = self.source.tick_to_time(phrase.tick);
            phrases.push(VocalsPhrase {
                time,
                time_length: self.source.tick_to_time(end) - time,
                tick: phrase.tick,
                tick_length: phrase.length,
                star_power: tracker
                    .current(PhraseType::StarPower)
                    .is_some_and(|star_power| phrase.tick < star_power.end()),
                notes,
                lyrics,
            });
        }

        VocalsPart {
            harmony_part: self.harmony_part,
            phrases,
        }
    }

    /// Adds the lyrics up to `tick` to the phrase and returns the modifier of the lyric on `tick`.
    fn collect_lyrics(&self, tick: u32, cursor: &mut usize, lyrics: &mut Vec<LyricEvent>) -> LyricModifier {
        let mut modifier = LyricModifier::None;
        while let Some(event) = self.track.text_events.get(*cursor) {
            if event.tick > tick {
                break;
            }
            *cursor += 1;
            let Some(mut lyric) = lyric_text(&event.text).filter(|lyric| !lyric.is_empty()) else {
                continue;
            };

            // Some charts put the hyphen of a sliding syllable on the slide instead of the syllable.
            if (lyric == "+-" || lyric == "-+")
                && let Some(last) = lyrics.last_mut()
                && !last.text.ends_with('-')
            {
                last.text.push('-');
                lyric = "+";
            }

            if event.tick == tick {
                modifier = lyric_modifier(lyric);
            }

            let text = strip_for_vocals(lyric);
            if text.trim().is_empty() {
                continue;
            }
            lyrics.push(LyricEvent {
                text,
                join_with_next: false,
                time: self.source.tick_to_time(event.tick),
                tick: event.tick,
            });
        }
        modifier
    }

    fn vocal_note(&self, note: &GenericNote, modifier: LyricModifier) -> Note<VocalNote> {
        let percussion = note.has(SourceNoteFlags::VOCALS_PERCUSSION);
        let data = VocalNote {
            pitch: (!percussion && modifier != LyricModifier::NonPitched).then(|| f32::from(note.raw)),
            note_type: if percussion {
                VocalNoteType::Percussion
            } else {
                VocalNoteType::Lyric
            },
            harmony_part: self.harmony_part,
        };
        new_note(self.source, data, note.tick, note.length)
    }

    fn warn(&mut self, warning: LoadWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// The modifier of the trailing symbols of a lyric. The leftmost modifier symbol wins.
fn lyric_modifier(lyric: &str) -> LyricModifier {
    lyric
        .chars()
        .rev()
        .take_while(|&c| is_lyric_symbol(c))
        .fold(LyricModifier::None, |modifier, c| {
            if c == PITCH_SLIDE_SYMBOL {
                LyricModifier::PitchSlide
            } else if NON_PITCHED_SYMBOLS.contains(&c) {
                LyricModifier::NonPitched
            } else {
                modifier
            }
        })
}

/// Checks whether an event of the main part starts a new pitch range window.
fn is_range_shift_marker(event: &SourceText) -> bool {
    event.text.trim() == VOCALS_RANGE_SHIFT
        || lyric_text(&event.text).is_some_and(|lyric| lyric.contains(RANGE_SHIFT_SYMBOL))
}

/// Splits the song at the range shift markers of the main part and finds the pitch range of every window.
///
/// The first window starts at the first pitched note. Windows without pitched notes are left out.
fn range_shifts<S: ChartSource + ?Sized>(
    source: &S,
    main: &SourceTrack,
    parts: &[VocalsPart],
) -> Vec<VocalsRangeShift> {
    let mut pitched: Vec<_> = parts
        .iter()
        .flat_map(|part| &part.phrases)
        .flat_map(|phrase| phrase.notes.iter())
        .filter_map(|note| note.data.pitch.map(|pitch| (note.tick, note.tick_end(), pitch)))
        .collect();
    pitched.sort_by_key(|&(tick, _, _)| tick);
    let Some(&(first_tick, _, _)) = pitched.first() else {
        return Vec::new();
    };
    let last_end = pitched.iter().map(|&(_, end, _)| end).max().unwrap_or(first_tick);

    let mut starts: Vec<u32> = main
        .text_events
        .iter()
        .filter(|event| is_range_shift_marker(event))
        .map(|event| event.tick)
        .filter(|&tick| tick > first_tick)
        .collect();
    starts.dedup();
    starts.insert(0, first_tick);

    let mut shifts = Vec::new();
    let mut cursor = 0;
    for (i, &start) in starts.iter().enumerate() {
        let next = starts.get(i + 1).copied();
        let mut range: Option<(f32, f32)> = None;
        while let Some(&(tick, _, pitch)) = pitched.get(cursor) {
            if next.is_some_and(|next| tick >= next) {
                break;
            }
            cursor += 1;
            range = Some(range.map_or((pitch, pitch), |(min, max)| (min.min(pitch), max.max(pitch))));
        }
        let Some((minimum_pitch, maximum_pitch)) = range else {
            continue;
        };
        let end = next.map_or(last_end, |next| next - 1);
        let time = source.tick_to_time(start);
        shifts.push(VocalsRangeShift {
            time,
            time_length: source.tick_to_time(end) - time,
            tick: start,
            tick_length: end - start,
            minimum_pitch,
            maximum_pitch,
        });
    }
    shifts
}
