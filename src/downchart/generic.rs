//! Downcharting into generic drums tracks, for charts which only have elite drums.

use crate::{
    chart::{
        Difficulty, InstrumentDifficulty, InstrumentTrack, PhraseType,
        drums::{DrumColor, DrumNoteType},
        elite_drums::{EliteDrumNote, EliteDrumPad},
    },
    source::{
        ChartSource, GenericNote, SourceDifficulty, SourceInstrument, SourceNoteFlags, SourcePhrase,
        SourceText, SourceTrack,
    },
};

use super::{downchart_chord, in_disco_flip, individual::DownchartHit};

/// Downcharts an elite drums track into four-lane source drums tracks, one per difficulty with notes.
///
/// The Expert track is made from Expert+ when the elite drums track has it, with its double kicks marked as
/// instrument-plus notes. Disco flip phrases become `mix` events, and the `mix` events of all difficulties go into
/// every track. Returns `None` if no difficulty has any note left.
#[must_use]
pub fn downchart_to_source(track: &InstrumentTrack<EliteDrumNote>) -> Option<Vec<SourceTrack>> {
    let charts: Vec<_> = SourceDifficulty::ALL
        .iter()
        .filter_map(|&difficulty| {
            let chart = match difficulty {
                SourceDifficulty::Expert => track
                    .get_difficulty(Difficulty::ExpertPlus)
                    .or_else(|| track.get_difficulty(Difficulty::Expert)),
                _ => track.get_difficulty(difficulty.into()),
            }?;
            Some((difficulty, chart))
        })
        .collect();

    let mix_events: Vec<_> = charts
        .iter()
        .flat_map(|&(difficulty, chart)| disco_flip_events(difficulty, chart))
        .collect();

    let tracks: Vec<_> = charts
        .iter()
        .map(|&(difficulty, chart)| {
            SourceTrack::new(SourceInstrument::Drums, difficulty)
                .with_notes(source_notes(chart))
                .with_phrases(source_phrases(chart))
                .with_text_events(
                    chart
                        .text_events
                        .iter()
                        .map(|event| SourceText::new(event.tick, event.text.clone()))
                        .chain(mix_events.iter().cloned()),
                )
        })
        .filter(|track| !track.notes.is_empty())
        .collect();

    if tracks.is_empty() {
        log::debug!("elite drums downchart has no notes");
        None
    } else {
        Some(tracks)
    }
}

fn source_notes(chart: &InstrumentDifficulty<EliteDrumNote>) -> Vec<GenericNote> {
    let mut notes = Vec::new();
    for &primary in chart.notes.primary_indices() {
        let members: Vec<_> = chart.notes.chord(primary).map(|note| &note.data).collect();
        let tick = chart.notes[primary].tick;
        let disco_flip = in_disco_flip(&chart.phrases, tick);
        let Some(resolved) = downchart_chord(members.iter().copied(), disco_flip) else {
            continue;
        };
        notes.extend(resolved.hits().filter_map(|hit| {
            members
                .get(hit.member)
                .map(|origin| source_note(&hit, origin, tick))
        }));
    }
    notes
}

fn source_note(hit: &DownchartHit, origin: &EliteDrumNote, tick: u32) -> GenericNote {
    let raw = match hit.color {
        None => 0,
        Some(DrumColor::Red) => 1,
        Some(DrumColor::Yellow) => 2,
        Some(DrumColor::Blue) => 3,
        Some(DrumColor::Green) => 4,
    };
    let mut flags = SourceNoteFlags::empty();
    if hit.cymbal && hit.color != Some(DrumColor::Red) {
        flags |= SourceNoteFlags::CYMBAL;
    }
    match hit.dynamics {
        DrumNoteType::Accent => flags |= SourceNoteFlags::ACCENT,
        DrumNoteType::Ghost => flags |= SourceNoteFlags::GHOST,
        DrumNoteType::Neutral => {}
    }
    if origin.pad == EliteDrumPad::Kick && origin.double_kick {
        flags |= SourceNoteFlags::INSTRUMENT_PLUS;
    }
    GenericNote::new(tick, raw).with_flags(flags)
}

fn source_phrases(chart: &InstrumentDifficulty<EliteDrumNote>) -> Vec<SourcePhrase> {
    chart
        .phrases
        .iter()
        .filter(|phrase| {
            matches!(
                phrase.phrase_type,
                PhraseType::StarPower
                    | PhraseType::DrumFill
                    | PhraseType::VersusPlayer1
                    | PhraseType::VersusPlayer2
                    | PhraseType::Solo
            )
        })
        .map(|phrase| SourcePhrase::new(phrase.phrase_type, phrase.tick, phrase.tick_length))
        .collect()
}

/// `mix` events switching disco flip on and off for one difficulty. Disco flip starts off at tick 0.
fn disco_flip_events(
    difficulty: SourceDifficulty,
    chart: &InstrumentDifficulty<EliteDrumNote>,
) -> Vec<SourceText> {
    let index = difficulty.index();
    let on = format!("mix {index} drums0d");
    let off = format!("mix {index} drums0");

    let mut events = vec![SourceText::new(0, off.clone())];
    for phrase in chart
        .phrases_of(PhraseType::DiscoFlip)
        .filter(|phrase| phrase.tick_length > 0)
    {
        if phrase.tick == 0 {
            events.retain(|event| event.tick != 0);
        }
        events.push(SourceText::new(phrase.tick, on.clone()));
        events.push(SourceText::new(
            phrase.tick.saturating_add(phrase.tick_length),
            off.clone(),
        ));
    }
    events
}

/// A chart whose tracks are replaced by the given ones where they exist.
#[derive(Debug)]
pub(crate) struct OverlaySource<'a, S: ?Sized> {
    base: &'a S,
    tracks: Vec<SourceTrack>,
}

impl<'a, S: ?Sized> OverlaySource<'a, S> {
    pub(crate) const fn new(base: &'a S, tracks: Vec<SourceTrack>) -> Self {
        Self { base, tracks }
    }
}

impl<S: ChartSource + ?Sized> ChartSource for OverlaySource<'_, S> {
    fn resolution(&self) -> u32 {
        self.base.resolution()
    }

    fn tick_to_time(&self, tick: u32) -> f64 {
        self.base.tick_to_time(tick)
    }

    fn track(
        &self,
        instrument: SourceInstrument,
        difficulty: SourceDifficulty,
    ) -> Option<&SourceTrack> {
        self.tracks
            .iter()
            .find(|track| track.instrument == instrument && track.difficulty == difficulty)
            .or_else(|| self.base.track(instrument, difficulty))
    }

    fn global_events(&self) -> &[SourceText] {
        self.base.global_events()
    }
}
