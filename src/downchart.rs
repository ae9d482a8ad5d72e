//! Conversion of elite drums into four- and five-lane drums.
//!
//! Every elite drums chord is downcharted in three steps:
//!
//! 1. Each note is remapped onto a four-lane color ([`individual`]); a flam adds a hit on the neighbouring lane and
//!    notes inside a disco flip section are encoded flipped.
//! 2. The chord keeps its last kick and its first two hand hits. A third hand hit can not be played with two hands
//!    and is dropped.
//! 3. Two hand hits on the same color are spread over distinct lanes ([`collision`]).
//!
//! [`downchart_track`] turns the result into a [`DrumsTrack`] directly, while [`downchart_to_source`] writes it
//! back as generic drums notes so that it can be loaded like any drums chart. Both decode the disco flip with
//! the same function as the drums loader, so they agree on every pad.

pub(crate) mod collision;
pub mod generic;
pub(crate) mod individual;

pub use self::generic::downchart_to_source;

use crate::{
    chart::{
        Instrument, InstrumentDifficulty, InstrumentTrack, Note, Notes, Phrase, PhraseType,
        drums::{DrumNote, DrumsTrack, FiveLaneDrumPad, FourLaneDrumPad},
        elite_drums::EliteDrumNote,
    },
    load::drums::{five_lane_from_pro, four_lane_pad},
};

use self::{
    collision::resolve_collision,
    individual::{DownchartHit, apply_disco_flip, downchart_with_flam},
};

/// Lane layout of a downcharted track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrumsLayout {
    /// Pro drums with cymbals. Strip the cymbals with
    /// [`FourLaneDrumPad::to_tom`] for plain four-lane drums.
    FourLane,
    /// Five-lane drums.
    FiveLane,
}

impl DrumsLayout {
    /// The instrument of a track in this layout.
    #[must_use]
    pub const fn instrument(self) -> Instrument {
        match self {
            Self::FourLane => Instrument::ProDrums,
            Self::FiveLane => Instrument::FiveLaneDrums,
        }
    }
}

/// The downcharted hits of one elite drums chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DownchartChord {
    pub(crate) kick: Option<DownchartHit>,
    pub(crate) first: Option<DownchartHit>,
    pub(crate) second: Option<DownchartHit>,
}

impl DownchartChord {
    /// The hits with the one leading the chord first: the first hand hit, or the kick if there is none.
    pub(crate) fn hits(&self) -> impl Iterator<Item = DownchartHit> {
        self.first
            .into_iter()
            .chain(self.kick)
            .chain(self.second)
    }
}

/// Downcharts the notes of one chord. `None` if nothing of the chord is left.
pub(crate) fn downchart_chord<'a>(
    members: impl IntoIterator<Item = &'a EliteDrumNote>,
    disco_flip: bool,
) -> Option<DownchartChord> {
    let mut kick = None;
    let mut first = None;
    let mut second = None;
    for (member, note) in members.into_iter().enumerate() {
        for hit in downchart_with_flam(note, member) {
            let hit = if disco_flip {
                apply_disco_flip(hit)
            } else {
                hit
            };
            if hit.is_kick() {
                kick = Some(hit);
            } else if first.is_none() {
                first = Some(hit);
            } else if second.is_none() {
                second = Some(hit);
            } else {
                log::debug!("dropping third hand hit from {:?}", hit.origin);
            }
        }
    }
    if kick.is_none() && first.is_none() {
        return None;
    }
    if let (Some(a), Some(b)) = (first, second) {
        let [a, b] = resolve_collision(a, b);
        first = Some(a);
        second = Some(b);
    }
    Some(DownchartChord {
        kick,
        first,
        second,
    })
}

/// Checks whether a disco flip phrase covers `tick`. A zero-length disco flip covers nothing.
pub(crate) fn in_disco_flip(phrases: &[Phrase], tick: u32) -> bool {
    phrases.iter().any(|phrase| {
        phrase.phrase_type == PhraseType::DiscoFlip
            && phrase.tick <= tick
            && tick - phrase.tick < phrase.tick_length
    })
}

/// Downcharts every difficulty of an elite drums track.
///
/// ```
/// use chart_tracks::prelude::*;
///
/// let chart = GenericChart::default().with_track(
///     SourceTrack::new(SourceInstrument::EliteDrums, SourceDifficulty::Expert)
///         .with_notes([GenericNote::new(0, 5), GenericNote::new(0, 6)]),
/// );
/// let loader = ChartLoader::new(&chart, LoadSettings::default());
/// let elite = loader.load_elite_drums_track(Instrument::EliteDrums).unwrap();
/// let drums = downchart_track(&elite.track, DrumsLayout::FourLane);
/// let expert = drums.as_four_lane().unwrap().get_difficulty(Difficulty::Expert).unwrap();
/// let pads: Vec<_> = expert.notes.iter().map(|note| note.data.pad).collect();
/// assert_eq!(pads, [FourLaneDrumPad::YellowDrum, FourLaneDrumPad::BlueDrum]);
/// ```
#[must_use]
pub fn downchart_track(track: &InstrumentTrack<EliteDrumNote>, layout: DrumsLayout) -> DrumsTrack {
    let instrument = layout.instrument();
    let mut four_lane = InstrumentTrack::new(instrument);
    for chart in track.difficulties() {
        four_lane.insert(downchart_difficulty(chart, instrument));
    }
    match layout {
        DrumsLayout::FourLane => DrumsTrack::FourLane(four_lane),
        DrumsLayout::FiveLane => {
            let mut five_lane = InstrumentTrack::new(instrument);
            for chart in four_lane.difficulties() {
                five_lane.insert(to_five_lane(chart));
            }
            DrumsTrack::FiveLane(five_lane)
        }
    }
}

fn downchart_difficulty(
    chart: &InstrumentDifficulty<EliteDrumNote>,
    instrument: Instrument,
) -> InstrumentDifficulty<DrumNote<FourLaneDrumPad>> {
    let mut output = InstrumentDifficulty::new(instrument, chart.difficulty);
    for &primary in chart.notes.primary_indices() {
        let members: Vec<&Note<EliteDrumNote>> = chart.notes.chord(primary).collect();
        let disco_flip = in_disco_flip(&chart.phrases, chart.notes[primary].tick);
        let Some(resolved) = downchart_chord(members.iter().map(|note| &note.data), disco_flip) else {
            continue;
        };
        for hit in resolved.hits() {
            let Some(origin) = members.get(hit.member) else {
                continue;
            };
            let pad = four_lane_pad(hit.color, hit.cymbal, disco_flip, true);
            let mut note = Note::new(
                DrumNote {
                    pad,
                    note_type: hit.dynamics,
                    star_power_activator: origin.data.star_power_activator,
                },
                origin.tick,
                0,
                origin.time,
                0.0,
            );
            note.flags = origin.flags;
            output.notes.push_chained(note, 0);
        }
    }
    output.phrases = chart
        .phrases
        .iter()
        .filter(|phrase| phrase.phrase_type != PhraseType::DiscoFlip)
        .copied()
        .collect();
    output.text_events.clone_from(&chart.text_events);
    output
}

fn to_five_lane(
    chart: &InstrumentDifficulty<DrumNote<FourLaneDrumPad>>,
) -> InstrumentDifficulty<DrumNote<FiveLaneDrumPad>> {
    let mut notes = Notes::new();
    for &primary in chart.notes.primary_indices() {
        let chord: Vec<_> = chart.notes.chord(primary).collect();
        for (i, note) in chord.iter().enumerate() {
            let others = chord
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, other)| other.data.pad);
            let mut five_lane = Note::new(
                DrumNote {
                    pad: five_lane_from_pro(note.data.pad, others),
                    note_type: note.data.note_type,
                    star_power_activator: note.data.star_power_activator,
                },
                note.tick,
                note.tick_length,
                note.time,
                note.time_length,
            );
            five_lane.flags = note.flags;
            notes.push_chained(five_lane, 0);
        }
    }
    InstrumentDifficulty {
        instrument: Instrument::FiveLaneDrums,
        difficulty: chart.difficulty,
        notes,
        phrases: chart.phrases.clone(),
        text_events: chart.text_events.clone(),
        range_shifts: Vec::new(),
    }
}
