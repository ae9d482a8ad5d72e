//! Four- and five-lane drums tracks.
//!
//! The source drums track is authored either for four lanes with cymbal markers or for five lanes; every drums
//! instrument can be derived from both through the conversion tables below.

use crate::{
    chart::{
        Difficulty, GameMode, Instrument,
        drums::{DrumColor, DrumNote, DrumNoteType, DrumsTrack, DrumsType, FiveLaneDrumPad, FourLaneDrumPad},
    },
    downchart::generic::{OverlaySource, downchart_to_source},
    settings::LoadSettings,
    source::{ChartSource, GenericNote, SourceDifficulty, SourceInstrument, SourceNoteFlags, SourceText},
};

use super::{
    ChartLoader, LoadError, LoadOutput, NoteContext, Sustains, load_difficulties, load_difficulty,
    text_events::{DrumsMix, parse_drums_mix},
};

impl<S: ChartSource + ?Sized> ChartLoader<'_, S> {
    /// Loads a four-lane, pro or five-lane drums track.
    ///
    /// When the chart has no drums notes but has elite drums, the drums are derived from the downcharted elite drums
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InstrumentMismatch`] if `instrument` is not a four- or five-lane drums instrument.
    pub fn load_drums_track(&self, instrument: Instrument) -> Result<LoadOutput<DrumsTrack>, LoadError> {
        if !matches!(
            instrument.game_mode(),
            GameMode::FourLaneDrums | GameMode::FiveLaneDrums
        ) {
            return Err(LoadError::InstrumentMismatch {
                instrument,
                expected: GameMode::FourLaneDrums,
            });
        }

        if !has_drums_notes(self.source) {
            let elite = self.load_elite_drums_track(Instrument::EliteDrums)?;
            if let Some(tracks) = downchart_to_source(&elite.track) {
                log::debug!("no drums notes, loading {instrument:?} from downcharted elite drums");
                let overlay = OverlaySource::new(self.source, tracks);
                let settings = self.settings.drums_type(DrumsType::FourLane);
                return Ok(load_drums(&overlay, &settings, instrument));
            }
        }
        Ok(load_drums(self.source, &self.settings, instrument))
    }
}

fn has_drums_notes<S: ChartSource + ?Sized>(source: &S) -> bool {
    SourceDifficulty::ALL.iter().any(|&difficulty| {
        source
            .track(SourceInstrument::Drums, difficulty)
            .is_some_and(|track| !track.notes.is_empty())
    })
}

fn load_drums<S: ChartSource + ?Sized>(
    source: &S,
    settings: &LoadSettings,
    instrument: Instrument,
) -> LoadOutput<DrumsTrack> {
    let drums_type = resolve_drums_type(source, settings.drums_type);
    let pro = instrument == Instrument::ProDrums;

    if instrument == Instrument::FiveLaneDrums {
        let output = load_difficulties(source, instrument, &|difficulty, track| {
            let mut disco = DiscoFlipTracker::new(&track.text_events, difficulty);
            LoadOutput::new(load_difficulty(
                source,
                settings,
                instrument,
                difficulty,
                track,
                Sustains::Drop,
                |context| {
                    let disco_flip = disco.update(context.note.tick);
                    let pad = match drums_type {
                        DrumsType::FiveLane => five_lane_pad(context.note.raw),
                        _ => five_lane_from_four_lane(context, disco_flip),
                    };
                    drum_note(context, pad)
                },
            ))
        });
        return LoadOutput {
            track: DrumsTrack::FiveLane(output.track),
            warnings: output.warnings,
        };
    }

    let output = load_difficulties(source, instrument, &|difficulty, track| {
        let mut disco = DiscoFlipTracker::new(&track.text_events, difficulty);
        LoadOutput::new(load_difficulty(
            source,
            settings,
            instrument,
            difficulty,
            track,
            Sustains::Drop,
            |context| {
                let disco_flip = disco.update(context.note.tick);
                let pad = match drums_type {
                    DrumsType::FiveLane => four_lane_from_five_lane(context, pro),
                    _ => four_lane_from_source(context.note, disco_flip, pro),
                };
                drum_note(context, pad)
            },
        ))
    });
    LoadOutput {
        track: DrumsTrack::FourLane(output.track),
        warnings: output.warnings,
    }
}

fn drum_note<P>(context: &NoteContext<'_>, pad: P) -> DrumNote<P> {
    DrumNote {
        pad,
        note_type: note_type(context.note),
        star_power_activator: context.is_star_power_activator(),
    }
}

pub(crate) const fn note_type(note: &GenericNote) -> DrumNoteType {
    if note.has(SourceNoteFlags::ACCENT) {
        DrumNoteType::Accent
    } else if note.has(SourceNoteFlags::GHOST) {
        DrumNoteType::Ghost
    } else {
        DrumNoteType::Neutral
    }
}

/// Decides the lane layout of the chart when it is not configured.
fn resolve_drums_type<S: ChartSource + ?Sized>(source: &S, configured: DrumsType) -> DrumsType {
    if configured != DrumsType::Unknown {
        return configured;
    }
    let detected = SourceDifficulty::ALL
        .iter()
        .filter_map(|&difficulty| source.track(SourceInstrument::Drums, difficulty))
        .flat_map(|track| &track.notes)
        .find_map(|note| {
            if note.raw == 5 {
                Some(DrumsType::FiveLane)
            } else if note.has(SourceNoteFlags::CYMBAL) {
                Some(DrumsType::FourLane)
            } else {
                None
            }
        })
        .unwrap_or(DrumsType::FourLane);
    log::debug!("drums type not configured, detected {detected:?}");
    detected
}

/// Follows the `mix` events of one difficulty to tell whether disco flip is active.
#[derive(Debug, Clone)]
pub(crate) struct DiscoFlipTracker<'a> {
    events: &'a [SourceText],
    cursor: usize,
    difficulty: u8,
    active: bool,
}

impl<'a> DiscoFlipTracker<'a> {
    pub(crate) const fn new(events: &'a [SourceText], difficulty: Difficulty) -> Self {
        Self {
            events,
            cursor: 0,
            difficulty: difficulty.source().index(),
            active: false,
        }
    }

    /// Applies every event up to `tick` and returns whether disco flip is active there.
    pub(crate) fn update(&mut self, tick: u32) -> bool {
        while let Some(event) = self.events.get(self.cursor) {
            if event.tick > tick {
                break;
            }
            if let Some((difficulty, mix)) = parse_drums_mix(&event.text)
                && difficulty == self.difficulty
            {
                self.active = mix == DrumsMix::DiscoFlip;
            }
            self.cursor += 1;
        }
        self.active
    }
}

/// The lane of a four-lane source pad. `None` is the kick.
///
/// # Panics
///
/// Panics on values which do not name a pad; they can only come from a broken reader.
pub(crate) fn source_color(raw: u8) -> Option<DrumColor> {
    match raw {
        0 => None,
        1 => Some(DrumColor::Red),
        2 => Some(DrumColor::Yellow),
        3 => Some(DrumColor::Blue),
        4 | 5 => Some(DrumColor::Green),
        _ => panic!("invalid drums pad {raw}"),
    }
}

/// The four-lane pad of a lane, applying disco flip and cymbal markers for pro drums.
pub(crate) fn four_lane_pad(
    color: Option<DrumColor>,
    cymbal: bool,
    disco_flip: bool,
    pro: bool,
) -> FourLaneDrumPad {
    let Some(color) = color else {
        return FourLaneDrumPad::Kick;
    };
    if !pro {
        return FourLaneDrumPad::from_color(color, false);
    }
    let (color, cymbal) = match color {
        DrumColor::Red if disco_flip => (DrumColor::Yellow, true),
        DrumColor::Yellow if disco_flip => (DrumColor::Red, false),
        other => (other, cymbal),
    };
    FourLaneDrumPad::from_color(color, cymbal && color != DrumColor::Red)
}

fn four_lane_from_source(note: &GenericNote, disco_flip: bool, pro: bool) -> FourLaneDrumPad {
    four_lane_pad(
        source_color(note.raw),
        note.has(SourceNoteFlags::CYMBAL),
        disco_flip,
        pro,
    )
}

fn five_lane_pad(raw: u8) -> FiveLaneDrumPad {
    match raw {
        0 => FiveLaneDrumPad::Kick,
        1 => FiveLaneDrumPad::Red,
        2 => FiveLaneDrumPad::Yellow,
        3 => FiveLaneDrumPad::Blue,
        4 => FiveLaneDrumPad::Orange,
        5 => FiveLaneDrumPad::Green,
        _ => panic!("invalid drums pad {raw}"),
    }
}

/// | 5-lane | 4-lane pro    |
/// | :----- | :------------ |
/// | Red    | Red           |
/// | Yellow | Yellow cymbal |
/// | Blue   | Blue tom      |
/// | Orange | Green cymbal  |
/// | Green  | Green tom     |
/// | O + G  | B cym + G tom |
fn four_lane_from_five_lane(context: &NoteContext<'_>, pro: bool) -> FourLaneDrumPad {
    let pad = match five_lane_pad(context.note.raw) {
        FiveLaneDrumPad::Kick => FourLaneDrumPad::Kick,
        FiveLaneDrumPad::Red => FourLaneDrumPad::RedDrum,
        FiveLaneDrumPad::Yellow => FourLaneDrumPad::YellowCymbal,
        FiveLaneDrumPad::Blue => FourLaneDrumPad::BlueDrum,
        FiveLaneDrumPad::Orange => {
            if context
                .chord_others()
                .any(|other| five_lane_pad(other.raw) == FiveLaneDrumPad::Green)
            {
                FourLaneDrumPad::BlueCymbal
            } else {
                FourLaneDrumPad::GreenCymbal
            }
        }
        FiveLaneDrumPad::Green => FourLaneDrumPad::GreenDrum,
    };
    if pro { pad } else { pad.to_tom() }
}

fn five_lane_from_four_lane(context: &NoteContext<'_>, disco_flip: bool) -> FiveLaneDrumPad {
    five_lane_from_pro(
        four_lane_from_source(context.note, disco_flip, true),
        context
            .chord_others()
            .map(|other| four_lane_from_source(other, disco_flip, true)),
    )
}

/// | 4-lane pro    | 5-lane |
/// | :------------ | :----- |
/// | Red           | Red    |
/// | Yellow cymbal | Yellow |
/// | Yellow tom    | Blue   |
/// | Blue cymbal   | Orange |
/// | Blue tom      | Blue   |
/// | Green cymbal  | Orange |
/// | Green tom     | Green  |
/// | Y tom + B tom | R + B  |
/// | B cym + G cym | Y + O  |
pub(crate) fn five_lane_from_pro(
    pad: FourLaneDrumPad,
    mut others: impl Iterator<Item = FourLaneDrumPad>,
) -> FiveLaneDrumPad {
    match pad {
        FourLaneDrumPad::Kick => FiveLaneDrumPad::Kick,
        FourLaneDrumPad::RedDrum => FiveLaneDrumPad::Red,
        FourLaneDrumPad::YellowCymbal => FiveLaneDrumPad::Yellow,
        FourLaneDrumPad::YellowDrum => {
            if others.any(|other| other == FourLaneDrumPad::BlueDrum) {
                FiveLaneDrumPad::Red
            } else {
                FiveLaneDrumPad::Blue
            }
        }
        FourLaneDrumPad::BlueDrum => FiveLaneDrumPad::Blue,
        FourLaneDrumPad::BlueCymbal => {
            if others.any(|other| other == FourLaneDrumPad::GreenCymbal) {
                FiveLaneDrumPad::Yellow
            } else {
                FiveLaneDrumPad::Orange
            }
        }
        FourLaneDrumPad::GreenCymbal => FiveLaneDrumPad::Orange,
        FourLaneDrumPad::GreenDrum => FiveLaneDrumPad::Green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disco_flip_swaps_snare_and_hi_hat_on_pro_only() {
        let red = Some(DrumColor::Red);
        let yellow = Some(DrumColor::Yellow);
        assert_eq!(
            four_lane_pad(red, false, true, true),
            FourLaneDrumPad::YellowCymbal
        );
        assert_eq!(
            four_lane_pad(yellow, true, true, true),
            FourLaneDrumPad::RedDrum
        );
        assert_eq!(four_lane_pad(yellow, false, true, true), FourLaneDrumPad::RedDrum);
        assert_eq!(four_lane_pad(red, false, true, false), FourLaneDrumPad::RedDrum);
        assert_eq!(four_lane_pad(yellow, true, false, false), FourLaneDrumPad::YellowDrum);
    }

    #[test]
    fn cymbal_marker_on_snare_is_ignored() {
        assert_eq!(
            four_lane_pad(Some(DrumColor::Red), true, false, true),
            FourLaneDrumPad::RedDrum
        );
    }

    #[test]
    fn disco_flip_follows_mix_events_of_own_difficulty() {
        let events = [
            SourceText::new(0, "mix 3 drums0"),
            SourceText::new(100, "mix 3 drums0d"),
            SourceText::new(100, "mix 2 drums0"),
            SourceText::new(200, "mix 3 drums0"),
        ];
        let mut expert = DiscoFlipTracker::new(&events, Difficulty::Expert);
        assert!(!expert.update(50));
        assert!(expert.update(100));
        assert!(expert.update(199));
        assert!(!expert.update(200));

        let mut expert_plus = DiscoFlipTracker::new(&events, Difficulty::ExpertPlus);
        assert!(expert_plus.update(150));

        let mut hard = DiscoFlipTracker::new(&events, Difficulty::Hard);
        assert!(!hard.update(150));
    }

    #[test]
    fn five_lane_collisions() {
        assert_eq!(
            five_lane_from_pro(FourLaneDrumPad::YellowDrum, [FourLaneDrumPad::BlueDrum].into_iter()),
            FiveLaneDrumPad::Red
        );
        assert_eq!(
            five_lane_from_pro(FourLaneDrumPad::BlueCymbal, [FourLaneDrumPad::GreenCymbal].into_iter()),
            FiveLaneDrumPad::Yellow
        );
        assert_eq!(
            five_lane_from_pro(FourLaneDrumPad::GreenCymbal, [FourLaneDrumPad::BlueCymbal].into_iter()),
            FiveLaneDrumPad::Orange
        );
    }
}
