//! Notes of four- and five-lane drums.

use super::InstrumentTrack;

/// Lane layout of a drums chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrumsType {
    /// Kick plus four lanes, with cymbal markers.
    FourLane,
    /// Kick plus five lanes.
    FiveLane,
    /// Decide from the content of the chart.
    #[default]
    Unknown,
}

/// A pad of four-lane drums. The cymbals only appear in pro drums charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FourLaneDrumPad {
    /// Kick.
    Kick,
    /// Red tom (snare).
    RedDrum,
    /// Yellow tom.
    YellowDrum,
    /// Blue tom.
    BlueDrum,
    /// Green tom.
    GreenDrum,
    /// Yellow cymbal.
    YellowCymbal,
    /// Blue cymbal.
    BlueCymbal,
    /// Green cymbal.
    GreenCymbal,
}

/// The four colors of the non-kick lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrumColor {
    /// Red.
    Red,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Green.
    Green,
}

impl FourLaneDrumPad {
    /// Builds the pad of a lane.
    ///
    /// # Panics
    ///
    /// Panics on a red cymbal, which does not exist.
    #[must_use]
    pub const fn from_color(color: DrumColor, cymbal: bool) -> Self {
        match (color, cymbal) {
            (DrumColor::Red, false) => Self::RedDrum,
            (DrumColor::Yellow, false) => Self::YellowDrum,
            (DrumColor::Blue, false) => Self::BlueDrum,
            (DrumColor::Green, false) => Self::GreenDrum,
            (DrumColor::Yellow, true) => Self::YellowCymbal,
            (DrumColor::Blue, true) => Self::BlueCymbal,
            (DrumColor::Green, true) => Self::GreenCymbal,
            (DrumColor::Red, true) => panic!("there is no red cymbal"),
        }
    }

    /// The lane color. `None` for the kick.
    #[must_use]
    pub const fn color(self) -> Option<DrumColor> {
        match self {
            Self::Kick => None,
            Self::RedDrum => Some(DrumColor::Red),
            Self::YellowDrum | Self::YellowCymbal => Some(DrumColor::Yellow),
            Self::BlueDrum | Self::BlueCymbal => Some(DrumColor::Blue),
            Self::GreenDrum | Self::GreenCymbal => Some(DrumColor::Green),
        }
    }

    /// Checks whether this is a cymbal.
    #[must_use]
    pub const fn is_cymbal(self) -> bool {
        matches!(
            self,
            Self::YellowCymbal | Self::BlueCymbal | Self::GreenCymbal
        )
    }

    /// The tom of the same lane.
    #[must_use]
    pub const fn to_tom(self) -> Self {
        match self {
            Self::YellowCymbal => Self::YellowDrum,
            Self::BlueCymbal => Self::BlueDrum,
            Self::GreenCymbal => Self::GreenDrum,
            other => other,
        }
    }
}

/// A pad of five-lane drums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FiveLaneDrumPad {
    /// Kick.
    Kick,
    /// Red.
    Red,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Orange.
    Orange,
    /// Green.
    Green,
}

/// How hard a drum note is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrumNoteType {
    /// Normal hit.
    #[default]
    Neutral,
    /// Hard hit.
    Accent,
    /// Soft hit.
    Ghost,
}

/// A drum note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrumNote<P> {
    /// The pad.
    pub pad: P,
    /// How hard the note is hit.
    pub note_type: DrumNoteType,
    /// Hitting this note activates star power.
    pub star_power_activator: bool,
}

/// A drums track with either lane layout.
#[derive(Debug, Clone, PartialEq)]
pub enum DrumsTrack {
    /// Four-lane or pro drums.
    FourLane(InstrumentTrack<DrumNote<FourLaneDrumPad>>),
    /// Five-lane drums.
    FiveLane(InstrumentTrack<DrumNote<FiveLaneDrumPad>>),
}

impl DrumsTrack {
    /// The four-lane track, if this is one.
    #[must_use]
    pub const fn as_four_lane(&self) -> Option<&InstrumentTrack<DrumNote<FourLaneDrumPad>>> {
        match self {
            Self::FourLane(track) => Some(track),
            Self::FiveLane(_) => None,
        }
    }

    /// The five-lane track, if this is one.
    #[must_use]
    pub const fn as_five_lane(&self) -> Option<&InstrumentTrack<DrumNote<FiveLaneDrumPad>>> {
        match self {
            Self::FiveLane(track) => Some(track),
            Self::FourLane(_) => None,
        }
    }
}
