//! Notes of elite drums.

use super::drums::{DrumColor, DrumNoteType};

/// A pad of the elite drums kit, ordered from the player's left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EliteDrumPad {
    /// Hi-hat pedal.
    HatPedal,
    /// Kick.
    Kick,
    /// Snare.
    Snare,
    /// Hi-hat.
    HiHat,
    /// Left crash.
    LeftCrash,
    /// High tom.
    Tom1,
    /// Middle tom.
    Tom2,
    /// Floor tom.
    Tom3,
    /// Ride.
    Ride,
    /// Right crash.
    RightCrash,
}

impl EliteDrumPad {
    /// Decodes a raw source value.
    ///
    /// # Panics
    ///
    /// Panics on values which do not name a pad; they can only come from a broken reader.
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::HatPedal,
            1 => Self::Kick,
            2 => Self::Snare,
            3 => Self::HiHat,
            4 => Self::LeftCrash,
            5 => Self::Tom1,
            6 => Self::Tom2,
            7 => Self::Tom3,
            8 => Self::Ride,
            9 => Self::RightCrash,
            _ => panic!("invalid elite drums pad {raw}"),
        }
    }

    /// Checks whether the pad is a cymbal. The hat pedal counts as one since it closes the hi-hat.
    #[must_use]
    pub const fn is_cymbal(self) -> bool {
        matches!(
            self,
            Self::HatPedal | Self::HiHat | Self::LeftCrash | Self::Ride | Self::RightCrash
        )
    }
}

/// Openness of the hi-hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EliteDrumsHatState {
    /// Open.
    Open,
    /// Closed.
    Closed,
    /// Either.
    Indifferent,
}

/// What a hat pedal note does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EliteDrumsHatPedalType {
    /// Pressed.
    Stomp,
    /// Pressed and released at once.
    Splash,
    /// Never played; it only ends an open hi-hat section.
    InvisibleTerminator,
}

/// A four-lane color an elite drums note is forced to when downcharted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EliteDrumsChannelFlag {
    /// Use the default lane.
    #[default]
    None,
    /// Red lane.
    Red,
    /// Yellow lane.
    Yellow,
    /// Blue lane.
    Blue,
    /// Green lane.
    Green,
}

impl EliteDrumsChannelFlag {
    /// The forced color, if any.
    #[must_use]
    pub const fn color(self) -> Option<DrumColor> {
        match self {
            Self::None => None,
            Self::Red => Some(DrumColor::Red),
            Self::Yellow => Some(DrumColor::Yellow),
            Self::Blue => Some(DrumColor::Blue),
            Self::Green => Some(DrumColor::Green),
        }
    }
}

/// An elite drums note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EliteDrumNote {
    /// The pad.
    pub pad: EliteDrumPad,
    /// How hard the note is hit.
    pub dynamics: DrumNoteType,
    /// Openness of the hi-hat. Always [`EliteDrumsHatState::Indifferent`] for other pads.
    pub hat_state: EliteDrumsHatState,
    /// What the note does, for hat pedal notes.
    pub hat_pedal_type: Option<EliteDrumsHatPedalType>,
    /// Four-lane color this note is forced to.
    pub channel: EliteDrumsChannelFlag,
    /// Played as a flam.
    pub flam: bool,
    /// Double kick note, only present at Expert+.
    pub double_kick: bool,
    /// Hitting this note activates star power.
    pub star_power_activator: bool,
}

impl EliteDrumNote {
    /// Creates a plain note of a pad.
    #[must_use]
    pub const fn new(pad: EliteDrumPad) -> Self {
        Self {
            pad,
            dynamics: DrumNoteType::Neutral,
            hat_state: match pad {
                EliteDrumPad::HiHat => EliteDrumsHatState::Open,
                _ => EliteDrumsHatState::Indifferent,
            },
            hat_pedal_type: match pad {
                EliteDrumPad::HatPedal => Some(EliteDrumsHatPedalType::Stomp),
                _ => None,
            },
            channel: EliteDrumsChannelFlag::None,
            flam: false,
            double_kick: false,
            star_power_activator: false,
        }
    }

    /// Checks whether the note is never played.
    #[must_use]
    pub const fn is_invisible_terminator(&self) -> bool {
        matches!(
            self.hat_pedal_type,
            Some(EliteDrumsHatPedalType::InvisibleTerminator)
        )
    }
}
