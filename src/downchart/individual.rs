//! Remapping of single elite drums notes onto four-lane colors.

use crate::chart::{
    drums::{DrumColor, DrumNoteType},
    elite_drums::{EliteDrumNote, EliteDrumPad},
};

/// An elite drums note as seen by four-lane drums, before collisions within its chord are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DownchartHit {
    /// The lane. `None` is the kick.
    pub(crate) color: Option<DrumColor>,
    pub(crate) cymbal: bool,
    pub(crate) dynamics: DrumNoteType,
    /// The pad the hit comes from, which decides handedness when two hits collide.
    pub(crate) origin: EliteDrumPad,
    /// The color was forced by a channel flag.
    pub(crate) forced: bool,
    /// Position of the originating note within its chord.
    pub(crate) member: usize,
}

impl DownchartHit {
    pub(crate) const fn is_kick(&self) -> bool {
        self.color.is_none()
    }
}

/// The default lane of an elite drums pad. `None` for pads which are dropped unless a channel flag forces them.
const fn default_lane(pad: EliteDrumPad) -> Option<Option<DrumColor>> {
    match pad {
        EliteDrumPad::HatPedal => None,
        EliteDrumPad::Kick => Some(None),
        EliteDrumPad::Snare => Some(Some(DrumColor::Red)),
        EliteDrumPad::HiHat | EliteDrumPad::Tom1 => Some(Some(DrumColor::Yellow)),
        EliteDrumPad::LeftCrash | EliteDrumPad::Tom2 | EliteDrumPad::Ride => Some(Some(DrumColor::Blue)),
        EliteDrumPad::Tom3 | EliteDrumPad::RightCrash => Some(Some(DrumColor::Green)),
    }
}

/// Remaps one note. Invisible terminators and unforced hat pedals give no hit.
pub(crate) fn downchart_note(note: &EliteDrumNote, member: usize) -> Option<DownchartHit> {
    if note.is_invisible_terminator() {
        return None;
    }
    let forced = match note.pad {
        EliteDrumPad::Kick => None,
        _ => note.channel.color(),
    };
    let color = match forced {
        Some(color) => Some(color),
        None => default_lane(note.pad)?,
    };
    Some(DownchartHit {
        color,
        cymbal: color.is_some() && note.pad.is_cymbal(),
        dynamics: note.dynamics,
        origin: note.pad,
        forced: forced.is_some(),
        member,
    })
}

/// The second hit of a flammed note: the next lane to the right, or blue for green.
pub(crate) fn flam_partner(hit: &DownchartHit) -> Option<DownchartHit> {
    let color = match hit.color? {
        DrumColor::Red => DrumColor::Yellow,
        DrumColor::Yellow => DrumColor::Blue,
        DrumColor::Blue => DrumColor::Green,
        DrumColor::Green => DrumColor::Blue,
    };
    Some(DownchartHit {
        color: Some(color),
        ..*hit
    })
}

/// Encodes a hit inside a disco flip section the way a disco flip chart is authored, so that flipping it back
/// gives the pad which is actually played. A yellow tom can not be expressed there and moves to blue.
pub(crate) fn apply_disco_flip(hit: DownchartHit) -> DownchartHit {
    let (color, cymbal) = match (hit.color, hit.cymbal) {
        (Some(DrumColor::Red), _) => (Some(DrumColor::Yellow), true),
        (Some(DrumColor::Yellow), true) => (Some(DrumColor::Red), false),
        (Some(DrumColor::Yellow), false) => (Some(DrumColor::Blue), false),
        other => other,
    };
    DownchartHit {
        color,
        cymbal,
        ..hit
    }
}

/// Downcharts a note together with its flam partner, if any.
pub(crate) fn downchart_with_flam(
    note: &EliteDrumNote,
    member: usize,
) -> impl Iterator<Item = DownchartHit> {
    let hit = downchart_note(note, member);
    let partner = hit
        .as_ref()
        .filter(|_| note.flam)
        .and_then(flam_partner);
    hit.into_iter().chain(partner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::elite_drums::{EliteDrumsChannelFlag, EliteDrumsHatPedalType};

    fn lane(note: EliteDrumNote) -> Option<(Option<DrumColor>, bool)> {
        downchart_note(&note, 0).map(|hit| (hit.color, hit.cymbal))
    }

    #[test]
    fn default_lanes() {
        assert_eq!(lane(EliteDrumNote::new(EliteDrumPad::HatPedal)), None);
        assert_eq!(lane(EliteDrumNote::new(EliteDrumPad::Kick)), Some((None, false)));
        assert_eq!(
            lane(EliteDrumNote::new(EliteDrumPad::HiHat)),
            Some((Some(DrumColor::Yellow), true))
        );
        assert_eq!(
            lane(EliteDrumNote::new(EliteDrumPad::Ride)),
            Some((Some(DrumColor::Blue), true))
        );
        assert_eq!(
            lane(EliteDrumNote::new(EliteDrumPad::Tom3)),
            Some((Some(DrumColor::Green), false))
        );
    }

    #[test]
    fn channel_forces_lane_keeping_family() {
        let pedal = EliteDrumNote {
            channel: EliteDrumsChannelFlag::Green,
            ..EliteDrumNote::new(EliteDrumPad::HatPedal)
        };
        assert_eq!(lane(pedal), Some((Some(DrumColor::Green), true)));

        let tom = EliteDrumNote {
            channel: EliteDrumsChannelFlag::Red,
            ..EliteDrumNote::new(EliteDrumPad::Tom2)
        };
        assert_eq!(lane(tom), Some((Some(DrumColor::Red), false)));
    }

    #[test]
    fn invisible_terminator_never_downcharts() {
        let pedal = EliteDrumNote {
            hat_pedal_type: Some(EliteDrumsHatPedalType::InvisibleTerminator),
            channel: EliteDrumsChannelFlag::Yellow,
            ..EliteDrumNote::new(EliteDrumPad::HatPedal)
        };
        assert_eq!(lane(pedal), None);
    }

    #[test]
    fn flam_partners() {
        let snare = EliteDrumNote {
            flam: true,
            ..EliteDrumNote::new(EliteDrumPad::Snare)
        };
        let hits: Vec<_> = downchart_with_flam(&snare, 0)
            .map(|hit| (hit.color, hit.cymbal))
            .collect();
        assert_eq!(
            hits,
            [(Some(DrumColor::Red), false), (Some(DrumColor::Yellow), false)]
        );

        let kick = EliteDrumNote {
            flam: true,
            ..EliteDrumNote::new(EliteDrumPad::Kick)
        };
        assert_eq!(downchart_with_flam(&kick, 0).count(), 1);
    }
}
