//! Resolution of two hand hits of a chord which land on the same four-lane color.

use crate::chart::{drums::DrumColor, elite_drums::EliteDrumPad};

use super::individual::DownchartHit;

/// Spreads two hand hits over distinct lanes where possible.
///
/// # Panics
///
/// Panics if a hit is a kick, or on a red cymbal colliding with a red tom. Neither comes out of
/// [`downchart_note`](super::individual::downchart_note).
pub(crate) fn resolve_collision(first: DownchartHit, second: DownchartHit) -> [DownchartHit; 2] {
    let (Some(first_color), Some(second_color)) = (first.color, second.color) else {
        panic!("kick hits never collide with hand hits");
    };

    if first_color != second_color {
        return resolve_crashes(first, second);
    }

    if first.cymbal == second.cymbal {
        let (left, right) = if second.origin < first.origin {
            (second, first)
        } else {
            (first, second)
        };
        let (left_color, right_color) = match first_color {
            DrumColor::Red => (DrumColor::Red, DrumColor::Yellow),
            DrumColor::Yellow => (DrumColor::Yellow, DrumColor::Blue),
            DrumColor::Blue | DrumColor::Green => (DrumColor::Blue, DrumColor::Green),
        };
        return [with_color(left, left_color), with_color(right, right_color)];
    }

    let (tom, cymbal) = if first.cymbal {
        (second, first)
    } else {
        (first, second)
    };
    let (tom_color, cymbal_color) = match first_color {
        DrumColor::Yellow => (DrumColor::Red, DrumColor::Yellow),
        DrumColor::Blue => (DrumColor::Yellow, DrumColor::Blue),
        DrumColor::Green => (DrumColor::Blue, DrumColor::Green),
        DrumColor::Red => panic!("red cymbal collides with red tom"),
    };
    [with_color(tom, tom_color), with_color(cymbal, cymbal_color)]
}

/// Unforced crashes on both sides sound better as yellow and green than as blue and green.
fn resolve_crashes(first: DownchartHit, second: DownchartHit) -> [DownchartHit; 2] {
    let unforced_crash = |hit: &DownchartHit, pad: EliteDrumPad| hit.origin == pad && !hit.forced;
    if unforced_crash(&first, EliteDrumPad::LeftCrash)
        && unforced_crash(&second, EliteDrumPad::RightCrash)
    {
        return [with_color(first, DrumColor::Yellow), second];
    }
    if unforced_crash(&second, EliteDrumPad::LeftCrash)
        && unforced_crash(&first, EliteDrumPad::RightCrash)
    {
        return [first, with_color(second, DrumColor::Yellow)];
    }
    [first, second]
}

const fn with_color(hit: DownchartHit, color: DrumColor) -> DownchartHit {
    DownchartHit {
        color: Some(color),
        ..hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::drums::DrumNoteType;

    fn hit(origin: EliteDrumPad, color: DrumColor, cymbal: bool) -> DownchartHit {
        DownchartHit {
            color: Some(color),
            cymbal,
            dynamics: DrumNoteType::Neutral,
            origin,
            forced: false,
            member: 0,
        }
    }

    fn lanes(hits: [DownchartHit; 2]) -> [(EliteDrumPad, DrumColor, bool); 2] {
        hits.map(|hit| (hit.origin, hit.color.unwrap(), hit.cymbal))
    }

    #[test]
    fn distinct_colors_are_kept() {
        let tom1 = hit(EliteDrumPad::Tom1, DrumColor::Yellow, false);
        let tom3 = hit(EliteDrumPad::Tom3, DrumColor::Green, false);
        assert_eq!(resolve_collision(tom1, tom3), [tom1, tom3]);
    }

    #[test]
    fn unforced_crashes_spread_to_yellow() {
        let left = hit(EliteDrumPad::LeftCrash, DrumColor::Blue, true);
        let right = hit(EliteDrumPad::RightCrash, DrumColor::Green, true);
        assert_eq!(
            lanes(resolve_collision(right, left)),
            [
                (EliteDrumPad::RightCrash, DrumColor::Green, true),
                (EliteDrumPad::LeftCrash, DrumColor::Yellow, true),
            ]
        );

        let forced = DownchartHit {
            forced: true,
            ..left
        };
        assert_eq!(resolve_collision(forced, right), [forced, right]);
    }

    #[test]
    fn same_family_keeps_handedness() {
        let ride = hit(EliteDrumPad::Ride, DrumColor::Blue, true);
        let left_crash = hit(EliteDrumPad::LeftCrash, DrumColor::Blue, true);
        assert_eq!(
            lanes(resolve_collision(ride, left_crash)),
            [
                (EliteDrumPad::LeftCrash, DrumColor::Blue, true),
                (EliteDrumPad::Ride, DrumColor::Green, true),
            ]
        );

        let snare = hit(EliteDrumPad::Snare, DrumColor::Red, false);
        let tom = hit(EliteDrumPad::Tom2, DrumColor::Red, false);
        assert_eq!(
            lanes(resolve_collision(tom, snare)),
            [
                (EliteDrumPad::Snare, DrumColor::Red, false),
                (EliteDrumPad::Tom2, DrumColor::Yellow, false),
            ]
        );
    }

    #[test]
    fn tom_goes_left_of_cymbal() {
        let hi_hat = hit(EliteDrumPad::HiHat, DrumColor::Yellow, true);
        let tom1 = hit(EliteDrumPad::Tom1, DrumColor::Yellow, false);
        assert_eq!(
            lanes(resolve_collision(hi_hat, tom1)),
            [
                (EliteDrumPad::Tom1, DrumColor::Red, false),
                (EliteDrumPad::HiHat, DrumColor::Yellow, true),
            ]
        );

        let ride = hit(EliteDrumPad::Ride, DrumColor::Blue, true);
        let tom2 = hit(EliteDrumPad::Tom2, DrumColor::Blue, false);
        assert_eq!(
            lanes(resolve_collision(tom2, ride)),
            [
                (EliteDrumPad::Tom2, DrumColor::Yellow, false),
                (EliteDrumPad::Ride, DrumColor::Blue, true),
            ]
        );
    }
}
