//! Parsers for text events which carry loading directives.

/// Prefix of lyric events in the global event list.
pub(crate) const LYRIC_PREFIX: &str = "lyric ";
/// Global event starting a lyrics phrase.
pub(crate) const PHRASE_START: &str = "phrase_start";
/// Global event ending a lyrics phrase.
pub(crate) const PHRASE_END: &str = "phrase_end";
/// Vocals event starting a new pitch range window.
pub(crate) const VOCALS_RANGE_SHIFT: &str = "range_shift";
/// Prefix of five-fret range shift events.
pub(crate) const FIVE_FRET_RANGE_SHIFT: &str = "ld_range_shift";

/// The variant a `mix` event selects for the drums of a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DrumsMix {
    Normal,
    /// Snare and hi-hat swap lanes.
    DiscoFlip,
    /// Disco section which is charted already flipped.
    DiscoNoFlip,
    Easy,
    EasyNoKick,
}

/// Parses `mix <difficulty> drums<config><suffix>`.
pub(crate) fn parse_drums_mix(text: &str) -> Option<(u8, DrumsMix)> {
    let rest = text.trim().strip_prefix("mix ")?;
    let (difficulty, rest) = rest.trim_start().split_once(' ')?;
    let difficulty: u8 = difficulty.parse().ok().filter(|&d| d <= 3)?;
    let rest = rest.trim().strip_prefix("drums")?;
    let config_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if config_len == 0 {
        return None;
    }
    let mix = match rest.get(config_len..)? {
        "" => DrumsMix::Normal,
        "d" => DrumsMix::DiscoFlip,
        "dnoflip" => DrumsMix::DiscoNoFlip,
        "easy" => DrumsMix::Easy,
        "easynokick" => DrumsMix::EasyNoKick,
        _ => return None,
    };
    Some((difficulty, mix))
}

/// A parsed `ld_range_shift <difficulty> <range> [size]` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FiveFretRangeShift {
    pub(crate) difficulty: u8,
    pub(crate) range: u8,
    pub(crate) size: Option<u8>,
}

/// Parses the arguments of a five-fret range shift. `None` if the event is malformed.
pub(crate) fn parse_five_fret_range_shift(text: &str) -> Option<FiveFretRangeShift> {
    let mut parts = text.split_whitespace();
    if parts.next()? != FIVE_FRET_RANGE_SHIFT {
        return None;
    }
    let difficulty = parts.next()?.parse().ok()?;
    let range = parts.next()?.parse().ok()?;
    let size = match parts.next() {
        Some(size) => Some(size.parse().ok()?),
        None => None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(FiveFretRangeShift {
        difficulty,
        range,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drums_mix_events() {
        assert_eq!(parse_drums_mix("mix 3 drums0d"), Some((3, DrumsMix::DiscoFlip)));
        assert_eq!(parse_drums_mix("mix 0 drums2"), Some((0, DrumsMix::Normal)));
        assert_eq!(
            parse_drums_mix("mix 1 drums0dnoflip"),
            Some((1, DrumsMix::DiscoNoFlip))
        );
        assert_eq!(
            parse_drums_mix("mix 2 drums1easynokick"),
            Some((2, DrumsMix::EasyNoKick))
        );
        assert_eq!(parse_drums_mix("mix 4 drums0d"), None);
        assert_eq!(parse_drums_mix("mix 3 drumsd"), None);
        assert_eq!(parse_drums_mix("section verse"), None);
    }

    #[test]
    fn five_fret_range_shift_events() {
        assert_eq!(
            parse_five_fret_range_shift("ld_range_shift 3 1"),
            Some(FiveFretRangeShift {
                difficulty: 3,
                range: 1,
                size: None
            })
        );
        assert_eq!(
            parse_five_fret_range_shift("ld_range_shift 0 2 4"),
            Some(FiveFretRangeShift {
                difficulty: 0,
                range: 2,
                size: Some(4)
            })
        );
        assert_eq!(parse_five_fret_range_shift("ld_range_shift 0"), None);
        assert_eq!(parse_five_fret_range_shift("ld_range_shift a b"), None);
        assert_eq!(parse_five_fret_range_shift("ld_range_shift 1 2 3 4"), None);
    }
}
