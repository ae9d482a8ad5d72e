//! Phrases of the generic chart representation.

/// The kind of a phrase.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhraseType {
    /// Star power phrase.
    StarPower,
    /// Solo section.
    Solo,
    /// Drum fill which activates star power at its end.
    DrumFill,
    /// Tremolo lane.
    TremoloLane,
    /// Trill lane.
    TrillLane,
    /// Player 1 section of a face-off.
    VersusPlayer1,
    /// Player 2 section of a face-off.
    VersusPlayer2,
    /// Pro keys range shift. The value is the range index from 0 (C) to 5 (A).
    ProKeysRangeShift(u8),
    /// Pro keys glissando section.
    ProKeysGlissando,
    /// Vocals lyric phrase.
    LyricPhrase,
    /// Vocals percussion phrase.
    PercussionPhrase,
    /// Elite drums section whose snare and hi-hat swap places in the four-lane chart.
    DiscoFlip,
    /// Big rock ending.
    BigRockEnding,
}

/// A typed interval of ticks.
///
/// A phrase with zero length is only active at exactly its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePhrase {
    /// Start in ticks.
    pub tick: u32,
    /// Length in ticks.
    pub length: u32,
    /// Kind of the phrase.
    pub phrase_type: PhraseType,
}

impl SourcePhrase {
    /// Creates a phrase.
    #[must_use]
    pub const fn new(phrase_type: PhraseType, tick: u32, length: u32) -> Self {
        Self {
            tick,
            length,
            phrase_type,
        }
    }

    /// The tick right after the phrase.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.tick.saturating_add(self.length)
    }

    /// Checks whether the phrase is active at `tick`.
    #[must_use]
    pub const fn contains(&self, tick: u32) -> bool {
        if self.length == 0 {
            tick == self.tick
        } else {
            self.tick <= tick && tick < self.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_phrase_is_active_on_its_tick_only() {
        let phrase = SourcePhrase::new(PhraseType::StarPower, 480, 0);
        assert!(!phrase.contains(479));
        assert!(phrase.contains(480));
        assert!(!phrase.contains(481));
    }

    #[test]
    fn phrase_end_is_exclusive() {
        let phrase = SourcePhrase::new(PhraseType::Solo, 100, 50);
        assert!(phrase.contains(100));
        assert!(phrase.contains(149));
        assert!(!phrase.contains(150));
        assert!(!phrase.contains(99));
    }
}
