//! Lyrics shown as karaoke text, independent of any vocals chart.

/// A displayed syllable.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricEvent {
    /// The text with all authoring symbols removed.
    pub text: String,
    /// Display the next syllable without a space in between.
    pub join_with_next: bool,
    /// Position in seconds.
    pub time: f64,
    /// Position in ticks.
    pub tick: u32,
}

/// A line of lyrics.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricsPhrase {
    /// Start in seconds.
    pub time: f64,
    /// Length in seconds.
    pub time_length: f64,
    /// Start in ticks.
    pub tick: u32,
    /// Length in ticks.
    pub tick_length: u32,
    /// Syllables ordered by tick.
    pub lyrics: Vec<LyricEvent>,
}

/// All lines of lyrics of a song.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LyricsTrack {
    /// Lines ordered by tick. Lines without syllables are left out.
    pub phrases: Vec<LyricsPhrase>,
}

impl LyricsTrack {
    /// Checks whether there is no line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
