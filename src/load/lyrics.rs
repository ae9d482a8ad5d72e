//! The karaoke lyrics track, read from the song-wide `phrase_start`, `phrase_end` and `lyric` events.

use crate::{
    chart::lyrics::{LyricEvent, LyricsPhrase, LyricsTrack},
    source::{ChartSource, SourceText},
};

use super::{
    ChartLoader, LoadOutput, LoadWarning,
    text_events::{LYRIC_PREFIX, PHRASE_END, PHRASE_START},
};

/// Joins two syllables into one word.
const JOIN_SYMBOL: char = '-';
/// Joins two syllables and is displayed as a hyphen.
const JOIN_HYPHEN_SYMBOL: char = '=';
/// Slides from the previous note.
pub(crate) const PITCH_SLIDE_SYMBOL: char = '+';
/// Marks a note whose pitch is not judged.
pub(crate) const NON_PITCHED_SYMBOLS: [char; 3] = ['#', '^', '*'];
/// Recalculates the vocals pitch range.
pub(crate) const RANGE_SHIFT_SYMBOL: char = '%';
/// Two lexical syllables sung as one.
const JOINED_SYLLABLE_SYMBOL: char = '§';
/// Stands in for a space.
const SPACE_ESCAPE_SYMBOL: char = '_';

/// Symbols removed from vocals lyrics.
const VOCALS_STRIPPED: [char; 7] = ['+', '#', '^', '*', '%', '/', '$'];

/// Checks whether `c` has a meaning when it ends a lyric.
pub(crate) fn is_lyric_symbol(c: char) -> bool {
    VOCALS_STRIPPED.contains(&c)
        || matches!(
            c,
            JOIN_SYMBOL | JOIN_HYPHEN_SYMBOL | JOINED_SYLLABLE_SYMBOL | SPACE_ESCAPE_SYMBOL
        )
}

/// Removes authoring symbols from a lyric shown on the vocals track. Hyphens stay to show word joins.
pub(crate) fn strip_for_vocals(lyric: &str) -> String {
    lyric
        .chars()
        .filter(|c| !VOCALS_STRIPPED.contains(c))
        .map(|c| match c {
            JOIN_HYPHEN_SYMBOL => '-',
            JOINED_SYLLABLE_SYMBOL => '‿',
            SPACE_ESCAPE_SYMBOL => ' ',
            other => other,
        })
        .collect()
}

/// Removes authoring symbols from a lyric shown on the lyrics track.
pub(crate) fn strip_for_lyrics(lyric: &str) -> String {
    lyric
        .chars()
        .filter(|&c| c != JOIN_SYMBOL && !VOCALS_STRIPPED.contains(&c))
        .map(|c| match c {
            JOIN_HYPHEN_SYMBOL => '-',
            JOINED_SYLLABLE_SYMBOL | SPACE_ESCAPE_SYMBOL => ' ',
            other => other,
        })
        .collect()
}

/// The lyric of a `lyric ` event, or `None` for other events.
pub(crate) fn lyric_text(text: &str) -> Option<&str> {
    text.strip_prefix(LYRIC_PREFIX).map(str::trim_start)
}

impl<S: ChartSource + ?Sized> ChartLoader<'_, S> {
    /// Loads the lyrics track from the song-wide events.
    ///
    /// A `phrase_end` and a `phrase_start` on the same tick end the open line and start the next one, and lyrics on
    /// that tick belong to the new line. A start and an end on the same tick with no open line make a line of zero
    /// length. Lines without lyrics are left out.
    #[must_use]
    pub fn load_lyrics(&self) -> LoadOutput<LyricsTrack> {
        let mut builder = LyricsBuilder {
            source: self.source,
            output: LoadOutput::new(LyricsTrack::default()),
            open: None,
            lyrics: Vec::new(),
        };

        let events = self.source.global_events();
        for chunk in events.chunk_by(|a, b| a.tick == b.tick) {
            builder.process_tick(chunk);
        }
        if let Some(start) = builder.open
            && let Some(last) = events.last()
        {
            log::debug!("closing unterminated lyrics phrase from tick {start} at tick {}", last.tick);
            builder.close(last.tick);
        }
        builder.output
    }
}

struct LyricsBuilder<'a, S: ?Sized> {
    source: &'a S,
    output: LoadOutput<LyricsTrack>,
    open: Option<u32>,
    lyrics: Vec<LyricEvent>,
}

impl<S: ChartSource + ?Sized> LyricsBuilder<'_, S> {
    /// Handles all events on one tick.
    fn process_tick(&mut self, events: &[SourceText]) {
        let Some(tick) = events.first().map(|event| event.tick) else {
            return;
        };
        let start = events.iter().any(|event| event.text == PHRASE_START);
        let end = events.iter().any(|event| event.text == PHRASE_END);
        let source = self.source;
        let lyrics = events
            .iter()
            .filter(|event| event.text != PHRASE_START && event.text != PHRASE_END)
            .filter_map(|event| parse_lyric(source, event));

        match (start, end, self.open) {
            (true, true, Some(_)) => {
                self.close(tick);
                self.open = Some(tick);
                self.lyrics.extend(lyrics);
            }
            (true, true, None) => {
                self.open = Some(tick);
                self.lyrics.extend(lyrics);
                self.close(tick);
            }
            (true, false, Some(_)) => {
                self.output.warn(LoadWarning::DuplicatePhraseStart { tick });
                self.lyrics.extend(lyrics);
            }
            (true, false, None) => {
                self.open = Some(tick);
                self.lyrics.extend(lyrics);
            }
            (false, true, Some(_)) => {
                self.lyrics.extend(lyrics);
                self.close(tick);
            }
            (false, true, None) => {
                self.output.warn(LoadWarning::DuplicatePhraseEnd { tick });
            }
            (false, false, Some(_)) => self.lyrics.extend(lyrics),
            (false, false, None) => {}
        }
    }

    fn close(&mut self, end: u32) {
        let Some(start) = self.open.take() else {
            return;
        };
        let lyrics = std::mem::take(&mut self.lyrics);
        if lyrics.is_empty() {
            return;
        }
        let time = self.source.tick_to_time(start);
        self.output.track.phrases.push(LyricsPhrase {
            time,
            time_length: self.source.tick_to_time(end) - time,
            tick: start,
            tick_length: end - start,
            lyrics,
        });
    }
}

fn parse_lyric<S: ChartSource + ?Sized>(source: &S, event: &SourceText) -> Option<LyricEvent> {
    let lyric = lyric_text(&event.text)?.trim();
    let lyric = lyric.strip_prefix('"').unwrap_or(lyric);
    let lyric = lyric.strip_suffix('"').unwrap_or(lyric).trim();

    let mut join_with_next = lyric.ends_with([JOIN_SYMBOL, JOIN_HYPHEN_SYMBOL]);
    let mut text = strip_for_lyrics(lyric);
    if text.trim().is_empty() {
        // Kept so that timing gimmicks built from empty lyrics still work.
        join_with_next = true;
        text.clear();
    }
    Some(LyricEvent {
        text,
        join_with_next,
        time: source.tick_to_time(event.tick),
        tick: event.tick,
    })
}
