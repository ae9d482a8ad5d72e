use chart_tracks::prelude::*;
use pretty_assertions::assert_eq;

fn lyrics_of(events: impl IntoIterator<Item = (u32, &'static str)>) -> LoadOutput<LyricsTrack> {
    let chart = GenericChart::default()
        .with_global_events(events.into_iter().map(|(tick, text)| SourceText::new(tick, text)));
    ChartLoader::new(&chart, LoadSettings::default()).load_lyrics()
}

/// `(tick, tick_length, [(text, join_with_next)])` of every phrase.
fn summary(track: &LyricsTrack) -> Vec<(u32, u32, Vec<(&str, bool)>)> {
    track
        .phrases
        .iter()
        .map(|phrase| {
            (
                phrase.tick,
                phrase.tick_length,
                phrase
                    .lyrics
                    .iter()
                    .map(|lyric| (lyric.text.as_str(), lyric.join_with_next))
                    .collect(),
            )
        })
        .collect()
}

#[test]
fn syllables_join_into_words() {
    let output = lyrics_of([
        (0, "phrase_start"),
        (0, "lyric Hel-"),
        (120, "lyric lo"),
        (240, "lyric wo="),
        (360, "lyric rld"),
        (480, "phrase_end"),
    ]);
    assert_eq!(output.warnings, vec![]);
    assert_eq!(
        summary(&output.track),
        [(
            0,
            480,
            vec![("Hel", true), ("lo", false), ("wo-", true), ("rld", false)]
        )]
    );
    let phrase = output.track.phrases.first().unwrap();
    assert!((phrase.time_length - 0.5).abs() < 1e-9);
}

#[test]
fn quotes_and_symbols_are_stripped() {
    let output = lyrics_of([
        (0, "phrase_start"),
        (0, "lyric \"yeah\""),
        (120, "lyric la#"),
        (240, "lyric +"),
        (360, "lyric a_b"),
        (480, "phrase_end"),
    ]);
    assert_eq!(
        summary(&output.track),
        [(
            0,
            480,
            vec![("yeah", false), ("la", false), ("", true), ("a b", false)]
        )]
    );
}

#[test]
fn adjacent_phrases_share_a_tick() {
    let output = lyrics_of([
        (0, "phrase_start"),
        (0, "lyric one"),
        (480, "phrase_end"),
        (480, "phrase_start"),
        (480, "lyric two"),
        (960, "phrase_end"),
    ]);
    assert_eq!(output.warnings, vec![]);
    assert_eq!(
        summary(&output.track),
        [
            (0, 480, vec![("one", false)]),
            (480, 480, vec![("two", false)]),
        ]
    );
}

#[test]
fn start_and_end_on_one_tick_make_an_empty_phrase() {
    let output = lyrics_of([
        (100, "phrase_start"),
        (100, "phrase_end"),
        (100, "lyric hey"),
    ]);
    assert_eq!(summary(&output.track), [(100, 0, vec![("hey", false)])]);
}

#[test]
fn lyrics_on_end_tick_belong_to_closing_phrase() {
    let output = lyrics_of([
        (0, "phrase_start"),
        (0, "lyric a"),
        (480, "lyric b"),
        (480, "phrase_end"),
        (600, "lyric outside"),
    ]);
    assert_eq!(
        summary(&output.track),
        [(0, 480, vec![("a", false), ("b", false)])]
    );
}

#[test]
fn duplicate_markers_warn() {
    let output = lyrics_of([
        (0, "phrase_end"),
        (120, "phrase_start"),
        (120, "lyric a"),
        (240, "phrase_start"),
        (240, "lyric b"),
        (480, "phrase_end"),
    ]);
    assert_eq!(
        output.warnings,
        vec![
            LoadWarning::DuplicatePhraseEnd { tick: 0 },
            LoadWarning::DuplicatePhraseStart { tick: 240 },
        ]
    );
    assert_eq!(
        summary(&output.track),
        [(120, 360, vec![("a", false), ("b", false)])]
    );
}

#[test]
fn phrases_without_lyrics_are_left_out() {
    let output = lyrics_of([
        (0, "phrase_start"),
        (240, "phrase_end"),
        (480, "phrase_start"),
        (480, "lyric x"),
        (720, "phrase_end"),
    ]);
    assert_eq!(summary(&output.track), [(480, 240, vec![("x", false)])]);
}

#[test]
fn unterminated_phrase_closes_at_last_event() {
    let output = lyrics_of([
        (0, "phrase_start"),
        (0, "lyric a"),
        (240, "lyric b"),
        (360, "section chorus"),
    ]);
    assert_eq!(
        summary(&output.track),
        [(0, 360, vec![("a", false), ("b", false)])]
    );
}

#[test]
fn no_events_no_lyrics() {
    let output = lyrics_of([]);
    assert!(output.track.is_empty());
    assert_eq!(output.warnings, vec![]);
}
