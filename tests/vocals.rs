use chart_tracks::prelude::*;
use pretty_assertions::assert_eq;

fn lyric(tick: u32, text: &str) -> SourceText {
    SourceText::new(tick, format!("lyric {text}"))
}

fn solo_vocals() -> SourceTrack {
    SourceTrack::new(SourceInstrument::Vocals, SourceDifficulty::Expert)
        .with_notes([
            GenericNote::new(0, 60).with_length(120),
            GenericNote::new(240, 62).with_length(120),
            GenericNote::new(480, 64).with_length(120),
            GenericNote::new(960, 65).with_length(240),
        ])
        .with_phrases([
            SourcePhrase::new(PhraseType::LyricPhrase, 0, 960),
            SourcePhrase::new(PhraseType::LyricPhrase, 960, 960),
            SourcePhrase::new(PhraseType::StarPower, 960, 960),
        ])
        .with_text_events([
            lyric(0, "hel-"),
            lyric(240, "+"),
            lyric(480, "lo#"),
            lyric(960, "world"),
        ])
}

fn load(chart: &GenericChart, instrument: Instrument) -> LoadOutput<VocalsTrack> {
    ChartLoader::new(chart, LoadSettings::default())
        .load_vocals_track(instrument)
        .unwrap()
}

#[test]
fn notes_and_lyrics_are_grouped_into_phrases() {
    let chart = GenericChart::default().with_track(solo_vocals());
    let output = load(&chart, Instrument::Vocals);
    assert_eq!(output.warnings, vec![]);
    let track = output.track;
    assert_eq!(track.instrument, Instrument::Vocals);

    let [part] = track.parts.as_slice() else {
        panic!("solo vocals have one part");
    };
    assert_eq!(part.harmony_part, 0);
    let phrases: Vec<_> = part
        .phrases
        .iter()
        .map(|phrase| (phrase.tick, phrase.tick_length, phrase.star_power))
        .collect();
    assert_eq!(phrases, [(0, 960, false), (960, 960, true)]);

    let lyrics: Vec<Vec<_>> = part
        .phrases
        .iter()
        .map(|phrase| phrase.lyrics.iter().map(|lyric| lyric.text.as_str()).collect())
        .collect();
    assert_eq!(lyrics, [vec!["hel-", "lo"], vec!["world"]]);
}

#[test]
fn pitch_slides_continue_the_previous_note() {
    let chart = GenericChart::default().with_track(solo_vocals());
    let track = load(&chart, Instrument::Vocals).track;
    let first = track.parts.first().unwrap().phrases.first().unwrap();

    assert_eq!(first.notes.len(), 2);
    assert_eq!(first.notes.total_len(), 3);
    let &[sung, spoken] = first.notes.primary_indices() else {
        panic!("expected two notes");
    };
    let slide: Vec<_> = first.notes[sung]
        .children()
        .iter()
        .map(|&child| (first.notes[child].tick, first.notes[child].data.pitch))
        .collect();
    assert_eq!(slide, [(240, Some(62.0))]);
    assert_eq!(first.notes[sung].data.pitch, Some(60.0));
    assert!(first.notes[spoken].data.is_non_pitched());
    assert_eq!(first.notes[spoken].data.note_type, VocalNoteType::Lyric);
}

#[test]
fn percussion_notes_are_unpitched() {
    let chart = GenericChart::default().with_track(
        SourceTrack::new(SourceInstrument::Vocals, SourceDifficulty::Expert)
            .with_notes([GenericNote::new(0, 96).with_flags(SourceNoteFlags::VOCALS_PERCUSSION)])
            .with_phrases([SourcePhrase::new(PhraseType::LyricPhrase, 0, 480)]),
    );
    let track = load(&chart, Instrument::Vocals).track;
    let note = track.parts.first().unwrap().phrases.first().unwrap().notes.iter().next().unwrap().data;
    assert_eq!(
        note,
        VocalNote {
            pitch: None,
            note_type: VocalNoteType::Percussion,
            harmony_part: 0,
        }
    );
    assert!(track.range_shifts.is_empty());
}

#[test]
fn notes_before_their_phrase_are_skipped() {
    let chart = GenericChart::default().with_track(
        SourceTrack::new(SourceInstrument::Vocals, SourceDifficulty::Expert)
            .with_notes([GenericNote::new(0, 60), GenericNote::new(480, 62)])
            .with_phrases([SourcePhrase::new(PhraseType::LyricPhrase, 240, 480)]),
    );
    let output = load(&chart, Instrument::Vocals);
    assert_eq!(
        output.warnings,
        vec![LoadWarning::VocalNoteBeforePhrase {
            tick: 0,
            phrase_tick: 240,
        }]
    );
    let phrase = output.track.parts.first().unwrap().phrases.first().unwrap();
    let ticks: Vec<_> = phrase.notes.iter().map(|note| note.tick).collect();
    assert_eq!(ticks, [480]);
}

#[test]
fn phrases_without_notes_are_left_out() {
    let chart = GenericChart::default().with_track(
        SourceTrack::new(SourceInstrument::Vocals, SourceDifficulty::Expert)
            .with_notes([GenericNote::new(960, 60)])
            .with_phrases([
                SourcePhrase::new(PhraseType::LyricPhrase, 0, 480),
                SourcePhrase::new(PhraseType::LyricPhrase, 960, 480),
            ]),
    );
    let track = load(&chart, Instrument::Vocals).track;
    let ticks: Vec<_> = track.parts.first().unwrap().phrases.iter().map(|phrase| phrase.tick).collect();
    assert_eq!(ticks, [960]);
}

#[test]
fn hyphen_on_slide_moves_to_the_syllable() {
    let chart = GenericChart::default().with_track(
        SourceTrack::new(SourceInstrument::Vocals, SourceDifficulty::Expert)
            .with_notes([GenericNote::new(0, 60), GenericNote::new(240, 64)])
            .with_phrases([SourcePhrase::new(PhraseType::LyricPhrase, 0, 480)])
            .with_text_events([lyric(0, "hel"), lyric(240, "+-")]),
    );
    let track = load(&chart, Instrument::Vocals).track;
    let phrase = track.parts.first().unwrap().phrases.first().unwrap();
    let lyrics: Vec<_> = phrase.lyrics.iter().map(|lyric| lyric.text.as_str()).collect();
    assert_eq!(lyrics, ["hel-"]);
    assert_eq!(phrase.notes.len(), 1);
    assert_eq!(phrase.notes.total_len(), 2);
}

#[test]
fn harmony_parts_share_lyric_phrases_of_first_part() {
    let chart = GenericChart::default()
        .with_track(
            SourceTrack::new(SourceInstrument::Harmony1, SourceDifficulty::Expert)
                .with_notes([GenericNote::new(0, 60)])
                .with_phrases([SourcePhrase::new(PhraseType::LyricPhrase, 0, 960)])
                .with_text_events([lyric(0, "ah")]),
        )
        .with_track(
            SourceTrack::new(SourceInstrument::Harmony2, SourceDifficulty::Expert)
                .with_notes([GenericNote::new(480, 64)])
                .with_text_events([lyric(480, "oh")]),
        );
    let track = load(&chart, Instrument::Harmony).track;
    assert_eq!(track.instrument, Instrument::Harmony);

    let parts: Vec<_> = track
        .parts
        .iter()
        .map(|part| (part.harmony_part, part.phrases.len()))
        .collect();
    assert_eq!(parts, [(0, 1), (1, 1), (2, 0)]);

    let second = track.parts.get(1).unwrap().phrases.first().unwrap();
    assert_eq!(second.tick, 0);
    let note = second.notes.iter().next().unwrap();
    assert_eq!(note.data.harmony_part, 1);
    assert_eq!(note.data.pitch, Some(64.0));
    let lyrics: Vec<_> = second.lyrics.iter().map(|lyric| lyric.text.as_str()).collect();
    assert_eq!(lyrics, ["oh"]);
}

#[test]
fn pitch_range_covers_whole_song_without_markers() {
    let chart = GenericChart::default().with_track(solo_vocals());
    let track = load(&chart, Instrument::Vocals).track;
    let shifts: Vec<_> = track
        .range_shifts
        .iter()
        .map(|shift| (shift.tick, shift.tick_length, shift.minimum_pitch, shift.maximum_pitch))
        .collect();
    assert_eq!(shifts, [(0, 1200, 60.0, 65.0)]);
}

#[test]
fn range_shift_markers_split_pitch_ranges() {
    let chart = GenericChart::default().with_track(
        solo_vocals().with_text_events([SourceText::new(960, "range_shift")]),
    );
    let track = load(&chart, Instrument::Vocals).track;
    let shifts: Vec<_> = track
        .range_shifts
        .iter()
        .map(|shift| (shift.tick, shift.tick_length, shift.minimum_pitch, shift.maximum_pitch))
        .collect();
    assert_eq!(shifts, [(0, 959, 60.0, 62.0), (960, 240, 65.0, 65.0)]);
    assert_eq!(
        track.text_events.iter().map(|event| event.tick).collect::<Vec<_>>(),
        [0, 240, 480, 960, 960]
    );
}

#[test]
fn vocals_loader_rejects_other_instruments() {
    let chart = GenericChart::default();
    let loader = ChartLoader::new(&chart, LoadSettings::default());
    assert_eq!(
        loader.load_vocals_track(Instrument::ProKeys).unwrap_err(),
        LoadError::InstrumentMismatch {
            instrument: Instrument::ProKeys,
            expected: GameMode::Vocals,
        }
    );
    let empty = loader.load_vocals_track(Instrument::Vocals).unwrap().track;
    assert!(empty.is_empty());
    assert_eq!(empty.parts.len(), 1);
}
