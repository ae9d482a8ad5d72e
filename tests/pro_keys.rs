use chart_tracks::prelude::*;
use pretty_assertions::assert_eq;

fn load_expert(track: SourceTrack) -> LoadOutput<InstrumentTrack<ProKeysNote>> {
    let chart = GenericChart::default().with_track(track);
    ChartLoader::new(&chart, LoadSettings::default())
        .load_pro_keys_track(Instrument::ProKeys)
        .unwrap()
}

fn pro_keys_track() -> SourceTrack {
    SourceTrack::new(SourceInstrument::ProKeys, SourceDifficulty::Expert)
}

#[test]
fn keys_and_sustains() {
    let output = load_expert(pro_keys_track().with_notes([
        GenericNote::new(0, 0).with_length(720),
        GenericNote::new(0, 4).with_length(720),
        GenericNote::new(480, 24),
        GenericNote::new(960, 7).with_length(240),
        GenericNote::new(960, 11),
    ]));
    let expert = output.track.get_difficulty(Difficulty::Expert).unwrap();
    let notes: Vec<_> = expert
        .notes
        .iter()
        .map(|note| (note.data.key, note.data.extended_sustain, note.data.disjoint))
        .collect();
    assert_eq!(
        notes,
        [
            (0, true, false),
            (4, true, false),
            (24, false, false),
            (7, false, true),
            (11, false, true),
        ]
    );
}

#[test]
fn glissando_sections() {
    let output = load_expert(
        pro_keys_track()
            .with_notes([
                GenericNote::new(0, 0),
                GenericNote::new(480, 2),
                GenericNote::new(960, 4),
            ])
            .with_phrases([SourcePhrase::new(PhraseType::ProKeysGlissando, 480, 480)]),
    );
    let expert = output.track.get_difficulty(Difficulty::Expert).unwrap();
    let glissando: Vec<_> = expert.notes.iter().map(|note| note.data.glissando).collect();
    assert_eq!(glissando, [false, true, false]);
}

#[test]
fn range_shifts_last_until_next_shift() {
    let output = load_expert(
        pro_keys_track()
            .with_notes([
                GenericNote::new(0, 0),
                GenericNote::new(1920, 24).with_length(240),
            ])
            .with_phrases([
                SourcePhrase::new(PhraseType::ProKeysRangeShift(0), 0, 0),
                SourcePhrase::new(PhraseType::ProKeysRangeShift(6), 480, 0),
                SourcePhrase::new(PhraseType::ProKeysRangeShift(5), 960, 0),
            ]),
    );
    assert_eq!(
        output.warnings,
        vec![LoadWarning::InvalidRangeShift {
            tick: 480,
            reason: "unknown pro keys range 6".to_owned(),
        }]
    );
    let expert = output.track.get_difficulty(Difficulty::Expert).unwrap();
    let shifts: Vec<_> = expert
        .range_shifts
        .iter()
        .map(|shift| (shift.tick, shift.tick_length, shift.position, shift.size))
        .collect();
    assert_eq!(shifts, [(0, 959, 0, 17), (960, 1200, 9, 17)]);

    let last = expert.range_shifts.last().unwrap();
    assert!((last.time - 1.0).abs() < 1e-9);
    assert!((last.time_length - 1.25).abs() < 1e-9);
}

#[test]
fn difficulties_are_independent() {
    let chart = GenericChart::default()
        .with_track(pro_keys_track().with_notes([GenericNote::new(0, 12)]))
        .with_track(
            SourceTrack::new(SourceInstrument::ProKeys, SourceDifficulty::Easy)
                .with_notes([GenericNote::new(0, 0), GenericNote::new(480, 2)]),
        );
    let output = ChartLoader::new(&chart, LoadSettings::default())
        .load_pro_keys_track(Instrument::ProKeys)
        .unwrap();
    let lengths: Vec<_> = output
        .track
        .difficulties()
        .map(|chart| (chart.difficulty, chart.notes.len()))
        .collect();
    assert_eq!(lengths, [(Difficulty::Easy, 2), (Difficulty::Expert, 1)]);
}

#[test]
#[should_panic(expected = "invalid pro keys key")]
fn keys_beyond_the_keyboard_panic() {
    let _ = load_expert(pro_keys_track().with_notes([GenericNote::new(0, 25)]));
}
