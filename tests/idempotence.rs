use chart_tracks::prelude::*;
use pretty_assertions::assert_eq;

fn full_chart() -> GenericChart {
    GenericChart::new(TempoMap::new(480, [TempoChange { tick: 0, bpm: 150.0 }]))
        .with_track(
            SourceTrack::new(SourceInstrument::Guitar, SourceDifficulty::Expert)
                .with_notes([
                    GenericNote::new(0, 0).with_length(480),
                    GenericNote::new(120, 1),
                    GenericNote::new(120, 2),
                    GenericNote::new(480, 5),
                ])
                .with_phrases([SourcePhrase::new(PhraseType::StarPower, 0, 240)]),
        )
        .with_track(
            SourceTrack::new(SourceInstrument::EliteDrums, SourceDifficulty::Expert).with_notes([
                GenericNote::new(0, 1),
                GenericNote::new(0, 3),
                GenericNote::new(0, 5),
                GenericNote::new(0, 6),
                GenericNote::new(240, 1).with_flags(SourceNoteFlags::INSTRUMENT_PLUS),
                GenericNote::new(480, 4),
                GenericNote::new(480, 9),
            ]),
        )
        .with_track(
            SourceTrack::new(SourceInstrument::ProKeys, SourceDifficulty::Expert)
                .with_notes([GenericNote::new(0, 3), GenericNote::new(480, 20)])
                .with_phrases([SourcePhrase::new(PhraseType::ProKeysRangeShift(3), 0, 0)]),
        )
        .with_track(
            SourceTrack::new(SourceInstrument::Vocals, SourceDifficulty::Expert)
                .with_notes([GenericNote::new(0, 60), GenericNote::new(240, 64)])
                .with_phrases([SourcePhrase::new(PhraseType::LyricPhrase, 0, 480)])
                .with_text_events([SourceText::new(0, "lyric la"), SourceText::new(240, "lyric +")]),
        )
        .with_global_events([
            SourceText::new(0, "phrase_start"),
            SourceText::new(0, "lyric la"),
            SourceText::new(480, "phrase_end"),
        ])
}

#[test]
fn loading_twice_gives_the_same_tracks() {
    let chart = full_chart();
    let loader = ChartLoader::new(&chart, LoadSettings::default());

    assert_eq!(
        loader.load_guitar_track::<FiveFretGuitarFret>(Instrument::FiveFretGuitar),
        loader.load_guitar_track::<FiveFretGuitarFret>(Instrument::FiveFretGuitar)
    );
    assert_eq!(
        loader.load_drums_track(Instrument::ProDrums),
        loader.load_drums_track(Instrument::ProDrums)
    );
    assert_eq!(
        loader.load_elite_drums_track(Instrument::EliteDrums),
        loader.load_elite_drums_track(Instrument::EliteDrums)
    );
    assert_eq!(
        loader.load_pro_keys_track(Instrument::ProKeys),
        loader.load_pro_keys_track(Instrument::ProKeys)
    );
    assert_eq!(
        loader.load_vocals_track(Instrument::Vocals),
        loader.load_vocals_track(Instrument::Vocals)
    );
    assert_eq!(loader.load_lyrics(), loader.load_lyrics());
}

#[test]
fn downcharting_twice_gives_the_same_tracks() {
    let chart = full_chart();
    let elite = ChartLoader::new(&chart, LoadSettings::default())
        .load_elite_drums_track(Instrument::EliteDrums)
        .unwrap()
        .track;

    for layout in [DrumsLayout::FourLane, DrumsLayout::FiveLane] {
        assert_eq!(downchart_track(&elite, layout), downchart_track(&elite, layout));
    }
    assert_eq!(downchart_to_source(&elite), downchart_to_source(&elite));
}
