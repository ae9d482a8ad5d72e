//! Phrase lookups and the flags derived from them.

use std::collections::BTreeMap;

use crate::{
    chart::{NoteFlags, Notes, PhraseType},
    settings::{LoadSettings, StarPowerSource},
    source::SourcePhrase,
};

/// Tracks the most recently started phrase of every type while walking forward through a track.
#[derive(Debug, Clone)]
pub(crate) struct PhraseTracker<'a> {
    phrases: &'a [SourcePhrase],
    cursor: usize,
    current: BTreeMap<PhraseType, &'a SourcePhrase>,
}

impl<'a> PhraseTracker<'a> {
    /// `phrases` must be ordered by tick.
    pub(crate) const fn new(phrases: &'a [SourcePhrase]) -> Self {
        Self {
            phrases,
            cursor: 0,
            current: BTreeMap::new(),
        }
    }

    /// Moves the cursor past every phrase starting at or before `tick`. Ticks must not decrease between calls.
    pub(crate) fn update(&mut self, tick: u32) {
        while let Some(phrase) = self.phrases.get(self.cursor) {
            if phrase.tick > tick {
                break;
            }
            self.current.insert(phrase.phrase_type, phrase);
            self.cursor += 1;
        }
    }

    /// The most recently started phrase of a type, whether or not it is still running.
    pub(crate) fn current(&self, phrase_type: PhraseType) -> Option<&'a SourcePhrase> {
        self.current.get(&phrase_type).copied()
    }

    /// The phrase of a type running at `tick`.
    pub(crate) fn active(&self, phrase_type: PhraseType, tick: u32) -> Option<&'a SourcePhrase> {
        self.current(phrase_type)
            .filter(|phrase| phrase.contains(tick))
    }
}

/// The phrases of a track after applying [`StarPowerSource`].
pub(crate) fn effective_phrases(phrases: &[SourcePhrase], settings: &LoadSettings) -> Vec<SourcePhrase> {
    let has_star_power = phrases
        .iter()
        .any(|phrase| phrase.phrase_type == PhraseType::StarPower);
    match settings.star_power_source {
        StarPowerSource::LegacySolo if !has_star_power => phrases
            .iter()
            .map(|phrase| match phrase.phrase_type {
                PhraseType::Solo => SourcePhrase {
                    phrase_type: PhraseType::StarPower,
                    ..*phrase
                },
                _ => *phrase,
            })
            .collect(),
        _ => phrases.to_vec(),
    }
}

/// Sets star power and solo flags on every chord, based on the neighbouring chords.
pub(crate) fn apply_general_flags<T>(notes: &mut Notes<T>, phrases: &[SourcePhrase]) {
    let mut tracker = PhraseTracker::new(phrases);
    let primaries = notes.primary_indices().to_vec();
    for &primary in &primaries {
        let note = &notes[primary];
        let tick = note.tick;
        let previous_tick = note.previous().map(|index| notes[index].tick);
        let next_tick = note.next().map(|index| notes[index].tick);
        tracker.update(tick);

        let outside =
            |phrase: &SourcePhrase, other: Option<u32>| other.is_none_or(|tick| !phrase.contains(tick));

        let mut flags = NoteFlags::empty();
        if let Some(star_power) = tracker.active(PhraseType::StarPower, tick) {
            flags |= NoteFlags::STAR_POWER;
            if outside(star_power, previous_tick) {
                flags |= NoteFlags::STAR_POWER_START;
            }
            if outside(star_power, next_tick) {
                flags |= NoteFlags::STAR_POWER_END;
            }
        }
        if let Some(solo) = tracker.active(PhraseType::Solo, tick) {
            if outside(solo, previous_tick) {
                flags |= NoteFlags::SOLO_START;
            }
            if outside(solo, next_tick) {
                flags |= NoteFlags::SOLO_END;
            }
        }

        if !flags.is_empty() {
            notes.for_chord_mut(primary, |note| note.flags |= flags);
        }
    }
}

/// Checks whether the note at `tick` is the one closest to the end of `phrase`.
///
/// `previous` and `next` are the ticks of the neighbouring chords. Exactly one chord around the end of a phrase
/// wins; on equal distances the earlier one does.
pub(crate) fn is_closest_to_end(
    phrase: &SourcePhrase,
    tick: u32,
    previous: Option<u32>,
    next: Option<u32>,
    resolution: u32,
) -> bool {
    let end = phrase.end();
    let closer = |other: u32| {
        let distance = tick.abs_diff(end);
        let other_distance = other.abs_diff(end);
        distance < other_distance || (distance == other_distance && tick < other)
    };

    if phrase.contains(tick) {
        return match next {
            Some(next) if !phrase.contains(next) => closer(next),
            Some(_) => false,
            None => true,
        };
    }

    match previous {
        None => tick.abs_diff(end) < resolution / 3,
        Some(previous) if tick >= end && previous < end => closer(previous),
        Some(_) => false,
    }
}
