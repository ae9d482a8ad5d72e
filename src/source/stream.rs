//! Neighbour queries over a tick-ordered slice of source notes.

use std::ops::Range;

use super::note::GenericNote;

/// A filtered, tick-ordered view of source notes, grouped into chords.
///
/// A chord starts with its first note and takes every later note at most `snap_threshold` ticks after it, the
/// same grouping [`Notes::push_chained`](crate::chart::Notes::push_chained) builds. All neighbour queries skip over
/// the notes of the same chord.
#[derive(Debug, Clone)]
pub(crate) struct NoteStream<'a> {
    notes: Vec<&'a GenericNote>,
    chords: Vec<Range<usize>>,
    chord_of: Vec<usize>,
}

impl<'a> NoteStream<'a> {
    pub(crate) fn new(notes: impl IntoIterator<Item = &'a GenericNote>, snap_threshold: u32) -> Self {
        let mut notes: Vec<_> = notes.into_iter().collect();
        notes.sort_by_key(|note| note.tick);

        let mut chords: Vec<Range<usize>> = Vec::new();
        let mut chord_of = Vec::with_capacity(notes.len());
        let mut chord_tick = None;
        for (index, note) in notes.iter().enumerate() {
            let snaps = chord_tick.is_some_and(|tick| note.tick - tick <= snap_threshold);
            if let Some(chord) = chords.last_mut().filter(|_| snaps) {
                chord.end = index + 1;
            } else {
                chord_tick = Some(note.tick);
                chords.push(index..index + 1);
            }
            chord_of.push(chords.len() - 1);
        }
        Self {
            notes,
            chords,
            chord_of,
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&'a GenericNote> {
        self.notes.get(index).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &'a GenericNote)> + '_ {
        self.notes.iter().copied().enumerate()
    }

    fn chord_index(&self, index: usize) -> Option<usize> {
        self.chord_of.get(index).copied()
    }

    /// Indices of all notes in the chord of `index`.
    pub(crate) fn chord_range(&self, index: usize) -> Range<usize> {
        self.chord_index(index)
            .and_then(|chord| self.chords.get(chord))
            .cloned()
            .unwrap_or(index..index)
    }

    pub(crate) fn chord(&self, index: usize) -> impl Iterator<Item = &'a GenericNote> + '_ {
        self.chord_range(index).filter_map(|i| self.get(i))
    }

    pub(crate) fn is_chord(&self, index: usize) -> bool {
        self.chord_range(index).len() > 1
    }

    /// The first note of the previous chord.
    pub(crate) fn previous_separate(&self, index: usize) -> Option<usize> {
        let chord = self.chord_index(index)?.checked_sub(1)?;
        self.chords.get(chord).map(|range| range.start)
    }

    /// The first note of the next chord.
    pub(crate) fn next_separate(&self, index: usize) -> Option<usize> {
        let chord = self.chord_index(index)? + 1;
        self.chords.get(chord).map(|range| range.start)
    }
}
