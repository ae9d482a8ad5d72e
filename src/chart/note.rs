//! Derived notes and the chord graph connecting them.

use std::ops::{Index, IndexMut};

use bitflags::bitflags;

/// Index of a note inside its [`Notes`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteIndex(usize);

impl NoteIndex {
    /// Create a new `NoteIndex`.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }
}

bitflags! {
    /// Flags shared by the notes of every instrument. These are always derived from phrases.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NoteFlags: u8 {
        /// Inside a star power phrase.
        const STAR_POWER = 1 << 0;
        /// First note of a star power phrase.
        const STAR_POWER_START = 1 << 1;
        /// Last note of a star power phrase.
        const STAR_POWER_END = 1 << 2;
        /// First note of a solo.
        const SOLO_START = 1 << 3;
        /// Last note of a solo.
        const SOLO_END = 1 << 4;
    }
}

/// A derived note with an instrument-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Note<T> {
    /// The instrument-specific payload.
    pub data: T,
    /// Phrase-derived flags.
    pub flags: NoteFlags,
    /// Position in seconds.
    pub time: f64,
    /// Sustain length in seconds.
    pub time_length: f64,
    /// Position in ticks.
    pub tick: u32,
    /// Sustain length in ticks.
    pub tick_length: u32,
    children: Vec<NoteIndex>,
    previous: Option<NoteIndex>,
    next: Option<NoteIndex>,
}

impl<T> Note<T> {
    /// Creates an unlinked note.
    pub const fn new(data: T, tick: u32, tick_length: u32, time: f64, time_length: f64) -> Self {
        Self {
            data,
            flags: NoteFlags::empty(),
            time,
            time_length,
            tick,
            tick_length,
            children: Vec::new(),
            previous: None,
            next: None,
        }
    }

    /// The other notes of the chord this note leads. Always empty for children.
    #[must_use]
    pub fn children(&self) -> &[NoteIndex] {
        &self.children
    }

    /// The nearest chord before this note.
    #[must_use]
    pub const fn previous(&self) -> Option<NoteIndex> {
        self.previous
    }

    /// The nearest chord after this note.
    #[must_use]
    pub const fn next(&self) -> Option<NoteIndex> {
        self.next
    }

    /// Checks whether the note leads a chord of more than one note.
    #[must_use]
    pub fn is_chord(&self) -> bool {
        !self.children.is_empty()
    }

    /// The sustain end in ticks.
    #[must_use]
    pub const fn tick_end(&self) -> u32 {
        self.tick.saturating_add(self.tick_length)
    }
}

/// An arena of notes grouped into chords.
///
/// Every chord has one primary note; the other notes of the chord are its children and share its tick. Primary
/// notes are strictly ordered by tick. `previous` and `next` of every note point to the primary of the neighbouring
/// chord.
#[derive(Debug, Clone, PartialEq)]
pub struct Notes<T> {
    arena: Vec<Note<T>>,
    primaries: Vec<NoteIndex>,
}

impl<T> Default for Notes<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Notes<T> {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arena: Vec::new(),
            primaries: Vec::new(),
        }
    }

    /// Number of chords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primaries.len()
    }

    /// Checks whether there is no note.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primaries.is_empty()
    }

    /// Number of notes, children included.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.arena.len()
    }

    /// Gets a note by index.
    #[must_use]
    pub fn get(&self, index: NoteIndex) -> Option<&Note<T>> {
        self.arena.get(index.0)
    }

    /// Gets a mutable note by index.
    pub fn get_mut(&mut self, index: NoteIndex) -> Option<&mut Note<T>> {
        self.arena.get_mut(index.0)
    }

    /// Indices of the primary notes in tick order.
    #[must_use]
    pub fn primary_indices(&self) -> &[NoteIndex] {
        &self.primaries
    }

    /// Primary notes in tick order.
    pub fn primaries(&self) -> impl DoubleEndedIterator<Item = &Note<T>> + '_ {
        self.primaries.iter().map(|&index| &self[index])
    }

    /// The primary note followed by its children.
    pub fn chord(&self, primary: NoteIndex) -> impl Iterator<Item = &Note<T>> + '_ {
        std::iter::once(primary)
            .chain(self[primary].children.iter().copied())
            .map(|index| &self[index])
    }

    /// All notes in chord order.
    pub fn iter(&self) -> impl Iterator<Item = &Note<T>> + '_ {
        self.primaries
            .iter()
            .flat_map(|&primary| self.chord(primary))
    }

    /// The last primary note.
    #[must_use]
    pub fn last(&self) -> Option<&Note<T>> {
        self.primaries.last().map(|&index| &self[index])
    }

    /// Adds a note, joining it to the current chord when it is on the same tick or at most `snap_threshold` ticks
    /// later. A snapped note takes the tick and time of the chord.
    pub fn push_chained(&mut self, mut note: Note<T>, snap_threshold: u32) -> NoteIndex {
        let index = NoteIndex(self.arena.len());
        let Some(&parent) = self.primaries.last() else {
            self.arena.push(note);
            self.primaries.push(index);
            return index;
        };

        let (parent_tick, parent_time, parent_previous) = {
            let parent = &self[parent];
            (parent.tick, parent.time, parent.previous)
        };
        let joins_chord =
            note.tick == parent_tick || note.tick.saturating_sub(parent_tick) <= snap_threshold;
        if joins_chord {
            note.tick = parent_tick;
            note.time = parent_time;
            note.previous = parent_previous;
            note.next = None;
            self.arena.push(note);
            self[parent].children.push(index);
            return index;
        }

        let siblings = self[parent].children.clone();
        for member in std::iter::once(parent).chain(siblings) {
            self[member].next = Some(index);
        }
        note.previous = Some(parent);
        self.arena.push(note);
        self.primaries.push(index);
        index
    }

    /// Adds a note as a child of `parent` regardless of its tick. Used for vocals notes which continue a previous
    /// note.
    pub(crate) fn push_child(&mut self, parent: NoteIndex, mut note: Note<T>) -> NoteIndex {
        let index = NoteIndex(self.arena.len());
        note.previous = None;
        note.next = None;
        self.arena.push(note);
        self[parent].children.push(index);
        index
    }

    /// Applies `f` to every note of the chord led by `primary`.
    pub(crate) fn for_chord_mut(&mut self, primary: NoteIndex, mut f: impl FnMut(&mut Note<T>)) {
        let children = self[primary].children.clone();
        for member in std::iter::once(primary).chain(children) {
            f(&mut self[member]);
        }
    }
}

impl<T> Index<NoteIndex> for Notes<T> {
    type Output = Note<T>;

    fn index(&self, index: NoteIndex) -> &Self::Output {
        &self.arena[index.0]
    }
}

impl<T> IndexMut<NoteIndex> for Notes<T> {
    fn index_mut(&mut self, index: NoteIndex) -> &mut Self::Output {
        &mut self.arena[index.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(tick: u32) -> Note<u32> {
        Note::new(tick, tick, 0, f64::from(tick) / 1000.0, 0.0)
    }

    #[test]
    fn same_tick_joins_chord() {
        let mut notes = Notes::new();
        let a = notes.push_chained(note(0), 0);
        let b = notes.push_chained(note(0), 0);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[a].children(), &[b]);
        assert_eq!(notes[b].previous(), None);
    }

    #[test]
    fn snap_threshold_is_inclusive() {
        let mut notes = Notes::new();
        let a = notes.push_chained(note(100), 5);
        let b = notes.push_chained(note(105), 5);
        let c = notes.push_chained(note(111), 5);
        assert_eq!(notes[a].children(), &[b]);
        assert_eq!(notes[b].tick, 100);
        assert!((notes[b].time - 0.1).abs() < f64::EPSILON);
        assert_eq!(notes.primary_indices(), &[a, c]);
    }

    #[test]
    fn links_every_chord_member_to_next_chord() {
        let mut notes = Notes::new();
        let a = notes.push_chained(note(0), 0);
        let b = notes.push_chained(note(0), 0);
        let c = notes.push_chained(note(10), 0);
        let d = notes.push_chained(note(10), 0);
        let e = notes.push_chained(note(20), 0);
        assert_eq!(notes[a].next(), Some(c));
        assert_eq!(notes[b].next(), Some(c));
        assert_eq!(notes[c].previous(), Some(a));
        assert_eq!(notes[d].previous(), Some(a));
        assert_eq!(notes[c].next(), Some(e));
        assert_eq!(notes[d].next(), Some(e));
        assert_eq!(notes[e].previous(), Some(c));
        assert_eq!(notes[e].next(), None);
    }
}
