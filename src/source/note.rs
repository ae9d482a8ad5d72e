//! Tick-indexed notes as handed over by a chart reader.

use bitflags::bitflags;

bitflags! {
    /// Authoring flags attached to a [`GenericNote`].
    ///
    /// The reader sets these from marker notes, sysex events or note modifiers. The meaning of a flag depends on
    /// the instrument the note belongs to; flags which have no meaning for an instrument are ignored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SourceNoteFlags: u32 {
        /// Flips the natural strum/HOPO state of a guitar note.
        const FORCED = 1 << 0;
        /// Forces a guitar note to be strummed.
        const FORCE_STRUM = 1 << 1;
        /// Forces a guitar note to be a hammer-on/pull-off.
        const FORCE_HOPO = 1 << 2;
        /// Marks a guitar note as a tap note.
        const TAP = 1 << 3;
        /// Promotes a drum tom to its cymbal.
        const CYMBAL = 1 << 4;
        /// Accented drum hit.
        const ACCENT = 1 << 5;
        /// Ghosted drum hit.
        const GHOST = 1 << 6;
        /// Only present at Expert+ (double kick).
        const INSTRUMENT_PLUS = 1 << 7;
        /// Elite drums flam.
        const FLAM = 1 << 8;
        /// Elite drums hi-hat played closed.
        const HAT_CLOSED = 1 << 9;
        /// Elite drums hi-hat whose openness does not matter.
        const HAT_INDIFFERENT = 1 << 10;
        /// Elite drums hat pedal splash.
        const SPLASH = 1 << 11;
        /// Elite drums hat pedal which only terminates an open hi-hat and is never played.
        const INVISIBLE_TERMINATOR = 1 << 12;
        /// Elite drums note forced onto the red lane when downcharted.
        const CHANNEL_RED = 1 << 13;
        /// Elite drums note forced onto the yellow lane when downcharted.
        const CHANNEL_YELLOW = 1 << 14;
        /// Elite drums note forced onto the blue lane when downcharted.
        const CHANNEL_BLUE = 1 << 15;
        /// Elite drums note forced onto the green lane when downcharted.
        const CHANNEL_GREEN = 1 << 16;
        /// Unpitched vocals percussion hit.
        const VOCALS_PERCUSSION = 1 << 17;
    }
}

// Serialized as the raw bits.
#[cfg(feature = "serde")]
impl serde::Serialize for SourceNoteFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.bits(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SourceNoteFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <u32 as serde::Deserialize>::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

/// A note of the generic chart representation.
///
/// `raw` is the instrument-specific pad, fret, key or pitch number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericNote {
    /// Position in ticks.
    pub tick: u32,
    /// Sustain length in ticks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub length: u32,
    /// Instrument-specific value.
    pub raw: u8,
    /// Authoring flags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: SourceNoteFlags,
}

impl GenericNote {
    /// Creates a note without sustain or flags.
    #[must_use]
    pub const fn new(tick: u32, raw: u8) -> Self {
        Self {
            tick,
            length: 0,
            raw,
            flags: SourceNoteFlags::empty(),
        }
    }

    /// Sets the sustain length.
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Adds authoring flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: SourceNoteFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Checks whether all flags of `flags` are set on this note.
    #[must_use]
    pub const fn has(&self, flags: SourceNoteFlags) -> bool {
        self.flags.contains(flags)
    }
}

/// A text event of the generic chart representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceText {
    /// Position in ticks.
    pub tick: u32,
    /// The event text, with any surrounding brackets already removed.
    pub text: String,
}

impl SourceText {
    /// Creates a text event.
    pub fn new(tick: u32, text: impl Into<String>) -> Self {
        Self {
            tick,
            text: text.into(),
        }
    }
}
