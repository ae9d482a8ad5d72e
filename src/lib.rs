//! Derives playable note tracks from tick-indexed rhythm game charts.
//!
//! A chart reader hands over a [`source::ChartSource`]: per instrument and difficulty a list of generic notes,
//! phrases and text events. [`load::ChartLoader`] turns it into one typed track per instrument:
//!
//! - five- and six-fret guitar with strum, HOPO and tap notes,
//! - four-lane, pro and five-lane drums, converted between layouts as needed,
//! - elite drums, which [`downchart`] reduces to four- or five-lane drums,
//! - pro keys with range shifts,
//! - vocals, harmony and the karaoke lyrics track.
//!
//! In detail, our policies are:
//!
//! - Loading never fails on content. Irregular content is reported as [`load::LoadWarning`]s.
//! - Values which no reader can produce, such as unknown pads, panic.
//! - Loading is deterministic and keeps no state between calls.
//!
//! ```
//! use chart_tracks::prelude::*;
//!
//! let chart = GenericChart::new(TempoMap::new(480, [TempoChange { tick: 0, bpm: 120.0 }])).with_track(
//!     SourceTrack::new(SourceInstrument::Drums, SourceDifficulty::Expert).with_notes([
//!         GenericNote::new(0, 0),
//!         GenericNote::new(0, 2).with_flags(SourceNoteFlags::CYMBAL),
//!     ]),
//! );
//! let loader = ChartLoader::new(&chart, LoadSettings::default());
//! let drums = loader.load_drums_track(Instrument::ProDrums).unwrap().track;
//! let expert = drums.as_four_lane().unwrap().get_difficulty(Difficulty::Expert).unwrap();
//! assert_eq!(expert.notes.len(), 1);
//! assert_eq!(expert.notes.total_len(), 2);
//! ```

pub mod chart;
pub mod downchart;
pub mod load;
pub mod prelude;
pub mod settings;
pub mod source;
