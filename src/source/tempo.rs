//! Conversion from ticks to seconds.

use itertools::Itertools;

/// Tempo used before the first tempo change.
pub const DEFAULT_BPM: f64 = 120.0;

/// A tempo change.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoChange {
    /// Position in ticks.
    pub tick: u32,
    /// Beats per minute from this tick on.
    pub bpm: f64,
}

/// Resolution and tempo changes of a chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoMap {
    resolution: u32,
    changes: Vec<TempoChange>,
}

impl TempoMap {
    /// Creates a tempo map. Changes are sorted by tick, and changes with a non-positive tempo are dropped.
    #[must_use]
    pub fn new(resolution: u32, changes: impl IntoIterator<Item = TempoChange>) -> Self {
        let changes = changes
            .into_iter()
            .filter(|change| change.bpm > 0.0)
            .sorted_by_key(|change| change.tick)
            .collect();
        Self {
            resolution: resolution.max(1),
            changes,
        }
    }

    /// Ticks per beat.
    #[must_use]
    pub const fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The tempo changes, sorted by tick.
    #[must_use]
    pub fn changes(&self) -> &[TempoChange] {
        &self.changes
    }

    /// Converts a tick position into seconds from the start of the chart.
    #[must_use]
    pub fn tick_to_time(&self, tick: u32) -> f64 {
        let resolution = f64::from(self.resolution);
        let mut seconds = 0.0;
        let mut last_tick = 0;
        let mut bpm = DEFAULT_BPM;
        for change in self.changes.iter().take_while(|change| change.tick <= tick) {
            seconds += f64::from(change.tick - last_tick) * 60.0 / (bpm * resolution);
            last_tick = change.tick;
            bpm = change.bpm;
        }
        seconds + f64::from(tick - last_tick) * 60.0 / (bpm * resolution)
    }
}

impl Default for TempoMap {
    fn default() -> Self {
        Self::new(480, [])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_time_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn default_tempo_before_first_change() {
        let tempo = TempoMap::new(480, []);
        assert_time_close(0.5, tempo.tick_to_time(480));
        assert_time_close(2.0, tempo.tick_to_time(1920));
    }

    #[test]
    fn accumulates_across_changes() {
        let tempo = TempoMap::new(
            480,
            [
                TempoChange {
                    tick: 960,
                    bpm: 60.0,
                },
                TempoChange { tick: 0, bpm: 120.0 },
            ],
        );
        assert_time_close(1.0, tempo.tick_to_time(960));
        assert_time_close(2.0, tempo.tick_to_time(1440));
    }
}
