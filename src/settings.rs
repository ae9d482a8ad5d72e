//! Settings which change how tracks are derived from a chart.

use crate::chart::drums::DrumsType;

/// Where star power phrases come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StarPowerSource {
    /// Use the star power phrases of the chart.
    #[default]
    Default,
    /// Older charts marked star power with solo phrases. If a track has no star power phrase at all, its solo phrases
    /// are used as star power instead.
    LegacySolo,
}

/// Settings for [`ChartLoader`](crate::load::ChartLoader).
///
/// ```
/// use chart_tracks::settings::LoadSettings;
///
/// let settings = LoadSettings::default()
///     .note_snap_threshold(10)
///     .chord_hopo_cancellation(true);
/// assert_eq!(settings.note_snap_threshold, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadSettings {
    /// Notes at most this many ticks after a chord are snapped into it.
    pub note_snap_threshold: u32,
    /// Sustains of at most this many ticks are removed.
    pub sustain_cutoff_threshold: u32,
    /// Maximum distance in ticks for a natural HOPO. `None` uses a 1/12 note at 192 ticks per beat, scaled to the
    /// chart resolution.
    pub hopo_threshold: Option<u32>,
    /// Turns a natural HOPO into a strum when the previous chord already contains its fret.
    pub chord_hopo_cancellation: bool,
    /// Lane layout of the drums track.
    pub drums_type: DrumsType,
    /// Where star power phrases come from.
    pub star_power_source: StarPowerSource,
}

impl LoadSettings {
    /// Sets [`Self::note_snap_threshold`].
    #[must_use]
    pub const fn note_snap_threshold(mut self, ticks: u32) -> Self {
        self.note_snap_threshold = ticks;
        self
    }

    /// Sets [`Self::sustain_cutoff_threshold`].
    #[must_use]
    pub const fn sustain_cutoff_threshold(mut self, ticks: u32) -> Self {
        self.sustain_cutoff_threshold = ticks;
        self
    }

    /// Sets [`Self::hopo_threshold`].
    #[must_use]
    pub const fn hopo_threshold(mut self, ticks: u32) -> Self {
        self.hopo_threshold = Some(ticks);
        self
    }

    /// Sets [`Self::chord_hopo_cancellation`].
    #[must_use]
    pub const fn chord_hopo_cancellation(mut self, enabled: bool) -> Self {
        self.chord_hopo_cancellation = enabled;
        self
    }

    /// Sets [`Self::drums_type`].
    #[must_use]
    pub const fn drums_type(mut self, drums_type: DrumsType) -> Self {
        self.drums_type = drums_type;
        self
    }

    /// Sets [`Self::star_power_source`].
    #[must_use]
    pub const fn star_power_source(mut self, source: StarPowerSource) -> Self {
        self.star_power_source = source;
        self
    }

    /// The HOPO threshold in ticks for a chart with `resolution` ticks per beat.
    #[must_use]
    pub const fn resolved_hopo_threshold(&self, resolution: u32) -> u32 {
        match self.hopo_threshold {
            Some(ticks) => ticks,
            None => 65 * resolution / 192,
        }
    }
}
