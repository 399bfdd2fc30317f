use std::cmp;

use crate::{
    any::{HitResultPriority, Performance},
    model::mods::GameMods,
    overrides::{ChartIdentity, ChartOverrides},
};

use self::calculator::OsuPerformanceCalculator;

pub use self::calculator::PERFORMANCE_BASE_MULTIPLIER;

use super::{
    attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes},
    score_state::OsuScoreState,
};

mod calculator;

/// Performance calculator on osu!standard maps.
///
/// # Example
///
/// ```
/// use relax_pp::osu::{OsuDifficultyAttributes, OsuPerformance};
///
/// let attrs = OsuDifficultyAttributes {
///     aim: 2.4,
///     speed: 2.2,
///     speed_note_count: 180.0,
///     slider_factor: 1.0,
///     od: 8.0,
///     ar: 9.0,
///     n_circles: 300,
///     n_sliders: 100,
///     max_combo: 520,
///     ..Default::default()
/// };
///
/// let fc = OsuPerformance::new(attrs.clone()).calculate();
/// let missed = OsuPerformance::new(attrs).misses(3).calculate();
///
/// assert!(missed.pp < fc.pp);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct OsuPerformance<'a> {
    pub(crate) attrs: OsuDifficultyAttributes,
    pub(crate) mods: GameMods,
    pub(crate) acc: Option<f64>,
    pub(crate) combo: Option<u32>,
    pub(crate) n300: Option<u32>,
    pub(crate) n100: Option<u32>,
    pub(crate) n50: Option<u32>,
    pub(crate) misses: Option<u32>,
    pub(crate) hitresult_priority: HitResultPriority,
    pub(crate) chart: ChartIdentity,
    pub(crate) overrides: Option<&'a ChartOverrides>,
}

impl<'a> OsuPerformance<'a> {
    /// Create a new performance calculator for osu!standard scores.
    ///
    /// The attributes must have been calculated for the same mods that will
    /// be specified through [`OsuPerformance::mods`].
    pub fn new(attrs: impl Into<OsuDifficultyAttributes>) -> Self {
        Self {
            attrs: attrs.into(),
            mods: GameMods::default(),
            acc: None,
            combo: None,
            n300: None,
            n100: None,
            n50: None,
            misses: None,
            hitresult_priority: HitResultPriority::DEFAULT,
            chart: ChartIdentity::default(),
            overrides: None,
        }
    }

    /// Try to create a new performance calculator for osu!standard scores.
    ///
    /// Returns `None` if the given value belongs to a different mode.
    pub fn try_new(perf: impl Into<Performance<'a>>) -> Option<Self> {
        if let Performance::Osu(calc) = perf.into() {
            Some(calc)
        } else {
            None
        }
    }

    /// Specify mods.
    ///
    /// Accepted types are
    /// - `u32`
    /// - [`rosu_mods::GameModsLegacy`]
    /// - [`rosu_mods::GameMods`]
    /// - [`rosu_mods::GameModsIntermode`]
    /// - [`&rosu_mods::GameModsIntermode`](rosu_mods::GameModsIntermode)
    ///
    /// See <https://github.com/ppy/osu-api/wiki#mods>
    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Specify the max combo of the play.
    pub const fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify the priority of hitresults.
    ///
    /// `HitResultPriority::BestCase` fills up unspecified hitresults with
    /// 300s first, `HitResultPriority::WorstCase` with 50s.
    pub const fn hitresult_priority(mut self, priority: HitResultPriority) -> Self {
        self.hitresult_priority = priority;

        self
    }

    /// Specify the amount of 300s of a play.
    pub const fn n300(mut self, n300: u32) -> Self {
        self.n300 = Some(n300);

        self
    }

    /// Specify the amount of 100s of a play.
    pub const fn n100(mut self, n100: u32) -> Self {
        self.n100 = Some(n100);

        self
    }

    /// Specify the amount of 50s of a play.
    pub const fn n50(mut self, n50: u32) -> Self {
        self.n50 = Some(n50);

        self
    }

    /// Specify the amount of misses of a play.
    pub const fn misses(mut self, n_misses: u32) -> Self {
        self.misses = Some(n_misses);

        self
    }

    /// Specify the accuracy of a play between `0.0` and `100.0`.
    /// This will be used to generate matching hitresults.
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc.clamp(0.0, 100.0) / 100.0);

        self
    }

    /// Provide parameters through an [`OsuScoreState`].
    #[allow(clippy::needless_pass_by_value)]
    pub const fn state(mut self, state: OsuScoreState) -> Self {
        let OsuScoreState {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        } = state;

        self.combo = Some(max_combo);
        self.n300 = Some(n300);
        self.n100 = Some(n100);
        self.n50 = Some(n50);
        self.misses = Some(misses);

        self
    }

    /// Specify the beatmap id so that its chart override may apply.
    pub const fn beatmap_id(mut self, beatmap_id: u32) -> Self {
        self.chart.beatmap_id = Some(beatmap_id);

        self
    }

    /// Specify the user id of the chart's creator so that their chart
    /// override may apply.
    pub const fn creator_id(mut self, creator_id: u32) -> Self {
        self.chart.creator_id = Some(creator_id);

        self
    }

    /// Specify beatmap id and creator id at once.
    pub const fn chart(mut self, chart: ChartIdentity) -> Self {
        self.chart = chart;

        self
    }

    /// Use a custom chart override table.
    ///
    /// Defaults to [`ChartOverrides::builtin`].
    pub const fn overrides(mut self, overrides: &'a ChartOverrides) -> Self {
        self.overrides = Some(overrides);

        self
    }

    /// Create the [`OsuScoreState`] that will be used for performance calculation.
    pub fn generate_state(&mut self) -> OsuScoreState {
        let attrs = &self.attrs;
        let n_objects = attrs.n_objects();
        let misses = self.misses.map_or(0, |n| cmp::min(n, n_objects));
        let n_remaining = n_objects - misses;

        let mut n300 = self.n300.map_or(0, |n| cmp::min(n, n_remaining));
        let mut n100 = self.n100.map_or(0, |n| cmp::min(n, n_remaining - n300));
        let mut n50 = self.n50.map_or(0, |n| cmp::min(n, n_remaining - n300 - n100));

        match (self.acc, self.n300, self.n100, self.n50) {
            (Some(acc), None, None, None) => {
                let target_total = (acc * f64::from(n_objects) * 6.0).round() as u32;
                let delta = target_total.saturating_sub(n_remaining);

                n300 = cmp::min(delta / 5, n_remaining);
                n100 = cmp::min(delta % 5, n_remaining - n300);
                n50 = n_remaining - n300 - n100;
            }
            _ => {
                let remaining = n_remaining - n300 - n100 - n50;

                match self.hitresult_priority {
                    HitResultPriority::BestCase => match (self.n300, self.n100, self.n50) {
                        (None, ..) => n300 = remaining,
                        (_, None, _) => n100 = remaining,
                        (.., None) => n50 = remaining,
                        _ => n300 += remaining,
                    },
                    HitResultPriority::WorstCase => match (self.n50, self.n100, self.n300) {
                        (None, ..) => n50 = remaining,
                        (_, None, _) => n100 = remaining,
                        (.., None) => n300 = remaining,
                        _ => n50 += remaining,
                    },
                }
            }
        }

        let max_possible_combo = attrs.max_combo.saturating_sub(misses);

        let max_combo = self.combo.map_or(max_possible_combo, |combo| {
            cmp::min(combo, max_possible_combo)
        });

        self.combo = Some(max_combo);
        self.n300 = Some(n300);
        self.n100 = Some(n100);
        self.n50 = Some(n50);
        self.misses = Some(misses);

        OsuScoreState {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        }
    }

    /// Calculate all performance related values, including pp and the
    /// per-skill breakdown.
    pub fn calculate(mut self) -> OsuPerformanceAttributes {
        let state = self.generate_state();
        let overrides = self.overrides.unwrap_or_else(|| ChartOverrides::builtin());

        OsuPerformanceCalculator::new(self.attrs, self.mods).calculate(
            state,
            &self.chart,
            overrides,
        )
    }
}

impl From<OsuDifficultyAttributes> for OsuPerformance<'_> {
    fn from(attrs: OsuDifficultyAttributes) -> Self {
        Self::new(attrs)
    }
}

impl From<OsuPerformanceAttributes> for OsuPerformance<'_> {
    fn from(attrs: OsuPerformanceAttributes) -> Self {
        Self::new(attrs.difficulty)
    }
}
