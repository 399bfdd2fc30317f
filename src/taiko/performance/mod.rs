use std::cmp;

use crate::{
    any::{HitResultPriority, Performance},
    model::mods::GameMods,
    overrides::{ChartIdentity, ChartOverrides},
};

use self::calculator::TaikoPerformanceCalculator;

use super::{
    attributes::{TaikoDifficultyAttributes, TaikoPerformanceAttributes},
    score_state::TaikoScoreState,
};

mod calculator;

/// Performance calculator on osu!taiko maps.
///
/// # Example
///
/// ```
/// use relax_pp::taiko::{TaikoDifficultyAttributes, TaikoPerformance};
///
/// let attrs = TaikoDifficultyAttributes {
///     stars: 4.8,
///     great_hit_window: 35.0,
///     max_combo: 850,
///     ..Default::default()
/// };
///
/// let pp = TaikoPerformance::new(attrs)
///     .mods(8) // HD
///     .accuracy(97.5)
///     .misses(2)
///     .calculate()
///     .pp;
///
/// assert!(pp > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct TaikoPerformance<'a> {
    pub(crate) attrs: TaikoDifficultyAttributes,
    pub(crate) mods: GameMods,
    pub(crate) acc: Option<f64>,
    pub(crate) combo: Option<u32>,
    pub(crate) n300: Option<u32>,
    pub(crate) n100: Option<u32>,
    pub(crate) misses: Option<u32>,
    pub(crate) hitresult_priority: HitResultPriority,
    pub(crate) chart: ChartIdentity,
    pub(crate) overrides: Option<&'a ChartOverrides>,
}

impl<'a> TaikoPerformance<'a> {
    /// Create a new performance calculator for osu!taiko scores.
    ///
    /// The attributes must have been calculated for the same mods that will
    /// be specified through [`TaikoPerformance::mods`].
    pub fn new(attrs: impl Into<TaikoDifficultyAttributes>) -> Self {
        Self {
            attrs: attrs.into(),
            mods: GameMods::default(),
            acc: None,
            combo: None,
            n300: None,
            n100: None,
            misses: None,
            hitresult_priority: HitResultPriority::DEFAULT,
            chart: ChartIdentity::default(),
            overrides: None,
        }
    }

    /// Try to create a new performance calculator for osu!taiko scores.
    ///
    /// Returns `None` if the given value belongs to a different mode.
    pub fn try_new(perf: impl Into<Performance<'a>>) -> Option<Self> {
        if let Performance::Taiko(calc) = perf.into() {
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

    /// Specify how hitresults should be generated.
    ///
    /// Defaults to [`HitResultPriority::BestCase`].
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

    /// Specify the amount of misses of the play.
    pub const fn misses(mut self, n_misses: u32) -> Self {
        self.misses = Some(n_misses);

        self
    }

    /// Set the accuracy between `0.0` and `100.0`.
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc.clamp(0.0, 100.0) / 100.0);

        self
    }

    /// Provide parameters through an [`TaikoScoreState`].
    #[allow(clippy::needless_pass_by_value)]
    pub const fn state(mut self, state: TaikoScoreState) -> Self {
        let TaikoScoreState {
            max_combo,
            n300,
            n100,
            misses,
        } = state;

        self.combo = Some(max_combo);
        self.n300 = Some(n300);
        self.n100 = Some(n100);
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

    /// Create the [`TaikoScoreState`] that will be used for performance calculation.
    pub fn generate_state(&mut self) -> TaikoScoreState {
        // Every hit awards combo so the max combo is also the amount of hits.
        let total_result_count = self.attrs.max_combo;

        let misses = self.misses.map_or(0, |n| cmp::min(n, total_result_count));
        let n_remaining = total_result_count - misses;

        let mut n300 = self.n300.map_or(0, |n| cmp::min(n, n_remaining));
        let mut n100 = self.n100.map_or(0, |n| cmp::min(n, n_remaining - n300));

        match (self.acc, self.n300, self.n100) {
            (Some(acc), None, None) => {
                let n = f64::from(total_result_count);
                let raw_n100 = (1.0 - acc) * 2.0 * n - 2.0 * f64::from(misses);

                n100 = cmp::min(raw_n100.round().max(0.0) as u32, n_remaining);
                n300 = n_remaining - n100;
            }
            _ => {
                let remaining = n_remaining - n300 - n100;

                match self.hitresult_priority {
                    HitResultPriority::BestCase => match (self.n300, self.n100) {
                        (None, _) => n300 = remaining,
                        (_, None) => n100 = remaining,
                        _ => n300 += remaining,
                    },
                    HitResultPriority::WorstCase => match (self.n100, self.n300) {
                        (None, _) => n100 = remaining,
                        (_, None) => n300 = remaining,
                        _ => n100 += remaining,
                    },
                }
            }
        }

        let max_possible_combo = self.attrs.max_combo.saturating_sub(misses);

        let max_combo = self.combo.map_or(max_possible_combo, |combo| {
            cmp::min(combo, max_possible_combo)
        });

        self.combo = Some(max_combo);
        self.n300 = Some(n300);
        self.n100 = Some(n100);
        self.misses = Some(misses);

        TaikoScoreState {
            max_combo,
            n300,
            n100,
            misses,
        }
    }

    /// Calculate all performance related values, including pp and the
    /// per-skill breakdown.
    pub fn calculate(mut self) -> TaikoPerformanceAttributes {
        let state = self.generate_state();
        let overrides = self.overrides.unwrap_or_else(|| ChartOverrides::builtin());

        TaikoPerformanceCalculator::new(self.attrs, self.mods).calculate(
            state,
            &self.chart,
            overrides,
        )
    }
}

impl From<TaikoDifficultyAttributes> for TaikoPerformance<'_> {
    fn from(attrs: TaikoDifficultyAttributes) -> Self {
        Self::new(attrs)
    }
}

impl From<TaikoPerformanceAttributes> for TaikoPerformance<'_> {
    fn from(attrs: TaikoPerformanceAttributes) -> Self {
        Self::new(attrs.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        any::{DifficultyAttributes, PerformanceAttributes},
        osu::{OsuDifficultyAttributes, OsuPerformanceAttributes},
        overrides::OverrideRule,
    };

    use super::*;

    const N_OBJECTS: u32 = 289;

    fn attrs() -> TaikoDifficultyAttributes {
        TaikoDifficultyAttributes {
            stamina: 1.2,
            rhythm: 0.9,
            color: 1.4,
            reading: 0.1,
            great_hit_window: 35.0,
            stars: 3.1,
            max_combo: N_OBJECTS,
            is_convert: false,
        }
    }

    #[test]
    fn hitresults_n300_misses_best() {
        let state = TaikoPerformance::from(attrs())
            .combo(100)
            .n300(150)
            .misses(2)
            .hitresult_priority(HitResultPriority::BestCase)
            .generate_state();

        let expected = TaikoScoreState {
            max_combo: 100,
            n300: 150,
            n100: 137,
            misses: 2,
        };

        assert_eq!(state, expected);
    }

    #[test]
    fn hitresults_misses_worst() {
        let state = TaikoPerformance::from(attrs())
            .misses(2)
            .hitresult_priority(HitResultPriority::WorstCase)
            .generate_state();

        let expected = TaikoScoreState {
            max_combo: N_OBJECTS - 2,
            n300: 0,
            n100: 287,
            misses: 2,
        };

        assert_eq!(state, expected);
    }

    #[test]
    fn hitresults_from_accuracy() {
        let state = TaikoPerformance::from(attrs())
            .accuracy(95.0)
            .misses(3)
            .generate_state();

        assert_eq!(state.misses, 3);
        assert_eq!(state.total_hits(), N_OBJECTS);
        assert!((state.accuracy() - 0.95).abs() < 0.005);

        let state = TaikoPerformance::from(attrs())
            .accuracy(0.0)
            .generate_state();

        assert_eq!(state.n100, N_OBJECTS);
        assert_eq!(state.n300, 0);
    }

    #[test]
    fn create() {
        let _ = TaikoPerformance::new(TaikoDifficultyAttributes::default());
        let _ = TaikoPerformance::new(TaikoPerformanceAttributes::default());

        let _ = TaikoPerformance::try_new(TaikoDifficultyAttributes::default()).unwrap();
        let _ = TaikoPerformance::try_new(DifficultyAttributes::Taiko(
            TaikoDifficultyAttributes::default(),
        ))
        .unwrap();
        let _ = TaikoPerformance::try_new(PerformanceAttributes::Taiko(
            TaikoPerformanceAttributes::default(),
        ))
        .unwrap();

        let _ = TaikoDifficultyAttributes::default().performance();
        let _ = TaikoPerformanceAttributes::default().performance();

        assert!(TaikoPerformance::try_new(OsuDifficultyAttributes::default()).is_none());
        assert!(TaikoPerformance::try_new(OsuPerformanceAttributes::default()).is_none());
    }

    #[test]
    fn creator_override() {
        let mut overrides = ChartOverrides::empty();
        overrides.taiko.creators.insert(42, OverrideRule::new(0.8));

        let base = TaikoPerformance::from(attrs())
            .overrides(&overrides)
            .calculate();

        let overridden = TaikoPerformance::from(attrs())
            .creator_id(42)
            .overrides(&overrides)
            .calculate();

        assert!(base.pp > 0.0);
        assert!((overridden.pp - base.pp * 0.8).abs() < 1e-9);
    }
}
