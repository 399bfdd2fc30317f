use rosu_map::section::general::GameMode;

use crate::{
    any::performance::pipeline::{self, PerformancePipeline, ScoreContext},
    model::mods::GameMods,
    overrides::{ChartIdentity, ChartOverrides},
    taiko::{TaikoDifficultyAttributes, TaikoPerformanceAttributes, TaikoScoreState},
};

const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.13;

const DIFFICULTY: usize = 0;
const ACC: usize = 1;

/// Performance calculation of a single osu!taiko score.
pub(crate) struct TaikoPerformanceCalculator {
    attrs: TaikoDifficultyAttributes,
    mods: GameMods,
}

impl TaikoPerformanceCalculator {
    pub const fn new(attrs: TaikoDifficultyAttributes, mods: GameMods) -> Self {
        Self { attrs, mods }
    }

    pub fn calculate(
        self,
        state: TaikoScoreState,
        chart: &ChartIdentity,
        overrides: &ChartOverrides,
    ) -> TaikoPerformanceAttributes {
        let ctx = ScoreContext {
            max_combo: state.max_combo,
            n300: state.n300,
            n100: state.n100,
            n50: 0,
            misses: state.misses,
            acc: state.accuracy(),
            effective_miss_count: 0.0,
        };

        let output = pipeline::calculate(&self, ctx, chart, overrides);

        TaikoPerformanceAttributes {
            difficulty: self.attrs,
            pp: output.pp,
            pp_acc: output.values[ACC],
            pp_difficulty: output.values[DIFFICULTY],
            effective_miss_count: output.effective_miss_count,
        }
    }

    fn compute_difficulty_value(&self, ctx: &ScoreContext) -> f64 {
        let attrs = &self.attrs;

        let mut difficulty_value =
            (5.0 * (attrs.stars / 0.115).max(1.0) - 4.0).powf(2.25) / 1150.0;

        let len_bonus = 1.0 + 0.1 * (f64::from(ctx.total_hits()) / 1500.0).min(1.0);
        difficulty_value *= len_bonus;

        difficulty_value *= 0.986_f64.powf(ctx.effective_miss_count);

        if self.mods.ez() {
            difficulty_value *= 0.985;
        }

        if self.mods.hd() {
            difficulty_value *= 1.025;
        }

        if self.mods.hr() {
            difficulty_value *= 1.05;
        }

        if self.mods.fl() {
            difficulty_value *= 1.05 * len_bonus;
        }

        difficulty_value * ctx.acc.powf(2.0)
    }

    fn compute_accuracy_value(&self, ctx: &ScoreContext) -> f64 {
        let attrs = &self.attrs;

        if attrs.great_hit_window <= 0.0 {
            return 0.0;
        }

        let mut acc_value = (60.0 / attrs.great_hit_window).powf(1.1)
            * ctx.acc.powf(8.0)
            * attrs.stars.powf(0.4)
            * 27.0;

        let len_bonus = (f64::from(ctx.total_hits()) / 1500.0).powf(0.3).min(1.15);
        acc_value *= len_bonus;

        // * Slight HDFL Bonus for accuracy. A clamp is used to prevent against negative values
        if self.mods.hd() && self.mods.fl() {
            acc_value *= (1.075 * len_bonus).max(1.05);
        }

        acc_value
    }
}

impl PerformancePipeline<2> for TaikoPerformanceCalculator {
    const MODE: GameMode = GameMode::Taiko;

    fn mods(&self) -> &GameMods {
        &self.mods
    }

    fn is_empty(&self) -> bool {
        self.attrs.max_combo == 0
    }

    fn effective_miss_count(&self, ctx: &ScoreContext) -> f64 {
        let successful = ctx.total_successful_hits();

        if successful == 0 {
            return 0.0;
        }

        // * The effectiveMissCount is calculated by gaining a ratio for totalSuccessfulHits and increasing the miss penalty for shorter object counts lower than 1000.
        (1000.0 / f64::from(successful)).max(1.0) * f64::from(ctx.misses)
    }

    fn multiplier(&self, _: &ScoreContext) -> f64 {
        // * This is being adjusted to keep the final pp value scaled around what it used to be when changing things
        let mut multiplier = PERFORMANCE_BASE_MULTIPLIER;

        if self.mods.hd() {
            multiplier *= 1.075;
        }

        if self.mods.ez() {
            multiplier *= 0.975;
        }

        multiplier
    }

    fn skill_values(&self, ctx: &ScoreContext) -> [f64; 2] {
        let mut values = [0.0; 2];

        values[DIFFICULTY] = self.compute_difficulty_value(ctx);
        values[ACC] = self.compute_accuracy_value(ctx);

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> TaikoDifficultyAttributes {
        TaikoDifficultyAttributes {
            stars: 5.0,
            great_hit_window: 30.0,
            max_combo: 1000,
            ..Default::default()
        }
    }

    fn ctx(n300: u32, n100: u32, misses: u32) -> ScoreContext {
        let state = TaikoScoreState {
            max_combo: n300 + n100,
            n300,
            n100,
            misses,
        };

        ScoreContext {
            max_combo: state.max_combo,
            n300,
            n100,
            misses,
            acc: state.accuracy(),
            ..Default::default()
        }
    }

    fn calc(mods: u32) -> TaikoPerformanceCalculator {
        TaikoPerformanceCalculator::new(attrs(), GameMods::from(mods))
    }

    #[test]
    fn effective_misses_scale_short_maps() {
        let calc = calc(0);

        let emc = calc.effective_miss_count(&ctx(400, 100, 5));
        assert!((emc - 10.0).abs() < 1e-12);

        let emc = calc.effective_miss_count(&ctx(1500, 0, 5));
        assert!((emc - 5.0).abs() < f64::EPSILON);

        let emc = calc.effective_miss_count(&ctx(0, 0, 5));
        assert!(emc.abs() < f64::EPSILON);
    }

    #[test]
    fn difficulty_value_closed_form() {
        let ctx = ctx(1000, 0, 0);
        let value = calc(0).compute_difficulty_value(&ctx);

        let expected = (5.0 * (5.0 / 0.115) - 4.0_f64).powf(2.25) / 1150.0
            * (1.0 + 0.1 * (1000.0 / 1500.0));

        assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn accuracy_value_requires_hit_window() {
        let calc = TaikoPerformanceCalculator::new(
            TaikoDifficultyAttributes {
                great_hit_window: 0.0,
                ..attrs()
            },
            GameMods::default(),
        );

        assert!(calc.compute_accuracy_value(&ctx(1000, 0, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn hidden_flashlight_accuracy_bonus() {
        let ctx = ctx(1000, 0, 0);

        let nm = calc(0).compute_accuracy_value(&ctx);
        let hd = calc(8).compute_accuracy_value(&ctx);
        let hdfl = calc(8 + 1024).compute_accuracy_value(&ctx);

        assert!((nm - hd).abs() < f64::EPSILON);
        assert!((hdfl / nm - 1.05).abs() < 1e-12);
    }

    #[test]
    fn mod_multipliers() {
        let ctx = ctx(1000, 0, 0);

        assert!((calc(0).multiplier(&ctx) - 1.13).abs() < f64::EPSILON);
        assert!((calc(8).multiplier(&ctx) - 1.13 * 1.075).abs() < 1e-12);
        assert!((calc(2).multiplier(&ctx) - 1.13 * 0.975).abs() < 1e-12);
    }

    #[test]
    fn combines_with_power_mean() {
        let calc = calc(0);
        let attrs = calc.calculate(
            TaikoScoreState {
                max_combo: 1000,
                n300: 1000,
                n100: 0,
                misses: 0,
            },
            &ChartIdentity::default(),
            ChartOverrides::builtin(),
        );

        let expected = (attrs.pp_difficulty.powf(1.1) + attrs.pp_acc.powf(1.1)).powf(1.0 / 1.1)
            * 1.13;

        assert!((attrs.pp - expected).abs() < 1e-9);
    }
}
