use rosu_map::section::general::GameMode;

use crate::{
    any::performance::pipeline::{self, PerformancePipeline, ScoreContext, FINAL_EXPONENT},
    model::mods::GameMods,
    osu::{OsuDifficultyAttributes, OsuPerformanceAttributes, OsuScoreState},
    overrides::{ChartIdentity, ChartOverrides},
    util::float_ext::FloatExt,
};

// * This is being adjusted to keep the final pp value scaled around what it used to be when changing things.
pub const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.14;

const AIM: usize = 0;
const SPEED: usize = 1;
const ACC: usize = 2;
const FLASHLIGHT: usize = 3;

/// Performance calculation of a single osu!standard score.
///
/// Holds no per-score state so that one instance can be used for many
/// scores on the same difficulty attributes.
pub(crate) struct OsuPerformanceCalculator {
    attrs: OsuDifficultyAttributes,
    mods: GameMods,
}

impl OsuPerformanceCalculator {
    pub const fn new(attrs: OsuDifficultyAttributes, mods: GameMods) -> Self {
        Self { attrs, mods }
    }

    pub fn calculate(
        self,
        state: OsuScoreState,
        chart: &ChartIdentity,
        overrides: &ChartOverrides,
    ) -> OsuPerformanceAttributes {
        let ctx = ScoreContext {
            max_combo: state.max_combo,
            n300: state.n300,
            n100: state.n100,
            n50: state.n50,
            misses: state.misses,
            acc: state.accuracy(),
            effective_miss_count: 0.0,
        };

        let output = pipeline::calculate(&self, ctx, chart, overrides);

        OsuPerformanceAttributes {
            difficulty: self.attrs,
            pp: output.pp,
            pp_acc: output.values[ACC],
            pp_aim: output.values[AIM],
            pp_flashlight: output.values[FLASHLIGHT],
            pp_speed: output.values[SPEED],
            effective_miss_count: output.effective_miss_count,
        }
    }

    fn compute_aim_value(&self, ctx: &ScoreContext) -> f64 {
        if self.mods.ap() {
            return 0.0;
        }

        let attrs = &self.attrs;
        let total_hits = f64::from(ctx.total_hits());

        let mut aim_value = difficulty_to_performance(attrs.aim);

        let len_bonus = length_bonus(total_hits);
        aim_value *= len_bonus;

        // * Penalize misses by assessing # of misses relative to the total # of objects. Default a 3% reduction for any # of misses.
        if ctx.effective_miss_count > 0.0 {
            aim_value *=
                calculate_miss_penalty(ctx.effective_miss_count, attrs.aim_difficult_strain_count);
        }

        let ar_factor = if attrs.ar > 10.33 {
            0.3 * (attrs.ar - 10.33)
        } else if attrs.ar < 8.0 {
            0.05 * (8.0 - attrs.ar)
        } else {
            0.0
        };

        // * Buff for longer maps with high AR.
        aim_value *= 1.0 + ar_factor * len_bonus;

        if self.mods.bl() {
            aim_value *= 1.3
                + (total_hits
                    * (0.0016 / (1.0 + 2.0 * ctx.effective_miss_count))
                    * ctx.acc.powf(16.0))
                    * (1.0 - 0.003 * attrs.hp * attrs.hp);
        } else if self.mods.hd() {
            let (hidden_factor, hidden_ar) = if self.mods.rx() {
                (0.05, 11.0)
            } else {
                (0.04, 12.0)
            };

            // * We want to give more reward for lower AR when it comes to aim and HD. This nerfs high AR and buffs lower AR.
            aim_value *= 1.0 + hidden_factor * (hidden_ar - attrs.ar);
        }

        if self.mods.ez() {
            let mut buff_factor = 1.08;

            if attrs.ar <= 8.0 {
                buff_factor += (7.0 - attrs.ar) / 100.0;
            }

            aim_value *= buff_factor;
        }

        if attrs.n_sliders > 0 {
            // * We assume 15% of sliders in a map are difficult since there's no way to tell from the performance calculator.
            let estimate_diff_sliders = f64::from(attrs.n_sliders) * 0.15;

            let estimate_slider_ends_dropped = f64::from(ctx.total_imperfect_hits())
                .min(f64::from(attrs.max_combo) - f64::from(ctx.max_combo))
                .clamp(0.0, estimate_diff_sliders);

            let slider_nerf_factor = (1.0 - attrs.slider_factor)
                * (1.0 - estimate_slider_ends_dropped / estimate_diff_sliders).powf(3.0)
                + attrs.slider_factor;

            aim_value *= slider_nerf_factor;
        }

        aim_value *= ctx.acc;

        // * It is important to consider accuracy difficulty when scaling with accuracy.
        let acc_factor = if self.mods.rx() { 0.95 } else { 0.98 };
        aim_value *= acc_factor + attrs.od * attrs.od / 2500.0;

        aim_value
    }

    fn compute_speed_value(&self, ctx: &ScoreContext) -> f64 {
        let attrs = &self.attrs;
        let total_hits = f64::from(ctx.total_hits());

        let mut speed_value = difficulty_to_performance(attrs.speed);

        let len_bonus = length_bonus(total_hits);
        speed_value *= len_bonus;

        if ctx.effective_miss_count > 0.0 {
            speed_value *= calculate_miss_penalty(
                ctx.effective_miss_count,
                attrs.speed_difficult_strain_count,
            );
        }

        let ar_factor = if attrs.ar > 10.33 {
            0.3 * (attrs.ar - 10.33)
        } else {
            0.0
        };

        // * Buff for longer maps with high AR.
        speed_value *= 1.0 + ar_factor * len_bonus;

        if self.mods.bl() {
            // * Increasing the speed value by object count for Blinds isn't
            // * ideal, so the minimum buff is given.
            speed_value *= 1.12;
        } else if self.mods.hd() {
            // * We want to give more reward for lower AR when it comes to aim and HD.
            // * This nerfs high AR and buffs lower AR.
            speed_value *= 1.0 + 0.04 * (12.0 - attrs.ar);
        }

        // * Calculate accuracy assuming the worst case scenario
        let n300 = f64::from(ctx.n300);
        let n100 = f64::from(ctx.n100);
        let n50 = f64::from(ctx.n50);

        let relevant_total_diff = total_hits - attrs.speed_note_count;
        let relevant_n300 = (n300 - relevant_total_diff).max(0.0);
        let relevant_n100 = (n100 - (relevant_total_diff - n300).max(0.0)).max(0.0);
        let relevant_n50 = (n50 - (relevant_total_diff - n300 - n100).max(0.0)).max(0.0);

        let relevant_acc = if attrs.speed_note_count.eq(0.0) {
            0.0
        } else {
            (relevant_n300 * 6.0 + relevant_n100 * 2.0 + relevant_n50)
                / (attrs.speed_note_count * 6.0)
        };

        // * Scale the speed value with accuracy and OD.
        speed_value *= (0.95 + attrs.od * attrs.od / 750.0)
            * ((ctx.acc + relevant_acc) / 2.0).powf((14.5 - attrs.od.max(8.0)) / 2.0);

        // * Scale the speed value with # of 50s to punish doubletapping.
        let n50_threshold = total_hits / 500.0;

        speed_value *= 0.99_f64.powf(if n50 < n50_threshold {
            0.0
        } else {
            n50 - n50_threshold
        });

        speed_value
    }

    fn compute_accuracy_value(&self, ctx: &ScoreContext) -> f64 {
        let attrs = &self.attrs;

        // * This percentage only considers HitCircles of any value - in this part
        // * of the calculation we focus on hitting the timing hit window.
        let n_circles = i64::from(attrs.n_circles);

        let better_acc_percentage = if n_circles > 0 {
            let n300 = i64::from(ctx.n300);
            let n100 = i64::from(ctx.n100);
            let n50 = i64::from(ctx.n50);
            let total_hits = i64::from(ctx.total_hits());

            let numerator = (n300 - (total_hits - n_circles)) * 6 + n100 * 2 + n50;

            // * It is possible to reach a negative accuracy with this formula. Cap it at zero - zero points.
            (numerator as f64 / (n_circles * 6) as f64).max(0.0)
        } else {
            0.0
        };

        // * Lots of arbitrary values from testing.
        // * Considering to use derivation from perfect accuracy in a probabilistic manner - assume normal distribution
        let mut acc_value =
            1.52163_f64.powf(attrs.od) * better_acc_percentage.powf(24.0) * 2.83;

        // * Bonus for many hitcircles - it's harder to keep good accuracy up for longer
        acc_value *= (n_circles as f64 / 1000.0).powf(0.3).min(1.15);

        // * Increasing the accuracy value by object count for Blinds isn't
        // * ideal, so the minimum buff is given.
        if self.mods.bl() {
            acc_value *= 1.14;
        } else if self.mods.hd() {
            acc_value *= 1.08;
        }

        if self.mods.fl() {
            acc_value *= 1.02;
        }

        acc_value
    }

    fn compute_flashlight_value(&self, ctx: &ScoreContext) -> f64 {
        if !self.mods.fl() {
            return 0.0;
        }

        let attrs = &self.attrs;
        let total_hits = f64::from(ctx.total_hits());
        let emc = ctx.effective_miss_count;

        let mut flashlight_value = attrs.flashlight * attrs.flashlight * 25.0;

        // * Penalize misses by assessing # of misses relative to the total # of objects.
        // * Default a 3% reduction for any # of misses.
        if emc > 0.0 {
            flashlight_value *=
                0.97 * (1.0 - (emc / total_hits).powf(0.775)).powf(emc.powf(0.875));
        }

        flashlight_value *= self.combo_scaling_factor(ctx);

        // * Account for shorter maps having a higher ratio of 0 combo/100 combo flashlight radius.
        flashlight_value *= 0.7
            + 0.1 * (total_hits / 200.0).min(1.0)
            + if total_hits > 200.0 {
                0.2 * ((total_hits - 200.0) / 200.0).min(1.0)
            } else {
                0.0
            };

        // * Scale the flashlight value with accuracy _slightly_.
        flashlight_value *= 0.5 + ctx.acc / 2.0;

        // * It is important to also consider accuracy difficulty when doing that.
        flashlight_value *= 0.98 + attrs.od * attrs.od / 2500.0;

        flashlight_value
    }

    fn combo_scaling_factor(&self, ctx: &ScoreContext) -> f64 {
        if self.attrs.max_combo == 0 {
            1.0
        } else {
            (f64::from(ctx.max_combo).powf(0.8) / f64::from(self.attrs.max_combo).powf(0.8))
                .min(1.0)
        }
    }
}

impl PerformancePipeline<4> for OsuPerformanceCalculator {
    const MODE: GameMode = GameMode::Osu;

    fn mods(&self) -> &GameMods {
        &self.mods
    }

    fn is_empty(&self) -> bool {
        self.attrs.n_objects() == 0
    }

    fn effective_miss_count(&self, ctx: &ScoreContext) -> f64 {
        calculate_effective_misses(&self.attrs, ctx)
    }

    fn multiplier(&self, ctx: &ScoreContext) -> f64 {
        let mut multiplier = PERFORMANCE_BASE_MULTIPLIER;

        if self.mods.nf() {
            multiplier *= (1.0 - 0.02 * ctx.effective_miss_count).max(0.9);
        }

        let total_hits = f64::from(ctx.total_hits());

        if self.mods.so() && total_hits > 0.0 {
            multiplier *= 1.0 - (f64::from(self.attrs.n_spinners) / total_hits).powf(0.85);
        }

        multiplier
    }

    fn skill_values(&self, ctx: &ScoreContext) -> [f64; 4] {
        let mut values = [0.0; 4];

        values[AIM] = self.compute_aim_value(ctx);
        values[SPEED] = self.compute_speed_value(ctx);
        values[ACC] = self.compute_accuracy_value(ctx);
        values[FLASHLIGHT] = self.compute_flashlight_value(ctx);

        values
    }

    fn weighted_values(&self, ctx: &ScoreContext, values: [f64; 4]) -> [f64; 4] {
        let mods = &self.mods;

        let mut aim_value = values[AIM];
        let mut acc_factor = 1.0;

        if mods.rx() && values[SPEED] > 0.0 && aim_value / values[SPEED] < 1.0 {
            acc_factor = if ctx.acc < 1.0 {
                0.95 - (1.0 - ctx.acc)
            } else {
                0.95
            }
            .max(0.85);

            aim_value *= acc_factor;
        }

        let mut non_rate_bonus = 1.0;

        if !mods.is_rate_changing() && mods.rx() && (acc_factor - 1.0_f64).abs() < 0.01 {
            non_rate_bonus += 0.01;
        }

        let aim_exp = if mods.rx() {
            1.18 * non_rate_bonus
        } else {
            FINAL_EXPONENT
        };

        let speed_exp = if mods.rx() {
            0.83 * acc_factor
        } else if mods.ap() {
            1.12
        } else {
            FINAL_EXPONENT
        };

        let acc_exp = if mods.rx() {
            1.15 * acc_factor
        } else {
            FINAL_EXPONENT
        };

        let flashlight_exp = if mods.rx() {
            0.98
        } else if mods.ap() {
            0.9
        } else {
            FINAL_EXPONENT
        };

        let mut weighted = [0.0; 4];

        weighted[AIM] = aim_value.powf(aim_exp);
        weighted[SPEED] = values[SPEED].powf(speed_exp);
        weighted[ACC] = values[ACC].powf(acc_exp);
        weighted[FLASHLIGHT] = values[FLASHLIGHT].powf(flashlight_exp);

        weighted
    }

    fn adjust_total(&self, _: &ScoreContext, total: f64) -> f64 {
        if (self.mods.dt() || self.mods.nc()) && self.mods.hr() {
            total * 1.025
        } else {
            total
        }
    }
}

fn difficulty_to_performance(difficulty: f64) -> f64 {
    (5.0 * (difficulty / 0.0675).max(1.0) - 4.0).powf(3.0) / 100_000.0
}

fn length_bonus(total_hits: f64) -> f64 {
    0.95 + 0.4 * (total_hits / 2000.0).min(1.0)
        + if total_hits > 2000.0 {
            (total_hits / 2000.0).log10() * 0.5
        } else {
            0.0
        }
}

// * Miss penalty assumes that a player will miss on the hardest parts of a map,
// * so we use the amount of relatively difficult sections to adjust miss penalty
// * to make it more punishing on maps with lower amount of hard sections.
fn calculate_miss_penalty(miss_count: f64, diff_strain_count: f64) -> f64 {
    if diff_strain_count <= 0.0 {
        return 0.0;
    }

    0.94 / ((miss_count / (2.0 * diff_strain_count.sqrt())) + 1.0)
}

fn calculate_effective_misses(attrs: &OsuDifficultyAttributes, ctx: &ScoreContext) -> f64 {
    // * Guess the number of misses + slider breaks from combo
    let mut combo_based_miss_count = 0.0;

    if attrs.n_sliders > 0 {
        let full_combo_threshold = f64::from(attrs.max_combo) - 0.1 * f64::from(attrs.n_sliders);

        if f64::from(ctx.max_combo) < full_combo_threshold {
            combo_based_miss_count = full_combo_threshold / f64::from(ctx.max_combo).max(1.0);
        }
    }

    // * Clamp miss count to maximum amount of possible breaks
    combo_based_miss_count = combo_based_miss_count.min(f64::from(ctx.total_imperfect_hits()));

    combo_based_miss_count.max(f64::from(ctx.misses))
}
