use rosu_map::section::general::GameMode;

use crate::{
    model::mods::GameMods,
    overrides::{ChartIdentity, ChartOverrides},
};

/// Exponent with which skill values are combined into the total.
pub(crate) const FINAL_EXPONENT: f64 = 1.1;

/// Hit statistics of a single calculation.
///
/// Created anew for every calculation so that calculators themselves don't
/// carry any per-score state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct ScoreContext {
    pub max_combo: u32,
    pub n300: u32,
    pub n100: u32,
    pub n50: u32,
    pub misses: u32,
    /// Accuracy between `0.0` and `1.0`.
    pub acc: f64,
    /// Only set after [`PerformancePipeline::effective_miss_count`] ran.
    pub effective_miss_count: f64,
}

impl ScoreContext {
    pub const fn total_hits(&self) -> u32 {
        self.n300 + self.n100 + self.n50 + self.misses
    }

    pub const fn total_successful_hits(&self) -> u32 {
        self.n300 + self.n100 + self.n50
    }

    pub const fn total_imperfect_hits(&self) -> u32 {
        self.n100 + self.n50 + self.misses
    }
}

/// The mode-specific parts of a performance calculation over `N` skill
/// axes.
pub(crate) trait PerformancePipeline<const N: usize> {
    const MODE: GameMode;

    fn mods(&self) -> &GameMods;

    /// Whether the chart contains no objects at all.
    fn is_empty(&self) -> bool;

    /// Misses including estimated combo breaks.
    fn effective_miss_count(&self, ctx: &ScoreContext) -> f64;

    /// Multiplier on the combined total.
    fn multiplier(&self, ctx: &ScoreContext) -> f64;

    /// The value of each skill axis.
    fn skill_values(&self, ctx: &ScoreContext) -> [f64; N];

    /// Raise each skill value to the exponent with which it enters the
    /// total.
    fn weighted_values(&self, ctx: &ScoreContext, values: [f64; N]) -> [f64; N] {
        let _ = ctx;

        values.map(|value| value.powf(FINAL_EXPONENT))
    }

    /// Adjust the combined total before chart overrides are applied.
    fn adjust_total(&self, ctx: &ScoreContext, total: f64) -> f64 {
        let _ = ctx;

        total
    }
}

/// Result of [`calculate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct PipelineOutput<const N: usize> {
    pub values: [f64; N],
    pub effective_miss_count: f64,
    pub pp: f64,
}

impl<const N: usize> PipelineOutput<N> {
    const ZERO: Self = Self {
        values: [0.0; N],
        effective_miss_count: 0.0,
        pp: 0.0,
    };
}

/// Combine skill values into a total and apply chart overrides.
pub(crate) fn calculate<P, const N: usize>(
    pipeline: &P,
    mut ctx: ScoreContext,
    chart: &ChartIdentity,
    overrides: &ChartOverrides,
) -> PipelineOutput<N>
where
    P: PerformancePipeline<N>,
{
    if pipeline.is_empty() || ctx.total_hits() == 0 {
        return PipelineOutput::ZERO;
    }

    ctx.effective_miss_count = pipeline.effective_miss_count(&ctx);

    let multiplier = pipeline.multiplier(&ctx);
    let values = pipeline.skill_values(&ctx);
    let weighted = pipeline.weighted_values(&ctx, values);

    let total = weighted.iter().sum::<f64>().powf(FINAL_EXPONENT.recip()) * multiplier;
    let total = pipeline.adjust_total(&ctx, total);
    let pp = overrides.apply(P::MODE, chart, pipeline.mods(), total);

    PipelineOutput {
        values,
        effective_miss_count: ctx.effective_miss_count,
        pp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        mods: GameMods,
        values: [f64; 2],
    }

    impl PerformancePipeline<2> for Fixed {
        const MODE: GameMode = GameMode::Osu;

        fn mods(&self) -> &GameMods {
            &self.mods
        }

        fn is_empty(&self) -> bool {
            false
        }

        fn effective_miss_count(&self, ctx: &ScoreContext) -> f64 {
            f64::from(ctx.misses)
        }

        fn multiplier(&self, _: &ScoreContext) -> f64 {
            2.0
        }

        fn skill_values(&self, _: &ScoreContext) -> [f64; 2] {
            self.values
        }
    }

    fn ctx() -> ScoreContext {
        ScoreContext {
            max_combo: 10,
            n300: 10,
            misses: 1,
            acc: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn power_mean_combination() {
        let pipeline = Fixed {
            mods: GameMods::default(),
            values: [3.0, 4.0],
        };

        let output = calculate(
            &pipeline,
            ctx(),
            &ChartIdentity::default(),
            ChartOverrides::builtin(),
        );

        let expected = (3.0_f64.powf(1.1) + 4.0_f64.powf(1.1)).powf(1.0 / 1.1) * 2.0;

        assert!((output.pp - expected).abs() < 1e-12);
        assert_eq!(output.values, [3.0, 4.0]);
        assert!((output.effective_miss_count - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_hits_yield_zero() {
        let pipeline = Fixed {
            mods: GameMods::default(),
            values: [3.0, 4.0],
        };

        let output = calculate(
            &pipeline,
            ScoreContext::default(),
            &ChartIdentity::default(),
            ChartOverrides::builtin(),
        );

        assert_eq!(output, PipelineOutput::ZERO);
    }
}
