use crate::{model::mods::GameMods, osu::object::OsuObject, util::difficulty::difficulty_range};

use self::evaluators::{AimEvaluator, FlashlightEvaluator, RhythmEvaluator, SpeedEvaluator};

pub use self::{object::OsuDifficultyObject, scaling_factor::ScalingFactor};

/// Per-object evaluators of each skill.
pub mod evaluators;

mod object;
mod scaling_factor;

const HD_FADE_IN_DURATION_MULTIPLIER: f64 = 0.4;
const HD_FADE_OUT_DURATION_MULTIPLIER: f64 = 0.3;

/// Chart settings that the per-object evaluation depends on.
///
/// `ar`, `cs`, and `od` are expected to already include the adjustments of
/// difficulty-changing mods like `HardRock` but *not* those of the clock
/// rate.
#[derive(Clone, Debug, PartialEq)]
pub struct OsuDifficultySettings {
    pub ar: f64,
    pub cs: f64,
    pub od: f64,
    pub clock_rate: f64,
    pub mods: GameMods,
}

impl OsuDifficultySettings {
    /// Settings with all attributes at 5 and the clock rate of the mods.
    pub fn new(mods: impl Into<GameMods>) -> Self {
        let mods = mods.into();

        Self {
            ar: 5.0,
            cs: 5.0,
            od: 5.0,
            clock_rate: mods.clock_rate(),
            mods,
        }
    }

    /// Specify the approach rate.
    #[must_use]
    pub const fn ar(mut self, ar: f64) -> Self {
        self.ar = ar;

        self
    }

    /// Specify the circle size.
    #[must_use]
    pub const fn cs(mut self, cs: f64) -> Self {
        self.cs = cs;

        self
    }

    /// Specify the overall difficulty.
    #[must_use]
    pub const fn od(mut self, od: f64) -> Self {
        self.od = od;

        self
    }

    /// Adjust the clock rate, clamped to `0.01..=100.0`.
    #[must_use]
    pub fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = clock_rate.clamp(0.01, 100.0);

        self
    }

    /// Half-width of the great hit window, adjusted by the clock rate.
    pub fn great_hit_window(&self) -> f64 {
        difficulty_range(self.od, 80.0, 50.0, 20.0) / self.clock_rate
    }

    /// Time between an object appearing and its start time.
    pub fn time_preempt(&self) -> f64 {
        difficulty_range(self.ar, 1800.0, 1200.0, 450.0)
    }

    pub fn time_fade_in(&self) -> f64 {
        let time_preempt = self.time_preempt();

        if self.mods.hd() {
            time_preempt * HD_FADE_IN_DURATION_MULTIPLIER
        } else {
            400.0 * (time_preempt / OsuObject::PREEMPT_MIN).min(1.0)
        }
    }
}

impl Default for OsuDifficultySettings {
    fn default() -> Self {
        Self::new(GameMods::default())
    }
}

/// The per-object difficulty of each skill axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OsuObjectDifficulty {
    pub aim: f64,
    pub aim_no_sliders: f64,
    pub speed: f64,
    pub rhythm: f64,
    pub flashlight: f64,
}

/// Annotate each hit object with metrics relative to its predecessors.
///
/// The first hit object has no difficulty object.
pub fn difficulty_objects<'a>(
    objects: &'a [OsuObject],
    settings: &OsuDifficultySettings,
) -> Vec<OsuDifficultyObject<'a>> {
    let scaling_factor = ScalingFactor::new(settings.cs);

    objects
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, h)| {
            let last_last = i.checked_sub(2).map(|idx| &objects[idx]);

            OsuDifficultyObject::new(
                h,
                &objects[i - 1],
                last_last,
                settings.clock_rate,
                i - 1,
                &scaling_factor,
            )
        })
        .collect()
}

/// Evaluate every skill for every difficulty object.
///
/// The result contains one entry per hit object except the first.
pub fn object_difficulties(
    objects: &[OsuObject],
    settings: &OsuDifficultySettings,
) -> Vec<OsuObjectDifficulty> {
    let diff_objects = difficulty_objects(objects, settings);

    let hit_window = settings.great_hit_window();
    let radius = ScalingFactor::new(settings.cs).radius;

    let flashlight = FlashlightEvaluator::new(
        52.0 / radius,
        settings.time_preempt(),
        settings.time_fade_in(),
    );

    diff_objects
        .iter()
        .map(|curr| OsuObjectDifficulty {
            aim: AimEvaluator::evaluate_diff_of(curr, &diff_objects, true),
            aim_no_sliders: AimEvaluator::evaluate_diff_of(curr, &diff_objects, false),
            speed: SpeedEvaluator::evaluate_diff_of(
                curr,
                &diff_objects,
                hit_window,
                &settings.mods,
            ),
            rhythm: RhythmEvaluator::evaluate_diff_of(curr, &diff_objects, hit_window),
            flashlight: flashlight.evaluate_diff_of(curr, &diff_objects, &settings.mods),
        })
        .collect()
}
