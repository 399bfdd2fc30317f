use std::cmp;

use crate::{
    any::difficulty::object::IDifficultyObject,
    model::mods::GameMods,
    osu::{
        difficulty::object::OsuDifficultyObject,
        object::{OsuObjectKind, OsuSlider},
    },
};

/// Memory difficulty of objects hidden by the Flashlight cursor.
///
/// Holds the chart settings that stay constant across objects.
pub struct FlashlightEvaluator {
    scaling_factor: f64,
    time_preempt: f64,
    time_fade_in: f64,
}

impl FlashlightEvaluator {
    const MAX_OPACITY_BONUS: f64 = 0.4;
    const HIDDEN_BONUS: f64 = 0.2;

    const MIN_VELOCITY: f64 = 0.5;
    const SLIDER_MULTIPLIER: f64 = 1.3;

    const MIN_ANGLE_MULTIPLIER: f64 = 0.2;

    /// Amount of previous objects that are taken into account.
    const HISTORY_LEN: usize = 10;

    /// `time_preempt` and `time_fade_in` are not adjusted by the clock rate.
    pub const fn new(scaling_factor: f64, time_preempt: f64, time_fade_in: f64) -> Self {
        Self {
            scaling_factor,
            time_preempt,
            time_fade_in,
        }
    }

    pub fn evaluate_diff_of<'a>(
        &self,
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        mods: &GameMods,
    ) -> f64 {
        if curr.base.is_spinner() {
            return 0.0;
        }

        let hidden = mods.hd();

        let mut small_dist_nerf = 1.0;
        let mut cumulative_strain_time = 0.0;
        let mut angle_repeat_count = 0.0;
        let mut jump_sum = 0.0;

        let mut later = curr;

        // * This is iterating backwards in time from the current object.
        for i in 0..cmp::min(curr.idx, Self::HISTORY_LEN) {
            let Some(prev) = curr.previous(i, diff_objects) else {
                break;
            };

            cumulative_strain_time += later.strain_time;
            later = prev;

            if prev.base.is_spinner() {
                continue;
            }

            let jump_dist = f64::from((curr.base.pos - prev.base.end_pos()).length());

            // * We want to nerf objects that can be easily seen within the Flashlight circle radius.
            if i == 0 {
                small_dist_nerf = (jump_dist / 75.0).min(1.0);
            }

            // * We also want to nerf stacks so that only the first object of the stack is accounted for.
            let stack_nerf = ((prev.lazy_jump_dist / self.scaling_factor) / 25.0).min(1.0);

            // * Bonus based on how visible the object is.
            let opacity = curr.opacity_at(
                prev.base.start_time,
                hidden,
                self.time_preempt,
                self.time_fade_in,
            );
            let opacity_bonus = 1.0 + Self::MAX_OPACITY_BONUS * (1.0 - opacity);

            jump_sum += stack_nerf * opacity_bonus * self.scaling_factor * jump_dist
                / cumulative_strain_time;

            // * Objects further back in time should count less for the nerf.
            let repeats_angle = prev
                .angle
                .zip(curr.angle)
                .is_some_and(|(prev_angle, curr_angle)| (prev_angle - curr_angle).abs() < 0.02);

            if repeats_angle {
                angle_repeat_count += (1.0 - 0.1 * i as f64).max(0.0);
            }
        }

        let mut result = (small_dist_nerf * jump_sum).powf(2.0);

        // * Additional bonus for Hidden due to there being no approach circles.
        if hidden {
            result *= 1.0 + Self::HIDDEN_BONUS;
        }

        // * Nerf patterns with repeated angles.
        result *= Self::MIN_ANGLE_MULTIPLIER
            + (1.0 - Self::MIN_ANGLE_MULTIPLIER) / (angle_repeat_count + 1.0);

        if let OsuObjectKind::Slider(ref slider) = curr.base.kind {
            result += self.slider_bonus(curr, slider) * Self::SLIDER_MULTIPLIER;
        }

        result
    }

    fn slider_bonus(&self, curr: &OsuDifficultyObject<'_>, slider: &OsuSlider) -> f64 {
        // * Invert the scaling factor to determine the true travel distance independent of circle size.
        let pixel_travel_dist = curr.lazy_travel_dist / self.scaling_factor;

        // * Reward sliders based on velocity.
        let velocity = pixel_travel_dist / curr.travel_time;
        let mut bonus = (velocity - Self::MIN_VELOCITY).max(0.0).powf(0.5);

        // * Longer sliders require more memorisation.
        bonus *= pixel_travel_dist;

        // * Nerf sliders with repeats, as less memorisation is required.
        let repeat_count = slider.repeat_count();

        if repeat_count > 0 {
            bonus /= (repeat_count + 1) as f64;
        }

        bonus
    }
}
