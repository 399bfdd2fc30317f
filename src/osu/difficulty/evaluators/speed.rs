use crate::{
    any::difficulty::object::IDifficultyObject, model::mods::GameMods,
    osu::difficulty::object::OsuDifficultyObject,
};

pub struct SpeedEvaluator;

impl SpeedEvaluator {
    const SINGLE_SPACING_THRESHOLD: f64 = OsuDifficultyObject::NORMALIZED_DIAMETER as f64 * 1.25;
    /// Roughly 200 BPM.
    const MIN_SPEED_BONUS: f64 = 75.0;
    const SPEED_BALANCING_FACTOR: f64 = 40.0;

    /// Difficulty of tapping `curr`.
    ///
    /// `hit_window` is the half-width of the great hit window in
    /// milliseconds, already adjusted by the clock rate.
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hit_window: f64,
        mods: &GameMods,
    ) -> f64 {
        if curr.base.is_spinner() {
            return 0.0;
        }

        let full_window = hit_window * 2.0;

        let doubletapness = curr
            .next(0, diff_objects)
            .map_or(1.0, |next| Self::doubletapness(curr, next, full_window));

        // * Cap deltatime to the OD 300 hitwindow.
        // * 0.93 is derived from making sure 260bpm OD8 streams aren't nerfed harshly, whilst 0.92 limits the effect of the cap.
        let strain_time =
            curr.strain_time / ((curr.strain_time / full_window) / 0.93).clamp(0.92, 1.0);

        let speed_bonus = Self::speed_bonus(strain_time);

        let dist = if mods.ap() {
            0.0
        } else {
            let travel_dist = curr
                .previous(0, diff_objects)
                .map_or(0.0, |prev| prev.travel_dist);

            Self::SINGLE_SPACING_THRESHOLD.min(travel_dist + curr.min_jump_dist)
        };

        let spacing = (dist / Self::SINGLE_SPACING_THRESHOLD).powf(3.5);

        (speed_bonus + speed_bonus * spacing) * doubletapness / strain_time
    }

    // * Nerf doubletappable doubles.
    fn doubletapness(
        curr: &OsuDifficultyObject<'_>,
        next: &OsuDifficultyObject<'_>,
        full_window: f64,
    ) -> f64 {
        let curr_delta = curr.delta_time.max(1.0);
        let next_delta = next.delta_time.max(1.0);
        let delta_diff = (next_delta - curr_delta).abs();

        let speed_ratio = curr_delta / curr_delta.max(delta_diff);
        let window_ratio = (curr_delta / full_window).min(1.0).powf(2.0);

        speed_ratio.powf(1.0 - window_ratio)
    }

    fn speed_bonus(strain_time: f64) -> f64 {
        if strain_time >= Self::MIN_SPEED_BONUS {
            return 1.0;
        }

        let base = (Self::MIN_SPEED_BONUS - strain_time) / Self::SPEED_BALANCING_FACTOR;

        1.0 + 0.75 * base.powf(2.0)
    }
}
