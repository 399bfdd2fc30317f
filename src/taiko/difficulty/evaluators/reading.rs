use crate::{taiko::difficulty::object::TaikoDifficultyObject, util::difficulty::logistic};

pub struct ReadingEvaluator;

impl ReadingEvaluator {
    const HIGH_VELOCITY: VelocityRange = VelocityRange::new(480.0, 640.0);
    const MID_VELOCITY: VelocityRange = VelocityRange::new(360.0, 480.0);

    /// Difficulty of reading `note_object` at its scroll speed.
    ///
    /// Drum rolls and swells have no reading difficulty.
    pub fn evaluate_diff_of(note_object: &TaikoDifficultyObject) -> f64 {
        if !note_object.is_hit() {
            return 0.0;
        }

        // * Apply a cap to prevent outlier values on maps that exceed the editor's parameters.
        let effective_bpm = note_object.effective_bpm.max(1.0);

        let mid_velocity_diff = 0.5 * Self::MID_VELOCITY.logistic(effective_bpm, 0.0, 1.0);

        let density_penalty = Self::density_penalty(effective_bpm, note_object.delta_time);

        let high_velocity_diff = (1.0 - 0.33 * density_penalty)
            * Self::HIGH_VELOCITY.logistic(
                effective_bpm,
                8.0 * density_penalty,
                1.0 + 0.5 * density_penalty,
            );

        mid_velocity_diff + high_velocity_diff
    }

    // * High density is penalised at high velocity as it is generally considered easier to read.
    // * See https://www.desmos.com/calculator/u63f3ntdsi
    fn density_penalty(effective_bpm: f64, delta_time: f64) -> f64 {
        // * Expected DeltaTime is the DeltaTime this note would need to be spaced equally to a base slider velocity 1/4 note.
        let expected_delta_time = 21_000.0 / effective_bpm;
        let object_density = expected_delta_time / delta_time.max(1.0);

        logistic(object_density, 0.925, 15.0, None)
    }
}

struct VelocityRange {
    min: f64,
    max: f64,
}

impl VelocityRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    const fn center(&self) -> f64 {
        (self.max + self.min) / 2.0
    }

    const fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Logistic curve centered on the range, steeper for narrower ranges.
    fn logistic(&self, bpm: f64, center_shift: f64, steepness: f64) -> f64 {
        logistic(
            bpm,
            self.center() + center_shift,
            steepness / (self.range() / 10.0),
            None,
        )
    }
}
