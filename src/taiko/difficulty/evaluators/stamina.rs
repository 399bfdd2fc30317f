use crate::taiko::difficulty::object::{TaikoDifficultyObject, TaikoDifficultyObjects};

pub struct StaminaEvaluator;

impl StaminaEvaluator {
    pub fn evaluate_diff_of(curr: &TaikoDifficultyObject, objects: &TaikoDifficultyObjects) -> f64 {
        if !curr.is_hit() {
            return 0.0;
        }

        // * Find the previous hit object hit by the current key, which is two notes of the same colour prior.
        let Some(key_prev) = objects.previous_mono(curr, 1) else {
            return 0.0;
        };

        // * Add a base strain to all objects
        let mut object_strain = 0.5;
        object_strain += Self::speed_bonus(curr.start_time - key_prev.start_time);

        object_strain
    }

    fn speed_bonus(interval: f64) -> f64 {
        // * Cap to 600bpm 1/4, 25ms note interval, 50ms key interval
        // * This is a temporary measure to prevent absurdly high speed mono convert maps being rated too high
        // * There is a more proper way to handle this, but it will be for a future change
        let interval = interval.max(50.0);

        30.0 / interval
    }
}
