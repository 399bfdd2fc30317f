use std::f64::consts::E;

use crate::{
    taiko::difficulty::{
        color::ColorEncoding,
        object::{TaikoDifficultyObject, TaikoDifficultyObjects},
    },
    util::difficulty::logistic_exp,
};

pub struct ColorEvaluator;

impl ColorEvaluator {
    /// Sum of the difficulties of all colour encodings that start at `curr`.
    pub fn evaluate_diff_of(curr: &TaikoDifficultyObject, objects: &TaikoDifficultyObjects) -> f64 {
        let encoding = &objects.color;
        let color = &curr.color;
        let mut difficulty = 0.0;

        if let Some(idx) = color.mono_streak {
            difficulty += Self::evaluate_mono_streak(encoding, idx);
        }

        if let Some(idx) = color.alternating_mono_pattern {
            difficulty += Self::evaluate_alternating_mono_pattern(encoding, idx);
        }

        if let Some(idx) = color.repeating_hit_patterns {
            difficulty += Self::evaluate_repeating_hit_patterns(encoding, idx);
        }

        difficulty
    }

    fn evaluate_mono_streak(encoding: &ColorEncoding, idx: usize) -> f64 {
        let streak = &encoding.mono_streaks[idx];

        logistic_exp(E * streak.idx as f64 - 2.0 * E, None)
            * Self::evaluate_alternating_mono_pattern(encoding, streak.parent)
            * 0.5
    }

    fn evaluate_alternating_mono_pattern(encoding: &ColorEncoding, idx: usize) -> f64 {
        let pattern = &encoding.alternating_mono_patterns[idx];

        logistic_exp(E * pattern.idx as f64 - 2.0 * E, None)
            * Self::evaluate_repeating_hit_patterns(encoding, pattern.parent)
    }

    fn evaluate_repeating_hit_patterns(encoding: &ColorEncoding, idx: usize) -> f64 {
        let repetition_interval = encoding.repeating_hit_patterns[idx].repetition_interval as f64;

        2.0 * (1.0 - logistic_exp(E * repetition_interval - 2.0 * E, None))
    }
}
