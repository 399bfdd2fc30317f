use std::{cmp, f64::consts::PI};

use crate::{
    any::difficulty::object::IDifficultyObject, osu::difficulty::object::OsuDifficultyObject,
};

/// Rhythm complexity of tapping an object given the preceding deltas.
pub struct RhythmEvaluator;

/// A run of notes with roughly equal spacing.
#[derive(Copy, Clone, Debug)]
struct Island {
    size: usize,
    prev_size: usize,
    /// Ratio at the start of the island.
    start_ratio: f64,
    /// Whether the notes sped up and the island is being counted.
    counting: bool,
}

impl Island {
    const MAX_SIZE: usize = 7;

    const fn new() -> Self {
        Self {
            size: 1,
            prev_size: 0,
            start_ratio: 0.0,
            counting: false,
        }
    }

    fn grow(&mut self) {
        self.size = cmp::min(self.size + 1, Self::MAX_SIZE);
    }

    fn size_weight(&self) -> f64 {
        ((4 + self.size) as f64).sqrt() / 2.0 * ((4 + self.prev_size) as f64).sqrt() / 2.0
    }

    fn repetition_penalty(&self) -> f64 {
        let mut penalty = 1.0;

        // * repeated island size (ex: triplet -> triplet)
        if self.prev_size == self.size {
            penalty *= 0.25;
        }

        // * repeated island polarity (2 -> 4, 3 -> 5)
        if self.prev_size % 2 == self.size % 2 {
            penalty *= 0.5;
        }

        penalty
    }

    fn close(&mut self, ratio: f64) {
        self.start_ratio = ratio;
        self.prev_size = self.size;
        self.size = 1;
    }
}

impl RhythmEvaluator {
    /// Milliseconds of history that are considered.
    const HISTORY_TIME_MAX: f64 = 5000.0;
    const HISTORY_OBJECTS_MAX: usize = 32;
    const RHYTHM_MULTIPLIER: f64 = 0.75;

    /// Calculates a rhythm multiplier for the difficulty of the tap
    /// associated with historic data of the current object.
    ///
    /// The result lies in `[1, ∞)`.
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hit_window: f64,
    ) -> f64 {
        if curr.base.is_spinner() {
            return 0.0;
        }

        let history_len = cmp::min(curr.idx, Self::HISTORY_OBJECTS_MAX);
        let rhythm_start = Self::rhythm_start(curr, diff_objects, history_len);
        let window_eps = hit_window * 0.6;

        let mut island = Island::new();
        let mut complexity_sum = 0.0;

        for i in (1..=rhythm_start).rev() {
            let (Some(curr_obj), Some(prev_obj), Some(last_obj)) = (
                curr.previous(i - 1, diff_objects),
                curr.previous(i, diff_objects),
                curr.previous(i + 1, diff_objects),
            ) else {
                break;
            };

            // * scales note 0 to 1 from history to now
            let time_decay = (Self::HISTORY_TIME_MAX - (curr.start_time - curr_obj.start_time))
                / Self::HISTORY_TIME_MAX;
            let note_decay = (history_len - i) as f64 / history_len as f64;

            // * either we're limited by time or limited by object count.
            let decay = note_decay.min(time_decay);

            let curr_delta = curr_obj.strain_time;
            let prev_delta = prev_obj.strain_time;
            let last_delta = last_obj.strain_time;

            let mut ratio = Self::window_penalty(curr_delta, prev_delta, window_eps)
                * Self::delta_ratio(curr_delta, prev_delta);

            if !island.counting {
                // * we want to be speeding up.
                // * Begin counting island until we change speed again.
                if prev_delta > 1.25 * curr_delta {
                    island.counting = true;
                    island.start_ratio = ratio;
                    island.size = 1;
                }

                continue;
            }

            if !(prev_delta > 1.25 * curr_delta || prev_delta * 1.25 < curr_delta) {
                // * island is still progressing, count size.
                island.grow();

                continue;
            }

            // * bpm change is into slider, this is easy acc window
            if curr_obj.base.is_slider() {
                ratio *= 0.125;
            }

            // * bpm change was from a slider, this is easier typically than circle -> circle
            if prev_obj.base.is_slider() {
                ratio *= 0.25;
            }

            ratio *= island.repetition_penalty();

            // * previous increase happened a note ago, 1/1->1/2-1/4, dont want to buff this.
            if last_delta > prev_delta + 10.0 && prev_delta > curr_delta + 10.0 {
                ratio *= 0.125;
            }

            complexity_sum += (ratio * island.start_ratio).sqrt() * decay * island.size_weight();

            island.close(ratio);

            // * we're slowing down, stop counting
            if prev_delta * 1.25 < curr_delta {
                island.counting = false;
            }
        }

        // * produces multiplier that can be applied to strain. range [1, infinity) (not really though)
        (4.0 + complexity_sum * Self::RHYTHM_MULTIPLIER).sqrt() / 2.0
    }

    /// How far back the rhythm history reaches.
    fn rhythm_start<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        history_len: usize,
    ) -> usize {
        let mut start = 0;

        while start + 2 < history_len
            && curr
                .previous(start, diff_objects)
                .is_some_and(|prev| curr.start_time - prev.start_time < Self::HISTORY_TIME_MAX)
        {
            start += 1;
        }

        start
    }

    fn delta_ratio(curr_delta: f64, prev_delta: f64) -> f64 {
        let ratio = prev_delta.min(curr_delta) / prev_delta.max(curr_delta);

        1.0 + 6.0 * (PI / ratio).sin().powf(2.0).min(0.5)
    }

    /// Penalty for delta changes that fit within the hit window.
    fn window_penalty(curr_delta: f64, prev_delta: f64, window_eps: f64) -> f64 {
        if window_eps <= 0.0 {
            return 1.0;
        }

        (((prev_delta - curr_delta).abs() - window_eps).max(0.0) / window_eps).min(1.0)
    }
}
