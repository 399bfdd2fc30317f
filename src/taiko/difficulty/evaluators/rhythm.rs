use crate::{
    taiko::difficulty::object::{TaikoDifficultyObject, TaikoDifficultyObjects},
    util::float_ext::FloatExt,
};

pub struct RhythmEvaluator;

impl RhythmEvaluator {
    const HISTORY_MAX_LEN: usize = 8;

    /// Difficulty of the rhythm change at `curr`.
    ///
    /// Repeated rhythm patterns, very short or long runs without a rhythm
    /// change, and slow notes are penalised.
    pub fn evaluate_diff_of(curr: &TaikoDifficultyObject, objects: &TaikoDifficultyObjects) -> f64 {
        // * drum rolls and swells are exempt.
        if !curr.is_hit() {
            return 0.0;
        }

        // * rhythm difficulty zero (due to rhythm not changing) => no rhythm strain.
        if curr.rhythm.difficulty.eq(0.0) {
            return 0.0;
        }

        let history = Self::rhythm_history(curr, objects);

        let mut object_strain = curr.rhythm.difficulty;
        object_strain *= Self::repetition_penalties(curr, &history);
        object_strain *=
            Self::pattern_length_penalty(Self::notes_since_rhythm_change(curr, objects));
        object_strain *= Self::speed_penalty(curr.delta_time);

        object_strain
    }

    /// Amount of notes since the last rhythm change, `curr` included.
    ///
    /// Drum rolls and swells reset the count.
    fn notes_since_rhythm_change(
        curr: &TaikoDifficultyObject,
        objects: &TaikoDifficultyObjects,
    ) -> usize {
        let unchanged = objects.objects[..curr.idx]
            .iter()
            .rev()
            .take_while(|h| h.is_hit() && h.rhythm.difficulty.eq(0.0))
            .count();

        unchanged + 1
    }

    /// Up to [`Self::HISTORY_MAX_LEN`] hits with a rhythm change, ending at
    /// `curr`.
    fn rhythm_history<'o, 'a>(
        curr: &'o TaikoDifficultyObject<'a>,
        objects: &'o TaikoDifficultyObjects<'a>,
    ) -> Vec<&'o TaikoDifficultyObject<'a>> {
        let mut history: Vec<_> = objects.objects[..curr.idx]
            .iter()
            .rev()
            .filter(|h| h.is_hit() && h.rhythm.difficulty.not_eq(0.0))
            .take(Self::HISTORY_MAX_LEN - 1)
            .collect();

        history.reverse();
        history.push(curr);

        history
    }

    fn repetition_penalties(
        curr: &TaikoDifficultyObject,
        history: &[&TaikoDifficultyObject],
    ) -> f64 {
        let mut penalty = 1.0;

        for most_recent_patterns_to_compare in 2..=Self::HISTORY_MAX_LEN / 2 {
            let Some(last_start) = history.len().checked_sub(most_recent_patterns_to_compare + 1)
            else {
                continue;
            };

            for start in (0..=last_start).rev() {
                if !Self::same_pattern(history, start, most_recent_patterns_to_compare) {
                    continue;
                }

                let notes_since = curr.idx - history[start].idx;
                penalty *= Self::repetition_penalty(notes_since);

                break;
            }
        }

        penalty
    }

    fn same_pattern(
        history: &[&TaikoDifficultyObject],
        start: usize,
        most_recent_patterns_to_compare: usize,
    ) -> bool {
        let recent = &history[history.len() - most_recent_patterns_to_compare..];

        history[start..start + most_recent_patterns_to_compare]
            .iter()
            .zip(recent)
            .all(|(a, b)| a.rhythm == b.rhythm)
    }

    fn repetition_penalty(notes_since: usize) -> f64 {
        (0.032 * notes_since as f64).min(1.0)
    }

    fn pattern_length_penalty(pattern_len: usize) -> f64 {
        let pattern_len = pattern_len as f64;
        let short_pattern_penalty = (0.15 * pattern_len).min(1.0);
        let long_pattern_penalty = (2.5 - 0.15 * pattern_len).clamp(0.0, 1.0);

        short_pattern_penalty.min(long_pattern_penalty)
    }

    fn speed_penalty(delta_time: f64) -> f64 {
        if delta_time < 80.0 {
            1.0
        } else if delta_time < 210.0 {
            (1.4 - 0.005 * delta_time).max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_length() {
        assert!((RhythmEvaluator::pattern_length_penalty(1) - 0.15).abs() < 1e-12);
        assert!((RhythmEvaluator::pattern_length_penalty(8) - 1.0).abs() < 1e-12);
        assert!((RhythmEvaluator::pattern_length_penalty(12) - 0.7).abs() < 1e-12);
        assert!(RhythmEvaluator::pattern_length_penalty(20).abs() < f64::EPSILON);
    }

    #[test]
    fn speed() {
        assert!((RhythmEvaluator::speed_penalty(50.0) - 1.0).abs() < f64::EPSILON);
        assert!((RhythmEvaluator::speed_penalty(100.0) - 0.9).abs() < 1e-12);
        assert!(RhythmEvaluator::speed_penalty(250.0).abs() < f64::EPSILON);
    }
}
