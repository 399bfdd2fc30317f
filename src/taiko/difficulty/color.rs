use crate::taiko::object::HitType;

use super::object::TaikoDifficultyObject;

const MAX_REPETITION_INTERVAL: usize = 16;

/// Which colour encodings start at a difficulty object.
///
/// Each field is the index into the respective list of [`ColorEncoding`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaikoDifficultyColor {
    pub mono_streak: Option<usize>,
    pub alternating_mono_pattern: Option<usize>,
    pub repeating_hit_patterns: Option<usize>,
}

/// Consecutive notes of the same colour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonoStreak {
    /// Indices of the difficulty objects within the streak.
    pub hit_objects: Vec<usize>,
    pub hit_type: HitType,
    /// Index of the [`AlternatingMonoPattern`] containing this streak.
    pub parent: usize,
    /// Position within the parent.
    pub idx: usize,
}

impl MonoStreak {
    pub fn run_len(&self) -> usize {
        self.hit_objects.len()
    }

    fn first_hit_object(&self) -> Option<usize> {
        self.hit_objects.first().copied()
    }
}

/// Consecutive [`MonoStreak`]s of equal length, alternating in colour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlternatingMonoPattern {
    /// Indices into [`ColorEncoding::mono_streaks`].
    pub mono_streaks: Vec<usize>,
    /// Index of the [`RepeatingHitPatterns`] containing this pattern.
    pub parent: usize,
    /// Position within the parent.
    pub idx: usize,
}

/// Consecutive [`AlternatingMonoPattern`]s that repeat each other every two
/// patterns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepeatingHitPatterns {
    /// Indices into [`ColorEncoding::alternating_mono_patterns`].
    pub alternating_mono_patterns: Vec<usize>,
    /// Amount of [`RepeatingHitPatterns`] since the last repetition of this
    /// one, capped at 16. `17` if there was none.
    pub repetition_interval: usize,
}

/// The colour structure of a chart's notes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorEncoding {
    pub mono_streaks: Vec<MonoStreak>,
    pub alternating_mono_patterns: Vec<AlternatingMonoPattern>,
    pub repeating_hit_patterns: Vec<RepeatingHitPatterns>,
}

impl ColorEncoding {
    /// Encode the given notes and mark the first object of each encoding.
    ///
    /// `notes` holds the indices of all hit difficulty objects in order.
    pub(crate) fn encode_and_assign(
        objects: &mut [TaikoDifficultyObject<'_>],
        notes: &[usize],
    ) -> Self {
        let mono_streaks = encode_mono_streaks(objects, notes);
        let alternating_mono_patterns = encode_alternating_mono_patterns(&mono_streaks);

        let mut this = Self {
            mono_streaks,
            alternating_mono_patterns,
            repeating_hit_patterns: Vec::new(),
        };

        this.encode_repeating_hit_patterns();
        this.assign(objects);

        this
    }

    fn encode_repeating_hit_patterns(&mut self) {
        let n_patterns = self.alternating_mono_patterns.len();
        let is_coupled = |i: usize| i + 2 < n_patterns && self.is_pattern_repetition_of(i, i + 2);

        let mut repeating = Vec::new();
        let mut i = 0;

        while i < n_patterns {
            let mut alternating_mono_patterns = Vec::new();

            if is_coupled(i) {
                // * Add the current pattern and all future ones that are repetitions
                while is_coupled(i) {
                    alternating_mono_patterns.push(i);
                    i += 1;
                }

                // * Skip over viewed data and add the rest to the payload
                alternating_mono_patterns.push(i);
                alternating_mono_patterns.push(i + 1);
                i += 1;
            } else {
                alternating_mono_patterns.push(i);
            }

            repeating.push(RepeatingHitPatterns {
                alternating_mono_patterns,
                repetition_interval: MAX_REPETITION_INTERVAL + 1,
            });

            i += 1;
        }

        self.repeating_hit_patterns = repeating;

        for i in 0..self.repeating_hit_patterns.len() {
            self.repeating_hit_patterns[i].repetition_interval = self.find_repetition_interval(i);
        }
    }

    fn find_repetition_interval(&self, idx: usize) -> usize {
        let mut interval = 1;

        while interval < MAX_REPETITION_INTERVAL {
            let Some(other) = idx.checked_sub(interval) else {
                break;
            };

            if self.is_repeating_repetition_of(idx, other) {
                return interval.min(MAX_REPETITION_INTERVAL);
            }

            interval += 1;
        }

        MAX_REPETITION_INTERVAL + 1
    }

    fn assign(&mut self, objects: &mut [TaikoDifficultyObject<'_>]) {
        for (i, repeating) in self.repeating_hit_patterns.iter().enumerate() {
            for (j, &pattern_idx) in repeating.alternating_mono_patterns.iter().enumerate() {
                let pattern = &mut self.alternating_mono_patterns[pattern_idx];
                pattern.parent = i;
                pattern.idx = j;

                for (k, &streak_idx) in pattern.mono_streaks.iter().enumerate() {
                    let streak = &mut self.mono_streaks[streak_idx];
                    streak.parent = pattern_idx;
                    streak.idx = k;

                    if let Some(first) = streak.first_hit_object() {
                        objects[first].color.mono_streak = Some(streak_idx);

                        if k == 0 {
                            objects[first].color.alternating_mono_pattern = Some(pattern_idx);

                            if j == 0 {
                                objects[first].color.repeating_hit_patterns = Some(i);
                            }
                        }
                    }
                }
            }
        }
    }

    pub(crate) fn is_pattern_repetition_of(&self, pattern: usize, other: usize) -> bool {
        let pattern = &self.alternating_mono_patterns[pattern];
        let other = &self.alternating_mono_patterns[other];

        self.has_identical_mono_len(pattern, other)
            && pattern.mono_streaks.len() == other.mono_streaks.len()
            && self.first_hit_type(pattern) == self.first_hit_type(other)
    }

    fn has_identical_mono_len(
        &self,
        pattern: &AlternatingMonoPattern,
        other: &AlternatingMonoPattern,
    ) -> bool {
        let first_len = |pattern: &AlternatingMonoPattern| {
            pattern
                .mono_streaks
                .first()
                .map(|&idx| self.mono_streaks[idx].run_len())
        };

        first_len(pattern) == first_len(other)
    }

    fn first_hit_type(&self, pattern: &AlternatingMonoPattern) -> Option<HitType> {
        pattern
            .mono_streaks
            .first()
            .map(|&idx| self.mono_streaks[idx].hit_type)
    }

    fn is_repeating_repetition_of(&self, repeating: usize, other: usize) -> bool {
        let repeating = &self.repeating_hit_patterns[repeating];
        let other = &self.repeating_hit_patterns[other];

        if repeating.alternating_mono_patterns.len() != other.alternating_mono_patterns.len() {
            return false;
        }

        repeating
            .alternating_mono_patterns
            .iter()
            .zip(other.alternating_mono_patterns.iter())
            .take(2)
            .all(|(&a, &b)| {
                self.has_identical_mono_len(
                    &self.alternating_mono_patterns[a],
                    &self.alternating_mono_patterns[b],
                )
            })
    }
}

fn encode_mono_streaks(objects: &[TaikoDifficultyObject<'_>], notes: &[usize]) -> Vec<MonoStreak> {
    let mut mono_streaks: Vec<MonoStreak> = Vec::new();

    for &idx in notes {
        let Some(hit_type) = objects[idx].hit_type else {
            continue;
        };

        // * If this is the first object in the list or the colour changed, create a new mono streak
        if let Some(streak) = mono_streaks
            .last_mut()
            .filter(|streak| streak.hit_type == hit_type)
        {
            streak.hit_objects.push(idx);
        } else {
            mono_streaks.push(MonoStreak {
                hit_objects: vec![idx],
                hit_type,
                parent: 0,
                idx: 0,
            });
        }
    }

    mono_streaks
}

fn encode_alternating_mono_patterns(mono_streaks: &[MonoStreak]) -> Vec<AlternatingMonoPattern> {
    let mut patterns: Vec<AlternatingMonoPattern> = Vec::new();

    for (i, streak) in mono_streaks.iter().enumerate() {
        let same_len = i
            .checked_sub(1)
            .is_some_and(|prev| mono_streaks[prev].run_len() == streak.run_len());

        if let Some(pattern) = patterns.last_mut().filter(|_| same_len) {
            pattern.mono_streaks.push(i);
        } else {
            patterns.push(AlternatingMonoPattern {
                mono_streaks: vec![i],
                parent: 0,
                idx: 0,
            });
        }
    }

    patterns
}
