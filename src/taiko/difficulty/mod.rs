use crate::{model::mods::GameMods, taiko::object::TaikoObject};

use self::evaluators::{ColorEvaluator, ReadingEvaluator, RhythmEvaluator, StaminaEvaluator};

pub use self::{
    color::{
        AlternatingMonoPattern, ColorEncoding, MonoStreak, RepeatingHitPatterns,
        TaikoDifficultyColor,
    },
    object::{TaikoDifficultyObject, TaikoDifficultyObjects},
    rhythm::HitObjectRhythm,
};

/// Per-object evaluators of each skill.
pub mod evaluators;

mod color;
mod object;
mod rhythm;

/// Chart settings that the per-object evaluation depends on.
#[derive(Clone, Debug, PartialEq)]
pub struct TaikoDifficultySettings {
    pub clock_rate: f64,
    pub mods: GameMods,
}

impl TaikoDifficultySettings {
    /// Settings with the clock rate of the mods.
    pub fn new(mods: impl Into<GameMods>) -> Self {
        let mods = mods.into();

        Self {
            clock_rate: mods.clock_rate(),
            mods,
        }
    }

    /// Adjust the clock rate, clamped to `0.01..=100.0`.
    #[must_use]
    pub fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = clock_rate.clamp(0.01, 100.0);

        self
    }
}

impl Default for TaikoDifficultySettings {
    fn default() -> Self {
        Self::new(GameMods::default())
    }
}

/// The per-object difficulty of each skill axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TaikoObjectDifficulty {
    pub color: f64,
    pub rhythm: f64,
    pub stamina: f64,
    pub reading: f64,
}

/// Annotate each hit object with its rhythm and colour relative to its
/// predecessors.
///
/// The first two hit objects have no difficulty object.
pub fn difficulty_objects<'a>(
    objects: &'a [TaikoObject],
    settings: &TaikoDifficultySettings,
) -> TaikoDifficultyObjects<'a> {
    TaikoDifficultyObjects::new(objects, settings.clock_rate)
}

/// Evaluate every skill for every difficulty object.
///
/// The result contains one entry per hit object except the first two.
pub fn object_difficulties(
    objects: &[TaikoObject],
    settings: &TaikoDifficultySettings,
) -> Vec<TaikoObjectDifficulty> {
    let diff_objects = difficulty_objects(objects, settings);

    diff_objects
        .iter()
        .map(|curr| TaikoObjectDifficulty {
            color: ColorEvaluator::evaluate_diff_of(curr, &diff_objects),
            rhythm: RhythmEvaluator::evaluate_diff_of(curr, &diff_objects),
            stamina: StaminaEvaluator::evaluate_diff_of(curr, &diff_objects),
            reading: ReadingEvaluator::evaluate_diff_of(curr),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::taiko::{HitType, TaikoObjectKind};

    use super::*;

    fn chart(times: &[f64], hit_types: impl Fn(usize) -> HitType) -> Vec<TaikoObject> {
        times
            .iter()
            .enumerate()
            .map(|(i, &time)| TaikoObject::hit(time, hit_types(i), 180.0))
            .collect()
    }

    fn evenly_spaced(n: usize, spacing: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * spacing).collect()
    }

    #[test]
    fn skips_first_two_objects() {
        let objects = chart(&evenly_spaced(10, 100.0), |_| HitType::Centre);
        let settings = TaikoDifficultySettings::default();

        assert_eq!(object_difficulties(&objects, &settings).len(), 8);
        assert!(object_difficulties(&objects[..2], &settings).is_empty());

        let diff_objects = difficulty_objects(&objects, &settings);

        assert_eq!(diff_objects.centres.len(), 8);
        assert!(diff_objects.rims.is_empty());
        assert!((diff_objects[0].delta_time - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mono_chart_is_one_streak() {
        let objects = chart(&evenly_spaced(12, 100.0), |_| HitType::Rim);
        let diff_objects = difficulty_objects(&objects, &TaikoDifficultySettings::default());
        let encoding = &diff_objects.color;

        assert_eq!(encoding.mono_streaks.len(), 1);
        assert_eq!(encoding.mono_streaks[0].run_len(), 10);
        assert_eq!(encoding.alternating_mono_patterns.len(), 1);
        assert_eq!(encoding.repeating_hit_patterns.len(), 1);
        assert_eq!(encoding.repeating_hit_patterns[0].repetition_interval, 17);

        let color = TaikoDifficultyColor {
            mono_streak: Some(0),
            alternating_mono_pattern: Some(0),
            repeating_hit_patterns: Some(0),
        };

        assert_eq!(diff_objects[0].color, color);

        let difficulties =
            object_difficulties(&objects, &TaikoDifficultySettings::default());

        assert!(difficulties[0].color > 0.0);
        assert!(difficulties[1..].iter().all(|d| d.color.abs() < f64::EPSILON));
    }

    #[test]
    fn alternating_streaks_decay() {
        let objects = chart(&evenly_spaced(10, 100.0), |i| {
            if i % 2 == 0 {
                HitType::Centre
            } else {
                HitType::Rim
            }
        });

        let diff_objects = difficulty_objects(&objects, &TaikoDifficultySettings::default());
        let encoding = &diff_objects.color;

        assert_eq!(encoding.mono_streaks.len(), 8);
        assert_eq!(encoding.alternating_mono_patterns.len(), 1);
        assert_eq!(encoding.mono_streaks[3].parent, 0);
        assert_eq!(encoding.mono_streaks[3].idx, 3);

        let difficulties = object_difficulties(&objects, &TaikoDifficultySettings::default());

        assert!(difficulties[1].color > difficulties[2].color);
        assert!(difficulties[2].color > difficulties[3].color);
    }

    #[test]
    fn repeated_patterns_are_grouped() {
        // ddk ddk ddk ...
        let objects = chart(&evenly_spaced(20, 100.0), |i| {
            if (i + 1) % 3 == 0 {
                HitType::Rim
            } else {
                HitType::Centre
            }
        });

        let diff_objects = difficulty_objects(&objects, &TaikoDifficultySettings::default());
        let encoding = &diff_objects.color;

        // the first two hits are skipped so the notes start with "k dd k dd"
        assert_eq!(encoding.mono_streaks[0].run_len(), 1);
        assert_eq!(encoding.mono_streaks[1].run_len(), 2);
        assert_eq!(encoding.repeating_hit_patterns.len(), 1);
        assert_eq!(
            encoding.repeating_hit_patterns[0].alternating_mono_patterns.len(),
            encoding.alternating_mono_patterns.len()
        );
    }

    #[test]
    fn stamina_against_same_colour() {
        let objects = chart(&evenly_spaced(8, 100.0), |_| HitType::Centre);

        let difficulties = object_difficulties(&objects, &TaikoDifficultySettings::default());

        assert!(difficulties[0].stamina.abs() < f64::EPSILON);
        assert!(difficulties[1].stamina.abs() < f64::EPSILON);
        assert!((difficulties[2].stamina - (0.5 + 30.0 / 200.0)).abs() < 1e-12);

        let settings = TaikoDifficultySettings::new(64_u32);
        let difficulties = object_difficulties(&objects, &settings);

        assert!((difficulties[2].stamina - (0.5 + 30.0 / (200.0 / 1.5))).abs() < 1e-12);
    }

    #[test]
    fn rhythm_change() {
        let times = [0.0, 100.0, 200.0, 300.0, 400.0, 450.0, 500.0, 550.0];
        let objects = chart(&times, |_| HitType::Centre);

        let difficulties = object_difficulties(&objects, &TaikoDifficultySettings::default());

        // ratio 1/2 after three unchanged notes
        assert!((difficulties[3].rhythm - 0.5 * 0.6).abs() < 1e-12);

        for (i, d) in difficulties.iter().enumerate() {
            if i != 3 {
                assert!(d.rhythm.abs() < f64::EPSILON, "{i}: {}", d.rhythm);
            }
        }
    }

    #[test]
    fn non_hits_have_no_difficulty() {
        let mut objects = chart(&evenly_spaced(6, 100.0), |_| HitType::Centre);
        objects[3].kind = TaikoObjectKind::Swell { end_time: 350.0 };

        let difficulties = object_difficulties(&objects, &TaikoDifficultySettings::default());

        assert_eq!(difficulties[1], TaikoObjectDifficulty::default());
    }
}
