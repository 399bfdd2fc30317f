/// A rhythm change between two consecutive notes, expressed as the ratio of
/// their delta times.
#[derive(Copy, Clone, Debug)]
pub struct HitObjectRhythm {
    pub id: u8,
    pub ratio: f64,
    pub difficulty: f64,
}

impl HitObjectRhythm {
    /// The rhythm of unchanged spacing.
    pub const fn base() -> Self {
        COMMON_RHYTHMS[0]
    }
}

impl PartialEq for HitObjectRhythm {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HitObjectRhythm {}

impl Default for HitObjectRhythm {
    fn default() -> Self {
        Self::base()
    }
}

pub(crate) const COMMON_RHYTHMS: [HitObjectRhythm; 9] = [
    HitObjectRhythm { id: 0, ratio: 1.0, difficulty: 0.0 },
    HitObjectRhythm { id: 1, ratio: 2.0 / 1.0, difficulty: 0.3 },
    HitObjectRhythm { id: 2, ratio: 1.0 / 2.0, difficulty: 0.5 },
    HitObjectRhythm { id: 3, ratio: 3.0 / 1.0, difficulty: 0.3 },
    HitObjectRhythm { id: 4, ratio: 1.0 / 3.0, difficulty: 0.35 },
    HitObjectRhythm { id: 5, ratio: 3.0 / 2.0, difficulty: 0.6 },
    HitObjectRhythm { id: 6, ratio: 2.0 / 3.0, difficulty: 0.4 },
    HitObjectRhythm { id: 7, ratio: 5.0 / 4.0, difficulty: 0.5 },
    HitObjectRhythm { id: 8, ratio: 4.0 / 5.0, difficulty: 0.7 },
];

/// The common rhythm closest to the ratio of `delta_time` and the previous
/// delta time `prev_len`.
///
/// Ties go to the rhythm listed first.
pub(crate) fn closest_rhythm(delta_time: f64, prev_len: f64) -> HitObjectRhythm {
    let ratio = delta_time / prev_len;

    COMMON_RHYTHMS
        .iter()
        .copied()
        .min_by(|r1, r2| {
            (r1.ratio - ratio)
                .abs()
                .total_cmp(&(r2.ratio - ratio).abs())
        })
        .unwrap_or_else(HitObjectRhythm::base)
}
