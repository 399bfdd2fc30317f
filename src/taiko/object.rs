use serde::{Deserialize, Serialize};

/// A hit object of an osu!taiko chart.
///
/// `effective_bpm` is the scroll speed of the object expressed as BPM, i.e.
/// the timing point's BPM multiplied by all slider velocity multipliers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaikoObject {
    pub start_time: f64,
    pub kind: TaikoObjectKind,
    pub effective_bpm: f64,
}

impl TaikoObject {
    /// A don or kat.
    pub const fn hit(start_time: f64, hit_type: HitType, effective_bpm: f64) -> Self {
        Self {
            start_time,
            kind: TaikoObjectKind::Hit(hit_type),
            effective_bpm,
        }
    }

    pub const fn hit_type(&self) -> Option<HitType> {
        match self.kind {
            TaikoObjectKind::Hit(hit_type) => Some(hit_type),
            TaikoObjectKind::DrumRoll { .. } | TaikoObjectKind::Swell { .. } => None,
        }
    }

    pub const fn is_hit(&self) -> bool {
        matches!(self.kind, TaikoObjectKind::Hit(_))
    }

    pub const fn end_time(&self) -> f64 {
        match self.kind {
            TaikoObjectKind::Hit(_) => self.start_time,
            TaikoObjectKind::DrumRoll { end_time } | TaikoObjectKind::Swell { end_time } => {
                end_time
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaikoObjectKind {
    Hit(HitType),
    DrumRoll { end_time: f64 },
    Swell { end_time: f64 },
}

/// The colour of a hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitType {
    /// Don
    Centre,
    /// Kat
    Rim,
}
